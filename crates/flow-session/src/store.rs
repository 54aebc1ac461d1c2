//! Trait `SessionStore` e implementación en memoria.

use std::collections::HashMap;

use log::debug;

use crate::{SessionConfig, SessionError};

/// Almacén clave/valor de cadenas con alcance de sesión.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<(), SessionError>;
    fn remove(&mut self, key: &str) -> Option<String>;
}

#[derive(Debug, Default, Clone)]
pub struct InMemorySessionStore {
    inner: HashMap<String, String>,
    max_entries: Option<usize>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &SessionConfig) -> Self {
        Self { inner: HashMap::new(),
               max_entries: config.max_entries }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), SessionError> {
        if let Some(max) = self.max_entries {
            if !self.inner.contains_key(key) && self.inner.len() >= max {
                return Err(SessionError::Unavailable(format!("limit of {max} entries reached")));
            }
        }
        debug!("session set {key}");
        self.inner.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Option<String> {
        self.inner.remove(key)
    }
}
