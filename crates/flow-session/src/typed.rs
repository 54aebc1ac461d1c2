//! Helpers tipados sobre `SessionStore`.
//!
//! Los valores se guardan como JSON. Un payload que no deserializa se
//! registra con `warn!` y se trata como ausente.

use flow_domain::Contact;
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::keys::{PHONE_VERIFIED, SELECTED_CONTACT, USER_PHONE};
use crate::{SessionError, SessionStore};

pub fn save_json<T: Serialize, S: SessionStore + ?Sized>(store: &mut S, key: &str, value: &T) -> Result<(), SessionError> {
    let payload = serde_json::to_string(value).map_err(|e| SessionError::Serialization { key: key.to_string(),
                                                                                          message: e.to_string() })?;
    store.set(key, payload)
}

pub fn load_json<T: DeserializeOwned, S: SessionStore + ?Sized>(store: &S, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(v) => Some(v),
        Err(e) => {
            warn!("session key {key} holds a malformed payload, ignoring: {e}");
            None
        }
    }
}

pub fn save_selected_contact<S: SessionStore + ?Sized>(store: &mut S, contact: &Contact) -> Result<(), SessionError> {
    save_json(store, SELECTED_CONTACT, contact)
}

pub fn load_selected_contact<S: SessionStore + ?Sized>(store: &S) -> Option<Contact> {
    load_json(store, SELECTED_CONTACT)
}

pub fn mark_phone_verified<S: SessionStore + ?Sized>(store: &mut S, phone: &str) -> Result<(), SessionError> {
    store.set(PHONE_VERIFIED, "true".to_string())?;
    store.set(USER_PHONE, phone.to_string())
}

pub fn is_phone_verified<S: SessionStore + ?Sized>(store: &S) -> bool {
    store.get(PHONE_VERIFIED).as_deref() == Some("true")
}

pub fn user_phone<S: SessionStore + ?Sized>(store: &S) -> Option<String> {
    store.get(USER_PHONE)
}
