//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) y expone una estructura inmutable (`CONFIG`)
//! con los retardos del simulador de llamadas y el filtro de logs.
use std::env;
use std::time::Duration;

use flow_adapters::calls::CallTimings;
use log::warn;
use once_cell::sync::Lazy;

use crate::errors::AppError;

pub const CONNECT_DELAY_VAR: &str = "STEPFLOW_CONNECT_DELAY_MS";
pub const RING_DELAY_VAR: &str = "STEPFLOW_RING_DELAY_MS";
pub const TICK_VAR: &str = "STEPFLOW_TICK_MS";
pub const LOW_MINUTES_VAR: &str = "STEPFLOW_LOW_MINUTES_THRESHOLD";
pub const LOG_VAR: &str = "STEPFLOW_LOG";

/// Configuración global de la aplicación.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Retardos y umbral del simulador de llamadas.
    pub calls: CallConfig,
    /// Directiva de filtro para el subscriber de logs (`info`, `flow_adapters=debug`, ...).
    pub log_filter: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallConfig {
    pub connect_delay_ms: u64,
    pub ring_delay_ms: u64,
    pub tick_ms: u64,
    pub low_minutes_threshold: u32,
}

impl Default for CallConfig {
    fn default() -> Self {
        Self { connect_delay_ms: 2000,
               ring_delay_ms: 2500,
               tick_ms: 1000,
               low_minutes_threshold: 3 }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { calls: CallConfig::default(),
               log_filter: "info".to_string() }
    }
}

impl AppConfig {
    /// Lee la configuración del entorno (cargando `.env` si existe).
    pub fn from_env_checked() -> Result<Self, AppError> {
        flow_session::init_dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construye la configuración con una función de búsqueda arbitraria.
    /// Las variables ausentes toman el valor por defecto; las presentes deben
    /// ser numéricas válidas.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
        where F: Fn(&str) -> Option<String>
    {
        let defaults = CallConfig::default();
        let calls = CallConfig { connect_delay_ms: parse_var(&lookup, CONNECT_DELAY_VAR, defaults.connect_delay_ms)?,
                                 ring_delay_ms: parse_var(&lookup, RING_DELAY_VAR, defaults.ring_delay_ms)?,
                                 tick_ms: parse_var(&lookup, TICK_VAR, defaults.tick_ms)?,
                                 low_minutes_threshold: parse_var(&lookup,
                                                                  LOW_MINUTES_VAR,
                                                                  defaults.low_minutes_threshold)? };
        if calls.tick_ms == 0 {
            return Err(AppError::Config(format!("{TICK_VAR} must be greater than zero")));
        }
        let log_filter = lookup(LOG_VAR).filter(|v| !v.trim().is_empty())
                                        .unwrap_or_else(|| "info".to_string());
        Ok(Self { calls, log_filter })
    }

    pub fn to_call_timings(&self) -> CallTimings {
        CallTimings { connect_delay: Duration::from_millis(self.calls.connect_delay_ms),
                      ring_delay: Duration::from_millis(self.calls.ring_delay_ms),
                      tick: Duration::from_millis(self.calls.tick_ms),
                      low_minutes_threshold: self.calls.low_minutes_threshold }
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
    where F: Fn(&str) -> Option<String>,
          T: std::str::FromStr
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim()
                        .parse::<T>()
                        .map_err(|_| AppError::Config(format!("{key} must be a non-negative integer, got '{raw}'"))),
    }
}

/// Instancia global perezosa de configuración, evaluada una sola vez.
/// Un valor inválido se registra y se usan los valores por defecto.
pub static CONFIG: Lazy<AppConfig> = Lazy::new(|| {
    AppConfig::from_env_checked().unwrap_or_else(|e| {
                                     warn!("invalid configuration, using defaults: {e}");
                                     AppConfig::default()
                                 })
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let cfg = AppConfig::from_lookup(lookup(&[])).expect("config");
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.to_call_timings(), CallTimings::default());
    }

    #[test]
    fn test_overrides_are_applied() {
        let cfg = AppConfig::from_lookup(lookup(&[(CONNECT_DELAY_VAR, "10"),
                                                  (RING_DELAY_VAR, " 20 "),
                                                  (LOW_MINUTES_VAR, "5"),
                                                  (LOG_VAR, "flow_adapters=debug")])).expect("config");
        let timings = cfg.to_call_timings();
        assert_eq!(timings.connect_delay, Duration::from_millis(10));
        assert_eq!(timings.ring_delay, Duration::from_millis(20));
        assert_eq!(timings.low_minutes_threshold, 5);
        assert_eq!(cfg.log_filter, "flow_adapters=debug");
    }

    #[test]
    fn test_invalid_number_is_config_error() {
        let err = AppConfig::from_lookup(lookup(&[(TICK_VAR, "fast")])).unwrap_err();
        assert!(matches!(err, AppError::Config(ref m) if m.contains(TICK_VAR)));
        let err = AppConfig::from_lookup(lookup(&[(TICK_VAR, "0")])).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
