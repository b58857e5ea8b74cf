//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno del cliente:
//! URL base del backend de rutas y timeout de las peticiones.

use std::env;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub backend_url: String,
    pub request_timeout_secs: u64,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            backend_url: env::var("ETRUCK_BACKEND_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            request_timeout_secs: env::var("ETRUCK_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300), // optimizaciones largas
        }
    }
}

impl EnvironmentConfig {
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            backend_url: backend_url.into(),
            request_timeout_secs: 300,
        }
    }

    /// URL completa de un endpoint del backend
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.backend_url.trim_end_matches('/'), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let config = EnvironmentConfig::new("http://localhost:8000/");
        assert_eq!(
            config.endpoint("/calculate-costs"),
            "http://localhost:8000/calculate-costs"
        );
    }
}
