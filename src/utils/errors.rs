//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del motor de rutas
//! y su clasificación según la capa que los produce.

use thiserror::Error;

/// Errores principales del motor
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

impl From<reqwest::Error> for EngineError {
    fn from(err: reqwest::Error) -> Self {
        EngineError::Network(err.to_string())
    }
}

impl From<validator::ValidationErrors> for EngineError {
    fn from(err: validator::ValidationErrors) -> Self {
        EngineError::Validation(err.to_string())
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type ClientResult<T> = Result<T, EngineError>;

/// Función helper para crear errores de validación
pub fn validation_error(field: &str, message: &str) -> EngineError {
    EngineError::Validation(format!("{}: {}", field, message))
}

/// Función helper para crear errores de backend
pub fn backend_error(endpoint: &str, detail: &str) -> EngineError {
    EngineError::Backend(format!("{}: {}", endpoint, detail))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = validation_error("latitude", "out of range");
        assert_eq!(err.to_string(), "Validation error: latitude: out of range");

        let err = backend_error("/optimize", "503 Service Unavailable");
        assert_eq!(
            err.to_string(),
            "Backend error: /optimize: 503 Service Unavailable"
        );
    }
}
