// Типы ошибок

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MomentsError {
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("DOM error: {0}")]
    DomError(String),

    #[error("WASM serialization error: {0}")]
    SerdeWasmError(String),
}

impl MomentsError {
    /// Ошибка валидации пользовательского ввода (показывается через alert)
    pub fn is_validation(&self) -> bool {
        matches!(self, MomentsError::ValidationError(_))
    }
}

impl From<serde_json::Error> for MomentsError {
    fn from(error: serde_json::Error) -> Self {
        MomentsError::SerializationError(error.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<serde_wasm_bindgen::Error> for MomentsError {
    fn from(error: serde_wasm_bindgen::Error) -> Self {
        MomentsError::SerdeWasmError(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MomentsError>;

// Для WASM-биндингов
#[cfg(target_arch = "wasm32")]
impl From<MomentsError> for wasm_bindgen::JsValue {
    fn from(error: MomentsError) -> Self {
        wasm_bindgen::JsValue::from_str(&error.to_string())
    }
}

/// Converts a rejected browser call into a storage error with context.
#[cfg(target_arch = "wasm32")]
pub fn js_error(context: &str, value: wasm_bindgen::JsValue) -> MomentsError {
    MomentsError::StorageError(format!("{}: {:?}", context, value))
}

/// Same as [`js_error`] but for DOM manipulation failures.
#[cfg(target_arch = "wasm32")]
pub fn dom_error(context: &str, value: wasm_bindgen::JsValue) -> MomentsError {
    MomentsError::DomError(format!("{}: {:?}", context, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MomentsError::NotFound("story 42".to_string());
        assert_eq!(err.to_string(), "Not found: story 42");
        assert!(!err.is_validation());
        assert!(MomentsError::ValidationError("empty".into()).is_validation());
    }

    #[test]
    fn test_from_serde_json() {
        let err: MomentsError = serde_json::from_str::<Vec<u8>>("{").unwrap_err().into();
        assert!(matches!(err, MomentsError::SerializationError(_)));
    }
}
