use thiserror::Error;

/// A decoded payload that had the right JSON shape but broke a semantic rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Semantic checks applied after a response body has been decoded.
///
/// Serde already rejects payloads of the wrong shape; `validate` covers the
/// rules the type system cannot express (date formats, allowed windows,
/// finite amounts, base64 payloads).
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

impl Validate for serde_json::Value {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

pub(crate) fn ensure_finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new(field, format!("expected a finite number, got {}", value)))
    }
}
