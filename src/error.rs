//! Structured error types for portfolio-fx.
//!
//! Most page behaviors degrade silently when markup is missing; these errors
//! cover the steps that can genuinely fail (configuration, element creation).

/// All errors that can occur while configuring or installing page effects.
#[derive(Debug, thiserror::Error)]
pub enum PortfolioFxError {
    /// Configuration JSON could not be decoded.
    #[error("Config parsing: {0}")]
    ConfigJson(#[from] serde_json::Error),

    /// Configuration decoded but failed validation.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// The host refused to create or insert an element.
    #[error("DOM operation failed: {0}")]
    Dom(String),

    /// No browser window/document is reachable.
    #[error("No document available")]
    NoDocument,

    /// Catch-all for string errors from JS glue.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PortfolioFxError>;

impl From<String> for PortfolioFxError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for PortfolioFxError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<PortfolioFxError> for wasm_bindgen::JsValue {
    fn from(e: PortfolioFxError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
