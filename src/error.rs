use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} must be a positive number of milliseconds, got {value}")]
    NonPositiveInterval { name: &'static str, value: f64 },
    #[error("round duration must be at least one second")]
    ZeroDuration,
    #[error("heart size must be positive, got {0}")]
    NonPositiveSize(f64),
    #[error("element id `{0}` must not be empty")]
    EmptyElementId(&'static str),
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error("no global window")]
    NoWindow,
    #[error("no document on window")]
    NoDocument,
    #[error("performance API unavailable")]
    NoPerformance,
    #[error("element #{id} not found")]
    MissingElement { id: String },
    #[error("element #{id} is not an HTML element")]
    WrongElementType { id: String },
    #[error("javascript error: {0}")]
    Js(String),
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
    #[cfg(feature = "serde_json")]
    #[error("could not parse config: {0}")]
    ConfigParse(String),
}

impl From<JsValue> for GameError {
    fn from(value: JsValue) -> Self {
        GameError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<GameError> for JsValue {
    fn from(err: GameError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
