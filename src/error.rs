use thiserror::Error;
use wasm_bindgen::JsValue;

// Failures of the browser glue. The simulation itself never fails.
#[derive(Debug, Error)]
pub enum SnowError {
    #[error("no global `window` exists")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("no canvas element with id `{0}`")]
    CanvasNotFound(String),
    #[error("could not get a 2d context from the canvas")]
    NoContext,
    #[error("invalid snow field config: {0}")]
    Config(String),
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for SnowError {
    fn from(value: JsValue) -> Self {
        SnowError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<SnowError> for JsValue {
    fn from(err: SnowError) -> Self {
        JsValue::from(js_sys::Error::new(&err.to_string()))
    }
}
