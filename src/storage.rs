/// Persisted options and the chrome.storage bridge

use crate::instance::Instance;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// Key the options document is stored under
pub const OPTIONS_KEY: &str = "options";

// Import JS bridge functions
#[wasm_bindgen(module = "/options.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getOptions(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setOptions(key: &str, value: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn setAllowedOrigins(origins: JsValue) -> Result<(), JsValue>;
}

/// Root storage structure, exchanged wholesale with the browser
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OptionsDocument {
    #[serde(default)]
    pub instances: Vec<Instance>,
    #[serde(default)]
    pub group_names: Vec<String>,
}

impl OptionsDocument {
    pub fn new(instances: Vec<Instance>, group_names: Vec<String>) -> Self {
        OptionsDocument {
            instances,
            group_names,
        }
    }
}

/// Two well-known servers, both disabled until the user opts in
impl Default for OptionsDocument {
    fn default() -> Self {
        OptionsDocument {
            instances: vec![
                Instance::new("https://chromium-review.googlesource.com", "Chromium", false),
                Instance::new(
                    "https://chrome-internal-review.googlesource.com",
                    "Chrome internal",
                    false,
                ),
            ],
            group_names: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// A browser API promise rejected
    #[error("{0}")]
    Js(String),
    #[error("Failed to convert options: {0}")]
    Serialization(String),
}

/// Prefers `Error.prototype.toString()`, then a thrown string, then Debug
impl From<JsValue> for StoreError {
    fn from(value: JsValue) -> Self {
        if let Some(err) = value.dyn_ref::<js_sys::Error>() {
            return StoreError::Js(String::from(err.to_string()));
        }
        match value.as_string() {
            Some(message) => StoreError::Js(message),
            None => StoreError::Js(format!("{:?}", value)),
        }
    }
}

impl From<serde_wasm_bindgen::Error> for StoreError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Durable home of the options document plus the host permission allowlist
///
/// Futures are driven by the browser event loop and need not be `Send`.
#[allow(async_fn_in_trait)]
pub trait OptionsStore {
    async fn fetch_options(&self) -> Result<OptionsDocument, StoreError>;

    async fn save_options(&self, document: &OptionsDocument) -> Result<(), StoreError>;

    async fn set_allowed_origins(&self, origins: &[String]) -> Result<(), StoreError>;
}

/// `chrome.storage.sync` + `chrome.permissions`, reached through options.js
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChromeStore;

impl OptionsStore for ChromeStore {
    async fn fetch_options(&self) -> Result<OptionsDocument, StoreError> {
        let options_js = getOptions(OPTIONS_KEY).await?;

        if options_js.is_null() || options_js.is_undefined() {
            Ok(OptionsDocument::default())
        } else {
            Ok(serde_wasm_bindgen::from_value(options_js)?)
        }
    }

    async fn save_options(&self, document: &OptionsDocument) -> Result<(), StoreError> {
        let options_js = serde_wasm_bindgen::to_value(document)?;
        setOptions(OPTIONS_KEY, options_js).await?;
        Ok(())
    }

    async fn set_allowed_origins(&self, origins: &[String]) -> Result<(), StoreError> {
        let origins_js = serde_wasm_bindgen::to_value(origins)?;
        setAllowedOrigins(origins_js).await?;
        Ok(())
    }
}
