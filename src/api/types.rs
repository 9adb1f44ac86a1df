//! Wire types for the visualization server's REST API.
//!
//! Shapes mirror the JSON the server sends. Anything the client relies on
//! beyond plain decoding (ordering, non-empty option lists) is checked when
//! converting into the domain types below.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::{Result, WorkbenchError};

// -- Catalog --

/// A named visualizer offered by the server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VisualizerDescriptor {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogResponse {
    pub visualizers: Vec<VisualizerDescriptor>,
}

// -- Settings schema --

#[derive(Debug, Clone, Deserialize)]
pub struct SettingsResponse {
    #[serde(default)]
    pub settings: Map<String, Value>,
}

/// One configurable setting and its allowed values, in server order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingSpec {
    pub name: String,
    pub options: Vec<String>,
}

/// Ordered setting-name to options mapping for a single visualizer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsSchema {
    pub settings: Vec<SettingSpec>,
}

impl SettingsSchema {
    /// Build a schema from the `settings` object of a settings response.
    ///
    /// Key order is the order the server wrote them in. A setting whose
    /// option list is empty cannot be rendered, so the whole schema is
    /// rejected rather than silently dropping it.
    pub fn from_wire(visualizer: &str, raw: Map<String, Value>) -> Result<Self> {
        let invalid = |reason: String| WorkbenchError::InvalidSchema {
            visualizer: visualizer.to_string(),
            reason,
        };

        let mut settings = Vec::with_capacity(raw.len());
        for (name, value) in raw {
            let Value::Array(items) = value else {
                return Err(invalid(format!("options for '{}' are not a list", name)));
            };
            if items.is_empty() {
                return Err(invalid(format!("'{}' has no options", name)));
            }
            let mut options = Vec::with_capacity(items.len());
            for item in items {
                let text = match item {
                    Value::String(s) => s,
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    other => {
                        return Err(invalid(format!(
                            "option {} of '{}' is not a scalar",
                            other, name
                        )))
                    }
                };
                options.push(text);
            }
            settings.push(SettingSpec { name, options });
        }
        Ok(Self { settings })
    }

    pub fn len(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }
}

// -- Upload --

#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub ok: Option<String>,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default, deserialize_with = "opt_uid")]
    pub uid: Option<String>,
}

/// Server-assigned handle for an uploaded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    pub uid: String,
    pub file: Option<String>,
}

impl UploadResponse {
    pub fn into_result(self) -> Result<UploadResult> {
        if self.ok.as_deref() == Some("false") {
            return Err(WorkbenchError::UploadRejected);
        }
        match self.uid {
            Some(uid) => Ok(UploadResult {
                uid,
                file: self.file,
            }),
            None => Err(WorkbenchError::Decode("upload response has no uid".into())),
        }
    }
}

/// An image previously uploaded in this server session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadedImage {
    pub filename: String,
    #[serde(deserialize_with = "uid")]
    pub uid: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageListResponse {
    #[serde(default)]
    pub images: Vec<UploadedImage>,
}

// The server hands out integer uids; accept strings too and keep them opaque.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawUid {
    Text(String),
    Int(i64),
}

impl From<RawUid> for String {
    fn from(raw: RawUid) -> Self {
        match raw {
            RawUid::Text(s) => s,
            RawUid::Int(n) => n.to_string(),
        }
    }
}

fn uid<'de, D: Deserializer<'de>>(de: D) -> std::result::Result<String, D::Error> {
    RawUid::deserialize(de).map(String::from)
}

fn opt_uid<'de, D: Deserializer<'de>>(de: D) -> std::result::Result<Option<String>, D::Error> {
    Option::<RawUid>::deserialize(de).map(|raw| raw.map(String::from))
}

// -- Visualization --

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClassProbability {
    pub name: String,
    pub prob: f64,
    #[serde(default)]
    pub index: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VisualizationResult {
    pub input_file_name: String,
    #[serde(default)]
    pub has_processed_input: bool,
    #[serde(default)]
    pub processed_input_file_name: Option<String>,
    #[serde(default)]
    pub has_output: bool,
    #[serde(default)]
    pub output_file_names: Option<Vec<String>>,
    #[serde(default)]
    pub predict_probs: Vec<ClassProbability>,
}

// -- Banner / session --

/// Static backend metadata shown once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppState {
    pub app_title: String,
    pub model_name: String,
    pub latest_ckpt_name: String,
    pub latest_ckpt_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiInfo {
    #[serde(default)]
    pub message: String,
    pub version: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResetResponse {
    #[serde(default)]
    pub ok: Option<String>,
}
