use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorkbenchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("({status}) {status_text}")]
    Http { status: u16, status_text: String },

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("invalid settings for '{visualizer}': {reason}")]
    InvalidSchema { visualizer: String, reason: String },

    #[error("upload rejected by server")]
    UploadRejected,

    #[error("no visualizer selected")]
    MissingSelection,

    #[error("settings for '{0}' are not loaded")]
    SettingsNotLoaded(String),
}

impl WorkbenchError {
    /// Text shown in the blocking alert for user-initiated actions.
    pub fn alert_message(&self) -> String {
        format!("error: {}", self)
    }

    pub fn http(status: u16, status_text: impl Into<String>) -> Self {
        Self::Http {
            status,
            status_text: status_text.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WorkbenchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_alert_carries_status_code_and_text() {
        let err = WorkbenchError::http(500, "Internal Server Error");
        assert_eq!(err.alert_message(), "error: (500) Internal Server Error");
    }

    #[test]
    fn test_non_http_alert_uses_description() {
        let err = WorkbenchError::UploadRejected;
        assert_eq!(err.alert_message(), "error: upload rejected by server");
    }

    #[test]
    fn test_settings_not_loaded_names_visualizer() {
        let err = WorkbenchError::SettingsNotLoaded("saliency".into());
        assert_eq!(err.alert_message(), "error: settings for 'saliency' are not loaded");
    }
}
