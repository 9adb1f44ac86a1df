/// Client settings read once from the hosting page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Origin of the visualization server; empty means same origin.
    pub api_base: String,
    pub log_level: log::Level,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            log_level: log::Level::Info,
        }
    }
}

impl ClientConfig {
    /// Read the `data-api-base` attribute on `<html>` and the `log` query
    /// parameter of the current URL.
    /// - `<html data-api-base="http://host:5000">` → requests go to that origin
    /// - `?log=debug` → console logging at debug level
    pub fn from_page() -> Self {
        let Some(window) = web_sys::window() else {
            return Self::default();
        };
        let api_base = window
            .document()
            .and_then(|doc| doc.document_element())
            .and_then(|html| html.get_attribute("data-api-base"));
        let query = window.location().search().unwrap_or_default();
        Self::from_parts(api_base, &query)
    }

    pub fn from_parts(api_base: Option<String>, query: &str) -> Self {
        let api_base = api_base
            .map(|b| b.trim().trim_end_matches('/').to_string())
            .unwrap_or_default();

        let log_level = query
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "log")
            .and_then(|(_, value)| parse_level(value))
            .unwrap_or(log::Level::Info);

        Self {
            api_base,
            log_level,
        }
    }
}

fn parse_level(value: &str) -> Option<log::Level> {
    match value.to_ascii_lowercase().as_str() {
        "error" => Some(log::Level::Error),
        "warn" => Some(log::Level::Warn),
        "info" => Some(log::Level::Info),
        "debug" => Some(log::Level::Debug),
        "trace" => Some(log::Level::Trace),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_same_origin_info() {
        let config = ClientConfig::from_parts(None, "");
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_reads_base_and_level() {
        let config =
            ClientConfig::from_parts(Some("http://localhost:5000/ ".into()), "?vis=x&log=DEBUG");
        assert_eq!(config.api_base, "http://localhost:5000");
        assert_eq!(config.log_level, log::Level::Debug);
    }

    #[test]
    fn test_unknown_level_falls_back_to_info() {
        let config = ClientConfig::from_parts(None, "?log=loud");
        assert_eq!(config.log_level, log::Level::Info);
    }
}
