//! Viewer configuration loading.

use serde::Deserialize;
use std::path::Path;

/// Config file looked up in the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "viewer.toml";

/// Tunable parameters for the viewer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ViewerConfig {
    /// Path to the event log; when absent the UI opens a file dialog.
    #[serde(default)]
    pub events_file: Option<String>,
    /// Histogram bucket width in whole seconds.
    #[serde(default = "default_bucket_width_secs")]
    pub bucket_width_secs: i64,
    /// Action label rendered as arrows in the sequence diagram.
    #[serde(default = "default_delivery_action")]
    pub delivery_action: String,
}

fn default_bucket_width_secs() -> i64 {
    1
}

fn default_delivery_action() -> String {
    "RECV".to_string()
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            events_file: None,
            bucket_width_secs: default_bucket_width_secs(),
            delivery_action: default_delivery_action(),
        }
    }
}

impl ViewerConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `config_path` - Path to the viewer.toml file
    ///
    /// # Returns
    /// * `Ok(ViewerConfig)` if the file was successfully loaded and parsed
    /// * `Err(String)` with a descriptive error message otherwise
    pub fn load(config_path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(config_path).map_err(|e| format!("Failed to read config file: {}", e))?;

        let config: ViewerConfig = toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `viewer.toml` from the working directory if it exists, defaults otherwise.
    pub fn load_or_default() -> Result<Self, String> {
        let path = Path::new(DEFAULT_CONFIG_FILE);
        if path.exists() { Self::load(path) } else { Ok(Self::default()) }
    }

    fn validate(&self) -> Result<(), String> {
        if self.bucket_width_secs < 1 {
            return Err(format!(
                "bucket-width-secs must be at least 1, got {}",
                self.bucket_width_secs
            ));
        }
        if self.delivery_action.is_empty() {
            return Err("delivery-action must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::default();
        assert_eq!(config.events_file, None);
        assert_eq!(config.bucket_width_secs, 1);
        assert_eq!(config.delivery_action, "RECV");
    }

    #[test]
    fn test_load_full_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"events-file = \"events.csv\"\nbucket-width-secs = 5\ndelivery-action = \"RECV_ACCEPT\"\n",
        )
        .unwrap();
        let config = ViewerConfig::load(file.path()).unwrap();
        assert_eq!(config.events_file.as_deref(), Some("events.csv"));
        assert_eq!(config.bucket_width_secs, 5);
        assert_eq!(config.delivery_action, "RECV_ACCEPT");
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"bucket-width-secs = 2\n").unwrap();
        let config = ViewerConfig::load(file.path()).unwrap();
        assert_eq!(config.bucket_width_secs, 2);
        assert_eq!(config.delivery_action, "RECV");
    }

    #[test]
    fn test_zero_bucket_width_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"bucket-width-secs = 0\n").unwrap();
        let result = ViewerConfig::load(file.path());
        match result {
            Err(msg) => assert!(msg.contains("bucket-width-secs"), "unexpected message: {}", msg),
            Ok(_) => panic!("Expected validation failure"),
        }
    }
}
