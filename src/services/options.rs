// Options engine for the group extension.
// Manages user options: loading, saving, updating individual values, and resetting to defaults.
// Options are stored as a JSON file at the platform-specific config path.

use std::fs;
use std::path::Path;

use crate::platform;
use crate::types::errors::OptionsError;
use crate::types::options::Options;

/// Trait defining the options engine interface.
pub trait OptionsEngineTrait {
    fn load(&mut self) -> Result<Options, OptionsError>;
    fn save(&self) -> Result<(), OptionsError>;
    fn get_options(&self) -> &Options;
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), OptionsError>;
    fn reset(&mut self) -> Result<(), OptionsError>;
    fn get_config_path(&self) -> &str;
}

/// Options engine implementation that persists options as JSON on disk.
pub struct OptionsEngine {
    config_path: String,
    options: Options,
}

impl OptionsEngine {
    /// Creates a new OptionsEngine.
    ///
    /// If `path_override` is `Some`, uses that path for the options file.
    /// Otherwise, uses the platform-specific config directory with `options.json`.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = match path_override {
            Some(p) => p,
            None => {
                let config_dir = platform::get_config_dir();
                config_dir
                    .join("options.json")
                    .to_string_lossy()
                    .to_string()
            }
        };

        Self {
            config_path,
            options: Options::default(),
        }
    }
}

impl OptionsEngineTrait for OptionsEngine {
    /// Loads options from the JSON file.
    ///
    /// If the file does not exist, returns default options.
    /// If the file exists but is malformed, returns a serialization error.
    fn load(&mut self) -> Result<Options, OptionsError> {
        let path = Path::new(&self.config_path);

        if !path.exists() {
            self.options = Options::default();
            return Ok(self.options.clone());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| OptionsError::IoError(format!("Failed to read options file: {}", e)))?;

        let options: Options = serde_json::from_str(&content).map_err(|e| {
            OptionsError::SerializationError(format!("Failed to parse options file: {}", e))
        })?;

        self.options = options;
        Ok(self.options.clone())
    }

    /// Saves the current options to the JSON file.
    ///
    /// Creates parent directories if they don't exist.
    fn save(&self) -> Result<(), OptionsError> {
        let path = Path::new(&self.config_path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                OptionsError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.options).map_err(|e| {
            OptionsError::SerializationError(format!("Failed to serialize options: {}", e))
        })?;

        fs::write(path, json)
            .map_err(|e| OptionsError::IoError(format!("Failed to write options file: {}", e)))
    }

    fn get_options(&self) -> &Options {
        &self.options
    }

    /// Updates a single top-level option by key.
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), OptionsError> {
        let mut as_json = serde_json::to_value(&self.options).map_err(|e| {
            OptionsError::SerializationError(format!("Failed to serialize options: {}", e))
        })?;

        let obj = as_json.as_object_mut().ok_or_else(|| {
            OptionsError::SerializationError("Options did not serialize to an object".to_string())
        })?;
        if !obj.contains_key(key) {
            return Err(OptionsError::SerializationError(format!(
                "Unknown options key: {}",
                key
            )));
        }
        obj.insert(key.to_string(), value);

        self.options = serde_json::from_value(as_json).map_err(|e| {
            OptionsError::SerializationError(format!("Invalid value for '{}': {}", key, e))
        })?;
        Ok(())
    }

    fn reset(&mut self) -> Result<(), OptionsError> {
        self.options = Options::default();
        self.save()
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
