use mc_fix_core::NormalizationOptions;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct FixConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Log every individual fix at debug level.
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub normalization: NormalizationSection,
    #[serde(default)]
    pub sanitization: SanitizationSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Default, Deserialize)]
pub struct NormalizationSection {
    #[serde(default)]
    pub hover_event_uuid: HoverEventUuidSection,
}

#[derive(Debug, Deserialize)]
pub struct HoverEventUuidSection {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub convert: ConvertSection,
}

impl Default for HoverEventUuidSection {
    fn default() -> Self {
        Self {
            enabled: true,
            convert: ConvertSection::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ConvertSection {
    #[serde(default = "default_true")]
    pub int_array: bool,
    #[serde(default = "default_true")]
    pub uuid_object: bool,
}

impl Default for ConvertSection {
    fn default() -> Self {
        Self {
            int_array: true,
            uuid_object: true,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SanitizationSection {
    #[serde(default = "default_true")]
    pub prevent_unloaded_chunk_dig: bool,
}

impl Default for SanitizationSection {
    fn default() -> Self {
        Self {
            prevent_unloaded_chunk_dig: true,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoggingSection {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for FixConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            debug: false,
            normalization: NormalizationSection::default(),
            sanitization: SanitizationSection::default(),
            logging: LoggingSection::default(),
        }
    }
}

impl FixConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Like [`FixConfig::load`], but a missing file yields the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn normalization_options(&self) -> NormalizationOptions {
        let convert = &self.normalization.hover_event_uuid.convert;
        NormalizationOptions {
            convert_int_arrays: convert.int_array,
            convert_uuid_objects: convert.uuid_object,
        }
    }
}
