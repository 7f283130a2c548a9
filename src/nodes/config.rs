use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use linenodes::io::OutputFormat;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct InputConfig {
    pub strict: bool,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub path: Option<PathBuf>,
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse config file")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert!(!config.input.strict);
        assert_eq!(config.output.format, OutputFormat::Text);
        assert!(config.output.path.is_none());
    }

    #[test]
    fn test_full_config() {
        let config = Config::parse(
            r#"
            [input]
            strict = true

            [output]
            format = "geojson"
            path = "nodes.geojson"
            "#,
        )
        .unwrap();
        assert!(config.input.strict);
        assert_eq!(config.output.format, OutputFormat::Geojson);
        assert_eq!(config.output.path, Some(PathBuf::from("nodes.geojson")));
    }

    #[test]
    fn test_bad_format_rejected() {
        assert!(Config::parse("[output]\nformat = \"csv\"").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nodes.toml");
        fs::write(&path, "[input]\nstrict = true\n").unwrap();
        assert!(Config::load_from_file(&path).unwrap().input.strict);
    }
}
