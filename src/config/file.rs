//! Configuration file loading.

use crate::config::ClassifierConfig;
use crate::error::{Error, Result};
use std::path::Path;

/// Load classifier configuration from a TOML file.
///
/// Returns default config if the file does not exist.
pub fn load_config_file(path: &Path) -> Result<ClassifierConfig> {
    if !path.exists() {
        return Ok(ClassifierConfig::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| Error::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_nonexistent_file_returns_default() {
        let path = Path::new("/nonexistent/path/fishid.toml");
        let config = load_config_file(path);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.input_size, 640);
    }

    #[test]
    fn test_load_valid_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
model = "/assets/fishnet.onnx"
labels = "/assets/species_labels.json"
accelerated = true
input_size = 640
"#
        )
        .unwrap();

        let config = load_config_file(file.path()).unwrap();
        assert_eq!(config.model, "/assets/fishnet.onnx");
        assert!(config.accelerated);
    }

    #[test]
    fn test_load_invalid_toml_returns_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "this is not valid toml {{{{").unwrap();

        let config = load_config_file(file.path());
        assert!(matches!(config, Err(Error::ConfigParse { .. })));
    }
}
