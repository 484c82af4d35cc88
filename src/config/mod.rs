//! Classifier configuration.

mod file;
mod types;

pub use file::load_config_file;
pub use types::ClassifierConfig;

impl ClassifierConfig {
    /// Load classifier configuration from a TOML file.
    ///
    /// Returns default config if the file does not exist.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        load_config_file(path)
    }
}
