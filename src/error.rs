//! Error types for fishid.

/// Result type alias for fishid operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for fishid.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Required configuration or label asset is missing, empty or invalid.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration failure.
        message: String,
    },

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Failed to load the model weights or build a session from them.
    #[error("failed to load model from '{location}'")]
    ModelLoad {
        /// Model location (path or URL).
        location: String,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The inference runtime failed to initialize.
    #[error("inference runtime unavailable: {reason}")]
    RuntimeUnavailable {
        /// Description of the initialization failure.
        reason: String,
    },

    /// Classification attempted before successful initialization.
    #[error("classifier not initialized: call initialize() first")]
    NotInitialized,

    /// The runtime returned an output that could not be interpreted.
    #[error("inference failed: {reason}")]
    Inference {
        /// Description of the inference failure.
        reason: String,
    },

    /// Failed to decode an encoded image.
    #[error("failed to decode image")]
    ImageDecode {
        /// Underlying decode error.
        #[source]
        source: image::ImageError,
    },

    /// Raw frame buffer does not match its declared dimensions.
    #[error(
        "invalid frame buffer: expected {expected} bytes for {width}x{height} RGBA, got {actual}"
    )]
    InvalidFrame {
        /// Declared frame width in pixels.
        width: u32,
        /// Declared frame height in pixels.
        height: u32,
        /// Expected buffer length in bytes.
        expected: usize,
        /// Actual buffer length in bytes.
        actual: usize,
    },

    /// Failed to download a remote asset.
    #[error("failed to fetch asset from '{url}'")]
    AssetFetch {
        /// URL that failed.
        url: String,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Cache directory could not be determined.
    #[error("could not determine cache directory for this platform")]
    CacheDirNotFound,
}
