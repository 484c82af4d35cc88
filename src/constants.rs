//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for cache directories and runtime identification.
pub const APP_NAME: &str = "fishid";

/// Default location of the model weights file.
pub const DEFAULT_MODEL_LOCATION: &str = "models/fishnet.onnx";

/// Default location of the species label list.
pub const DEFAULT_LABELS_LOCATION: &str = "models/species_labels.json";

/// Default model input edge length in pixels.
///
/// The deployed network was trained on plain-resized 640x640 RGB input.
/// This value is part of the model contract, not a tunable.
pub const DEFAULT_INPUT_SIZE: u32 = 640;

/// Number of color channels in the model input (R, G, B).
pub const CHANNELS: usize = 3;

/// Intra-op thread count for the inference session.
pub const INTRA_THREADS: usize = 4;

/// Prefix for synthetic labels produced when the arg-max index falls
/// outside the loaded label list.
pub const FALLBACK_LABEL_PREFIX: &str = "Class";

/// Asset download settings.
pub mod download {
    /// Connect timeout for asset downloads in seconds.
    pub const CONNECT_TIMEOUT_SECS: u64 = 30;

    /// Overall timeout for asset downloads in seconds.
    pub const TIMEOUT_SECS: u64 = 300;
}

/// Confidence value bounds.
pub mod confidence {
    /// Minimum valid confidence value.
    pub const MIN: f32 = 0.0;
    /// Maximum valid confidence value.
    pub const MAX: f32 = 1.0;
}
