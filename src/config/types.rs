//! Configuration type definitions.

use crate::constants::{DEFAULT_INPUT_SIZE, DEFAULT_LABELS_LOCATION, DEFAULT_MODEL_LOCATION};
use serde::{Deserialize, Serialize};

/// Classifier configuration.
///
/// `model` and `labels` accept filesystem paths or `http(s)` URLs. The
/// `input_size` is part of the model contract: it must match the resolution
/// the loaded weights were trained for, and is never a free parameter chosen
/// per call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Location of the model weights file (path or URL).
    pub model: String,

    /// Location of the species label list (path or URL).
    pub labels: String,

    /// Enable the accelerated kernel backend (XNNPACK execution provider).
    ///
    /// Off by default; may need to stay off for compatibility with some
    /// targets.
    pub accelerated: bool,

    /// Model input edge length in pixels.
    pub input_size: u32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL_LOCATION.to_string(),
            labels: DEFAULT_LABELS_LOCATION.to_string(),
            accelerated: false,
            input_size: DEFAULT_INPUT_SIZE,
        }
    }
}
