//! Classifier facade: initialize once, classify many times.

use crate::assets;
use crate::config::ClassifierConfig;
use crate::engine::InferenceEngine;
use crate::error::{Error, Result};
use crate::postprocess::{self, Classification};
use crate::preprocess::{self, ImageSource};
use tracing::{debug, info};

enum State {
    Uninitialized,
    Initializing,
    Ready(Loaded),
    Failed,
}

struct Loaded {
    engine: InferenceEngine,
    labels: Vec<String>,
    input_size: u32,
}

/// Fish species image classifier.
///
/// Lifecycle: `Uninitialized -> Initializing -> Ready` on success, or
/// `Initializing -> Failed` on an asset loading error, from which a fresh
/// [`initialize`](Self::initialize) call may retry. Once `Ready` the
/// classifier supports unbounded repeated classification; there is no
/// teardown transition.
///
/// Classification calls are serialized on the inference session, one forward
/// pass in flight at a time; the session is not assumed safe for truly
/// parallel execution. Calls run to completion, with no cancellation or
/// timeout, and the facade never retries a failure itself: the usual causes
/// (missing asset, incompatible runtime) are persistent misconfiguration,
/// not transient blips.
pub struct SpeciesClassifier {
    state: State,
}

impl SpeciesClassifier {
    /// Create an uninitialized classifier.
    pub fn new() -> Self {
        Self {
            state: State::Uninitialized,
        }
    }

    /// Whether the classifier is ready to classify.
    pub fn is_ready(&self) -> bool {
        matches!(self.state, State::Ready(_))
    }

    /// Load the runtime, the label list and the model weights.
    ///
    /// Must complete successfully before any classification call. Once
    /// ready, re-initializing returns immediately without re-fetching
    /// assets.
    pub async fn initialize(&mut self, config: ClassifierConfig) -> Result<()> {
        if self.is_ready() {
            debug!("Classifier already initialized; skipping asset reload");
            return Ok(());
        }

        self.state = State::Initializing;
        match Self::load(&config).await {
            Ok(loaded) => {
                info!(
                    "Classifier ready: {} labels, input size {}",
                    loaded.labels.len(),
                    loaded.input_size
                );
                self.state = State::Ready(loaded);
                Ok(())
            }
            Err(e) => {
                self.state = State::Failed;
                Err(e)
            }
        }
    }

    async fn load(config: &ClassifierConfig) -> Result<Loaded> {
        assets::ensure_runtime()?;
        let labels = assets::load_labels(&config.labels).await?;
        let engine = assets::load_model(&config.model, config.accelerated).await?;
        Ok(Loaded {
            engine,
            labels,
            input_size: config.input_size,
        })
    }

    /// Classify a decoded image surface.
    ///
    /// The input tensor and the raw output wrapper are owned by this call
    /// and released on every exit path, including errors.
    pub fn classify_image(&self, source: ImageSource) -> Result<Classification> {
        let State::Ready(loaded) = &self.state else {
            return Err(Error::NotInitialized);
        };

        let tensor = preprocess::to_input_tensor(source, loaded.input_size)?;
        let raw = loaded.engine.run(&tensor)?;
        drop(tensor);

        let scores = raw.into_vector()?;
        postprocess::interpret(&scores, &loaded.labels)
    }

    /// Decode encoded image bytes, then classify.
    pub fn classify_file(&self, bytes: &[u8]) -> Result<Classification> {
        if !self.is_ready() {
            return Err(Error::NotInitialized);
        }
        let bitmap = preprocess::decode_bytes(bytes)?;
        self.classify_image(ImageSource::Bitmap(bitmap))
    }
}

impl Default for SpeciesClassifier {
    fn default() -> Self {
        Self::new()
    }
}
