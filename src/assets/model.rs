//! Runtime initialization and model session loading.

use crate::constants::{APP_NAME, INTRA_THREADS};
use crate::engine::InferenceEngine;
use crate::error::{Error, Result};
use ort::execution_providers::XNNPACKExecutionProvider;
use ort::session::Session;
use ort::session::builder::GraphOptimizationLevel;
use std::sync::OnceLock;
use tracing::{debug, info};

static RUNTIME: OnceLock<std::result::Result<(), String>> = OnceLock::new();

/// Initialize the ONNX runtime process-wide.
///
/// The first call commits the runtime environment; later calls reuse it
/// without re-registering, so concurrent or repeated initialization is safe.
pub fn ensure_runtime() -> Result<()> {
    let state = RUNTIME.get_or_init(|| {
        debug!("Committing ONNX runtime environment");
        ort::init()
            .with_name(APP_NAME)
            .commit()
            .map(|_| ())
            .map_err(|e| e.to_string())
    });

    state
        .clone()
        .map_err(|reason| Error::RuntimeUnavailable { reason })
}

/// Load model weights from a path or URL and build an inference engine.
///
/// `accelerated` registers the XNNPACK execution provider; leave it off when
/// the target is known to lack support for the accelerated kernels.
pub async fn load_model(location: &str, accelerated: bool) -> Result<InferenceEngine> {
    let bytes = super::fetch_asset(location)
        .await
        .map_err(|e| model_load_error(location, Box::new(e)))?;

    let mut builder = Session::builder()
        .and_then(|b| b.with_optimization_level(GraphOptimizationLevel::Level3))
        .and_then(|b| b.with_intra_threads(INTRA_THREADS))
        .map_err(|e| model_load_error(location, Box::new(e)))?;

    if accelerated {
        debug!("Registering XNNPACK execution provider");
        builder = builder
            .with_execution_providers([XNNPACKExecutionProvider::default().build()])
            .map_err(|e| model_load_error(location, Box::new(e)))?;
    }

    let session = builder
        .commit_from_memory(&bytes)
        .map_err(|e| model_load_error(location, Box::new(e)))?;

    let engine = InferenceEngine::from_session(session)?;
    info!(
        "Loaded model from {location} ({} bytes), accelerated: {accelerated}",
        bytes.len()
    );
    Ok(engine)
}

fn model_load_error(location: &str, source: Box<dyn std::error::Error + Send + Sync>) -> Error {
    Error::ModelLoad {
        location: location.to_string(),
        source,
    }
}
