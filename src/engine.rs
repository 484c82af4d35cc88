//! Inference engine owning the loaded model session.

use crate::error::{Error, Result};
use crate::preprocess::InputTensor;
use ndarray::ArrayD;
use ort::session::Session;
use ort::value::TensorRef;
use std::sync::Mutex;
use tracing::debug;

/// Raw model output in one of the representations the runtime may produce.
///
/// The same logical score vector can arrive as a tensor needing readout, an
/// already-flat vector, or a widened `f64` vector depending on the model and
/// runtime version. [`RawOutput::into_vector`] is the single discriminator
/// that resolves all of them before interpretation.
#[derive(Debug)]
pub enum RawOutput {
    /// Tensor readout of arbitrary rank, possibly carrying a leading batch
    /// axis.
    Tensor(ArrayD<f32>),
    /// Already-flat score vector.
    Values(Vec<f32>),
    /// Scores widened to `f64` on readout.
    Doubles(Vec<f64>),
}

impl RawOutput {
    /// Flatten into a plain `f32` score vector.
    ///
    /// # Errors
    /// Returns [`Error::Inference`] if the output holds no elements.
    #[allow(clippy::cast_possible_truncation)]
    pub fn into_vector(self) -> Result<Vec<f32>> {
        let scores: Vec<f32> = match self {
            Self::Tensor(array) => array.into_iter().collect(),
            Self::Values(values) => values,
            Self::Doubles(values) => values.into_iter().map(|v| v as f32).collect(),
        };

        if scores.is_empty() {
            return Err(Error::Inference {
                reason: "model produced an empty output".to_string(),
            });
        }
        Ok(scores)
    }
}

/// Inference engine owning the loaded model handle.
///
/// The session is guarded by a mutex, so classification calls are serialized
/// with one forward pass in flight at a time. A shared session is not
/// assumed safe for truly parallel execution.
pub struct InferenceEngine {
    session: Mutex<Session>,
    input_name: String,
    output_name: String,
}

impl InferenceEngine {
    /// Wrap a committed session, resolving its input and output bindings.
    pub fn from_session(session: Session) -> Result<Self> {
        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .ok_or_else(|| Error::Inference {
                reason: "model declares no inputs".to_string(),
            })?;
        let output_name = session
            .outputs
            .first()
            .map(|output| output.name.clone())
            .ok_or_else(|| Error::Inference {
                reason: "model declares no outputs".to_string(),
            })?;

        debug!("Model bindings: input '{input_name}', output '{output_name}'");
        Ok(Self {
            session: Mutex::new(session),
            input_name,
            output_name,
        })
    }

    /// Run a single forward pass: exactly one output per one input, no
    /// batching.
    ///
    /// An unrecognized output representation fails with
    /// [`Error::Inference`] for this call only; the loaded model stays valid
    /// and later calls may succeed.
    pub fn run(&self, tensor: &InputTensor) -> Result<RawOutput> {
        let input = TensorRef::from_array_view(tensor.array()).map_err(|e| Error::Inference {
            reason: format!("failed to bind input tensor: {e}"),
        })?;

        let mut session = self.session.lock().map_err(|_| Error::Inference {
            reason: "inference session lock poisoned".to_string(),
        })?;

        let outputs = session
            .run(ort::inputs![self.input_name.as_str() => input])
            .map_err(|e| Error::Inference {
                reason: e.to_string(),
            })?;

        let value = outputs
            .get(self.output_name.as_str())
            .ok_or_else(|| Error::Inference {
                reason: format!("model produced no output named '{}'", self.output_name),
            })?;

        if let Ok(view) = value.try_extract_array::<f32>() {
            let array = view.to_owned();
            debug!("Raw output: f32 tensor, shape {:?}", array.shape());
            if array.ndim() == 1 {
                return Ok(RawOutput::Values(array.into_iter().collect()));
            }
            return Ok(RawOutput::Tensor(array));
        }

        if let Ok(view) = value.try_extract_array::<f64>() {
            debug!("Raw output: f64 tensor, shape {:?}", view.shape());
            return Ok(RawOutput::Doubles(view.iter().copied().collect()));
        }

        Err(Error::Inference {
            reason: "unrecognized model output type".to_string(),
        })
    }
}
