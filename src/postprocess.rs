//! Raw score interpretation: softmax, arg-max and label mapping.

use crate::constants::FALLBACK_LABEL_PREFIX;
use crate::error::{Error, Result};
use serde::Serialize;
use tracing::warn;

/// How the result label was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelSource {
    /// Label came from the loaded label list.
    Exact,
    /// Arg-max index fell outside the label list and a synthetic label was
    /// produced. Indicates model/label asset skew, not a model failure.
    Fallback,
}

/// Classification result for one image.
#[derive(Debug, Clone, Serialize)]
pub struct Classification {
    /// Index of the winning class.
    pub top_index: usize,
    /// Human-readable species label.
    pub label: String,
    /// Probability of the winning class, in `[0, 1]`.
    pub confidence: f32,
    /// Full probability distribution over all classes, summing to 1. Kept so
    /// callers can show alternate candidates without re-running inference.
    pub probs: Vec<f32>,
    /// Whether the label was resolved from the label list or synthesized.
    pub label_source: LabelSource,
}

/// Numerically-stable softmax.
///
/// The maximum is subtracted before exponentiating so large scores cannot
/// overflow.
pub fn softmax(scores: &[f32]) -> Vec<f32> {
    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = scores.iter().map(|v| (v - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.iter().map(|v| v / sum).collect()
}

/// Interpret a raw score vector into a [`Classification`].
///
/// Ties break toward the first index with the greatest probability (stable
/// left-to-right scan). An arg-max index beyond the label list degrades to a
/// synthetic `"Class <index>"` label instead of failing, keeping callers
/// resilient to asset skew; the result is tagged [`LabelSource::Fallback`]
/// so they can still surface it as a data-quality concern.
pub fn interpret(scores: &[f32], labels: &[String]) -> Result<Classification> {
    if scores.is_empty() {
        return Err(Error::Inference {
            reason: "empty score vector".to_string(),
        });
    }

    let probs = softmax(scores);

    let mut top_index = 0;
    let mut top_prob = probs[0];
    for (index, &prob) in probs.iter().enumerate().skip(1) {
        if prob > top_prob {
            top_prob = prob;
            top_index = index;
        }
    }

    let (label, label_source) = labels.get(top_index).map_or_else(
        || {
            warn!(
                "Arg-max index {top_index} outside label list of length {}; using synthetic label",
                labels.len()
            );
            (
                format!("{FALLBACK_LABEL_PREFIX} {top_index}"),
                LabelSource::Fallback,
            )
        },
        |label| (label.clone(), LabelSource::Exact),
    );

    Ok(Classification {
        top_index,
        label,
        confidence: top_prob,
        probs,
        label_source,
    })
}
