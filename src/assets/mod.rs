//! Asset loading: inference runtime, model weights and label list.

mod fetch;
mod labels;
mod model;

pub use fetch::{fetch_asset, is_remote};
pub use labels::{load_labels, parse_labels};
pub use model::{ensure_runtime, load_model};
