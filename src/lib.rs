//! Fishid - on-device fish species image classification.
//!
//! Turns a captured photograph (decoded bitmap, raw camera frame or encoded
//! image bytes) into a ranked species label with a confidence score, running
//! a pre-trained ONNX network entirely on-device. No network round-trip is
//! needed for inference; remote asset locations are only fetched once at
//! initialization time.
//!
//! ```no_run
//! use fishid::{ClassifierConfig, SpeciesClassifier};
//!
//! # async fn run() -> fishid::Result<()> {
//! let mut classifier = SpeciesClassifier::new();
//! classifier.initialize(ClassifierConfig::default()).await?;
//!
//! let photo = std::fs::read("catch.jpg")?;
//! let result = classifier.classify_file(&photo)?;
//! println!("{} ({:.1}%)", result.label, result.confidence * 100.0);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod assets;
pub mod classifier;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod postprocess;
pub mod preprocess;

pub use classifier::SpeciesClassifier;
pub use config::ClassifierConfig;
pub use engine::RawOutput;
pub use error::{Error, Result};
pub use postprocess::{Classification, LabelSource};
pub use preprocess::ImageSource;
