//! Candidate screening with kernel support vector machines
//!
//! Synthesizes a hiring dataset, trains one SMO-fitted SVM per kernel
//! (linear, RBF, polynomial, sigmoid), keeps the most accurate one together
//! with its feature scaler, and serves predictions over HTTP.

pub mod cache;
pub mod config;
pub mod core;
pub mod data;
pub mod evaluation;
pub mod kernel;
pub mod optimizer;
pub mod persistence;
pub mod pipeline;
pub mod preprocess;
pub mod server;
pub mod service;
pub mod solver;
pub mod trainer;
pub mod utils;

// Re-export main types for convenience
pub use crate::cache::{CacheStats, KernelCache};
pub use crate::config::Settings;
pub use crate::core::traits::*;
pub use crate::core::types::*;
pub use crate::data::{generate, CandidateDataset, CandidateRecord, DatasetSummary};
pub use crate::evaluation::{evaluate, EvaluationReport};
pub use crate::kernel::{Kernel, KernelFunction, KernelKind};
pub use crate::optimizer::{SVMOptimizer, TrainedSVM};
pub use crate::persistence::{load_bundle, persist, select_best, ModelBundle};
pub use crate::pipeline::{load_or_train, run_training, TrainingOutcome};
pub use crate::preprocess::{split_and_scale, SplitData};
pub use crate::service::{predict, CandidatePrediction, PredictionService};
pub use crate::trainer::{train, Trainer};
pub use crate::utils::scaling::StandardScaler;

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
