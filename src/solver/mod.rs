//! SVM solver implementations
//!
//! This module implements the Sequential Minimal Optimization (SMO) algorithm
//! for the binary soft-margin SVM dual.

pub mod smo;

pub use self::smo::*;
