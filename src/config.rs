//! Runtime settings
//!
//! Values come from the environment (after loading an optional `.env`
//! file); anything unset or unparsable falls back to its default.

use crate::kernel::KernelKind;
use log::warn;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_DATASET_SIZE: usize = 200;
pub const DEFAULT_RANDOM_SEED: u64 = 42;
pub const DEFAULT_TEST_FRACTION: f64 = 0.2;

/// Application settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Root that data and result paths are resolved against
    pub project_root: PathBuf,
    pub host: String,
    pub port: u16,
    /// Number of candidates generated per training run
    pub dataset_size: usize,
    /// Seed for data generation and the train/test split
    pub random_seed: u64,
    pub test_fraction: f64,
    pub reference_year: i32,
    /// Kernels trained on every run
    pub kernels: Vec<KernelKind>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from(env!("CARGO_MANIFEST_DIR")),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            dataset_size: DEFAULT_DATASET_SIZE,
            random_seed: DEFAULT_RANDOM_SEED,
            test_fraction: DEFAULT_TEST_FRACTION,
            reference_year: crate::data::DEFAULT_REFERENCE_YEAR,
            kernels: KernelKind::ALL.to_vec(),
        }
    }
}

impl Settings {
    /// Load `.env` (if present) and read settings from the environment
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            project_root: lookup("PROJECT_ROOT")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.project_root),
            host: lookup("HOST")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port),
            dataset_size: parse_or(&lookup, "DATASET_SIZE", defaults.dataset_size),
            random_seed: parse_or(&lookup, "RANDOM_SEED", defaults.random_seed),
            test_fraction: parse_or(&lookup, "TEST_FRACTION", defaults.test_fraction),
            reference_year: parse_or(&lookup, "REFERENCE_YEAR", defaults.reference_year),
            kernels: lookup("KERNELS")
                .and_then(|v| parse_kernels(&v))
                .unwrap_or(defaults.kernels),
        }
    }

    pub fn with_project_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.project_root = root.into();
        self
    }

    /// Generated dataset location
    pub fn dataset_path(&self) -> PathBuf {
        self.project_root.join("data").join("candidate_data.csv")
    }

    /// Directory for reports and decision grids
    pub fn results_dir(&self) -> PathBuf {
        self.project_root.join("results")
    }

    /// Persisted bundle location
    pub fn model_path(&self) -> PathBuf {
        self.project_root.join("data").join("best_model.json")
    }

    /// Socket address string for the HTTP server
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring unparsable {key}={raw:?}");
            default
        }),
        None => default,
    }
}

/// Comma separated kernel names; `None` if any name is unknown or the list is empty
fn parse_kernels(raw: &str) -> Option<Vec<KernelKind>> {
    let kernels = raw
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(KernelKind::from_str)
        .collect::<Result<Vec<_>, _>>();
    match kernels {
        Ok(kernels) if !kernels.is_empty() => Some(kernels),
        Ok(_) => None,
        Err(err) => {
            warn!("Ignoring KERNELS={raw:?}: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_lookup(lookup(&[]));
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.port, 8000);
        assert_eq!(settings.dataset_size, 200);
        assert_eq!(settings.random_seed, 42);
        assert_eq!(settings.reference_year, 2023);
        assert_eq!(settings.kernels, KernelKind::ALL.to_vec());
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::from_lookup(lookup(&[
            ("PROJECT_ROOT", "/srv/hiring"),
            ("HOST", "127.0.0.1"),
            ("PORT", "9001"),
            ("DATASET_SIZE", "500"),
            ("TEST_FRACTION", "0.25"),
            ("KERNELS", "rbf, poly"),
        ]));
        assert_eq!(settings.bind_address(), "127.0.0.1:9001");
        assert_eq!(settings.dataset_size, 500);
        assert_eq!(settings.test_fraction, 0.25);
        assert_eq!(settings.kernels, vec![KernelKind::Rbf, KernelKind::Polynomial]);
        assert_eq!(
            settings.dataset_path(),
            PathBuf::from("/srv/hiring/data/candidate_data.csv")
        );
        assert_eq!(settings.results_dir(), PathBuf::from("/srv/hiring/results"));
        assert_eq!(
            settings.model_path(),
            PathBuf::from("/srv/hiring/data/best_model.json")
        );
    }

    #[test]
    fn test_unparsable_values_fall_back() {
        let settings = Settings::from_lookup(lookup(&[
            ("PORT", "eighty"),
            ("RANDOM_SEED", "-3"),
            ("KERNELS", "linear,quadratic"),
        ]));
        assert_eq!(settings.port, DEFAULT_PORT);
        assert_eq!(settings.random_seed, DEFAULT_RANDOM_SEED);
        assert_eq!(settings.kernels, KernelKind::ALL.to_vec());
    }
}
