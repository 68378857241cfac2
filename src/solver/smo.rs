//! Sequential Minimal Optimization (SMO) solver implementation
//!
//! Solves the soft-margin SVM dual by repeatedly optimizing pairs of Lagrange
//! multipliers, following Platt's "Sequential Minimal Optimization: A Fast
//! Algorithm for Training Support Vector Machines".
//!
//! The decision function is f(x) = Σ αⱼ yⱼ K(xⱼ, x) + b and the error cache
//! holds Eᵢ = f(xᵢ) - yᵢ for every training sample, bias included.

use crate::cache::KernelCache;
use crate::core::{OptimizationResult, OptimizerConfig, Result, SVMError, Sample};
use crate::kernel::Kernel;
use log::debug;
use std::sync::Arc;

/// Multipliers at or below this value are treated as zero
const ALPHA_ZERO: f64 = 1e-8;

/// Mutable optimization state for one `solve` call
struct SolverState<'a, K: Kernel> {
    samples: &'a [Sample],
    cache: KernelCache<'a, K>,
    alpha: Vec<f64>,
    error_cache: Vec<f64>,
    b: f64,
}

/// SMO solver for SVM optimization
pub struct SMOSolver<K: Kernel> {
    kernel: Arc<K>,
    config: OptimizerConfig,
}

impl<K: Kernel> SMOSolver<K> {
    /// Create a new SMO solver with the given kernel and configuration
    pub fn new(kernel: Arc<K>, config: OptimizerConfig) -> Self {
        Self { kernel, config }
    }

    /// Solve the SVM optimization problem
    ///
    /// Takes training samples labelled +1/-1 and returns the optimized
    /// alpha values, bias term, and other optimization results.
    pub fn solve(&self, samples: &[Sample]) -> Result<OptimizationResult> {
        validate_samples(samples)?;

        let n = samples.len();
        let mut state = SolverState {
            samples,
            cache: KernelCache::with_memory_limit(
                self.kernel.as_ref(),
                samples,
                self.config.cache_size,
            ),
            alpha: vec![0.0; n],
            // All alphas and b start at zero, so f(x_i) = 0 and E_i = -y_i
            error_cache: samples.iter().map(|s| -s.label).collect(),
            b: 0.0,
        };

        let mut iterations = 0;
        let mut num_changed = 0;
        let mut examine_all = true;

        while (num_changed > 0 || examine_all) && iterations < self.config.max_iterations {
            num_changed = 0;

            for i in 0..n {
                if !examine_all && self.is_bound(state.alpha[i]) {
                    continue;
                }
                if self.examine_example(i, &mut state) {
                    num_changed += 1;
                }
            }

            if examine_all {
                examine_all = false;
            } else if num_changed == 0 {
                examine_all = true;
            }

            iterations += 1;
        }

        if iterations >= self.config.max_iterations {
            debug!(
                "SMO stopped at the iteration limit ({}) before full convergence",
                self.config.max_iterations
            );
        }

        let support_vectors: Vec<usize> = state
            .alpha
            .iter()
            .enumerate()
            .filter_map(|(i, &a)| if a > ALPHA_ZERO { Some(i) } else { None })
            .collect();

        let objective_value =
            self.calculate_objective(samples, &state.alpha, &support_vectors, &mut state.cache);
        if !objective_value.is_finite() || !state.b.is_finite() {
            return Err(SVMError::OptimizationError(
                "solver diverged to a non-finite solution".to_string(),
            ));
        }

        let stats = state.cache.stats();
        debug!(
            "SMO finished: {} iterations, {} support vectors, cache hit rate {:.2} ({} entries)",
            iterations,
            support_vectors.len(),
            state.cache.hit_rate(),
            stats.size
        );

        Ok(OptimizationResult {
            alpha: state.alpha,
            b: state.b,
            support_vectors,
            iterations,
            objective_value,
        })
    }

    fn is_bound(&self, alpha: f64) -> bool {
        alpha <= ALPHA_ZERO || alpha >= self.config.c - ALPHA_ZERO
    }

    /// Examine a single example for potential optimization
    fn examine_example(&self, i2: usize, state: &mut SolverState<'_, K>) -> bool {
        let y2 = state.samples[i2].label;
        let alpha2 = state.alpha[i2];
        let e2 = state.error_cache[i2];
        let r2 = e2 * y2;

        // KKT violation conditions:
        // - r2 < -epsilon and alpha2 < C (can increase alpha2)
        // - r2 > epsilon and alpha2 > 0 (can decrease alpha2)
        let violates = (r2 < -self.config.epsilon && alpha2 < self.config.c)
            || (r2 > self.config.epsilon && alpha2 > 0.0);
        if !violates {
            return false;
        }

        let n = state.samples.len();
        let non_bound: Vec<usize> = (0..n)
            .filter(|&k| !self.is_bound(state.alpha[k]))
            .collect();

        // Second choice heuristic: maximize |E1 - E2|
        if non_bound.len() > 1 {
            if let Some(i1) = select_second_variable(i2, e2, &state.error_cache, &non_bound) {
                if self.take_step(i1, i2, state) {
                    return true;
                }
            }
        }

        // Sweep the non-bound set, then everything, starting at a
        // position derived from i2 so the scan order is deterministic
        let offset = i2 % n.max(1);
        for k in 0..non_bound.len() {
            let i1 = non_bound[(k + offset) % non_bound.len()];
            if self.take_step(i1, i2, state) {
                return true;
            }
        }
        for k in 0..n {
            let i1 = (k + offset) % n;
            if self.take_step(i1, i2, state) {
                return true;
            }
        }

        false
    }

    /// Perform the actual optimization step for variables i1 and i2
    fn take_step(&self, i1: usize, i2: usize, state: &mut SolverState<'_, K>) -> bool {
        if i1 == i2 {
            return false;
        }

        let c = self.config.c;
        let eps = self.config.epsilon;

        let y1 = state.samples[i1].label;
        let y2 = state.samples[i2].label;
        let alpha1 = state.alpha[i1];
        let alpha2 = state.alpha[i2];
        let e1 = state.error_cache[i1];
        let e2 = state.error_cache[i2];
        let s = y1 * y2;

        // Calculate bounds L and H
        let (low, high) = if y1 != y2 {
            ((alpha2 - alpha1).max(0.0), c.min(c + alpha2 - alpha1))
        } else {
            ((alpha1 + alpha2 - c).max(0.0), c.min(alpha1 + alpha2))
        };
        if high - low < 1e-12 {
            return false;
        }

        let k11 = state.cache.value(i1, i1);
        let k12 = state.cache.value(i1, i2);
        let k22 = state.cache.value(i2, i2);
        let eta = k11 + k22 - 2.0 * k12;

        let mut a2 = if eta > 0.0 {
            (alpha2 + y2 * (e1 - e2) / eta).clamp(low, high)
        } else {
            // Non-positive curvature: take whichever end of the segment
            // has the lower objective
            let f1 = y1 * (e1 - state.b) - alpha1 * k11 - s * alpha2 * k12;
            let f2 = y2 * (e2 - state.b) - s * alpha1 * k12 - alpha2 * k22;
            let l1 = alpha1 + s * (alpha2 - low);
            let h1 = alpha1 + s * (alpha2 - high);
            let low_obj = l1 * f1
                + low * f2
                + 0.5 * l1 * l1 * k11
                + 0.5 * low * low * k22
                + s * low * l1 * k12;
            let high_obj = h1 * f1
                + high * f2
                + 0.5 * h1 * h1 * k11
                + 0.5 * high * high * k22
                + s * high * h1 * k12;

            if low_obj < high_obj - eps {
                low
            } else if low_obj > high_obj + eps {
                high
            } else {
                alpha2
            }
        };

        if a2 < ALPHA_ZERO {
            a2 = 0.0;
        } else if a2 > c - ALPHA_ZERO {
            a2 = c;
        }

        // Check for sufficient change
        if (a2 - alpha2).abs() < eps * (a2 + alpha2 + eps) {
            return false;
        }

        let a1 = (alpha1 + s * (alpha2 - a2)).clamp(0.0, c);
        let delta1 = y1 * (a1 - alpha1);
        let delta2 = y2 * (a2 - alpha2);

        // Threshold update keeps the KKT conditions on whichever
        // multiplier ends up strictly inside (0, C)
        let b1 = state.b - e1 - delta1 * k11 - delta2 * k12;
        let b2 = state.b - e2 - delta1 * k12 - delta2 * k22;
        let b_new = if a1 > 0.0 && a1 < c {
            b1
        } else if a2 > 0.0 && a2 < c {
            b2
        } else {
            (b1 + b2) / 2.0
        };
        let delta_b = b_new - state.b;

        for k in 0..state.samples.len() {
            let k1k = state.cache.value(i1, k);
            let k2k = state.cache.value(i2, k);
            state.error_cache[k] += delta1 * k1k + delta2 * k2k + delta_b;
        }

        state.alpha[i1] = a1;
        state.alpha[i2] = a2;
        state.b = b_new;

        true
    }

    /// Dual objective: Σαᵢ - ½ ΣΣ αᵢαⱼyᵢyⱼK(xᵢ,xⱼ)
    fn calculate_objective(
        &self,
        samples: &[Sample],
        alpha: &[f64],
        support_vectors: &[usize],
        cache: &mut KernelCache<'_, K>,
    ) -> f64 {
        let mut obj: f64 = support_vectors.iter().map(|&i| alpha[i]).sum();

        for &i in support_vectors {
            for &j in support_vectors {
                let k_ij = cache.value(i, j);
                obj -= 0.5 * alpha[i] * alpha[j] * samples[i].label * samples[j].label * k_ij;
            }
        }

        obj
    }
}

/// Pick the non-bound index maximizing |E_i - E_j|
fn select_second_variable(
    i: usize,
    e_i: f64,
    error_cache: &[f64],
    candidates: &[usize],
) -> Option<usize> {
    let mut best_j = None;
    let mut max_diff = 0.0;

    for &j in candidates {
        if j == i {
            continue;
        }
        let diff = (e_i - error_cache[j]).abs();
        if diff > max_diff {
            max_diff = diff;
            best_j = Some(j);
        }
    }

    best_j
}

fn validate_samples(samples: &[Sample]) -> Result<()> {
    let first = samples.first().ok_or(SVMError::EmptyDataset)?;
    let dim = first.features.len();

    for sample in samples {
        if sample.label != 1.0 && sample.label != -1.0 {
            return Err(SVMError::InvalidLabel(sample.label));
        }
        if sample.features.len() != dim {
            return Err(SVMError::DimensionMismatch {
                expected: dim,
                actual: sample.features.len(),
            });
        }
    }

    Ok(())
}
