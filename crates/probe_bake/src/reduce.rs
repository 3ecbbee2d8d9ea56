//! Stage 4: Reduce
//!
//! Greedy thinning of candidate probes down to a target count.
//!
//! # Density
//!
//! ```text
//! density(x) = Σ_{p ∈ P} kernel(|x - p| / rho)
//!
//! kernel(t) = 2t³ - 3t² + 1   for 0 <= t <= 1
//!           = 0               otherwise
//!
//!   1 ┤▀▀▄
//!     │   ▀▄
//!     │     ▀▄
//!     │       ▀▄▄
//!   0 ┼──────────▀▀▀────
//!     0      0.5      1   t
//! ```
//!
//! The sum includes `x` itself, so every density is at least 1.
//!
//! # Iteration
//!
//! 1. Recompute every density against the current set (parallel, each probe
//!    writes only its own slot).
//! 2. Sort ascending by density.
//! 3. Drop the tail: the most crowded probe.
//!
//! One probe leaves per iteration, so the loop runs exactly `N - target`
//! times. Each iteration is O(N²).

use rayon::prelude::*;

use crate::types::{Aabb, Probe};

/// Smooth falloff: 1 at `t = 0`, 0 at `t = 1`, 0 outside `[0, 1]`.
#[inline]
pub fn density_kernel(t: f32) -> f32 {
  if !(0.0..=1.0).contains(&t) {
    return 0.0;
  }
  let t2 = t * t;
  2.0 * t2 * t - 3.0 * t2 + 1.0
}

/// Number of probes to keep: how many `rho`-sized cells tile the bounds.
///
/// `Π_axis max(1, round(size_axis / rho))`
pub fn target_probe_count(bounds: &Aabb, rho: f32) -> usize {
  let cells = bounds.size() / rho;
  [cells.x, cells.y, cells.z]
    .into_iter()
    .map(|c| {
      let rounded = c.round();
      if rounded.is_finite() && rounded >= 1.0 {
        rounded as usize
      } else {
        1
      }
    })
    .product()
}

/// Crowding score of `target` against every probe in `probes`.
#[inline]
pub fn probe_density(target: &Probe, probes: &[Probe], rho: f32) -> f32 {
  let inv_rho = 1.0 / rho;
  probes
    .iter()
    .map(|p| density_kernel(target.position.distance(p.position) * inv_rho))
    .sum()
}

/// Recompute `density` for every probe against the full current set.
pub fn update_densities(probes: &mut [Probe], rho: f32) {
  let densities: Vec<f32> = {
    let snapshot: &[Probe] = &*probes;
    snapshot
      .par_iter()
      .map(|probe| probe_density(probe, snapshot, rho))
      .collect()
  };

  probes
    .par_iter_mut()
    .zip(densities.into_par_iter())
    .for_each(|(probe, density)| probe.density = density);
}

/// A probe removed by the reducer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Removal {
  pub id: usize,
  /// Density at the moment of removal.
  pub density: f32,
}

/// What a reduction did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReductionReport {
  /// Probe count before reduction.
  pub initial_count: usize,

  /// Requested count.
  pub target: usize,

  /// Removals in the order they happened.
  pub removals: Vec<Removal>,
}

impl ReductionReport {
  #[inline]
  pub fn iterations(&self) -> usize {
    self.removals.len()
  }

  #[inline]
  pub fn final_count(&self) -> usize {
    self.initial_count - self.removals.len()
  }
}

/// Thin `probes` down to `target`, removing the densest probe each step.
///
/// No-op when `probes.len() <= target`. The surviving probes are left sorted
/// by their last computed density.
pub fn reduce_probes(probes: &mut Vec<Probe>, target: usize, rho: f32) -> ReductionReport {
  let mut report = ReductionReport {
    initial_count: probes.len(),
    target,
    removals: Vec::with_capacity(probes.len().saturating_sub(target)),
  };

  while probes.len() > target {
    update_densities(probes, rho);
    probes.sort_by(|a, b| a.density.total_cmp(&b.density));

    if let Some(removed) = probes.pop() {
      tracing::trace!(id = removed.id, density = removed.density, "probe removed");
      report.removals.push(Removal {
        id: removed.id,
        density: removed.density,
      });
    }
  }

  report
}

#[cfg(test)]
#[path = "reduce_test.rs"]
mod reduce_test;
