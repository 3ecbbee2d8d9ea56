//! BakeConfig - parameters for probe placement and SH estimation.

use serde::Deserialize;

use crate::constants::{
  DEFAULT_MAX_DEPTH, DEFAULT_RHO_PROBES, DEFAULT_SAMPLES_PER_PROBE, DEFAULT_VOXEL_UNIT,
  PROBE_OFFSET_SCALE, SURFACE_INSET,
};
use crate::error::{BakeError, Result};
use crate::estimator::EstimatorParams;
use crate::flood_fill::SeedParams;

/// Distance between a voxel's min corner and its neighbour's min corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeighborStep {
  /// One voxel edge (`voxel_unit`).
  #[default]
  VoxelUnit,

  /// Literal world-space step, independent of voxel size.
  Fixed(f32),
}

impl NeighborStep {
  #[inline]
  pub fn resolve(&self, voxel_unit: f32) -> f32 {
    match self {
      NeighborStep::VoxelUnit => voxel_unit,
      NeighborStep::Fixed(step) => *step,
    }
  }
}

/// How per-probe sample directions are generated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingPattern {
  /// Independent uniform directions from a seeded RNG.
  #[default]
  Random,

  /// Deterministic Fibonacci spiral.
  Fibonacci,
}

/// Configuration for a probe bake.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct BakeConfig {
  /// Path depth forwarded to the integrator description. Unused by the core.
  pub max_depth: u32,

  /// Voxel edge length in world units.
  pub voxel_unit: f32,

  /// Probe spacing used for the target count and density kernel radius.
  pub rho_probes: f32,

  /// Directions drawn per probe during SH estimation.
  pub samples_per_probe: u32,

  /// Inset applied to each voxel face before the overlap query.
  pub surface_inset: f32,

  /// Push per solid neighbour applied to seeded probes.
  pub offset_scale: f32,

  /// Neighbour displacement for flood fill and surface offset.
  pub neighbor_step: NeighborStep,

  /// Direction generator for SH estimation.
  pub sampling: SamplingPattern,

  /// Base seed; each probe derives its own stream from it.
  pub seed: u64,

  /// Dump the directions used by the first probe to `sample_dirs.txt`.
  pub write_sample_dirs: bool,
}

impl Default for BakeConfig {
  fn default() -> Self {
    Self {
      max_depth: DEFAULT_MAX_DEPTH,
      voxel_unit: DEFAULT_VOXEL_UNIT,
      rho_probes: DEFAULT_RHO_PROBES,
      samples_per_probe: DEFAULT_SAMPLES_PER_PROBE,
      surface_inset: SURFACE_INSET,
      offset_scale: PROBE_OFFSET_SCALE,
      neighbor_step: NeighborStep::default(),
      sampling: SamplingPattern::default(),
      seed: 0,
      write_sample_dirs: false,
    }
  }
}

impl BakeConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_voxel_unit(mut self, unit: f32) -> Self {
    self.voxel_unit = unit;
    self
  }

  pub fn with_rho_probes(mut self, rho: f32) -> Self {
    self.rho_probes = rho;
    self
  }

  pub fn with_samples_per_probe(mut self, samples: u32) -> Self {
    self.samples_per_probe = samples;
    self
  }

  pub fn with_neighbor_step(mut self, step: NeighborStep) -> Self {
    self.neighbor_step = step;
    self
  }

  pub fn with_sampling(mut self, sampling: SamplingPattern) -> Self {
    self.sampling = sampling;
    self
  }

  pub fn with_seed(mut self, seed: u64) -> Self {
    self.seed = seed;
    self
  }

  pub fn with_sample_dirs(mut self, write: bool) -> Self {
    self.write_sample_dirs = write;
    self
  }

  /// Reject parameters the stages cannot run with.
  ///
  /// A non-positive `voxel_unit` or `rho_probes` would produce an unbounded
  /// grid or a degenerate kernel, so these are checked before any stage runs.
  pub fn validate(&self) -> Result<()> {
    if !(self.voxel_unit.is_finite() && self.voxel_unit > 0.0) {
      return Err(invalid(format!(
        "voxel_unit must be positive, got {}",
        self.voxel_unit
      )));
    }
    if !(self.rho_probes.is_finite() && self.rho_probes > 0.0) {
      return Err(invalid(format!(
        "rho_probes must be positive, got {}",
        self.rho_probes
      )));
    }
    if self.samples_per_probe == 0 {
      return Err(invalid("samples_per_probe must be at least 1".to_string()));
    }
    if !(self.surface_inset >= 0.0 && self.surface_inset * 2.0 < self.voxel_unit) {
      return Err(invalid(format!(
        "surface_inset must be in [0, voxel_unit / 2), got {}",
        self.surface_inset
      )));
    }
    if !self.offset_scale.is_finite() {
      return Err(invalid("offset_scale must be finite".to_string()));
    }
    if let NeighborStep::Fixed(step) = self.neighbor_step {
      if !(step.is_finite() && step > 0.0) {
        return Err(invalid(format!(
          "fixed neighbor_step must be positive, got {}",
          step
        )));
      }
    }
    Ok(())
  }

  /// Parameters for the flood-fill seeder.
  pub fn seed_params(&self) -> SeedParams {
    SeedParams {
      neighbor_step: self.neighbor_step.resolve(self.voxel_unit),
      offset_scale: self.offset_scale,
    }
  }

  /// Parameters for the SH estimator.
  pub fn estimator_params(&self) -> EstimatorParams {
    EstimatorParams {
      samples_per_probe: self.samples_per_probe,
      sampling: self.sampling,
      seed: self.seed,
    }
  }
}

fn invalid(message: String) -> BakeError {
  BakeError::InvalidConfig(message)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
