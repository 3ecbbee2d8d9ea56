//! Stage 5: Estimate
//!
//! Projects incident radiance at each surviving probe onto order-2 SH.
//!
//! ```text
//!   probe ──► N directions ──► trace ──► radiance ──► Σ L·Y_lm · 4π/N
//! ```
//!
//! Probes are independent; each one owns its sampler, so the coefficients
//! are the same whatever the rayon schedule.

use glam::Vec3;
use rayon::prelude::*;

use crate::config::SamplingPattern;
use crate::constants::RAY_EPSILON;
use crate::oracle::{RadianceSource, SceneGeometry};
use crate::sampler::{DirectionSampler, ProbeSampler};
use crate::sh::ShAccumulator;
use crate::types::{Probe, Ray, ShCoeffs};

/// Parameters for SH estimation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EstimatorParams {
  pub samples_per_probe: u32,
  pub sampling: SamplingPattern,
  pub seed: u64,
}

/// The directions probe `probe_id` will trace.
pub fn directions_for_probe(params: &EstimatorParams, probe_id: usize) -> Vec<Vec3> {
  let mut sampler = ProbeSampler::for_probe(
    params.sampling,
    params.seed,
    probe_id,
    params.samples_per_probe,
  );
  (0..params.samples_per_probe)
    .map(|_| sampler.next_direction())
    .collect()
}

/// Incident radiance along one direction from `origin`.
#[inline]
pub fn trace_radiance<G, R>(origin: Vec3, direction: Vec3, geometry: &G, radiance: &R) -> Vec3
where
  G: SceneGeometry + ?Sized,
  R: RadianceSource + ?Sized,
{
  let ray = Ray::new(origin, direction).with_t_min(RAY_EPSILON);
  let hit = geometry.intersect(&ray);
  radiance.radiance(&ray, hit.as_ref())
}

/// SH coefficients for a single probe.
pub fn estimate_probe<G, R>(
  probe: &Probe,
  geometry: &G,
  radiance: &R,
  params: &EstimatorParams,
) -> ShCoeffs
where
  G: SceneGeometry + ?Sized,
  R: RadianceSource + ?Sized,
{
  let mut sampler = ProbeSampler::for_probe(
    params.sampling,
    params.seed,
    probe.id,
    params.samples_per_probe,
  );

  let mut acc = ShAccumulator::new();
  for _ in 0..params.samples_per_probe {
    let dir = sampler.next_direction();
    acc.add_sample(dir, trace_radiance(probe.position, dir, geometry, radiance));
  }
  acc.finish()
}

/// Fill `coeffs` for every probe in parallel.
pub fn estimate_probes<G, R>(
  probes: &mut [Probe],
  geometry: &G,
  radiance: &R,
  params: &EstimatorParams,
) where
  G: SceneGeometry + ?Sized,
  R: RadianceSource + ?Sized,
{
  probes.par_iter_mut().for_each(|probe| {
    probe.coeffs = estimate_probe(probe, geometry, radiance, params);
  });
}

#[cfg(test)]
#[path = "estimator_test.rs"]
mod estimator_test;
