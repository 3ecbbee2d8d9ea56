//! Unit-sphere direction samplers for SH estimation.
//!
//! Every probe gets its own sampler seeded from the bake seed and the probe
//! id, so results do not depend on which rayon worker handles the probe.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::SamplingPattern;

/// Source of unit directions.
pub trait DirectionSampler {
  fn next_direction(&mut self) -> Vec3;
}

/// Independent directions, uniform over the sphere.
pub struct UniformSphereSampler {
  rng: StdRng,
}

impl UniformSphereSampler {
  pub fn seeded(seed: u64) -> Self {
    Self {
      rng: StdRng::seed_from_u64(seed),
    }
  }
}

impl DirectionSampler for UniformSphereSampler {
  fn next_direction(&mut self) -> Vec3 {
    let u1: f32 = self.rng.random();
    let u2: f32 = self.rng.random();
    uniform_sphere(u1, u2)
  }
}

/// Map the unit square onto the sphere with uniform density.
#[inline]
pub fn uniform_sphere(u1: f32, u2: f32) -> Vec3 {
  let z = 1.0 - 2.0 * u1;
  let r = (1.0 - z * z).max(0.0).sqrt();
  let phi = TAU * u2;
  Vec3::new(r * phi.cos(), r * phi.sin(), z)
}

/// Fibonacci spiral over `count` points; wraps around after `count` draws.
pub struct FibonacciSampler {
  count: u32,
  next: u32,
}

impl FibonacciSampler {
  pub fn new(count: u32) -> Self {
    Self {
      count: count.max(1),
      next: 0,
    }
  }

  /// The `i`-th of `count` spiral points.
  pub fn point(i: u32, count: u32) -> Vec3 {
    let golden_ratio = (1.0 + 5.0f32.sqrt()) / 2.0;
    let theta = TAU * i as f32 / golden_ratio;
    let cos_phi = 1.0 - 2.0 * (i as f32 + 0.5) / count as f32;
    let sin_phi = (1.0 - cos_phi * cos_phi).max(0.0).sqrt();
    Vec3::new(sin_phi * theta.cos(), sin_phi * theta.sin(), cos_phi)
  }
}

impl DirectionSampler for FibonacciSampler {
  fn next_direction(&mut self) -> Vec3 {
    let dir = Self::point(self.next, self.count);
    self.next = (self.next + 1) % self.count;
    dir
  }
}

/// Sampler selected by [`SamplingPattern`].
pub enum ProbeSampler {
  Random(UniformSphereSampler),
  Fibonacci(FibonacciSampler),
}

impl ProbeSampler {
  /// Sampler for one probe.
  ///
  /// `count` is the number of directions the caller will draw.
  pub fn for_probe(pattern: SamplingPattern, seed: u64, probe_id: usize, count: u32) -> Self {
    match pattern {
      SamplingPattern::Random => {
        ProbeSampler::Random(UniformSphereSampler::seeded(probe_seed(seed, probe_id)))
      }
      SamplingPattern::Fibonacci => ProbeSampler::Fibonacci(FibonacciSampler::new(count)),
    }
  }
}

impl DirectionSampler for ProbeSampler {
  fn next_direction(&mut self) -> Vec3 {
    match self {
      ProbeSampler::Random(s) => s.next_direction(),
      ProbeSampler::Fibonacci(s) => s.next_direction(),
    }
  }
}

/// Mix the bake seed with a probe id (splitmix64 finalizer).
#[inline]
pub fn probe_seed(seed: u64, probe_id: usize) -> u64 {
  let mut z = seed ^ (probe_id as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
  z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
  z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
  z ^ (z >> 31)
}

#[cfg(test)]
#[path = "sampler_test.rs"]
mod sampler_test;
