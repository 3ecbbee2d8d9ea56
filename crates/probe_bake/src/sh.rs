//! Real spherical harmonics up to order 2 (9 coefficients per channel).
//!
//! Basis ordering follows `l² + l + m`:
//!
//! ```text
//! index  l  m   Y_lm(x, y, z)
//!   0    0  0   0.282095
//!   1    1 -1   0.488603 y
//!   2    1  0   0.488603 z
//!   3    1  1   0.488603 x
//!   4    2 -2   1.092548 xy
//!   5    2 -1   1.092548 yz
//!   6    2  0   0.315392 (3z² - 1)
//!   7    2  1   1.092548 xz
//!   8    2  2   0.546274 (x² - y²)
//! ```

use std::f32::consts::PI;

use glam::Vec3;

use crate::constants::{SH_CHANNELS, SH_COEFFICIENT_COUNT};
use crate::types::ShCoeffs;

const Y00: f32 = 0.282_095;
const Y1: f32 = 0.488_603;
const Y2_MIXED: f32 = 1.092_548;
const Y20: f32 = 0.315_392;
const Y22: f32 = 0.546_274;

/// Flat coefficient index for band `l`, order `m`.
#[inline]
pub const fn index(l: usize, m: i32) -> usize {
  ((l * l + l) as i32 + m) as usize
}

/// Evaluate all basis functions for a unit direction.
#[inline]
pub fn eval_basis(dir: Vec3) -> [f32; SH_COEFFICIENT_COUNT] {
  let Vec3 { x, y, z } = dir;
  [
    Y00,
    Y1 * y,
    Y1 * z,
    Y1 * x,
    Y2_MIXED * x * y,
    Y2_MIXED * y * z,
    Y20 * (3.0 * z * z - 1.0),
    Y2_MIXED * x * z,
    Y22 * (x * x - y * y),
  ]
}

/// Reconstruct the RGB signal in direction `dir`.
pub fn evaluate(coeffs: &ShCoeffs, dir: Vec3) -> Vec3 {
  let basis = eval_basis(dir);
  let channel = |c: usize| -> f32 {
    coeffs[c]
      .iter()
      .zip(basis.iter())
      .map(|(k, y)| k * y)
      .sum()
  };
  Vec3::new(channel(0), channel(1), channel(2))
}

/// Streaming Monte Carlo projection of an RGB signal on the sphere.
///
/// Assumes directions are drawn with uniform density `1 / 4π`.
#[derive(Clone, Debug, Default)]
pub struct ShAccumulator {
  sums: [[f32; SH_COEFFICIENT_COUNT]; SH_CHANNELS],
  count: u32,
}

impl ShAccumulator {
  pub fn new() -> Self {
    Self::default()
  }

  /// Add one sample of `value` seen in direction `dir`.
  #[inline]
  pub fn add_sample(&mut self, dir: Vec3, value: Vec3) {
    let basis = eval_basis(dir);
    for (channel, sums) in self.sums.iter_mut().enumerate() {
      let v = value[channel];
      for (sum, y) in sums.iter_mut().zip(basis.iter()) {
        *sum += v * y;
      }
    }
    self.count += 1;
  }

  pub fn sample_count(&self) -> u32 {
    self.count
  }

  /// Scale the sums by the sphere area over the sample count.
  ///
  /// Returns zero coefficients when nothing was added.
  pub fn finish(self) -> ShCoeffs {
    let mut coeffs = self.sums;
    if self.count == 0 {
      return [[0.0; SH_COEFFICIENT_COUNT]; SH_CHANNELS];
    }

    let weight = 4.0 * PI / self.count as f32;
    coeffs.iter_mut().flatten().for_each(|c| *c *= weight);
    coeffs
  }
}

/// Project `(direction, value)` samples onto the basis.
pub fn project_samples(samples: &[(Vec3, Vec3)]) -> ShCoeffs {
  let mut acc = ShAccumulator::new();
  for &(dir, value) in samples {
    acc.add_sample(dir, value);
  }
  acc.finish()
}

#[cfg(test)]
#[path = "sh_test.rs"]
mod sh_test;
