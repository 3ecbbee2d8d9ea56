//! Core data types for probe placement and baking.

use glam::Vec3;

use crate::constants::{SH_CHANNELS, SH_COEFFICIENT_COUNT};

/// Per-channel SH coefficients (RGB × (order + 1)²).
pub type ShCoeffs = [[f32; SH_COEFFICIENT_COUNT]; SH_CHANNELS];

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
  pub min: Vec3,
  pub max: Vec3,
}

impl Aabb {
  /// Create AABB from min/max corners.
  pub fn new(min: Vec3, max: Vec3) -> Self {
    Self { min, max }
  }

  /// Create AABB with inverted extents (ready for encapsulation).
  pub fn empty() -> Self {
    Self {
      min: Vec3::splat(f32::INFINITY),
      max: Vec3::splat(f32::NEG_INFINITY),
    }
  }

  /// Create a cube from its minimum corner and edge length.
  pub fn from_min_size(min: Vec3, size: f32) -> Self {
    Self {
      min,
      max: min + Vec3::splat(size),
    }
  }

  /// Expand AABB to include another box.
  #[inline]
  pub fn encapsulate(&mut self, other: &Aabb) {
    self.min = self.min.min(other.min);
    self.max = self.max.max(other.max);
  }

  /// Check if AABB is valid (min <= max on all axes).
  pub fn is_valid(&self) -> bool {
    self.min.cmple(self.max).all()
  }

  /// Midpoint of the box.
  #[inline]
  pub fn center(&self) -> Vec3 {
    (self.min + self.max) * 0.5
  }

  /// Diagonal extent (max - min).
  #[inline]
  pub fn size(&self) -> Vec3 {
    self.max - self.min
  }

  /// Move every face inward by `delta`.
  #[inline]
  pub fn shrink(&self, delta: f32) -> Self {
    Self {
      min: self.min + Vec3::splat(delta),
      max: self.max - Vec3::splat(delta),
    }
  }

  /// Two boxes overlap if they share any interior or boundary points.
  #[inline]
  pub fn overlaps(&self, other: &Aabb) -> bool {
    self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
  }

  #[inline]
  pub fn contains_point(&self, point: Vec3) -> bool {
    point.cmpge(self.min).all() && point.cmple(self.max).all()
  }

  /// Slab test. Returns the entry parameter within `[ray.t_min, ray.t_max]`.
  ///
  /// A ray starting inside the box reports `ray.t_min`.
  pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
    let mut t0 = ray.t_min;
    let mut t1 = ray.t_max;

    for axis in 0..3 {
      let origin = ray.origin[axis];
      let dir = ray.direction[axis];

      if dir.abs() < f32::EPSILON {
        // Parallel to this slab pair
        if origin < self.min[axis] || origin > self.max[axis] {
          return None;
        }
        continue;
      }

      let inv = 1.0 / dir;
      let mut near = (self.min[axis] - origin) * inv;
      let mut far = (self.max[axis] - origin) * inv;
      if near > far {
        std::mem::swap(&mut near, &mut far);
      }

      t0 = t0.max(near);
      t1 = t1.min(far);
      if t0 > t1 {
        return None;
      }
    }

    Some(t0)
  }
}

impl Default for Aabb {
  fn default() -> Self {
    Self::empty()
  }
}

/// Cubic grid cell, classified solid or empty.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Voxel {
  /// World-space cell bounds.
  pub aabb: Aabb,

  /// True when scene geometry overlaps the (inset) cell.
  pub overlap: bool,

  /// Flattened grid id (`z + rz * y + rz * ry * x`).
  pub id: usize,
}

impl Voxel {
  pub fn new(aabb: Aabb, id: usize) -> Self {
    Self {
      aabb,
      overlap: false,
      id,
    }
  }

  #[inline]
  pub fn center(&self) -> Vec3 {
    self.aabb.center()
  }
}

/// Light probe: a position plus its baked SH radiance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Probe {
  pub position: Vec3,

  /// Sequential id assigned at seeding, never reused.
  pub id: usize,

  /// Reduction scratch value; stale outside a reduction pass.
  pub density: f32,

  /// SH coefficients per RGB channel. Zero until estimated.
  pub coeffs: ShCoeffs,
}

impl Probe {
  pub fn new(id: usize, position: Vec3) -> Self {
    Self {
      position,
      id,
      density: 0.0,
      coeffs: [[0.0; SH_COEFFICIENT_COUNT]; SH_CHANNELS],
    }
  }
}

/// Ray with a parametric validity interval.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
  pub origin: Vec3,
  pub direction: Vec3,
  pub t_min: f32,
  pub t_max: f32,
}

impl Ray {
  pub fn new(origin: Vec3, direction: Vec3) -> Self {
    Self {
      origin,
      direction,
      t_min: 0.0,
      t_max: f32::INFINITY,
    }
  }

  pub fn with_t_min(mut self, t_min: f32) -> Self {
    self.t_min = t_min;
    self
  }

  #[inline]
  pub fn at(&self, t: f32) -> Vec3 {
    self.origin + self.direction * t
  }
}

/// Closest intersection reported by the geometry oracle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
  pub geometry_id: usize,
  pub distance: f32,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
