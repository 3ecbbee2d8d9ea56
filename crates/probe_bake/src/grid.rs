//! GridGeometry - scene bounds to voxel grid coordinate mapping.
//!
//! ```text
//! resolution[axis] = round(bounds.size()[axis] / unit)
//! id               = z + rz * y + rz * ry * x
//! cell(p)          = floor((p - bounds.min) / unit)
//! ```
//!
//! Resolution rounds instead of taking the ceiling, so a trailing partial row
//! shorter than half a unit is dropped rather than padded.

use glam::Vec3;

use crate::types::Aabb;

/// Returned by [`GridGeometry::coordinate_to_index`] for out-of-grid points.
pub const INVALID_INDEX: isize = -1;

/// Fraction of a cell a point may fall short of a corner and still count as
/// on it.
const LATTICE_EPSILON: f32 = 1e-3;

/// Regular cubic grid laid over the scene bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridGeometry {
  /// Scene bounds the grid starts from.
  pub bounds: Aabb,

  /// Voxel edge length in world units.
  pub unit: f32,

  resolution: [usize; 3],
}

impl GridGeometry {
  /// Build the grid for `bounds` with cubic voxels of edge `unit`.
  ///
  /// `unit` must be positive; configuration validation enforces this.
  pub fn new(bounds: Aabb, unit: f32) -> Self {
    debug_assert!(unit > 0.0, "voxel unit must be positive");

    let diagonal = bounds.size() / unit;
    let resolution = [
      axis_resolution(diagonal.x),
      axis_resolution(diagonal.y),
      axis_resolution(diagonal.z),
    ];

    Self {
      bounds,
      unit,
      resolution,
    }
  }

  /// Voxel count per axis.
  #[inline]
  pub fn resolution(&self) -> [usize; 3] {
    self.resolution
  }

  /// Total number of voxels (rx * ry * rz).
  #[inline]
  pub fn voxel_count(&self) -> usize {
    self.resolution.iter().product()
  }

  /// Flatten an in-bounds grid coordinate.
  #[inline]
  pub fn coord_to_index(&self, x: usize, y: usize, z: usize) -> usize {
    let [_, ry, rz] = self.resolution;
    z + rz * y + rz * ry * x
  }

  /// Inverse of [`Self::coord_to_index`].
  #[inline]
  pub fn index_to_coord(&self, id: usize) -> [usize; 3] {
    let [_, ry, rz] = self.resolution;
    [id / (rz * ry), (id / rz) % ry, id % rz]
  }

  /// World-space minimum corner of a (possibly out-of-grid) cell.
  #[inline]
  pub fn coord_to_world_min(&self, coord: [i64; 3]) -> Vec3 {
    self.bounds.min + Vec3::new(coord[0] as f32, coord[1] as f32, coord[2] as f32) * self.unit
  }

  /// Map a world-space point to the id of the cell containing it.
  ///
  /// Points on a shared face belong to the cell above. Returns
  /// [`INVALID_INDEX`] when the point lies outside the grid on any axis.
  /// Callers must check before indexing the voxel array.
  pub fn coordinate_to_index(&self, world: Vec3) -> isize {
    // Corners computed in float can land just below the lattice
    let local = ((world - self.bounds.min) / self.unit + Vec3::splat(LATTICE_EPSILON)).floor();

    let mut coord = [0usize; 3];
    for axis in 0..3 {
      let value = local[axis];
      if !value.is_finite() || value < 0.0 || value >= self.resolution[axis] as f32 {
        return INVALID_INDEX;
      }
      coord[axis] = value as usize;
    }

    self.coord_to_index(coord[0], coord[1], coord[2]) as isize
  }
}

#[inline]
fn axis_resolution(cells: f32) -> usize {
  if cells.is_finite() && cells > 0.0 {
    cells.round() as usize
  } else {
    0
  }
}

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;
