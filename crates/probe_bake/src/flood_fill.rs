//! Stage 3: Flood Fill
//!
//! Seeds candidate probes in empty voxels that touch solid geometry. This is
//! a single-hop scan, not a connected-component walk:
//!
//! ```text
//!   ┌───┬───┬───┐
//!   │   │ ▓ │   │     ▓ = solid voxel
//!   ├───┼───┼───┤     • = probe seeded in the empty voxel, pushed toward
//!   │   │ •↑│   │         the solid face by offset_scale
//!   ├───┼───┼───┤
//!   │   │   │   │     One probe per empty voxel, however many faces are solid.
//!   └───┴───┴───┘
//! ```

use glam::Vec3;
use rayon::prelude::*;

use crate::constants::{FACE_DIRECTIONS, PROBE_OFFSET_SCALE};
use crate::grid::{GridGeometry, INVALID_INDEX};
use crate::types::{Probe, Voxel};

/// Parameters for seeding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeedParams {
  /// World-space displacement from a voxel's min corner to its neighbour's.
  pub neighbor_step: f32,

  /// Push applied per solid neighbour direction.
  pub offset_scale: f32,
}

impl SeedParams {
  /// Neighbour step of one voxel edge and the default offset scale.
  pub fn for_grid(grid: &GridGeometry) -> Self {
    Self {
      neighbor_step: grid.unit,
      offset_scale: PROBE_OFFSET_SCALE,
    }
  }
}

/// Is the neighbour of `voxel_min` in `direction` a solid voxel?
///
/// Out-of-grid neighbours count as empty.
#[inline]
fn is_solid_neighbor(
  voxels: &[Voxel],
  grid: &GridGeometry,
  voxel_min: Vec3,
  direction: Vec3,
  step: f32,
) -> bool {
  let index = grid.coordinate_to_index(voxel_min + direction * step);
  if index == INVALID_INDEX {
    return false;
  }

  let index = index as usize;
  index < voxels.len() && voxels[index].overlap
}

/// Push a probe toward the surfaces adjacent to its voxel.
///
/// Sums the unit direction of every solid face neighbour, so opposing solid
/// faces cancel, and returns `probe + offset_scale * sum`.
pub fn offset_probe_to_surface(
  probe: Vec3,
  voxel_min: Vec3,
  voxels: &[Voxel],
  grid: &GridGeometry,
  params: &SeedParams,
) -> Vec3 {
  let direction_sum = FACE_DIRECTIONS
    .iter()
    .filter(|&&dir| is_solid_neighbor(voxels, grid, voxel_min, dir, params.neighbor_step))
    .fold(Vec3::ZERO, |acc, &dir| acc + dir);

  probe + direction_sum * params.offset_scale
}

/// Candidate probe position for one voxel, if it is an empty voxel touching
/// a solid one.
fn seed_position(
  voxel: &Voxel,
  voxels: &[Voxel],
  grid: &GridGeometry,
  params: &SeedParams,
) -> Option<Vec3> {
  if voxel.overlap {
    return None;
  }

  let voxel_min = voxel.aabb.min;
  let borders_surface = FACE_DIRECTIONS
    .iter()
    .any(|&dir| is_solid_neighbor(voxels, grid, voxel_min, dir, params.neighbor_step));

  borders_surface
    .then(|| offset_probe_to_surface(voxel.center(), voxel_min, voxels, grid, params))
}

/// Seed candidate probes from fully classified voxels.
///
/// Probe ids are sequential in voxel-id order.
pub fn seed_probes(voxels: &[Voxel], grid: &GridGeometry, params: &SeedParams) -> Vec<Probe> {
  if voxels.is_empty() {
    return Vec::new();
  }

  // Ordered collect keeps voxel order, so ids do not depend on scheduling
  let positions: Vec<Vec3> = voxels
    .par_iter()
    .filter_map(|voxel| seed_position(voxel, voxels, grid, params))
    .collect();

  positions
    .into_iter()
    .enumerate()
    .map(|(id, position)| Probe::new(id, position))
    .collect()
}

#[cfg(test)]
#[path = "flood_fill_test.rs"]
mod flood_fill_test;
