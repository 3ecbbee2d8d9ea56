//! Stage 1: Voxelize
//!
//! Lays a regular grid of cubic voxels over the scene bounds. Ids follow the
//! X-outer, Y-middle, Z-inner loop order, which is the same flattening
//! [`GridGeometry::coord_to_index`] uses; neighbour lookups rely on this.

use glam::Vec3;

use crate::grid::GridGeometry;
use crate::types::{Aabb, Voxel};

/// Build every voxel of `grid`, unclassified.
pub fn build_voxels(grid: &GridGeometry) -> Vec<Voxel> {
  let [rx, ry, rz] = grid.resolution();
  let mut voxels = Vec::with_capacity(grid.voxel_count());

  let mut id = 0;
  for x in 0..rx {
    for y in 0..ry {
      for z in 0..rz {
        let min = grid.bounds.min + Vec3::new(x as f32, y as f32, z as f32) * grid.unit;
        voxels.push(Voxel::new(Aabb::from_min_size(min, grid.unit), id));
        id += 1;
      }
    }
  }

  voxels
}

#[cfg(test)]
#[path = "voxelize_test.rs"]
mod voxelize_test;
