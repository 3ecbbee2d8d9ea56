//! Stage 2: Classify
//!
//! Marks each voxel solid or empty with one overlap query per voxel. The
//! query box is inset on every face so geometry lying exactly on a shared
//! face does not mark both neighbours solid.

use rayon::prelude::*;

use crate::oracle::SceneGeometry;
use crate::types::Voxel;

/// Classify a single voxel.
#[inline]
pub fn classify_voxel<G: SceneGeometry + ?Sized>(voxel: &mut Voxel, geometry: &G, inset: f32) {
  voxel.overlap = geometry.overlaps(&voxel.aabb.shrink(inset));
}

/// Classify all voxels in parallel. Returns the number of solid voxels.
///
/// Each worker writes only the voxel it was handed.
pub fn classify_voxels<G: SceneGeometry + ?Sized>(
  voxels: &mut [Voxel],
  geometry: &G,
  inset: f32,
) -> usize {
  if voxels.is_empty() {
    return 0;
  }

  voxels
    .par_iter_mut()
    .map(|voxel| {
      classify_voxel(voxel, geometry, inset);
      voxel.overlap as usize
    })
    .sum()
}

#[cfg(test)]
#[path = "classify_test.rs"]
mod classify_test;
