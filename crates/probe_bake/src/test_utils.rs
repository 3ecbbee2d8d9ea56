//! Test utilities shared by the stage tests.
//!
//! Provides mock geometry oracles and fixture generators for testing each
//! stage in isolation.

use std::sync::atomic::{AtomicUsize, Ordering};

use glam::Vec3;

use crate::grid::GridGeometry;
use crate::oracle::{BoxScene, SceneGeometry};
use crate::types::{Aabb, Probe, Ray, RayHit, Voxel};
use crate::voxelize::build_voxels;

// =============================================================================
// Mock Geometry
// =============================================================================

/// Wraps an oracle and counts the queries it answers.
pub struct CountingGeometry<G> {
  pub inner: G,
  pub overlap_queries: AtomicUsize,
  pub ray_queries: AtomicUsize,
}

impl<G: SceneGeometry> CountingGeometry<G> {
  pub fn new(inner: G) -> Self {
    Self {
      inner,
      overlap_queries: AtomicUsize::new(0),
      ray_queries: AtomicUsize::new(0),
    }
  }

  pub fn overlap_count(&self) -> usize {
    self.overlap_queries.load(Ordering::Relaxed)
  }

  pub fn ray_count(&self) -> usize {
    self.ray_queries.load(Ordering::Relaxed)
  }
}

impl<G: SceneGeometry> SceneGeometry for CountingGeometry<G> {
  fn bounds(&self) -> Aabb {
    self.inner.bounds()
  }

  fn overlaps(&self, aabb: &Aabb) -> bool {
    self.overlap_queries.fetch_add(1, Ordering::Relaxed);
    self.inner.overlaps(aabb)
  }

  fn intersect(&self, ray: &Ray) -> Option<RayHit> {
    self.ray_queries.fetch_add(1, Ordering::Relaxed);
    self.inner.intersect(ray)
  }
}

/// Oracle that reports overlap everywhere and never hits anything.
pub struct SolidEverywhere(pub Aabb);

impl SceneGeometry for SolidEverywhere {
  fn bounds(&self) -> Aabb {
    self.0
  }

  fn overlaps(&self, _aabb: &Aabb) -> bool {
    true
  }

  fn intersect(&self, _ray: &Ray) -> Option<RayHit> {
    None
  }
}

// =============================================================================
// Fixtures
// =============================================================================

/// Cubic grid of `n` voxels per axis starting at the origin.
pub fn cube_grid(n: usize, unit: f32) -> GridGeometry {
  GridGeometry::new(
    Aabb::new(Vec3::ZERO, Vec3::splat(n as f32 * unit)),
    unit,
  )
}

/// Box scene whose solid boxes are exactly the given grid cells.
pub fn cell_scene(grid: &GridGeometry, solid: &[[usize; 3]]) -> BoxScene {
  let mut scene = BoxScene::new(Vec::new()).with_bounds(grid.bounds);
  for &[x, y, z] in solid {
    let min = grid.coord_to_world_min([x as i64, y as i64, z as i64]);
    scene.push(Aabb::from_min_size(min, grid.unit), Vec3::ONE);
  }
  scene
}

/// Voxels of `grid` with `overlap` set for the listed cells, no oracle
/// involved.
pub fn classified_voxels(grid: &GridGeometry, solid: &[[usize; 3]]) -> Vec<Voxel> {
  let mut voxels = build_voxels(grid);
  for &[x, y, z] in solid {
    voxels[grid.coord_to_index(x, y, z)].overlap = true;
  }
  voxels
}

/// Probes at the given positions with sequential ids.
pub fn probes_at(positions: &[Vec3]) -> Vec<Probe> {
  positions
    .iter()
    .enumerate()
    .map(|(id, &p)| Probe::new(id, p))
    .collect()
}

/// Probes on a regular lattice with `spacing` between neighbours.
pub fn probe_lattice(n: usize, spacing: f32) -> Vec<Probe> {
  let mut positions = Vec::with_capacity(n * n * n);
  for x in 0..n {
    for y in 0..n {
      for z in 0..n {
        positions.push(Vec3::new(x as f32, y as f32, z as f32) * spacing);
      }
    }
  }
  probes_at(&positions)
}
