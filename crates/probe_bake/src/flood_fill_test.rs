//! Tests for Stage 3: Flood Fill

use glam::Vec3;

use super::*;
use crate::classify::classify_voxels;
use crate::test_utils::*;
use crate::voxelize::build_voxels;

fn approx_eq(a: Vec3, b: Vec3) -> bool {
  (a - b).abs().max_element() < 1e-5
}

// =============================================================================
// Batch 1: Seeding
// =============================================================================

#[test]
fn test_fully_solid_scene_yields_no_probes() {
  let grid = cube_grid(3, 1.0);
  let mut voxels = build_voxels(&grid);
  voxels.iter_mut().for_each(|v| v.overlap = true);

  let probes = seed_probes(&voxels, &grid, &SeedParams::for_grid(&grid));
  assert!(probes.is_empty());
}

#[test]
fn test_fully_empty_scene_yields_no_probes() {
  let grid = cube_grid(3, 1.0);
  let voxels = build_voxels(&grid);

  let probes = seed_probes(&voxels, &grid, &SeedParams::for_grid(&grid));
  assert!(probes.is_empty());
}

#[test]
fn test_single_solid_voxel_seeds_its_six_face_neighbours() {
  let grid = cube_grid(3, 1.0);
  let voxels = classified_voxels(&grid, &[[1, 1, 1]]);

  let probes = seed_probes(&voxels, &grid, &SeedParams::for_grid(&grid));

  assert_eq!(probes.len(), 6);
  let center = Vec3::splat(1.5);
  for probe in &probes {
    // Each seed sits one voxel from the solid center, pushed 0.3 toward it
    let distance = probe.position.distance(center);
    assert!((distance - 0.7).abs() < 1e-5, "distance {}", distance);
  }
}

#[test]
fn test_probe_ids_follow_voxel_order() {
  let grid = cube_grid(3, 1.0);
  let voxels = classified_voxels(&grid, &[[1, 1, 1]]);

  let probes = seed_probes(&voxels, &grid, &SeedParams::for_grid(&grid));

  for (i, probe) in probes.iter().enumerate() {
    assert_eq!(probe.id, i);
  }
  // Lowest voxel id among the neighbours is (0, 1, 1), displaced toward +X
  assert!(approx_eq(probes[0].position, Vec3::new(0.8, 1.5, 1.5)));
  // Highest is (2, 1, 1), displaced toward -X
  assert!(approx_eq(probes[5].position, Vec3::new(2.2, 1.5, 1.5)));
}

#[test]
fn test_one_probe_per_voxel_with_multiple_solid_faces() {
  let grid = cube_grid(3, 1.0);
  let voxels = classified_voxels(&grid, &[[0, 1, 1], [1, 0, 1], [1, 1, 0]]);

  let probes = seed_probes(&voxels, &grid, &SeedParams::for_grid(&grid));

  let at_center: Vec<_> = probes
    .iter()
    .filter(|p| p.position.distance(Vec3::splat(1.5)) < 0.6)
    .collect();
  assert_eq!(at_center.len(), 1, "center voxel must seed exactly once");
  assert!(approx_eq(at_center[0].position, Vec3::splat(1.5) - Vec3::splat(0.3)));
}

#[test]
fn test_edge_voxel_ignores_out_of_grid_neighbours() {
  let grid = cube_grid(2, 1.0);
  let voxels = classified_voxels(&grid, &[[0, 0, 0]]);

  let probes = seed_probes(&voxels, &grid, &SeedParams::for_grid(&grid));

  // Only the three face neighbours inside the grid are seeded
  assert_eq!(probes.len(), 3);
}

#[test]
fn test_seeding_after_oracle_classification() {
  let grid = cube_grid(4, 0.5);
  let scene = cell_scene(&grid, &[[0, 0, 0], [1, 0, 0], [2, 0, 0], [3, 0, 0]]);
  let mut voxels = build_voxels(&grid);
  classify_voxels(&mut voxels, &scene, 0.1);

  let probes = seed_probes(&voxels, &grid, &SeedParams::for_grid(&grid));

  // A row along X at y=0,z=0 has 4 cells above (+Y) and 4 beside (+Z)
  assert_eq!(probes.len(), 8);
}

// =============================================================================
// Batch 2: Surface Offset
// =============================================================================

#[test]
fn test_opposite_solid_faces_cancel() {
  let grid = cube_grid(3, 1.0);
  let voxels = classified_voxels(&grid, &[[0, 1, 1], [2, 1, 1]]);
  let params = SeedParams::for_grid(&grid);

  let center_voxel = &voxels[grid.coord_to_index(1, 1, 1)];
  let moved = offset_probe_to_surface(
    center_voxel.center(),
    center_voxel.aabb.min,
    &voxels,
    &grid,
    &params,
  );

  assert_eq!(moved, center_voxel.center());
}

#[test]
fn test_single_solid_face_displaces_by_scale() {
  let grid = cube_grid(3, 1.0);
  let voxels = classified_voxels(&grid, &[[1, 2, 1]]);
  let params = SeedParams::for_grid(&grid);

  let voxel = &voxels[grid.coord_to_index(1, 1, 1)];
  let moved = offset_probe_to_surface(voxel.center(), voxel.aabb.min, &voxels, &grid, &params);

  assert!(approx_eq(moved - voxel.center(), Vec3::new(0.0, 0.3, 0.0)));
}

#[test]
fn test_offset_does_not_scale_with_voxel_unit() {
  let grid = cube_grid(3, 4.0);
  let voxels = classified_voxels(&grid, &[[1, 1, 0]]);
  let params = SeedParams::for_grid(&grid);

  let voxel = &voxels[grid.coord_to_index(1, 1, 1)];
  let moved = offset_probe_to_surface(voxel.center(), voxel.aabb.min, &voxels, &grid, &params);

  assert!(approx_eq(moved - voxel.center(), Vec3::new(0.0, 0.0, -0.3)));
}

#[test]
fn test_custom_offset_scale() {
  let grid = cube_grid(3, 1.0);
  let voxels = classified_voxels(&grid, &[[2, 1, 1], [1, 2, 1]]);
  let params = SeedParams {
    neighbor_step: 1.0,
    offset_scale: 0.5,
  };

  let voxel = &voxels[grid.coord_to_index(1, 1, 1)];
  let moved = offset_probe_to_surface(voxel.center(), voxel.aabb.min, &voxels, &grid, &params);

  assert!(approx_eq(moved - voxel.center(), Vec3::new(0.5, 0.5, 0.0)));
}

// =============================================================================
// Batch 3: Neighbour Step
// =============================================================================

#[test]
fn test_fixed_step_reaches_past_adjacent_cells() {
  let grid = cube_grid(4, 0.5);
  let voxels = classified_voxels(&grid, &[[0, 0, 0]]);

  let adjacent = seed_probes(&voxels, &grid, &SeedParams::for_grid(&grid));
  let literal = seed_probes(
    &voxels,
    &grid,
    &SeedParams {
      neighbor_step: 1.0,
      offset_scale: 0.3,
    },
  );

  assert_eq!(adjacent.len(), 3);
  assert_eq!(literal.len(), 3);

  // With a one-unit step on a half-unit grid the seeds skip a cell
  let near = Vec3::splat(0.25) + Vec3::new(0.5, 0.0, 0.0) - Vec3::new(0.3, 0.0, 0.0);
  let far = Vec3::splat(0.25) + Vec3::new(1.0, 0.0, 0.0) - Vec3::new(0.3, 0.0, 0.0);
  assert!(adjacent.iter().any(|p| approx_eq(p.position, near)));
  assert!(literal.iter().any(|p| approx_eq(p.position, far)));
}

#[test]
fn test_fixed_step_shorter_than_voxel_stays_in_grid_cells() {
  // Half-cell step: -X lands inside the previous cell, +X inside the voxel itself
  let grid = cube_grid(4, 2.0);
  let params = SeedParams {
    neighbor_step: 1.0,
    offset_scale: 0.3,
  };

  let below = grid.coordinate_to_index(grid.coord_to_world_min([1, 0, 0]) - Vec3::X);
  assert_eq!(below, grid.coord_to_index(0, 0, 0) as isize);
  let above = grid.coordinate_to_index(grid.coord_to_world_min([3, 0, 0]) + Vec3::X);
  assert_eq!(above, grid.coord_to_index(3, 0, 0) as isize);

  let voxels = classified_voxels(&grid, &[[0, 1, 1]]);
  let probes = seed_probes(&voxels, &grid, &params);

  // Only lookups toward lower cells leave the voxel, so the solid cell is
  // found from its +X, +Y and +Z neighbours
  let expected = [([0, 1, 2], Vec3::NEG_Z), ([0, 2, 1], Vec3::NEG_Y), ([1, 1, 1], Vec3::NEG_X)];
  assert_eq!(probes.len(), expected.len());
  for (probe, ([x, y, z], push)) in probes.iter().zip(expected) {
    let seeded = &voxels[grid.coord_to_index(x, y, z)];
    assert!(
      approx_eq(probe.position, seeded.center() + push * 0.3),
      "probe {} at {:?}",
      probe.id,
      probe.position
    );
  }
}
