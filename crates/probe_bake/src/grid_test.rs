use glam::Vec3;

use super::*;

fn grid(size: Vec3, unit: f32) -> GridGeometry {
  GridGeometry::new(Aabb::new(Vec3::new(-3.0, 1.0, 2.5), Vec3::new(-3.0, 1.0, 2.5) + size), unit)
}

#[test]
fn test_resolution_rounds_per_axis() {
  let g = grid(Vec3::new(4.0, 2.4, 2.6), 1.0);
  assert_eq!(g.resolution(), [4, 2, 3]);
  assert_eq!(g.voxel_count(), 24);
}

#[test]
fn test_resolution_with_fractional_unit() {
  let g = grid(Vec3::splat(3.0), 0.5);
  assert_eq!(g.resolution(), [6, 6, 6]);
}

#[test]
fn test_degenerate_axis_has_no_cells() {
  let g = grid(Vec3::new(4.0, 0.0, 4.0), 1.0);
  assert_eq!(g.resolution()[1], 0);
  assert_eq!(g.voxel_count(), 0);
}

#[test]
fn test_index_formula_z_innermost() {
  let g = grid(Vec3::new(2.0, 3.0, 4.0), 1.0);
  assert_eq!(g.coord_to_index(0, 0, 1), 1);
  assert_eq!(g.coord_to_index(0, 1, 0), 4);
  assert_eq!(g.coord_to_index(1, 0, 0), 12);
}

#[test]
fn test_coord_index_bijection() {
  let g = grid(Vec3::new(3.0, 4.0, 5.0), 0.7);
  let [rx, ry, rz] = g.resolution();
  let mut seen = vec![false; g.voxel_count()];

  for x in 0..rx {
    for y in 0..ry {
      for z in 0..rz {
        let id = g.coord_to_index(x, y, z);
        assert_eq!(g.index_to_coord(id), [x, y, z]);

        let world_min = g.coord_to_world_min([x as i64, y as i64, z as i64]);
        assert_eq!(
          g.coordinate_to_index(world_min),
          id as isize,
          "world corner of ({}, {}, {}) did not map back",
          x,
          y,
          z
        );

        assert!(!seen[id], "id {} assigned twice", id);
        seen[id] = true;
      }
    }
  }

  assert!(seen.iter().all(|&s| s));
}

#[test]
fn test_negative_coordinate_is_sentinel() {
  let g = grid(Vec3::splat(4.0), 1.0);
  for coord in [[-1, 0, 0], [0, -1, 0], [0, 0, -1], [-3, -3, -3]] {
    assert_eq!(
      g.coordinate_to_index(g.coord_to_world_min(coord)),
      INVALID_INDEX,
      "{:?}",
      coord
    );
  }
}

#[test]
fn test_coordinate_at_resolution_is_sentinel() {
  let g = grid(Vec3::new(4.0, 3.0, 2.0), 1.0);
  for coord in [[4, 0, 0], [0, 3, 0], [0, 0, 2], [9, 9, 9]] {
    assert_eq!(
      g.coordinate_to_index(g.coord_to_world_min(coord)),
      INVALID_INDEX,
      "{:?}",
      coord
    );
  }

  // Last in-bounds cell is still valid
  let last = g.coordinate_to_index(g.coord_to_world_min([3, 2, 1]));
  assert_eq!(last, (g.voxel_count() - 1) as isize);
}

#[test]
fn test_small_float_error_snaps_to_lattice() {
  let g = grid(Vec3::splat(10.0), 0.1);
  let corner = g.coord_to_world_min([7, 3, 9]) + Vec3::splat(1e-5);
  assert_eq!(g.coordinate_to_index(corner), g.coord_to_index(7, 3, 9) as isize);
}

#[test]
fn test_interior_points_map_to_containing_cell() {
  let g = grid(Vec3::splat(4.0), 1.0);
  let min = g.bounds.min;

  assert_eq!(g.coordinate_to_index(min + Vec3::new(0.6, 0.0, 0.0)), 0);
  assert_eq!(
    g.coordinate_to_index(min + Vec3::new(3.6, 0.0, 0.0)),
    g.coord_to_index(3, 0, 0) as isize
  );
  assert_eq!(
    g.coordinate_to_index(min + Vec3::new(1.99, 2.5, 3.9)),
    g.coord_to_index(1, 2, 3) as isize
  );
}

#[test]
fn test_points_past_the_far_face_are_sentinel() {
  let g = grid(Vec3::splat(4.0), 1.0);
  let min = g.bounds.min;

  assert_eq!(g.coordinate_to_index(min + Vec3::new(4.0, 0.5, 0.5)), INVALID_INDEX);
  assert_eq!(g.coordinate_to_index(min + Vec3::new(0.5, -0.4, 0.5)), INVALID_INDEX);
}

#[test]
fn test_corner_just_below_lattice_snaps_up() {
  let g = grid(Vec3::splat(10.0), 0.1);
  let corner = g.coord_to_world_min([7, 3, 9]) - Vec3::splat(1e-5);
  assert_eq!(g.coordinate_to_index(corner), g.coord_to_index(7, 3, 9) as isize);
}
