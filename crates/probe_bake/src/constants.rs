//! Named constants shared by the bake stages.
//!
//! # Grid Layout
//!
//! ```text
//! Voxel memory layout (row-major, Z innermost):
//!
//! Address:  0       1       ...  rz-1      rz      ...
//! Content: [0,0,0] [0,0,1]  ... [0,0,rz-1][0,1,0]  ...
//!          └────────── Z ──────────────┘
//!
//! id = z + rz * y + rz * ry * x
//! ```
//!
//! # Face Directions
//!
//! ```text
//!         +Y
//!          │
//!          │
//!          └───────── +X
//!         /
//!        /
//!       +Z
//!
//! 0 = -X   1 = +X
//! 2 = -Y   3 = +Y
//! 4 = -Z   5 = +Z
//! ```

use glam::Vec3;

/// Spherical harmonic order. Order 0 has a single coefficient.
pub const SH_ORDER: usize = 2;

/// Coefficients per color channel: (order + 1)².
pub const SH_COEFFICIENT_COUNT: usize = (SH_ORDER + 1) * (SH_ORDER + 1);

/// Color channels stored per probe (RGB).
pub const SH_CHANNELS: usize = 3;

/// Inset applied to every face of a voxel before the overlap query.
///
/// Geometry lying exactly on a shared face must not mark both voxels solid.
pub const SURFACE_INSET: f32 = 0.1;

/// Scale of the push applied to a seeded probe per solid neighbour.
pub const PROBE_OFFSET_SCALE: f32 = 0.3;

/// Default number of sample directions drawn per probe.
pub const DEFAULT_SAMPLES_PER_PROBE: u32 = 256;

/// Default probe spacing in world units.
pub const DEFAULT_RHO_PROBES: f32 = 10.0;

/// Default voxel edge length in world units.
pub const DEFAULT_VOXEL_UNIT: f32 = 1.0;

/// Default forwarded path depth.
pub const DEFAULT_MAX_DEPTH: u32 = 5;

/// Minimum ray parameter used when tracing from a probe.
pub const RAY_EPSILON: f32 = 1e-4;

/// Six face-adjacent unit directions, in -X, +X, -Y, +Y, -Z, +Z order.
pub const FACE_DIRECTIONS: [Vec3; 6] = [
  Vec3::NEG_X,
  Vec3::X,
  Vec3::NEG_Y,
  Vec3::Y,
  Vec3::NEG_Z,
  Vec3::Z,
];

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
