//! probe_bake - Surface-aware light probe placement and SH baking
//!
//! Places irradiance probes near scene surfaces and bakes order-2 spherical
//! harmonics for each one. The scene is only seen through two oracles: a
//! geometry oracle answering box-overlap and ray queries, and a radiance
//! source giving the light carried back along a ray.
//!
//! # Features
//!
//! - **Voxel grid**: regular cubic grid over the scene bounds, classified
//!   solid or empty with one inset overlap query per voxel
//! - **Flood-fill seeding**: one candidate probe per empty voxel that touches
//!   a solid face, pushed toward that surface
//! - **Density reduction**: removes the most crowded probe until the target
//!   count for the probe spacing is reached
//! - **SH estimation**: Monte Carlo projection of incident radiance, seeded
//!   per probe so results do not depend on the thread schedule
//! - **Text output**: voxel, probe, coefficient and sample-direction dumps
//!
//! # Example
//!
//! ```ignore
//! use probe_bake::{bake, write_outputs, Aabb, BakeConfig, BoxScene};
//! use glam::Vec3;
//!
//! let mut scene = BoxScene::new(Vec::new());
//! scene.push(Aabb::new(Vec3::ZERO, Vec3::new(20.0, 1.0, 20.0)), Vec3::splat(0.5));
//!
//! let config = BakeConfig::default().with_rho_probes(5.0);
//! let output = bake(&scene, &scene, &config)?;
//! write_outputs("bake_out", &output, &config)?;
//!
//! println!("{} probes from {} candidates",
//!     output.stats.probe_count, output.stats.candidate_count);
//! ```

pub mod constants;
pub mod error;
pub mod types;

// Re-export commonly used items
pub use error::{BakeError, Result};
pub use types::{Aabb, Probe, Ray, RayHit, ShCoeffs, Voxel};

// Grid geometry and stages, in pipeline order
pub mod grid;
pub mod voxelize;
pub mod classify;
pub mod flood_fill;
pub mod reduce;
pub mod estimator;
pub mod writer;

pub use grid::{GridGeometry, INVALID_INDEX};
pub use reduce::ReductionReport;

// SH basis and direction sampling
pub mod sampler;
pub mod sh;

// Scene oracles
pub mod oracle;
pub use oracle::{BoxScene, ConstantRadiance, RadianceSource, SceneBox, SceneGeometry, SkyRadiance};

// Configuration
pub mod config;
pub use config::{BakeConfig, NeighborStep, SamplingPattern};

// Orchestration
pub mod integrator;
pub mod pipeline;
pub use integrator::{create_integrator, Integrator, IntegratorKind, RenderReport, Scene};
pub use pipeline::{bake, write_outputs, BakeOutput, BakeStats};

// Test utilities
#[cfg(test)]
pub mod test_utils;
