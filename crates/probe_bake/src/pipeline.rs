//! Bake pipeline
//!
//! Runs the stages in order over one scene:
//!
//! ```text
//! ┌──────────┐   ┌──────────┐   ┌────────────┐   ┌────────┐   ┌──────────┐   ┌───────┐
//! │ Voxelize ├──►│ Classify ├──►│ Flood fill ├──►│ Reduce ├──►│ Estimate ├──►│ Write │
//! └──────────┘   └──────────┘   └────────────┘   └────────┘   └──────────┘   └───────┘
//!      │              │               │               │             │
//!   Vec<Voxel>   overlap set     Vec<Probe>      Vec<Probe>    coeffs set
//!                                (candidates)    (≤ target)
//! ```
//!
//! Each parallel stage returns only once every element is done, so the next
//! stage always sees complete output. Writing is kept separate
//! ([`write_outputs`]) so a bake can be inspected without touching disk.

use std::fs;
use std::path::{Path, PathBuf};

use web_time::Instant;

use crate::classify::classify_voxels;
use crate::config::BakeConfig;
use crate::error::{BakeError, Result};
use crate::estimator::{directions_for_probe, estimate_probes};
use crate::flood_fill::seed_probes;
use crate::grid::GridGeometry;
use crate::oracle::{RadianceSource, SceneGeometry};
use crate::reduce::{reduce_probes, target_probe_count, ReductionReport};
use crate::types::{Probe, Voxel};
use crate::voxelize::build_voxels;
use crate::writer;

pub const VOXELS_FILE: &str = "voxels.txt";
pub const PROBES_FILE: &str = "probes.txt";
pub const SAMPLE_DIRS_FILE: &str = "sample_dirs.txt";
pub const PROBE_SH_FILE: &str = "probe_sh.txt";

/// Counts and timings from one bake.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BakeStats {
  /// Voxels in the grid.
  pub voxel_count: usize,
  /// Voxels the oracle reported as overlapping geometry.
  pub solid_count: usize,
  /// Probes seeded by flood fill.
  pub candidate_count: usize,
  /// Probe count the reducer aimed for.
  pub target_count: usize,
  /// Probes left after reduction.
  pub probe_count: usize,

  pub voxelize_us: u64,
  pub classify_us: u64,
  pub seed_us: u64,
  pub reduce_us: u64,
  pub estimate_us: u64,
  /// Wall time of the whole bake in microseconds.
  pub total_us: u64,
}

/// Everything a bake produces.
#[derive(Debug, Clone)]
pub struct BakeOutput {
  pub grid: GridGeometry,
  pub voxels: Vec<Voxel>,
  pub probes: Vec<Probe>,
  pub reduction: ReductionReport,
  pub stats: BakeStats,
}

/// Classified voxel grid, the input shared by every later stage.
#[derive(Debug, Clone)]
pub struct VoxelField {
  pub grid: GridGeometry,
  pub voxels: Vec<Voxel>,
  pub solid_count: usize,
  pub voxelize_us: u64,
  pub classify_us: u64,
}

#[inline]
fn elapsed_us(start: Instant) -> u64 {
  start.elapsed().as_micros() as u64
}

/// Stages 1 and 2: lay the grid over the scene bounds and classify it.
pub fn voxelize_scene<G>(geometry: &G, config: &BakeConfig) -> Result<VoxelField>
where
  G: SceneGeometry + ?Sized,
{
  config.validate()?;

  let grid = GridGeometry::new(geometry.bounds(), config.voxel_unit);

  let start = Instant::now();
  let mut voxels = {
    let _span = tracing::info_span!("voxelize").entered();
    build_voxels(&grid)
  };
  let voxelize_us = elapsed_us(start);

  let start = Instant::now();
  let solid_count = {
    let _span = tracing::info_span!("classify", voxels = voxels.len()).entered();
    classify_voxels(&mut voxels, geometry, config.surface_inset)
  };
  let classify_us = elapsed_us(start);

  tracing::debug!(
    resolution = ?grid.resolution(),
    voxels = voxels.len(),
    solid = solid_count,
    "voxel grid classified"
  );

  Ok(VoxelField {
    grid,
    voxels,
    solid_count,
    voxelize_us,
    classify_us,
  })
}

/// Run every stage except writing.
///
/// Fails only on an invalid `config`. An empty scene yields empty voxel and
/// probe lists.
#[tracing::instrument(skip_all, name = "probe_bake::bake")]
pub fn bake<G, R>(geometry: &G, radiance: &R, config: &BakeConfig) -> Result<BakeOutput>
where
  G: SceneGeometry + ?Sized,
  R: RadianceSource + ?Sized,
{
  let total = Instant::now();

  let VoxelField {
    grid,
    voxels,
    solid_count,
    voxelize_us,
    classify_us,
  } = voxelize_scene(geometry, config)?;

  let start = Instant::now();
  let mut probes = {
    let _span = tracing::info_span!("flood_fill").entered();
    seed_probes(&voxels, &grid, &config.seed_params())
  };
  let seed_us = elapsed_us(start);
  let candidate_count = probes.len();

  let target_count = target_probe_count(&grid.bounds, config.rho_probes);
  let start = Instant::now();
  let reduction = {
    let _span = tracing::info_span!("reduce", candidates = candidate_count, target = target_count)
      .entered();
    reduce_probes(&mut probes, target_count, config.rho_probes)
  };
  let reduce_us = elapsed_us(start);

  let start = Instant::now();
  {
    let _span = tracing::info_span!("estimate", probes = probes.len()).entered();
    estimate_probes(&mut probes, geometry, radiance, &config.estimator_params());
  }
  let estimate_us = elapsed_us(start);

  let stats = BakeStats {
    voxel_count: voxels.len(),
    solid_count,
    candidate_count,
    target_count,
    probe_count: probes.len(),
    voxelize_us,
    classify_us,
    seed_us,
    reduce_us,
    estimate_us,
    total_us: elapsed_us(total),
  };

  tracing::info!(
    voxels = stats.voxel_count,
    solid = stats.solid_count,
    candidates = stats.candidate_count,
    target = stats.target_count,
    probes = stats.probe_count,
    total_us = stats.total_us,
    "bake complete"
  );

  Ok(BakeOutput {
    grid,
    voxels,
    probes,
    reduction,
    stats,
  })
}

/// Create `dir` if needed and write every non-empty artifact into it.
///
/// Returns the paths that were written.
pub fn write_outputs(
  dir: impl AsRef<Path>,
  output: &BakeOutput,
  config: &BakeConfig,
) -> Result<Vec<PathBuf>> {
  let dir = dir.as_ref();
  fs::create_dir_all(dir).map_err(|e| BakeError::io(dir, e))?;

  let mut written = Vec::new();
  let mut record = |path: PathBuf, wrote: bool| {
    if wrote {
      written.push(path);
    }
  };

  let path = dir.join(VOXELS_FILE);
  record(path.clone(), writer::write_voxels(&path, &output.voxels)?);

  let path = dir.join(PROBES_FILE);
  record(path.clone(), writer::write_probes(&path, &output.probes)?);

  let path = dir.join(PROBE_SH_FILE);
  record(path.clone(), writer::write_probe_coefficients(&path, &output.probes)?);

  if config.write_sample_dirs {
    if let Some(first) = output.probes.first() {
      let directions = directions_for_probe(&config.estimator_params(), first.id);
      let path = dir.join(SAMPLE_DIRS_FILE);
      record(path.clone(), writer::write_sample_directions(&path, &directions)?);
    }
  }

  tracing::info!(dir = %dir.display(), files = written.len(), "outputs written");
  Ok(written)
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod pipeline_test;
