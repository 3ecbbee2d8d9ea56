//! Integrator selection.
//!
//! A renderer front end picks one [`Integrator`] at setup and calls
//! [`Integrator::render`] once. [`ProbeIntegrator`] runs the full bake;
//! [`VoxelDebugIntegrator`] stops after classification and dumps the grid.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;

use crate::config::BakeConfig;
use crate::error::{BakeError, Result};
use crate::oracle::{RadianceSource, SceneGeometry};
use crate::pipeline::{bake, voxelize_scene, write_outputs, BakeStats, VOXELS_FILE};
use crate::writer;

/// A scene that answers both geometry and radiance queries.
pub trait Scene: SceneGeometry + RadianceSource {}

impl<T: SceneGeometry + RadianceSource + ?Sized> Scene for T {}

/// What a render pass produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderReport {
  pub written: Vec<PathBuf>,
  pub stats: BakeStats,
}

/// Capability shared by every integrator.
pub trait Integrator: Send + Sync {
  /// Run the integrator and write its artifacts.
  fn render(&self) -> Result<RenderReport>;

  /// One-line description of the integrator and its parameters.
  fn describe(&self) -> String;
}

/// Which integrator to build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegratorKind {
  /// Full probe placement and SH bake.
  #[default]
  Probe,

  /// Voxelize and classify only.
  VoxelDebug,
}

/// Probe placement followed by SH estimation.
pub struct ProbeIntegrator {
  scene: Arc<dyn Scene>,
  config: BakeConfig,
  output_dir: PathBuf,
}

impl ProbeIntegrator {
  pub fn new(scene: Arc<dyn Scene>, config: BakeConfig, output_dir: impl Into<PathBuf>) -> Self {
    Self {
      scene,
      config,
      output_dir: output_dir.into(),
    }
  }

  pub fn config(&self) -> &BakeConfig {
    &self.config
  }
}

impl Integrator for ProbeIntegrator {
  fn render(&self) -> Result<RenderReport> {
    let scene = &*self.scene;
    let output = bake(scene, scene, &self.config)?;
    let written = write_outputs(&self.output_dir, &output, &self.config)?;

    Ok(RenderReport {
      written,
      stats: output.stats,
    })
  }

  fn describe(&self) -> String {
    format!(
      "[ ProbeIntegrator max_depth: {} voxel_unit: {} rho_probes: {} ]",
      self.config.max_depth, self.config.voxel_unit, self.config.rho_probes
    )
  }
}

/// Dumps the classified voxel grid without placing probes.
pub struct VoxelDebugIntegrator {
  scene: Arc<dyn Scene>,
  config: BakeConfig,
  output_dir: PathBuf,
}

impl VoxelDebugIntegrator {
  pub fn new(scene: Arc<dyn Scene>, config: BakeConfig, output_dir: impl Into<PathBuf>) -> Self {
    Self {
      scene,
      config,
      output_dir: output_dir.into(),
    }
  }
}

impl Integrator for VoxelDebugIntegrator {
  fn render(&self) -> Result<RenderReport> {
    let field = voxelize_scene(&*self.scene, &self.config)?;

    std::fs::create_dir_all(&self.output_dir)
      .map_err(|e| BakeError::io(&self.output_dir, e))?;
    let path = self.output_dir.join(VOXELS_FILE);
    let written = if writer::write_voxels(&path, &field.voxels)? {
      vec![path]
    } else {
      Vec::new()
    };

    Ok(RenderReport {
      written,
      stats: BakeStats {
        voxel_count: field.voxels.len(),
        solid_count: field.solid_count,
        voxelize_us: field.voxelize_us,
        classify_us: field.classify_us,
        total_us: field.voxelize_us + field.classify_us,
        ..Default::default()
      },
    })
  }

  fn describe(&self) -> String {
    format!("[ VoxelDebugIntegrator voxel_unit: {} ]", self.config.voxel_unit)
  }
}

/// Build the integrator named by `kind`.
///
/// The configuration is validated here so a bad setup fails before any
/// render is attempted.
pub fn create_integrator(
  kind: IntegratorKind,
  scene: Arc<dyn Scene>,
  config: BakeConfig,
  output_dir: impl Into<PathBuf>,
) -> Result<Box<dyn Integrator>> {
  config.validate()?;

  let integrator: Box<dyn Integrator> = match kind {
    IntegratorKind::Probe => Box::new(ProbeIntegrator::new(scene, config, output_dir)),
    IntegratorKind::VoxelDebug => Box::new(VoxelDebugIntegrator::new(scene, config, output_dir)),
  };

  tracing::debug!(integrator = %integrator.describe(), "integrator created");
  Ok(integrator)
}

#[cfg(test)]
#[path = "integrator_test.rs"]
mod integrator_test;
