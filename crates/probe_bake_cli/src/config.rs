//! Configuration parsing for probe baking.

use anyhow::{Context, Result};
use glam::Vec3;
use probe_bake::{Aabb, BakeConfig, BoxScene, IntegratorKind, SkyRadiance};
use serde::Deserialize;
use std::path::Path;

/// Root configuration for a probe bake.
#[derive(Debug, Deserialize)]
pub struct Config {
	/// Output directory relative to the config file.
	#[serde(default = "default_output_dir")]
	pub output_dir: String,
	/// Integrator selection.
	#[serde(default)]
	pub integrator: IntegratorConfig,
	/// Placement and estimation parameters.
	#[serde(default)]
	pub bake: BakeConfig,
	/// Scene description.
	pub scene: SceneConfig,
}

/// `[integrator]` table.
#[derive(Debug, Default, Deserialize)]
pub struct IntegratorConfig {
	#[serde(default)]
	pub kind: IntegratorKind,
}

/// Box-list scene lit by a sky gradient.
#[derive(Debug, Deserialize)]
pub struct SceneConfig {
	/// Radiance of escaped rays pointing straight up [R, G, B].
	#[serde(default = "default_sky")]
	pub sky: [f32; 3],
	/// Radiance of escaped rays pointing straight down [R, G, B].
	#[serde(default = "default_ground")]
	pub ground: [f32; 3],
	/// Grid bounds (optional, defaults to the union of all boxes).
	pub bounds: Option<BoundsConfig>,
	/// Solid boxes.
	#[serde(default)]
	pub boxes: Vec<BoxConfig>,
}

/// Axis-aligned bounds.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct BoundsConfig {
	pub min: [f32; 3],
	pub max: [f32; 3],
}

/// A single solid box.
#[derive(Debug, Deserialize)]
pub struct BoxConfig {
	pub min: [f32; 3],
	pub max: [f32; 3],
	/// Radiance seen by probes looking at this box [R, G, B].
	#[serde(default = "default_radiance")]
	pub radiance: [f32; 3],
}

fn default_output_dir() -> String {
	"bake_out".to_string()
}

fn default_sky() -> [f32; 3] {
	SkyRadiance::default().sky.to_array()
}

fn default_ground() -> [f32; 3] {
	SkyRadiance::default().ground.to_array()
}

fn default_radiance() -> [f32; 3] {
	[0.5, 0.5, 0.5]
}

fn check_bounds(label: &str, min: [f32; 3], max: [f32; 3]) -> Result<()> {
	let (min, max) = (Vec3::from_array(min), Vec3::from_array(max));
	if !min.is_finite() || !max.is_finite() || min.cmpgt(max).any() {
		anyhow::bail!("{} has min {:?} above max {:?}", label, min, max);
	}
	Ok(())
}

impl Config {
	/// Load configuration from a TOML file.
	pub fn load(path: &Path) -> Result<Self> {
		let content = std::fs::read_to_string(path)
			.with_context(|| format!("Failed to read config file: {}", path.display()))?;
		Self::from_toml(&content)
	}

	/// Parse and validate configuration text.
	pub fn from_toml(content: &str) -> Result<Self> {
		let config: Config =
			toml::from_str(content).with_context(|| "Failed to parse config TOML")?;

		config.bake.validate().context("Invalid [bake] section")?;

		if let Some(bounds) = config.scene.bounds {
			check_bounds("scene.bounds", bounds.min, bounds.max)?;
		} else if config.scene.boxes.is_empty() {
			anyhow::bail!("Scene needs at least one box or explicit bounds");
		}
		for (i, b) in config.scene.boxes.iter().enumerate() {
			check_bounds(&format!("scene.boxes[{}]", i), b.min, b.max)?;
		}

		Ok(config)
	}
}

impl SceneConfig {
	/// Build the oracle the integrators query.
	pub fn build(&self) -> BoxScene {
		let mut scene = BoxScene::new(Vec::with_capacity(self.boxes.len())).with_environment(
			SkyRadiance::new(Vec3::from_array(self.sky), Vec3::from_array(self.ground)),
		);
		if let Some(bounds) = self.bounds {
			scene = scene.with_bounds(Aabb::new(
				Vec3::from_array(bounds.min),
				Vec3::from_array(bounds.max),
			));
		}
		for b in &self.boxes {
			scene.push(
				Aabb::new(Vec3::from_array(b.min), Vec3::from_array(b.max)),
				Vec3::from_array(b.radiance),
			);
		}
		scene
	}
}
