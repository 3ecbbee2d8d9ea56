//! Light probe baker.
//!
//! Places probes around a box-list scene and bakes order-2 SH coefficients.
//!
//! Output files (in the output directory):
//! - voxels.txt: `<id> <-cx> <cy> <cz> <overlap>`
//! - probes.txt: `<id> <-x> <y> <z>`
//! - probe_sh.txt: `<id>` followed by 27 coefficients (R, G, B)
//! - sample_dirs.txt: directions traced by the first probe (optional)

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use probe_bake::create_integrator;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use config::Config;

/// Light probe baker for box-list scenes.
#[derive(Parser, Debug)]
#[command(name = "bake_probes")]
#[command(about = "Places light probes and bakes spherical harmonics")]
struct Args {
	/// Path to configuration TOML file.
	#[arg(short, long)]
	config: PathBuf,

	/// Output directory (default: `output_dir` from the config, relative to it).
	#[arg(short, long)]
	output_dir: Option<PathBuf>,

	/// Log filter, e.g. `info` or `probe_bake=debug`.
	#[arg(long, default_value = "info")]
	log_level: String,

	/// Emit logs as JSON lines.
	#[arg(long)]
	json_logs: bool,
}

fn init_logging(level: &str, json: bool) {
	use tracing_subscriber::{fmt, prelude::*, EnvFilter};

	let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
	let fmt_layer = if json {
		fmt::layer().json().boxed()
	} else {
		fmt::layer().with_target(false).boxed()
	};
	tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}

fn main() -> Result<()> {
	let args = Args::parse();
	init_logging(&args.log_level, args.json_logs);

	println!("Loading config from: {}", args.config.display());
	let config = Config::load(&args.config)?;

	let output_dir = args.output_dir.unwrap_or_else(|| {
		args.config
			.parent()
			.unwrap_or(Path::new("."))
			.join(&config.output_dir)
	});

	tracing::debug!(
		output_dir = %output_dir.display(),
		integrator = ?config.integrator.kind,
		bake = ?config.bake,
		"config loaded"
	);

	let scene = config.scene.build();
	println!(
		"Scene: {} boxes, voxel unit {}, probe spacing {}",
		scene.boxes.len(),
		config.bake.voxel_unit,
		config.bake.rho_probes
	);

	let integrator = create_integrator(
		config.integrator.kind,
		Arc::new(scene),
		config.bake,
		&output_dir,
	)
	.context("Failed to create integrator")?;
	println!("{}", integrator.describe());

	let report = integrator.render().context("Bake failed")?;
	let stats = report.stats;

	println!(
		"\nVoxels: {} ({} solid)",
		stats.voxel_count, stats.solid_count
	);
	println!(
		"Probes: {} candidates -> {} (target {})",
		stats.candidate_count, stats.probe_count, stats.target_count
	);
	println!(
		"Timing (ms): voxelize {:.2}, classify {:.2}, flood fill {:.2}, reduce {:.2}, estimate {:.2}",
		stats.voxelize_us as f64 / 1000.0,
		stats.classify_us as f64 / 1000.0,
		stats.seed_us as f64 / 1000.0,
		stats.reduce_us as f64 / 1000.0,
		stats.estimate_us as f64 / 1000.0
	);

	if report.written.is_empty() {
		println!("\nNothing to write: the scene produced no voxels or probes");
	} else {
		for path in &report.written {
			println!("  ✓ {}", path.display());
		}
		println!("\nDone! Output written to: {}", output_dir.display());
	}

	Ok(())
}
