//! Stage 6: Write
//!
//! Plain-text dumps consumed by the debug viewer, one record per line:
//!
//! ```text
//! voxels.txt       <id> <-cx> <cy> <cz> <overlap 0|1>
//! probes.txt       <id> <-x> <y> <z>
//! sample_dirs.txt  <x> <y> <z>
//! probe_sh.txt     <id> r0..r8 g0..g8 b0..b8
//! ```
//!
//! X is negated for voxels and probes to match the viewer's handedness.
//! Sample directions stay unflipped. An empty input writes no file and
//! returns `Ok(false)`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use glam::Vec3;

use crate::error::{BakeError, Result};
use crate::types::{Probe, Voxel};

/// Write one line per item through `line`. Skips empty inputs.
fn write_records<T>(
  path: &Path,
  items: &[T],
  mut line: impl FnMut(&mut BufWriter<File>, &T) -> std::io::Result<()>,
) -> Result<bool> {
  if items.is_empty() {
    return Ok(false);
  }

  let file = File::create(path).map_err(|e| BakeError::io(path, e))?;
  let mut out = BufWriter::new(file);
  for item in items {
    line(&mut out, item).map_err(|e| BakeError::io(path, e))?;
  }
  out.flush().map_err(|e| BakeError::io(path, e))?;

  tracing::debug!(path = %path.display(), records = items.len(), "wrote records");
  Ok(true)
}

/// `<id> <-cx> <cy> <cz> <0|1>` per voxel.
pub fn write_voxels(path: impl AsRef<Path>, voxels: &[Voxel]) -> Result<bool> {
  write_records(path.as_ref(), voxels, |out, voxel| {
    let c = voxel.center();
    writeln!(
      out,
      "{} {} {} {} {}",
      voxel.id,
      -c.x,
      c.y,
      c.z,
      voxel.overlap as u8
    )
  })
}

/// `<id> <-x> <y> <z>` per probe.
pub fn write_probes(path: impl AsRef<Path>, probes: &[Probe]) -> Result<bool> {
  write_records(path.as_ref(), probes, |out, probe| {
    let p = probe.position;
    writeln!(out, "{} {} {} {}", probe.id, -p.x, p.y, p.z)
  })
}

/// `<x> <y> <z>` per direction.
pub fn write_sample_directions(path: impl AsRef<Path>, directions: &[Vec3]) -> Result<bool> {
  write_records(path.as_ref(), directions, |out, d| {
    writeln!(out, "{} {} {}", d.x, d.y, d.z)
  })
}

/// `<id>` followed by the 27 coefficients, channel-major (R, G, B).
pub fn write_probe_coefficients(path: impl AsRef<Path>, probes: &[Probe]) -> Result<bool> {
  write_records(path.as_ref(), probes, |out, probe| {
    write!(out, "{}", probe.id)?;
    for c in probe.coeffs.iter().flatten() {
      write!(out, " {}", c)?;
    }
    writeln!(out)
  })
}

#[cfg(test)]
#[path = "writer_test.rs"]
mod writer_test;
