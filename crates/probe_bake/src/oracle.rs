//! Scene queries consumed by the bake stages.
//!
//! The classifier only asks [`SceneGeometry::overlaps`]; the estimator traces
//! rays with [`SceneGeometry::intersect`] and turns each traced ray into a
//! color with a [`RadianceSource`]. Both traits are `Send + Sync` so a single
//! scene can be shared by every rayon worker.
//!
//! [`BoxScene`] is a reference implementation over a flat list of boxes.

use glam::Vec3;

use crate::types::{Aabb, Ray, RayHit};

/// Geometry oracle: total, side-effect free queries.
pub trait SceneGeometry: Send + Sync {
  /// Bounds the voxel grid is laid over.
  fn bounds(&self) -> Aabb;

  /// Does any surface overlap `aabb`?
  fn overlaps(&self, aabb: &Aabb) -> bool;

  /// Closest hit along `ray`, or `None` on a miss.
  fn intersect(&self, ray: &Ray) -> Option<RayHit>;
}

/// Incident radiance carried back along a traced ray.
pub trait RadianceSource: Send + Sync {
  /// `hit` is the result of tracing `ray`; `None` means it escaped the scene.
  fn radiance(&self, ray: &Ray, hit: Option<&RayHit>) -> Vec3;
}

/// Blanket impl for boxed trait objects.
impl SceneGeometry for Box<dyn SceneGeometry> {
  fn bounds(&self) -> Aabb {
    (**self).bounds()
  }

  fn overlaps(&self, aabb: &Aabb) -> bool {
    (**self).overlaps(aabb)
  }

  fn intersect(&self, ray: &Ray) -> Option<RayHit> {
    (**self).intersect(ray)
  }
}

/// Blanket impl for boxed trait objects.
impl RadianceSource for Box<dyn RadianceSource> {
  fn radiance(&self, ray: &Ray, hit: Option<&RayHit>) -> Vec3 {
    (**self).radiance(ray, hit)
  }
}

// =============================================================================
// Radiance sources
// =============================================================================

/// Same radiance from every direction, hit or miss.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantRadiance(pub Vec3);

impl RadianceSource for ConstantRadiance {
  fn radiance(&self, _ray: &Ray, _hit: Option<&RayHit>) -> Vec3 {
    self.0
  }
}

/// Sky/ground gradient for escaped rays. Occluded rays carry nothing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkyRadiance {
  /// Radiance straight up (+Y).
  pub sky: Vec3,
  /// Radiance straight down (-Y).
  pub ground: Vec3,
}

impl SkyRadiance {
  pub fn new(sky: Vec3, ground: Vec3) -> Self {
    Self { sky, ground }
  }

  /// Gradient value for a direction.
  #[inline]
  pub fn sample(&self, direction: Vec3) -> Vec3 {
    let t = (direction.normalize_or_zero().y * 0.5 + 0.5).clamp(0.0, 1.0);
    self.ground.lerp(self.sky, t)
  }
}

impl Default for SkyRadiance {
  fn default() -> Self {
    Self {
      sky: Vec3::new(0.6, 0.7, 1.0),
      ground: Vec3::new(0.2, 0.18, 0.15),
    }
  }
}

impl RadianceSource for SkyRadiance {
  fn radiance(&self, ray: &Ray, hit: Option<&RayHit>) -> Vec3 {
    match hit {
      Some(_) => Vec3::ZERO,
      None => self.sample(ray.direction),
    }
  }
}

// =============================================================================
// BoxScene
// =============================================================================

/// Solid axis-aligned box with the radiance it sends toward probes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneBox {
  pub aabb: Aabb,
  pub radiance: Vec3,
}

impl SceneBox {
  pub fn new(aabb: Aabb, radiance: Vec3) -> Self {
    Self { aabb, radiance }
  }
}

/// Scene made of boxes, lit by a sky gradient.
///
/// Geometry ids are indices into `boxes`.
#[derive(Clone, Debug, Default)]
pub struct BoxScene {
  pub boxes: Vec<SceneBox>,

  /// Replaces the union of all boxes as the grid bounds.
  pub bounds_override: Option<Aabb>,

  /// Radiance for rays that leave the scene.
  pub environment: SkyRadiance,
}

impl BoxScene {
  pub fn new(boxes: Vec<SceneBox>) -> Self {
    Self {
      boxes,
      ..Default::default()
    }
  }

  pub fn with_bounds(mut self, bounds: Aabb) -> Self {
    self.bounds_override = Some(bounds);
    self
  }

  pub fn with_environment(mut self, environment: SkyRadiance) -> Self {
    self.environment = environment;
    self
  }

  pub fn push(&mut self, aabb: Aabb, radiance: Vec3) {
    self.boxes.push(SceneBox::new(aabb, radiance));
  }
}

impl SceneGeometry for BoxScene {
  fn bounds(&self) -> Aabb {
    if let Some(bounds) = self.bounds_override {
      return bounds;
    }
    if self.boxes.is_empty() {
      return Aabb::new(Vec3::ZERO, Vec3::ZERO);
    }

    let mut bounds = Aabb::empty();
    for b in &self.boxes {
      bounds.encapsulate(&b.aabb);
    }
    bounds
  }

  fn overlaps(&self, aabb: &Aabb) -> bool {
    self.boxes.iter().any(|b| b.aabb.overlaps(aabb))
  }

  fn intersect(&self, ray: &Ray) -> Option<RayHit> {
    self
      .boxes
      .iter()
      .enumerate()
      .filter_map(|(geometry_id, b)| {
        b.aabb
          .intersect_ray(ray)
          .map(|distance| RayHit { geometry_id, distance })
      })
      .min_by(|a, b| a.distance.total_cmp(&b.distance))
  }
}

impl RadianceSource for BoxScene {
  fn radiance(&self, ray: &Ray, hit: Option<&RayHit>) -> Vec3 {
    match hit {
      Some(hit) => self
        .boxes
        .get(hit.geometry_id)
        .map_or(Vec3::ZERO, |b| b.radiance),
      None => self.environment.sample(ray.direction),
    }
  }
}

#[cfg(test)]
#[path = "oracle_test.rs"]
mod oracle_test;
