/*
MIT License
Copyright (c) 2021 Germán Molina
Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

use crate::geometry::{Ray3D, Sphere, Triangle, TriangleMesh, Vector3};
use crate::{Error, Float, Result};
use serde::{Deserialize, Serialize};

/// Numerical options shared by the evaluators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Intersections closer than this to the origin of a ray (or to
    /// either end of a segment) are ignored. This is what prevents points
    /// lying on an occluder from blocking their own rays.
    pub epsilon: Float,

    /// Offset, along the normal, of the starting point of the rays
    /// cast from a surface towards a light.
    pub surface_offset: Float,
}

impl EngineOptions {
    /// Checks that both tolerances are finite and non-negative
    pub fn validate(&self) -> Result<()> {
        for (name, v) in [("epsilon", self.epsilon), ("surface_offset", self.surface_offset)] {
            if !v.is_finite() || v < 0.0 {
                return Err(Error::argument(format!(
                    "Option '{}' must be finite and non-negative... found {}",
                    name, v
                )));
            }
        }
        Ok(())
    }
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            epsilon: 1e-6,
            surface_offset: 0.001,
        }
    }
}

/// Something that rays can hit.
pub trait Intersect {
    /// Returns the parametric distance to the nearest intersection
    /// strictly beyond `t_min`, if any.
    ///
    /// Rays that are parallel to (or graze) the object do not intersect.
    fn intersect(&self, ray: &Ray3D, t_min: Float) -> Option<Float>;

    /// Checks whether the segment between `from` and `to` crosses the
    /// object. Hits within `epsilon` of either end do not count, and
    /// coincident ends are never blocked.
    fn blocks_segment(&self, from: Vector3, to: Vector3, epsilon: Float) -> bool {
        let delta = to - from;
        let length = delta.norm();
        if length <= epsilon {
            return false;
        }
        let ray = Ray3D {
            origin: from,
            direction: delta / length,
        };
        match self.intersect(&ray, epsilon) {
            Some(t) => t < length - epsilon,
            None => false,
        }
    }
}

impl Intersect for Sphere {
    fn intersect(&self, ray: &Ray3D, t_min: Float) -> Option<Float> {
        // |o + t*d - c|^2 = r^2, with |d| = 1
        let oc = ray.origin - self.centre();
        let b = oc.dot(&ray.direction);
        let c = oc.norm_squared() - self.radius() * self.radius();
        let discriminant = b * b - c;
        if discriminant <= 0.0 {
            return None;
        }
        let sq = discriminant.sqrt();
        // Numerically stable pair of roots
        let q = if b > 0.0 { -b - sq } else { -b + sq };
        let (mut t1, mut t2) = if q == 0.0 {
            (0.0, 0.0)
        } else {
            (q, c / q)
        };
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }

        if t1 > t_min {
            Some(t1)
        } else if t2 > t_min {
            Some(t2)
        } else {
            None
        }
    }
}

impl Intersect for Triangle {
    fn intersect(&self, ray: &Ray3D, t_min: Float) -> Option<Float> {
        // Möller–Trumbore
        let [a, b, c] = *self.vertices();
        let e1 = b - a;
        let e2 = c - a;
        let p = ray.direction.cross(&e2);
        let det = e1.dot(&p);
        if det.abs() <= Float::EPSILON * e1.norm() * e2.norm() {
            return None; // parallel
        }
        let inv_det = 1.0 / det;
        let s = ray.origin - a;
        let u = s.dot(&p) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }
        let q = s.cross(&e1);
        let v = ray.direction.dot(&q) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }
        let t = e2.dot(&q) * inv_det;
        if t > t_min {
            Some(t)
        } else {
            None
        }
    }
}

impl Intersect for TriangleMesh {
    fn intersect(&self, ray: &Ray3D, t_min: Float) -> Option<Float> {
        self.triangles()
            .iter()
            .filter_map(|t| t.intersect(ray, t_min))
            .fold(None, |nearest: Option<Float>, t| match nearest {
                Some(n) if n <= t => Some(n),
                _ => Some(t),
            })
    }
}

/// A body that can block the line of sight between two points
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Occluder {
    /// A sphere (e.g., a planet)
    Sphere(Sphere),
    /// A general triangle mesh
    Mesh(TriangleMesh),
}

impl Intersect for Occluder {
    fn intersect(&self, ray: &Ray3D, t_min: Float) -> Option<Float> {
        match self {
            Occluder::Sphere(s) => s.intersect(ray, t_min),
            Occluder::Mesh(m) => m.intersect(ray, t_min),
        }
    }
}

impl From<Sphere> for Occluder {
    fn from(s: Sphere) -> Self {
        Occluder::Sphere(s)
    }
}

impl From<TriangleMesh> for Occluder {
    fn from(m: TriangleMesh) -> Self {
        Occluder::Mesh(m)
    }
}

/// Checks whether a ray starting at `origin` and going along `direction`
/// hits `occluder` at a distance greater than `epsilon`.
///
/// Fails only if `direction` has zero length.
pub fn intersects<O: Intersect + ?Sized>(
    origin: Vector3,
    direction: Vector3,
    occluder: &O,
    epsilon: Float,
) -> Result<bool> {
    let ray = Ray3D::new(origin, direction)?;
    Ok(occluder.intersect(&ray, epsilon).is_some())
}

/// Checks whether the segment between `from` and `to` is blocked by
/// `occluder`. See [`Intersect::blocks_segment`].
pub fn segment_blocked<O: Intersect + ?Sized>(
    from: Vector3,
    to: Vector3,
    occluder: &O,
    epsilon: Float,
) -> bool {
    occluder.blocks_segment(from, to, epsilon)
}
