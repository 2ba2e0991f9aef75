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

use crate::discretize::Patch;
use crate::geometry::{unit_direction, Ray3D, Vector3};
use crate::intersect::{EngineOptions, Intersect, Occluder};
use crate::numeric::{check_unit_range, compensated_sum};
use crate::{Error, Float, Result};
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A source of light
///
/// Whatever the kind of light, a sample is considered to be lit if it
/// faces the light and a ray leaving the sample (from just above the surface)
/// towards the light reaches it without hitting the occluder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Light {
    /// A light source so far away that all of its rays are parallel (e.g., the Sun).
    /// The vector points from the surface **towards** the light.
    Directional(Vector3),

    /// A light source at a position
    Point(Vector3),
}

impl Light {
    /// Checks that the light makes sense, returning a copy
    /// with a normalized direction if it is directional.
    pub fn validated(&self) -> Result<Self> {
        match self {
            Light::Directional(d) => Ok(Light::Directional(unit_direction(*d, "Light direction")?)),
            Light::Point(p) => {
                if p.iter().all(|v| v.is_finite()) {
                    Ok(*self)
                } else {
                    Err(Error::argument(format!("Light position {:?} is not finite", p)))
                }
            }
        }
    }

    /// Checks whether a sample at `position` with unit `normal` receives light.
    /// `self` must be validated.
    fn reaches(
        &self,
        position: &Vector3,
        normal: &Vector3,
        occluder: Option<&Occluder>,
        options: &EngineOptions,
    ) -> bool {
        // Rays leave from just above the surface
        let origin = position + normal * options.surface_offset;
        match self {
            Light::Directional(direction) => {
                // Back-facing samples are self-shaded
                if normal.dot(direction) <= 0.0 {
                    return false;
                }
                match occluder {
                    Some(o) => {
                        let ray = Ray3D {
                            origin,
                            direction: *direction,
                        };
                        o.intersect(&ray, options.epsilon).is_none()
                    }
                    None => true,
                }
            }
            Light::Point(light) => {
                let to_light = light - origin;
                let distance = to_light.norm();
                if distance <= options.epsilon {
                    return false;
                }
                if normal.dot(&(to_light / distance)) <= 0.0 {
                    return false;
                }
                match occluder {
                    Some(o) => !o.blocks_segment(origin, *light, options.epsilon),
                    None => true,
                }
            }
        }
    }
}

/// Calculates the area of `patch` that receives light from `light`,
/// considering `occluder` (if any).
pub fn illuminated_area(
    patch: &Patch,
    light: &Light,
    occluder: Option<&Occluder>,
    options: &EngineOptions,
) -> Result<Float> {
    options.validate()?;
    let light = light.validated()?;

    let lit = |i: usize| -> Float {
        let (position, normal) = (&patch.positions()[i], &patch.normals()[i]);
        if light.reaches(position, normal, occluder, options) {
            patch.weights()[i]
        } else {
            0.0
        }
    };

    // Collect, so the sum is always done in the same order
    #[cfg(feature = "parallel")]
    let contributions: Vec<Float> = (0..patch.len()).into_par_iter().map(lit).collect();
    #[cfg(not(feature = "parallel"))]
    let contributions: Vec<Float> = (0..patch.len()).map(lit).collect();

    Ok(compensated_sum(contributions))
}

/// Fraction of `patch` illuminated by a directional light. `light_direction`
/// points from the surface towards the light and does not need to be
/// normalized, but it cannot be zero.
pub fn illuminated_fraction(
    patch: &Patch,
    light_direction: Vector3,
    occluder: Option<&Occluder>,
    options: &EngineOptions,
) -> Result<Float> {
    let area = illuminated_area(patch, &Light::Directional(light_direction), occluder, options)?;
    Ok(check_unit_range(
        area / patch.total_area(),
        "Illuminated fraction",
    ))
}

/// Fraction of `patch` illuminated by a point light at `light_position`
pub fn illuminated_fraction_point_source(
    patch: &Patch,
    light_position: Vector3,
    occluder: Option<&Occluder>,
    options: &EngineOptions,
) -> Result<Float> {
    let area = illuminated_area(patch, &Light::Point(light_position), occluder, options)?;
    Ok(check_unit_range(
        area / patch.total_area(),
        "Illuminated fraction",
    ))
}
