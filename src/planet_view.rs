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
use crate::geometry::{perpendicular, Ray3D, Vector3};
use crate::intersect::{EngineOptions, Intersect, Occluder};
use crate::numeric::{check_unit_range, compensated_sum};
use crate::{Error, Float, Result, PI};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Samples a direction in the hemisphere around `normal`, with a probability
/// proportional to the cosine of the angle with it. `e1`, `e2` and `normal`
/// must be an orthonormal basis.
fn cosine_weighted_sample_hemisphere<R: Rng>(
    rng: &mut R,
    e1: Vector3,
    e2: Vector3,
    normal: Vector3,
) -> Vector3 {
    let u1: Float = rng.gen();
    let u2: Float = rng.gen();
    let r = u1.sqrt();
    let phi = 2. * PI * u2;
    let z = (1. - u1).max(0.0).sqrt();
    e1 * (r * phi.cos()) + e2 * (r * phi.sin()) + normal * z
}

/// Estimates the view factor from `patch` to a body (e.g., the planet) by
/// casting `rays_per_sample` cosine-weighted rays from each sample and counting
/// how many of them hit `occluder`.
///
/// Each sample gets its own random generator, seeded with `seed` plus
/// the index of the sample, so the result is the same whether it is calculated
/// in parallel or not.
pub fn planet_view_factor(
    patch: &Patch,
    occluder: &Occluder,
    rays_per_sample: usize,
    seed: u64,
    options: &EngineOptions,
) -> Result<Float> {
    options.validate()?;
    if rays_per_sample == 0 {
        return Err(Error::argument("At least one ray per sample is needed"));
    }

    let sample = |i: usize| -> Float {
        let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
        let normal = patch.normals()[i];
        let e1 = perpendicular(&normal);
        let e2 = normal.cross(&e1);
        let origin = patch.positions()[i] + normal * options.surface_offset;

        let hits = (0..rays_per_sample)
            .filter(|_| {
                let ray = Ray3D {
                    origin,
                    direction: cosine_weighted_sample_hemisphere(&mut rng, e1, e2, normal),
                };
                occluder.intersect(&ray, options.epsilon).is_some()
            })
            .count();
        patch.weights()[i] * hits as Float / rays_per_sample as Float
    };

    #[cfg(feature = "parallel")]
    let contributions: Vec<Float> = (0..patch.len()).into_par_iter().map(sample).collect();
    #[cfg(not(feature = "parallel"))]
    let contributions: Vec<Float> = (0..patch.len()).map(sample).collect();

    let f = compensated_sum(contributions) / patch.total_area();
    Ok(check_unit_range(f, "Planet view factor"))
}
