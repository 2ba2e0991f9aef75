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
use crate::intersect::{EngineOptions, Intersect, Occluder};
use crate::numeric::{check_unit_range, compensated_sum};
use crate::{Float, Result, PI};
use serde::Serialize;
use std::sync::Once;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Coincident samples are reported once; afterwards, only in debug logs
static COINCIDENT_SAMPLES: Once = Once::new();

/// The result of a view factor calculation, with some
/// information about the sample pairs that did not contribute.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ViewFactorReport {
    /// The view factor from the first surface to the second one
    pub value: Float,

    /// Number of pairs that contributed
    pub contributing_pairs: usize,

    /// Pairs whose samples were (closer than `epsilon` to) each other. These are
    /// skipped.
    pub coincident_pairs: usize,

    /// Pairs in which at least one of the samples faced away from the other
    pub facing_away_pairs: usize,

    /// Pairs whose line of sight was blocked by the occluder
    pub occluded_pairs: usize,
}

impl ViewFactorReport {
    /// Merges the counts of `other` into `self`. Values are not touched.
    fn merge_counts(&mut self, other: &Self) {
        self.contributing_pairs += other.contributing_pairs;
        self.coincident_pairs += other.coincident_pairs;
        self.facing_away_pairs += other.facing_away_pairs;
        self.occluded_pairs += other.occluded_pairs;
    }
}

/// Calculates the view factor from surface `a` to surface `b`. See [`view_factor_report`].
pub fn view_factor(
    a: &Patch,
    b: &Patch,
    occluder: Option<&Occluder>,
    options: &EngineOptions,
) -> Result<Float> {
    Ok(view_factor_report(a, b, occluder, options)?.value)
}

/// Calculates the view factor from surface `a` to surface `b`, which is
///
/// ```text
/// F(a->b) = 1/A_a * sum_i sum_j ( cos(t_i) * cos(t_j) * dA_i * dA_j ) / (PI * r^2)
/// ```
///
/// A pair of samples contributes only if both face each other
/// and, if an occluder is given, the segment between them is not blocked by it.
/// Pairs of coincident samples are skipped. Pairs are visited one at a time
/// (no matrix is ever built); with the `parallel` feature, the samples
/// of `a` are distributed among threads and the partial sums are added
/// in the same order as if they had been calculated sequentially.
pub fn view_factor_report(
    a: &Patch,
    b: &Patch,
    occluder: Option<&Occluder>,
    options: &EngineOptions,
) -> Result<ViewFactorReport> {
    options.validate()?;

    let row = |i: usize| -> ViewFactorReport {
        let pi = &a.positions()[i];
        let ni = &a.normals()[i];
        let wi = a.weights()[i];
        b.samples()
            .fold(ViewFactorReport::default(), |mut acc, (pj, nj, wj)| {
                let d = pj - pi;
                let r2 = d.norm_squared();
                let r = r2.sqrt();
                if r <= options.epsilon {
                    acc.coincident_pairs += 1;
                    return acc;
                }
                let dir = d / r;
                let cos_i = ni.dot(&dir);
                if cos_i <= 0.0 {
                    acc.facing_away_pairs += 1;
                    return acc;
                }
                let cos_j = -nj.dot(&dir);
                if cos_j <= 0.0 {
                    acc.facing_away_pairs += 1;
                    return acc;
                }
                if let Some(o) = occluder {
                    if o.blocks_segment(*pi, *pj, options.epsilon) {
                        acc.occluded_pairs += 1;
                        return acc;
                    }
                }
                acc.contributing_pairs += 1;
                acc.value += cos_i * cos_j * wi * wj / (PI * r2);
                acc
            })
    };

    #[cfg(feature = "parallel")]
    let rows: Vec<ViewFactorReport> = (0..a.len()).into_par_iter().map(row).collect();
    #[cfg(not(feature = "parallel"))]
    let rows: Vec<ViewFactorReport> = (0..a.len()).map(row).collect();

    let mut report = ViewFactorReport {
        value: compensated_sum(rows.iter().map(|r| r.value)) / a.total_area(),
        ..ViewFactorReport::default()
    };
    for r in rows.iter() {
        report.merge_counts(r);
    }

    if report.coincident_pairs > 0 {
        COINCIDENT_SAMPLES.call_once(|| {
            log::warn!(
                "Found coincident samples while calculating view factors... they are being skipped"
            )
        });
        log::debug!(
            "Skipped {} pairs of coincident samples",
            report.coincident_pairs
        );
    }
    check_unit_range(report.value, "View factor");

    Ok(report)
}

#[cfg(test)]
mod testing {
    use super::*;
    use crate::discretize::{discretize, Resolution, SphericalPatch, SurfaceSpec};
    use crate::geometry::{Polygon, Sphere, Vector3};
    use approx::assert_relative_eq;

    /// A square of side `size`, centred at `(0, 0, z)`, facing up or down
    fn horizontal_square(size: Float, z: Float, up: bool, n: usize) -> Patch {
        let h = size / 2.;
        let mut corners = vec![
            Vector3::new(-h, -h, z),
            Vector3::new(h, -h, z),
            Vector3::new(h, h, z),
            Vector3::new(-h, h, z),
        ];
        if !up {
            corners.reverse();
        }
        let p = Polygon::new(corners).unwrap();
        discretize(&SurfaceSpec::Polygon(p), Resolution::Grid(n)).unwrap()
    }

    #[test]
    fn test_facing_away() {
        let options = EngineOptions::default();
        let a = horizontal_square(1., 0., true, 4);
        // Above, but facing up too
        let b = horizontal_square(1., 1., true, 4);
        let report = view_factor_report(&a, &b, None, &options).unwrap();
        assert_eq!(report.value, 0.0);
        assert_eq!(report.facing_away_pairs, a.len() * b.len());

        // Below
        let c = horizontal_square(1., -1., true, 4);
        assert_eq!(view_factor(&a, &c, None, &options).unwrap(), 0.0);
    }

    #[test]
    fn test_parallel_squares() {
        // Closed form for coaxial squares with side/distance = 1
        let a = horizontal_square(1., 0., true, 20);
        let b = horizontal_square(1., 1., false, 20);
        let f = view_factor(&a, &b, None, &EngineOptions::default()).unwrap();
        assert_relative_eq!(f, 0.19982, max_relative = 0.02);
    }

    #[test]
    fn test_reciprocity() {
        let options = EngineOptions::default();
        // Area 4
        let a = horizontal_square(2., 0., true, 10);
        // Area 9, tilted and shifted
        let b = Polygon::new(vec![
            Vector3::new(1., -1.5, 2.3),
            Vector3::new(1., 1.5, 2.3),
            Vector3::new(3.4, 1.5, 0.5),
            Vector3::new(3.4, -1.5, 0.5),
        ])
        .unwrap();
        let b = discretize(&SurfaceSpec::Polygon(b), Resolution::Grid(10)).unwrap();
        assert_relative_eq!(a.total_area(), 4.0, max_relative = 1e-9);
        assert_relative_eq!(b.total_area(), 9.0, max_relative = 1e-9);
        // make sure they see each other
        let f_ab = view_factor(&a, &b, None, &options).unwrap();
        let f_ba = view_factor(&b, &a, None, &options).unwrap();
        assert!(f_ab > 0.01);
        assert!(f_ab <= 1.0 && f_ba <= 1.0);
        assert_relative_eq!(f_ab * a.total_area(), f_ba * b.total_area(), max_relative = 1e-9);
    }

    #[test]
    fn test_occluded() {
        let options = EngineOptions::default();
        let a = horizontal_square(1., 0., true, 6);
        let b = horizontal_square(1., 4., false, 6);
        let free = view_factor_report(&a, &b, None, &options).unwrap();
        assert!(free.value > 0.0);
        assert_eq!(free.occluded_pairs, 0);

        let sphere = Occluder::Sphere(Sphere::new(Vector3::new(0., 0., 2.), 1.5).unwrap());
        let blocked = view_factor_report(&a, &b, Some(&sphere), &options).unwrap();
        assert_eq!(blocked.value, 0.0);
        assert_eq!(blocked.occluded_pairs, a.len() * b.len());
    }

    #[test]
    fn test_coincident_samples_are_skipped() {
        let options = EngineOptions::default();
        let a = horizontal_square(1., 0., true, 3);
        // Same samples, facing the other way
        let b = Patch::from_parts(
            a.positions().to_vec(),
            a.normals().iter().map(|n| -n).collect(),
            a.weights().to_vec(),
        )
        .unwrap();
        let report = view_factor_report(&a, &b, None, &options).unwrap();
        assert!(report.value.is_finite());
        assert_eq!(report.value, 0.0);
        assert_eq!(report.coincident_pairs, a.len());
        assert_eq!(report.contributing_pairs, 0);
        assert!(COINCIDENT_SAMPLES.is_completed());

        // Calling again (e.g., at every step of an orbit) still skips them
        let again = view_factor_report(&a, &b, None, &options).unwrap();
        assert_eq!(again, report);
    }

    #[test]
    fn test_enclosure() {
        // Everything leaving a sphere reaches an enclosing one
        let inner = Sphere::new(Vector3::zeros(), 1.0).unwrap();
        let outer = Sphere::new(Vector3::zeros(), 10.0).unwrap();
        let inner = discretize(
            &SurfaceSpec::Spherical(SphericalPatch::full(inner, false)),
            Resolution::Angular {
                phi_steps: 10,
                theta_steps: 20,
            },
        )
        .unwrap();
        let outer = discretize(
            &SurfaceSpec::Spherical(SphericalPatch::full(outer, true)),
            Resolution::Angular {
                phi_steps: 30,
                theta_steps: 60,
            },
        )
        .unwrap();
        let f = view_factor(&inner, &outer, None, &EngineOptions::default()).unwrap();
        assert_relative_eq!(f, 1.0, max_relative = 0.03);

        // and the other way around, F = A_inner / A_outer
        let f = view_factor(&outer, &inner, None, &EngineOptions::default()).unwrap();
        assert_relative_eq!(f, 0.01, max_relative = 0.03);
    }
}
