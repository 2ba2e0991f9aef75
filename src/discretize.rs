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

use crate::geometry::{unit_direction, Polygon, Sphere, TriangleMesh, Vector3};
use crate::{Error, Float, Result, PI};
use nalgebra::{Isometry3, Point3};
use serde::{Deserialize, Serialize};

/// A surface that has been discretized into weighted samples.
///
/// Each sample has a position, a unit normal and an area weight. The weights
/// add up to the total area of the surface. The vertices and triangles of the
/// discretization are kept too, so that they can be exported.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Patch {
    positions: Vec<Vector3>,
    normals: Vec<Vector3>,
    weights: Vec<Float>,
    total_area: Float,
    vertices: Vec<Vector3>,
    triangles: Vec<[usize; 3]>,
}

impl Patch {
    /// Builds a patch from its samples. The total area is the
    /// sum of the `weights`.
    ///
    /// Fails with [`Error::InvalidGeometry`] if the arrays have different
    /// lengths or are empty, if a weight is negative or not finite, if all
    /// weights are zero, or if a normal has zero length. Normals are normalized.
    pub fn from_parts(
        positions: Vec<Vector3>,
        normals: Vec<Vector3>,
        weights: Vec<Float>,
    ) -> Result<Self> {
        if positions.len() != normals.len() || positions.len() != weights.len() {
            return Err(Error::geometry(format!(
                "A patch needs one normal and one weight per sample... found {} samples, {} normals and {} weights",
                positions.len(),
                normals.len(),
                weights.len()
            )));
        }
        if positions.is_empty() {
            return Err(Error::geometry("A patch needs at least one sample"));
        }
        if let Some(w) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(Error::geometry(format!(
                "Area weights must be non-negative... found {}",
                w
            )));
        }
        let total_area: Float = weights.iter().sum();
        if total_area <= 0.0 {
            return Err(Error::geometry("The patch has zero area"));
        }
        let normals = normals
            .into_iter()
            .map(|n| unit_direction(n, "Sample normal"))
            .collect::<Result<Vec<Vector3>>>()
            .map_err(|e| Error::geometry(e.to_string()))?;

        Ok(Self {
            positions,
            normals,
            weights,
            total_area,
            vertices: Vec::new(),
            triangles: Vec::new(),
        })
    }

    /// Builds a patch in which every sample represents the same
    /// area (i.e., `total_area / n_samples`).
    pub fn with_uniform_weights(
        positions: Vec<Vector3>,
        normals: Vec<Vector3>,
        total_area: Float,
    ) -> Result<Self> {
        if !total_area.is_finite() || total_area <= 0.0 {
            return Err(Error::geometry(format!(
                "Total area must be positive... found {}",
                total_area
            )));
        }
        let n = positions.len().max(1);
        let weights = vec![total_area / n as Float; positions.len()];
        Self::from_parts(positions, normals, weights)
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Checks whether there are no samples. Patches built through the
    /// public constructors are never empty.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Positions of the samples
    pub fn positions(&self) -> &[Vector3] {
        &self.positions
    }

    /// Unit normals of the samples
    pub fn normals(&self) -> &[Vector3] {
        &self.normals
    }

    /// Area represented by each sample
    pub fn weights(&self) -> &[Float] {
        &self.weights
    }

    /// The area of the whole patch
    pub fn total_area(&self) -> Float {
        self.total_area
    }

    /// Iterates over `(position, normal, weight)` for each sample
    pub fn samples(&self) -> impl Iterator<Item = (&Vector3, &Vector3, Float)> + '_ {
        self.positions
            .iter()
            .zip(self.normals.iter())
            .zip(self.weights.iter())
            .map(|((p, n), w)| (p, n, *w))
    }

    /// Vertices of the discretization, for exporting
    pub fn vertices(&self) -> &[Vector3] {
        &self.vertices
    }

    /// Triangles of the discretization (indices into [`Patch::vertices`]), for exporting
    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    /// Returns a copy of this patch, rotated and then translated by `isometry`
    pub fn transformed(&self, isometry: &Isometry3<Float>) -> Self {
        let point = |p: &Vector3| isometry.transform_point(&Point3::from(*p)).coords;
        Self {
            positions: self.positions.iter().map(point).collect(),
            normals: self
                .normals
                .iter()
                .map(|n| isometry.transform_vector(n))
                .collect(),
            weights: self.weights.clone(),
            total_area: self.total_area,
            vertices: self.vertices.iter().map(point).collect(),
            triangles: self.triangles.clone(),
        }
    }

    /// Returns a copy of this patch, moved by `offset`
    pub fn translated(&self, offset: Vector3) -> Self {
        Self {
            positions: self.positions.iter().map(|p| p + offset).collect(),
            normals: self.normals.clone(),
            weights: self.weights.clone(),
            total_area: self.total_area,
            vertices: self.vertices.iter().map(|p| p + offset).collect(),
            triangles: self.triangles.clone(),
        }
    }
}

/// A region of a sphere, in spherical coordinates around its centre
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SphericalPatch {
    sphere: Sphere,
    polar: (Float, Float),
    azimuth: (Float, Float),
    inward: bool,
}

impl SphericalPatch {
    /// A region of `sphere` between polar angles `polar.0` and `polar.1`
    /// (measured from +Z, within `[0, PI]`) and azimuths `azimuth.0` to `azimuth.1`
    /// (measured from +X, spanning at most `2 PI`). If `inward` is `true`, normals
    /// point towards the centre (e.g., an enclosure around the scene).
    pub fn new(
        sphere: Sphere,
        polar: (Float, Float),
        azimuth: (Float, Float),
        inward: bool,
    ) -> Result<Self> {
        let (p0, p1) = polar;
        if !(0.0..PI + 1e-9).contains(&p0) || !(0.0..=PI + 1e-9).contains(&p1) || p1 <= p0 {
            return Err(Error::geometry(format!(
                "Polar range must be within [0, PI] and increasing... found ({}, {})",
                p0, p1
            )));
        }
        let (a0, a1) = azimuth;
        if !a0.is_finite() || !a1.is_finite() || a1 <= a0 || a1 - a0 > 2. * PI + 1e-9 {
            return Err(Error::geometry(format!(
                "Azimuth range must be increasing and span at most 2 PI... found ({}, {})",
                a0, a1
            )));
        }
        Ok(Self {
            sphere,
            polar,
            azimuth,
            inward,
        })
    }

    /// The whole sphere
    pub fn full(sphere: Sphere, inward: bool) -> Self {
        Self {
            sphere,
            polar: (0.0, PI),
            azimuth: (0.0, 2. * PI),
            inward,
        }
    }

    /// Exact area of the region
    pub fn area(&self) -> Float {
        let r = self.sphere.radius();
        r * r * (self.polar.0.cos() - self.polar.1.cos()) * (self.azimuth.1 - self.azimuth.0)
    }
}

/// The description of a surface to be discretized
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SurfaceSpec {
    /// A flat, convex triangle or quadrilateral
    Polygon(Polygon),
    /// A region of a sphere
    Spherical(SphericalPatch),
    /// An already triangulated surface
    Mesh(TriangleMesh),
}

/// How finely to discretize a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// Flat surfaces and meshes: each edge (of the polygon, or of every
    /// triangle in the mesh) is split into this many segments.
    Grid(usize),
    /// Spherical surfaces: number of steps in polar and azimuth angle
    Angular {
        /// Number of polar (i.e., from the pole) divisions
        phi_steps: usize,
        /// Number of azimuth divisions
        theta_steps: usize,
    },
}

/// Discretizes `surface` into a [`Patch`].
///
/// * Quadrilaterals with resolution `Grid(n)` become `(n+1)^2` grid vertices
/// and `2n^2` triangles. There is one sample per triangle (at its centroid), weighted
/// by its area.
/// * Triangles with resolution `Grid(n)` become `n^2` triangles.
/// * Meshes with `Grid(n)` get every triangle subdivided as above.
/// * Spherical regions with `Angular{..}` have one sample at the centre of each cell of
/// a uniform angular grid, weighted by the exact area of the cell, with radial normals.
pub fn discretize(surface: &SurfaceSpec, resolution: Resolution) -> Result<Patch> {
    match (surface, resolution) {
        (_, Resolution::Grid(0)) => Err(Error::argument("Resolution must be at least 1")),
        (_, Resolution::Angular { phi_steps, theta_steps }) if phi_steps == 0 || theta_steps == 0 => {
            Err(Error::argument("Angular resolution must be at least 1 in both directions"))
        }
        (SurfaceSpec::Polygon(p), Resolution::Grid(n)) => match p.corners().len() {
            4 => discretize_quad(p, n),
            _ => {
                let c = p.corners();
                let mut mesh = MeshBuilder::default();
                mesh.add_triangle_grid([c[0], c[1], c[2]], n);
                mesh.finish()
            }
        },
        (SurfaceSpec::Mesh(m), Resolution::Grid(n)) => {
            let mut mesh = MeshBuilder::default();
            for t in m.triangles() {
                mesh.add_triangle_grid(*t.vertices(), n);
            }
            mesh.finish()
        }
        (SurfaceSpec::Spherical(s), Resolution::Angular { phi_steps, theta_steps }) => {
            Ok(discretize_spherical(s, phi_steps, theta_steps))
        }
        (SurfaceSpec::Spherical(_), Resolution::Grid(_)) => Err(Error::argument(
            "Spherical surfaces need an Angular resolution",
        )),
        (_, Resolution::Angular { .. }) => Err(Error::argument(
            "Flat surfaces and meshes need a Grid resolution",
        )),
    }
}

/// Accumulates triangles, creating one sample per triangle
#[derive(Default)]
struct MeshBuilder {
    vertices: Vec<Vector3>,
    triangles: Vec<[usize; 3]>,
    positions: Vec<Vector3>,
    normals: Vec<Vector3>,
    weights: Vec<Float>,
}

impl MeshBuilder {
    /// Adds triangle `[a,b,c]`, where the indices refer to existing vertices.
    /// Triangles with no area are kept for export but get no sample.
    fn push(&mut self, tri: [usize; 3]) {
        let [a, b, c] = tri.map(|i| self.vertices[i]);
        let cross = (b - a).cross(&(c - a));
        let double_area = cross.norm();
        if double_area > 0.0 {
            self.positions.push((a + b + c) / 3.0);
            self.normals.push(cross / double_area);
            self.weights.push(0.5 * double_area);
        }
        self.triangles.push(tri);
    }

    /// Splits triangle `[a,b,c]` in `n^2` congruent triangles
    fn add_triangle_grid(&mut self, corners: [Vector3; 3], n: usize) {
        let [a, b, c] = corners;
        let start = self.vertices.len();
        // Row i has n + 1 - i vertices
        let index = |i: usize, j: usize| start + i * (n + 1) - i * i.saturating_sub(1) / 2 + j;
        for i in 0..=n {
            for j in 0..=(n - i) {
                let u = i as Float / n as Float;
                let v = j as Float / n as Float;
                self.vertices.push(a + (b - a) * u + (c - a) * v);
            }
        }
        for i in 0..n {
            for j in 0..(n - i) {
                self.push([index(i, j), index(i + 1, j), index(i, j + 1)]);
                if i + j + 1 < n {
                    self.push([index(i + 1, j), index(i + 1, j + 1), index(i, j + 1)]);
                }
            }
        }
    }

    fn finish(self) -> Result<Patch> {
        let mut patch = Patch::from_parts(self.positions, self.normals, self.weights)?;
        patch.vertices = self.vertices;
        patch.triangles = self.triangles;
        Ok(patch)
    }
}

fn discretize_quad(polygon: &Polygon, n: usize) -> Result<Patch> {
    let c = polygon.corners();
    let normal = polygon.normal();
    // Bilinear cells only tile convex quadrilaterals
    for i in 0..4 {
        let e0 = c[(i + 1) % 4] - c[i];
        let e1 = c[(i + 2) % 4] - c[(i + 1) % 4];
        if e0.cross(&e1).dot(&normal) <= 0.0 {
            return Err(Error::geometry(format!(
                "Quadrilateral {:?} is not convex",
                c
            )));
        }
    }

    let mut mesh = MeshBuilder::default();
    let nf = n as Float;
    for i in 0..=n {
        let u = i as Float / nf;
        for j in 0..=n {
            let v = j as Float / nf;
            let p = c[0] * ((1. - u) * (1. - v)) + c[1] * (u * (1. - v)) + c[2] * (u * v) + c[3] * ((1. - u) * v);
            mesh.vertices.push(p);
        }
    }
    let index = |i: usize, j: usize| i * (n + 1) + j;
    for i in 0..n {
        for j in 0..n {
            mesh.push([index(i, j), index(i + 1, j), index(i + 1, j + 1)]);
            mesh.push([index(i, j), index(i + 1, j + 1), index(i, j + 1)]);
        }
    }
    // The surface is flat, so use the exact normal
    let n_samples = mesh.normals.len();
    mesh.normals = vec![normal; n_samples];
    mesh.finish()
}

fn discretize_spherical(patch: &SphericalPatch, phi_steps: usize, theta_steps: usize) -> Patch {
    let centre = patch.sphere.centre();
    let r = patch.sphere.radius();
    let (p0, p1) = patch.polar;
    let (a0, a1) = patch.azimuth;
    let d_phi = (p1 - p0) / phi_steps as Float;
    let d_theta = (a1 - a0) / theta_steps as Float;
    let sign = if patch.inward { -1.0 } else { 1.0 };
    let radial = |phi: Float, theta: Float| {
        Vector3::new(phi.sin() * theta.cos(), phi.sin() * theta.sin(), phi.cos())
    };

    let n = phi_steps * theta_steps;
    let mut positions = Vec::with_capacity(n);
    let mut normals = Vec::with_capacity(n);
    let mut weights = Vec::with_capacity(n);
    for k in 0..phi_steps {
        let lower = p0 + k as Float * d_phi;
        let upper = lower + d_phi;
        let phi = lower + 0.5 * d_phi;
        let band = r * r * (lower.cos() - upper.cos()) * d_theta;
        for l in 0..theta_steps {
            let theta = a0 + (l as Float + 0.5) * d_theta;
            let dir = radial(phi, theta);
            positions.push(centre + dir * r);
            normals.push(dir * sign);
            weights.push(band);
        }
    }

    // Vertices and triangles, for export
    let mut vertices = Vec::with_capacity((phi_steps + 1) * (theta_steps + 1));
    for k in 0..=phi_steps {
        let phi = p0 + k as Float * d_phi;
        for l in 0..=theta_steps {
            let theta = a0 + l as Float * d_theta;
            vertices.push(centre + radial(phi, theta) * r);
        }
    }
    let index = |k: usize, l: usize| k * (theta_steps + 1) + l;
    let mut triangles = Vec::with_capacity(2 * n);
    let mut add = |tri: [usize; 3]| {
        let [a, b, c] = tri.map(|i| vertices[i]);
        if (b - a).cross(&(c - a)).norm() > 0.0 {
            if patch.inward {
                triangles.push([tri[0], tri[2], tri[1]]);
            } else {
                triangles.push(tri);
            }
        }
    };
    for k in 0..phi_steps {
        for l in 0..theta_steps {
            add([index(k, l), index(k + 1, l), index(k + 1, l + 1)]);
            add([index(k, l), index(k + 1, l + 1), index(k, l + 1)]);
        }
    }

    let total_area = weights.iter().sum();
    Patch {
        positions,
        normals,
        weights,
        total_area,
        vertices,
        triangles,
    }
}

#[cfg(test)]
mod testing {
    use super::*;
    use crate::geometry::Triangle;
    use approx::assert_relative_eq;

    fn square(size: Float, z: Float) -> Polygon {
        let h = size / 2.;
        Polygon::new(vec![
            Vector3::new(-h, -h, z),
            Vector3::new(h, -h, z),
            Vector3::new(h, h, z),
            Vector3::new(-h, h, z),
        ])
        .unwrap()
    }

    #[test]
    fn test_quad_grid() {
        let p = square(2., 0.);
        for n in [1, 3, 10] {
            let patch = discretize(&SurfaceSpec::Polygon(p.clone()), Resolution::Grid(n)).unwrap();
            assert_eq!(patch.vertices().len(), (n + 1) * (n + 1));
            assert_eq!(patch.triangles().len(), 2 * n * n);
            assert_eq!(patch.len(), 2 * n * n);
            assert_eq!(patch.weights().len(), patch.len());
            assert_eq!(patch.normals().len(), patch.len());
            assert_relative_eq!(patch.total_area(), 4.0, epsilon = 1e-9);
            let sum: Float = patch.weights().iter().sum();
            assert_relative_eq!(sum, 4.0, epsilon = 1e-9);
            for normal in patch.normals() {
                assert_relative_eq!(*normal, Vector3::new(0., 0., 1.));
            }
        }
    }

    #[test]
    fn test_skewed_quad_area() {
        // A trapezoid
        let p = Polygon::new(vec![
            Vector3::new(0., 0., 0.),
            Vector3::new(4., 0., 0.),
            Vector3::new(3., 2., 0.),
            Vector3::new(1., 2., 0.),
        ])
        .unwrap();
        let patch = discretize(&SurfaceSpec::Polygon(p), Resolution::Grid(7)).unwrap();
        assert_relative_eq!(patch.total_area(), 6.0, epsilon = 1e-9);
    }

    #[test]
    fn test_concave_quad_fails() {
        let p = Polygon::new(vec![
            Vector3::new(0., 0., 0.),
            Vector3::new(4., 0., 0.),
            Vector3::new(1., 1., 0.),
            Vector3::new(0., 4., 0.),
        ])
        .unwrap();
        let r = discretize(&SurfaceSpec::Polygon(p), Resolution::Grid(2));
        assert!(matches!(r, Err(Error::InvalidGeometry(_))));
    }

    #[test]
    fn test_triangle_grid() {
        let p = Polygon::new(vec![
            Vector3::new(0., 0., 0.),
            Vector3::new(3., 0., 0.),
            Vector3::new(0., 3., 0.),
        ])
        .unwrap();
        for n in [1, 2, 5] {
            let patch = discretize(&SurfaceSpec::Polygon(p.clone()), Resolution::Grid(n)).unwrap();
            assert_eq!(patch.len(), n * n);
            assert_eq!(patch.vertices().len(), (n + 1) * (n + 2) / 2);
            assert_relative_eq!(patch.total_area(), 4.5, epsilon = 1e-9);
            // All the same size
            for w in patch.weights() {
                assert_relative_eq!(*w, 4.5 / (n * n) as Float, epsilon = 1e-9);
            }
            for normal in patch.normals() {
                assert_relative_eq!(*normal, Vector3::new(0., 0., 1.), epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_mesh() {
        let t0 = Triangle::new(
            Vector3::new(0., 0., 0.),
            Vector3::new(1., 0., 0.),
            Vector3::new(0., 1., 0.),
        )
        .unwrap();
        let t1 = Triangle::new(
            Vector3::new(0., 0., 1.),
            Vector3::new(0., 1., 1.),
            Vector3::new(1., 0., 1.),
        )
        .unwrap();
        let mesh = TriangleMesh::new(vec![t0, t1]).unwrap();
        let patch = discretize(&SurfaceSpec::Mesh(mesh), Resolution::Grid(3)).unwrap();
        assert_eq!(patch.len(), 18);
        assert_relative_eq!(patch.total_area(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(patch.normals()[0], Vector3::new(0., 0., 1.), epsilon = 1e-12);
        assert_relative_eq!(patch.normals()[17], Vector3::new(0., 0., -1.), epsilon = 1e-12);
    }

    #[test]
    fn test_sphere() {
        let centre = Vector3::new(1., 2., 3.);
        let sphere = Sphere::new(centre, 2.0).unwrap();
        let spec = SurfaceSpec::Spherical(SphericalPatch::full(sphere, false));
        let patch = discretize(
            &spec,
            Resolution::Angular {
                phi_steps: 10,
                theta_steps: 20,
            },
        )
        .unwrap();
        assert_eq!(patch.len(), 200);
        assert_relative_eq!(patch.total_area(), sphere.area(), epsilon = 1e-9);
        for (p, n, _) in patch.samples() {
            assert_relative_eq!((p - centre).norm(), 2.0, epsilon = 1e-12);
            assert_relative_eq!((p - centre) / 2.0, *n, epsilon = 1e-12);
        }

        // Inwards
        let spec = SurfaceSpec::Spherical(SphericalPatch::full(sphere, true));
        let patch = discretize(
            &spec,
            Resolution::Angular {
                phi_steps: 4,
                theta_steps: 4,
            },
        )
        .unwrap();
        for (p, n, _) in patch.samples() {
            assert!((p - centre).dot(n) < 0.0);
        }
    }

    #[test]
    fn test_hemisphere_area() {
        let sphere = Sphere::new(Vector3::zeros(), 1.0).unwrap();
        let cap = SphericalPatch::new(sphere, (0.0, PI / 2.), (0.0, PI), false).unwrap();
        assert_relative_eq!(cap.area(), PI, epsilon = 1e-12);
        let patch = discretize(
            &SurfaceSpec::Spherical(cap),
            Resolution::Angular {
                phi_steps: 3,
                theta_steps: 5,
            },
        )
        .unwrap();
        assert_relative_eq!(patch.total_area(), PI, epsilon = 1e-12);
        assert!(SphericalPatch::new(sphere, (1.0, 0.5), (0.0, PI), false).is_err());
        assert!(SphericalPatch::new(sphere, (0.0, 1.0), (0.0, 3. * PI), false).is_err());
    }

    #[test]
    fn test_bad_resolutions() {
        let p = SurfaceSpec::Polygon(square(1., 0.));
        assert!(matches!(
            discretize(&p, Resolution::Grid(0)),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            discretize(
                &p,
                Resolution::Angular {
                    phi_steps: 2,
                    theta_steps: 2
                }
            ),
            Err(Error::InvalidArgument(_))
        ));
        let sphere = Sphere::new(Vector3::zeros(), 1.0).unwrap();
        let s = SurfaceSpec::Spherical(SphericalPatch::full(sphere, false));
        assert!(matches!(
            discretize(&s, Resolution::Grid(3)),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            discretize(
                &s,
                Resolution::Angular {
                    phi_steps: 0,
                    theta_steps: 2
                }
            ),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_from_parts() {
        let r = Patch::from_parts(
            vec![Vector3::zeros(), Vector3::x()],
            vec![Vector3::z()],
            vec![1., 1.],
        );
        assert!(matches!(r, Err(Error::InvalidGeometry(_))));

        let r = Patch::from_parts(vec![Vector3::zeros()], vec![Vector3::zeros()], vec![1.]);
        assert!(matches!(r, Err(Error::InvalidGeometry(_))));

        let p = Patch::with_uniform_weights(
            vec![Vector3::zeros(), Vector3::x(), Vector3::y(), Vector3::z()],
            vec![Vector3::new(0., 0., 2.); 4],
            8.0,
        )
        .unwrap();
        assert_relative_eq!(p.total_area(), 8.0);
        assert_relative_eq!(p.weights()[3], 2.0);
        assert_relative_eq!(p.normals()[0], Vector3::z());
    }

    #[test]
    fn test_transformed() {
        let patch = discretize(&SurfaceSpec::Polygon(square(2., 0.)), Resolution::Grid(2)).unwrap();
        let rotation = nalgebra::UnitQuaternion::from_axis_angle(&Vector3::x_axis(), PI / 2.);
        let iso = Isometry3::from_parts(
            nalgebra::Translation3::new(10., 0., 0.),
            rotation,
        );
        let moved = patch.transformed(&iso);
        assert_relative_eq!(moved.total_area(), patch.total_area());
        for n in moved.normals() {
            // +Z rotated 90 degrees around X is -Y
            assert_relative_eq!(*n, Vector3::new(0., -1., 0.), epsilon = 1e-12);
        }
        for p in moved.positions() {
            assert!(p.x > 9.0 && p.x < 11.0);
        }

        let shifted = patch.translated(Vector3::new(0., 0., 5.));
        assert_relative_eq!(shifted.positions()[0].z, 5.0);
        assert_eq!(shifted.normals(), patch.normals());
    }
}
