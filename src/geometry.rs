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

use crate::{Error, Float, Result};
use serde::Serialize;

/// A triple of floating point numbers. Used for positions, directions
/// and normals alike.
pub type Vector3 = nalgebra::Vector3<Float>;

/// Returns a unit-length copy of `v`, failing if `v` has zero
/// (or non-finite) length.
pub fn unit_direction(v: Vector3, what: &str) -> Result<Vector3> {
    let length = v.norm();
    if !length.is_finite() || length <= Float::EPSILON {
        return Err(Error::argument(format!(
            "{} must have a finite, non-zero length... found {:?}",
            what, v
        )));
    }
    Ok(v / length)
}

/// Gets a unit vector perpendicular to `v`, which must not be zero.
pub fn perpendicular(v: &Vector3) -> Vector3 {
    // Cross with the axis that is "least aligned" with v
    let axis = if v.x.abs() <= v.y.abs() && v.x.abs() <= v.z.abs() {
        Vector3::x()
    } else if v.y.abs() <= v.z.abs() {
        Vector3::y()
    } else {
        Vector3::z()
    };
    v.cross(&axis).normalize()
}

/// A ray with an origin and a unit-length direction
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ray3D {
    /// Where the ray starts
    pub origin: Vector3,
    /// Where the ray goes. Always unit-length.
    pub direction: Vector3,
}

impl Ray3D {
    /// Creates a new ray, normalizing its direction.
    ///
    /// Fails with [`Error::InvalidArgument`] if `direction` has zero length.
    pub fn new(origin: Vector3, direction: Vector3) -> Result<Self> {
        let direction = unit_direction(direction, "Ray direction")?;
        Ok(Self { origin, direction })
    }

    /// The point at a parametric distance `t` from the origin
    pub fn project(&self, t: Float) -> Vector3 {
        self.origin + self.direction * t
    }
}

/// A sphere. Both a potential occluder (i.e., the planet) and
/// a curved surface that can be discretized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sphere {
    centre: Vector3,
    radius: Float,
}

impl Sphere {
    /// Creates a new Sphere. The radius must be positive.
    pub fn new(centre: Vector3, radius: Float) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(Error::geometry(format!(
                "Sphere radius must be positive... found {}",
                radius
            )));
        }
        Ok(Self { centre, radius })
    }

    /// The centre of the sphere
    pub fn centre(&self) -> Vector3 {
        self.centre
    }

    /// The radius of the sphere
    pub fn radius(&self) -> Float {
        self.radius
    }

    /// The surface area of the sphere
    pub fn area(&self) -> Float {
        4.0 * crate::PI * self.radius * self.radius
    }
}

/// A flat triangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Triangle {
    vertices: [Vector3; 3],
    normal: Vector3,
    area: Float,
}

impl Triangle {
    /// Builds a triangle from three vertices. The normal follows the right hand
    /// rule (`(b - a) x (c - a)`).
    ///
    /// Collinear or coincident vertices yield an [`Error::InvalidGeometry`]
    pub fn new(a: Vector3, b: Vector3, c: Vector3) -> Result<Self> {
        let cross = (b - a).cross(&(c - a));
        let double_area = cross.norm();
        let longest = (b - a).norm().max((c - b).norm()).max((a - c).norm());
        if !double_area.is_finite() || double_area <= Float::EPSILON * longest * longest {
            return Err(Error::geometry(format!(
                "Degenerate triangle [{:?}, {:?}, {:?}]",
                a, b, c
            )));
        }
        Ok(Self {
            vertices: [a, b, c],
            normal: cross / double_area,
            area: 0.5 * double_area,
        })
    }

    /// The three vertices
    pub fn vertices(&self) -> &[Vector3; 3] {
        &self.vertices
    }

    /// The unit normal
    pub fn normal(&self) -> Vector3 {
        self.normal
    }

    /// The area of the triangle
    pub fn area(&self) -> Float {
        self.area
    }

    /// The centroid (i.e., the average of the vertices)
    pub fn centroid(&self) -> Vector3 {
        (self.vertices[0] + self.vertices[1] + self.vertices[2]) / 3.0
    }
}

/// A flat patch with three or four corners
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polygon {
    corners: Vec<Vector3>,
    normal: Vector3,
    area: Float,
}

impl Polygon {
    /// Builds a triangular or quadrilateral flat patch.
    ///
    /// Both the normal and the area come from the vector form of the shoelace
    /// formula (i.e., `0.5 * |sum(p_i x p_(i+1))|`), so the normal follows the
    /// right-hand rule on the corners' order. Fails if there are not three or four
    /// corners, if they are collinear, or if a quadrilateral is not planar.
    pub fn new(corners: Vec<Vector3>) -> Result<Self> {
        if corners.len() != 3 && corners.len() != 4 {
            return Err(Error::geometry(format!(
                "Polygons need three or four corners... found {}",
                corners.len()
            )));
        }
        let n = corners.len();
        let mut shoelace = Vector3::zeros();
        let mut longest: Float = 0.0;
        for i in 0..n {
            let a = corners[i];
            let b = corners[(i + 1) % n];
            shoelace += a.cross(&b);
            longest = longest.max((b - a).norm());
        }
        let double_area = shoelace.norm();
        if !double_area.is_finite() || double_area <= Float::EPSILON * longest * longest {
            return Err(Error::geometry(format!(
                "Polygon {:?} has collinear corners or zero area",
                corners
            )));
        }
        let normal = shoelace / double_area;

        // All corners must be on the same plane
        let tolerance = 1e-6 * longest;
        for c in corners.iter().skip(1) {
            let off_plane = (c - corners[0]).dot(&normal);
            if off_plane.abs() > tolerance {
                return Err(Error::geometry(format!(
                    "Polygon {:?} is not planar",
                    corners
                )));
            }
        }

        Ok(Self {
            corners,
            normal,
            area: 0.5 * double_area,
        })
    }

    /// The corners, in the order they were given
    pub fn corners(&self) -> &[Vector3] {
        &self.corners
    }

    /// The unit normal
    pub fn normal(&self) -> Vector3 {
        self.normal
    }

    /// The area
    pub fn area(&self) -> Float {
        self.area
    }
}

/// A list of triangles. Used as a general occluder and as
/// an already-discretized surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriangleMesh {
    triangles: Vec<Triangle>,
}

impl TriangleMesh {
    /// Creates a mesh from a list of triangles, which must not be empty
    pub fn new(triangles: Vec<Triangle>) -> Result<Self> {
        if triangles.is_empty() {
            return Err(Error::geometry("A mesh needs at least one triangle"));
        }
        Ok(Self { triangles })
    }

    /// Creates a mesh from a list of vertices and faces indexing them
    pub fn from_indexed(vertices: &[Vector3], faces: &[[usize; 3]]) -> Result<Self> {
        let mut triangles = Vec::with_capacity(faces.len());
        for (i, face) in faces.iter().enumerate() {
            if let Some(bad) = face.iter().find(|&&v| v >= vertices.len()) {
                return Err(Error::geometry(format!(
                    "Face {} refers to vertex {}, but there are only {} vertices",
                    i,
                    bad,
                    vertices.len()
                )));
            }
            triangles.push(Triangle::new(
                vertices[face[0]],
                vertices[face[1]],
                vertices[face[2]],
            )?);
        }
        Self::new(triangles)
    }

    /// The triangles in the mesh
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// The sum of the areas of all triangles
    pub fn area(&self) -> Float {
        self.triangles.iter().map(|t| t.area()).sum()
    }
}
