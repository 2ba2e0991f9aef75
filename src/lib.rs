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

#![deny(missing_docs)]

//! Estimates how much light reaches a satellite surface, and how surfaces "see"
//! each other, while the satellite travels along a circular orbit. It is responsible for:
//!
//! * **Calculating the illuminated fraction of a surface**: A surface is discretized into weighted
//! samples and a ray is cast from each one of them towards the light (directional or point). A sample is
//! lit when it faces the light and the ray does not hit the occluder (e.g., the planet).
//! * **Calculating view factors between surfaces**: The classical double-area integral is approximated by a
//! double summation over the samples of both surfaces, optionally checking that a third body
//! does not block the line of sight between each pair.
//! * **Sweeping an orbit**: The satellite is moved along a circular orbit (period given by Kepler's third law) and
//! the quantities above are re-evaluated at each time step, producing a time series. With the `parallel`
//! feature, time steps (and the outer loop of the view factor calculation) are distributed with `rayon`.

/// The kind of Floating point number used in the
/// library... the `"float"` feature means it becomes `f32`
/// and `f64` is used otherwise.
#[cfg(feature = "float")]
pub type Float = f32;
/// Well, Pi.
#[cfg(feature = "float")]
pub const PI: Float = std::f32::consts::PI;

/// The kind of Floating point number used in the
/// library... the `"float"` feature means it becomes `f32`
/// and `f64` is used otherwise.
#[cfg(not(feature = "float"))]
pub type Float = f64;

/// Well, Pi.
#[cfg(not(feature = "float"))]
pub const PI: Float = std::f64::consts::PI;

/// Summation and range checks shared by the evaluators
pub mod numeric;

/// Errors produced when building geometry or validating inputs
pub mod error;
pub use error::{Error, Result};

/// Vectors, rays, spheres, triangles, polygons and meshes.
pub mod geometry;
pub use geometry::{Polygon, Ray3D, Sphere, Triangle, TriangleMesh, Vector3};

/// Ray-occluder intersection tests
pub mod intersect;
pub use intersect::{intersects, segment_blocked, EngineOptions, Intersect, Occluder};

/// Turns surfaces into weighted samples
pub mod discretize;
pub use discretize::{discretize, Patch, Resolution, SurfaceSpec};

/// Illuminated fraction of discretized surfaces
pub mod solar_surface;
pub use solar_surface::{
    illuminated_area, illuminated_fraction, illuminated_fraction_point_source, Light,
};

/// Double-summation view factors
pub mod view_factor;
pub use view_factor::{view_factor, view_factor_report, ViewFactorReport};

/// View factors between named surfaces
pub mod optical_info;
pub use optical_info::ViewFactorTable;

/// View factor towards an occluding body, estimated by ray sampling
pub mod planet_view;
pub use planet_view::planet_view_factor;

/// Circular orbit kinematics
pub mod orbit;
pub use orbit::{Attitude, Orbit, OrbitConfig, OrbitState, TimeGrid};

/// Ordered results of an orbital sweep
pub mod time_series;
pub use time_series::{TimeSample, TimeSeries};

/// A model that sweeps an orbit, evaluating illumination or
/// view factors at every step.
pub mod model;
pub use model::{Evaluation, OrbitModel, StepEvaluator};

/// Run configuration, as read by the `orbit_light` binary
pub mod config;
pub use config::RunConfig;
