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

use crate::discretize::{discretize, Patch, Resolution, SphericalPatch, SurfaceSpec};
use crate::geometry::{Polygon, Sphere, TriangleMesh, Vector3};
use crate::intersect::{EngineOptions, Occluder};
use crate::model::{Evaluation, OrbitModel};
use crate::orbit::{Attitude, Orbit, OrbitConfig, TimeGrid};
use crate::solar_surface::Light;
use crate::time_series::TimeSeries;
use crate::{Float, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A surface, as written in a configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceConfig {
    /// A flat triangle or quadrilateral, given by its corners
    Polygon(Vec<Vector3>),

    /// A whole sphere
    Sphere {
        /// Centre
        centre: Vector3,
        /// Radius
        radius: Float,
        /// Whether the normals point towards the centre
        #[serde(default)]
        inward: bool,
    },

    /// An indexed triangle mesh
    Mesh {
        /// Vertices
        vertices: Vec<Vector3>,
        /// Three vertex indices per triangle
        faces: Vec<[usize; 3]>,
    },
}

impl SurfaceConfig {
    /// Checks the geometry and turns it into something that can be discretized
    pub fn to_spec(&self) -> Result<SurfaceSpec> {
        match self {
            SurfaceConfig::Polygon(corners) => Ok(SurfaceSpec::Polygon(Polygon::new(corners.clone())?)),
            SurfaceConfig::Sphere {
                centre,
                radius,
                inward,
            } => Ok(SurfaceSpec::Spherical(SphericalPatch::full(
                Sphere::new(*centre, *radius)?,
                *inward,
            ))),
            SurfaceConfig::Mesh { vertices, faces } => {
                Ok(SurfaceSpec::Mesh(TriangleMesh::from_indexed(vertices, faces)?))
            }
        }
    }

    /// Discretizes the surface
    pub fn to_patch(&self, resolution: Resolution) -> Result<Patch> {
        discretize(&self.to_spec()?, resolution)
    }
}

/// An occluding body, as written in a configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OccluderConfig {
    /// The planet of the orbit, a sphere at the origin
    Planet,
    /// Any other sphere
    Sphere {
        /// Centre
        centre: Vector3,
        /// Radius
        radius: Float,
    },
    /// An indexed triangle mesh
    Mesh {
        /// Vertices
        vertices: Vec<Vector3>,
        /// Three vertex indices per triangle
        faces: Vec<[usize; 3]>,
    },
}

impl OccluderConfig {
    fn build(&self, orbit: &OrbitConfig) -> Result<Occluder> {
        match self {
            OccluderConfig::Planet => Ok(Sphere::new(Vector3::zeros(), orbit.planet_radius)?.into()),
            OccluderConfig::Sphere { centre, radius } => Ok(Sphere::new(*centre, *radius)?.into()),
            OccluderConfig::Mesh { vertices, faces } => {
                Ok(TriangleMesh::from_indexed(vertices, faces)?.into())
            }
        }
    }
}

/// What to calculate at each time step, as written in a configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationConfig {
    /// Illuminated fraction of the surface
    Illumination {
        /// The light source
        light: Light,
        /// What casts shadows
        #[serde(default)]
        occluder: Option<OccluderConfig>,
    },

    /// View factor to a fixed surface
    ViewFactor {
        /// The target surface, in the inertial frame
        target: SurfaceConfig,
        /// How finely to discretize the target
        resolution: Resolution,
        /// What stands in between
        #[serde(default)]
        occluder: Option<OccluderConfig>,
    },

    /// View factor to the planet, by ray sampling
    PlanetViewFactor {
        /// Rays per sample of the surface
        rays_per_sample: usize,
        /// Seed of the random number generators
        #[serde(default)]
        seed: u64,
    },
}

/// Everything needed to run an orbital sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// The orbit
    pub orbit: OrbitConfig,

    /// The surface of the satellite, in its body frame
    pub surface: SurfaceConfig,

    /// How finely to discretize the surface
    pub resolution: Resolution,

    /// How the satellite is oriented
    #[serde(default)]
    pub attitude: Attitude,

    /// What to calculate
    pub evaluation: EvaluationConfig,

    /// When to calculate it
    pub time_grid: TimeGrid,

    /// Numerical tolerances
    #[serde(default)]
    pub options: EngineOptions,
}

impl RunConfig {
    /// Reads a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parses a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validates everything and builds the model and the evaluation
    pub fn build(&self) -> Result<(OrbitModel, Evaluation)> {
        let orbit = Orbit::new(&self.orbit)?;
        let surface = self.surface.to_patch(self.resolution)?;
        let model = OrbitModel::new(orbit, surface, self.attitude, self.options)?;

        let occluder = |o: &Option<OccluderConfig>| -> Result<Option<Occluder>> {
            o.as_ref().map(|o| o.build(&self.orbit)).transpose()
        };
        let evaluation = match &self.evaluation {
            EvaluationConfig::Illumination { light, occluder: o } => Evaluation::Illumination {
                light: light.validated()?,
                occluder: occluder(o)?,
            },
            EvaluationConfig::ViewFactor {
                target,
                resolution,
                occluder: o,
            } => Evaluation::ViewFactor {
                target: target.to_patch(*resolution)?,
                occluder: occluder(o)?,
            },
            EvaluationConfig::PlanetViewFactor {
                rays_per_sample,
                seed,
            } => Evaluation::PlanetViewFactor {
                planet: OccluderConfig::Planet.build(&self.orbit)?,
                rays_per_sample: *rays_per_sample,
                seed: *seed,
            },
        };
        Ok((model, evaluation))
    }

    /// Builds and runs the sweep
    pub fn run(&self) -> Result<TimeSeries> {
        let (model, evaluation) = self.build()?;
        model.run(&self.time_grid, &evaluation)
    }
}

#[cfg(test)]
mod testing {
    use super::*;
    use crate::Error;
    use approx::assert_abs_diff_eq;

    const SUN_FACING_PANEL: &str = r#"{
        // Low Earth orbit, in km
        orbit: {
            planet_radius: 6371.0,
            altitude: 300.0,
            gravitational_parameter: 398600.4418,
        },
        // A 1 m2 panel facing +X
        surface: {
            polygon: [
                [0.0, -0.0005, -0.0005],
                [0.0, 0.0005, -0.0005],
                [0.0, 0.0005, 0.0005],
                [0.0, -0.0005, 0.0005],
            ],
        },
        resolution: { grid: 2 },
        evaluation: {
            illumination: {
                light: { directional: [1.0, 0.0, 0.0] },
                occluder: "planet",
            },
        },
        time_grid: { steps: { count: 3 } },
        options: { surface_offset: 0.00001 },
    }"#;

    #[test]
    fn test_parse() {
        let config: RunConfig = json5::from_str(SUN_FACING_PANEL).unwrap();
        assert_eq!(config.attitude, Attitude::Fixed);
        assert_eq!(config.resolution, Resolution::Grid(2));
        assert_eq!(config.time_grid, TimeGrid::Steps { count: 3 });
        assert_eq!(config.options.epsilon, EngineOptions::default().epsilon);
        assert_eq!(config.options.surface_offset, 0.00001);
        assert_eq!(config.orbit.period, None);
        assert!(matches!(
            config.evaluation,
            EvaluationConfig::Illumination {
                occluder: Some(OccluderConfig::Planet),
                ..
            }
        ));

        // Round trip through plain JSON
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(RunConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_run() {
        let config: RunConfig = json5::from_str(SUN_FACING_PANEL).unwrap();
        let series = config.run().unwrap();
        let v = series.values();
        // Start in the sun, half an orbit later in the shadow, then back.
        assert_abs_diff_eq!(v[0], 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(v[1], 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(v[2], 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_invalid() {
        let mut config: RunConfig = json5::from_str(SUN_FACING_PANEL).unwrap();
        config.orbit.altitude = -5.0;
        assert!(matches!(config.build(), Err(Error::InvalidArgument(_))));

        let mut config: RunConfig = json5::from_str(SUN_FACING_PANEL).unwrap();
        config.surface = SurfaceConfig::Polygon(vec![Vector3::zeros(); 3]);
        assert!(matches!(config.build(), Err(Error::InvalidGeometry(_))));

        assert!(matches!(
            RunConfig::from_json("{ not json"),
            Err(Error::Json(_))
        ));
        assert!(matches!(
            RunConfig::from_file("./this/file/does/not/exist.json"),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_view_factor_config() {
        let config: RunConfig = json5::from_str(
            r#"{
            orbit: { planet_radius: 1.0, altitude: 1.0, period: 10.0 },
            surface: { sphere: { centre: [0, 0, 0], radius: 0.1 } },
            resolution: { angular: { phi_steps: 6, theta_steps: 12 } },
            attitude: "nadir_locked",
            evaluation: {
                view_factor: {
                    target: { sphere: { centre: [0, 0, 0], radius: 10.0, inward: true } },
                    resolution: { angular: { phi_steps: 24, theta_steps: 48 } },
                }
            },
            time_grid: { times: [0.0] },
        }"#,
        )
        .unwrap();
        let series = config.run().unwrap();
        // A small sphere inside a big one sees nothing but the big one
        assert_abs_diff_eq!(series.values()[0], 1.0, epsilon = 0.05);
    }
}
