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

use crate::geometry::Vector3;
use crate::{Error, Float, Result, PI};
use nalgebra::Isometry3;
use serde::{Deserialize, Serialize};

/// Mean radius of the Earth, in km
pub const EARTH_RADIUS_KM: Float = 6371.0;

/// Standard gravitational parameter of the Earth, in km3/s2
pub const EARTH_MU_KM3_S2: Float = 398600.4418;

/// The constants that define a circular orbit around a spherical planet.
///
/// Units are up to the caller, but they must be consistent (e.g., km and
/// km3/s2 give periods in seconds). If `period` is given, it takes precedence
/// over `gravitational_parameter`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitConfig {
    /// Radius of the planet
    pub planet_radius: Float,

    /// Height of the orbit above the surface of the planet
    pub altitude: Float,

    /// Standard gravitational parameter (i.e., G times the mass) of the planet
    #[serde(default)]
    pub gravitational_parameter: Option<Float>,

    /// The period of the orbit, if known.
    #[serde(default)]
    pub period: Option<Float>,
}

impl OrbitConfig {
    /// A circular orbit around the Earth, at `altitude` km
    pub fn earth(altitude: Float) -> Self {
        Self {
            planet_radius: EARTH_RADIUS_KM,
            altitude,
            gravitational_parameter: Some(EARTH_MU_KM3_S2),
            period: None,
        }
    }
}

/// A circular orbit in the XY plane, centred at the origin and
/// starting on the +X axis at time zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Orbit {
    radius: Float,
    period: Float,
    angular_velocity: Float,
}

/// Where the satellite is at a certain time
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrbitState {
    /// The time
    pub time: Float,
    /// Angular position, within `[0, 2 PI)`
    pub angle: Float,
    /// Position of the satellite
    pub position: Vector3,
}

impl Orbit {
    /// Builds an orbit from its constants. The radius of the orbit is the
    /// radius of the planet plus the altitude; the period is calculated with
    /// Kepler's third law unless it is given.
    pub fn new(config: &OrbitConfig) -> Result<Self> {
        let OrbitConfig {
            planet_radius,
            altitude,
            gravitational_parameter,
            period,
        } = *config;
        if !planet_radius.is_finite() || planet_radius <= 0.0 {
            return Err(Error::argument(format!(
                "The planet radius must be positive... found {}",
                planet_radius
            )));
        }
        if !altitude.is_finite() || altitude < 0.0 {
            return Err(Error::argument(format!(
                "The altitude must be zero or positive... found {}",
                altitude
            )));
        }
        let radius = planet_radius + altitude;
        let period = match (period, gravitational_parameter) {
            (Some(p), _) => p,
            (None, Some(mu)) => {
                if !mu.is_finite() || mu <= 0.0 {
                    return Err(Error::argument(format!(
                        "The gravitational parameter must be positive... found {}",
                        mu
                    )));
                }
                2. * PI * (radius.powi(3) / mu).sqrt()
            }
            (None, None) => {
                return Err(Error::argument(
                    "An orbit needs either a period or a gravitational parameter",
                ))
            }
        };
        Self::from_period(radius, period)
    }

    /// Builds an orbit of radius `radius` (measured from the centre of
    /// the planet) that takes `period` to complete.
    pub fn from_period(radius: Float, period: Float) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(Error::argument(format!(
                "The orbit radius must be positive... found {}",
                radius
            )));
        }
        if !period.is_finite() || period <= 0.0 {
            return Err(Error::argument(format!(
                "The orbital period must be positive... found {}",
                period
            )));
        }
        Ok(Self {
            radius,
            period,
            angular_velocity: 2. * PI / period,
        })
    }

    /// Distance from the centre of the planet
    pub fn radius(&self) -> Float {
        self.radius
    }

    /// Time to complete one orbit
    pub fn period(&self) -> Float {
        self.period
    }

    /// Radians per unit of time
    pub fn angular_velocity(&self) -> Float {
        self.angular_velocity
    }

    /// Angular position at time `t`, wrapped into `[0, 2 PI)`
    pub fn angle_at(&self, t: Float) -> Float {
        let angle = (self.angular_velocity * t).rem_euclid(2. * PI);
        // rem_euclid can round up to the modulus itself
        if angle >= 2. * PI {
            0.0
        } else {
            angle
        }
    }

    /// Position of the satellite at time `t`
    pub fn position_at(&self, t: Float) -> Vector3 {
        let angle = self.angle_at(t);
        Vector3::new(self.radius * angle.cos(), self.radius * angle.sin(), 0.0)
    }

    /// Time, angle and position at time `t`
    pub fn state_at(&self, t: Float) -> OrbitState {
        let angle = self.angle_at(t);
        OrbitState {
            time: t,
            angle,
            position: Vector3::new(self.radius * angle.cos(), self.radius * angle.sin(), 0.0),
        }
    }
}

/// How the body frame of the satellite is oriented as it moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attitude {
    /// The body axes stay parallel to the inertial axes. This is what
    /// a sun-pointing panel looks like.
    #[default]
    Fixed,

    /// The body frame rotates about +Z with the orbit, so that the body +X
    /// axis always points away from the planet (i.e., towards the zenith).
    NadirLocked,
}

impl Attitude {
    /// The transformation from the body frame to the inertial frame, for a
    /// satellite at `state`
    pub fn transform(&self, state: &OrbitState) -> Isometry3<Float> {
        match self {
            Attitude::Fixed => Isometry3::new(state.position, Vector3::zeros()),
            Attitude::NadirLocked => {
                Isometry3::new(state.position, Vector3::new(0.0, 0.0, state.angle))
            }
        }
    }
}

/// The times at which an orbit is evaluated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeGrid {
    /// `count` equally spaced times from zero to one period, both included
    Steps {
        /// Number of times
        count: usize,
    },
    /// From zero (included) to one period (excluded), every `dt`
    Step {
        /// Time step
        dt: Float,
    },
    /// `count` equally spaced times from `start` to `end`, both included
    Span {
        /// First time
        start: Float,
        /// Last time
        end: Float,
        /// Number of times
        count: usize,
    },
    /// Explicit times, in any order. They are evaluated (and returned) sorted.
    Times(Vec<Float>),
}

impl TimeGrid {
    /// Expands the grid into the list of times to evaluate in `orbit`
    pub fn times(&self, orbit: &Orbit) -> Result<Vec<Float>> {
        match self {
            TimeGrid::Steps { count } => linspace(0.0, orbit.period(), *count),
            TimeGrid::Step { dt } => {
                let dt = *dt;
                if !dt.is_finite() || dt <= 0.0 {
                    return Err(Error::argument(format!(
                        "The time step must be positive... found {}",
                        dt
                    )));
                }
                let period = orbit.period();
                let n = (period / dt).ceil() as usize;
                Ok((0..n)
                    .map(|i| i as Float * dt)
                    .filter(|t| *t < period)
                    .collect())
            }
            TimeGrid::Span { start, end, count } => {
                if !start.is_finite() || !end.is_finite() || end < start {
                    return Err(Error::argument(format!(
                        "A time span must go forward... found {} to {}",
                        start, end
                    )));
                }
                linspace(*start, *end, *count)
            }
            TimeGrid::Times(times) => {
                if let Some(t) = times.iter().find(|t| !t.is_finite()) {
                    return Err(Error::argument(format!("Time {} is not finite", t)));
                }
                let mut times = times.clone();
                times.sort_by(|a, b| a.total_cmp(b));
                Ok(times)
            }
        }
    }
}

fn linspace(start: Float, end: Float, count: usize) -> Result<Vec<Float>> {
    match count {
        0 => Err(Error::argument("At least one time step is needed")),
        1 => Ok(vec![start]),
        _ => {
            let delta = (end - start) / (count - 1) as Float;
            Ok((0..count)
                .map(|i| {
                    if i == count - 1 {
                        end
                    } else {
                        start + i as Float * delta
                    }
                })
                .collect())
        }
    }
}
