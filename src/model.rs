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
use crate::intersect::{EngineOptions, Occluder};
use crate::numeric::UNIT_RANGE_TOLERANCE;
use crate::orbit::{Attitude, Orbit, OrbitState, TimeGrid};
use crate::planet_view::planet_view_factor;
use crate::solar_surface::{illuminated_fraction, illuminated_fraction_point_source, Light};
use crate::time_series::{TimeSample, TimeSeries};
use crate::view_factor::view_factor;
use crate::{Float, Result};
use std::sync::atomic::{AtomicBool, Ordering};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Something that produces one value per time step, given the surface
/// of the satellite (already placed in the inertial frame) and its state.
pub trait StepEvaluator: Sync {
    /// Calculates the value for a single step
    fn evaluate(
        &self,
        surface: &Patch,
        state: &OrbitState,
        options: &EngineOptions,
    ) -> Result<Float>;
}

impl<F> StepEvaluator for F
where
    F: Fn(&Patch, &OrbitState, &EngineOptions) -> Result<Float> + Sync,
{
    fn evaluate(
        &self,
        surface: &Patch,
        state: &OrbitState,
        options: &EngineOptions,
    ) -> Result<Float> {
        self(surface, state, options)
    }
}

/// The built-in quantities that can be calculated along an orbit. Everything
/// here (lights, targets, occluders) is expressed in the inertial frame.
#[derive(Debug, Clone)]
pub enum Evaluation {
    /// Fraction of the surface that is lit
    Illumination {
        /// The light
        light: Light,
        /// The body casting shadows (usually, the planet)
        occluder: Option<Occluder>,
    },

    /// View factor from the surface of the satellite to a fixed `target`
    ViewFactor {
        /// The surface that receives the radiation
        target: Patch,
        /// Something standing in between
        occluder: Option<Occluder>,
    },

    /// View factor from the surface of the satellite to the planet, by ray sampling
    PlanetViewFactor {
        /// The planet
        planet: Occluder,
        /// Number of rays cast from each sample
        rays_per_sample: usize,
        /// Seed of the random number generators
        seed: u64,
    },
}

impl StepEvaluator for Evaluation {
    fn evaluate(
        &self,
        surface: &Patch,
        _state: &OrbitState,
        options: &EngineOptions,
    ) -> Result<Float> {
        match self {
            Evaluation::Illumination { light, occluder } => match light {
                Light::Directional(direction) => {
                    illuminated_fraction(surface, *direction, occluder.as_ref(), options)
                }
                Light::Point(position) => {
                    illuminated_fraction_point_source(surface, *position, occluder.as_ref(), options)
                }
            },
            Evaluation::ViewFactor { target, occluder } => {
                view_factor(surface, target, occluder.as_ref(), options)
            }
            Evaluation::PlanetViewFactor {
                planet,
                rays_per_sample,
                seed,
            } => planet_view_factor(surface, planet, *rays_per_sample, *seed, options),
        }
    }
}

/// A surface flying along an orbit.
///
/// The surface is discretized once, in the body frame of the satellite,
/// and moved to its position (and orientation) at every time step.
#[derive(Debug, Clone)]
pub struct OrbitModel {
    orbit: Orbit,
    surface: Patch,
    attitude: Attitude,
    options: EngineOptions,
}

impl OrbitModel {
    /// Creates a new model. `surface` is in the body frame of the satellite.
    pub fn new(
        orbit: Orbit,
        surface: Patch,
        attitude: Attitude,
        options: EngineOptions,
    ) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            orbit,
            surface,
            attitude,
            options,
        })
    }

    /// The orbit
    pub fn orbit(&self) -> &Orbit {
        &self.orbit
    }

    /// The surface, in the body frame
    pub fn surface(&self) -> &Patch {
        &self.surface
    }

    /// Places the satellite at time `t`, returning its state and its surface
    /// in the inertial frame
    pub fn march(&self, t: Float) -> (OrbitState, Patch) {
        let state = self.orbit.state_at(t);
        let surface = self.surface.transformed(&self.attitude.transform(&state));
        (state, surface)
    }

    fn step<E: StepEvaluator + ?Sized>(
        &self,
        index: usize,
        t: Float,
        evaluator: &E,
    ) -> Result<TimeSample> {
        let (state, surface) = self.march(t);
        let value = evaluator.evaluate(&surface, &state, &self.options)?;
        log::debug!(
            "Step {} (t = {}, angle = {}) => {}",
            index,
            t,
            state.angle,
            value
        );
        Ok(TimeSample { time: t, value })
    }

    /// Evaluates `evaluator` at every time in `grid`.
    ///
    /// The result has one sample per time, sorted by time, whether
    /// the steps are calculated in parallel or not.
    pub fn run<E: StepEvaluator + ?Sized>(&self, grid: &TimeGrid, evaluator: &E) -> Result<TimeSeries> {
        self.run_with_cancel(grid, evaluator, &AtomicBool::new(false))
    }

    /// Like [`OrbitModel::run`], but no new steps are started once `cancel`
    /// is set. The steps that completed before the first one that was not
    /// started are returned.
    pub fn run_with_cancel<E: StepEvaluator + ?Sized>(
        &self,
        grid: &TimeGrid,
        evaluator: &E,
        cancel: &AtomicBool,
    ) -> Result<TimeSeries> {
        let times = grid.times(&self.orbit)?;
        log::info!(
            "Running {} steps over an orbit of radius {} and period {}",
            times.len(),
            self.orbit.radius(),
            self.orbit.period()
        );

        let step = |i: usize| -> Option<Result<TimeSample>> {
            if cancel.load(Ordering::Relaxed) {
                return None;
            }
            Some(self.step(i, times[i], evaluator))
        };

        #[cfg(feature = "parallel")]
        let results: Vec<Option<Result<TimeSample>>> =
            (0..times.len()).into_par_iter().map(step).collect();
        #[cfg(not(feature = "parallel"))]
        let results: Vec<Option<Result<TimeSample>>> = (0..times.len()).map(step).collect();

        let mut samples = Vec::with_capacity(results.len());
        for r in results {
            match r {
                Some(sample) => samples.push(sample?),
                None => break,
            }
        }
        if samples.len() < times.len() {
            log::info!("Cancelled after {} of {} steps", samples.len(), times.len());
        }

        let series = TimeSeries::new(samples);
        let out = series.out_of_range(UNIT_RANGE_TOLERANCE);
        if !out.is_empty() {
            log::warn!("{} values fall outside of [0, 1]", out.len());
        }
        Ok(series)
    }
}
