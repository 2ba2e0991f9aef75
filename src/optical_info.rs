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
use crate::view_factor::view_factor;
use crate::{Error, Float, Result};
use serde::Serialize;

/// View factors between every pair of a set of named surfaces.
///
/// `F(i->j)` is calculated for `i <= j`; `F(j->i)` comes from
/// reciprocity (`A_i F(i->j) = A_j F(j->i)`), which holds exactly for the
/// discretized double summation. The diagonal is calculated too, as concave
/// surfaces (e.g., an inward-facing enclosure) see themselves.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewFactorTable {
    /// The names of the surfaces, in order
    names: Vec<String>,

    /// Row-major: the element `i * n + j` is `F(i->j)`
    factors: Vec<Float>,
}

impl ViewFactorTable {
    /// Calculates the view factors between all `surfaces`, each identified by
    /// a unique name.
    pub fn new(
        surfaces: &[(&str, &Patch)],
        occluder: Option<&Occluder>,
        options: &EngineOptions,
    ) -> Result<Self> {
        let n = surfaces.len();
        for (i, (name, _)) in surfaces.iter().enumerate() {
            if surfaces[..i].iter().any(|(other, _)| other == name) {
                return Err(Error::argument(format!(
                    "Surface name '{}' is used more than once",
                    name
                )));
            }
        }

        let mut factors = vec![0.0; n * n];
        for i in 0..n {
            let (from_name, from) = surfaces[i];
            let f = view_factor(from, from, occluder, options)?;
            log::debug!("F({} -> {}) = {}", from_name, from_name, f);
            factors[i * n + i] = f;
            for j in (i + 1)..n {
                let (to_name, to) = surfaces[j];
                let f = view_factor(from, to, occluder, options)?;
                log::debug!("F({} -> {}) = {}", from_name, to_name, f);
                factors[i * n + j] = f;
                factors[j * n + i] = f * from.total_area() / to.total_area();
            }
        }

        Ok(Self {
            names: surfaces.iter().map(|(name, _)| name.to_string()).collect(),
            factors,
        })
    }

    /// The names of the surfaces
    pub fn names(&self) -> &[String] {
        &self.names
    }

    fn index(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// The view factor from surface `from` to surface `to`
    pub fn get(&self, from: &str, to: &str) -> Option<Float> {
        let i = self.index(from)?;
        let j = self.index(to)?;
        Some(self.factors[i * self.names.len() + j])
    }

    /// The sum of all view factors leaving surface `from`. For a closed
    /// set of surfaces this should be close to 1.
    pub fn row_sum(&self, from: &str) -> Option<Float> {
        let i = self.index(from)?;
        let n = self.names.len();
        Some(self.factors[i * n..(i + 1) * n].iter().sum())
    }
}
