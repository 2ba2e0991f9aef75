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

use crate::Float;
use serde::{Deserialize, Serialize};

/// A value calculated at a certain time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSample {
    /// The time
    pub time: Float,
    /// The value (e.g., an illuminated fraction or a view factor)
    pub value: Float,
}

/// Values calculated along an orbit, in time order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    samples: Vec<TimeSample>,
}

impl TimeSeries {
    /// Wraps a list of samples
    pub fn new(samples: Vec<TimeSample>) -> Self {
        Self { samples }
    }

    /// The samples
    pub fn samples(&self) -> &[TimeSample] {
        &self.samples
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Checks whether there are no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The times of the samples
    pub fn times(&self) -> Vec<Float> {
        self.samples.iter().map(|s| s.time).collect()
    }

    /// The values of the samples
    pub fn values(&self) -> Vec<Float> {
        self.samples.iter().map(|s| s.value).collect()
    }

    /// Arithmetic mean of the values, or `None` if the series is empty
    pub fn mean(&self) -> Option<Float> {
        if self.samples.is_empty() {
            return None;
        }
        let sum = crate::numeric::compensated_sum(self.samples.iter().map(|s| s.value));
        Some(sum / self.samples.len() as Float)
    }

    /// The indices of the samples whose value falls outside of `[0, 1]`
    /// by more than `tolerance`
    pub fn out_of_range(&self, tolerance: Float) -> Vec<usize> {
        self.samples
            .iter()
            .enumerate()
            .filter(|(_, s)| !(s.value >= -tolerance && s.value <= 1.0 + tolerance))
            .map(|(i, _)| i)
            .collect()
    }
}

impl From<Vec<TimeSample>> for TimeSeries {
    fn from(samples: Vec<TimeSample>) -> Self {
        Self::new(samples)
    }
}
