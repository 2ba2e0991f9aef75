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

/// Adds up `values` in the order they are given, using Neumaier's
/// compensated summation.
pub(crate) fn compensated_sum<I: IntoIterator<Item = Float>>(values: I) -> Float {
    let mut sum: Float = 0.0;
    let mut compensation: Float = 0.0;
    for v in values {
        let t = sum + v;
        if sum.abs() >= v.abs() {
            compensation += (sum - t) + v;
        } else {
            compensation += (v - t) + sum;
        }
        sum = t;
    }
    sum + compensation
}

/// How far outside of `[0, 1]` a fraction can be before it is
/// reported.
pub const UNIT_RANGE_TOLERANCE: Float = 1e-6;

/// Logs a warning if `value` (a fraction or a view factor) falls
/// outside `[0, 1]`. The value is returned as is.
pub(crate) fn check_unit_range(value: Float, what: &str) -> Float {
    if !value.is_finite()
        || value < -UNIT_RANGE_TOLERANCE
        || value > 1.0 + UNIT_RANGE_TOLERANCE
    {
        log::warn!("{} = {} is outside of [0, 1]", what, value);
    }
    value
}
