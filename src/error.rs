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

use thiserror::Error;

/// Errors that can occur while building the geometry of a run or
/// validating its inputs.
///
/// Geometric problems are reported when things are constructed, never while
/// evaluating. Numerical degeneracies found mid-calculation (e.g., two
/// coincident samples in a view factor calculation) are not errors: they
/// are skipped and reported through logs and diagnostics.
#[derive(Error, Debug)]
pub enum Error {
    /// A degenerate patch, triangle, polygon or sphere (zero area,
    /// collinear points, zero radius...) or arrays of inconsistent lengths.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A non-positive resolution, a zero-length direction, a non-positive
    /// radius or period, etc.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A configuration (or results) file could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration could not be parsed, or results could not be serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenient alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn geometry<S: Into<String>>(msg: S) -> Self {
        Error::InvalidGeometry(msg.into())
    }

    pub(crate) fn argument<S: Into<String>>(msg: S) -> Self {
        Error::InvalidArgument(msg.into())
    }
}
