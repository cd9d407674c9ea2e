//! Channel-major typed component buffers.
//!
//! Purpose
//! -------
//! Hold a dataset's samples in their declared numeric type so every type
//! round-trips bit-exactly through the codec. One enum variant per
//! numeric type, each wrapping a two-dimensional array of shape
//! `(channel_count, points_per_channel)`.
//!
//! Conventions
//! -----------
//! - Row `c` is channel `c`; within a row, grid points are flattened with
//!   the first declared dimension varying fastest.
//! - The Fourier pipeline upcasts any variant to complex128 through
//!   [`ComponentsArray::to_complex128`]; 64-bit integers above 2^53 lose
//!   precision there, never in storage or the codec.

use half::f16;
use ndarray::Array2;
use num_complex::{Complex32, Complex64};

use crate::dataset::core::numeric_type::NumericType;

/// A dataset's samples, typed and channel-major.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentsArray {
    UInt8(Array2<u8>),
    UInt16(Array2<u16>),
    UInt32(Array2<u32>),
    UInt64(Array2<u64>),
    Int8(Array2<i8>),
    Int16(Array2<i16>),
    Int32(Array2<i32>),
    Int64(Array2<i64>),
    Float16(Array2<f16>),
    Float32(Array2<f32>),
    Float64(Array2<f64>),
    Complex64(Array2<Complex32>),
    Complex128(Array2<Complex64>),
}

impl ComponentsArray {
    /// The numeric type stored in this buffer.
    pub fn numeric_type(&self) -> NumericType {
        match self {
            ComponentsArray::UInt8(_) => NumericType::UInt8,
            ComponentsArray::UInt16(_) => NumericType::UInt16,
            ComponentsArray::UInt32(_) => NumericType::UInt32,
            ComponentsArray::UInt64(_) => NumericType::UInt64,
            ComponentsArray::Int8(_) => NumericType::Int8,
            ComponentsArray::Int16(_) => NumericType::Int16,
            ComponentsArray::Int32(_) => NumericType::Int32,
            ComponentsArray::Int64(_) => NumericType::Int64,
            ComponentsArray::Float16(_) => NumericType::Float16,
            ComponentsArray::Float32(_) => NumericType::Float32,
            ComponentsArray::Float64(_) => NumericType::Float64,
            ComponentsArray::Complex64(_) => NumericType::Complex64,
            ComponentsArray::Complex128(_) => NumericType::Complex128,
        }
    }

    /// Number of channels (rows).
    pub fn channel_count(&self) -> usize {
        self.shape().0
    }

    /// Samples per channel (columns).
    pub fn points_per_channel(&self) -> usize {
        self.shape().1
    }

    fn shape(&self) -> (usize, usize) {
        match self {
            ComponentsArray::UInt8(data) => data.dim(),
            ComponentsArray::UInt16(data) => data.dim(),
            ComponentsArray::UInt32(data) => data.dim(),
            ComponentsArray::UInt64(data) => data.dim(),
            ComponentsArray::Int8(data) => data.dim(),
            ComponentsArray::Int16(data) => data.dim(),
            ComponentsArray::Int32(data) => data.dim(),
            ComponentsArray::Int64(data) => data.dim(),
            ComponentsArray::Float16(data) => data.dim(),
            ComponentsArray::Float32(data) => data.dim(),
            ComponentsArray::Float64(data) => data.dim(),
            ComponentsArray::Complex64(data) => data.dim(),
            ComponentsArray::Complex128(data) => data.dim(),
        }
    }

    /// Upcast every sample to complex128 for the Fourier pipeline.
    pub fn to_complex128(&self) -> Array2<Complex64> {
        match self {
            ComponentsArray::UInt8(data) => data.mapv(|v| Complex64::new(f64::from(v), 0.0)),
            ComponentsArray::UInt16(data) => data.mapv(|v| Complex64::new(f64::from(v), 0.0)),
            ComponentsArray::UInt32(data) => data.mapv(|v| Complex64::new(f64::from(v), 0.0)),
            ComponentsArray::UInt64(data) => data.mapv(|v| Complex64::new(v as f64, 0.0)),
            ComponentsArray::Int8(data) => data.mapv(|v| Complex64::new(f64::from(v), 0.0)),
            ComponentsArray::Int16(data) => data.mapv(|v| Complex64::new(f64::from(v), 0.0)),
            ComponentsArray::Int32(data) => data.mapv(|v| Complex64::new(f64::from(v), 0.0)),
            ComponentsArray::Int64(data) => data.mapv(|v| Complex64::new(v as f64, 0.0)),
            ComponentsArray::Float16(data) => data.mapv(|v| Complex64::new(v.to_f64(), 0.0)),
            ComponentsArray::Float32(data) => data.mapv(|v| Complex64::new(f64::from(v), 0.0)),
            ComponentsArray::Float64(data) => data.mapv(|v| Complex64::new(v, 0.0)),
            ComponentsArray::Complex64(data) => {
                data.mapv(|v| Complex64::new(f64::from(v.re), f64::from(v.im)))
            }
            ComponentsArray::Complex128(data) => data.clone(),
        }
    }
}
