//! codec — payload (de)serialization for component buffers.
//!
//! Purpose
//! -------
//! Translate between [`ComponentsArray`] buffers and the three wire
//! payload forms: nested JSON number arrays (`none`), per-channel base64
//! text (`base64`), and a single external little-endian blob (`raw`).
//! Also owns the deterministic sidecar naming contract and the grid
//! reshape used by the Fourier pipeline.
//!
//! Key behaviors
//! -------------
//! - Byte payloads are little-endian with the numeric type's fixed width;
//!   a complex sample is its real part followed by its imaginary part.
//! - Inline complex channels interleave `[re, im, …]`; inline integers
//!   are parsed exactly through `serde_json::Number`, so the full 64-bit
//!   range survives.
//! - A raw blob is channel-major: it splits into `channel_count` equal
//!   runs, one per component.
//! - `decode_*(encode_*(x)) == x` bit-exactly for every numeric type.
//!
//! Invariants & assumptions
//! ------------------------
//! - Channels of one payload decode to equal lengths; violations name the
//!   offending channel.
//! - Inline encoding rejects non-finite floats (JSON cannot carry them);
//!   the byte encodings pass them through untouched.
//!
//! Conventions
//! -----------
//! - Row-major `(channel, point)` buffers flatten so the byte order of
//!   `encode_raw` is channel 0's samples, then channel 1's, and so on.
//! - Sidecar names derive from the dataset name when present, else the
//!   dataset index: `<base>_<leaf>.dat`, or `<base>/<leaf>.dat` when
//!   several datasets share one directory.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use half::f16;
use ndarray::{Array2, ArrayD, IxDyn};
use num_complex::Complex;
use num_complex::Complex64;
use serde_json::{Number, Value};

use crate::dataset::core::buffer::ComponentsArray;
use crate::dataset::core::numeric_type::NumericType;
use crate::dataset::errors::{DatasetError, DatasetResult};

// ---- Little-endian scalar wire codec ---------------------------------------

/// A sample part with a fixed little-endian wire form.
trait WireScalar: Copy {
    const WIDTH: usize;
    fn read_le(chunk: &[u8]) -> Self;
    fn write_le(self, out: &mut Vec<u8>);
}

macro_rules! impl_wire_scalar {
    ($($ty:ty => $width:expr),* $(,)?) => {
        $(impl WireScalar for $ty {
            const WIDTH: usize = $width;

            fn read_le(chunk: &[u8]) -> $ty {
                let mut raw = [0u8; $width];
                raw.copy_from_slice(chunk);
                <$ty>::from_le_bytes(raw)
            }

            fn write_le(self, out: &mut Vec<u8>) {
                out.extend_from_slice(&self.to_le_bytes());
            }
        })*
    };
}

impl_wire_scalar! {
    u8 => 1, u16 => 2, u32 => 4, u64 => 8,
    i8 => 1, i16 => 2, i32 => 4, i64 => 8,
    f16 => 2, f32 => 4, f64 => 8,
}

fn read_scalars<T: WireScalar>(bytes: &[u8]) -> DatasetResult<Vec<T>> {
    if bytes.len() % T::WIDTH != 0 {
        return Err(DatasetError::ByteLengthMismatch { width: T::WIDTH, length: bytes.len() });
    }
    Ok(bytes.chunks_exact(T::WIDTH).map(T::read_le).collect())
}

fn read_complex_pairs<T: WireScalar>(bytes: &[u8]) -> DatasetResult<Vec<Complex<T>>> {
    let width = 2 * T::WIDTH;
    if bytes.len() % width != 0 {
        return Err(DatasetError::ByteLengthMismatch { width, length: bytes.len() });
    }
    Ok(bytes
        .chunks_exact(width)
        .map(|chunk| Complex::new(T::read_le(&chunk[..T::WIDTH]), T::read_le(&chunk[T::WIDTH..])))
        .collect())
}

/// Stack per-channel rows into a channel-major array, rejecting ragged
/// rows.
fn rows_to_array<T>(rows: Vec<Vec<T>>) -> DatasetResult<Array2<T>> {
    let mut expected = None;
    for (channel, row) in rows.iter().enumerate() {
        match expected {
            None => expected = Some(row.len()),
            Some(length) if length != row.len() => {
                return Err(DatasetError::RaggedComponents {
                    channel,
                    expected: length,
                    found: row.len(),
                });
            }
            Some(_) => {}
        }
    }
    let columns = expected.unwrap_or(0);
    let channels = rows.len();
    let flat: Vec<T> = rows.into_iter().flatten().collect();
    Ok(Array2::from_shape_vec((channels, columns), flat)
        .unwrap_or_else(|_| unreachable!("row lengths verified above")))
}

fn byte_rows<T: WireScalar>(blobs: &[&[u8]]) -> DatasetResult<Array2<T>> {
    let mut rows = Vec::with_capacity(blobs.len());
    for blob in blobs {
        rows.push(read_scalars::<T>(blob)?);
    }
    rows_to_array(rows)
}

fn complex_byte_rows<T: WireScalar>(blobs: &[&[u8]]) -> DatasetResult<Array2<Complex<T>>> {
    let mut rows = Vec::with_capacity(blobs.len());
    for blob in blobs {
        rows.push(read_complex_pairs::<T>(blob)?);
    }
    rows_to_array(rows)
}

fn channels_from_bytes(blobs: &[&[u8]], numeric_type: NumericType) -> DatasetResult<ComponentsArray> {
    match numeric_type {
        NumericType::UInt8 => Ok(ComponentsArray::UInt8(byte_rows(blobs)?)),
        NumericType::UInt16 => Ok(ComponentsArray::UInt16(byte_rows(blobs)?)),
        NumericType::UInt32 => Ok(ComponentsArray::UInt32(byte_rows(blobs)?)),
        NumericType::UInt64 => Ok(ComponentsArray::UInt64(byte_rows(blobs)?)),
        NumericType::Int8 => Ok(ComponentsArray::Int8(byte_rows(blobs)?)),
        NumericType::Int16 => Ok(ComponentsArray::Int16(byte_rows(blobs)?)),
        NumericType::Int32 => Ok(ComponentsArray::Int32(byte_rows(blobs)?)),
        NumericType::Int64 => Ok(ComponentsArray::Int64(byte_rows(blobs)?)),
        NumericType::Float16 => Ok(ComponentsArray::Float16(byte_rows(blobs)?)),
        NumericType::Float32 => Ok(ComponentsArray::Float32(byte_rows(blobs)?)),
        NumericType::Float64 => Ok(ComponentsArray::Float64(byte_rows(blobs)?)),
        NumericType::Complex64 => Ok(ComponentsArray::Complex64(complex_byte_rows(blobs)?)),
        NumericType::Complex128 => Ok(ComponentsArray::Complex128(complex_byte_rows(blobs)?)),
    }
}

// ---- Inline value conversion ------------------------------------------------

fn inline_u64(value: &Value, channel: usize) -> DatasetResult<u64> {
    value.as_u64().ok_or_else(|| DatasetError::InlinePayload {
        channel,
        detail: format!("expected an unsigned integer, got {value}"),
    })
}

fn inline_i64(value: &Value, channel: usize) -> DatasetResult<i64> {
    value.as_i64().ok_or_else(|| DatasetError::InlinePayload {
        channel,
        detail: format!("expected a signed integer, got {value}"),
    })
}

fn inline_f64(value: &Value, channel: usize) -> DatasetResult<f64> {
    value.as_f64().ok_or_else(|| DatasetError::InlinePayload {
        channel,
        detail: format!("expected a number, got {value}"),
    })
}

fn inline_u8(value: &Value, channel: usize) -> DatasetResult<u8> {
    let raw = inline_u64(value, channel)?;
    u8::try_from(raw).map_err(|_| DatasetError::InlinePayload {
        channel,
        detail: format!("{raw} does not fit uint8"),
    })
}

fn inline_u16(value: &Value, channel: usize) -> DatasetResult<u16> {
    let raw = inline_u64(value, channel)?;
    u16::try_from(raw).map_err(|_| DatasetError::InlinePayload {
        channel,
        detail: format!("{raw} does not fit uint16"),
    })
}

fn inline_u32(value: &Value, channel: usize) -> DatasetResult<u32> {
    let raw = inline_u64(value, channel)?;
    u32::try_from(raw).map_err(|_| DatasetError::InlinePayload {
        channel,
        detail: format!("{raw} does not fit uint32"),
    })
}

fn inline_i8(value: &Value, channel: usize) -> DatasetResult<i8> {
    let raw = inline_i64(value, channel)?;
    i8::try_from(raw).map_err(|_| DatasetError::InlinePayload {
        channel,
        detail: format!("{raw} does not fit int8"),
    })
}

fn inline_i16(value: &Value, channel: usize) -> DatasetResult<i16> {
    let raw = inline_i64(value, channel)?;
    i16::try_from(raw).map_err(|_| DatasetError::InlinePayload {
        channel,
        detail: format!("{raw} does not fit int16"),
    })
}

fn inline_i32(value: &Value, channel: usize) -> DatasetResult<i32> {
    let raw = inline_i64(value, channel)?;
    i32::try_from(raw).map_err(|_| DatasetError::InlinePayload {
        channel,
        detail: format!("{raw} does not fit int32"),
    })
}

fn inline_f16(value: &Value, channel: usize) -> DatasetResult<f16> {
    Ok(f16::from_f64(inline_f64(value, channel)?))
}

fn inline_f32(value: &Value, channel: usize) -> DatasetResult<f32> {
    Ok(inline_f64(value, channel)? as f32)
}

fn inline_rows<T>(
    channels: &[Vec<Value>],
    convert: fn(&Value, usize) -> DatasetResult<T>,
) -> DatasetResult<Array2<T>> {
    let mut rows = Vec::with_capacity(channels.len());
    for (channel, values) in channels.iter().enumerate() {
        rows.push(
            values.iter().map(|value| convert(value, channel)).collect::<DatasetResult<Vec<T>>>()?,
        );
    }
    rows_to_array(rows)
}

fn inline_complex_rows<T>(
    channels: &[Vec<Value>],
    convert: fn(&Value, usize) -> DatasetResult<T>,
) -> DatasetResult<Array2<Complex<T>>> {
    let mut rows = Vec::with_capacity(channels.len());
    for (channel, values) in channels.iter().enumerate() {
        if values.len() % 2 != 0 {
            return Err(DatasetError::OddComplexLength { channel, length: values.len() });
        }
        let mut row = Vec::with_capacity(values.len() / 2);
        for pair in values.chunks_exact(2) {
            row.push(Complex::new(convert(&pair[0], channel)?, convert(&pair[1], channel)?));
        }
        rows.push(row);
    }
    rows_to_array(rows)
}

// ---- Decoding ---------------------------------------------------------------

/// Decode nested JSON number arrays (`encoding: none`).
///
/// Complex channels interleave `[re, im, …]`; integer channels parse
/// exactly with range checks against the declared width.
pub fn decode_inline(
    channels: &[Vec<Value>],
    numeric_type: NumericType,
    channel_count: usize,
) -> DatasetResult<ComponentsArray> {
    if channels.len() != channel_count {
        return Err(DatasetError::ComponentCountMismatch {
            expected: channel_count,
            found: channels.len(),
        });
    }
    match numeric_type {
        NumericType::UInt8 => Ok(ComponentsArray::UInt8(inline_rows(channels, inline_u8)?)),
        NumericType::UInt16 => Ok(ComponentsArray::UInt16(inline_rows(channels, inline_u16)?)),
        NumericType::UInt32 => Ok(ComponentsArray::UInt32(inline_rows(channels, inline_u32)?)),
        NumericType::UInt64 => Ok(ComponentsArray::UInt64(inline_rows(channels, inline_u64)?)),
        NumericType::Int8 => Ok(ComponentsArray::Int8(inline_rows(channels, inline_i8)?)),
        NumericType::Int16 => Ok(ComponentsArray::Int16(inline_rows(channels, inline_i16)?)),
        NumericType::Int32 => Ok(ComponentsArray::Int32(inline_rows(channels, inline_i32)?)),
        NumericType::Int64 => Ok(ComponentsArray::Int64(inline_rows(channels, inline_i64)?)),
        NumericType::Float16 => Ok(ComponentsArray::Float16(inline_rows(channels, inline_f16)?)),
        NumericType::Float32 => Ok(ComponentsArray::Float32(inline_rows(channels, inline_f32)?)),
        NumericType::Float64 => Ok(ComponentsArray::Float64(inline_rows(channels, inline_f64)?)),
        NumericType::Complex64 => {
            Ok(ComponentsArray::Complex64(inline_complex_rows(channels, inline_f32)?))
        }
        NumericType::Complex128 => {
            Ok(ComponentsArray::Complex128(inline_complex_rows(channels, inline_f64)?))
        }
    }
}

/// Decode per-channel standard-alphabet base64 text.
pub fn decode_base64(
    texts: &[String],
    numeric_type: NumericType,
    channel_count: usize,
) -> DatasetResult<ComponentsArray> {
    if texts.len() != channel_count {
        return Err(DatasetError::ComponentCountMismatch {
            expected: channel_count,
            found: texts.len(),
        });
    }
    let mut blobs = Vec::with_capacity(texts.len());
    for (channel, text) in texts.iter().enumerate() {
        blobs.push(
            STANDARD
                .decode(text)
                .map_err(|err| DatasetError::Base64Decode { channel, detail: err.to_string() })?,
        );
    }
    let views: Vec<&[u8]> = blobs.iter().map(Vec::as_slice).collect();
    channels_from_bytes(&views, numeric_type)
}

/// Decode one channel-major little-endian blob (`encoding: raw`).
pub fn decode_raw(
    bytes: &[u8],
    numeric_type: NumericType,
    channel_count: usize,
) -> DatasetResult<ComponentsArray> {
    let width = numeric_type.width();
    if bytes.len() % width != 0 {
        return Err(DatasetError::ByteLengthMismatch { width, length: bytes.len() });
    }
    let total = bytes.len() / width;
    if total % channel_count != 0 {
        return Err(DatasetError::UnevenChannelSplit { total, channels: channel_count });
    }
    let views: Vec<&[u8]> = if bytes.is_empty() {
        vec![&[][..]; channel_count]
    } else {
        bytes.chunks_exact(bytes.len() / channel_count).collect()
    };
    channels_from_bytes(&views, numeric_type)
}

// ---- Encoding ---------------------------------------------------------------

fn scalars_to_bytes<T: WireScalar>(data: &Array2<T>) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() * T::WIDTH);
    for &value in data.iter() {
        value.write_le(&mut out);
    }
    out
}

fn complex_to_bytes<T: WireScalar>(data: &Array2<Complex<T>>) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() * 2 * T::WIDTH);
    for &value in data.iter() {
        value.re.write_le(&mut out);
        value.im.write_le(&mut out);
    }
    out
}

/// Encode a buffer as one channel-major little-endian blob.
pub fn encode_raw(buffer: &ComponentsArray) -> Vec<u8> {
    match buffer {
        ComponentsArray::UInt8(data) => scalars_to_bytes(data),
        ComponentsArray::UInt16(data) => scalars_to_bytes(data),
        ComponentsArray::UInt32(data) => scalars_to_bytes(data),
        ComponentsArray::UInt64(data) => scalars_to_bytes(data),
        ComponentsArray::Int8(data) => scalars_to_bytes(data),
        ComponentsArray::Int16(data) => scalars_to_bytes(data),
        ComponentsArray::Int32(data) => scalars_to_bytes(data),
        ComponentsArray::Int64(data) => scalars_to_bytes(data),
        ComponentsArray::Float16(data) => scalars_to_bytes(data),
        ComponentsArray::Float32(data) => scalars_to_bytes(data),
        ComponentsArray::Float64(data) => scalars_to_bytes(data),
        ComponentsArray::Complex64(data) => complex_to_bytes(data),
        ComponentsArray::Complex128(data) => complex_to_bytes(data),
    }
}

/// Encode a buffer as per-channel standard-alphabet base64 text.
pub fn encode_base64(buffer: &ComponentsArray) -> Vec<String> {
    let channels = buffer.channel_count();
    let bytes = encode_raw(buffer);
    if bytes.is_empty() {
        return vec![String::new(); channels];
    }
    bytes.chunks_exact(bytes.len() / channels).map(|chunk| STANDARD.encode(chunk)).collect()
}

fn finite_number(value: f64, channel: usize) -> DatasetResult<Value> {
    Number::from_f64(value)
        .map(Value::Number)
        .ok_or(DatasetError::NonFiniteInline { channel })
}

fn inline_int_values<T: Copy + Into<Value>>(data: &Array2<T>) -> Vec<Vec<Value>> {
    data.rows().into_iter().map(|row| row.iter().map(|&value| value.into()).collect()).collect()
}

fn inline_float_values<T: Copy>(
    data: &Array2<T>,
    to_f64: fn(T) -> f64,
) -> DatasetResult<Vec<Vec<Value>>> {
    data.rows()
        .into_iter()
        .enumerate()
        .map(|(channel, row)| {
            row.iter().map(|&value| finite_number(to_f64(value), channel)).collect()
        })
        .collect()
}

fn inline_complex_values<T: Copy>(
    data: &Array2<Complex<T>>,
    to_f64: fn(T) -> f64,
) -> DatasetResult<Vec<Vec<Value>>> {
    data.rows()
        .into_iter()
        .enumerate()
        .map(|(channel, row)| {
            let mut values = Vec::with_capacity(row.len() * 2);
            for &sample in row {
                values.push(finite_number(to_f64(sample.re), channel)?);
                values.push(finite_number(to_f64(sample.im), channel)?);
            }
            Ok(values)
        })
        .collect()
}

/// Encode a buffer as nested JSON number arrays.
///
/// Errors
/// ------
/// - [`DatasetError::NonFiniteInline`] when a float channel holds NaN or
///   an infinity; JSON has no representation for them, so such data must
///   travel base64 or raw.
pub fn encode_inline(buffer: &ComponentsArray) -> DatasetResult<Vec<Vec<Value>>> {
    match buffer {
        ComponentsArray::UInt8(data) => Ok(inline_int_values(data)),
        ComponentsArray::UInt16(data) => Ok(inline_int_values(data)),
        ComponentsArray::UInt32(data) => Ok(inline_int_values(data)),
        ComponentsArray::UInt64(data) => Ok(inline_int_values(data)),
        ComponentsArray::Int8(data) => Ok(inline_int_values(data)),
        ComponentsArray::Int16(data) => Ok(inline_int_values(data)),
        ComponentsArray::Int32(data) => Ok(inline_int_values(data)),
        ComponentsArray::Int64(data) => Ok(inline_int_values(data)),
        ComponentsArray::Float16(data) => inline_float_values(data, |value| value.to_f64()),
        ComponentsArray::Float32(data) => inline_float_values(data, f64::from),
        ComponentsArray::Float64(data) => inline_float_values(data, |value| value),
        ComponentsArray::Complex64(data) => inline_complex_values(data, f64::from),
        ComponentsArray::Complex128(data) => inline_complex_values(data, |value| value),
    }
}

// ---- Sidecar naming and grid reshape ----------------------------------------

/// Deterministic sidecar file name for a raw payload.
///
/// The leaf is the dataset's name when non-empty, else its index. With
/// `shared_directory` the payloads of several datasets live under a
/// directory named after the base; otherwise the leaf is appended with an
/// underscore.
pub fn sidecar_name(
    base: &str,
    dataset_name: Option<&str>,
    index: usize,
    shared_directory: bool,
) -> String {
    let leaf = match dataset_name {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => index.to_string(),
    };
    if shared_directory { format!("{base}/{leaf}.dat") } else { format!("{base}_{leaf}.dat") }
}

/// View a complex buffer as `(channel_count, *grid_shape)`.
///
/// Grid dimensions are laid out slowest-first in reverse declared order,
/// so declared dimension `k` of `D` is axis `D - k` of the result (axis 0
/// being the channel axis) and the first declared dimension varies
/// fastest in memory.
pub fn reshape_complex(
    data: Array2<Complex64>,
    grid_shape: &[usize],
) -> DatasetResult<ArrayD<Complex64>> {
    let (channels, points) = data.dim();
    let grid: usize = grid_shape.iter().product();
    if points != grid {
        return Err(DatasetError::GridSizeMismatch { points, grid });
    }
    let mut shape = Vec::with_capacity(grid_shape.len() + 1);
    shape.push(channels);
    shape.extend(grid_shape.iter().rev().copied());
    Ok(data
        .into_shape_with_order(IxDyn(&shape))
        .unwrap_or_else(|_| unreachable!("standard-layout buffer with verified length")))
}
