//! Encoded polyline decoding (Google polyline algorithm) and the decoded
//! route path type.
//!
//! Each coordinate component is stored as a signed delta from the previous
//! point in fixed-point units, zig-zag mapped to unsigned, then split into
//! 5-bit chunks least-significant first. Every chunk is written as one byte
//! `chunk + 63`, with 0x20 set on all chunks but the last.
//!
//! OSRM encodes with a fixed-point factor of 1e5, so decode with a
//! precision of 1e-5. Decoding such a string with 1e-6 silently yields
//! coordinates ten times too small.

use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;
use crate::error::DecodeError;

/// Precision used by OSRM `polyline` geometries.
pub const DEFAULT_PRECISION: f64 = 1e-5;

const MIN_BYTE: u8 = 63;
const MAX_BYTE: u8 = 63 + 63;
const CONTINUATION: u64 = 0x20;
const CHUNK_MASK: u64 = 0x1f;
/// Twelve chunks fill 60 bits; one more would not fit in an i64 delta.
const MAX_SHIFT: u32 = 55;
/// Largest fixed-point magnitude the encoder emits. Deltas then stay below
/// 2^58, so their zig-zag form fits the twelve chunks the decoder reads.
const MAX_FIXED: f64 = (1u64 << 57) as f64;

/// A route geometry as decoded coordinates, start to end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Coordinate>,
}

impl Polyline {
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    /// Decodes an OSRM geometry at [`DEFAULT_PRECISION`].
    pub fn decode(encoded: &str) -> Result<Self, DecodeError> {
        decode_polyline(encoded, DEFAULT_PRECISION)
    }

    /// Encodes at [`DEFAULT_PRECISION`].
    pub fn encode(&self) -> Result<String, DecodeError> {
        encode_polyline(&self.points, DEFAULT_PRECISION)
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points as `(lat, lng)` pairs, the shape map libraries draw from.
    pub fn to_lat_lng(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(Coordinate::lat_lng).collect()
    }
}

fn check_precision(precision: f64) -> Result<(), DecodeError> {
    if precision.is_finite() && precision > 0.0 {
        Ok(())
    } else {
        Err(DecodeError::InvalidPrecision(precision))
    }
}

/// Decodes `encoded`, scaling the fixed-point values by `precision`.
///
/// Fails without a partial result if the input is truncated, contains a
/// byte outside the encoding alphabet, or decodes to an invalid coordinate.
pub fn decode_polyline(encoded: &str, precision: f64) -> Result<Polyline, DecodeError> {
    check_precision(precision)?;

    let bytes = encoded.as_bytes();
    let mut position = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;
    let mut points = Vec::new();

    while position < bytes.len() {
        lat = read_delta(bytes, &mut position)
            .and_then(|delta| accumulate(lat, delta, position))?;
        lng = read_delta(bytes, &mut position)
            .and_then(|delta| accumulate(lng, delta, position))?;

        let point = Coordinate::new(scale(lat, precision), scale(lng, precision))
            .map_err(|_| DecodeError::OutOfRange {
                index: points.len(),
            })?;
        points.push(point);
    }

    Ok(Polyline::new(points))
}

/// Fixed-point value to degrees. Dividing by an integral factor keeps exact
/// values exact (9000000 at 1e-5 is 90.0, not 90.00000000000001).
fn scale(value: i64, precision: f64) -> f64 {
    let factor = (1.0 / precision).round();
    if factor >= 1.0 && (factor * precision - 1.0).abs() < 1e-9 {
        value as f64 / factor
    } else {
        value as f64 * precision
    }
}

fn accumulate(total: i64, delta: i64, position: usize) -> Result<i64, DecodeError> {
    total
        .checked_add(delta)
        .ok_or(DecodeError::Overflow { position })
}

/// Reads one zig-zag encoded value starting at `position`.
fn read_delta(bytes: &[u8], position: &mut usize) -> Result<i64, DecodeError> {
    let mut result: u64 = 0;
    let mut shift: u32 = 0;

    loop {
        let byte = *bytes
            .get(*position)
            .ok_or(DecodeError::Truncated {
                position: *position,
            })?;
        if !(MIN_BYTE..=MAX_BYTE).contains(&byte) {
            return Err(DecodeError::InvalidCharacter {
                position: *position,
                byte,
            });
        }
        if shift > MAX_SHIFT {
            return Err(DecodeError::Overflow {
                position: *position,
            });
        }

        let chunk = u64::from(byte - MIN_BYTE);
        *position += 1;
        result |= (chunk & CHUNK_MASK) << shift;
        shift += 5;

        if chunk & CONTINUATION == 0 {
            break;
        }
    }

    let magnitude = (result >> 1) as i64;
    Ok(if result & 1 == 1 { !magnitude } else { magnitude })
}

/// Encodes `points` with the given precision; the inverse of
/// [`decode_polyline`] up to fixed-point rounding.
///
/// Fails with [`DecodeError::InvalidPrecision`] when the precision is so
/// small that a point no longer fits the fixed-point range.
pub fn encode_polyline(points: &[Coordinate], precision: f64) -> Result<String, DecodeError> {
    check_precision(precision)?;

    let mut encoded = String::new();
    let mut prev_lat: i64 = 0;
    let mut prev_lng: i64 = 0;

    for point in points {
        let lat = to_fixed(point.latitude(), precision)?;
        let lng = to_fixed(point.longitude(), precision)?;
        write_delta(&mut encoded, delta(lat, prev_lat, precision)?);
        write_delta(&mut encoded, delta(lng, prev_lng, precision)?);
        prev_lat = lat;
        prev_lng = lng;
    }

    Ok(encoded)
}

fn to_fixed(degrees: f64, precision: f64) -> Result<i64, DecodeError> {
    let fixed = (degrees / precision).round();
    if fixed.is_finite() && fixed.abs() <= MAX_FIXED {
        Ok(fixed as i64)
    } else {
        Err(DecodeError::InvalidPrecision(precision))
    }
}

fn delta(current: i64, previous: i64, precision: f64) -> Result<i64, DecodeError> {
    current
        .checked_sub(previous)
        .ok_or(DecodeError::InvalidPrecision(precision))
}

fn write_delta(out: &mut String, delta: i64) {
    let mut value = (delta as u64) << 1;
    if delta < 0 {
        value = !value;
    }

    while value >= CONTINUATION {
        out.push(char::from(((CONTINUATION | (value & CHUNK_MASK)) as u8) + MIN_BYTE));
        value >>= 5;
    }
    out.push(char::from(value as u8 + MIN_BYTE));
}
