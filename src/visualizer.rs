//! Waveform preview geometry.
//!
//! Produces polyline points for a canvas; drawing itself is left to the
//! host. Inputs are only read.

use serde::Serialize;

/// A polyline vertex in canvas pixel space (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Downsample a rendered signal to one point per pixel column.
///
/// Stride is `floor(len / width)`. When the signal is shorter than the
/// canvas (stride 0) every available sample gets one point instead, so the
/// line covers `len` columns rather than collapsing onto sample 0.
pub fn waveform_points(signal: &[f32], width: usize, height: f64) -> Vec<Point> {
    if signal.is_empty() || width == 0 {
        return Vec::new();
    }

    let stride = signal.len() / width;
    let (stride, columns) = if stride == 0 {
        (1, signal.len())
    } else {
        (stride, width)
    };

    let mid = height / 2.0;
    (0..columns)
        .map(|i| Point {
            x: i as f64,
            y: mid - signal[i * stride] as f64 * mid,
        })
        .collect()
}

/// Points for a byte waveform fetched from a sound library.
///
/// Starts at the left edge's vertical midpoint, then maps each byte to
/// `(index / len × width, value / 255 × height)`.
pub fn byte_waveform_points(bytes: &[u8], width: f64, height: f64) -> Vec<Point> {
    let mut points = Vec::with_capacity(bytes.len() + 1);
    points.push(Point {
        x: 0.0,
        y: height / 2.0,
    });
    let len = bytes.len() as f64;
    points.extend(bytes.iter().enumerate().map(|(i, &v)| Point {
        x: i as f64 / len * width,
        y: v as f64 / 255.0 * height,
    }));
    points
}
