//! Visualization rendering: histogram bars and the LUT curve.
//!
//! The engine owns two small [`RenderBuffer`]s (interleaved 8-bit RGB)
//! that an external display layer consumes as-is; nothing here touches a
//! windowing system. Columns map to bins by nearest index, so the buffers
//! can be narrower or wider than the level count.
//!
//! Curves are tinted: channel curves draw into their own primary,
//! single-channel and luminance curves draw white. Overlapping bars
//! blend by saturating addition.

use tone_core::Sample;

/// Bytes per rendered pixel (interleaved RGB).
const RGB: usize = 3;

/// Channel tints for 3-channel curves, index-matched to the image.
const CHANNEL_TINTS: [[u8; 3]; 3] = [[255, 0, 0], [0, 255, 0], [0, 0, 255]];

/// Tint for single-channel and luminance curves.
const MONO_TINT: [u8; 3] = [255, 255, 255];

/// The tint of curve `index` in an `N`-channel pipeline.
///
/// Indices `0..N` are image channels; `N` is the luminance curve.
pub fn curve_tint<const N: usize>(index: usize) -> [u8; 3] {
    if N == 3 && index < 3 {
        CHANNEL_TINTS[index]
    } else {
        MONO_TINT
    }
}

/// A small interleaved-RGB raster owned by the engine.
///
/// # Example
///
/// ```rust
/// use tone_engine::render::RenderBuffer;
///
/// let buf = RenderBuffer::new(256, 128);
/// assert_eq!(buf.data().len(), 256 * 128 * 3);
/// ```
#[derive(Debug, Clone)]
pub struct RenderBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RenderBuffer {
    /// Creates a black buffer of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * RGB],
        }
    }

    /// Buffer width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Buffer height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The interleaved RGB bytes, row-major, top row first.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Resets every pixel to black.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// The RGB triple at (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let i = (y as usize * self.width as usize + x as usize) * RGB;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Saturating-adds `tint` onto the pixel at (x, y).
    fn blend(&mut self, x: usize, y: usize, tint: [u8; 3]) {
        let i = (y * self.width as usize + x) * RGB;
        for c in 0..RGB {
            self.data[i + c] = self.data[i + c].saturating_add(tint[c]);
        }
    }
}

/// Renders histogram bars for each `(curve, tint)` pair.
///
/// Bars grow from the bottom edge; heights are proportional to
/// `value / max`. A non-positive `max` (empty histogram) clears the
/// buffer and draws nothing.
pub fn render_bars(buf: &mut RenderBuffer, curves: &[(&[f64], [u8; 3])], max: f64) {
    buf.clear();
    if buf.width == 0 || buf.height == 0 || max <= 0.0 {
        return;
    }

    let width = buf.width as usize;
    let height = buf.height as usize;
    for x in 0..width {
        for &(curve, tint) in curves {
            let bin = x * curve.len() / width;
            let bar = ((curve[bin] / max) * height as f64).round() as usize;
            let bar = bar.min(height);
            for y in (height - bar)..height {
                buf.blend(x, y, tint);
            }
        }
    }
}

/// Renders the transfer curve(s) of a LUT, one sample per column.
///
/// Input level runs left to right, output level bottom to top.
pub fn render_curves<T: Sample>(buf: &mut RenderBuffer, curves: &[(&[T], [u8; 3])]) {
    buf.clear();
    if buf.width == 0 || buf.height == 0 {
        return;
    }

    let width = buf.width as usize;
    let height = buf.height as usize;
    let max_level = (T::LEVELS - 1) as f64;
    for x in 0..width {
        for &(curve, tint) in curves {
            let level = x * curve.len() / width;
            let out = curve[level].to_level() as f64 / max_level;
            let y = height - 1 - ((out * (height - 1) as f64).round() as usize).min(height - 1);
            buf.blend(x, y, tint);
        }
    }
}
