//! # tone-tests
//!
//! Cross-crate integration tests for the tone-rs workspace, plus shared
//! deterministic test-image builders. The actual test scenarios live
//! under `tests/`.

#![warn(missing_docs)]

use tone_core::Image;

/// A horizontal gradient: every pixel's level is `x * 255 / (w - 1)`.
pub fn gradient_gray(width: u32, height: u32) -> Image<u8, 1> {
    let mut data = Vec::with_capacity((width * height) as usize);
    let denom = width.saturating_sub(1).max(1);
    for _ in 0..height {
        for x in 0..width {
            data.push((x * 255 / denom) as u8);
        }
    }
    Image::from_data(width, height, data).expect("builder sizes its own data")
}

/// A deterministic pseudo-random RGB image (xorshift over coordinates).
pub fn noise_rgb(width: u32, height: u32) -> Image<u8, 3> {
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    let mut state = 0x9e3779b9u32;
    for _ in 0..width * height {
        for _ in 0..3 {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            data.push((state >> 24) as u8);
        }
    }
    Image::from_data(width, height, data).expect("builder sizes its own data")
}

/// 100 gray pixels with the population split in half at bin 128:
/// 50 at level 100, 50 at level 128.
pub fn split_at_128() -> Image<u8, 1> {
    let mut data = vec![100u8; 50];
    data.extend(vec![128u8; 50]);
    Image::from_data(100, 1, data).expect("builder sizes its own data")
}
