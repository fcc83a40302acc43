//! LUT application: remapping an image through a transfer function.
//!
//! A mono LUT is applied identically to every channel; a color LUT
//! applies its per-channel curve to the matching channel. The remap is a
//! straight per-sample table lookup, `O(pixels * channels)`.
//!
//! With the `parallel` feature the pixel loop runs on rayon worker
//! threads in fixed-size chunks; results are identical to the serial
//! path.

use crate::{Lut, LutError, LutResult};
use tone_core::{Image, Sample};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Remaps `src` through `lut` into the preallocated `dst`.
///
/// # Errors
///
/// - [`LutError::LevelMismatch`] if the LUT entry count differs from the
///   sample type's level count
/// - [`LutError::SizeMismatch`] if `dst` does not match `src` in size
///
/// # Example
///
/// ```rust
/// use tone_core::Image;
/// use tone_lut::{apply_into, Lut};
///
/// let src: Image<u8, 1> = Image::from_data(2, 2, vec![10, 10, 200, 200]).unwrap();
/// let negative: Lut<u8, 1> = Lut::Mono((0..=255u8).rev().collect());
/// let mut dst = Image::new(2, 2);
/// apply_into(&src, &negative, &mut dst).unwrap();
/// assert_eq!(dst.data(), &[245, 245, 55, 55]);
/// ```
pub fn apply_into<T: Sample, const N: usize>(
    src: &Image<T, N>,
    lut: &Lut<T, N>,
    dst: &mut Image<T, N>,
) -> LutResult<()> {
    if lut.size() != T::LEVELS {
        return Err(LutError::LevelMismatch {
            lut: lut.size(),
            image: T::LEVELS,
        });
    }
    if src.dimensions() != dst.dimensions() {
        return Err(LutError::SizeMismatch {
            src_width: src.width(),
            src_height: src.height(),
            dst_width: dst.width(),
            dst_height: dst.height(),
        });
    }

    match lut {
        Lut::Mono(curve) => remap(src, dst, |_, level| curve[level]),
        Lut::Color(curves) => remap(src, dst, |c, level| curves[c][level]),
    }
    Ok(())
}

/// Remaps `src` through `lut` into a freshly allocated image.
pub fn apply<T: Sample, const N: usize>(
    src: &Image<T, N>,
    lut: &Lut<T, N>,
) -> LutResult<Image<T, N>> {
    let mut dst = Image::new(src.width(), src.height());
    apply_into(src, lut, &mut dst)?;
    Ok(dst)
}

#[cfg(not(feature = "parallel"))]
fn remap<T: Sample, const N: usize>(
    src: &Image<T, N>,
    dst: &mut Image<T, N>,
    f: impl Fn(usize, usize) -> T,
) {
    for (s, d) in src
        .data()
        .chunks_exact(N)
        .zip(dst.data_mut().chunks_exact_mut(N))
    {
        for c in 0..N {
            d[c] = f(c, s[c].to_level());
        }
    }
}

#[cfg(feature = "parallel")]
fn remap<T: Sample, const N: usize>(
    src: &Image<T, N>,
    dst: &mut Image<T, N>,
    f: impl Fn(usize, usize) -> T + Sync + Send,
) {
    src.data()
        .par_chunks_exact(N)
        .zip(dst.data_mut().par_chunks_exact_mut(N))
        .for_each(|(s, d)| {
            for c in 0..N {
                d[c] = f(c, s[c].to_level());
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn negative() -> Vec<u8> {
        (0..=255u8).rev().collect()
    }

    #[test]
    fn test_identity_roundtrip() {
        let src: Image<u8, 1> = Image::from_data(2, 2, vec![10, 10, 200, 200]).unwrap();
        let out = apply(&src, &Lut::identity()).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn test_negative_scenario() {
        let src: Image<u8, 1> = Image::from_data(2, 2, vec![10, 10, 200, 200]).unwrap();
        let out = apply(&src, &Lut::Mono(negative())).unwrap();
        assert_eq!(out.data(), &[245, 245, 55, 55]);
    }

    #[test]
    fn test_negative_involution() {
        let src: Image<u8, 3> =
            Image::from_data(2, 1, vec![0, 128, 255, 17, 99, 203]).unwrap();
        let lut: Lut<u8, 3> = Lut::Mono(negative());
        let once = apply(&src, &lut).unwrap();
        let twice = apply(&once, &lut).unwrap();
        assert_eq!(twice, src);
    }

    #[test]
    fn test_mono_applied_to_every_channel() {
        let src: Image<u8, 3> = Image::filled(2, 2, [10, 20, 30]);
        let lut: Lut<u8, 3> = Lut::Mono(negative());
        let out = apply(&src, &lut).unwrap();
        assert_eq!(out.pixel(0, 0), [245, 235, 225]);
    }

    #[test]
    fn test_color_applied_per_channel() {
        let src: Image<u8, 3> = Image::filled(2, 2, [10, 20, 30]);
        let mut r = vec![0u8; 256];
        r[10] = 1;
        let mut g = vec![0u8; 256];
        g[20] = 2;
        let mut b = vec![0u8; 256];
        b[30] = 3;
        let lut: Lut<u8, 3> = Lut::Color([r, g, b]);
        let out = apply(&src, &lut).unwrap();
        assert_eq!(out.pixel(1, 1), [1, 2, 3]);
    }

    #[test]
    fn test_size_mismatch_rejected() {
        let src: Image<u8, 1> = Image::new(4, 4);
        let mut dst: Image<u8, 1> = Image::new(2, 2);
        assert!(matches!(
            apply_into(&src, &Lut::identity(), &mut dst),
            Err(LutError::SizeMismatch { .. })
        ));
    }

    #[test]
    fn test_level_mismatch_rejected() {
        let src: Image<u8, 1> = Image::new(2, 2);
        let mut dst: Image<u8, 1> = Image::new(2, 2);
        let short: Lut<u8, 1> = Lut::Mono(vec![0; 100]);
        assert!(matches!(
            apply_into(&src, &short, &mut dst),
            Err(LutError::LevelMismatch { .. })
        ));
    }
}
