//! Utilities module.

use nalgebra::Scalar;

/// Fast floating point minimum.  This function matches the semantics of
///
/// ```no_compile
/// if x < y { x } else { y }
/// ```
///
/// which has efficient instruction sequences on many platforms (1 instruction on x86).  For most
/// values, it matches the semantics of `x.min(y)`; the special cases are:
///
/// ```text
/// min(-0.0, +0.0); +0.0
/// min(+0.0, -0.0): -0.0
/// min( NaN,  1.0):  1.0
/// min( 1.0,  NaN):  NaN
/// ```
///
/// Note: This exists because [`std::cmp::min`] requires Ord which floating point types do not satisfy
#[inline(always)]
pub fn fast_min<T: Scalar + Copy + PartialOrd>(x: T, y: T) -> T {
    if x < y {
        x
    } else {
        y
    }
}

/// Fast floating point maximum.  This function matches the semantics of
///
/// ```no_compile
/// if x > y { x } else { y }
/// ```
///
/// which has efficient instruction sequences on many platforms (1 instruction on x86).  For most
/// values, it matches the semantics of `x.max(y)`; the special cases are:
///
/// ```text
/// max(-0.0, +0.0); +0.0
/// max(+0.0, -0.0): -0.0
/// max( NaN,  1.0):  1.0
/// max( 1.0,  NaN):  NaN
/// ```
///
/// Note: This exists because [`std::cmp::max`] requires Ord which floating point types do not satisfy
#[inline(always)]
pub fn fast_max<T: Scalar + Copy + PartialOrd>(x: T, y: T) -> T {
    if x > y {
        x
    } else {
        y
    }
}

#[cfg(test)]
mod tests {
    use crate::utils::{fast_max, fast_min};

    #[test]
    /// A NaN in the first position is discarded, a NaN in the second one is kept.
    fn test_fast_min_max_nan_position() {
        assert_eq!(fast_min(f64::NAN, 1.0), 1.0);
        assert!(fast_min(1.0, f64::NAN).is_nan());
        assert_eq!(fast_max(f64::NAN, 1.0), 1.0);
        assert!(fast_max(1.0, f64::NAN).is_nan());
    }

    #[test]
    fn test_fast_min_max_with_infinities() {
        assert_eq!(fast_min(f32::INFINITY, 2.0), 2.0);
        assert_eq!(fast_max(f32::NEG_INFINITY, 2.0), 2.0);
        assert_eq!(fast_min(f32::NEG_INFINITY, f32::INFINITY), f32::NEG_INFINITY);
    }
}
