//! Property-based tests for the transpose, interleave and distance helpers.

#![allow(missing_docs, clippy::tests_outside_test_module)]

use hilbertspace::{
    Error, HilbertInterleaver, InterleaverCache, UnsignedPoint, calc_hilbert_index,
    hilbert::calc_hilbert_index_in, hilbert_coordinates, ops,
};
use proptest::prelude::*;

/// Largest value that fits in `bits` bits.
fn max_for(bits: u32) -> u32 {
    if bits >= 32 { u32::MAX } else { (1u32 << bits) - 1 }
}

/// A bit depth plus one coordinate per dimension that fits in it.
fn axes() -> impl Strategy<Value = (u32, Vec<u32>)> {
    (1usize..=12, 1u32..=32).prop_flat_map(|(dims, bits)| {
        (
            Just(bits),
            prop::collection::vec(0..=max_for(bits), dims),
        )
    })
}

/// Coordinates from small, half-width and full-width ranges.
fn coordinate() -> impl Strategy<Value = u32> {
    prop_oneof![0u32..1_000, 0u32..=u32::MAX >> 1, any::<u32>()]
}

/// Two points of equal dimensionality.
fn point_pair() -> impl Strategy<Value = (Vec<u32>, Vec<u32>)> {
    (1usize..=6).prop_flat_map(|n| {
        (
            prop::collection::vec(coordinate(), n),
            prop::collection::vec(coordinate(), n),
        )
    })
}

/// Two points on one ray from the origin, the second nudged off it by up to
/// two units per axis.
fn collinear_pair() -> impl Strategy<Value = (Vec<u32>, Vec<u32>)> {
    (
        prop::collection::vec(0u32..=8, 1..=4),
        0u32..=u32::MAX >> 4,
        0u32..=u32::MAX >> 4,
        0u32..=2,
    )
        .prop_map(|(dir, k, m, nudge)| {
            let a = dir.iter().map(|&d| d * k).collect();
            let b = dir.iter().map(|&d| d * m + nudge).collect();
            (a, b)
        })
}

/// Compare against the exact distance at the edges and at `extra`.
fn cmp_matches_exact(a: Vec<u32>, b: Vec<u32>, extra: u128) -> Result<(), TestCaseError> {
    let pa = UnsignedPoint::new(a);
    let pb = UnsignedPoint::new(b);
    let exact = pa.square_distance(&pb);
    for target in [0, exact.saturating_sub(1), exact, exact + 1, extra] {
        prop_assert_eq!(
            pa.square_distance_cmp(&pb, target),
            exact.cmp(&target),
            "{} to {} against {}",
            pa,
            pb,
            target
        );
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Transposing and untransposing recovers the axes.
    #[test]
    fn transpose_roundtrip((bits, coords) in axes()) {
        let t = ops::hilbert_index_transposed(&coords, bits)?;
        let axes = ops::hilbert_axes(&t, bits)?;
        prop_assert_eq!(axes.as_slice(), coords.as_slice());
    }

    /// Index and coordinates are mutual inverses.
    #[test]
    fn index_roundtrip((bits, coords) in axes()) {
        let index = calc_hilbert_index(&coords, bits)?;
        prop_assert!(index.bits() <= u64::from(bits) * coords.len() as u64);
        let back = hilbert_coordinates(&index, coords.len() as u32, bits)?;
        prop_assert_eq!(back.as_slice(), coords.as_slice());
    }

    /// The index does not depend on which cache produced the interleaver.
    #[test]
    fn index_is_deterministic((bits, coords) in axes()) {
        let fresh = InterleaverCache::new();
        let a = calc_hilbert_index_in(&fresh, &coords, bits)?;
        let b = calc_hilbert_index_in(&fresh, &coords, bits)?;
        let c = calc_hilbert_index(&coords, bits)?;
        let d = HilbertInterleaver::new(coords.len() as u32, bits)
            .untranspose(&ops::hilbert_index_transposed(&coords, bits)?);
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(&a, &c);
        prop_assert_eq!(&a, &d);
    }

    /// The batched byte path matches routing every bit on its own.
    #[test]
    fn interleave_matches_reference((bits, coords) in axes()) {
        let il = HilbertInterleaver::new(coords.len() as u32, bits);
        prop_assert_eq!(il.interleave(&coords), il.interleave_unordered(&coords));
    }

    /// Bit depths above 32 are rejected rather than shifted out of range.
    #[test]
    fn wide_bit_depth_is_rejected(bits in 33u32.., coords in prop::collection::vec(any::<u32>(), 1..4)) {
        prop_assert_eq!(
            calc_hilbert_index(&coords, bits),
            Err(Error::BitDepthTooLarge { bits })
        );
    }

    /// The bounded comparison agrees with the exact distance.
    #[test]
    fn square_distance_cmp_is_exact((a, b) in point_pair(), extra in any::<u128>()) {
        cmp_matches_exact(a, b, extra)?;
    }

    /// Collinear points are where the magnitude-gap bound is tight.
    #[test]
    fn square_distance_cmp_on_collinear_points((a, b) in collinear_pair(), extra in any::<u64>()) {
        cmp_matches_exact(a, b, u128::from(extra))?;
    }

    /// Squared distance matches the textbook formula on both code paths.
    #[test]
    fn square_distance_is_exact((a, b) in point_pair()) {
        let expected: u128 = a
            .iter()
            .zip(&b)
            .map(|(&x, &y)| u128::from(x.abs_diff(y)).pow(2))
            .sum();
        prop_assert_eq!(UnsignedPoint::new(a).square_distance(&UnsignedPoint::new(b)), expected);
    }
}
