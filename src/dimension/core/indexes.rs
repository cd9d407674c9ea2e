//! Index-order sequences for grid coordinate generation.
//!
//! Three orderings cover every quantitative display mode: natural ascending,
//! FFT bin order (zero, positive-ascending, negative-descending), and the
//! centered order used for reciprocal coordinates of a dimension that is not
//! FFT-ordered. All are pure integer sequences; scaling by an interval and
//! offset subtraction happen in the dimension layer.

/// Natural ascending indexes `0, 1, …, count-1`.
pub fn natural_indexes(count: usize) -> Vec<i64> {
    (0..count as i64).collect()
}

/// FFT bin order: the first `ceil(count/2)` indexes ascend from 0, the
/// remaining `floor(count/2)` are `-floor(count/2), …, -1`.
///
/// # Examples
/// - `count = 8` → `[0, 1, 2, 3, -4, -3, -2, -1]`
/// - `count = 5` → `[0, 1, 2, -2, -1]`
pub fn fft_output_indexes(count: usize) -> Vec<i64> {
    let n = count as i64;
    let positive = n - n / 2; // ceil(count/2)
    let negative = n / 2; // floor(count/2)
    (0..positive).chain(-negative..0).collect()
}

/// Centered order `j - floor(count/2)` for `j = 0..count-1`.
///
/// One formula covers both parities: even counts span
/// `-count/2 … count/2 - 1`, odd counts span symmetrically.
///
/// # Examples
/// - `count = 4` → `[-2, -1, 0, 1]`
/// - `count = 5` → `[-2, -1, 0, 1, 2]`
pub fn centered_indexes(count: usize) -> Vec<i64> {
    let n = count as i64;
    let half = n / 2;
    (0..n).map(|j| j - half).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests pin the three index orderings for even and odd counts,
    // including the single-point edge.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Pin the FFT bin order for an even and an odd count.
    //
    // Given
    // -----
    // - Counts 8 and 5.
    //
    // Expect
    // ------
    // - [0,1,2,3,-4,-3,-2,-1] and [0,1,2,-2,-1].
    fn fft_output_indexes_match_bin_order_for_even_and_odd_counts() {
        // Act / Assert
        assert_eq!(fft_output_indexes(8), vec![0, 1, 2, 3, -4, -3, -2, -1]);
        assert_eq!(fft_output_indexes(5), vec![0, 1, 2, -2, -1]);
    }

    #[test]
    // Purpose
    // -------
    // Pin the centered order for an even and an odd count.
    //
    // Given
    // -----
    // - Counts 4 and 5.
    //
    // Expect
    // ------
    // - [-2,-1,0,1] and [-2,-1,0,1,2].
    fn centered_indexes_are_symmetric_up_to_parity() {
        // Act / Assert
        assert_eq!(centered_indexes(4), vec![-2, -1, 0, 1]);
        assert_eq!(centered_indexes(5), vec![-2, -1, 0, 1, 2]);
    }

    #[test]
    // Purpose
    // -------
    // Verify the single-point edge case for all three orderings.
    //
    // Given
    // -----
    // - Count 1.
    //
    // Expect
    // ------
    // - [0] natural, [0] FFT order, [0] centered.
    fn single_point_grids_index_at_zero_in_every_ordering() {
        // Act / Assert
        assert_eq!(natural_indexes(1), vec![0]);
        assert_eq!(fft_output_indexes(1), vec![0]);
        assert_eq!(centered_indexes(1), vec![0]);
    }
}
