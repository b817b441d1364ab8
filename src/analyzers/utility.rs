/// Rounds `numerator / denominator` to the nearest integer, ties to even.
///
/// Works on the exact rational so the tie-break is not at the mercy of float
/// representation. Returns 0 when `denominator` is 0.
pub fn round_ratio(numerator: usize, denominator: usize) -> usize {
    if denominator == 0 {
        return 0;
    }

    let quotient = numerator / denominator;
    let twice_remainder = 2 * (numerator % denominator);

    match twice_remainder.cmp(&denominator) {
        std::cmp::Ordering::Less => quotient,
        std::cmp::Ordering::Greater => quotient + 1,
        std::cmp::Ordering::Equal => quotient + quotient % 2,
    }
}

/// `part` as a whole-number percentage of `total`, rounded with [`round_ratio`].
pub fn percentage(part: usize, total: usize) -> usize {
    round_ratio(part * 100, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_ratio_zero_denominator() {
        assert_eq!(round_ratio(10, 0), 0);
    }

    #[test]
    fn test_round_ratio_nearest() {
        assert_eq!(round_ratio(100, 3), 33);
        assert_eq!(round_ratio(200, 3), 67);
        assert_eq!(round_ratio(23, 24), 1);
        assert_eq!(round_ratio(11, 24), 0);
    }

    #[test]
    fn test_round_ratio_ties_to_even() {
        assert_eq!(round_ratio(12, 24), 0);
        assert_eq!(round_ratio(36, 24), 2);
        assert_eq!(round_ratio(60, 24), 2);
        assert_eq!(round_ratio(5, 2), 2);
        assert_eq!(round_ratio(7, 2), 4);
    }

    #[test]
    fn test_percentage_bounds() {
        assert_eq!(percentage(0, 7), 0);
        assert_eq!(percentage(7, 7), 100);
        assert_eq!(percentage(1, 4), 25);
        assert_eq!(percentage(1, 8), 12);
        assert_eq!(percentage(3, 8), 38);
    }
}
