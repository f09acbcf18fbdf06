// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

pub const MIN_RATING: f64 = 0.;
pub const MAX_RATING: f64 = 5.;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Range,
    RoundRobin,
}

impl Scheme {
    pub fn prefix(self) -> &'static str {
        match self {
            Scheme::Range => "range_part",
            Scheme::RoundRobin => "rrobin_part",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Scheme::Range => "range",
            Scheme::RoundRobin => "round-robin",
        }
    }

    pub fn table(self, index: usize) -> String {
        format!("{}{}", self.prefix(), index)
    }
}

/// Bin index for a rating over `partitions` equal-width bins in [0, 5].
///
/// Bounds are lower-exclusive and upper-inclusive, except bin 0 which
/// also contains 0.
pub fn bin_for_rating(rating: f64, partitions: usize) -> usize {
    // Scans the same boundary products the SQL predicates are built
    // from, so an incremental insert and a full rebuild always agree on
    // the destination bin, including at inexact boundary doubles.
    for bin in 0..partitions {
        let (lower, upper) = bin_bounds(bin, partitions);
        let in_bin = if bin == 0 {
            rating >= lower && rating <= upper
        } else {
            rating > lower && rating <= upper
        };

        if in_bin {
            return bin;
        }
    }

    partitions - 1
}

/// (lower, upper) boundaries of a bin; the SQL predicates decide
/// inclusivity.
pub fn bin_bounds(bin: usize, partitions: usize) -> (f64, f64) {
    let width = MAX_RATING / partitions as f64;
    (bin as f64 * width, (bin + 1) as f64 * width)
}

/// Destination partition for the next row given the current base-table
/// row count. Row k (1-based) belongs to partition (k - 1) mod n, and the
/// next row is number `current_rows + 1`.
pub fn round_robin_slot(current_rows: i64, partitions: usize) -> usize {
    (current_rows % partitions as i64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn scheme_tables() {
        assert_eq!(Scheme::Range.table(0), "range_part0");
        assert_eq!(Scheme::RoundRobin.table(4), "rrobin_part4");
    }

    #[test]
    fn zero_goes_to_first_bin() {
        for n in 1..=10 {
            assert_eq!(bin_for_rating(0., n), 0);
        }
    }

    #[test]
    fn five_goes_to_last_bin() {
        for n in 1..=10 {
            assert_eq!(bin_for_rating(5., n), n - 1);
        }
    }

    #[test]
    fn boundaries_are_upper_inclusive() {
        // With 5 partitions the bins are (0,1], (1,2], ... so an exact
        // boundary value belongs to the bin it closes.
        assert_eq!(bin_for_rating(1., 5), 0);
        assert_eq!(bin_for_rating(2., 5), 1);
        assert_eq!(bin_for_rating(2.5, 2), 0);
        assert_eq!(bin_for_rating(1.25, 4), 0);
        assert_eq!(bin_for_rating(2.5, 4), 1);
    }

    #[test]
    fn exact_boundary_doubles_stay_in_their_bin() {
        // The upper boundary belongs to the bin it closes even when the
        // boundary double is not exactly representable (e.g. 55/12).
        for n in 1..=64 {
            for bin in 0..n {
                let (_, upper) = bin_bounds(bin, n);
                assert_eq!(
                    bin_for_rating(upper, n),
                    bin,
                    "upper bound of bin {} of {} moved bins",
                    bin,
                    n
                );
            }
        }
    }

    #[test]
    fn every_rating_maps_to_exactly_one_bin() {
        for n in 1..=8 {
            for tenth in 0..=50 {
                let rating = f64::from(tenth) / 10.;
                let bin = bin_for_rating(rating, n);
                assert!(bin < n, "rating {} fell outside {} bins", rating, n);

                let (lower, upper) = bin_bounds(bin, n);
                if bin == 0 {
                    assert!(rating >= lower && rating <= upper);
                } else {
                    assert!(rating > lower && rating <= upper);
                }
            }
        }
    }

    #[test]
    fn bounds_cover_the_full_range() {
        let (lower, _) = bin_bounds(0, 4);
        let (_, upper) = bin_bounds(3, 4);

        assert_approx_eq!(lower, MIN_RATING);
        assert_approx_eq!(upper, MAX_RATING);

        let (prev_upper, _) = bin_bounds(2, 4);
        let (_, next_lower) = bin_bounds(1, 4);
        assert_approx_eq!(prev_upper, next_lower);
    }

    #[test]
    fn round_robin_assignment_matches_row_index() {
        // Row k goes to (k - 1) mod n; before row k is inserted the table
        // holds k - 1 rows.
        for n in 1..=6 {
            for k in 1..=50i64 {
                let slot = round_robin_slot(k - 1, n);
                assert_eq!(slot as i64, (k - 1) % n as i64);
            }
        }
    }

    #[test]
    fn round_robin_sizes_differ_by_at_most_one() {
        for n in 1..=7 {
            let mut sizes = vec![0u32; n];
            for row in 0..100i64 {
                sizes[round_robin_slot(row, n)] += 1;
            }

            let max = sizes.iter().max().unwrap();
            let min = sizes.iter().min().unwrap();
            assert!(max - min <= 1);
        }
    }
}
