//! Partition planner - Split an index range across workers

/// Half-open index range `[start, end)` handled by one worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    pub start: u128,
    pub end: u128,
}

impl Partition {
    pub fn len(&self) -> u128 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Split `[0, total)` into contiguous ranges.
///
/// The worker count is clamped to `1..=total`, every range gets
/// `total / workers` indices and the remainder goes to the last range.
/// An empty range yields an empty plan.
pub fn plan(total: u128, workers: usize) -> Vec<Partition> {
    if total == 0 {
        return Vec::new();
    }

    let workers = (workers.max(1) as u128).min(total);
    let step = total / workers;

    (0..workers)
        .map(|i| Partition {
            start: i * step,
            end: if i == workers - 1 { total } else { (i + 1) * step },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_even_split() {
        let parts = plan(100, 4);
        assert_eq!(parts.len(), 4);
        assert!(parts.iter().all(|p| p.len() == 25));
        assert_eq!(parts[3], Partition { start: 75, end: 100 });
    }

    #[test]
    fn test_remainder_goes_last() {
        let parts = plan(10, 3);
        assert_eq!(
            parts,
            vec![
                Partition { start: 0, end: 3 },
                Partition { start: 3, end: 6 },
                Partition { start: 6, end: 10 },
            ]
        );
    }

    #[test]
    fn test_worker_clamping() {
        // More workers than indices
        assert_eq!(plan(3, 8).len(), 3);
        // Zero workers behaves like one
        assert_eq!(plan(5, 0), vec![Partition { start: 0, end: 5 }]);
        assert!(plan(0, 4).is_empty());
    }

    proptest! {
        #[test]
        fn prop_partitions_cover_range(total in 1u128..100_000, workers in 0usize..64) {
            let parts = plan(total, workers);
            prop_assert!(!parts.is_empty());
            prop_assert_eq!(parts[0].start, 0);
            prop_assert_eq!(parts[parts.len() - 1].end, total);
            for pair in parts.windows(2) {
                prop_assert_eq!(pair[0].end, pair[1].start);
            }
            prop_assert!(parts.iter().all(|p| !p.is_empty()));
            let covered: u128 = parts.iter().map(Partition::len).sum();
            prop_assert_eq!(covered, total);
        }
    }
}
