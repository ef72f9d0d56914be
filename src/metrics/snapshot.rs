/// Point-in-time copy of every heap counter.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HeapMapMetricsSnapshot {
    pub insert_calls: u64,
    pub insert_new: u64,
    pub insert_updates: u64,
    pub insert_rejected: u64, // new keys refused with HeapFull

    pub pops: u64,
    pub sift_up_steps: u64,
    pub sift_down_steps: u64,

    pub top_nodes_calls: u64,
    pub top_nodes_returned: u64,

    pub priority_calls: u64,
    pub priority_hits: u64,
    pub priority_misses: u64,
    pub top_calls: u64,
    pub top_empty: u64,

    // gauges captured at snapshot time
    pub len: usize,
    pub capacity: usize,
}

impl HeapMapMetricsSnapshot {
    /// Fraction of `priority` lookups that found their key, or `0.0` if none ran.
    pub fn priority_hit_ratio(&self) -> f64 {
        if self.priority_calls == 0 {
            0.0
        } else {
            self.priority_hits as f64 / self.priority_calls as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_ratio_handles_zero_calls() {
        let snapshot = HeapMapMetricsSnapshot::default();
        assert_eq!(snapshot.priority_hit_ratio(), 0.0);
    }

    #[test]
    fn hit_ratio_divides_hits_by_calls() {
        let snapshot = HeapMapMetricsSnapshot {
            priority_calls: 4,
            priority_hits: 3,
            priority_misses: 1,
            ..Default::default()
        };
        assert!((snapshot.priority_hit_ratio() - 0.75).abs() < f64::EPSILON);
    }
}
