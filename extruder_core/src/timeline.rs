//! Pressure advance parameter timeline.
//!
//! Parameters can change mid-print while earlier moves are still being
//! flushed into steps, so a single "current" record is not enough: the
//! solver looks parameters up by print time. Records are appended by
//! reconfiguration in activation-time order and pruned from the head once
//! step generation has advanced past them.

use std::collections::VecDeque;

/// Pressure advance response curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaMethod {
    /// `pressure_advance * velocity`.
    #[default]
    Linear,
    /// `offset * tanh(rel_v)`.
    Tanh,
    /// `offset * sign(rel_v) * (1 - exp(-|rel_v|))`.
    Exp,
    /// `offset * rel_v / (1 + |rel_v|)`.
    Recip,
    /// `offset * (2 / (1 + exp(-rel_v)) - 1)`, `rel_v` clamped to ±20.
    Sigmoid,
}

/// One pressure advance configuration, active from `active_print_time`
/// until superseded by a later record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaParams {
    pub method: PaMethod,
    /// Linear coefficient; used only by `PaMethod::Linear`.
    pub pressure_advance: f64,
    /// Saturation magnitude for the nonlinear methods.
    pub offset: f64,
    /// Inverse velocity normalization. Stored non-zero: a zero supplied to
    /// `append` is normalized to 1.0.
    pub linv: f64,
    /// Print time at which this record becomes the active configuration.
    pub active_print_time: f64,
}

impl PaParams {
    /// Whether two records produce identical corrections (activation time
    /// excluded).
    fn same_response(&self, other: &PaParams) -> bool {
        self.method == other.method
            && self.pressure_advance == other.pressure_advance
            && self.offset == other.offset
            && self.linv == other.linv
    }
}

/// Ordered history of pressure advance records, never empty.
///
/// Append-only at the tail, pruned at the head; activation times are
/// non-decreasing along the sequence.
#[derive(Debug)]
pub struct PaTimeline {
    records: VecDeque<PaParams>,
}

impl Default for PaTimeline {
    fn default() -> Self {
        Self::new()
    }
}

impl PaTimeline {
    /// Timeline seeded with a zero-effect linear record active from time 0,
    /// so lookups are defined before any reconfiguration arrives.
    pub fn new() -> Self {
        let mut records = VecDeque::new();
        records.push_back(PaParams {
            method: PaMethod::Linear,
            pressure_advance: 0.0,
            offset: 0.0,
            linv: 1.0,
            active_print_time: 0.0,
        });
        Self { records }
    }

    /// Append a record active from `active_print_time`.
    ///
    /// `linv` is normalized first (zero or degenerate values become 1.0).
    /// If the tail record already produces the same correction the call is
    /// a no-op; returns whether a record was actually added.
    pub fn append(
        &mut self,
        active_print_time: f64,
        pressure_advance: f64,
        method: PaMethod,
        offset: f64,
        linv: f64,
    ) -> bool {
        let linv = if linv == 0.0 || !linv.is_finite() {
            1.0
        } else {
            linv
        };
        let record = PaParams {
            method,
            pressure_advance,
            offset,
            linv,
            active_print_time,
        };
        if let Some(last) = self.records.back()
            && last.same_response(&record)
        {
            return false;
        }
        debug_assert!(
            self.records
                .back()
                .is_none_or(|last| active_print_time >= last.active_print_time),
            "records must be appended in activation-time order"
        );
        self.records.push_back(record);
        true
    }

    /// Drop head records no longer reachable by lookups at or after
    /// `horizon`. A head record is removable only while its successor also
    /// activates before the horizon; the timeline is never emptied.
    pub fn prune(&mut self, horizon: f64) {
        while self.records.len() > 1 {
            if self.records[1].active_print_time >= horizon {
                break;
            }
            self.records.pop_front();
        }
    }

    /// Latest record whose activation time is at or before `print_time`.
    ///
    /// A query preceding the earliest activation returns the earliest
    /// record; that fallback is defined behavior, not an error.
    pub fn lookup(&self, print_time: f64) -> &PaParams {
        self.records
            .iter()
            .rev()
            .find(|r| r.active_print_time <= print_time)
            .unwrap_or(&self.records[0])
    }

    /// Number of records currently retained.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timeline_with(times_and_pa: &[(f64, f64)]) -> PaTimeline {
        let mut tl = PaTimeline::new();
        for &(t, pa) in times_and_pa {
            tl.append(t, pa, PaMethod::Linear, 0.0, 1.0);
        }
        tl
    }

    #[test]
    fn seeded_with_zero_effect_record() {
        let tl = PaTimeline::new();
        assert_eq!(tl.record_count(), 1);
        let r = tl.lookup(123.0);
        assert_eq!(r.method, PaMethod::Linear);
        assert_eq!(r.pressure_advance, 0.0);
        assert_eq!(r.offset, 0.0);
        assert_eq!(r.linv, 1.0);
    }

    #[test]
    fn lookup_returns_latest_at_or_before_query() {
        let tl = timeline_with(&[(10.0, 0.1), (20.0, 0.2)]);
        assert_eq!(tl.lookup(5.0).pressure_advance, 0.0);
        assert_eq!(tl.lookup(10.0).pressure_advance, 0.1);
        assert_eq!(tl.lookup(15.0).pressure_advance, 0.1);
        assert_eq!(tl.lookup(25.0).pressure_advance, 0.2);
    }

    #[test]
    fn lookup_before_earliest_falls_back_to_earliest() {
        let mut tl = PaTimeline::new();
        tl.append(10.0, 0.1, PaMethod::Linear, 0.0, 1.0);
        // Prune away the seed so the earliest activation is 10.0.
        tl.prune(100.0);
        assert_eq!(tl.record_count(), 1);
        assert_eq!(tl.lookup(3.0).pressure_advance, 0.1);
    }

    #[test]
    fn append_dedupes_identical_tail() {
        let mut tl = PaTimeline::new();
        assert!(tl.append(10.0, 0.1, PaMethod::Tanh, 0.2, 30.0));
        assert!(!tl.append(20.0, 0.1, PaMethod::Tanh, 0.2, 30.0));
        assert_eq!(tl.record_count(), 2);
        // Any parameter change breaks the dedupe.
        assert!(tl.append(30.0, 0.1, PaMethod::Tanh, 0.3, 30.0));
        assert_eq!(tl.record_count(), 3);
    }

    #[test]
    fn append_normalizes_zero_linv_before_dedupe() {
        let mut tl = PaTimeline::new();
        tl.append(10.0, 0.1, PaMethod::Recip, 0.2, 0.0);
        assert_eq!(tl.lookup(10.0).linv, 1.0);
        // Explicit 1.0 matches the normalized stored value, so no new record.
        assert!(!tl.append(20.0, 0.1, PaMethod::Recip, 0.2, 1.0));
        assert_eq!(tl.record_count(), 2);
    }

    #[test]
    fn prune_keeps_record_covering_the_horizon() {
        let mut tl = timeline_with(&[(10.0, 0.1), (20.0, 0.2), (30.0, 0.3)]);
        assert_eq!(tl.record_count(), 4);
        // Lookups at 25.0 need the record activated at 20.0; earlier ones go.
        tl.prune(25.0);
        assert_eq!(tl.record_count(), 2);
        assert_eq!(tl.lookup(25.0).pressure_advance, 0.2);
        assert_eq!(tl.lookup(35.0).pressure_advance, 0.3);
    }

    #[test]
    fn prune_never_empties() {
        let mut tl = timeline_with(&[(10.0, 0.1)]);
        tl.prune(1e9);
        assert_eq!(tl.record_count(), 1);
        assert_eq!(tl.lookup(0.0).pressure_advance, 0.1);
    }
}
