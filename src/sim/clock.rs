//! Fixed-step accumulator
//!
//! Converts real frame time into whole logical ticks. Leftover fractional
//! time carries over to the next frame; a long stall is capped at
//! `MAX_SUBSTEPS` ticks and the remaining backlog is dropped.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone, PartialEq)]
pub struct FixedClock {
    accumulator: f64,
    max_substeps: u32,
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::new(MAX_SUBSTEPS)
    }
}

impl FixedClock {
    pub fn new(max_substeps: u32) -> Self {
        Self {
            accumulator: 0.0,
            max_substeps: max_substeps.max(1),
        }
    }

    /// Feed `real_dt` seconds of wall time; returns the ticks to simulate
    pub fn advance(&mut self, real_dt: f64) -> u32 {
        if !real_dt.is_finite() || real_dt <= 0.0 {
            return 0;
        }

        self.accumulator += real_dt;
        let mut ticks = 0;
        while self.accumulator >= SIM_DT && ticks < self.max_substeps {
            self.accumulator -= SIM_DT;
            ticks += 1;
        }

        if self.accumulator >= SIM_DT {
            log::debug!(
                "Dropping {:.3}s of simulation backlog",
                self.accumulator - self.accumulator % SIM_DT
            );
            self.accumulator %= SIM_DT;
        }
        ticks
    }

    /// Forget any partial step (used while paused so nothing catches up)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    /// Fraction of the next tick already accumulated, for render interpolation
    pub fn alpha(&self) -> f64 {
        self.accumulator / SIM_DT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_tick_per_sixtieth() {
        let mut clock = FixedClock::default();
        let total: u32 = (0..60).map(|_| clock.advance(SIM_DT)).sum();
        assert_eq!(total, 60);
    }

    #[test]
    fn fractional_frames_carry_over() {
        let mut clock = FixedClock::default();
        assert_eq!(clock.advance(SIM_DT * 0.5), 0);
        assert!((clock.alpha() - 0.5).abs() < 1e-9);
        assert_eq!(clock.advance(SIM_DT * 0.75), 1);
        assert!((clock.alpha() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn slow_frame_runs_several_ticks() {
        let mut clock = FixedClock::default();
        assert_eq!(clock.advance(SIM_DT * 3.0 + SIM_DT * 0.1), 3);
    }

    #[test]
    fn stall_is_capped_and_backlog_dropped() {
        let mut clock = FixedClock::new(8);
        assert_eq!(clock.advance(1.0), 8);
        assert!(clock.alpha() < 1.0);
        assert_eq!(clock.advance(SIM_DT), 1);
    }

    #[test]
    fn bogus_frame_times_are_ignored() {
        let mut clock = FixedClock::default();
        assert_eq!(clock.advance(-1.0), 0);
        assert_eq!(clock.advance(f64::NAN), 0);
        assert_eq!(clock.advance(0.0), 0);
        assert_eq!(clock.alpha(), 0.0);
    }
}
