//! Lunation and phase bookkeeping.
//!
//! Phases are derived from the step index (`k * increment`) rather than
//! accumulated, so every lunation visits the same phase grid. A step taken
//! with the sun at `phase_deg` ends at `end_phase_deg`, one increment later;
//! reported records carry the end phase, so a lunation reads
//! `d, 2d, ..., 360`.

use crate::error::{SimError, SimResult};

/// One scheduled step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhasePoint {
    /// 0-based lunation index
    pub lunation: usize,
    /// 0-based step index within the lunation
    pub step: usize,
    /// Solar phase in [0, 360) degrees the step is computed at
    pub phase_deg: f64,
    /// Phase reached once the step is applied
    pub end_phase_deg: f64,
}

/// Bounded double loop over lunations and phase steps.
#[derive(Clone, Debug)]
pub struct PhaseSchedule {
    lunations: usize,
    phase_increment_deg: f64,
    steps_per_lunation: usize,
}

impl PhaseSchedule {
    pub fn new(lunations: usize, phase_increment_deg: f64) -> SimResult<Self> {
        if lunations == 0 {
            return Err(SimError::InvalidArg {
                what: "lunations must be positive",
            });
        }
        if !phase_increment_deg.is_finite() || phase_increment_deg <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "phase increment must be positive",
            });
        }
        if phase_increment_deg > 360.0 {
            return Err(SimError::InvalidArg {
                what: "phase increment must not exceed 360 degrees",
            });
        }

        Ok(Self {
            lunations,
            phase_increment_deg,
            steps_per_lunation: steps_for_increment(phase_increment_deg),
        })
    }

    pub fn lunations(&self) -> usize {
        self.lunations
    }

    pub fn phase_increment_deg(&self) -> f64 {
        self.phase_increment_deg
    }

    pub fn steps_per_lunation(&self) -> usize {
        self.steps_per_lunation
    }

    pub fn total_steps(&self) -> usize {
        self.lunations * self.steps_per_lunation
    }

    pub fn iter(&self) -> PhaseIter {
        PhaseIter {
            schedule: self.clone(),
            next: 0,
        }
    }
}

impl IntoIterator for &PhaseSchedule {
    type Item = PhasePoint;
    type IntoIter = PhaseIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Number of phases `0, d, 2d, ...` strictly below 360.
fn steps_for_increment(phase_increment_deg: f64) -> usize {
    let ratio = 360.0 / phase_increment_deg;
    let nearest = ratio.round();
    // 360 / 0.05 must give 7200 steps, not 7201
    if (ratio - nearest).abs() <= 1e-9 * nearest {
        nearest as usize
    } else {
        ratio.ceil() as usize
    }
}

/// Lazy sequence of [`PhasePoint`]s.
#[derive(Clone, Debug)]
pub struct PhaseIter {
    schedule: PhaseSchedule,
    next: usize,
}

impl Iterator for PhaseIter {
    type Item = PhasePoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.schedule.total_steps() {
            return None;
        }
        let per = self.schedule.steps_per_lunation;
        let inc = self.schedule.phase_increment_deg;
        let step = self.next % per;
        let point = PhasePoint {
            lunation: self.next / per,
            step,
            phase_deg: step as f64 * inc,
            end_phase_deg: (step + 1) as f64 * inc,
        };
        self.next += 1;
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.schedule.total_steps() - self.next;
        (left, Some(left))
    }
}

impl ExactSizeIterator for PhaseIter {}
