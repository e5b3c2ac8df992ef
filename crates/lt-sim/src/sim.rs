//! Simulation runner and lunation summaries.

use crate::error::{SimError, SimResult};
use crate::schedule::PhaseSchedule;
use crate::sink::{OutputSink, ReportedRecord};
use lt_model::{DepthTemperatureProfile, StabilityReport, ThermalStepper};
use tracing::{debug, info, warn};

/// Options for simulation runs.
#[derive(Clone, Debug)]
pub struct SimOptions {
    /// Number of full rotations to simulate
    pub lunations: usize,
    /// Phase advance per step (degrees); also sets the time step
    pub phase_increment_deg: f64,
    /// Lunations with index below this are run but not reported
    pub warmup_lunations: usize,
    /// Stop with an error on non-finite or non-positive temperatures
    pub halt_on_divergence: bool,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            lunations: 16,
            phase_increment_deg: 0.05,
            warmup_lunations: 15,
            halt_on_divergence: true,
        }
    }
}

impl SimOptions {
    pub fn validate(&self) -> SimResult<()> {
        if self.warmup_lunations >= self.lunations {
            return Err(SimError::InvalidArg {
                what: "warmup_lunations must be below lunations",
            });
        }
        Ok(())
    }
}

/// State threaded through the run; owned by the driver.
#[derive(Clone, Debug)]
pub struct SimulationState {
    pub profile: DepthTemperatureProfile,
    /// Phase the profile corresponds to, at the end of the last step
    pub phase_deg: f64,
    pub lunation: usize,
    pub brightness_k: f64,
}

/// Statistics of one completed lunation.
#[derive(Clone, Debug, PartialEq)]
pub struct LunationSummary {
    pub lunation: usize,
    pub surface_min_k: f64,
    pub surface_max_k: f64,
    pub surface_mean_k: f64,
    pub brightness_mean_k: f64,
    /// Largest surface change against the previous lunation at equal phase
    pub max_surface_change_k: Option<f64>,
    /// Largest layer change between this and the previous lunation's end profile
    pub max_profile_change_k: Option<f64>,
}

/// Progress snapshot passed to the progress callback.
#[derive(Clone, Debug)]
pub struct SimProgress {
    pub lunation: usize,
    pub lunations: usize,
    pub phase_deg: f64,
    pub step: usize,
    pub total_steps: usize,
    pub fraction_complete: f64,
}

/// Outcome of a completed run.
#[derive(Clone, Debug)]
pub struct RunReport {
    pub steps: usize,
    pub records: usize,
    pub stability: StabilityReport,
    pub summaries: Vec<LunationSummary>,
    pub final_state: SimulationState,
}

impl RunReport {
    /// Convergence metric of the last lunation, if there was a previous one.
    pub fn final_surface_change_k(&self) -> Option<f64> {
        self.summaries.last().and_then(|s| s.max_surface_change_k)
    }
}

/// Accumulates one lunation's surface trace.
struct LunationAccumulator {
    surface_k: Vec<f64>,
    brightness_sum_k: f64,
}

impl LunationAccumulator {
    fn with_capacity(n: usize) -> Self {
        Self {
            surface_k: Vec::with_capacity(n),
            brightness_sum_k: 0.0,
        }
    }

    fn push(&mut self, surface_k: f64, brightness_k: f64) {
        self.surface_k.push(surface_k);
        self.brightness_sum_k += brightness_k;
    }

    fn summarize(
        &self,
        lunation: usize,
        previous: Option<&[f64]>,
        profile_change_k: Option<f64>,
    ) -> LunationSummary {
        let n = self.surface_k.len().max(1) as f64;
        let min = self.surface_k.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self
            .surface_k
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        let mean = self.surface_k.iter().sum::<f64>() / n;
        let change = previous.map(|prev| {
            prev.iter()
                .zip(&self.surface_k)
                .map(|(a, b)| (a - b).abs())
                .fold(0.0, f64::max)
        });
        LunationSummary {
            lunation,
            surface_min_k: min,
            surface_max_k: max,
            surface_mean_k: mean,
            brightness_mean_k: self.brightness_sum_k / n,
            max_surface_change_k: change,
            max_profile_change_k: profile_change_k,
        }
    }
}

/// Run the stepper over the full schedule, reporting retained steps to `sink`.
pub fn run_sim(
    stepper: &ThermalStepper,
    initial: DepthTemperatureProfile,
    opts: &SimOptions,
    sink: &mut dyn OutputSink,
) -> SimResult<RunReport> {
    run_sim_with_progress(stepper, initial, opts, sink, None)
}

/// [`run_sim`] with an optional progress callback.
pub fn run_sim_with_progress(
    stepper: &ThermalStepper,
    initial: DepthTemperatureProfile,
    opts: &SimOptions,
    sink: &mut dyn OutputSink,
    mut progress: Option<&mut dyn FnMut(&SimProgress)>,
) -> SimResult<RunReport> {
    opts.validate()?;
    let schedule = PhaseSchedule::new(opts.lunations, opts.phase_increment_deg)?;
    initial.check_layout(stepper.config())?;

    let stability =
        StabilityReport::for_phase_increment(stepper.config(), opts.phase_increment_deg);
    if !stability.is_stable() {
        warn!(
            dt_s = stability.dt_s,
            limit_s = stability.limit_s(),
            margin = stability.margin(),
            "time step exceeds the explicit stability limit"
        );
    }

    info!(
        lunations = opts.lunations,
        warmup = opts.warmup_lunations,
        phase_increment_deg = opts.phase_increment_deg,
        dt_s = stability.dt_s,
        layers = initial.len(),
        "run starting"
    );

    let total_steps = schedule.total_steps();
    let per_lunation = schedule.steps_per_lunation();
    let progress_every = (total_steps / 200).max(1);

    let mut state = SimulationState {
        brightness_k: stepper.config().mean_temperature_k,
        profile: initial,
        phase_deg: 0.0,
        lunation: 0,
    };
    let mut records = 0;
    let mut summaries = Vec::with_capacity(opts.lunations);
    let mut previous_trace: Option<Vec<f64>> = None;
    let mut previous_end: Option<DepthTemperatureProfile> = None;
    let mut current = LunationAccumulator::with_capacity(per_lunation);

    for (k, point) in schedule.iter().enumerate() {
        let out = stepper.step(&state.profile, point.phase_deg, opts.phase_increment_deg);
        state = SimulationState {
            profile: out.profile,
            phase_deg: point.end_phase_deg,
            lunation: point.lunation,
            brightness_k: out.brightness_k,
        };

        if opts.halt_on_divergence {
            if let Some((layer, value_k)) = state.profile.first_non_physical() {
                return Err(SimError::Diverged {
                    lunation: point.lunation,
                    phase_deg: point.phase_deg,
                    layer,
                    value_k,
                });
            }
        }

        current.push(state.profile.surface_k(), state.brightness_k);

        if point.lunation >= opts.warmup_lunations {
            sink.accept(&ReportedRecord {
                lunation: point.lunation,
                phase_deg: point.end_phase_deg,
                profile: &state.profile,
                brightness_k: state.brightness_k,
            })?;
            records += 1;
        }

        if point.step + 1 == per_lunation {
            let profile_change = previous_end
                .as_ref()
                .map(|prev| state.profile.max_abs_diff(prev));
            let summary =
                current.summarize(point.lunation, previous_trace.as_deref(), profile_change);
            debug!(
                lunation = summary.lunation,
                surface_min_k = summary.surface_min_k,
                surface_max_k = summary.surface_max_k,
                brightness_mean_k = summary.brightness_mean_k,
                change_k = ?summary.max_surface_change_k,
                profile_change_k = ?summary.max_profile_change_k,
                "lunation complete"
            );
            previous_end = Some(state.profile.clone());
            summaries.push(summary);
            let finished =
                std::mem::replace(&mut current, LunationAccumulator::with_capacity(per_lunation));
            previous_trace = Some(finished.surface_k);
        }

        let done = k + 1;
        if let Some(cb) = progress.as_deref_mut() {
            if done % progress_every == 0 || done == total_steps {
                cb(&SimProgress {
                    lunation: point.lunation,
                    lunations: opts.lunations,
                    phase_deg: point.end_phase_deg,
                    step: done,
                    total_steps,
                    fraction_complete: done as f64 / total_steps as f64,
                });
            }
        }
    }

    sink.finish()?;

    let report = RunReport {
        steps: total_steps,
        records,
        stability,
        summaries,
        final_state: state,
    };
    info!(
        steps = report.steps,
        records = report.records,
        final_change_k = ?report.final_surface_change_k(),
        "run complete"
    );
    Ok(report)
}
