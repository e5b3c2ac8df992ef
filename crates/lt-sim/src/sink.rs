//! Output sink interface.

use crate::error::SimResult;
use lt_model::DepthTemperatureProfile;

/// One retained step as handed to a sink.
#[derive(Clone, Copy, Debug)]
pub struct ReportedRecord<'a> {
    pub lunation: usize,
    /// Phase at the end of the step, in (0, 360]
    pub phase_deg: f64,
    pub profile: &'a DepthTemperatureProfile,
    pub brightness_k: f64,
}

impl ReportedRecord<'_> {
    /// Layer temperatures followed by the brightness temperature.
    pub fn temperatures_k(&self) -> impl Iterator<Item = f64> + '_ {
        self.profile
            .as_slice()
            .iter()
            .copied()
            .chain(std::iter::once(self.brightness_k))
    }
}

/// Consumer of reported records, called in step order.
pub trait OutputSink {
    /// Accept one record.
    fn accept(&mut self, record: &ReportedRecord<'_>) -> SimResult<()>;

    /// Called once after the last record.
    fn finish(&mut self) -> SimResult<()> {
        Ok(())
    }
}

/// Sink that drops everything, for runs that only need the summaries.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl OutputSink for NullSink {
    fn accept(&mut self, _record: &ReportedRecord<'_>) -> SimResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_appends_brightness() {
        let profile = DepthTemperatureProfile::from_values(vec![250.0, 240.0]).unwrap();
        let record = ReportedRecord {
            lunation: 0,
            phase_deg: 0.0,
            profile: &profile,
            brightness_k: 245.0,
        };
        let temps: Vec<f64> = record.temperatures_k().collect();
        assert_eq!(temps, vec![250.0, 240.0, 245.0]);
    }
}
