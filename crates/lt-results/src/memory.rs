//! In-process sink that keeps every record.

use lt_sim::{OutputSink, ReportedRecord, SimResult};

/// Owned copy of a reported record.
#[derive(Clone, Debug, PartialEq)]
pub struct OwnedRecord {
    pub lunation: usize,
    pub phase_deg: f64,
    /// Layer temperatures, then brightness temperature
    pub temperatures_k: Vec<f64>,
}

impl OwnedRecord {
    pub fn surface_k(&self) -> f64 {
        self.temperatures_k[0]
    }

    pub fn brightness_k(&self) -> f64 {
        self.temperatures_k[self.temperatures_k.len() - 1]
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    pub records: Vec<OwnedRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records of one lunation, in step order.
    pub fn lunation(&self, lunation: usize) -> impl Iterator<Item = &OwnedRecord> {
        self.records.iter().filter(move |r| r.lunation == lunation)
    }
}

impl OutputSink for MemorySink {
    fn accept(&mut self, record: &ReportedRecord<'_>) -> SimResult<()> {
        self.records.push(OwnedRecord {
            lunation: record.lunation,
            phase_deg: record.phase_deg,
            temperatures_k: record.temperatures_k().collect(),
        });
        Ok(())
    }
}
