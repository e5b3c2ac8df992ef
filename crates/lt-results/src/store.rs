//! Run storage API.
//!
//! Layout: `<root>/<run_id>/manifest.json` and `<root>/<run_id>/profile.csv`.

use crate::csv::CsvSink;
use crate::memory::OwnedRecord;
use crate::types::RunManifest;
use crate::{ResultsError, ResultsResult};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

const MANIFEST_FILE: &str = "manifest.json";
const PROFILE_FILE: &str = "profile.csv";

#[derive(Clone, Debug)]
pub struct RunStore {
    root_dir: PathBuf,
}

impl RunStore {
    pub fn new(root_dir: PathBuf) -> ResultsResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    fn run_dir(&self, run_id: &str) -> PathBuf {
        self.root_dir.join(run_id)
    }

    pub fn profile_path(&self, run_id: &str) -> PathBuf {
        self.run_dir(run_id).join(PROFILE_FILE)
    }

    pub fn has_run(&self, run_id: &str) -> bool {
        self.run_dir(run_id).join(MANIFEST_FILE).exists()
    }

    /// Open the profile CSV of a new run for streaming.
    pub fn create_sink(&self, run_id: &str) -> ResultsResult<CsvSink<BufWriter<File>>> {
        let run_dir = self.run_dir(run_id);
        fs::create_dir_all(&run_dir)?;
        let file = File::create(run_dir.join(PROFILE_FILE))?;
        Ok(CsvSink::new(BufWriter::new(file)))
    }

    pub fn save_manifest(&self, manifest: &RunManifest) -> ResultsResult<()> {
        let run_dir = self.run_dir(&manifest.run_id);
        fs::create_dir_all(&run_dir)?;
        let manifest_json = serde_json::to_string_pretty(manifest)?;
        fs::write(run_dir.join(MANIFEST_FILE), manifest_json)?;
        Ok(())
    }

    pub fn load_manifest(&self, run_id: &str) -> ResultsResult<RunManifest> {
        let manifest_path = self.run_dir(run_id).join(MANIFEST_FILE);

        if !manifest_path.exists() {
            return Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }

        let content = fs::read_to_string(manifest_path)?;
        let manifest = serde_json::from_str(&content)?;
        Ok(manifest)
    }

    /// Read back the stored rows (values as truncated on write).
    pub fn load_records(&self, run_id: &str) -> ResultsResult<Vec<OwnedRecord>> {
        let path = self.profile_path(run_id);

        if !path.exists() {
            return Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }

        let content = fs::read_to_string(path)?;
        let mut records = Vec::new();
        for (i, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with("lunation") {
                continue;
            }
            records.push(parse_row(i + 1, line)?);
        }
        Ok(records)
    }

    pub fn list_runs(&self) -> ResultsResult<Vec<RunManifest>> {
        let mut runs = Vec::new();

        if !self.root_dir.exists() {
            return Ok(runs);
        }

        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            if entry.path().is_dir() {
                let run_id = entry.file_name().to_string_lossy().to_string();
                if let Ok(manifest) = self.load_manifest(&run_id) {
                    runs.push(manifest);
                }
            }
        }

        runs.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(runs)
    }

    pub fn delete_run(&self, run_id: &str) -> ResultsResult<()> {
        let run_dir = self.run_dir(run_id);
        if run_dir.exists() {
            fs::remove_dir_all(run_dir)?;
        }
        Ok(())
    }
}

fn parse_row(line: usize, text: &str) -> ResultsResult<OwnedRecord> {
    let malformed = |message: String| ResultsError::MalformedRow { line, message };

    let mut fields = text.split(',');
    let lunation = fields
        .next()
        .ok_or_else(|| malformed("missing lunation".to_string()))?
        .parse::<usize>()
        .map_err(|e| malformed(format!("lunation: {e}")))?;
    let phase_deg = fields
        .next()
        .ok_or_else(|| malformed("missing phase".to_string()))?
        .parse::<f64>()
        .map_err(|e| malformed(format!("phase: {e}")))?;
    let temperatures_k = fields
        .map(|f| f.parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| malformed(format!("temperature: {e}")))?;

    if temperatures_k.len() < 2 {
        return Err(malformed("expected layer and brightness columns".to_string()));
    }

    Ok(OwnedRecord {
        lunation,
        phase_deg,
        temperatures_k,
    })
}
