//! Dataset export
//!
//! JSONL writers for the three run outputs: the activity table, the label
//! table, and the employee profiles (the answer key). One JSON object per
//! line, written through a buffered writer.

use crate::activity::DailyActivityRecord;
use crate::employee::EmployeeProfile;
use crate::labeling::LabelTable;
use crate::simulation::SimulationResult;
use crate::types::EmployeeId;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Paths of the files written by one export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFiles {
    /// Activity table (JSONL)
    pub dataset: PathBuf,
    /// Label table (JSONL)
    pub labels: PathBuf,
    /// Employee profiles (JSONL)
    pub profiles: PathBuf,
}

/// Writes the run outputs as JSONL files
#[derive(Debug, Default)]
pub struct DatasetExporter;

impl DatasetExporter {
    /// Create an exporter
    pub fn new() -> Self {
        Self
    }

    /// Export the dataset, labels, and profiles under `output_dir` using the
    /// given filename prefix. The directory is created if missing.
    pub fn export(
        &self,
        output_dir: impl AsRef<Path>,
        prefix: &str,
        records: &[DailyActivityRecord],
        labels: &LabelTable,
        employees: &BTreeMap<EmployeeId, EmployeeProfile>,
    ) -> SimulationResult<ExportedFiles> {
        let output_dir = output_dir.as_ref();
        fs::create_dir_all(output_dir)?;

        let dataset = output_dir.join(format!("{}_dataset.jsonl", prefix));
        self.write_jsonl(&dataset, records.iter())?;

        let labels_path = output_dir.join(format!("{}_labels.jsonl", prefix));
        self.write_jsonl(&labels_path, labels.labels().iter())?;

        let profiles = output_dir.join(format!("{}_profiles.jsonl", prefix));
        self.write_jsonl(&profiles, employees.values())?;

        info!(
            "Exported {} records, {} labels, {} profiles under {}",
            records.len(),
            labels.len(),
            employees.len(),
            output_dir.display()
        );

        Ok(ExportedFiles { dataset, labels: labels_path, profiles })
    }

    /// Write one serializable item per line
    fn write_jsonl<'a, T, I>(&self, path: &Path, items: I) -> SimulationResult<()>
    where
        T: Serialize + 'a,
        I: Iterator<Item = &'a T>,
    {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        for item in items {
            serde_json::to_writer(&mut writer, item)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(())
    }
}
