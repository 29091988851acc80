//! Export directory holding one run's CSV files and manifest.

use crate::csv::{write_control_csv, write_theta_csv};
use crate::types::RunManifest;
use crate::{ResultsError, ResultsResult};
use ps_sim::SimRecord;
use std::fs;
use std::path::{Path, PathBuf};

pub const THETA_FILE: &str = "theta.csv";
pub const CONTROL_FILE: &str = "torque.csv";
pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Clone, Debug)]
pub struct ExportBundle {
    dir: PathBuf,
}

impl ExportBundle {
    pub fn new(dir: PathBuf) -> ResultsResult<Self> {
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn has_manifest(&self) -> bool {
        self.dir.join(MANIFEST_FILE).exists()
    }

    /// Write `theta.csv`, `torque.csv` and `manifest.json`.
    ///
    /// The manifest's file list is filled in here.
    pub fn write(
        &self,
        manifest: &RunManifest,
        record: &SimRecord,
        unwrap: bool,
    ) -> ResultsResult<RunManifest> {
        write_theta_csv(&self.dir.join(THETA_FILE), record, unwrap)?;
        write_control_csv(&self.dir.join(CONTROL_FILE), record)?;

        let mut manifest = manifest.clone();
        manifest.files = vec![THETA_FILE.to_string(), CONTROL_FILE.to_string()];
        let manifest_json = serde_json::to_string_pretty(&manifest)?;
        fs::write(self.dir.join(MANIFEST_FILE), manifest_json)?;

        Ok(manifest)
    }

    pub fn load_manifest(&self) -> ResultsResult<RunManifest> {
        let path = self.dir.join(MANIFEST_FILE);
        if !path.exists() {
            return Err(ResultsError::ManifestNotFound {
                dir: self.dir.display().to_string(),
            });
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
