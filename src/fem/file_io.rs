use super::FemState;
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Assists in recording the accepted steps of a simulation
///
/// The driver notifies this struct exactly once per committed step (never on
/// rejected trials). When activated, each notification writes a JSON snapshot
/// of the state; either way, the committed times are collected in memory so
/// the caller can post-process the run. Heavier result sinks (visualization
/// export, force-displacement files) are external collaborators fed from the
/// same snapshots.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FileIo {
    /// Holds a flag to enable/disable the file generation
    enabled: bool,

    /// Defines the output directory
    output_dir: String,

    /// Defines the filename stem
    filename_stem: String,

    /// Holds the count of files written
    output_count: usize,

    /// Holds the indices of the output files
    pub indices: Vec<usize>,

    /// Holds the simulation times corresponding to each recorded state
    pub times: Vec<f64>,
}

impl FileIo {
    /// Allocates a new instance with deactivated generation of files
    ///
    /// Committed times are still collected in memory.
    pub fn new() -> Self {
        FileIo {
            enabled: false,
            output_dir: String::new(),
            filename_stem: String::new(),
            output_count: 0,
            indices: Vec::new(),
            times: Vec::new(),
        }
    }

    /// Activates the generation of files
    ///
    /// # Input
    ///
    /// * `output_dir` -- the directory to save the output files
    /// * `filename_stem` -- the last part of the filename without extension
    pub fn activate(&mut self, output_dir: &str, filename_stem: &str) -> Result<(), StrError> {
        fs::create_dir_all(output_dir).map_err(|_| "cannot create output directory")?;
        self.enabled = true;
        self.output_dir = output_dir.to_string();
        self.filename_stem = filename_stem.to_string();
        Ok(())
    }

    /// Generates the filename path for the state files
    pub fn path_state(&self, index: usize) -> String {
        if self.enabled {
            format!("{}/{}-{:0>20}.json", self.output_dir, self.filename_stem, index)
        } else {
            "".to_string()
        }
    }

    /// Generates the filename path for the summary file
    pub fn path_summary(&self) -> String {
        if self.enabled {
            format!("{}/{}-summary.json", self.output_dir, self.filename_stem)
        } else {
            "".to_string()
        }
    }

    /// Records the current state (called once per committed step)
    pub(crate) fn write_state(&mut self, state: &FemState) -> Result<(), StrError> {
        if self.enabled {
            let path = self.path_state(self.output_count);
            state.write_json(&path)?;
        }
        self.indices.push(self.output_count);
        self.times.push(state.t);
        self.output_count += 1;
        Ok(())
    }

    /// Writes this struct to the summary file
    pub(crate) fn write_self(&self) -> Result<(), StrError> {
        if self.enabled {
            let path = self.path_summary();
            self.write_json(&path)?;
        }
        Ok(())
    }

    /// Reads a JSON file containing this struct
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn read_json<P>(full_path: &P) -> Result<Self, StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        let file = File::open(path).map_err(|_| "cannot open file")?;
        let buffered = BufReader::new(file);
        let summary = serde_json::from_reader(buffered).map_err(|_| "cannot parse JSON file")?;
        Ok(summary)
    }

    /// Writes a JSON file with this struct
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn write_json<P>(&self, full_path: &P) -> Result<(), StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        if let Some(p) = path.parent() {
            fs::create_dir_all(p).map_err(|_| "cannot create directory")?;
        }
        let mut file = File::create(&path).map_err(|_| "cannot create file")?;
        serde_json::to_writer(&mut file, &self).map_err(|_| "cannot write file")?;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
