//! Delimited result files consumed by external plotting.
//!
//! Two files are written into the data directory:
//! - `rewards.txt`: `training,epoch,total_reward`
//! - `optimal_policy.txt`: `training,low_recharge,low_search,low_wait,high_search,high_wait`

use crate::error::Result;
use crate::training::{EpochRecord, PolicyRecord, TrainingReport};
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

/// File name of the per-epoch reward log.
pub const REWARDS_FILE: &str = "rewards.txt";
/// File name of the per-run final estimates.
pub const POLICY_FILE: &str = "optimal_policy.txt";

const REWARDS_HEADER: [&str; 3] = ["training", "epoch", "total_reward"];
const POLICY_HEADER: [&str; 6] = [
    "training",
    "low_recharge",
    "low_search",
    "low_wait",
    "high_search",
    "high_wait",
];

/// Writes training results as CSV.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    rewards_path: PathBuf,
    policy_path: PathBuf,
}

impl ReportWriter {
    /// Creates `data_dir` if needed and truncates both files to their header rows.
    pub fn new(data_dir: &Path) -> Result<Self> {
        fs::create_dir_all(data_dir)?;
        let writer = Self {
            rewards_path: data_dir.join(REWARDS_FILE),
            policy_path: data_dir.join(POLICY_FILE),
        };

        write_header(&writer.rewards_path, &REWARDS_HEADER)?;
        write_header(&writer.policy_path, &POLICY_HEADER)?;

        log::info!("Writing results to {:?}", data_dir);
        Ok(writer)
    }

    /// Appends one epoch row.
    pub fn append_epoch(&self, record: &EpochRecord) -> Result<()> {
        append_rows(&self.rewards_path, std::slice::from_ref(record))
    }

    /// Appends one policy row.
    pub fn append_policy(&self, record: &PolicyRecord) -> Result<()> {
        append_rows(&self.policy_path, std::slice::from_ref(record))
    }

    /// Appends every row of a report.
    pub fn write_report(&self, report: &TrainingReport) -> Result<()> {
        append_rows(&self.rewards_path, &report.epochs)?;
        append_rows(&self.policy_path, &report.policies)?;
        log::info!(
            "Wrote {} epoch rows and {} policy rows",
            report.epochs.len(),
            report.policies.len()
        );
        Ok(())
    }

    pub fn rewards_path(&self) -> &Path {
        &self.rewards_path
    }

    pub fn policy_path(&self) -> &Path {
        &self.policy_path
    }
}

fn write_header(path: &Path, header: &[&str]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(header)?;
    writer.flush()?;
    Ok(())
}

fn append_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let file = OpenOptions::new().append(true).create(true).open(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
