use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::history::{JobData, JobExecutionStatus, StageData, StageStatus, Timestamp};

/// Compact view of a job for LLM and dashboard consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    #[serde(default, alias = "job_id")]
    pub job_id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: String,

    #[serde(default, alias = "submission_time")]
    pub submission_time: Option<Timestamp>,
    #[serde(default, alias = "completion_time")]
    pub completion_time: Option<Timestamp>,

    // keyed as-is on the wire, no camelCase alias
    #[serde(default, rename = "duration_seconds")]
    pub duration_seconds: Option<f64>,

    #[serde(default, alias = "succeeded_stage_ids")]
    pub succeeded_stage_ids: Vec<i64>,
    #[serde(default, alias = "failed_stage_ids")]
    pub failed_stage_ids: Vec<i64>,
    #[serde(default, alias = "active_stage_ids")]
    pub active_stage_ids: Vec<i64>,
    #[serde(default, alias = "pending_stage_ids")]
    pub pending_stage_ids: Vec<i64>,
    #[serde(default, alias = "skipped_stage_ids")]
    pub skipped_stage_ids: Vec<i64>,
}

impl JobSummary {
    /// Builds a summary from a decoded job and, optionally, the stages it ran.
    ///
    /// Stage IDs without a matching stage record, or whose status is not one
    /// of the five known states, end up in no bucket.
    pub fn from_job_data(job: &JobData, stages: Option<&[StageData]>) -> Self {
        let duration_seconds = match (job.submission_time, job.completion_time) {
            (Some(submitted), Some(completed)) => Some(elapsed_seconds(submitted, completed)),
            _ => None,
        };

        let buckets = match (stages, job.stage_ids.as_deref()) {
            (Some(stages), Some(stage_ids)) if !stages.is_empty() && !stage_ids.is_empty() => {
                let buckets = StageBuckets::classify(stage_ids, stages);

                let dropped = stage_ids.len() - buckets.len();
                if dropped > 0 {
                    debug!(
                        job_id = ?job.job_id,
                        dropped,
                        "stage ids with unknown status left out of every bucket"
                    );
                }

                buckets
            }
            _ => StageBuckets::default(),
        };

        Self {
            job_id: job.job_id,
            name: job.name.clone(),
            description: job.description.clone(),
            status: job.status.clone(),
            submission_time: job.submission_time,
            completion_time: job.completion_time,
            duration_seconds,
            succeeded_stage_ids: buckets.succeeded,
            failed_stage_ids: buckets.failed,
            active_stage_ids: buckets.active,
            pending_stage_ids: buckets.pending,
            skipped_stage_ids: buckets.skipped,
        }
    }

    /// Number of stage IDs that landed in some bucket.
    pub fn classified_stage_count(&self) -> usize {
        self.succeeded_stage_ids.len()
            + self.failed_stage_ids.len()
            + self.active_stage_ids.len()
            + self.pending_stage_ids.len()
            + self.skipped_stage_ids.len()
    }

    pub fn is_finished(&self) -> bool {
        matches!(
            JobExecutionStatus::parse(&self.status),
            JobExecutionStatus::Succeeded | JobExecutionStatus::Failed
        )
    }
}

/// Summarizes every job against the same stage list, keeping input order.
pub fn summarize_jobs(jobs: &[JobData], stages: Option<&[StageData]>) -> Vec<JobSummary> {
    jobs.iter()
        .map(|job| JobSummary::from_job_data(job, stages))
        .collect()
}

#[derive(Debug, Default)]
struct StageBuckets {
    succeeded: Vec<i64>,
    failed: Vec<i64>,
    active: Vec<i64>,
    pending: Vec<i64>,
    skipped: Vec<i64>,
}

impl StageBuckets {
    fn classify(stage_ids: &[i64], stages: &[StageData]) -> Self {
        // later attempts of the same stage overwrite earlier ones
        let status_by_id: HashMap<i64, StageStatus> = stages
            .iter()
            .map(|s| (s.stage_id, s.stage_status()))
            .collect();

        let mut buckets = Self::default();
        for &stage_id in stage_ids {
            let status = status_by_id
                .get(&stage_id)
                .copied()
                .unwrap_or(StageStatus::Unrecognized);
            buckets.push(stage_id, status);
        }

        buckets
    }

    fn push(&mut self, stage_id: i64, status: StageStatus) {
        let bucket = match status {
            StageStatus::Complete => &mut self.succeeded,
            StageStatus::Failed => &mut self.failed,
            StageStatus::Active => &mut self.active,
            StageStatus::Pending => &mut self.pending,
            StageStatus::Skipped => &mut self.skipped,
            StageStatus::Unrecognized => return,
        };
        bucket.push(stage_id);
    }

    fn len(&self) -> usize {
        self.succeeded.len()
            + self.failed.len()
            + self.active.len()
            + self.pending.len()
            + self.skipped.len()
    }
}

// Negative when the source clocks disagree; passed through as-is.
fn elapsed_seconds(submitted: Timestamp, completed: Timestamp) -> f64 {
    let elapsed = completed.signed_duration_since(submitted);
    match elapsed.num_microseconds() {
        Some(micros) => micros as f64 / 1_000_000.0,
        None => elapsed.num_milliseconds() as f64 / 1_000.0,
    }
}
