use serde::{Deserialize, Serialize};

/// Simplified view of one SQL execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SqlQuerySummary {
    pub id: i64,
    /// Milliseconds.
    #[serde(default)]
    pub duration: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    pub status: String,
    #[serde(default, alias = "submission_time")]
    pub submission_time: Option<String>,
    #[serde(alias = "plan_description")]
    pub plan_description: String,

    #[serde(alias = "success_job_ids")]
    pub success_job_ids: Vec<i64>,
    #[serde(alias = "failed_job_ids")]
    pub failed_job_ids: Vec<i64>,
    #[serde(alias = "running_job_ids")]
    pub running_job_ids: Vec<i64>,
}
