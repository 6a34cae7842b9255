use anyhow::Context;
use chrono::DateTime;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

use crate::history::timestamp::{normalize, NormalizedTimestamp, Timestamp, TimestampInput};

/// A job as reported by the history server's `/jobs` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobData {
    #[serde(default, alias = "job_id")]
    pub job_id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: String,

    #[serde(
        default,
        alias = "submission_time",
        deserialize_with = "deserialize_timestamp"
    )]
    pub submission_time: Option<Timestamp>,
    #[serde(
        default,
        alias = "completion_time",
        deserialize_with = "deserialize_timestamp"
    )]
    pub completion_time: Option<Timestamp>,

    #[serde(default, alias = "stage_ids")]
    pub stage_ids: Option<Vec<i64>>,
}

impl JobData {
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("failed to decode job record")
    }

    pub fn list_from_json_str(json: &str) -> anyhow::Result<Vec<Self>> {
        serde_json::from_str(json).context("failed to decode job list")
    }

    pub fn execution_status(&self) -> JobExecutionStatus {
        JobExecutionStatus::parse(&self.status)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageData {
    #[serde(alias = "stage_id")]
    pub stage_id: i64,
    #[serde(default, alias = "attempt_id")]
    pub attempt_id: i64,
    #[serde(default)]
    pub name: Option<String>,
    pub status: String,
}

impl StageData {
    pub fn list_from_json_str(json: &str) -> anyhow::Result<Vec<Self>> {
        serde_json::from_str(json).context("failed to decode stage list")
    }

    pub fn stage_status(&self) -> StageStatus {
        StageStatus::parse(&self.status)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageStatus {
    Complete,
    Failed,
    Active,
    Pending,
    Skipped,
    Unrecognized,
}

impl StageStatus {
    pub fn parse(s: &str) -> Self {
        match s {
            "COMPLETE" => Self::Complete,
            "FAILED" => Self::Failed,
            "ACTIVE" => Self::Active,
            "PENDING" => Self::Pending,
            "SKIPPED" => Self::Skipped,
            _ => Self::Unrecognized,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Complete => "COMPLETE",
            Self::Failed => "FAILED",
            Self::Active => "ACTIVE",
            Self::Pending => "PENDING",
            Self::Skipped => "SKIPPED",
            Self::Unrecognized => "UNKNOWN",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobExecutionStatus {
    Running,
    Succeeded,
    Failed,
    Unknown,
}

impl JobExecutionStatus {
    pub fn parse(s: &str) -> Self {
        match s {
            "RUNNING" => Self::Running,
            "SUCCEEDED" => Self::Succeeded,
            "FAILED" => Self::Failed,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "RUNNING",
            Self::Succeeded => "SUCCEEDED",
            Self::Failed => "FAILED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// Turns a raw timestamp into a typed field value.
///
/// Inputs the normalizer hands back unchanged still get one more chance as
/// RFC 3339 text. Anything left over is logged and treated as absent rather
/// than failing the whole record.
pub fn decode_timestamp(input: TimestampInput) -> Option<Timestamp> {
    match normalize(Some(input))? {
        NormalizedTimestamp::Canonical(ts) => Some(ts),
        NormalizedTimestamp::Passthrough(TimestampInput::Text(text)) => {
            match DateTime::parse_from_rfc3339(&text) {
                Ok(ts) => Some(ts),
                Err(_) => {
                    warn!(value = %text, "unparseable timestamp, treating as absent");
                    None
                }
            }
        }
        NormalizedTimestamp::Passthrough(other) => {
            warn!(value = %other, "unsupported timestamp value, treating as absent");
            None
        }
    }
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw
        .and_then(TimestampInput::from_json)
        .and_then(decode_timestamp))
}
