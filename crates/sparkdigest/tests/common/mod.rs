use chrono::{DateTime, Duration};
use sparkdigest::history::Timestamp;
use sparkdigest::{JobData, StageData};

#[allow(dead_code)]
pub const JOBS_JSON: &str = include_str!("../fixtures/jobs.json");
#[allow(dead_code)]
pub const STAGES_JSON: &str = include_str!("../fixtures/stages.json");

#[allow(dead_code)]
pub fn ts(rfc3339: &str) -> Timestamp {
    DateTime::parse_from_rfc3339(rfc3339).expect("valid rfc3339 in test")
}

#[allow(dead_code)]
pub fn job(stage_ids: Option<Vec<i64>>) -> JobData {
    JobData {
        job_id: Some(1),
        name: "test_job".to_string(),
        description: Some("test job".to_string()),
        status: "SUCCEEDED".to_string(),
        submission_time: None,
        completion_time: None,
        stage_ids,
    }
}

#[allow(dead_code)]
pub fn timed_job(stage_ids: Vec<i64>, elapsed: Duration) -> JobData {
    let submitted = ts("2024-01-01T00:00:00+00:00");
    JobData {
        submission_time: Some(submitted),
        completion_time: Some(submitted + elapsed),
        ..job(Some(stage_ids))
    }
}

#[allow(dead_code)]
pub fn stage(stage_id: i64, status: &str) -> StageData {
    StageData {
        stage_id,
        status: status.to_string(),
        ..StageData::default()
    }
}
