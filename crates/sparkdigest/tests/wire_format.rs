// crates/sparkdigest/tests/wire_format.rs
mod common;

use chrono::Duration;
use common::{stage, timed_job};
use serde_json::json;
use sparkdigest::history::{
    normalize, to_canonical_string, NormalizedTimestamp, TimestampInput,
};
use sparkdigest::{JobSummary, SqlQuerySummary};

#[test]
fn job_summary_uses_wire_keys() {
    let job = timed_job(vec![1, 2], Duration::milliseconds(1_500));
    let stages = vec![stage(1, "COMPLETE"), stage(2, "ACTIVE")];

    let summary = JobSummary::from_job_data(&job, Some(&stages));
    let value = serde_json::to_value(&summary).unwrap();

    assert_eq!(
        value,
        json!({
            "jobId": 1,
            "name": "test_job",
            "description": "test job",
            "status": "SUCCEEDED",
            "submissionTime": "2024-01-01T00:00:00Z",
            "completionTime": "2024-01-01T00:00:01.500Z",
            "duration_seconds": 1.5,
            "succeededStageIds": [1],
            "failedStageIds": [],
            "activeStageIds": [2],
            "pendingStageIds": [],
            "skippedStageIds": []
        })
    );
}

#[test]
fn printed_timestamps_match_serialized_ones() {
    let job = timed_job(vec![], Duration::milliseconds(1_500));
    let summary = JobSummary::from_job_data(&job, None);
    let value = serde_json::to_value(&summary).unwrap();

    let completed = summary.completion_time.unwrap();
    assert_eq!(value["completionTime"], json!(to_canonical_string(&completed)));
    assert_eq!(
        NormalizedTimestamp::Canonical(completed).to_string(),
        "2024-01-01T00:00:01.500Z"
    );

    let from_gmt = normalize(Some(TimestampInput::Text(
        "2024-01-01T00:00:00.000GMT".to_string(),
    )))
    .unwrap();
    assert_eq!(from_gmt.to_string(), value["submissionTime"].as_str().unwrap());
}

#[test]
fn job_summary_reads_back_from_either_key_style() {
    let summary: JobSummary = serde_json::from_value(json!({
        "job_id": 4,
        "name": "n",
        "status": "RUNNING",
        "submissionTime": "2024-01-01T00:00:00Z",
        "duration_seconds": null,
        "failed_stage_ids": [3]
    }))
    .unwrap();

    assert_eq!(summary.job_id, Some(4));
    assert_eq!(summary.failed_stage_ids, vec![3]);
    assert!(summary.succeeded_stage_ids.is_empty());
    assert_eq!(summary.completion_time, None);

    let again: JobSummary =
        serde_json::from_value(serde_json::to_value(&summary).unwrap()).unwrap();
    assert_eq!(again, summary);
}

#[test]
fn sql_query_summary_uses_wire_keys() {
    let summary = SqlQuerySummary {
        id: 2,
        duration: Some(5_400),
        description: Some("select * from events".to_string()),
        status: "COMPLETED".to_string(),
        submission_time: Some("2024-01-01T00:00:00.000GMT".to_string()),
        plan_description: "== Physical Plan ==".to_string(),
        success_job_ids: vec![1, 2],
        failed_job_ids: vec![],
        running_job_ids: vec![3],
    };

    assert_eq!(
        serde_json::to_value(&summary).unwrap(),
        json!({
            "id": 2,
            "duration": 5400,
            "description": "select * from events",
            "status": "COMPLETED",
            "submissionTime": "2024-01-01T00:00:00.000GMT",
            "planDescription": "== Physical Plan ==",
            "successJobIds": [1, 2],
            "failedJobIds": [],
            "runningJobIds": [3]
        })
    );
}

#[test]
fn sql_query_summary_requires_plan_and_job_lists() {
    let ok: SqlQuerySummary = serde_json::from_value(json!({
        "id": 1,
        "status": "RUNNING",
        "plan_description": "p",
        "success_job_ids": [],
        "failedJobIds": [],
        "runningJobIds": [9]
    }))
    .unwrap();
    assert_eq!(ok.duration, None);
    assert_eq!(ok.running_job_ids, vec![9]);

    let missing_lists = serde_json::from_value::<SqlQuerySummary>(json!({
        "id": 1,
        "status": "RUNNING",
        "planDescription": "p"
    }));
    assert!(missing_lists.is_err());
}
