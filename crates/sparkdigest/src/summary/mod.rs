pub mod job;
pub mod sql;

pub use job::{summarize_jobs, JobSummary};
pub use sql::SqlQuerySummary;
