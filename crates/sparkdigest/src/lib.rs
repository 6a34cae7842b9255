pub mod history;
pub mod summary;

pub use history::{JobData, StageData};
pub use summary::{summarize_jobs, JobSummary, SqlQuerySummary};
