pub mod model;
pub mod timestamp;

pub use model::{decode_timestamp, JobData, JobExecutionStatus, StageData, StageStatus};
pub use timestamp::{
    normalize, to_canonical_string, NormalizedTimestamp, Timestamp, TimestampInput,
};
