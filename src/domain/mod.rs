pub mod email;
pub mod types;

pub use email::{parse_request, DraftRequest, EmailInput, FeedbackRequest};
pub use types::{
    DeadlineResult, FeedbackAck, Priority, PriorityResult, ScoreBreakdown, TrainingExample,
    TriageReport,
};
