pub mod deadline;
pub mod keywords;
pub mod priority;
mod training;

pub use deadline::DeadlineExtractor;
pub use priority::PriorityScorer;
