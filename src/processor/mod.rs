pub mod reply;
pub mod summarizer;

pub use reply::ReplyDrafter;
pub use summarizer::{fallback_summary, Summarizer};
