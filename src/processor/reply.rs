use crate::domain::Priority;

const URGENT_REPLY: &str =
    "Thank you for the urgent message. I will prioritize this and respond with details shortly.";
const NORMAL_REPLY: &str =
    "Thank you for your email. I will review this and get back to you with a response.";
const LOW_REPLY: &str =
    "Thank you for your message. I will look into this when I have a chance.";

/// Template replies keyed by priority.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReplyDrafter;

impl ReplyDrafter {
    pub fn template(priority: Priority) -> &'static str {
        match priority {
            Priority::Urgent => URGENT_REPLY,
            Priority::Normal => NORMAL_REPLY,
            Priority::Low => LOW_REPLY,
        }
    }

    /// Unrecognised labels get the normal reply.
    pub fn draft(&self, label: &str) -> &'static str {
        Self::template(Priority::from_label(label).unwrap_or(Priority::Normal))
    }
}
