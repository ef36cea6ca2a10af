pub mod prompt;
pub mod responder;
pub mod templates;

pub use responder::{CoachResponder, MAX_RESPONSE_CHARS};
pub use templates::CoachTopic;
