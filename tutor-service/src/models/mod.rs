pub mod answer;
pub mod ask;

pub use answer::{Quiz, TutorAnswer};
pub use ask::{AskSubmission, ImageAttachment};
