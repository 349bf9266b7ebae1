pub mod fields;
pub mod message;
pub mod parser;

pub use fields::{FieldError, SubmissionRequest, validate};
pub use message::NotificationMessage;
