//! Wire types for the quiz-gym backend API.

mod quiz;
mod topic;
mod upload;

pub use quiz::{Quiz, Submission};
pub use topic::Topic;
pub use upload::{ErrorDetail, InitMessage, UploadReport};
