mod error;
mod health;
mod job;
mod poll;
mod result;
mod transcribe;

pub use error::{ApiError, ErrorResponse};
pub use health::{HealthResponse, health_handler};
pub use job::{JobResponse, job_handler};
pub use poll::poll_handler;
pub use result::get_result_handler;
pub use transcribe::{SubmittedResponse, TranscribeQuery, transcribe_handler};
