mod device;
mod job_id;
mod job_record;
mod job_status;
mod language;
mod model_size;
mod transcript;
mod transcription_request;
mod validation_error;

pub use device::Device;
pub use job_id::JobId;
pub use job_record::JobRecord;
pub use job_status::JobStatus;
pub use language::{Language, SUPPORTED_LANGUAGES};
pub use model_size::ModelSize;
pub use transcript::{Transcript, TranscriptSegment};
pub use transcription_request::{TranscriptionOptions, TranscriptionRequest};
pub use validation_error::ValidationError;
