mod job_slot;
mod model_preloader;

pub use job_slot::{
    ConflictPolicy, JobSlot, JobSlotPolicy, MISSING_SOURCE_MESSAGE, SubmissionError,
};
pub use model_preloader::preload_models;
