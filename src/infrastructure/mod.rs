pub mod audio;
pub mod backend;
pub mod media;
pub mod observability;
pub mod supervisor;
