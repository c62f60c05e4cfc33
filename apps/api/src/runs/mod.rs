// Run orchestration and per-run progress tracking.

pub mod pipeline;
pub mod progress;

pub use pipeline::{run_resume, RunRequest};
pub use progress::{ProgressStore, RunProgress};
