// Document composition: resume sections → ordered content blocks for a render backend.

pub mod composer;

pub use composer::compose_resume;
