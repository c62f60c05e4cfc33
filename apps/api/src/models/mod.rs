pub mod document;
pub mod profile;
pub mod section;
