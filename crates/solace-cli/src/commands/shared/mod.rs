pub mod input;
pub mod summary;
