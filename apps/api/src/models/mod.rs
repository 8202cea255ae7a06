pub mod job;
pub mod knowledge;
pub mod profile;
pub mod tracking;
