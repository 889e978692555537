pub mod attendance;
pub mod backup;
pub mod core;
pub mod courses;
pub mod marks;
pub mod reports;
pub mod sample;
pub mod setup;
pub mod students;
