// [apps/coordinator/src/handlers/mod.rs]
pub mod agents;
pub mod events;
pub mod files;
pub mod jobs;
