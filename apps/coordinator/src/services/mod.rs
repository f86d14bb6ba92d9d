// [apps/coordinator/src/services/mod.rs]
pub mod liveness;
