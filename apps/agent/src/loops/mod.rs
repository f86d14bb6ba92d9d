// [apps/agent/src/loops/mod.rs]
/*!
 * APARATO: RUNTIME LOOPS BARREL
 * RESPONSABILIDAD: LOS CINCO BUCLES COOPERATIVOS DEL AGENTE (§4.7 "Main
 * loops (concurrent, cooperative)").
 */

pub mod executor;
pub mod file_watcher;
pub mod heartbeat;
pub mod poll;
pub mod status_watcher;
