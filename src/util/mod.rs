// ============================================================================
// src/util/mod.rs – collaborators used by the handle
// ============================================================================

pub mod audit;
pub mod fsops;
pub mod permissions;
