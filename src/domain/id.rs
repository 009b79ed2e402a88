//! Domain ID generation
//!
//! All IDs use the format: `{type}-{uuid-v7}`
//! Example: `task-0193f2a8c1e97b6a8f0e4d2b9c3a1f5e`
//!
//! UUIDv7 keeps IDs roughly time-ordered, which makes board snapshots and
//! memory logs stable to sort without a separate sequence counter.

/// Generate a domain ID with the given type prefix
pub fn generate_id(domain_type: &str) -> String {
    let uuid = uuid::Uuid::now_v7();
    format!("{}-{}", domain_type, uuid.simple())
}
