//! Business logic over the repositories.
//!
//! Services combine repository calls into the operations the configure flow,
//! the orchestrator and the scheduler need.

pub mod audit_log;
pub mod member_gate;
pub mod welcome_message;
pub mod word_filter;

use rand::Rng;

/// Picks a uniformly random index below `len`.
///
/// Kept synchronous so the thread-local RNG is never held across an await.
pub(crate) fn random_index(len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let mut rng = rand::rng();
    Some(rng.random_range(0..len))
}
