//! Database repository layer for all member gate entities.
//!
//! Repositories wrap SeaORM queries for one table each and return domain models
//! from `crate::model`, so entity models never leak into services, flows or
//! handlers.

pub mod blacklisted_word;
pub mod gate_question;
pub mod member_gate;
pub mod pending_question;
pub mod welcome_message;

pub use blacklisted_word::BlacklistedWordRepository;
pub use gate_question::GateQuestionRepository;
pub use member_gate::GuildMemberGateRepository;
pub use pending_question::PendingQuestionRepository;
pub use welcome_message::WelcomeMessageRepository;

#[cfg(test)]
mod test;
