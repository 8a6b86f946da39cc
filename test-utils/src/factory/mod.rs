//! Factory methods for creating test data.
//!
//! Factories create member gate entities with sensible defaults, reducing
//! boilerplate in tests. Each entity has its own module with a `Factory` struct for
//! customization and a `create_*` convenience function for quick default creation.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let gate = factory::guild_member_gate::GuildMemberGateFactory::new(&db)
//!     .member_role_id(Some("42"))
//!     .gate_channel_id(Some("7"))
//!     .build()
//!     .await?;
//! let pending = factory::create_pending_question(&db, "1001", &gate.guild_id).await?;
//! ```
//!
//! # Available Factories
//!
//! - `guild_member_gate` - Guild gate configuration rows
//! - `guild_member_gate_question` - Candidate screening questions
//! - `member_gate_question` - Answers awaiting manual review
//! - `welcome_message` - Welcome messages
//! - `blacklisted_word` - Filtered words
//! - `helpers` - Unique id generation

pub mod blacklisted_word;
pub mod guild_member_gate;
pub mod guild_member_gate_question;
pub mod helpers;
pub mod member_gate_question;
pub mod welcome_message;

pub use blacklisted_word::create_blacklisted_word;
pub use guild_member_gate::create_guild_member_gate;
pub use guild_member_gate_question::create_gate_question;
pub use member_gate_question::create_pending_question;
pub use welcome_message::create_welcome_message;
