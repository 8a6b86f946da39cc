//! SeaORM entity models for the member gate bot.
//!
//! Discord snowflakes are stored as strings and parsed into `u64` at the
//! repository boundary.

pub mod prelude;

pub mod blacklisted_word;
pub mod guild_member_gate;
pub mod guild_member_gate_question;
pub mod member_gate_question;
pub mod welcome_message;
