//! Test factories for creating Serenity API objects.
//!
//! These factories create valid Serenity structs by deserializing JSON, simulating
//! what Discord's API would return. They are used to test the conversion of gateway
//! payloads into the bot's own event types.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::serenity::{create_test_member, create_test_user};
//!
//! let user = create_test_user(1001, "newcomer", false);
//! let member = create_test_member(42, 1001, "newcomer", &[55], false);
//! ```
//!
//! # Available Factories
//!
//! - `user::create_test_user` - Create Serenity User objects
//! - `member::create_test_member` - Create Serenity Member objects

pub mod member;
pub mod user;

pub use member::create_test_member;
pub use user::create_test_user;
