//! Gatekeeper Test Utils
//!
//! Shared testing utilities for the gatekeeper bot. This crate offers a builder for
//! creating test contexts backed by in-memory SQLite databases, factories for the
//! member gate entities, and factories for Serenity API objects.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment containing the database connection
//! - **TestError**: Error types that can occur during test setup
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//! use entity::prelude::MemberGateQuestion;
//!
//! #[tokio::test]
//! async fn stores_pending_question() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_table(MemberGateQuestion)
//!         .build()
//!         .await?;
//!
//!     let db = test.db.unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod serenity;
