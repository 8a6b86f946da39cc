//! Domain models and parameter types.
//!
//! Entity rows are converted into these models at the repository boundary so
//! services, flows and handlers never touch SeaORM entities directly. Snowflake
//! ids are stored as strings in the database and surfaced as `u64` here.

pub mod blacklisted_word;
pub mod event;
pub mod member_gate;
pub mod pending_question;
pub mod welcome_message;

use sea_orm::DbErr;

/// Parses a snowflake id stored as a database string.
///
/// # Arguments
/// - `field` - Column name, used in the error message
/// - `value` - Raw stored value
///
/// # Returns
/// - `Ok(u64)` - Parsed id
/// - `Err(DbErr::Custom)` - Stored value is not a valid id
pub(crate) fn parse_snowflake(field: &str, value: &str) -> Result<u64, DbErr> {
    value
        .parse::<u64>()
        .map_err(|e| DbErr::Custom(format!("Failed to parse {}: {}", field, e)))
}

/// Parses an optional snowflake column.
pub(crate) fn parse_optional_snowflake(
    field: &str,
    value: Option<String>,
) -> Result<Option<u64>, DbErr> {
    value.map(|v| parse_snowflake(field, &v)).transpose()
}
