use std::{fmt, str::FromStr};

use sea_orm::DbErr;

use crate::{error::gate::GateError, model::parse_snowflake};

/// How a blacklisted word is compared against each word of a message.
///
/// All comparisons are case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMethod {
    Exact,
    Contains,
    StartsWith,
    EndsWith,
}

impl FilterMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "EXACT",
            Self::Contains => "CONTAINS",
            Self::StartsWith => "STARTS_WITH",
            Self::EndsWith => "ENDS_WITH",
        }
    }

    /// Compares one already-lowercased message word with a lowercased filter word.
    fn matches(&self, word: &str, filter: &str) -> bool {
        match self {
            Self::Exact => word == filter,
            Self::Contains => word.contains(filter),
            Self::StartsWith => word.starts_with(filter),
            Self::EndsWith => word.ends_with(filter),
        }
    }
}

impl FromStr for FilterMethod {
    type Err = GateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "EXACT" => Ok(Self::Exact),
            "CONTAINS" => Ok(Self::Contains),
            "STARTS_WITH" => Ok(Self::StartsWith),
            "ENDS_WITH" => Ok(Self::EndsWith),
            _ => Err(GateError::UnknownFilterMethod(s.to_string())),
        }
    }
}

impl fmt::Display for FilterMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlacklistedWord {
    pub id: i32,
    pub guild_id: u64,
    pub word: String,
    pub method: FilterMethod,
}

impl BlacklistedWord {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Err(DbErr::Custom)` - Guild id or stored filter method is malformed
    pub fn from_entity(entity: entity::blacklisted_word::Model) -> Result<Self, DbErr> {
        let method = entity
            .filter_method
            .parse::<FilterMethod>()
            .map_err(|e| DbErr::Custom(format!("Failed to parse filter_method: {}", e)))?;

        Ok(Self {
            id: entity.id,
            guild_id: parse_snowflake("guild_id", &entity.guild_id)?,
            word: entity.word,
            method,
        })
    }

    /// Whether any space-separated word of `content` trips this filter.
    pub fn matches(&self, content: &str) -> bool {
        let filter = self.word.to_lowercase();
        if filter.is_empty() {
            return false;
        }

        content
            .split(' ')
            .map(str::to_lowercase)
            .any(|word| self.method.matches(&word, &filter))
    }
}

/// Parameters for adding a word to a guild's blacklist.
#[derive(Debug, Clone)]
pub struct CreateBlacklistedWordParam {
    pub guild_id: u64,
    pub word: String,
    pub method: FilterMethod,
}
