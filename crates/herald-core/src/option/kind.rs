//! The closed set of option kinds a command can declare.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::HeraldError;

/// Kind of a single command option.
///
/// Parsed case-insensitively from catalog strings; `decimal` is accepted as a
/// synonym for [`OptionKind::Number`]. Serializes as the platform wire code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKind {
    Attachment,
    Boolean,
    Channel,
    Integer,
    Number,
    Mentionable,
    String,
    User,
    Role,
}

impl OptionKind {
    /// Every kind, in table order.
    pub const ALL: [OptionKind; 9] = [
        OptionKind::Attachment,
        OptionKind::Boolean,
        OptionKind::Channel,
        OptionKind::Integer,
        OptionKind::Number,
        OptionKind::Mentionable,
        OptionKind::String,
        OptionKind::User,
        OptionKind::Role,
    ];

    /// Numeric type code used by the registration API.
    pub const fn code(self) -> u8 {
        match self {
            OptionKind::String => 3,
            OptionKind::Integer => 4,
            OptionKind::Boolean => 5,
            OptionKind::User => 6,
            OptionKind::Channel => 7,
            OptionKind::Role => 8,
            OptionKind::Mentionable => 9,
            OptionKind::Number => 10,
            OptionKind::Attachment => 11,
        }
    }

    /// Inverse of [`OptionKind::code`].
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }

    /// Canonical lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            OptionKind::Attachment => "attachment",
            OptionKind::Boolean => "boolean",
            OptionKind::Channel => "channel",
            OptionKind::Integer => "integer",
            OptionKind::Number => "number",
            OptionKind::Mentionable => "mentionable",
            OptionKind::String => "string",
            OptionKind::User => "user",
            OptionKind::Role => "role",
        }
    }

    /// Whether `min_value` / `max_value` apply to this kind.
    pub const fn is_numeric(self) -> bool {
        matches!(self, OptionKind::Integer | OptionKind::Number)
    }

    /// Whether a fixed list of choices can be offered for this kind.
    pub const fn supports_choices(self) -> bool {
        matches!(
            self,
            OptionKind::String | OptionKind::Integer | OptionKind::Number
        )
    }
}

impl FromStr for OptionKind {
    type Err = HeraldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "attachment" => Ok(OptionKind::Attachment),
            "boolean" => Ok(OptionKind::Boolean),
            "channel" => Ok(OptionKind::Channel),
            "integer" => Ok(OptionKind::Integer),
            "number" | "decimal" => Ok(OptionKind::Number),
            "mentionable" => Ok(OptionKind::Mentionable),
            "string" => Ok(OptionKind::String),
            "user" => Ok(OptionKind::User),
            "role" => Ok(OptionKind::Role),
            _ => Err(HeraldError::unknown_option_kind(s)),
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for OptionKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> serde::Deserialize<'de> for OptionKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = <u8 as serde::Deserialize>::deserialize(deserializer)?;
        OptionKind::from_code(code)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown option type code {}", code)))
    }
}
