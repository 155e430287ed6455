//! Serialized command definitions, in the shape the registration API expects.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{HeraldError, Result};
use crate::option::OptionKind;

/// Maximum length of a command or option name.
pub const MAX_NAME_LENGTH: usize = 32;
/// Maximum length of a command or option description.
pub const MAX_DESCRIPTION_LENGTH: usize = 100;
/// Maximum number of options on one command.
pub const MAX_OPTIONS: usize = 25;
/// Maximum number of choices on one option.
pub const MAX_CHOICES: usize = 25;
/// Maximum value accepted for `min_length` / `max_length`.
pub const MAX_STRING_LENGTH: u16 = 6000;

/// A registrable command: `{ name, description, options }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandDefinition {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub options: Vec<CommandOption>,
}

/// One option entry of a [`CommandDefinition`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandOption {
    #[serde(rename = "type")]
    pub kind: OptionKind,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<OptionChoice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u16>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub channel_types: Vec<u8>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub autocomplete: bool,
}

impl CommandOption {
    /// An unnamed, optional option of the given kind.
    pub fn new(kind: OptionKind) -> Self {
        Self {
            kind,
            name: String::new(),
            description: String::new(),
            required: false,
            choices: Vec::new(),
            min_value: None,
            max_value: None,
            min_length: None,
            max_length: None,
            channel_types: Vec::new(),
            autocomplete: false,
        }
    }
}

/// A fixed value the user can pick for an option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionChoice {
    pub name: String,
    pub value: ChoiceValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChoiceValue {
    Integer(i64),
    Number(f64),
    String(String),
}

impl ChoiceValue {
    fn fits(&self, kind: OptionKind) -> bool {
        match (kind, self) {
            (OptionKind::String, ChoiceValue::String(_)) => true,
            (OptionKind::Integer, ChoiceValue::Integer(_)) => true,
            (OptionKind::Number, ChoiceValue::Integer(_) | ChoiceValue::Number(_)) => true,
            _ => false,
        }
    }
}

impl From<i32> for ChoiceValue {
    fn from(value: i32) -> Self {
        ChoiceValue::Integer(value.into())
    }
}

impl From<i64> for ChoiceValue {
    fn from(value: i64) -> Self {
        ChoiceValue::Integer(value)
    }
}

impl From<f64> for ChoiceValue {
    fn from(value: f64) -> Self {
        ChoiceValue::Number(value)
    }
}

impl From<&str> for ChoiceValue {
    fn from(value: &str) -> Self {
        ChoiceValue::String(value.to_string())
    }
}

impl From<String> for ChoiceValue {
    fn from(value: String) -> Self {
        ChoiceValue::String(value)
    }
}

impl CommandDefinition {
    /// Checks the definition against the platform's registration limits.
    ///
    /// Descriptor construction does not call this; the catalog does, so a
    /// malformed command is rejected before anything is uploaded.
    pub fn validate(&self) -> Result<()> {
        let fail = |reason: String| Err(HeraldError::invalid_definition(&self.name, reason));

        if let Some(reason) = check_name(&self.name) {
            return fail(format!("command name {}", reason));
        }
        if let Some(reason) = check_description(&self.description) {
            return fail(format!("command description {}", reason));
        }
        if self.options.len() > MAX_OPTIONS {
            return fail(format!(
                "{} options exceed the limit of {}",
                self.options.len(),
                MAX_OPTIONS
            ));
        }

        let mut seen = HashSet::new();
        let mut optional_seen = false;
        for option in &self.options {
            if let Some(reason) = check_option(option) {
                return fail(format!("option '{}' {}", option.name, reason));
            }
            if !seen.insert(option.name.as_str()) {
                return fail(format!("option '{}' is declared twice", option.name));
            }
            if option.required && optional_seen {
                return fail(format!(
                    "required option '{}' follows an optional option",
                    option.name
                ));
            }
            optional_seen |= !option.required;
        }

        Ok(())
    }
}

fn check_name(name: &str) -> Option<String> {
    let len = name.chars().count();
    if len == 0 || len > MAX_NAME_LENGTH {
        return Some(format!("must be 1-{} characters", MAX_NAME_LENGTH));
    }
    let valid = name
        .chars()
        .all(|c| c == '-' || c == '_' || (c.is_alphanumeric() && c.to_lowercase().eq([c])));
    if !valid {
        return Some(format!(
            "'{}' may only contain lowercase letters, digits, '-' and '_'",
            name
        ));
    }
    None
}

fn check_description(description: &str) -> Option<String> {
    let len = description.chars().count();
    if len == 0 || len > MAX_DESCRIPTION_LENGTH {
        return Some(format!("must be 1-{} characters", MAX_DESCRIPTION_LENGTH));
    }
    None
}

fn check_option(option: &CommandOption) -> Option<String> {
    if let Some(reason) = check_name(&option.name) {
        return Some(format!("name {}", reason));
    }
    if let Some(reason) = check_description(&option.description) {
        return Some(format!("description {}", reason));
    }

    let kind = option.kind;
    if !option.choices.is_empty() {
        if !kind.supports_choices() {
            return Some(format!("of type {} cannot have choices", kind));
        }
        if option.choices.len() > MAX_CHOICES {
            return Some(format!("has more than {} choices", MAX_CHOICES));
        }
        if option.autocomplete {
            return Some("cannot combine choices with autocomplete".to_string());
        }
        if let Some(choice) = option.choices.iter().find(|c| !c.value.fits(kind)) {
            return Some(format!("choice '{}' does not match type {}", choice.name, kind));
        }
    }

    if (option.min_value.is_some() || option.max_value.is_some()) && !kind.is_numeric() {
        return Some(format!("of type {} cannot have a value range", kind));
    }
    if let (Some(min), Some(max)) = (option.min_value, option.max_value) {
        if min > max {
            return Some(format!("min_value {} exceeds max_value {}", min, max));
        }
    }

    if option.min_length.is_some() || option.max_length.is_some() {
        if kind != OptionKind::String {
            return Some(format!("of type {} cannot have a length range", kind));
        }
        let min = option.min_length.unwrap_or(0);
        let max = option.max_length.unwrap_or(MAX_STRING_LENGTH);
        if min > MAX_STRING_LENGTH || max == 0 || max > MAX_STRING_LENGTH || min > max {
            return Some(format!(
                "length range {}..{} is outside 0..{}",
                min, max, MAX_STRING_LENGTH
            ));
        }
    }

    if !option.channel_types.is_empty() && kind != OptionKind::Channel {
        return Some(format!("of type {} cannot restrict channel types", kind));
    }
    if option.autocomplete && !kind.supports_choices() {
        return Some(format!("of type {} cannot autocomplete", kind));
    }

    None
}
