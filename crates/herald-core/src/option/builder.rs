//! Per-option schema builder and the configuration seam callers plug into.

use serde::{Deserialize, Serialize};

use super::OptionKind;
use crate::schema::{ChoiceValue, CommandOption, OptionChoice};

/// Builder for one option of a command schema.
///
/// Created by [`crate::schema::CommandBuilder`] with the kind already fixed;
/// callers only set name, description and constraints.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionBuilder {
    option: CommandOption,
}

impl OptionBuilder {
    pub fn new(kind: OptionKind) -> Self {
        Self {
            option: CommandOption::new(kind),
        }
    }

    pub fn kind(&self) -> OptionKind {
        self.option.kind
    }

    pub fn set_name(mut self, name: impl Into<String>) -> Self {
        self.option.name = name.into();
        self
    }

    pub fn set_description(mut self, description: impl Into<String>) -> Self {
        self.option.description = description.into();
        self
    }

    pub fn set_required(mut self, required: bool) -> Self {
        self.option.required = required;
        self
    }

    pub fn add_choice(mut self, name: impl Into<String>, value: impl Into<ChoiceValue>) -> Self {
        self.option.choices.push(OptionChoice {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn add_choices(mut self, choices: impl IntoIterator<Item = OptionChoice>) -> Self {
        self.option.choices.extend(choices);
        self
    }

    pub fn set_min_value(mut self, min: f64) -> Self {
        self.option.min_value = Some(min);
        self
    }

    pub fn set_max_value(mut self, max: f64) -> Self {
        self.option.max_value = Some(max);
        self
    }

    pub fn set_min_length(mut self, min: u16) -> Self {
        self.option.min_length = Some(min);
        self
    }

    pub fn set_max_length(mut self, max: u16) -> Self {
        self.option.max_length = Some(max);
        self
    }

    /// Restricts a channel option to the given platform channel type codes.
    pub fn add_channel_types(mut self, types: impl IntoIterator<Item = u8>) -> Self {
        self.option.channel_types.extend(types);
        self
    }

    pub fn set_autocomplete(mut self, autocomplete: bool) -> Self {
        self.option.autocomplete = autocomplete;
        self
    }

    pub fn build(self) -> CommandOption {
        self.option
    }
}

/// Configures one option's name, description and constraints.
///
/// Implemented for closures `Fn(OptionBuilder) -> OptionBuilder` and for the
/// declarative [`OptionConfig`].
pub trait ConfigureOption: Send + Sync {
    fn configure(&self, option: OptionBuilder) -> OptionBuilder;
}

impl<F> ConfigureOption for F
where
    F: Fn(OptionBuilder) -> OptionBuilder + Send + Sync,
{
    fn configure(&self, option: OptionBuilder) -> OptionBuilder {
        self(option)
    }
}

/// Declarative option configuration, loadable from a catalog file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionConfig {
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
    #[serde(default)]
    pub autocomplete: bool,
}

impl OptionConfig {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn choice(mut self, name: impl Into<String>, value: impl Into<ChoiceValue>) -> Self {
        self.choices.push(OptionChoice {
            name: name.into(),
            value: value.into(),
        });
        self
    }
}

impl ConfigureOption for OptionConfig {
    fn configure(&self, option: OptionBuilder) -> OptionBuilder {
        let mut option = option
            .set_name(&self.name)
            .set_description(&self.description)
            .set_required(self.required)
            .add_choices(self.choices.iter().cloned())
            .add_channel_types(self.channel_types.iter().copied())
            .set_autocomplete(self.autocomplete);

        if let Some(min) = self.min_value {
            option = option.set_min_value(min);
        }
        if let Some(max) = self.max_value {
            option = option.set_max_value(max);
        }
        if let Some(min) = self.min_length {
            option = option.set_min_length(min);
        }
        if let Some(max) = self.max_length {
            option = option.set_max_length(max);
        }
        option
    }
}
