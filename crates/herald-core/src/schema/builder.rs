//! Command schema builder.

use super::{CommandDefinition, CommandOption};
use crate::option::{ConfigureOption, OptionBuilder, OptionKind};

/// Assembles a [`CommandDefinition`] one option at a time, in declared order.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandBuilder {
    name: String,
    description: String,
    options: Vec<CommandOption>,
}

impl CommandBuilder {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            options: Vec::new(),
        }
    }

    /// Appends an option of `kind`, configured by `configure`.
    pub fn add_option(&mut self, kind: OptionKind, configure: &dyn ConfigureOption) -> &mut Self {
        match kind {
            OptionKind::Attachment => self.add_attachment_option(configure),
            OptionKind::Boolean => self.add_boolean_option(configure),
            OptionKind::Channel => self.add_channel_option(configure),
            OptionKind::Integer => self.add_integer_option(configure),
            OptionKind::Number => self.add_number_option(configure),
            OptionKind::Mentionable => self.add_mentionable_option(configure),
            OptionKind::String => self.add_string_option(configure),
            OptionKind::User => self.add_user_option(configure),
            OptionKind::Role => self.add_role_option(configure),
        }
    }

    pub fn add_attachment_option(&mut self, configure: &dyn ConfigureOption) -> &mut Self {
        self.push(OptionKind::Attachment, configure)
    }

    pub fn add_boolean_option(&mut self, configure: &dyn ConfigureOption) -> &mut Self {
        self.push(OptionKind::Boolean, configure)
    }

    pub fn add_channel_option(&mut self, configure: &dyn ConfigureOption) -> &mut Self {
        self.push(OptionKind::Channel, configure)
    }

    pub fn add_integer_option(&mut self, configure: &dyn ConfigureOption) -> &mut Self {
        self.push(OptionKind::Integer, configure)
    }

    pub fn add_number_option(&mut self, configure: &dyn ConfigureOption) -> &mut Self {
        self.push(OptionKind::Number, configure)
    }

    pub fn add_mentionable_option(&mut self, configure: &dyn ConfigureOption) -> &mut Self {
        self.push(OptionKind::Mentionable, configure)
    }

    pub fn add_string_option(&mut self, configure: &dyn ConfigureOption) -> &mut Self {
        self.push(OptionKind::String, configure)
    }

    pub fn add_user_option(&mut self, configure: &dyn ConfigureOption) -> &mut Self {
        self.push(OptionKind::User, configure)
    }

    pub fn add_role_option(&mut self, configure: &dyn ConfigureOption) -> &mut Self {
        self.push(OptionKind::Role, configure)
    }

    fn push(&mut self, kind: OptionKind, configure: &dyn ConfigureOption) -> &mut Self {
        let option = configure.configure(OptionBuilder::new(kind)).build();
        self.options.push(option);
        self
    }

    pub fn to_serializable(&self) -> CommandDefinition {
        CommandDefinition {
            name: self.name.clone(),
            description: self.description.clone(),
            options: self.options.clone(),
        }
    }
}
