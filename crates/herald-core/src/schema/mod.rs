//! Command schema assembly and the serialized definition it produces.

mod builder;
mod definition;

pub use builder::CommandBuilder;
pub use definition::{
    ChoiceValue, CommandDefinition, CommandOption, OptionChoice, MAX_CHOICES,
    MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH, MAX_OPTIONS, MAX_STRING_LENGTH,
};
