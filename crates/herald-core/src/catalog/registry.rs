//! Registry of built commands.

use std::collections::HashMap;
use std::sync::Arc;

use super::{CatalogSource, HandlerTable};
use crate::command::{ButtonCode, CommandDescriptor, CommandHandler, CommandSpec, CommandView};
use crate::error::{HeraldError, Result};
use crate::interaction::Interaction;
use crate::schema::CommandDefinition;

/// All commands a bot exposes, in registration order, unique by name.
#[derive(Debug, Default)]
pub struct CommandCatalog {
    commands: Vec<Arc<CommandDescriptor>>,
    index: HashMap<String, usize>,
}

impl CommandCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds every spec; the first failure aborts the whole catalog.
    pub fn build(specs: impl IntoIterator<Item = CommandSpec>) -> Result<Self> {
        let mut catalog = Self::new();
        for spec in specs {
            catalog.register(spec)?;
        }
        tracing::info!("Command catalog built with {} command(s)", catalog.len());
        Ok(catalog)
    }

    /// Loads configuration from `source` and builds it with `handlers`.
    pub async fn load(source: &dyn CatalogSource, handlers: &HandlerTable) -> Result<Self> {
        let config = source.load().await?;
        Self::build(config.into_specs_with(handlers))
    }

    pub fn register(&mut self, spec: CommandSpec) -> Result<Arc<CommandDescriptor>> {
        let descriptor = CommandDescriptor::new(spec)?;
        self.insert(descriptor)
    }

    /// Adds an already built descriptor.
    ///
    /// Interactive commands must pass [`CommandDefinition::validate`] since
    /// their definitions are uploaded to the platform.
    pub fn insert(&mut self, descriptor: CommandDescriptor) -> Result<Arc<CommandDescriptor>> {
        if self.index.contains_key(descriptor.name()) {
            return Err(HeraldError::duplicate_command(descriptor.name()));
        }
        if descriptor.is_interactive() {
            descriptor.definition().validate()?;
        }

        let descriptor = Arc::new(descriptor);
        self.index
            .insert(descriptor.name().to_string(), self.commands.len());
        self.commands.push(Arc::clone(&descriptor));
        Ok(descriptor)
    }

    pub fn get(&self, name: &str) -> Option<&Arc<CommandDescriptor>> {
        self.index.get(name).map(|&i| &self.commands[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().map(|c| c.name())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<CommandDescriptor>> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn views(&self) -> Vec<CommandView> {
        self.commands.iter().map(|c| c.public_view()).collect()
    }

    /// Definitions of interactive commands, for bulk registration.
    pub fn definitions(&self) -> Vec<CommandDefinition> {
        self.commands
            .iter()
            .filter(|c| c.is_interactive())
            .map(|c| c.definition().clone())
            .collect()
    }

    pub fn definitions_json(&self) -> serde_json::Value {
        serde_json::Value::Array(
            self.commands
                .iter()
                .filter(|c| c.is_interactive())
                .map(|c| c.definition_json().clone())
                .collect(),
        )
    }

    /// Routes an invocation to the command it names.
    pub async fn dispatch(&self, interaction: &dyn Interaction) -> Result<()> {
        let name = interaction.command_name();
        let command = self
            .get(name)
            .ok_or_else(|| HeraldError::unknown_command(name))?;
        command.handler().handle(interaction).await
    }

    /// Routes a button press to the button handler of the command it names.
    pub async fn dispatch_button(&self, interaction: &dyn Interaction) -> Result<ButtonCode> {
        let name = interaction.command_name();
        let command = self
            .get(name)
            .ok_or_else(|| HeraldError::unknown_command(name))?;
        command.invoke_button(interaction).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::RoleId;
    use crate::catalog::CatalogConfig;
    use crate::command::{button_handler_fn, handler_fn, DEFAULT_REPLY};
    use crate::interaction::ReplyPayload;
    use crate::option::OptionConfig;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockInteraction {
        command: String,
        replies: Mutex<Vec<ReplyPayload>>,
    }

    impl MockInteraction {
        fn new(command: &str) -> Self {
            Self {
                command: command.to_string(),
                replies: Mutex::new(Vec::new()),
            }
        }

        fn contents(&self) -> Vec<String> {
            self.replies
                .lock()
                .unwrap()
                .iter()
                .map(|r| r.content.clone())
                .collect()
        }
    }

    #[async_trait]
    impl Interaction for MockInteraction {
        fn command_name(&self) -> &str {
            &self.command
        }

        fn user_id(&self) -> &str {
            "user-1"
        }

        fn member_roles(&self) -> Vec<RoleId> {
            Vec::new()
        }

        async fn reply(&self, payload: ReplyPayload) -> Result<()> {
            self.replies.lock().unwrap().push(payload);
            Ok(())
        }
    }

    struct StaticSource(&'static str);

    #[async_trait]
    impl CatalogSource for StaticSource {
        async fn load(&self) -> Result<CatalogConfig> {
            Ok(toml::from_str(self.0)?)
        }
    }

    fn pong() -> CommandSpec {
        CommandSpec::new("ping", "Ping the bot").with_handler(handler_fn(|interaction| {
            Box::pin(async move { interaction.reply(ReplyPayload::public("pong")).await })
        }))
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = CommandCatalog::build(vec![
            CommandSpec::new("ping", "first"),
            CommandSpec::new("ping", "second"),
        ])
        .unwrap_err();
        assert!(err.is_duplicate_command());
    }

    #[test]
    fn test_unknown_kind_aborts_whole_catalog() {
        let err = CommandCatalog::build(vec![
            CommandSpec::new("ok", "fine"),
            CommandSpec::new("bad", "broken").option("float", OptionConfig::new("x", "y")),
        ])
        .unwrap_err();
        assert!(err.is_unknown_option_kind());
    }

    #[test]
    fn test_invalid_interactive_definition_rejected() {
        let err = CommandCatalog::build(vec![CommandSpec::new("Bad Name", "desc")]).unwrap_err();
        assert!(err.is_invalid_definition());

        // Internal commands are never uploaded, so they are not checked.
        let catalog =
            CommandCatalog::build(vec![CommandSpec::new("Bad Name", "desc").interactive(false)])
                .unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_definitions_only_include_interactive_commands_in_order() {
        let catalog = CommandCatalog::build(vec![
            CommandSpec::new("beta", "b"),
            CommandSpec::new("internal", "i").interactive(false),
            CommandSpec::new("alpha", "a"),
        ])
        .unwrap();

        let names: Vec<String> = catalog.definitions().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["beta", "alpha"]);
        assert_eq!(catalog.definitions_json().as_array().unwrap().len(), 2);
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["beta", "internal", "alpha"]);
        assert_eq!(catalog.views().len(), 3);
    }

    #[tokio::test]
    async fn test_dispatch_routes_by_name() {
        let catalog = CommandCatalog::build(vec![pong(), CommandSpec::new("idle", "i")]).unwrap();

        let ping = MockInteraction::new("ping");
        catalog.dispatch(&ping).await.unwrap();
        assert_eq!(ping.contents(), vec!["pong"]);

        let idle = MockInteraction::new("idle");
        catalog.dispatch(&idle).await.unwrap();
        assert_eq!(idle.contents(), vec![DEFAULT_REPLY]);
    }

    #[tokio::test]
    async fn test_dispatch_unknown_command() {
        let catalog = CommandCatalog::build(vec![pong()]).unwrap();
        let err = catalog
            .dispatch(&MockInteraction::new("missing"))
            .await
            .unwrap_err();
        assert!(err.is_unknown_command());
    }

    #[tokio::test]
    async fn test_dispatch_button() {
        let catalog = CommandCatalog::build(vec![
            pong(),
            CommandSpec::new("vote", "v")
                .with_button_handler(button_handler_fn(|_| Box::pin(async { Ok(2) }))),
        ])
        .unwrap();

        assert_eq!(catalog.dispatch_button(&MockInteraction::new("ping")).await.unwrap(), 0);
        assert_eq!(catalog.dispatch_button(&MockInteraction::new("vote")).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_load_from_source_with_handlers() {
        let source = StaticSource(
            r#"
[[command]]
name = "ping"
description = "Ping the bot"
"#,
        );
        let handlers = HandlerTable::new().on(
            "ping",
            handler_fn(|interaction| {
                Box::pin(async move { interaction.reply(ReplyPayload::public("pong")).await })
            }),
        );

        let catalog = CommandCatalog::load(&source, &handlers).await.unwrap();
        let interaction = MockInteraction::new("ping");
        catalog.dispatch(&interaction).await.unwrap();
        assert_eq!(interaction.contents(), vec!["pong"]);
    }
}
