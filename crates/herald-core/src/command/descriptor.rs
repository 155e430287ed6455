//! The command descriptor: schema, serialized definition and gated handlers.

use std::fmt;
use std::sync::Arc;

use super::handler::{
    AuthorizedHandler, ButtonCode, ButtonHandler, CommandHandler, DefaultButtonHandler,
    DefaultHandler, DEFAULT_DENIED_MESSAGE,
};
use super::spec::CommandSpec;
use crate::auth::{MemberRoleOracle, RoleOracle, RoleSet};
use crate::error::Result;
use crate::interaction::Interaction;
use crate::option::OptionKind;
use crate::schema::{CommandBuilder, CommandDefinition};

/// A fully built command.
///
/// Everything is resolved in [`CommandDescriptor::new`]: option kinds are
/// parsed, the definition is serialized once, and missing handlers are
/// replaced by defaults. Nothing changes afterwards.
pub struct CommandDescriptor {
    name: String,
    description: String,
    interactive: bool,
    definition: CommandDefinition,
    definition_json: serde_json::Value,
    handler: Arc<AuthorizedHandler>,
    button_handler: Arc<dyn ButtonHandler>,
}

impl CommandDescriptor {
    /// Builds a descriptor from its specification.
    ///
    /// # Errors
    ///
    /// Returns `UnknownOptionKind` if any option declares a kind outside the
    /// supported set. This is a mistake in the command catalog and should
    /// abort loading.
    pub fn new(spec: CommandSpec) -> Result<Self> {
        let CommandSpec {
            name,
            description,
            handler,
            button_handler,
            interactive,
            options,
            required_roles,
            denied_message,
            role_oracle,
        } = spec;

        let mut builder = CommandBuilder::new(&name, &description);
        for option in &options {
            let kind: OptionKind = option.kind().parse()?;
            builder.add_option(kind, option.configurator());
        }
        let definition = builder.to_serializable();
        let definition_json = serde_json::to_value(&definition)?;

        let inner: Arc<dyn CommandHandler> = match handler {
            Some(handler) => handler,
            None => Arc::new(DefaultHandler),
        };
        let button_handler: Arc<dyn ButtonHandler> = match button_handler {
            Some(handler) => handler,
            None => Arc::new(DefaultButtonHandler),
        };
        let oracle: Arc<dyn RoleOracle> = match role_oracle {
            Some(oracle) => oracle,
            None => Arc::new(MemberRoleOracle::any()),
        };

        let handler = Arc::new(AuthorizedHandler::new(
            &name,
            inner,
            required_roles,
            denied_message.unwrap_or_else(|| DEFAULT_DENIED_MESSAGE.to_string()),
            interactive,
            oracle,
        ));

        tracing::debug!(
            "Built command /{} ({} option(s), {} required role(s), interactive={})",
            name,
            definition.options.len(),
            handler.required_roles().len(),
            interactive
        );

        Ok(Self {
            name,
            description,
            interactive,
            definition,
            definition_json,
            handler,
            button_handler,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn required_roles(&self) -> &RoleSet {
        self.handler.required_roles()
    }

    pub fn denied_message(&self) -> &str {
        self.handler.denied_message()
    }

    /// The serialized definition, ready for the registration API.
    pub fn definition(&self) -> &CommandDefinition {
        &self.definition
    }

    /// The definition as a JSON value.
    pub fn definition_json(&self) -> &serde_json::Value {
        &self.definition_json
    }

    /// The authorization-gated handler.
    pub fn handler(&self) -> Arc<AuthorizedHandler> {
        Arc::clone(&self.handler)
    }

    pub fn button_handler(&self) -> Arc<dyn ButtonHandler> {
        Arc::clone(&self.button_handler)
    }

    /// Runs the gated handler for one invocation.
    pub async fn invoke(&self, interaction: &dyn Interaction) -> Result<()> {
        self.handler.handle(interaction).await
    }

    /// Runs the button handler for one button press.
    pub async fn invoke_button(&self, interaction: &dyn Interaction) -> Result<ButtonCode> {
        self.button_handler.handle_button(interaction).await
    }

    /// Flattened projection used by routers for registration and dispatch.
    pub fn public_view(self: &Arc<Self>) -> CommandView {
        CommandView {
            name: self.name.clone(),
            definition: self.definition.clone(),
            handler: self.handler(),
            button_handler: self.button_handler(),
            is_interactive: self.interactive,
            owner: Arc::clone(self),
        }
    }
}

impl fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("name", &self.name)
            .field("interactive", &self.interactive)
            .field("definition", &self.definition)
            .field("handler", &self.handler)
            .finish_non_exhaustive()
    }
}

/// Read-only projection of a [`CommandDescriptor`].
#[derive(Clone)]
pub struct CommandView {
    pub name: String,
    pub definition: CommandDefinition,
    pub handler: Arc<AuthorizedHandler>,
    pub button_handler: Arc<dyn ButtonHandler>,
    pub is_interactive: bool,
    pub owner: Arc<CommandDescriptor>,
}

impl fmt::Debug for CommandView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandView")
            .field("name", &self.name)
            .field("is_interactive", &self.is_interactive)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::RoleId;
    use crate::command::handler::{button_handler_fn, DEFAULT_REPLY};
    use crate::error::HeraldError;
    use crate::interaction::ReplyPayload;
    use crate::option::{OptionBuilder, OptionConfig};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    // Mock Interaction that records replies
    #[derive(Default)]
    struct MockInteraction {
        roles: Vec<RoleId>,
        replies: Mutex<Vec<ReplyPayload>>,
    }

    impl MockInteraction {
        fn replies(&self) -> Vec<ReplyPayload> {
            self.replies.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Interaction for MockInteraction {
        fn command_name(&self) -> &str {
            "ping"
        }

        fn user_id(&self) -> &str {
            "user-1"
        }

        fn member_roles(&self) -> Vec<RoleId> {
            self.roles.clone()
        }

        async fn reply(&self, payload: ReplyPayload) -> Result<()> {
            self.replies.lock().unwrap().push(payload);
            Ok(())
        }
    }

    // Mock RoleOracle with a fixed answer and a call counter
    struct FixedOracle {
        answer: std::result::Result<bool, HeraldError>,
        calls: AtomicUsize,
    }

    impl FixedOracle {
        fn new(answer: bool) -> Arc<Self> {
            Arc::new(Self {
                answer: Ok(answer),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                answer: Err(HeraldError::authorization("guild fetch failed")),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RoleOracle for FixedOracle {
        async fn has_required_roles(
            &self,
            _interaction: &dyn Interaction,
            _required: &RoleSet,
        ) -> Result<bool> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answer.clone()
        }
    }

    // Handler that counts invocations
    #[derive(Default)]
    struct CountingHandler {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CommandHandler for CountingHandler {
        async fn handle(&self, interaction: &dyn Interaction) -> Result<()> {
            assert_eq!(interaction.command_name(), "ping");
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct FailingHandler;

    #[async_trait]
    impl CommandHandler for FailingHandler {
        async fn handle(&self, _interaction: &dyn Interaction) -> Result<()> {
            Err(HeraldError::handler("database unavailable"))
        }
    }

    fn guarded_spec(oracle: Arc<FixedOracle>, handler: Arc<CountingHandler>) -> CommandSpec {
        CommandSpec::new("ping", "p")
            .with_shared_handler(handler)
            .require_role("admin")
            .with_role_oracle(oracle)
    }

    #[test]
    fn test_every_kind_in_any_case_builds_one_option() {
        for kind in OptionKind::ALL {
            for spelled in [kind.as_str().to_string(), kind.as_str().to_uppercase()] {
                let spec = CommandSpec::new("cmd", "desc").option(
                    spelled.as_str(),
                    |o: OptionBuilder| o.set_name("arg").set_description("d"),
                );
                let descriptor = CommandDescriptor::new(spec).unwrap();
                let options = &descriptor.definition().options;
                assert_eq!(options.len(), 1);
                assert_eq!(options[0].kind, kind);
            }
        }
    }

    #[test]
    fn test_unknown_kind_fails_construction() {
        let spec = CommandSpec::new("cmd", "desc")
            .option("string", OptionConfig::new("ok", "fine"))
            .option("float", OptionConfig::new("bad", "nope"));

        let err = CommandDescriptor::new(spec).unwrap_err();
        assert!(matches!(err, HeraldError::UnknownOptionKind { ref kind } if kind == "float"));
    }

    #[test]
    fn test_ping_example_definition() {
        let spec = CommandSpec::new("ping", "p").option("STRING", |o: OptionBuilder| {
            o.set_name("x").set_description("y").set_required(true)
        });
        let descriptor = CommandDescriptor::new(spec).unwrap();

        let def = descriptor.definition();
        assert_eq!(def.options.len(), 1);
        assert_eq!(def.options[0].kind, OptionKind::String);
        assert_eq!(
            descriptor.definition_json(),
            &serde_json::json!({
                "name": "ping",
                "description": "p",
                "options": [{ "type": 3, "name": "x", "description": "y", "required": true }]
            })
        );
    }

    #[test]
    fn test_definition_is_stable_across_calls() {
        let spec = CommandSpec::new("roll", "Roll dice")
            .option("integer", OptionConfig::new("sides", "Sides").required(true))
            .option("decimal", OptionConfig::new("bias", "Bias"));
        let descriptor = CommandDescriptor::new(spec).unwrap();

        let first = descriptor.definition().clone();
        let second = descriptor.definition().clone();
        assert_eq!(first, second);
        assert!(std::ptr::eq(descriptor.definition_json(), descriptor.definition_json()));
        assert_eq!(first.options[1].kind, OptionKind::Number);
    }

    #[tokio::test]
    async fn test_no_required_roles_skips_oracle() {
        for interactive in [true, false] {
            let oracle = FixedOracle::new(false);
            let handler = Arc::new(CountingHandler::default());
            let spec = CommandSpec::new("ping", "p")
                .with_shared_handler(handler.clone())
                .interactive(interactive)
                .with_role_oracle(oracle.clone());
            let descriptor = CommandDescriptor::new(spec).unwrap();

            descriptor.invoke(&MockInteraction::default()).await.unwrap();

            assert_eq!(oracle.calls(), 0);
            assert_eq!(handler.calls.load(Ordering::SeqCst), 1);
        }
    }

    #[tokio::test]
    async fn test_non_interactive_command_skips_oracle() {
        let oracle = FixedOracle::new(false);
        let handler = Arc::new(CountingHandler::default());
        let spec = guarded_spec(oracle.clone(), handler.clone()).interactive(false);
        let descriptor = CommandDescriptor::new(spec).unwrap();

        descriptor.invoke(&MockInteraction::default()).await.unwrap();

        assert_eq!(oracle.calls(), 0);
        assert_eq!(handler.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_denied_user_gets_one_reply_and_handler_never_runs() {
        let oracle = FixedOracle::new(false);
        let handler = Arc::new(CountingHandler::default());
        let spec = guarded_spec(oracle.clone(), handler.clone()).denied_message("Admins only");
        let descriptor = CommandDescriptor::new(spec).unwrap();
        let interaction = MockInteraction::default();

        descriptor.invoke(&interaction).await.unwrap();

        assert_eq!(oracle.calls(), 1);
        assert_eq!(handler.calls.load(Ordering::SeqCst), 0);
        assert_eq!(interaction.replies(), vec![ReplyPayload::public("Admins only")]);
    }

    #[tokio::test]
    async fn test_denied_user_gets_default_message() {
        let oracle = FixedOracle::new(false);
        let handler = Arc::new(CountingHandler::default());
        let descriptor = CommandDescriptor::new(guarded_spec(oracle, handler)).unwrap();
        let interaction = MockInteraction::default();

        descriptor.invoke(&interaction).await.unwrap();

        assert_eq!(interaction.replies()[0].content, DEFAULT_DENIED_MESSAGE);
    }

    #[tokio::test]
    async fn test_authorized_user_runs_handler_once() {
        let oracle = FixedOracle::new(true);
        let handler = Arc::new(CountingHandler::default());
        let descriptor =
            CommandDescriptor::new(guarded_spec(oracle.clone(), handler.clone())).unwrap();
        let interaction = MockInteraction::default();

        descriptor.invoke(&interaction).await.unwrap();

        assert_eq!(oracle.calls(), 1);
        assert_eq!(handler.calls.load(Ordering::SeqCst), 1);
        assert!(interaction.replies().is_empty());
    }

    #[tokio::test]
    async fn test_oracle_error_propagates_without_denial_reply() {
        let handler = Arc::new(CountingHandler::default());
        let descriptor =
            CommandDescriptor::new(guarded_spec(FixedOracle::failing(), handler.clone())).unwrap();
        let interaction = MockInteraction::default();

        let err = descriptor.invoke(&interaction).await.unwrap_err();

        assert!(matches!(err, HeraldError::Authorization(_)));
        assert!(interaction.replies().is_empty());
        assert_eq!(handler.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_handler_error_propagates() {
        let descriptor =
            CommandDescriptor::new(CommandSpec::new("ping", "p").with_handler(FailingHandler))
                .unwrap();

        let err = descriptor.invoke(&MockInteraction::default()).await.unwrap_err();
        assert!(matches!(err, HeraldError::Handler(_)));
    }

    #[tokio::test]
    async fn test_default_handler_sends_ephemeral_reply() {
        let descriptor = CommandDescriptor::new(CommandSpec::new("ping", "p")).unwrap();
        let interaction = MockInteraction::default();

        descriptor.invoke(&interaction).await.unwrap();

        assert_eq!(interaction.replies(), vec![ReplyPayload::ephemeral(DEFAULT_REPLY)]);
    }

    #[tokio::test]
    async fn test_default_oracle_reads_member_roles() {
        let descriptor =
            CommandDescriptor::new(CommandSpec::new("ping", "p").require_role("admin")).unwrap();

        let outsider = MockInteraction::default();
        descriptor.invoke(&outsider).await.unwrap();
        assert_eq!(outsider.replies()[0].content, DEFAULT_DENIED_MESSAGE);

        let admin = MockInteraction {
            roles: vec![RoleId::from("admin")],
            ..MockInteraction::default()
        };
        descriptor.invoke(&admin).await.unwrap();
        assert_eq!(admin.replies()[0].content, DEFAULT_REPLY);
    }

    #[tokio::test]
    async fn test_default_button_handler_returns_zero() {
        let descriptor = CommandDescriptor::new(CommandSpec::new("ping", "p")).unwrap();
        let code = descriptor
            .invoke_button(&MockInteraction::default())
            .await
            .unwrap();
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_custom_button_handler_is_used() {
        let spec = CommandSpec::new("ping", "p")
            .with_button_handler(button_handler_fn(|_interaction| Box::pin(async { Ok(7) })));
        let descriptor = CommandDescriptor::new(spec).unwrap();

        let code = descriptor
            .invoke_button(&MockInteraction::default())
            .await
            .unwrap();
        assert_eq!(code, 7);
    }

    #[tokio::test]
    async fn test_public_view_exposes_descriptor_parts() {
        let handler = Arc::new(CountingHandler::default());
        let descriptor = Arc::new(
            CommandDescriptor::new(
                CommandSpec::new("ping", "p")
                    .interactive(false)
                    .with_shared_handler(handler.clone()),
            )
            .unwrap(),
        );

        let view = descriptor.public_view();
        assert_eq!(view.name, "ping");
        assert_eq!(&view.definition, descriptor.definition());
        assert!(!view.is_interactive);
        assert!(Arc::ptr_eq(&view.owner, &descriptor));

        view.handler.handle(&MockInteraction::default()).await.unwrap();
        assert_eq!(handler.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            view.button_handler
                .handle_button(&MockInteraction::default())
                .await
                .unwrap(),
            0
        );
    }
}
