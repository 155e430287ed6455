//! Command options: the kind table and per-option configuration.

mod builder;
mod kind;

use std::fmt;
use std::sync::Arc;

pub use builder::{ConfigureOption, OptionBuilder, OptionConfig};
pub use kind::OptionKind;

/// A typed parameter declaration for a command.
///
/// The kind is kept as written until the descriptor is constructed, where it
/// is parsed exactly once. An unknown kind fails construction.
#[derive(Clone)]
pub struct OptionSpec {
    kind: String,
    configure: Arc<dyn ConfigureOption>,
}

impl OptionSpec {
    pub fn new(kind: impl Into<String>, configure: impl ConfigureOption + 'static) -> Self {
        Self {
            kind: kind.into(),
            configure: Arc::new(configure),
        }
    }

    /// Creates a spec from an already-validated kind.
    pub fn typed(kind: OptionKind, configure: impl ConfigureOption + 'static) -> Self {
        Self::new(kind.as_str(), configure)
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn configurator(&self) -> &dyn ConfigureOption {
        self.configure.as_ref()
    }
}

impl fmt::Debug for OptionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionSpec")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
