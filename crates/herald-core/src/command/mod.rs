//! Command descriptors and the handlers they wrap.

mod descriptor;
mod handler;
mod spec;

pub use descriptor::{CommandDescriptor, CommandView};
pub use handler::{
    button_handler_fn, handler_fn, AuthorizedHandler, ButtonCode, ButtonHandler, ButtonHandlerFn,
    CommandHandler, DefaultButtonHandler, DefaultHandler, HandlerFn, DEFAULT_DENIED_MESSAGE,
    DEFAULT_REPLY,
};
pub use spec::CommandSpec;
