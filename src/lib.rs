//! A small interactive text-menu interpreter.
//!
//! Applications describe a tree of [`Page`]s holding named [`Command`]s, hand
//! the root to an [`Interpreter`] and call [`Interpreter::run`]. Each iteration
//! redraws the menu, reads a line and dispatches its first word: builtins `e`
//! (exit) and `q` (quit current page) come first, then entries of the current
//! page. Commands run either a native Rust closure or a child process built
//! from a command line.
//!
//! Terminal access goes through three collaborator traits, [`LineReader`],
//! [`Console`] and [`Renderer`], so the interpreter can be driven entirely from
//! memory with the adapters in [`io_adapters`].

mod builtin;
pub mod callback;
pub mod command;
pub mod console;
pub mod error;
pub mod external;
mod interpreter;
pub mod io_adapters;
pub mod line_reader;
pub mod render;

pub use builtin::Builtin;
pub use callback::{Callback, CallbackKind};
pub use command::{Command, Entry, Page};
pub use console::Console;
pub use error::{ExecuteError, LoopError, NavigationError, ReadError, SetupError};
pub use interpreter::{CONTINUE_PROMPT, DEFAULT_NAME, DEFAULT_PROMPT, Interpreter};
pub use line_reader::LineReader;
pub use render::Renderer;
