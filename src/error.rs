use rustyline::error::ReadlineError;
use thiserror::Error;

/// Errors raised while the menu tree is being assembled.
///
/// These are expected to surface before the interactive loop starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("page or command with name '{0}' already exists in current page")]
    NameConflict(String),

    #[error("page or command name '{0}' is reserved")]
    ReservedName(String),

    #[error("page or command name '{0}' must be a single non-empty word")]
    InvalidName(String),

    #[error("invalid callback type: '{0}'")]
    InvalidCallbackType(String),
}

/// Violations of the navigation stack contract.
///
/// They mean the embedding application drove the interpreter into a state it
/// cannot leave, so they are never swallowed by the dispatch boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("current page is root page")]
    RootPage,
}

/// Outcome of [`crate::Interpreter::execute`] when no continuation signal is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecuteError {
    #[error("no arguments provided")]
    NoArguments,

    #[error(transparent)]
    Navigation(#[from] NavigationError),
}

/// Conditions a [`crate::line_reader::LineReader`] reports instead of a line.
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("end of input")]
    Eof,

    #[error("interrupted")]
    Interrupted,

    #[error(transparent)]
    Readline(#[from] ReadlineError),
}

/// Fatal errors that stop [`crate::Interpreter::run`].
#[derive(Error, Debug)]
pub enum LoopError {
    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error("failed to read input: {0}")]
    Input(#[source] ReadlineError),
}
