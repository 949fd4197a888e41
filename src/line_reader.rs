use crate::error::ReadError;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

/// Source of input lines for the interactive loop.
pub trait LineReader {
    /// Show `prompt` and block until one line is entered.
    ///
    /// End of input and user interrupts are reported as [`ReadError::Eof`] and
    /// [`ReadError::Interrupted`] so callers can tell them apart.
    fn read_line(&mut self, prompt: &str) -> Result<String, ReadError>;
}

/// [`LineReader`] backed by a `rustyline` editor with in-memory history.
///
/// The editor is created on first use, so constructing a reader never touches
/// the terminal.
#[derive(Default)]
pub struct RustylineReader {
    editor: Option<DefaultEditor>,
}

impl RustylineReader {
    pub fn new() -> Self {
        Self::default()
    }

    fn editor(&mut self) -> Result<&mut DefaultEditor, ReadlineError> {
        let editor = match self.editor.take() {
            Some(editor) => editor,
            None => DefaultEditor::new()?,
        };
        Ok(self.editor.insert(editor))
    }
}

impl LineReader for RustylineReader {
    fn read_line(&mut self, prompt: &str) -> Result<String, ReadError> {
        let editor = self.editor()?;
        match editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    editor.add_history_entry(line.as_str())?;
                }
                Ok(line)
            }
            Err(ReadlineError::Eof) => Err(ReadError::Eof),
            Err(ReadlineError::Interrupted) => Err(ReadError::Interrupted),
            Err(err) => Err(err.into()),
        }
    }
}
