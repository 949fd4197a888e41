use console::{Style, Term};

/// Marker printed in front of every status line.
pub const PREFIX: &str = "[🐟]";
/// Tag for informational status lines.
pub const INFO_PREFIX: &str = "[info]";
/// Tag for error status lines.
pub const ERROR_PREFIX: &str = "[error]";

/// Status and error reporting surface used by the interpreter and callbacks.
///
/// All methods are fire-and-forget. Implementations must not fail loudly, since
/// they run inside the dispatch boundary that is required to never raise.
pub trait Console {
    /// Report a status message.
    fn info(&mut self, message: &str);

    /// Report a recoverable error.
    fn error(&mut self, message: &str);

    /// Print raw text produced by a command.
    fn print(&mut self, text: &str);

    /// Draw a horizontal separator framing command output.
    fn rule(&mut self);

    /// Clear the whole screen.
    fn clear(&mut self);

    /// Block until the user acknowledges with enter.
    fn pause(&mut self, prompt: &str);
}

pub fn format_info(message: &str) -> String {
    format!("{PREFIX} {INFO_PREFIX} {message}")
}

pub fn format_error(message: &str) -> String {
    format!("{PREFIX} {ERROR_PREFIX} {message}")
}

/// [`Console`] writing styled lines to the process terminal.
pub struct TerminalConsole {
    term: Term,
    plain: bool,
}

impl TerminalConsole {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
            plain: false,
        }
    }

    /// Disable ANSI styling even when the terminal supports it.
    pub fn plain(mut self, plain: bool) -> Self {
        self.plain = plain;
        self
    }

    fn style(&self, style: Style) -> Style {
        if self.plain {
            style.force_styling(false)
        } else {
            style
        }
    }

    fn write_line(&self, line: &str) {
        if let Err(e) = self.term.write_line(line) {
            log::warn!("failed to write to terminal: {e}");
        }
    }
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for TerminalConsole {
    fn info(&mut self, message: &str) {
        let style = self.style(Style::new().magenta());
        self.write_line(&style.apply_to(format_info(message)).to_string());
    }

    fn error(&mut self, message: &str) {
        let style = self.style(Style::new().yellow());
        self.write_line(&style.apply_to(format_error(message)).to_string());
    }

    fn print(&mut self, text: &str) {
        self.write_line(text);
    }

    fn rule(&mut self) {
        let (_, columns) = self.term.size();
        let style = self.style(Style::new().magenta());
        let line = "─".repeat(usize::from(columns));
        self.write_line(&style.apply_to(line).to_string());
    }

    fn clear(&mut self) {
        if let Err(e) = self.term.clear_screen() {
            log::warn!("failed to clear terminal: {e}");
        }
    }

    fn pause(&mut self, prompt: &str) {
        if let Err(e) = self.term.write_str(&format!("{prompt} ")) {
            log::warn!("failed to write to terminal: {e}");
        }
        // Any outcome, including a closed stdin, counts as acknowledgement.
        if let Err(e) = self.term.read_line() {
            log::debug!("pause ended without a line: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_is_prefixed() {
        assert_eq!(format_info("message"), "[🐟] [info] message");
    }

    #[test]
    fn test_error_is_prefixed() {
        assert_eq!(format_error("message"), "[🐟] [error] message");
    }

    #[test]
    fn test_plain_style_emits_no_escapes() {
        let console = TerminalConsole::new().plain(true);
        let styled = console
            .style(Style::new().magenta())
            .apply_to("text")
            .to_string();
        assert_eq!(styled, "text");
    }
}
