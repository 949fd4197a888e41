use crate::builtin::Builtin;
use crate::command::{Entry, Page};
use crate::console::{Console, TerminalConsole};
use crate::error::{ExecuteError, LoopError, NavigationError, ReadError};
use crate::line_reader::{LineReader, RustylineReader};
use crate::render::{BoxRenderer, Header, Renderer, Row};

/// Label shown in front of the breadcrumb.
pub const DEFAULT_NAME: &str = "[🐟]";
/// Marker shown in front of the input line.
pub const DEFAULT_PROMPT: &str = ">";
/// Prompt shown after command output so it stays readable until acknowledged.
pub const CONTINUE_PROMPT: &str = "press enter to continue";

/// An interactive menu over a tree of [`Page`]s.
///
/// The interpreter borrows the root page for its whole lifetime and keeps the
/// path from the root to the page currently displayed. Typed tokens resolve
/// against the builtins first, then against the current page.
///
/// Example
/// ```
/// use menu_shell::io_adapters::{MemConsole, MemRenderer, ScriptedReader};
/// use menu_shell::{CallbackKind, Interpreter, Page};
///
/// let mut root = Page::new("0", "home");
/// root.add_command(CallbackKind::NativeFunction, "1", "greet", |_| Ok("hi".to_string()))
///     .unwrap();
///
/// let mut menu = Interpreter::new(&root)
///     .with_reader(Box::new(ScriptedReader::new(["1", "e"])))
///     .with_console(Box::new(MemConsole::new()))
///     .with_renderer(Box::new(MemRenderer::new()));
/// menu.run().unwrap();
/// ```
pub struct Interpreter<'p> {
    name: String,
    prompt: String,
    root: &'p Page,
    // Pages entered below the root, innermost last.
    trail: Vec<&'p Page>,
    reader: Box<dyn LineReader>,
    console: Box<dyn Console>,
    renderer: Box<dyn Renderer>,
}

impl<'p> Interpreter<'p> {
    /// Create an interpreter on `root` wired to the terminal.
    pub fn new(root: &'p Page) -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            prompt: DEFAULT_PROMPT.to_string(),
            root,
            trail: Vec::new(),
            reader: Box::new(RustylineReader::new()),
            console: Box::new(TerminalConsole::new()),
            renderer: Box::new(BoxRenderer::terminal()),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn with_reader(mut self, reader: Box<dyn LineReader>) -> Self {
        self.reader = reader;
        self
    }

    pub fn with_console(mut self, console: Box<dyn Console>) -> Self {
        self.console = console;
        self
    }

    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn builtins(&self) -> [Builtin; 2] {
        Builtin::ALL
    }

    /// The navigation stack, root first. Never empty.
    pub fn pages(&self) -> Vec<&'p Page> {
        std::iter::once(self.root)
            .chain(self.trail.iter().copied())
            .collect()
    }

    pub fn depth(&self) -> usize {
        1 + self.trail.len()
    }

    pub fn current_page(&self) -> &'p Page {
        self.trail.last().copied().unwrap_or(self.root)
    }

    /// Leave the current page for its parent.
    ///
    /// The root page cannot be left; trying to is a contract violation rather
    /// than a user mistake and is reported as a [`NavigationError`].
    pub fn quit_page(&mut self) -> Result<(), NavigationError> {
        let page = self.trail.pop().ok_or(NavigationError::RootPage)?;
        log::debug!("left page '{}'", page.name());
        Ok(())
    }

    fn enter_page(&mut self, page: &'p Page) {
        log::debug!("entered page '{}'", page.name());
        self.trail.push(page);
    }

    fn run_builtin(&mut self, builtin: Builtin) -> Result<bool, NavigationError> {
        match builtin {
            Builtin::Exit => {
                self.console.info("exited");
                Ok(true)
            }
            Builtin::QuitPage => {
                self.quit_page()?;
                Ok(false)
            }
        }
    }

    /// Dispatch one tokenized input line.
    ///
    /// Returns `Ok(true)` when the loop should stop. Unknown commands and
    /// failing callbacks are reported on the console and yield `Ok(false)`.
    pub fn execute<S: AsRef<str>>(&mut self, tokens: &[S]) -> Result<bool, ExecuteError> {
        let Some((first, rest)) = tokens.split_first() else {
            return Err(ExecuteError::NoArguments);
        };
        let first = first.as_ref();

        if let Some(builtin) = Builtin::lookup(first) {
            log::debug!("dispatching builtin '{first}'");
            return Ok(self.run_builtin(builtin)?);
        }

        let page = self.current_page();
        match page.get(first) {
            Some(Entry::Command(command)) => {
                log::debug!("dispatching command '{first}' on page '{}'", page.name());
                let args: Vec<String> = rest.iter().map(|x| x.as_ref().to_string()).collect();
                let done = command.callback().invoke(&args, self.console.as_mut());
                self.console.pause(CONTINUE_PROMPT);
                Ok(done)
            }
            Some(Entry::Page(nested)) => {
                self.enter_page(nested);
                Ok(false)
            }
            None => {
                log::debug!("no entry '{first}' on page '{}'", page.name());
                self.console.error(&format!("command not found: {first}"));
                self.console.pause(CONTINUE_PROMPT);
                Ok(false)
            }
        }
    }

    /// Breadcrumb of the navigation stack.
    pub fn header(&self) -> Header {
        Header {
            name: self.name.clone(),
            crumbs: self
                .pages()
                .iter()
                .map(|page| page.description().to_string())
                .collect(),
        }
    }

    /// Entries of the current page.
    pub fn panel(&self) -> Vec<Row> {
        self.current_page()
            .entries()
            .iter()
            .map(|entry| Row::new(entry.name(), entry.description()))
            .collect()
    }

    pub fn footer(&self) -> Vec<Row> {
        Builtin::ALL
            .iter()
            .map(|builtin| Row::new(builtin.name(), builtin.description()))
            .collect()
    }

    fn render(&mut self) {
        let (header, body, footer) = (self.header(), self.panel(), self.footer());
        self.renderer.render(&header, &body, &footer);
    }

    /// Run a single iteration: redraw, read one line, dispatch it.
    ///
    /// Returns `Ok(true)` once the loop is done.
    pub fn step(&mut self) -> Result<bool, LoopError> {
        self.console.clear();
        self.render();

        let line = match self.reader.read_line(&format!("{} ", self.prompt)) {
            Ok(line) => line,
            Err(ReadError::Eof) => {
                self.console.print("");
                self.console.info("exited with EOF");
                return Ok(true);
            }
            Err(ReadError::Interrupted) => return Ok(false),
            Err(ReadError::Readline(e)) => return Err(LoopError::Input(e)),
        };

        let tokens: Vec<&str> = line.split_whitespace().collect();
        match self.execute(&tokens) {
            Ok(done) => Ok(done),
            Err(ExecuteError::NoArguments) => Ok(false),
            Err(ExecuteError::Navigation(e)) => Err(e.into()),
        }
    }

    /// Run the interactive loop until exit or end of input.
    pub fn run(&mut self) -> Result<(), LoopError> {
        while !self.step()? {}
        Ok(())
    }
}
