//! In-memory collaborators for driving an [`crate::Interpreter`] without a terminal.
//!
//! Each recorder hands out a shared handle so the caller can inspect what was
//! recorded after the interpreter took ownership of the recorder.

use crate::console::Console;
use crate::error::ReadError;
use crate::line_reader::LineReader;
use crate::render::{Header, Renderer, Row};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

enum Scripted {
    Line(String),
    Interrupt,
}

/// [`LineReader`] replaying a fixed script, then reporting end of input.
#[derive(Default)]
pub struct ScriptedReader {
    script: VecDeque<Scripted>,
    prompts: Rc<RefCell<Vec<String>>>,
}

impl ScriptedReader {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut reader = Self::default();
        for line in lines {
            reader = reader.line(line);
        }
        reader
    }

    /// Append a line to the script.
    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.script.push_back(Scripted::Line(line.into()));
        self
    }

    /// Append a user interrupt (Ctrl-C) to the script.
    pub fn interrupt(mut self) -> Self {
        self.script.push_back(Scripted::Interrupt);
        self
    }

    /// Handle to the prompts shown so far.
    pub fn prompts(&self) -> Rc<RefCell<Vec<String>>> {
        self.prompts.clone()
    }
}

impl LineReader for ScriptedReader {
    fn read_line(&mut self, prompt: &str) -> Result<String, ReadError> {
        self.prompts.borrow_mut().push(prompt.to_string());
        match self.script.pop_front() {
            Some(Scripted::Line(line)) => Ok(line),
            Some(Scripted::Interrupt) => Err(ReadError::Interrupted),
            None => Err(ReadError::Eof),
        }
    }
}

/// Everything a [`MemConsole`] was asked to do, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleEvent {
    Info(String),
    Error(String),
    Print(String),
    Rule,
    Clear,
    Pause(String),
}

/// [`Console`] recording calls instead of writing to a terminal.
#[derive(Default)]
pub struct MemConsole {
    events: Rc<RefCell<Vec<ConsoleEvent>>>,
}

impl MemConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience: create a console and return (console, events handle).
    pub fn with_handle() -> (Self, Rc<RefCell<Vec<ConsoleEvent>>>) {
        let console = Self::new();
        let events = console.events.clone();
        (console, events)
    }

    fn push(&self, event: ConsoleEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl Console for MemConsole {
    fn info(&mut self, message: &str) {
        self.push(ConsoleEvent::Info(message.to_string()));
    }

    fn error(&mut self, message: &str) {
        self.push(ConsoleEvent::Error(message.to_string()));
    }

    fn print(&mut self, text: &str) {
        self.push(ConsoleEvent::Print(text.to_string()));
    }

    fn rule(&mut self) {
        self.push(ConsoleEvent::Rule);
    }

    fn clear(&mut self) {
        self.push(ConsoleEvent::Clear);
    }

    fn pause(&mut self, prompt: &str) {
        self.push(ConsoleEvent::Pause(prompt.to_string()));
    }
}

/// One screen captured by a [`MemRenderer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub header: Header,
    pub body: Vec<Row>,
    pub footer: Vec<Row>,
}

/// [`Renderer`] keeping every frame it was given.
#[derive(Default)]
pub struct MemRenderer {
    frames: Rc<RefCell<Vec<Frame>>>,
}

impl MemRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience: create a renderer and return (renderer, frames handle).
    pub fn with_handle() -> (Self, Rc<RefCell<Vec<Frame>>>) {
        let renderer = Self::new();
        let frames = renderer.frames.clone();
        (renderer, frames)
    }
}

impl Renderer for MemRenderer {
    fn render(&mut self, header: &Header, body: &[Row], footer: &[Row]) {
        self.frames.borrow_mut().push(Frame {
            header: header.clone(),
            body: body.to_vec(),
            footer: footer.to_vec(),
        });
    }
}
