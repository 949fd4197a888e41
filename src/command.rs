use crate::builtin::Builtin;
use crate::callback::{Callback, CallbackKind};
use crate::error::SetupError;

/// A named, described unit bound to a [`Callback`].
#[derive(Debug)]
pub struct Command {
    name: String,
    description: String,
    callback: Callback,
}

impl Command {
    pub fn new(name: impl Into<String>, description: impl Into<String>, callback: Callback) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            callback,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn callback(&self) -> &Callback {
        &self.callback
    }
}

/// Something a page lists: either a command or a nested page.
#[derive(Debug)]
pub enum Entry {
    Command(Command),
    Page(Page),
}

impl Entry {
    pub fn name(&self) -> &str {
        match self {
            Entry::Command(command) => command.name(),
            Entry::Page(page) => page.name(),
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Entry::Command(command) => command.description(),
            Entry::Page(page) => page.description(),
        }
    }
}

impl From<Command> for Entry {
    fn from(command: Command) -> Self {
        Entry::Command(command)
    }
}

impl From<Page> for Entry {
    fn from(page: Page) -> Self {
        Entry::Page(page)
    }
}

/// A node of the menu tree.
///
/// Entries keep insertion order, which is also the order they are displayed in.
/// Every name is unique within the page and never one of the builtin tokens.
#[derive(Debug)]
pub struct Page {
    name: String,
    description: String,
    entries: Vec<Entry>,
}

impl Page {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            entries: Vec::new(),
        }
    }

    /// Build a page from a list of entries, validating each one in order.
    pub fn with_entries<I, E>(
        name: impl Into<String>,
        description: impl Into<String>,
        entries: I,
    ) -> Result<Self, SetupError>
    where
        I: IntoIterator<Item = E>,
        E: Into<Entry>,
    {
        let mut page = Self::new(name, description);
        for entry in entries {
            page.add(entry)?;
        }
        Ok(page)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Check that `name` can be inserted into this page.
    pub fn validate(&self, name: &str) -> Result<(), SetupError> {
        if self.get(name).is_some() {
            return Err(SetupError::NameConflict(name.to_string()));
        }
        if Builtin::is_reserved(name) {
            return Err(SetupError::ReservedName(name.to_string()));
        }
        // Input is split on whitespace, so such a name could never be typed.
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(SetupError::InvalidName(name.to_string()));
        }
        Ok(())
    }

    /// Register `handler` as a command of the given kind.
    pub fn add_command<F>(
        &mut self,
        kind: CallbackKind,
        name: impl Into<String>,
        description: impl Into<String>,
        handler: F,
    ) -> Result<(), SetupError>
    where
        F: Fn(&[String]) -> anyhow::Result<String> + 'static,
    {
        let command = Command::new(name, description, Callback::new(kind, handler));
        self.add(command)
    }

    pub fn add_page(&mut self, page: Page) -> Result<(), SetupError> {
        self.add(page)
    }

    /// Validate and append any entry. On failure the page is left untouched.
    pub fn add(&mut self, entry: impl Into<Entry>) -> Result<(), SetupError> {
        let entry = entry.into();
        self.validate(entry.name())?;
        self.entries.push(entry);
        Ok(())
    }

    /// Name the next entry would get in a numbered menu, starting at "1".
    pub fn next_key(&self) -> String {
        (self.entries.len() + 1).to_string()
    }

    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.name() == name)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
