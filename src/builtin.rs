/// Commands the interpreter always provides, ahead of any page entry.
///
/// Their names are reserved: no [`crate::Page`] may register a command or a
/// nested page under one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    /// Stop the interactive loop.
    Exit,
    /// Return to the parent page.
    QuitPage,
}

impl Builtin {
    /// Builtins in footer order.
    pub const ALL: [Builtin; 2] = [Builtin::Exit, Builtin::QuitPage];

    /// Token typed to invoke the builtin.
    pub fn name(self) -> &'static str {
        match self {
            Builtin::Exit => "e",
            Builtin::QuitPage => "q",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Builtin::Exit => "exit application",
            Builtin::QuitPage => "quit current page",
        }
    }

    pub fn lookup(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|builtin| builtin.name() == token)
    }

    pub fn is_reserved(name: &str) -> bool {
        Self::lookup(name).is_some()
    }
}
