use crate::console::Console;
use crate::error::SetupError;
use crate::external::ExternalCommand;
use anyhow::Result;
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::str::FromStr;

/// User code bound to a command.
///
/// It receives the whitespace-separated arguments typed after the command name.
/// For a native function the returned text is printed as command output. For a
/// subprocess it is the command line to run.
pub type Handler = dyn Fn(&[String]) -> Result<String>;

/// Tag selecting how a [`Handler`] is invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallbackKind {
    NativeFunction,
    Subprocess,
}

impl CallbackKind {
    pub fn name(self) -> &'static str {
        match self {
            CallbackKind::NativeFunction => "native",
            CallbackKind::Subprocess => "subprocess",
        }
    }
}

impl fmt::Display for CallbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CallbackKind {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "native" | "native_function" => Ok(CallbackKind::NativeFunction),
            "subprocess" => Ok(CallbackKind::Subprocess),
            other => Err(SetupError::InvalidCallbackType(other.to_string())),
        }
    }
}

/// The unit of work behind a command.
///
/// Invoking a callback never fails: whatever goes wrong inside is reported
/// through the [`Console`] and the caller only sees the continuation signal.
pub enum Callback {
    /// Calls the handler in-process.
    NativeFunction(Box<Handler>),
    /// Calls the handler to build a command line and runs it as a child process.
    Subprocess(Box<Handler>),
}

impl Callback {
    pub fn new<F>(kind: CallbackKind, handler: F) -> Self
    where
        F: Fn(&[String]) -> Result<String> + 'static,
    {
        match kind {
            CallbackKind::NativeFunction => Callback::NativeFunction(Box::new(handler)),
            CallbackKind::Subprocess => Callback::Subprocess(Box::new(handler)),
        }
    }

    pub fn native<F>(function: F) -> Self
    where
        F: Fn(&[String]) -> Result<String> + 'static,
    {
        Self::new(CallbackKind::NativeFunction, function)
    }

    pub fn subprocess<F>(arguments: F) -> Self
    where
        F: Fn(&[String]) -> Result<String> + 'static,
    {
        Self::new(CallbackKind::Subprocess, arguments)
    }

    pub fn kind(&self) -> CallbackKind {
        match self {
            Callback::NativeFunction(_) => CallbackKind::NativeFunction,
            Callback::Subprocess(_) => CallbackKind::Subprocess,
        }
    }

    /// Run the callback with `args`.
    ///
    /// Returns `true` when the interpreter should stop. Neither variant ever
    /// requests that, so this is `false` for every outcome.
    pub fn invoke(&self, args: &[String], console: &mut dyn Console) -> bool {
        match self {
            Callback::NativeFunction(function) => invoke_native(function, args, console),
            Callback::Subprocess(arguments) => invoke_subprocess(arguments, args, console),
        }
        false
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Callback").field(&self.kind()).finish()
    }
}

fn invoke_native(function: &Handler, args: &[String], console: &mut dyn Console) {
    console.rule();
    match panic::catch_unwind(AssertUnwindSafe(|| function(args))) {
        Ok(Ok(output)) => {
            if !output.is_empty() {
                console.print(&output);
            }
            console.rule();
        }
        Ok(Err(e)) => console.error(&format!("native function returned an error: {e:#}")),
        Err(payload) => console.error(&format!(
            "native function panicked: {}",
            panic_message(payload.as_ref())
        )),
    }
}

fn invoke_subprocess(arguments: &Handler, args: &[String], console: &mut dyn Console) {
    let command_line = match panic::catch_unwind(AssertUnwindSafe(|| arguments(args))) {
        Ok(Ok(line)) => line,
        Ok(Err(e)) => {
            console.error(&format!("subprocess arguments could not be built: {e:#}"));
            return;
        }
        Err(payload) => {
            console.error(&format!(
                "subprocess arguments panicked: {}",
                panic_message(payload.as_ref())
            ));
            return;
        }
    };

    console.info(&format!("running subprocess command: '{command_line}'"));
    console.rule();
    match ExternalCommand::parse(&command_line).and_then(|command| command.execute()) {
        Ok(0) => console.rule(),
        Ok(code) => {
            console.rule();
            console.error(&format!("subprocess returned an error code: {code}"));
        }
        Err(e) => console.error(&format!("subprocess raised an error: {e:#}")),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io_adapters::{ConsoleEvent, MemConsole};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|x| x.to_string()).collect()
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!(
            "native".parse::<CallbackKind>(),
            Ok(CallbackKind::NativeFunction)
        );
        assert_eq!(
            "native_function".parse::<CallbackKind>(),
            Ok(CallbackKind::NativeFunction)
        );
        assert_eq!(
            "subprocess".parse::<CallbackKind>(),
            Ok(CallbackKind::Subprocess)
        );
    }

    #[test]
    fn test_kind_from_str_invalid() {
        let err = "str".parse::<CallbackKind>().unwrap_err();
        assert_eq!(err, SetupError::InvalidCallbackType("str".to_string()));
        assert_eq!(err.to_string(), "invalid callback type: 'str'");
    }

    #[test]
    fn test_new_selects_variant_by_kind() {
        let native = Callback::new(CallbackKind::NativeFunction, |_| Ok(String::new()));
        let subprocess = Callback::new(CallbackKind::Subprocess, |_| Ok(String::new()));
        assert_eq!(native.kind(), CallbackKind::NativeFunction);
        assert_eq!(subprocess.kind(), CallbackKind::Subprocess);
    }

    #[test]
    fn test_native_function_call() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let callback = Callback::native(move |args| {
            sink.borrow_mut().extend_from_slice(args);
            Ok("hi".to_string())
        });
        let (mut console, events) = MemConsole::with_handle();

        let result = callback.invoke(&args(&["arg1", "arg2"]), &mut console);

        assert!(!result);
        assert_eq!(*seen.borrow(), args(&["arg1", "arg2"]));
        assert_eq!(
            *events.borrow(),
            vec![
                ConsoleEvent::Rule,
                ConsoleEvent::Print("hi".to_string()),
                ConsoleEvent::Rule,
            ]
        );
    }

    #[test]
    fn test_native_function_empty_output_is_not_printed() {
        let callback = Callback::native(|_| Ok(String::new()));
        let (mut console, events) = MemConsole::with_handle();

        assert!(!callback.invoke(&[], &mut console));
        assert_eq!(*events.borrow(), vec![ConsoleEvent::Rule, ConsoleEvent::Rule]);
    }

    #[test]
    fn test_native_function_call_error() {
        let callback = Callback::native(|_| Err(anyhow::anyhow!("test")));
        let (mut console, events) = MemConsole::with_handle();

        let result = callback.invoke(&args(&["arg1"]), &mut console);

        assert!(!result);
        assert_eq!(
            *events.borrow(),
            vec![
                ConsoleEvent::Rule,
                ConsoleEvent::Error("native function returned an error: test".to_string()),
            ]
        );
    }

    #[test]
    fn test_native_function_call_panic() {
        let callback = Callback::native(|_| panic!("boom"));
        let (mut console, events) = MemConsole::with_handle();

        let result = callback.invoke(&[], &mut console);

        assert!(!result);
        assert_eq!(
            events.borrow().last(),
            Some(&ConsoleEvent::Error("native function panicked: boom".to_string()))
        );
    }

    #[test]
    #[cfg(unix)]
    fn test_subprocess_call() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let callback = Callback::subprocess(move |args| {
            sink.borrow_mut().extend_from_slice(args);
            Ok("true".to_string())
        });
        let (mut console, events) = MemConsole::with_handle();

        let result = callback.invoke(&args(&["arg1", "arg2"]), &mut console);

        assert!(!result);
        assert_eq!(*seen.borrow(), args(&["arg1", "arg2"]));
        assert_eq!(
            *events.borrow(),
            vec![
                ConsoleEvent::Info("running subprocess command: 'true'".to_string()),
                ConsoleEvent::Rule,
                ConsoleEvent::Rule,
            ]
        );
    }

    #[test]
    #[cfg(unix)]
    fn test_subprocess_call_bad_return_code() {
        let callback = Callback::subprocess(|_| Ok("sh -c 'exit 2'".to_string()));
        let (mut console, events) = MemConsole::with_handle();

        let result = callback.invoke(&[], &mut console);

        assert!(!result);
        assert_eq!(
            *events.borrow(),
            vec![
                ConsoleEvent::Info("running subprocess command: 'sh -c 'exit 2''".to_string()),
                ConsoleEvent::Rule,
                ConsoleEvent::Rule,
                ConsoleEvent::Error("subprocess returned an error code: 2".to_string()),
            ]
        );
    }

    #[test]
    fn test_subprocess_call_spawn_failure() {
        let callback =
            Callback::subprocess(|_| Ok("definitely-not-a-real-program-4242".to_string()));
        let (mut console, events) = MemConsole::with_handle();

        let result = callback.invoke(&[], &mut console);

        assert!(!result);
        let events = events.borrow();
        match events.last() {
            Some(ConsoleEvent::Error(message)) => {
                assert!(
                    message.starts_with("subprocess raised an error: can't spawn"),
                    "unexpected message: {message}"
                );
            }
            other => panic!("expected an error, got {other:?}"),
        }
    }

    #[test]
    fn test_subprocess_handler_error_skips_spawn() {
        let callback = Callback::subprocess(|_| Err(anyhow::anyhow!("no target")));
        let (mut console, events) = MemConsole::with_handle();

        assert!(!callback.invoke(&[], &mut console));
        assert_eq!(
            *events.borrow(),
            vec![ConsoleEvent::Error(
                "subprocess arguments could not be built: no target".to_string()
            )]
        );
    }
}
