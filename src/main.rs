use anyhow::{Context, Result};
use argh::FromArgs;
use menu_shell::console::TerminalConsole;
use menu_shell::render::BoxRenderer;
use menu_shell::{CallbackKind, DEFAULT_NAME, DEFAULT_PROMPT, Interpreter, Page, SetupError};

#[derive(FromArgs)]
/// Browse a demo menu of native and subprocess commands.
struct Args {
    #[argh(option, default = "DEFAULT_NAME.to_string()")]
    /// label shown in front of the breadcrumb.
    name: String,

    #[argh(option, default = "DEFAULT_PROMPT.to_string()")]
    /// marker shown in front of the input line.
    prompt: String,

    #[argh(switch)]
    /// disable colors.
    plain: bool,
}

fn build_menu() -> Result<Page, SetupError> {
    let mut commands = Page::new("1", "page 1");
    commands.add_command(CallbackKind::NativeFunction, "1", "command 1", |_| {
        Ok("command 1".to_string())
    })?;
    commands.add_command(CallbackKind::Subprocess, "2", "command 2", |_| {
        Ok("echo command 2".to_string())
    })?;

    let mut tools = Page::new("2", "tools");
    tools.add_command(CallbackKind::NativeFunction, "args", "print arguments", |args| {
        Ok(format!("{} argument(s): {}", args.len(), args.join(" ")))
    })?;
    tools.add_command(CallbackKind::Subprocess, "ls", "list a directory", |args| {
        let quoted = args
            .iter()
            .map(|arg| shlex::try_quote(arg).map(|x| x.into_owned()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(format!("ls -l {}", quoted.join(" ")))
    })?;
    tools.add_command(CallbackKind::NativeFunction, "fail", "fail on purpose", |_| {
        Err(anyhow::anyhow!("this command always fails"))
    })?;

    let mut root = Page::new("0", "home");
    root.add_page(commands)?;
    root.add_page(tools)?;
    Ok(root)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args: Args = argh::from_env();

    let root = build_menu().context("invalid menu")?;
    let mut interpreter = Interpreter::new(&root)
        .with_name(args.name)
        .with_prompt(args.prompt)
        .with_console(Box::new(TerminalConsole::new().plain(args.plain)))
        .with_renderer(Box::new(BoxRenderer::terminal().plain(args.plain)));

    log::debug!("starting menu with {} top-level entries", root.len());
    interpreter.run()?;
    Ok(())
}
