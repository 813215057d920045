//! Tiller demo console.
//!
//! Builds a sample command tree covering every parameter kind and drives it
//! over a stdio REPL. A line ending in `?` shows completion suggestions for
//! the part before it; `exit` leaves.

use std::io::{self, BufRead, Write};

use anyhow::Result;

use tiller_console::{Console, ConsoleConfig, WriterScreen};
use tiller_shell::{
    Command, CommandArgs, CommandTree, CommandTreeBuilder, DirSpec, ParamDef, ParamValue, Screen,
    Shell,
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let shell = Shell::new(build_tree()?);
    let config = ConsoleConfig::from_toml(
        r#"
        prompt = "{path}> "
        welcome = ["Tiller demo console.", "Append ? to a line for suggestions; 'exit' leaves."]
        "#,
    )?;
    let mut console = Console::with_config(shell, config);
    log::info!("Starting Tiller demo console");

    let mut screen = WriterScreen::new(io::stdout());
    console.print_welcome(&mut screen);

    let stdin = io::stdin();
    loop {
        print!("{}", console.prompt());
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end_matches(['\n', '\r']);
        if line.trim() == "exit" {
            break;
        }
        if let Some(partial) = line.strip_suffix('?') {
            show_suggestions(&console, partial, &mut screen);
            continue;
        }
        if let Err(e) = console.submit(line, &mut screen) {
            screen.print_error(&format!("{e}"));
        }
    }
    log::info!("Tiller demo console closed");
    Ok(())
}

fn show_suggestions(console: &Console, partial: &str, screen: &mut dyn Screen) {
    match console.complete(partial) {
        Ok(completion) => {
            if completion.suggestions.is_empty() {
                screen.print_line("(no suggestions)");
            } else {
                screen.print_line(&completion.suggestions.join("  "));
                screen.print_line(&format!("-> {}", completion.line));
            }
        },
        Err(e) => screen.print_error(&format!("{e}")),
    }
}

/// Sample hierarchy: filesystem-style navigation commands as globals, plus
/// nested tool directories exercising every parameter kind.
fn build_tree() -> tiller_types::Result<CommandTree> {
    CommandTreeBuilder::new()
        .command(echo_command()?)
        .command(paint_command()?)
        .dir(
            DirSpec::new("net", "Network tools")
                .command(ping_command()?)
                .dir(DirSpec::new("wifi", "Wireless tools").command(scan_command()?)),
        )
        .dir(DirSpec::new("calc", "Calculator").command(add_command()?))
        .global_command(help_command()?)
        .global_command(cd_command()?)
        .global_command(pwd_command()?)
        .global_command(describe_command()?)
        .build()
}

fn echo_command() -> tiller_types::Result<Command> {
    Command::new(
        "echo",
        "Print a message",
        vec![
            ParamDef::string("message", "What to print"),
            ParamDef::int("times", "Repeat count").with_default(ParamValue::Int(1)),
        ],
        |_tree: &CommandTree, args: &CommandArgs, screen: &mut dyn Screen| {
            for _ in 0..args.int("times")? {
                screen.print_line(args.str("message")?);
            }
            Ok(())
        },
    )
}

fn paint_command() -> tiller_types::Result<Command> {
    Command::new(
        "paint",
        "Paint with a color",
        vec![
            ParamDef::constrained_string(
                "color",
                "Color to use",
                vec!["red".into(), "green".into(), "blue".into()],
            ),
            ParamDef::enumeration(
                "finish",
                "Surface finish",
                vec!["matte".into(), "gloss".into()],
            )
            .with_default(ParamValue::Str("matte".into())),
            ParamDef::boolean("bright", "Brighten the color")
                .with_default(ParamValue::Bool(false)),
        ],
        |_tree: &CommandTree, args: &CommandArgs, screen: &mut dyn Screen| {
            let brightness = if args.boolean("bright")? { "bright " } else { "" };
            screen.print_line(&format!(
                "painting {brightness}{} ({})",
                args.str("color")?,
                args.str("finish")?
            ));
            Ok(())
        },
    )
}

fn ping_command() -> tiller_types::Result<Command> {
    Command::new(
        "ping",
        "Ping a host",
        vec![
            ParamDef::string("host", "Host to ping"),
            ParamDef::int("count", "Number of probes").with_default(ParamValue::Int(4)),
        ],
        |_tree: &CommandTree, args: &CommandArgs, screen: &mut dyn Screen| {
            let host = args.str("host")?;
            for i in 1..=args.int("count")? {
                screen.print_line(&format!("probe {i}: {host} ok"));
            }
            Ok(())
        },
    )
}

fn scan_command() -> tiller_types::Result<Command> {
    Command::new(
        "scan",
        "Scan for wireless networks",
        vec![
            ParamDef::boolean("verbose", "Detailed output").with_default(ParamValue::Bool(false)),
        ],
        |_tree: &CommandTree, args: &CommandArgs, screen: &mut dyn Screen| {
            screen.print_line("2 networks found");
            if args.boolean("verbose")? {
                screen.print_line("  tiller-net (wpa2)");
                screen.print_line("  guest (open)");
            }
            Ok(())
        },
    )
}

fn add_command() -> tiller_types::Result<Command> {
    Command::new(
        "add",
        "Add two numbers",
        vec![
            ParamDef::float("a", "First operand"),
            ParamDef::float("b", "Second operand"),
        ],
        |_tree: &CommandTree, args: &CommandArgs, screen: &mut dyn Screen| {
            screen.print_line(&format!("{}", args.float("a")? + args.float("b")?));
            Ok(())
        },
    )
}

fn help_command() -> tiller_types::Result<Command> {
    Command::new(
        "help",
        "List commands available here",
        Vec::new(),
        |tree: &CommandTree, _args: &CommandArgs, screen: &mut dyn Screen| {
            let here = tree.current_dir();
            for (name, description) in tree.child_dirs(here) {
                screen.print_line(&format!("  {name}/  {description}"));
            }
            for (name, description) in tree.child_commands(here) {
                screen.print_line(&format!("  {name}  {description}"));
            }
            for (name, description) in tree.global_commands() {
                screen.print_line(&format!("  {name}*  {description}"));
            }
            Ok(())
        },
    )
}

fn cd_command() -> tiller_types::Result<Command> {
    Command::new(
        "cd",
        "Change the current directory",
        vec![ParamDef::directory_ref("target", "Directory to move to")],
        |tree: &CommandTree, args: &CommandArgs, screen: &mut dyn Screen| {
            let target = args.directory("target")?;
            tree.set_current_dir(target);
            screen.show_path(&tree.path_of(target));
            Ok(())
        },
    )
}

fn pwd_command() -> tiller_types::Result<Command> {
    Command::new(
        "pwd",
        "Print the current directory",
        Vec::new(),
        |tree: &CommandTree, _args: &CommandArgs, screen: &mut dyn Screen| {
            screen.print_line(&tree.path_of(tree.current_dir()));
            Ok(())
        },
    )
}

fn describe_command() -> tiller_types::Result<Command> {
    Command::new(
        "describe",
        "Describe a command and its parameters",
        vec![ParamDef::command_ref("target", "Command to describe")],
        |tree: &CommandTree, args: &CommandArgs, screen: &mut dyn Screen| {
            let command = tree.command(args.command("target")?);
            screen.print_line(&format!("{}: {}", command.name(), command.description()));
            for param in command.params() {
                let optional = if param.is_optional() { " (optional)" } else { "" };
                screen.print_line(&format!("  {}{optional}: {}", param.name(), param.description()));
            }
            Ok(())
        },
    )
}
