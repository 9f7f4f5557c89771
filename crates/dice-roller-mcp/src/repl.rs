//! Interactive REPL for the dice-roller MCP server.
//!
//! Launch with `dice-roller-mcp repl`. Type `/help` for commands, Tab for
//! completion, or enter a notation such as `3d6` to roll it directly.

use rustyline::completion::{Completer, Pair};
use rustyline::config::CompletionType;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{
    Cmd, ConditionalEventHandler, Config, Editor, Event, EventContext, EventHandler, Helper,
    KeyEvent, RepeatCount,
};

use crate::context::DiceContext;
use crate::resources::ResourceRegistry;
use crate::tools::ToolRegistry;

/// Available REPL commands.
const COMMANDS: &[(&str, &str)] = &[
    ("/roll", "Roll dice, e.g. /roll 2d6"),
    ("/tools", "List available MCP tools"),
    ("/resources", "List available MCP resources"),
    ("/info", "Show server capabilities"),
    ("/clear", "Clear the screen"),
    ("/help", "Show available commands"),
    ("/exit", "Quit the REPL"),
];

/// Common dice offered for completion after `/roll`.
const COMMON_ROLLS: &[&str] = &["1d4", "1d6", "2d6", "1d8", "1d10", "1d12", "1d20", "1d100"];

#[derive(Default)]
struct DiceHelper;

impl Completer for DiceHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let input = &line[..pos];

        if !input.contains(' ') {
            let matches: Vec<Pair> = COMMANDS
                .iter()
                .filter(|(cmd, _)| cmd.starts_with(input))
                .map(|(cmd, desc)| Pair {
                    display: format!("{cmd:<16} {desc}"),
                    replacement: format!("{cmd} "),
                })
                .collect();
            return Ok((0, matches));
        }

        if let Some(args) = input.strip_prefix("/roll ") {
            let prefix_start = input.len() - args.len();
            let matches: Vec<Pair> = COMMON_ROLLS
                .iter()
                .filter(|n| n.starts_with(args.trim()))
                .map(|n| Pair {
                    display: n.to_string(),
                    replacement: n.to_string(),
                })
                .collect();
            return Ok((prefix_start, matches));
        }

        Ok((pos, Vec::new()))
    }
}

impl Hinter for DiceHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        if pos < line.len() || line.is_empty() {
            return None;
        }
        if line.starts_with('/') && !line.contains(' ') {
            for (cmd, _) in COMMANDS {
                if cmd.starts_with(line) && *cmd != line {
                    return Some(cmd[line.len()..].to_string());
                }
            }
        }
        None
    }
}

impl Highlighter for DiceHelper {}
impl Validator for DiceHelper {}
impl Helper for DiceHelper {}

struct TabCompleteOrAcceptHint;

impl ConditionalEventHandler for TabCompleteOrAcceptHint {
    fn handle(
        &self,
        _evt: &Event,
        _n: RepeatCount,
        _positive: bool,
        ctx: &EventContext<'_>,
    ) -> Option<Cmd> {
        if ctx.has_hint() {
            Some(Cmd::CompleteHint)
        } else {
            Some(Cmd::Complete)
        }
    }
}

/// Run the interactive REPL.
pub fn run(ctx: &DiceContext) -> anyhow::Result<()> {
    eprintln!();
    eprintln!(
        "  \x1b[32m\u{25c9}\x1b[0m \x1b[1mdice-roller-mcp v{}\x1b[0m \x1b[90m\u{2014} NdS dice over MCP\x1b[0m",
        env!("CARGO_PKG_VERSION")
    );
    eprintln!();
    eprintln!(
        "    Type a notation like \x1b[36m3d6\x1b[0m to roll, \x1b[90mTab\x1b[0m to complete, \x1b[90m/exit\x1b[0m to quit."
    );
    eprintln!();

    let config = Config::builder()
        .history_ignore_space(true)
        .auto_add_history(true)
        .completion_type(CompletionType::List)
        .completion_prompt_limit(20)
        .build();

    let mut rl: Editor<DiceHelper, rustyline::history::DefaultHistory> =
        Editor::with_config(config)?;
    rl.set_helper(Some(DiceHelper));
    rl.bind_sequence(
        KeyEvent::from('\t'),
        EventHandler::Conditional(Box::new(TabCompleteOrAcceptHint)),
    );

    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    let hist_path = std::path::PathBuf::from(&home).join(".dice_roller_mcp_history");
    if hist_path.exists() {
        let _ = rl.load_history(&hist_path);
    }

    let prompt = " \x1b[36mdice>\x1b[0m ";

    loop {
        match rl.readline(prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let Some(input) = line.strip_prefix('/') else {
                    cmd_roll(line, ctx);
                    continue;
                };
                if input.is_empty() {
                    cmd_help();
                    continue;
                }

                let mut parts = input.splitn(2, ' ');
                let cmd = parts.next().unwrap_or("");
                let args = parts.next().unwrap_or("").trim();

                match cmd {
                    "exit" | "quit" => {
                        eprintln!("  \x1b[90m\u{2728}\x1b[0m Goodbye!");
                        break;
                    }
                    "help" | "h" | "?" => cmd_help(),
                    "clear" | "cls" => eprint!("\x1b[2J\x1b[H"),
                    "info" => cmd_info(ctx),
                    "tools" => cmd_tools(),
                    "resources" => cmd_resources(ctx),
                    "roll" | "r" => {
                        let notation = if args.is_empty() {
                            ctx.default_roll().to_string()
                        } else {
                            args.to_string()
                        };
                        cmd_roll(&notation, ctx);
                    }
                    _ => {
                        eprintln!("  Unknown command '/{cmd}'. Type /help for commands.");
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                eprintln!("  \x1b[90m(Ctrl+C)\x1b[0m Type \x1b[1m/exit\x1b[0m to quit.");
            }
            Err(ReadlineError::Eof) => {
                eprintln!("  \x1b[90m\u{2728}\x1b[0m Goodbye!");
                break;
            }
            Err(err) => {
                eprintln!("  Error: {err}");
                break;
            }
        }
    }

    let _ = rl.save_history(&hist_path);

    Ok(())
}

fn cmd_help() {
    eprintln!();
    eprintln!("  Commands:");
    eprintln!();
    for (cmd, desc) in COMMANDS {
        eprintln!("    {cmd:<18} {desc}");
    }
    eprintln!();
    eprintln!("  Tip: a bare notation such as 4d8 rolls it.");
    eprintln!();
}

fn cmd_info(ctx: &DiceContext) {
    let capabilities = crate::types::InitializeResult::default_result();
    eprintln!();
    eprintln!(
        "  Server:       {} v{}",
        capabilities.server_info.name, capabilities.server_info.version
    );
    eprintln!("  Protocol:     {}", capabilities.protocol_version);
    eprintln!("  Default roll: {}", ctx.default_roll());
    eprintln!("  Max dice:     {}", ctx.max_dice());
    eprintln!();
}

fn cmd_tools() {
    let tools = ToolRegistry::list_tools();
    eprintln!();
    eprintln!("  {} MCP tools available:", tools.len());
    eprintln!();
    for tool in &tools {
        eprintln!(
            "    {:<28} {}",
            tool.name,
            tool.description.as_deref().unwrap_or("")
        );
    }
    eprintln!();
}

fn cmd_resources(ctx: &DiceContext) {
    eprintln!();
    for resource in ResourceRegistry::list_resources(ctx) {
        eprintln!("    {:<28} {}", resource.uri, resource.name);
    }
    for template in ResourceRegistry::list_templates() {
        eprintln!("    {:<28} {}", template.uri_template, template.name);
    }
    eprintln!();
}

fn cmd_roll(notation: &str, ctx: &DiceContext) {
    match ctx.roll_notation(notation) {
        Ok(outcome) => {
            let faces: Vec<String> = outcome.rolls.iter().map(u32::to_string).collect();
            eprintln!(
                "  \x1b[1m{}\x1b[0m  [{}]  = \x1b[32m{}\x1b[0m",
                outcome.notation,
                faces.join(", "),
                outcome.sum
            );
        }
        Err(e) => eprintln!("  {e}"),
    }
}
