use anyhow::Result;
use clap::{Parser, Subcommand};
use smartcalc::calculator::{AngleMode, evaluate_input, normalize};
use smartcalc::config::Config;
use smartcalc::session::{Session, parse_keys};
use smartcalc::terminal::{render_display, render_history};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "smartcalc", version, about = "Keypad-style scientific calculator")]
struct Cli {
    /// Evaluate trigonometric functions in degrees
    #[arg(long, global = true)]
    degrees: bool,

    /// Path to the config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Hide the live result preview
    #[arg(long, global = true)]
    no_preview: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate an expression as typed on the keypad, e.g. `2π`, `5!`, `√9`
    Eval {
        #[arg(required = true, allow_hyphen_values = true)]
        expr: Vec<String>,
    },
    /// Print the canonical form of an expression
    Normalize {
        #[arg(required = true, allow_hyphen_values = true)]
        expr: Vec<String>,
    },
    /// Replay a key sequence through a session, e.g. `12*3<Enter>`
    Keys { keys: String },
    /// Interactive session (the default)
    Repl,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let angle_mode = if cli.degrees {
        AngleMode::Degrees
    } else {
        config.angle_mode
    };
    let show_preview = config.show_preview && !cli.no_preview;

    match cli.command.unwrap_or(Command::Repl) {
        Command::Eval { expr } => {
            let outcome = evaluate_input(&expr.join(" "), angle_mode);
            println!("{}", outcome.display());
            if !outcome.is_number() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Normalize { expr } => println!("{}", normalize(&expr.join(" "))),
        Command::Keys { keys } => {
            let mut session = Session::new(angle_mode);
            for input in parse_keys(&keys) {
                session.handle(input);
            }
            print!("{}", render_display(&session, show_preview));
            print!("{}", render_history(session.history()));
        }
        Command::Repl => {
            let stdin = io::stdin();
            if stdin.is_terminal() {
                eprintln!("smartcalc: type :help for commands, :quit to exit");
            }
            let mut session = Session::new(angle_mode);
            smartcalc::repl::run(stdin.lock(), io::stdout().lock(), &mut session, show_preview)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
