//! Line-oriented transport for playing from a terminal.
//!
//! Each input line is one event:
//!
//! ```text
//! start <channel>
//! <channel> <row>,<col>
//! ```
//!
//! Run with: `cargo run --bin checkers-repl -- --config checkers.toml`

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use rust_checkers::core::EngineConfig;
use rust_checkers::handler::EventHandler;
use rust_checkers::protocol::{render_text, CellTapped, InboundEvent, Outbound};
use rust_checkers::session::{ChannelId, SessionRegistry};

#[derive(Debug, Parser)]
#[command(name = "checkers-repl", about = "Play checkers sessions over stdin/stdout")]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Emit outbound commands as JSON lines instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => EngineConfig::default(),
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))?;
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter)
        .init();

    let mut registry = SessionRegistry::from_config(&config.registry);
    let mut handler = EventHandler::new(&mut registry, config.onboarding.clone());

    tracing::info!(max_sessions = config.registry.max_sessions, "checkers repl ready");

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let event = match parse_line(line) {
            Ok(event) => event,
            Err(err) => {
                tracing::warn!(%line, error = %err, "ignoring malformed input");
                continue;
            }
        };

        let outbound = handler.handle(event);
        if args.json {
            writeln!(stdout, "{}", serde_json::to_string(&outbound)?)?;
        } else {
            write_text(&mut stdout, &outbound)?;
        }
        stdout.flush()?;
    }

    tracing::info!("checkers repl shutdown");
    Ok(())
}

fn parse_line(line: &str) -> anyhow::Result<InboundEvent> {
    let (head, rest) = line
        .split_once(char::is_whitespace)
        .context("expected two fields")?;
    let rest = rest.trim();

    if head == "start" {
        return Ok(InboundEvent::Start {
            channel: ChannelId::from(rest),
        });
    }
    Ok(InboundEvent::CellTapped(CellTapped::from_callback(head, rest)?))
}

fn write_text(out: &mut impl Write, outbound: &Outbound) -> io::Result<()> {
    match outbound {
        Outbound::Render(render) => {
            writeln!(out, "[{}] board:", render.channel)?;
            writeln!(out, "{}", render_text(&render.board))
        }
        Outbound::Notify {
            channel,
            notification,
        } => writeln!(out, "[{channel}] {notification}"),
        Outbound::Onboarding(onboarding) => writeln!(
            out,
            "[{}] {}\n  [{}] -> {}",
            onboarding.channel, onboarding.message, onboarding.launch.label, onboarding.launch.url
        ),
    }
}
