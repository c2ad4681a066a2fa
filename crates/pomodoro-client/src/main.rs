use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use pomodoro_client::{
    format_remaining, FileStorage, MemoryStorage, PomodoroSession, SessionCache, TimerClient, TimerView,
};
use pomodoro_core::TimerReply;
use pomodoro_shared::utils::now_millis;

#[derive(Parser)]
#[command(name = "pomodoro")]
#[command(about = "Client for the persist pomodoro timer server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Base URL of the timer server
    #[arg(short, long, env = "POMODORO_SERVER", default_value = "http://127.0.0.1:2039")]
    server: String,

    /// File holding the durable token
    #[arg(long, env = "POMODORO_STATE_FILE")]
    state_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current timer - Default
    Status,
    /// Start a timer; no effect while the cached token already has one
    Start {
        minutes: u32,
    },
    /// Forget the cached token so the next start creates a new timer
    Forget,
    /// Check that the server answers
    Hello,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let state_file = cli.state_file.unwrap_or_else(default_state_file);

    let session = PomodoroSession::new(
        TimerClient::new(cli.server)?,
        SessionCache::new(Box::new(MemoryStorage::new()), Box::new(FileStorage::new(state_file))),
    );

    match cli.command.unwrap_or(Commands::Status) {
        Commands::Status => print_reply(&session.refresh().await?),
        Commands::Start { minutes } => print_reply(&session.start(minutes).await?),
        Commands::Forget => {
            session.forget()?;
            println!("Token forgotten.");
        }
        Commands::Hello => {
            let reply = session.hello().await?;
            println!("{}", if reply.success { "Server is up." } else { "Server reported failure." });
        }
    }

    Ok(())
}

fn default_state_file() -> PathBuf {
    let home = std::env::var_os("HOME").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    home.join(".persist-pomodoro.json")
}

fn print_reply(reply: &TimerReply) {
    if !reply.success {
        eprintln!("Request failed: {:?}", reply.error);
        return;
    }
    match TimerView::from_reply(reply) {
        TimerView::Buttons => println!("No timer running. Start one with `pomodoro start <minutes>`."),
        TimerView::Timer(state) => {
            let now = now_millis();
            if state.is_finished(now) {
                println!("Timer finished ({} minutes).", state.minutes);
            } else {
                println!("{} remaining of {} minutes.", format_remaining(&state, now), state.minutes);
            }
        }
    }
}
