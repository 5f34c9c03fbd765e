use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use quizgym::api::ApiClient;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Base URL of the quiz-gym backend
    #[arg(short, long, default_value = "http://127.0.0.1:8000")]
    server: String,

    /// Directory for log files
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // The TUI owns stdout, so logs go to a daily file instead.
    let file_appender = tracing_appender::rolling::daily(&args.log_dir, "quizgym.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    tracing::info!("Starting quizgym against {}", args.server);

    let api = ApiClient::new(&args.server);
    if let Err(e) = quizgym::run(api).await {
        eprintln!("Error running quizgym: {}", e);
        std::process::exit(1);
    }
}
