//! dochat CLI: chat with your documents from the terminal

use clap::Parser;
use dochat_client::Config;

/// Terminal chat client for a document question-answering backend
#[derive(Parser)]
#[command(name = "dochat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Backend base URL
    #[arg(long, default_value = "http://localhost:8000")]
    backend_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "120")]
    timeout: u64,
}

fn main() {
    let cli = Cli::parse();

    let config = Config {
        base_url: cli.backend_url,
        timeout_secs: cli.timeout,
    };

    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    if let Err(e) = rt.block_on(dochat_tui::run_tui(&config)) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
