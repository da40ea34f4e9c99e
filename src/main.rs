use std::path::PathBuf;

use clap::Parser;
use trivia_quiz::App;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory holding the saved state file
    #[arg(short, long, default_value = ".trivia-quiz")]
    data_dir: PathBuf,

    /// Play from the bundled question bank without touching the network
    #[arg(short, long)]
    offline: bool,
}

#[tokio::main]
async fn main() {
    pretty_env_logger::init();
    let args = Args::parse();

    let app = match App::new(&args.data_dir, args.offline) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error starting quiz: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = app.run().await {
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}
