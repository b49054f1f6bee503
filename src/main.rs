use clap::Parser;
use dotenvy::dotenv;

use noventer_dashboard::cli::{Cli, run};
use noventer_dashboard::models::config::load_config;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cli = Cli::parse();

    let config = match load_config(&cli.app_env) {
        Ok(config) => config,
        Err(err) => {
            log::error!("Error loading dashboard config: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(cli, config).await {
        log::error!("{err}");
        eprintln!("{err}");
        std::process::exit(1);
    }
}
