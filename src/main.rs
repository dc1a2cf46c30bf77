use clap::Parser;
use log::*;

use jira_pr_sync::{Args, Result, action, command};

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("jira_pr_sync")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli_args = Args::parse();

    initialize_logger(cli_args.debug_enabled(&|name: &str| {
        std::env::var(name).ok()
    }))?;

    let result = match cli_args.action_config() {
        Ok(config) => command::execute(&config).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(report) => {
            info!(
                "synced pull request: issue: {}, labels: [{}], title: {}{}",
                report.issue_key.as_deref().unwrap_or("none"),
                report.labels.join(", "),
                report.title,
                if report.dry_run { " (dry run)" } else { "" }
            );
            Ok(())
        }
        Err(err) => {
            action::set_failed(&err.to_string());
            Err(err.into())
        }
    }
}
