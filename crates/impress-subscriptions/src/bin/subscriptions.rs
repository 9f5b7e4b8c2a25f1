//! Smart subscriptions CLI
//!
//! Drives the subscription controller through the in-memory surface: add or
//! delete a subscription against the backend, or render a JSON snapshot to
//! markup.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use impress_subscriptions::surface::{HeadlessButton, HeadlessInput, HeadlessList, HeadlessMessage};
use impress_subscriptions::{
    is_success, AddOutcome, AttachContext, ConfigError, HttpSubscriptionApi, MessageCatalog,
    SubscriptionError, SubscriptionId, SubscriptionListController, SubscriptionRecord,
    SubscriptionsConfig,
};

#[derive(Parser)]
#[command(name = "subscriptions", about = "Manage smart subscriptions")]
struct Cli {
    /// Backend base URL (overrides config and IMPRESS_API_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Config file (default: ~/.impress/subscriptions.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Message language
    #[arg(long, global = true, value_enum)]
    lang: Option<Lang>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum Lang {
    En,
    Zh,
}

#[derive(Subcommand)]
enum Command {
    /// Add a smart subscription
    Add {
        #[arg(long)]
        query: String,
        #[arg(long)]
        alias: String,
    },
    /// Delete a smart subscription by id
    Delete { id: String },
    /// Render a JSON array of subscription records as markup
    Render { file: PathBuf },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let code = run(cli).await?;
    std::process::exit(code);
}

async fn run(cli: Cli) -> Result<i32, SubscriptionError> {
    let mut config = SubscriptionsConfig::load_standard(cli.config.as_deref())?;
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
        config.validate()?;
    }
    if let Some(Lang::Zh) = cli.lang {
        config.messages = MessageCatalog::zh_cn();
    }

    let api = HttpSubscriptionApi::new(&config.api)?;
    let controller = SubscriptionListController::new(api, config.messages.clone());

    match cli.command {
        Command::Add { query, alias } => {
            let button = HeadlessButton::new();
            let message = HeadlessMessage::new();
            controller.attach(
                AttachContext::new()
                    .with_query_input(HeadlessInput::with_value(&query))
                    .with_alias_input(HeadlessInput::with_value(&alias))
                    .with_add_button(button.clone())
                    .with_message(message.clone())
                    .with_reload(|| tracing::info!("Subscription list changed")),
            );

            let outcome = controller.add_subscription().await;
            println!("{}", message.text());
            Ok(if outcome == AddOutcome::Created { 0 } else { 1 })
        }
        Command::Delete { id } => {
            let id = SubscriptionId::new(id);
            match controller.delete_subscription(&id).await {
                Ok(status) if is_success(status) => {
                    println!("Deleted {}", id);
                    Ok(0)
                }
                Ok(status) => {
                    eprintln!("Failed to delete {}: server answered {}", id, status);
                    Ok(1)
                }
                Err(e) => {
                    tracing::error!(%id, error = %e, "Failed to delete subscription");
                    eprintln!("Failed to delete {}: {}", id, e);
                    Ok(1)
                }
            }
        }
        Command::Render { file } => {
            let content = std::fs::read_to_string(&file).map_err(ConfigError::from)?;
            let records: Vec<SubscriptionRecord> =
                serde_json::from_str(&content).map_err(ConfigError::from)?;

            let list = HeadlessList::new();
            controller.attach(AttachContext::new().with_list(list.clone()));
            controller.render(Some(records.as_slice()));
            println!("{}", list.markup());
            Ok(0)
        }
    }
}
