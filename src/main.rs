use std::env;
use std::sync::Arc;

use config::Config;
use dotenvy::dotenv;

use pushkind_clinic::controller::{ControllerOptions, FetchOutcome, ResourceController};
use pushkind_clinic::domain::notice::Notice;
use pushkind_clinic::models::config::ClientConfig;
use pushkind_clinic::pagination::page_links;
use pushkind_clinic::query::QueryState;
use pushkind_clinic::transport::RestTransport;

#[tokio::main]
async fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        // Add `./config/default.yaml`
        .add_source(config::File::with_name("config/default"))
        // Add environment-specific overrides
        .add_source(config::File::with_name(&format!("config/{}", app_env)).required(false))
        // Add settings from the environment (with a prefix of APP)
        .add_source(config::Environment::with_prefix("APP"))
        .build();

    let settings = match settings {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("Error loading settings: {}", err);
            std::process::exit(1);
        }
    };

    let client_config = match settings.try_deserialize::<ClientConfig>() {
        Ok(client_config) => client_config,
        Err(err) => {
            log::error!("Error loading client config: {}", err);
            std::process::exit(1);
        }
    };

    let transport = match RestTransport::from_config(&client_config) {
        Ok(transport) => Arc::new(transport),
        Err(err) => {
            log::error!("Failed to build transport: {err}");
            std::process::exit(1);
        }
    };

    if client_config.page_size == 0 {
        log::error!("Error loading client config: page_size must be greater than zero");
        std::process::exit(1);
    }

    // Optional search term from the command line.
    let mut query = QueryState::new(client_config.page_size);
    if let Some(term) = env::args().nth(1) {
        query.set_search(term);
    }

    let notices: ResourceController<Notice, _> = ResourceController::with_query(
        transport,
        query,
        ControllerOptions::from(&client_config),
    );

    match notices.refresh().settled().await {
        FetchOutcome::Applied => {
            let state = notices.snapshot();
            log::info!(
                "Loaded {} of {} notices, page {} of {}",
                state.items.len(),
                state.total,
                state.query.page,
                state.total_pages()
            );
            for notice in &state.items {
                let marker = if notice.is_read { " " } else { "*" };
                log::info!("{marker} [{}] {} ({})", notice.priority, notice.title, notice.id);
            }
            log::info!("Pages: {:?}", page_links(state.total_pages(), state.query.page));
        }
        FetchOutcome::Failed => {
            log::error!(
                "Failed to load notices: {}",
                notices.error_message().unwrap_or_default()
            );
            std::process::exit(1);
        }
        FetchOutcome::Stale => {}
    }
}
