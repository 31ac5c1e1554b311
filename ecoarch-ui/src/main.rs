//! ecoarch-ui - EcoArchitect design service
//!
//! Backs the single-page design form: multi-stage draft sessions, the
//! Gemini-based sustainability analysis, and the saved building records.

use anyhow::Result;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use ecoarch_common::store::STORE_FILE_NAME;
use ecoarch_common::{config, RecordStore};
use ecoarch_ui::services::GeminiClient;
use ecoarch_ui::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting ecoarch-ui (EcoArchitect design service)");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Resolve and create the data folder holding the record slot
    let data_folder = config::resolve_data_folder();
    config::ensure_data_folder(&data_folder)
        .map_err(|e| anyhow::anyhow!("Failed to initialize data folder: {}", e))?;

    let slot_path = data_folder.join(STORE_FILE_NAME);
    info!("Record slot: {}", slot_path.display());

    let store = RecordStore::open(&slot_path);
    info!("Loaded {} saved buildings", store.len());

    // Scoring client is optional: without a key the service still runs,
    // every analysis just degrades to its error result
    let gemini = match config::resolve_api_key() {
        Some(key) => match GeminiClient::new(key) {
            Ok(client) => {
                info!("Gemini scoring client initialized");
                Some(client)
            }
            Err(e) => {
                warn!("Failed to initialize Gemini client, analyses will degrade: {}", e);
                None
            }
        },
        None => {
            warn!(
                "No Gemini API key configured ({}), analyses will degrade",
                config::API_KEY_ENV
            );
            None
        }
    };

    let state = AppState::new(store, gemini);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:5750").await?;
    info!("Listening on http://127.0.0.1:5750");
    info!("Health check: http://127.0.0.1:5750/health");

    axum::serve(listener, app).await?;

    Ok(())
}
