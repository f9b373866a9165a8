//! Backend entry-point: loads configuration, prepares the document store, and
//! serves the registry endpoints.

mod server;

use color_eyre::eyre::{Context, Result};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use qrtixpro::outbound::persistence::{MongoStore, store_config_from_env};
use server::{ServerSettings, build_http_state, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os().take(1))
        .wrap_err("failed to load listener settings")?;
    let store_config =
        store_config_from_env(&DefaultEnv::new()).wrap_err("failed to load store settings")?;

    let store = MongoStore::connect(&store_config)
        .await
        .wrap_err("failed to connect to the document store")?;
    store
        .ensure_indexes()
        .await
        .wrap_err("failed to prepare the users collection")?;

    let server = create_server(build_http_state(&store), &settings)
        .wrap_err("failed to start the http server")?;
    server.await.wrap_err("http server terminated with an error")
}
