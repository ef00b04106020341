use anyhow::Result;
use tracing::{debug, info, trace};

use super::initdb::connect_and_migrate;
use super::serve::run_server;
use crate::config::{build_app_state, Settings};
use crate::router::create_router;

pub async fn migrate_and_serve(settings: Settings) -> Result<()> {
    trace!("Entering migrate_and_serve function");
    info!("Applying database migrations and starting server");
    debug!("Database URL: {}", settings.database_url);

    let db = connect_and_migrate(&settings.database_url).await?;
    let bind_address = settings.bind_address.clone();

    // Reuse the migrated connection for serving.
    let state = build_app_state(db, settings);
    debug!("Application state initialized successfully");

    run_server(create_router(state), &bind_address).await
}
