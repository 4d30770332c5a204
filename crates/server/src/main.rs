use env_logger::Env;
use log::{error, info};
use migration::{Migrator, MigratorTrait};
use sea_orm::DbErr;
use server::{app, config::Config, state::AppState, utils::shutdown::shutdown_signal};
use thiserror::Error;

#[derive(Debug, Error)]
enum StartupError {
    #[error("Database error: {0}")]
    Db(#[from] DbErr),
    #[error("Failed to serve on the bind address: {0}")]
    Io(#[from] std::io::Error),
}

async fn run(config: Config) -> Result<(), StartupError> {
    let db = database::db::create_connection(&config.database_url).await?;

    if config.run_migrations {
        info!("Applying pending migrations");
        Migrator::up(&db, None).await?;
    }

    let state = AppState {
        db,
        min_raters: config.min_raters,
    };

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Running axum on http://{}", config.bind_addr);
    info!("API docs at http://{}/docs", config.bind_addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Config::from_env()).await {
        error!("{e}");
        std::process::exit(1);
    }
}
