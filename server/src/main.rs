use sea_orm::Database;
use tracing::info;

use shukatsu_server::config::ServerConfig;
use shukatsu_server::router::build_router;
use shukatsu_server::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState {
        db,
        company_name_scope: config.company_name_scope,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("tracker service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
