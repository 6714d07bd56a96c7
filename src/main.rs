mod app;
mod auth;
mod config;
mod error;
mod extract;
mod seed;
mod state;
#[cfg(test)]
mod testing;
mod users;

use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "userdesk=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let app_state = state::AppState::init().await?;

    sqlx::migrate!("./migrations")
        .run(&app_state.db)
        .await
        .context("run migrations")?;

    if app_state.config.seed.enabled {
        if let Some(password) = app_state.config.seed.password.as_deref() {
            let inserted = seed::seed_demo_users(app_state.users.as_ref(), password).await?;
            tracing::info!(inserted, "seed step finished");
        }
    }

    let config = app_state.config.clone();
    app::serve(app::build_app(app_state), &config).await
}
