use orderdesk_api::app;
use orderdesk_api::app::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    orderdesk_observability::init();

    let state = AppState::seeded();
    let router = app::build_app(state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, router).await?;
    Ok(())
}
