// GPA Tracker - Web Server
// Serves the form pages over HTTP with Axum

use anyhow::{Context, Result};
use gpa_tracker::server::{router, AppState};
use gpa_tracker::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    gpa_tracker::init_tracing("info");

    let config = AppConfig::load()?;
    let addr = config.bind_addr;

    println!("🌐 GPA Tracker - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let app = router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    println!("\n🚀 Server running on http://{}", addr);
    println!("   UI:  http://{}/", addr);
    println!("   API: http://{}/api/state", addr);
    println!("\n   Press Ctrl+C to stop\n");

    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}
