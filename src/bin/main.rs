use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use feedline::config::{self, DataSource};
use feedline::core::fixture::Snapshot;
use feedline::handlers::{self, AppState};
use feedline::{Feed, MemoryRepository, RemoteRepository, Repository};

fn build_repository() -> anyhow::Result<Arc<dyn Repository>> {
    match config::data_source() {
        DataSource::Memory => {
            let snapshot = match config::fixture_path() {
                Some(path) => Snapshot::load(&path)?,
                None => Snapshot::seed()?,
            };
            let repo = MemoryRepository::new(snapshot);
            info!(
                posts = repo.snapshot().posts.len(),
                users = repo.snapshot().users.len(),
                "serving in-memory fixture"
            );
            Ok(Arc::new(repo))
        }
        DataSource::Remote => {
            let timeout = config::request_timeout();
            let repo = RemoteRepository::new(config::remote_base_url(), timeout)
                .context("failed to build HTTP client")?;
            info!(base_url = repo.base_url(), ?timeout, "serving remote source");
            Ok(Arc::new(repo))
        }
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "feedline=info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let feed = Feed::new(build_repository()?).with_comment_count_policy(config::comment_count_policy());
    info!(policy = ?feed.comment_count_policy(), "comment count policy");
    let state = web::Data::new(AppState::new(feed));

    let addr = config::bind_addr();
    info!("Server listening on http://{}", addr);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .configure(handlers::configure)
    })
    .bind(&addr)
    .with_context(|| format!("failed to bind {}", addr))?
    .run()
    .await?;

    Ok(())
}
