use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use transcription_api::application::ports::{MediaFetchError, MediaFetcher};
use transcription_api::infrastructure::media::HttpMediaFetcher;

async fn start_media_server() -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let app = Router::new()
        .route("/clip.wav", get(|| async { vec![7u8; 64] }))
        .route("/big.wav", get(|| async { vec![0u8; 4096] }))
        .route("/missing.wav", get(|| async { StatusCode::NOT_FOUND }));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (format!("http://{}", addr), shutdown_tx)
}

fn fetcher(max_bytes: u64) -> HttpMediaFetcher {
    HttpMediaFetcher::new(Duration::from_secs(5), max_bytes).unwrap()
}

#[tokio::test]
async fn given_reachable_media_when_fetching_then_returns_bytes() {
    let (base_url, shutdown_tx) = start_media_server().await;

    let bytes = fetcher(1024)
        .fetch(&format!("{}/clip.wav", base_url))
        .await
        .unwrap();

    assert_eq!(bytes, vec![7u8; 64]);
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_media_over_limit_when_fetching_then_too_large() {
    let (base_url, shutdown_tx) = start_media_server().await;

    let result = fetcher(1024)
        .fetch(&format!("{}/big.wav", base_url))
        .await;

    assert!(matches!(
        result,
        Err(MediaFetchError::TooLarge { limit_bytes: 1024 })
    ));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_missing_media_when_fetching_then_unexpected_status() {
    let (base_url, shutdown_tx) = start_media_server().await;

    let result = fetcher(1024)
        .fetch(&format!("{}/missing.wav", base_url))
        .await;

    assert!(matches!(
        result,
        Err(MediaFetchError::UnexpectedStatus { status: 404, .. })
    ));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_non_http_scheme_when_fetching_then_invalid_url() {
    let result = fetcher(1024).fetch("file:///etc/passwd").await;
    assert!(matches!(result, Err(MediaFetchError::InvalidUrl(_))));
}

#[tokio::test]
async fn given_unparseable_url_when_fetching_then_invalid_url() {
    let result = fetcher(1024).fetch("not a url").await;
    assert!(matches!(result, Err(MediaFetchError::InvalidUrl(_))));
}
