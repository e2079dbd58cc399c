//! Test server harness: the real router over a local storage root and the stub model.

use std::net::SocketAddr;
use std::sync::Arc;

use image::{ImageFormat, RgbImage};
use sigdetect::config::{Config, StorageProvider};
use sigdetect::detection::BatchOrchestrator;
use sigdetect::gateway::{HandlerState, create_router_with_state};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

pub struct TestServer {
    pub addr: SocketAddr,
    storage_root: TempDir,
    _scratch: TempDir,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Writes a blank image into the storage root under `key`.
    pub fn put_image(&self, key: &str, format: ImageFormat) {
        let path = self.storage_root.path().join(key);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        RgbImage::from_pixel(30, 20, image::Rgb([255, 255, 255]))
            .save_with_format(&path, format)
            .unwrap();
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Spawns the server on an ephemeral port.
pub async fn spawn_test_server() -> std::io::Result<TestServer> {
    let storage_root = TempDir::new()?;
    let scratch = TempDir::new()?;

    let config = Config {
        storage_provider: StorageProvider::Local,
        local_root: storage_root.path().to_path_buf(),
        scratch_dir: scratch.path().to_path_buf(),
        stub_model: true,
        ..Config::default()
    };
    let orchestrator = Arc::new(BatchOrchestrator::from_config(&config));
    let app = create_router_with_state(HandlerState::new(orchestrator));

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let server_handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await;
    });

    Ok(TestServer {
        addr,
        storage_root,
        _scratch: scratch,
        _server_handle: server_handle,
        shutdown_tx: Some(shutdown_tx),
    })
}
