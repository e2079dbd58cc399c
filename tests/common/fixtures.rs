//! Fakes for the detection collaborators.

use std::collections::HashMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use candle_core::Device;
use image::{ImageFormat, RgbImage};
use parking_lot::Mutex;
use tokio::sync::Barrier;

use sigdetect::{
    AcquireError, AcquireResult, Detections, EngineError, EngineHandle, ImageAcquirer,
    ModelInput, ModelLoader, NotifyError, Reporter, SignatureModel, TargetRef,
};

pub const SENTINEL: f32 = 0.9;
pub const MAX_PIXELS: u64 = 10_000_000;

/// Encodes a blank image. Width doubles as the image's identity for [`WidthLoader`].
pub fn encode_image(width: u32, format: ImageFormat) -> Vec<u8> {
    let mut bytes = Vec::new();
    RgbImage::from_pixel(width, 12, image::Rgb([240, 240, 240]))
        .write_to(&mut Cursor::new(&mut bytes), format)
        .unwrap();
    bytes
}

#[derive(Default)]
pub struct MemoryAcquirer {
    objects: HashMap<String, Vec<u8>>,
    requests: Mutex<Vec<String>>,
}

impl MemoryAcquirer {
    pub fn with(mut self, key: &str, bytes: Vec<u8>) -> Self {
        self.objects.insert(key.to_string(), bytes);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl ImageAcquirer for MemoryAcquirer {
    async fn acquire(&self, target: &TargetRef, scratch_dir: &Path) -> AcquireResult<PathBuf> {
        self.requests.lock().push(target.key().to_string());
        let bytes = self
            .objects
            .get(target.key())
            .ok_or_else(|| AcquireError::NotFound {
                key: target.key().to_string(),
            })?;

        let dest = target.local_path(scratch_dir);
        tokio::fs::create_dir_all(scratch_dir)
            .await
            .map_err(|source| AcquireError::Io {
                path: scratch_dir.to_path_buf(),
                source,
            })?;
        tokio::fs::write(&dest, bytes)
            .await
            .map_err(|source| AcquireError::Io {
                path: dest.clone(),
                source,
            })?;
        Ok(dest)
    }
}

/// Holds every acquisition until `parties` of them have written their file,
/// so concurrent batches overlap on the scratch area.
pub struct GatedAcquirer {
    inner: MemoryAcquirer,
    barrier: Barrier,
}

impl GatedAcquirer {
    pub fn new(inner: MemoryAcquirer, parties: usize) -> Self {
        Self {
            inner,
            barrier: Barrier::new(parties),
        }
    }
}

#[async_trait]
impl ImageAcquirer for GatedAcquirer {
    async fn acquire(&self, target: &TargetRef, scratch_dir: &Path) -> AcquireResult<PathBuf> {
        let path = self.inner.acquire(target, scratch_dir).await?;
        self.barrier.wait().await;
        Ok(path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentReport {
    pub channel: String,
    pub subject: String,
    pub message: String,
}

#[derive(Default)]
pub struct RecordingReporter {
    sent: Mutex<Vec<SentReport>>,
}

impl RecordingReporter {
    pub fn sent(&self) -> Vec<SentReport> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl Reporter for RecordingReporter {
    async fn send(&self, channel: &str, subject: &str, message: &str) -> Result<(), NotifyError> {
        self.sent.lock().push(SentReport {
            channel: channel.to_string(),
            subject: subject.to_string(),
            message: message.to_string(),
        });
        Ok(())
    }
}

/// Model whose proposals depend on the input width; counts inference calls.
pub struct WidthModel {
    scores: HashMap<u32, Vec<f32>>,
    calls: Arc<AtomicUsize>,
    device: Device,
}

impl SignatureModel for WidthModel {
    fn detect(&self, input: &ModelInput) -> Result<Detections, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let scores = self.scores.get(&input.width()).cloned().unwrap_or_default();
        Ok(Detections::from_scores(scores))
    }

    fn device(&self) -> &Device {
        &self.device
    }
}

#[derive(Default)]
pub struct WidthLoader {
    scores: HashMap<u32, Vec<f32>>,
    loads: AtomicUsize,
    inferences: Arc<AtomicUsize>,
}

impl WidthLoader {
    pub fn scoring(mut self, width: u32, scores: &[f32]) -> Self {
        self.scores.insert(width, scores.to_vec());
        self
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn inferences(&self) -> usize {
        self.inferences.load(Ordering::SeqCst)
    }
}

impl ModelLoader for WidthLoader {
    fn load(&self) -> Result<Box<dyn SignatureModel>, EngineError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(WidthModel {
            scores: self.scores.clone(),
            calls: self.inferences.clone(),
            device: Device::Cpu,
        }))
    }
}

pub fn engine(loader: &Arc<WidthLoader>) -> Arc<EngineHandle> {
    Arc::new(EngineHandle::new(loader.clone(), SENTINEL, MAX_PIXELS))
}
