//! Mock camera device.
//!
//! Streams the synthetic preview pattern so the application is fully usable
//! without a physical camera. The stream runs on a background task and
//! honors the same start/stop contract as a real device.

use super::pattern::generate_preview_pattern;
use super::{Frame, FrameSource};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};
use tokio::time::{sleep, Duration};
use tracing::debug;

/// Capacity of the frame broadcast channel; the preview only ever wants the
/// newest frame, so lagging receivers are fine.
const FRAME_CHANNEL_CAPACITY: usize = 8;

/// Simulated camera producing animated test-pattern frames.
///
/// # Example
///
/// ```rust,ignore
/// let camera = MockCamera::new(640, 480, 15.0);
/// camera.start_stream().await?;
/// let mut frames = camera.subscribe_frames();
/// ```
pub struct MockCamera {
    resolution: (u32, u32),
    fps: f64,
    frame_count: Arc<AtomicU64>,
    streaming: Arc<AtomicBool>,
    stop_calls: AtomicU64,
    frame_tx: broadcast::Sender<Arc<Frame>>,
    streaming_task: Mutex<Option<tokio::task::JoinHandle<()>>>,
}

impl MockCamera {
    /// Create a mock camera with the given resolution and frame rate.
    pub fn new(width: u32, height: u32, fps: f64) -> Self {
        let (frame_tx, _) = broadcast::channel(FRAME_CHANNEL_CAPACITY);
        Self {
            resolution: (width, height),
            fps: fps.max(1.0),
            frame_count: Arc::new(AtomicU64::new(0)),
            streaming: Arc::new(AtomicBool::new(false)),
            stop_calls: AtomicU64::new(0),
            frame_tx,
            streaming_task: Mutex::new(None),
        }
    }

    /// Total number of frames produced since creation.
    pub fn frame_count(&self) -> u64 {
        self.frame_count.load(Ordering::SeqCst)
    }

    /// How many times the device has actually been stopped.
    pub fn stop_calls(&self) -> u64 {
        self.stop_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FrameSource for MockCamera {
    async fn start_stream(&self) -> Result<()> {
        if self.streaming.swap(true, Ordering::SeqCst) {
            anyhow::bail!("MockCamera: already streaming");
        }

        let streaming = self.streaming.clone();
        let frame_count = self.frame_count.clone();
        let tx = self.frame_tx.clone();
        let (width, height) = self.resolution;
        let frame_delay = Duration::from_secs_f64(1.0 / self.fps);

        let handle = tokio::spawn(async move {
            while streaming.load(Ordering::SeqCst) {
                let frame_num = frame_count.fetch_add(1, Ordering::SeqCst) + 1;
                let pixels = generate_preview_pattern(width, height, frame_num);
                let frame = Arc::new(Frame::from_rgb8(width, height, pixels));
                // No receivers is not an error; frames are simply dropped.
                let _ = tx.send(frame);
                sleep(frame_delay).await;
            }
            debug!("MockCamera: streaming task exited");
        });

        *self.streaming_task.lock().await = Some(handle);
        debug!("MockCamera: stream started");
        Ok(())
    }

    async fn stop_stream(&self) -> Result<()> {
        let was_streaming = self.streaming.swap(false, Ordering::SeqCst);
        if let Some(handle) = self.streaming_task.lock().await.take() {
            handle.abort();
        }
        if was_streaming {
            self.stop_calls.fetch_add(1, Ordering::SeqCst);
            debug!("MockCamera: stream stopped");
        } else {
            debug!("MockCamera: stream already stopped");
        }
        Ok(())
    }

    fn resolution(&self) -> (u32, u32) {
        self.resolution
    }

    fn is_streaming(&self) -> bool {
        self.streaming.load(Ordering::SeqCst)
    }

    fn subscribe_frames(&self) -> broadcast::Receiver<Arc<Frame>> {
        self.frame_tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn streaming_produces_frames_at_native_resolution() {
        let camera = MockCamera::new(48, 32, 120.0);
        let mut frames = camera.subscribe_frames();

        camera.start_stream().await.expect("start");
        let frame = tokio::time::timeout(Duration::from_secs(1), frames.recv())
            .await
            .expect("frame within deadline")
            .expect("channel open");
        assert_eq!((frame.width, frame.height), (48, 32));
        assert_eq!(frame.pixels.len(), 48 * 32 * 3);

        camera.stop_stream().await.expect("stop");
        assert!(!camera.is_streaming());
    }

    #[tokio::test]
    async fn double_start_is_an_error() {
        let camera = MockCamera::new(32, 32, 60.0);
        camera.start_stream().await.expect("first start");
        assert!(camera.start_stream().await.is_err());
        camera.stop_stream().await.expect("stop");
    }

    #[tokio::test]
    async fn stop_is_idempotent() {
        let camera = MockCamera::new(32, 32, 60.0);
        camera.start_stream().await.expect("start");
        camera.stop_stream().await.expect("stop");
        camera.stop_stream().await.expect("repeated stop");
        assert_eq!(camera.stop_calls(), 1);
    }

    #[tokio::test]
    async fn frame_counter_advances_while_streaming() {
        let camera = MockCamera::new(32, 32, 240.0);
        camera.start_stream().await.expect("start");
        sleep(Duration::from_millis(100)).await;
        camera.stop_stream().await.expect("stop");
        assert!(camera.frame_count() > 0);
    }
}
