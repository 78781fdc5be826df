//! Real webcam device via `nokhwa` (feature `webcam`).
//!
//! The platform camera handle is not thread-safe, so a dedicated thread owns
//! it for the whole streaming lifetime: open, read loop, stop, drop. The
//! thread exiting is what releases the OS device lock.

use super::{Frame, FrameSource};
use anyhow::{Context, Result};
use async_trait::async_trait;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};
use nokhwa::Camera;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, oneshot};
use tracing::{debug, warn};

const FRAME_CHANNEL_CAPACITY: usize = 8;

/// A physical camera bound by device index.
pub struct WebcamSource {
    index: u32,
    streaming: Arc<AtomicBool>,
    width: Arc<AtomicU32>,
    height: Arc<AtomicU32>,
    frame_tx: broadcast::Sender<Arc<Frame>>,
}

impl WebcamSource {
    /// Prepare a webcam source for the given device index. The device is not
    /// touched until `start_stream`.
    pub fn new(index: u32) -> Self {
        let (frame_tx, _) = broadcast::channel(FRAME_CHANNEL_CAPACITY);
        Self {
            index,
            streaming: Arc::new(AtomicBool::new(false)),
            width: Arc::new(AtomicU32::new(0)),
            height: Arc::new(AtomicU32::new(0)),
            frame_tx,
        }
    }
}

#[async_trait]
impl FrameSource for WebcamSource {
    async fn start_stream(&self) -> Result<()> {
        if self.streaming.swap(true, Ordering::SeqCst) {
            anyhow::bail!("WebcamSource: already streaming");
        }

        let (ready_tx, ready_rx) = oneshot::channel::<Result<()>>();
        let streaming = self.streaming.clone();
        let width = self.width.clone();
        let height = self.height.clone();
        let tx = self.frame_tx.clone();
        let index = self.index;

        std::thread::Builder::new()
            .name("webcam-stream".to_string())
            .spawn(move || {
                let requested = RequestedFormat::new::<RgbFormat>(
                    RequestedFormatType::AbsoluteHighestFrameRate,
                );
                let opened = Camera::new(CameraIndex::Index(index), requested)
                    .and_then(|mut camera| camera.open_stream().map(|()| camera));

                let mut camera = match opened {
                    Ok(camera) => {
                        width.store(camera.resolution().width(), Ordering::SeqCst);
                        height.store(camera.resolution().height(), Ordering::SeqCst);
                        let _ = ready_tx.send(Ok(()));
                        camera
                    }
                    Err(err) => {
                        streaming.store(false, Ordering::SeqCst);
                        let _ = ready_tx.send(Err(anyhow::Error::new(err)
                            .context(format!("failed to open webcam {index}"))));
                        return;
                    }
                };

                while streaming.load(Ordering::SeqCst) {
                    match camera
                        .frame()
                        .and_then(|buffer| buffer.decode_image::<RgbFormat>())
                    {
                        Ok(decoded) => {
                            let frame = Frame::from_rgb8(
                                decoded.width(),
                                decoded.height(),
                                decoded.into_raw(),
                            );
                            let _ = tx.send(Arc::new(frame));
                        }
                        Err(err) => {
                            warn!("webcam frame read failed: {err}");
                        }
                    }
                }

                if let Err(err) = camera.stop_stream() {
                    warn!("webcam stop failed: {err}");
                }
                debug!("webcam thread exited, device released");
            })
            .context("failed to spawn webcam thread")?;

        // Await the single acquisition outcome; a failed open leaves the
        // device fully released by the thread above.
        match ready_rx.await {
            Ok(result) => result,
            Err(_) => {
                self.streaming.store(false, Ordering::SeqCst);
                anyhow::bail!("webcam thread terminated before reporting readiness")
            }
        }
    }

    async fn stop_stream(&self) -> Result<()> {
        // The read loop observes the flag and releases the device itself.
        self.streaming.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn resolution(&self) -> (u32, u32) {
        (
            self.width.load(Ordering::SeqCst),
            self.height.load(Ordering::SeqCst),
        )
    }

    fn is_streaming(&self) -> bool {
        self.streaming.load(Ordering::SeqCst)
    }

    fn subscribe_frames(&self) -> broadcast::Receiver<Arc<Frame>> {
        self.frame_tx.subscribe()
    }
}
