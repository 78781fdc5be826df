//! The capture surface: camera capability trait, devices, and the service
//! that owns the live stream for the application's lifetime.
//!
//! Devices implement the small [`FrameSource`] capability instead of a
//! monolithic camera trait:
//!
//! - [`MockCamera`] streams a synthetic animated pattern and is always
//!   present, so the application runs without hardware.
//! - `WebcamSource` (behind the `webcam` feature) binds a real device.
//!
//! [`CameraService`] is the single owner of the bound device. Acquisition is
//! awaited once at startup; any failure (absent capability, device error,
//! permission problem) is logged and degrades the service to an
//! *unavailable* state instead of propagating. Teardown releases the device
//! exactly once, on every path, including after a failed acquisition.

mod frame;
mod mock;
mod pattern;
#[cfg(feature = "webcam")]
mod webcam;

pub use frame::{EncodedStill, Frame};
pub use mock::MockCamera;
#[cfg(feature = "webcam")]
pub use webcam::WebcamSource;

use crate::error::AppResult;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Capability: video frame production.
///
/// # Contract
/// - `start_stream` binds the device and begins producing frames; calling it
///   on an already-streaming device is an error.
/// - A failed `start_stream` must leave the device fully released; callers
///   will not issue a compensating `stop_stream`.
/// - `stop_stream` releases the device; repeated calls are tolerated.
/// - `subscribe_frames` may be called any time; frames arrive only while
///   streaming.
#[async_trait]
pub trait FrameSource: Send + Sync {
    /// Begin streaming frames.
    async fn start_stream(&self) -> Result<()>;

    /// Stop streaming and release the underlying device.
    async fn stop_stream(&self) -> Result<()>;

    /// Native resolution of produced frames.
    fn resolution(&self) -> (u32, u32);

    /// Whether the device is currently streaming.
    fn is_streaming(&self) -> bool;

    /// Subscribe to the live frame stream.
    fn subscribe_frames(&self) -> broadcast::Receiver<Arc<Frame>>;
}

/// Owns a bound [`FrameSource`] for the lifetime of the capture surface.
///
/// The service mirrors the user-visible states of the capture surface:
/// available (streaming, preview frames flowing) or unavailable (fallback
/// message in the UI). It never exposes acquisition errors to its caller.
pub struct CameraService {
    source: Option<Arc<dyn FrameSource>>,
    frames: Option<broadcast::Receiver<Arc<Frame>>>,
    latest: Option<Arc<Frame>>,
    released: Arc<AtomicBool>,
}

impl CameraService {
    /// Bind the given device and start its stream, awaited once.
    ///
    /// `None` means the capability is absent entirely (e.g. the `webcam`
    /// feature is compiled out); the service starts unavailable. A device
    /// that fails to start is logged and likewise yields an unavailable
    /// service; no error escapes.
    pub async fn connect(source: Option<Arc<dyn FrameSource>>) -> Self {
        let Some(source) = source else {
            warn!("no camera capability present; capture surface unavailable");
            return Self::unavailable();
        };

        match source.start_stream().await {
            Ok(()) => {
                let (width, height) = source.resolution();
                info!(width, height, "camera stream started");
                let frames = source.subscribe_frames();
                Self {
                    source: Some(source),
                    frames: Some(frames),
                    latest: None,
                    released: Arc::new(AtomicBool::new(false)),
                }
            }
            Err(err) => {
                warn!("camera acquisition failed: {err:#}");
                Self::unavailable()
            }
        }
    }

    /// A service with no bound device; `capture` is a permanent no-op.
    pub fn unavailable() -> Self {
        Self {
            source: None,
            frames: None,
            latest: None,
            // Nothing was acquired, so there is nothing left to release.
            released: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Whether a live preview is flowing.
    pub fn available(&self) -> bool {
        self.source.is_some()
    }

    /// Drain the frame channel and return the newest frame, if any arrived.
    pub fn poll_frame(&mut self) -> Option<Arc<Frame>> {
        let rx = self.frames.as_mut()?;
        let mut newest = None;
        loop {
            match rx.try_recv() {
                Ok(frame) => newest = Some(frame),
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    debug!(skipped, "preview lagged behind the camera stream");
                }
                Err(_) => break,
            }
        }
        if let Some(frame) = newest {
            self.latest = Some(frame.clone());
            return Some(frame);
        }
        None
    }

    /// The most recent frame seen by `poll_frame`.
    pub fn latest_frame(&self) -> Option<&Arc<Frame>> {
        self.latest.as_ref()
    }

    /// Rasterize the current visible frame into an encoded still.
    ///
    /// Returns `Ok(None)` while the stream is not ready (unavailable camera,
    /// or no frame received yet) — capturing too early is a no-op, not an
    /// error.
    pub fn capture(&self) -> AppResult<Option<EncodedStill>> {
        let Some(frame) = self.latest.as_ref() else {
            debug!("capture requested before a frame was available; ignoring");
            return Ok(None);
        };
        let still = EncodedStill::from_frame(frame)?;
        info!(
            width = still.width(),
            height = still.height(),
            bytes = still.as_bytes().len(),
            "captured still"
        );
        Ok(Some(still))
    }

    /// Stop the stream and release the device.
    ///
    /// Safe to call multiple times; only the first call stops the device.
    /// Also runs on drop, so every exit path releases the camera.
    pub fn release(&mut self) {
        if self.released.swap(true, Ordering::SeqCst) {
            return;
        }
        let Some(source) = self.source.take() else {
            return;
        };
        self.frames = None;

        // stop_stream is async; drop cannot await, so hand it to the
        // runtime. If the runtime is already gone the process is exiting
        // and the OS reclaims the device anyway.
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(err) = source.stop_stream().await {
                        warn!("failed to stop camera stream: {err:#}");
                    } else {
                        info!("camera stream stopped");
                    }
                });
            }
            Err(_) => warn!("no runtime available to stop camera stream"),
        }
    }
}

impl Drop for CameraService {
    fn drop(&mut self) {
        self.release();
    }
}
