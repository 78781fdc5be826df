//! The eframe/egui implementation for the GUI.
//!
//! All mutable application state lives on [`Gui`] and is only touched inside
//! `update`, on the UI thread. Background work (the camera stream, one-shot
//! recognition calls) reaches the UI exclusively through channels drained at
//! the top of each frame.

use crate::camera::{CameraService, EncodedStill};
use crate::diary::{self, Candidate, MealLog};
use crate::recognize::DishRecognizer;
use anyhow::Result;
use eframe::egui::{self, TextureOptions};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

mod capture_panel;
mod estimate_panel;
mod log_panel;

/// How long the invalid-recompute notice stays on screen.
const NOTICE_TTL: Duration = Duration::from_secs(4);

/// Bridges one-shot recognition tasks back onto the UI thread.
///
/// `dispatch` spawns the call on the runtime and the task always sends its
/// outcome, success or failure, so draining clears the in-flight flag on
/// every path. A failed recognition must never leave the capture button
/// stuck disabled.
struct RecognitionBridge {
    in_flight: bool,
    tx: mpsc::UnboundedSender<Result<Candidate>>,
    rx: mpsc::UnboundedReceiver<Result<Candidate>>,
}

impl RecognitionBridge {
    fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            in_flight: false,
            tx,
            rx,
        }
    }

    fn in_flight(&self) -> bool {
        self.in_flight
    }

    fn dispatch(&mut self, recognizer: Arc<dyn DishRecognizer>, still: EncodedStill) {
        self.in_flight = true;
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(recognizer.recognize(&still).await);
        });
    }

    /// Drain completed recognitions; returns the newest successful
    /// candidate. Failures are logged and only clear the in-flight flag.
    fn poll(&mut self) -> Option<Candidate> {
        let mut latest = None;
        while let Ok(result) = self.rx.try_recv() {
            self.in_flight = false;
            match result {
                Ok(candidate) => latest = Some(candidate),
                Err(err) => error!("recognition failed: {err:#}"),
            }
        }
        latest
    }
}

/// The main GUI struct.
pub struct Gui {
    camera: CameraService,
    recognizer: Arc<dyn DishRecognizer>,

    // Capture surface state
    preview_texture: Option<egui::TextureHandle>,
    last_still: Option<EncodedStill>,
    recognition: RecognitionBridge,

    // Estimation panel state
    candidate: Option<Candidate>,
    edit_name: String,
    edit_weight: String,
    edit_per100: String,
    recompute_notice: Option<String>,
    notice_since: Option<Instant>,

    // Log panel state
    log: MealLog,
    confirm_clear: bool,
}

impl Gui {
    /// Creates a new GUI around an already-connected camera service.
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        camera: CameraService,
        recognizer: Arc<dyn DishRecognizer>,
    ) -> Self {
        Self {
            camera,
            recognizer,
            preview_texture: None,
            last_still: None,
            recognition: RecognitionBridge::new(),
            candidate: None,
            edit_name: String::new(),
            edit_weight: String::new(),
            edit_per100: String::new(),
            recompute_notice: None,
            notice_since: None,
            log: MealLog::new(),
            confirm_clear: false,
        }
    }

    /// Pump frames and recognition results into UI state.
    fn update_state(&mut self, ctx: &egui::Context) {
        if let Some(frame) = self.camera.poll_frame() {
            let image = frame.to_color_image();
            match &mut self.preview_texture {
                Some(texture) => texture.set(image, TextureOptions::LINEAR),
                None => {
                    self.preview_texture =
                        Some(ctx.load_texture("camera_preview", image, TextureOptions::LINEAR));
                }
            }
        }

        if let Some(candidate) = self.recognition.poll() {
            self.set_candidate(candidate);
        }

        if let Some(since) = self.notice_since {
            if since.elapsed() > NOTICE_TTL {
                self.recompute_notice = None;
                self.notice_since = None;
            }
        }
    }

    /// Replace the current candidate wholesale and refresh the edit fields.
    fn set_candidate(&mut self, candidate: Candidate) {
        self.edit_name = candidate.name.clone();
        self.edit_weight = format_grams(candidate.weight_grams);
        self.edit_per100 = candidate.per_100g().to_string();
        self.candidate = Some(candidate);
    }

    /// Capture the current frame and dispatch it to the recognizer.
    ///
    /// A capture before the stream is ready is silently ignored.
    fn trigger_capture(&mut self) {
        match self.camera.capture() {
            Ok(Some(still)) => {
                self.last_still = Some(still.clone());
                self.recognition.dispatch(self.recognizer.clone(), still);
            }
            Ok(None) => debug!("capture ignored; camera stream not ready"),
            Err(err) => error!("failed to encode still: {err}"),
        }
    }

    /// Apply user edits through the recompute formula.
    ///
    /// Invalid input keeps the previous candidate and raises a transient
    /// notice instead of failing silently.
    fn apply_recompute(&mut self) {
        match diary::recompute(&self.edit_name, &self.edit_weight, &self.edit_per100) {
            Some(candidate) => {
                self.recompute_notice = None;
                self.notice_since = None;
                self.set_candidate(candidate);
            }
            None => {
                self.recompute_notice =
                    Some("Weight and kcal/100 g must be positive numbers".to_string());
                self.notice_since = Some(Instant::now());
            }
        }
    }

    /// Commit the current candidate to the meal log.
    fn add_current_to_log(&mut self) {
        if let Some(candidate) = &self.candidate {
            let entry = self.log.add(candidate);
            let (name, calories) = (entry.name.clone(), entry.calories);
            info!(
                dish = %name,
                calories = calories,
                total = self.log.total_calories(),
                "added entry to meal log"
            );
        }
    }
}

impl eframe::App for Gui {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state(ctx);

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Calocam — photo calorie diary");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("Today: {} kcal", self.log.total_calories()));
                });
            });
        });

        egui::SidePanel::right("log_panel")
            .resizable(true)
            .min_width(260.0)
            .show(ctx, |ui| {
                log_panel::render(ui, self);
            });

        egui::SidePanel::left("capture_panel")
            .resizable(true)
            .min_width(340.0)
            .show(ctx, |ui| {
                capture_panel::render(ui, self);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            estimate_panel::render(ui, self);
        });

        // Keep the preview live even without input events.
        ctx.request_repaint();
    }
}

fn format_grams(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Frame;
    use crate::recognize::MockRecognizer;

    #[test]
    fn grams_formatting_drops_trailing_zero() {
        assert_eq!(format_grams(250.0), "250");
        assert_eq!(format_grams(182.5), "182.5");
    }

    struct FailingRecognizer;

    #[async_trait::async_trait]
    impl DishRecognizer for FailingRecognizer {
        async fn recognize(&self, _still: &EncodedStill) -> Result<Candidate> {
            anyhow::bail!("recognition backend unreachable")
        }
    }

    fn test_still() -> EncodedStill {
        let frame = Frame::from_rgb8(8, 8, vec![90; 8 * 8 * 3]);
        EncodedStill::from_frame(&frame).expect("encode")
    }

    async fn drain(bridge: &mut RecognitionBridge) -> Option<Candidate> {
        for _ in 0..100 {
            let candidate = bridge.poll();
            if !bridge.in_flight() {
                return candidate;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("recognition never completed");
    }

    #[tokio::test]
    async fn failed_recognition_clears_the_in_flight_flag() {
        let mut bridge = RecognitionBridge::new();
        bridge.dispatch(Arc::new(FailingRecognizer), test_still());
        assert!(bridge.in_flight());

        let candidate = drain(&mut bridge).await;
        assert!(candidate.is_none());
        // The capture button is gated on this flag; a failure must not
        // leave it stuck.
        assert!(!bridge.in_flight());
    }

    #[tokio::test]
    async fn successful_recognition_delivers_a_candidate() {
        let mut bridge = RecognitionBridge::new();
        bridge.dispatch(Arc::new(MockRecognizer::seeded(3)), test_still());

        let candidate = drain(&mut bridge).await.expect("candidate");
        assert!(candidate.weight_grams > 0.0);
        assert!(!bridge.in_flight());
    }

    #[tokio::test]
    async fn failure_then_success_recovers() {
        let mut bridge = RecognitionBridge::new();
        bridge.dispatch(Arc::new(FailingRecognizer), test_still());
        assert!(drain(&mut bridge).await.is_none());

        bridge.dispatch(Arc::new(MockRecognizer::seeded(9)), test_still());
        assert!(bridge.in_flight());
        assert!(drain(&mut bridge).await.is_some());
    }
}
