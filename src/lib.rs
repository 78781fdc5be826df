//! # Calocam Core Library
//!
//! This crate is the core library for the `calocam` application: a desktop
//! prototype of a photo-based food calorie diary. It points a camera at a
//! plate, captures a still, attaches a (currently mocked) calorie estimate,
//! lets the user correct it, and accumulates entries into a same-day meal
//! log with a running total.
//!
//! ## Crate Structure
//!
//! - **`camera`**: The capture surface. The `FrameSource` capability trait,
//!   the mock and (feature-gated) webcam devices, and `CameraService`, which
//!   owns the bound device and turns acquisition failures into a degraded
//!   "unavailable" state instead of errors.
//! - **`recognize`**: The `DishRecognizer` boundary and its mock
//!   implementation. A future network-backed recognizer replaces the mock
//!   behind the same trait with no structural change elsewhere.
//! - **`diary`**: The dish-estimation and meal-log state model: the current
//!   `Candidate`, the recompute formula, and the append-only `MealLog` with
//!   its derived daily total.
//! - **`gui`**: The native user interface using `eframe` and `egui`.
//! - **`config`**: Settings loaded from an optional TOML file.
//! - **`error`**: The `CalocamError` enum for centralized error handling.

pub mod camera;
pub mod config;
pub mod diary;
pub mod error;
pub mod gui;
pub mod recognize;
