//! Dish recognition boundary.
//!
//! The application never cares which recognizer is active: the GUI hands a
//! captured still to a `dyn DishRecognizer` and receives a [`Candidate`].
//! Today the only implementation is [`MockRecognizer`]; a future
//! network-backed recognizer slots in behind the same trait with no
//! structural change anywhere else.

mod catalog;
mod mock;

pub use catalog::{CatalogEntry, SAMPLE_DISHES};
pub use mock::MockRecognizer;

use crate::camera::EncodedStill;
use crate::diary::Candidate;
use anyhow::Result;
use async_trait::async_trait;

/// Capability: turn a captured still into a candidate dish estimate.
///
/// # Contract
/// - The returned candidate always has `weight_grams > 0`; calories may be
///   zero but never negative (the type enforces it).
/// - Implementations must be safe to call repeatedly; no internal state
///   leaks between calls beyond RNG/session handles.
#[async_trait]
pub trait DishRecognizer: Send + Sync {
    /// Estimate the dish shown in `still`.
    async fn recognize(&self, still: &EncodedStill) -> Result<Candidate>;
}
