//! Mock dish recognizer.
//!
//! Stands in for a future recognition backend by picking a catalog entry
//! uniformly at random. The result is structured exactly like a real
//! recognition result, so downstream code never special-cases mock vs. real.

use super::catalog::SAMPLE_DISHES;
use super::DishRecognizer;
use crate::camera::EncodedStill;
use crate::diary::Candidate;
use anyhow::Result;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;
use tracing::info;

/// Uniform random selection from the fixed catalog.
pub struct MockRecognizer {
    rng: Mutex<StdRng>,
}

impl MockRecognizer {
    /// Recognizer with OS-sourced randomness.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Recognizer with a fixed seed, for reproducible runs and tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for MockRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DishRecognizer for MockRecognizer {
    async fn recognize(&self, still: &EncodedStill) -> Result<Candidate> {
        let pick = {
            let mut rng = self
                .rng
                .lock()
                .map_err(|_| anyhow::anyhow!("recognizer RNG poisoned"))?;
            rng.gen_range(0..SAMPLE_DISHES.len())
        };
        let sample = &SAMPLE_DISHES[pick];
        info!(
            dish = sample.name,
            weight_grams = sample.weight_grams,
            calories = sample.calories,
            still_bytes = still.as_bytes().len(),
            "mock recognition result"
        );
        Ok(Candidate::new(
            sample.name,
            sample.weight_grams,
            sample.calories,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Frame;

    fn test_still() -> EncodedStill {
        let frame = Frame::from_rgb8(8, 8, vec![128; 8 * 8 * 3]);
        EncodedStill::from_frame(&frame).expect("encode")
    }

    #[tokio::test]
    async fn results_come_only_from_the_catalog() {
        let recognizer = MockRecognizer::seeded(42);
        let still = test_still();
        for _ in 0..32 {
            let candidate = recognizer.recognize(&still).await.expect("recognize");
            assert!(candidate.weight_grams > 0.0);
            let in_catalog = SAMPLE_DISHES.iter().any(|s| {
                s.name == candidate.name
                    && s.weight_grams == candidate.weight_grams
                    && s.calories == candidate.calories
            });
            assert!(in_catalog, "unexpected candidate {:?}", candidate);
        }
    }

    #[tokio::test]
    async fn seeded_recognizer_is_deterministic() {
        let still = test_still();
        let a = MockRecognizer::seeded(7);
        let b = MockRecognizer::seeded(7);
        for _ in 0..8 {
            let left = a.recognize(&still).await.expect("recognize");
            let right = b.recognize(&still).await.expect("recognize");
            assert_eq!(left, right);
        }
    }

    #[tokio::test]
    async fn per_100g_rate_matches_catalog_math() {
        let recognizer = MockRecognizer::seeded(1);
        let candidate = recognizer
            .recognize(&test_still())
            .await
            .expect("recognize");
        let expected =
            (candidate.calories as f64 / candidate.weight_grams * 100.0).round() as u32;
        assert_eq!(candidate.per_100g(), expected);
    }
}
