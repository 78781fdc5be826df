//! The dish-estimation and meal-log state model.
//!
//! A [`Candidate`] is the currently proposed (and user-correctable)
//! recognition result; the [`MealLog`] is the append-only, newest-first list
//! of committed entries for the current session. The daily total is always
//! derived from the log, never stored.

use chrono::{DateTime, Local};
use uuid::Uuid;

/// Fallback dish name when the user clears the name field.
pub const DEFAULT_DISH_NAME: &str = "Блюдо";

/// The current candidate dish: editable before being committed to the log.
///
/// Replaced wholesale on every recognition or recompute; never mutated in
/// place.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub name: String,
    /// Always positive.
    pub weight_grams: f64,
    /// Whole kilocalories, rounded at computation time.
    pub calories: u32,
}

impl Candidate {
    pub fn new(name: impl Into<String>, weight_grams: f64, calories: u32) -> Self {
        Self {
            name: name.into(),
            weight_grams,
            calories,
        }
    }

    /// Calorie density per 100 g, rounded to a whole number.
    ///
    /// Derived at the moment a candidate is produced; shown as an editable
    /// input that [`recompute`] consumes.
    pub fn per_100g(&self) -> u32 {
        (self.calories as f64 / self.weight_grams * 100.0).round() as u32
    }
}

/// Reapply the scaling formula to user-edited inputs.
///
/// Both `weight_input` and `per100_input` must parse as positive finite
/// numbers; otherwise the operation is a no-op (`None`) and the caller keeps
/// its previous candidate unchanged. On success,
/// `calories = round(weight * per100 / 100)`; an empty or whitespace-only
/// name falls back to [`DEFAULT_DISH_NAME`].
pub fn recompute(name: &str, weight_input: &str, per100_input: &str) -> Option<Candidate> {
    let weight = parse_positive(weight_input)?;
    let per100 = parse_positive(per100_input)?;

    let calories = (weight * per100 / 100.0).round() as u32;
    let name = name.trim();
    let name = if name.is_empty() {
        DEFAULT_DISH_NAME
    } else {
        name
    };
    Some(Candidate::new(name, weight, calories))
}

fn parse_positive(input: &str) -> Option<f64> {
    let value: f64 = input.trim().parse().ok()?;
    (value.is_finite() && value > 0.0).then_some(value)
}

/// A committed meal entry. Immutable once created.
#[derive(Debug, Clone)]
pub struct MealEntry {
    pub id: Uuid,
    pub name: String,
    pub weight_grams: f64,
    pub calories: u32,
    pub created_at: DateTime<Local>,
}

/// Append-only, newest-first log of committed dishes for the current day.
#[derive(Debug, Default)]
pub struct MealLog {
    entries: Vec<MealEntry>,
}

impl MealLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit a candidate: fresh id, current timestamp, prepended.
    ///
    /// No de-duplication and no merging; adding the same dish twice yields
    /// two entries.
    pub fn add(&mut self, candidate: &Candidate) -> &MealEntry {
        let entry = MealEntry {
            id: Uuid::new_v4(),
            name: candidate.name.clone(),
            weight_grams: candidate.weight_grams,
            calories: candidate.calories,
            created_at: Local::now(),
        };
        self.entries.insert(0, entry);
        &self.entries[0]
    }

    /// Unconditionally empty the log. Irreversible.
    pub fn clear_all(&mut self) {
        self.entries.clear();
    }

    /// Entries in newest-first order.
    pub fn entries(&self) -> &[MealEntry] {
        &self.entries
    }

    /// Derived daily total, recomputed on every call.
    pub fn total_calories(&self) -> u32 {
        self.entries.iter().map(|e| e.calories).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recompute_applies_scaling_formula() {
        let candidate = recompute("Пицца", "250", "280").expect("valid inputs");
        assert_eq!(candidate.name, "Пицца");
        assert_eq!(candidate.weight_grams, 250.0);
        assert_eq!(candidate.calories, 700);
    }

    #[test]
    fn recompute_rounds_to_whole_calories() {
        // 123 * 41 / 100 = 50.43 -> 50
        let candidate = recompute("x", "123", "41").expect("valid inputs");
        assert_eq!(candidate.calories, 50);
        // 150 * 33 / 100 = 49.5 -> 50 (round half away from zero)
        let candidate = recompute("x", "150", "33").expect("valid inputs");
        assert_eq!(candidate.calories, 50);
    }

    #[test]
    fn recompute_rejects_zero_and_garbage() {
        assert!(recompute("x", "0", "20").is_none());
        assert!(recompute("x", "-5", "20").is_none());
        assert!(recompute("x", "abc", "20").is_none());
        assert!(recompute("x", "", "20").is_none());
        assert!(recompute("x", "100", "0").is_none());
        assert!(recompute("x", "100", "NaN").is_none());
    }

    #[test]
    fn recompute_falls_back_to_default_name() {
        let candidate = recompute("", "100", "50").expect("valid inputs");
        assert_eq!(candidate.name, DEFAULT_DISH_NAME);
        let candidate = recompute("   ", "100", "50").expect("valid inputs");
        assert_eq!(candidate.name, DEFAULT_DISH_NAME);
    }

    #[test]
    fn per_100g_derivation() {
        let candidate = Candidate::new("Суши (ролл)", 180.0, 360);
        assert_eq!(candidate.per_100g(), 200);
        let candidate = Candidate::new("Гречка с курицей", 220.0, 410);
        // 410 / 220 * 100 = 186.36 -> 186
        assert_eq!(candidate.per_100g(), 186);
    }

    #[test]
    fn add_prepends_and_total_derives() {
        let mut log = MealLog::new();
        assert!(log.is_empty());
        assert_eq!(log.total_calories(), 0);

        log.add(&Candidate::new("Пицца", 250.0, 700));
        assert_eq!(log.len(), 1);
        assert_eq!(log.entries()[0].name, "Пицца");
        assert_eq!(log.total_calories(), 700);

        log.add(&Candidate::new("Суши (ролл)", 180.0, 360));
        assert_eq!(log.len(), 2);
        // Newest first.
        assert_eq!(log.entries()[0].name, "Суши (ролл)");
        assert_eq!(log.entries()[1].name, "Пицца");
        assert_eq!(log.total_calories(), 1060);
    }

    #[test]
    fn entries_get_unique_ids() {
        let mut log = MealLog::new();
        let candidate = Candidate::new("Пицца", 250.0, 700);
        let first = log.add(&candidate).id;
        let second = log.add(&candidate).id;
        assert_ne!(first, second);
    }

    #[test]
    fn clear_all_empties_the_log() {
        let mut log = MealLog::new();
        log.add(&Candidate::new("Борщ со сметаной", 300.0, 320));
        log.add(&Candidate::new("Пицца", 250.0, 700));
        log.clear_all();
        assert_eq!(log.len(), 0);
        assert_eq!(log.total_calories(), 0);
    }
}
