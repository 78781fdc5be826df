//! Fixed sample catalog backing the mock recognizer.

/// One recognizable dish with its typical serving weight and calories.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub weight_grams: f64,
    pub calories: u32,
}

/// The dishes the mock recognizer can "see".
pub const SAMPLE_DISHES: &[CatalogEntry] = &[
    CatalogEntry {
        name: "Пицца",
        weight_grams: 250.0,
        calories: 700,
    },
    CatalogEntry {
        name: "Борщ со сметаной",
        weight_grams: 300.0,
        calories: 320,
    },
    CatalogEntry {
        name: "Суши (ролл)",
        weight_grams: 180.0,
        calories: 360,
    },
    CatalogEntry {
        name: "Гречка с курицей",
        weight_grams: 220.0,
        calories: 410,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_entries_are_well_formed() {
        assert!(!SAMPLE_DISHES.is_empty());
        for entry in SAMPLE_DISHES {
            assert!(entry.weight_grams > 0.0, "{} has no weight", entry.name);
            assert!(!entry.name.trim().is_empty());
        }
    }
}
