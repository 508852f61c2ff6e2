//! LMS reference tables for childhood growth
//!
//! One table per metric and sex, keyed by age in years. Keys are sparse
//! (quarterly in the first year, half-yearly to age two, yearly after that)
//! and every table uses the same keys.

use crate::measurement::BiologicalSex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Box-Cox power (L), median (M) and coefficient of variation (S)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LmsParams {
    pub l: f64,
    pub m: f64,
    pub s: f64,
}

impl LmsParams {
    pub const fn new(l: f64, m: f64, s: f64) -> Self {
        Self { l, m, s }
    }
}

/// A single age band of a reference table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    pub age_years: f64,
    pub lms: LmsParams,
}

const fn band(age_years: f64, l: f64, m: f64, s: f64) -> ReferenceEntry {
    ReferenceEntry {
        age_years,
        lms: LmsParams::new(l, m, s),
    }
}

/// Growth metric with a reference table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrowthMetric {
    Height,
    Weight,
}

impl GrowthMetric {
    /// Unit the reference medians are expressed in
    pub fn reference_unit(&self) -> &'static str {
        match self {
            GrowthMetric::Height => "cm",
            GrowthMetric::Weight => "kg",
        }
    }
}

impl fmt::Display for GrowthMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrowthMetric::Height => write!(f, "height"),
            GrowthMetric::Weight => write!(f, "weight"),
        }
    }
}

impl std::str::FromStr for GrowthMetric {
    type Err = crate::errors::GrowthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "height" | "length" | "stature" => Ok(GrowthMetric::Height),
            "weight" => Ok(GrowthMetric::Weight),
            _ => Err(crate::errors::GrowthError::unknown("metric", s)),
        }
    }
}

// ============================================================================
// Reference Data
// ============================================================================

// Height in cm, weight in kg. Height is modelled as normally distributed (L = 1).

const MALE_HEIGHT: [ReferenceEntry; 14] = [
    band(0.25, 1.0, 61.4, 0.03640),
    band(0.5, 1.0, 67.6, 0.03530),
    band(0.75, 1.0, 72.0, 0.03470),
    band(1.0, 1.0, 75.7, 0.03490),
    band(1.5, 1.0, 82.3, 0.03560),
    band(2.0, 1.0, 87.1, 0.03640),
    band(3.0, 1.0, 96.1, 0.03780),
    band(4.0, 1.0, 103.3, 0.03810),
    band(5.0, 1.0, 109.9, 0.03848),
    band(6.0, 1.0, 116.0, 0.03910),
    band(7.0, 1.0, 121.7, 0.04040),
    band(8.0, 1.0, 127.3, 0.04140),
    band(9.0, 1.0, 132.6, 0.04230),
    band(10.0, 1.0, 137.8, 0.04330),
];

const FEMALE_HEIGHT: [ReferenceEntry; 14] = [
    band(0.25, 1.0, 59.8, 0.03640),
    band(0.5, 1.0, 65.7, 0.03620),
    band(0.75, 1.0, 70.1, 0.03610),
    band(1.0, 1.0, 74.0, 0.03650),
    band(1.5, 1.0, 80.7, 0.03710),
    band(2.0, 1.0, 85.7, 0.03775),
    band(3.0, 1.0, 95.1, 0.03900),
    band(4.0, 1.0, 102.7, 0.03990),
    band(5.0, 1.0, 109.4, 0.04080),
    band(6.0, 1.0, 115.1, 0.04180),
    band(7.0, 1.0, 120.8, 0.04280),
    band(8.0, 1.0, 126.6, 0.04370),
    band(9.0, 1.0, 132.5, 0.04450),
    band(10.0, 1.0, 138.6, 0.04520),
];

const MALE_WEIGHT: [ReferenceEntry; 14] = [
    band(0.25, 0.2303, 6.4, 0.11316),
    band(0.5, 0.1257, 7.9, 0.10958),
    band(0.75, 0.0478, 8.9, 0.10881),
    band(1.0, -0.0137, 9.6, 0.10925),
    band(1.5, -0.1109, 10.9, 0.11115),
    band(2.0, -0.1920, 12.2, 0.11341),
    band(3.0, -0.2727, 14.3, 0.11768),
    band(4.0, -0.3521, 16.3, 0.12223),
    band(5.0, -0.4374, 18.4, 0.12713),
    band(6.0, -0.5213, 20.5, 0.13276),
    band(7.0, -0.6052, 22.9, 0.13922),
    band(8.0, -0.6937, 25.4, 0.14657),
    band(9.0, -0.7849, 28.1, 0.15458),
    band(10.0, -0.8752, 31.2, 0.16279),
];

const FEMALE_WEIGHT: [ReferenceEntry; 14] = [
    band(0.25, 0.1714, 5.8, 0.12619),
    band(0.5, 0.0809, 7.3, 0.12402),
    band(0.75, -0.0090, 8.2, 0.12274),
    band(1.0, -0.0756, 8.9, 0.12267),
    band(1.5, -0.1829, 10.2, 0.12403),
    band(2.0, -0.2624, 11.5, 0.12619),
    band(3.0, -0.3833, 13.9, 0.13166),
    band(4.0, -0.4681, 16.1, 0.13724),
    band(5.0, -0.5230, 18.2, 0.14214),
    band(6.0, -0.5684, 20.2, 0.14690),
    band(7.0, -0.6311, 22.4, 0.15261),
    band(8.0, -0.7054, 25.0, 0.15941),
    band(9.0, -0.7882, 28.2, 0.16693),
    band(10.0, -0.8755, 31.9, 0.17435),
];

// ============================================================================
// Lookup
// ============================================================================

/// An immutable, non-empty table of age bands in ascending age order
#[derive(Debug, Clone, Copy)]
pub struct ReferenceTable {
    entries: &'static [ReferenceEntry],
}

impl ReferenceTable {
    /// Wrap a static band list. Callers must supply at least one band,
    /// sorted by ascending age.
    const fn from_static(entries: &'static [ReferenceEntry]) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &'static [ReferenceEntry] {
        self.entries
    }

    /// Tabulated ages, ascending
    pub fn ages(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|e| e.age_years)
    }

    /// Select the band whose age is closest to `age_years`.
    ///
    /// Bands are scanned in ascending age order and a band only replaces the
    /// current best when strictly closer, so an age exactly halfway between
    /// two keys resolves to the younger one.
    pub fn closest(&self, age_years: f64) -> ReferenceEntry {
        let mut best = self.entries[0];
        let mut best_distance = (best.age_years - age_years).abs();

        for entry in &self.entries[1..] {
            let distance = (entry.age_years - age_years).abs();
            if distance < best_distance {
                best = *entry;
                best_distance = distance;
            }
        }

        best
    }
}

/// Get the reference table for a metric and sex
pub fn reference_table(metric: GrowthMetric, sex: BiologicalSex) -> ReferenceTable {
    match (metric, sex) {
        (GrowthMetric::Height, BiologicalSex::Male) => ReferenceTable::from_static(&MALE_HEIGHT),
        (GrowthMetric::Height, BiologicalSex::Female) => {
            ReferenceTable::from_static(&FEMALE_HEIGHT)
        }
        (GrowthMetric::Weight, BiologicalSex::Male) => ReferenceTable::from_static(&MALE_WEIGHT),
        (GrowthMetric::Weight, BiologicalSex::Female) => {
            ReferenceTable::from_static(&FEMALE_WEIGHT)
        }
    }
}

/// Select the closest reference band for a metric, sex and age
pub fn closest_reference(metric: GrowthMetric, sex: BiologicalSex, age_years: f64) -> ReferenceEntry {
    reference_table(metric, sex).closest(age_years)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    const ALL_TABLES: [(GrowthMetric, BiologicalSex); 4] = [
        (GrowthMetric::Height, BiologicalSex::Male),
        (GrowthMetric::Height, BiologicalSex::Female),
        (GrowthMetric::Weight, BiologicalSex::Male),
        (GrowthMetric::Weight, BiologicalSex::Female),
    ];

    #[test]
    fn test_tables_are_sorted_and_non_empty() {
        for (metric, sex) in ALL_TABLES {
            let table = reference_table(metric, sex);
            assert!(!table.entries().is_empty());
            let ages: Vec<f64> = table.ages().collect();
            assert!(ages.windows(2).all(|w| w[0] < w[1]), "{metric} {sex:?} not ascending");
        }
    }

    #[test]
    fn test_tables_share_age_keys() {
        let keys: Vec<f64> = reference_table(GrowthMetric::Height, BiologicalSex::Male)
            .ages()
            .collect();
        assert_eq!(
            keys,
            vec![0.25, 0.5, 0.75, 1.0, 1.5, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]
        );
        for (metric, sex) in ALL_TABLES {
            let other: Vec<f64> = reference_table(metric, sex).ages().collect();
            assert_eq!(other, keys);
        }
    }

    #[test]
    fn test_medians_and_spreads_positive() {
        for (metric, sex) in ALL_TABLES {
            for entry in reference_table(metric, sex).entries() {
                assert!(entry.lms.m > 0.0);
                assert!(entry.lms.s > 0.0);
            }
        }
    }

    #[test]
    fn test_known_bands() {
        let entry = closest_reference(GrowthMetric::Height, BiologicalSex::Male, 5.0);
        assert_eq!(entry.age_years, 5.0);
        assert_eq!(entry.lms, LmsParams::new(1.0, 109.9, 0.03848));

        let entry = closest_reference(GrowthMetric::Weight, BiologicalSex::Male, 5.0);
        assert_eq!(entry.lms, LmsParams::new(-0.4374, 18.4, 0.12713));

        let entry = closest_reference(GrowthMetric::Height, BiologicalSex::Female, 2.0);
        assert_eq!(entry.lms, LmsParams::new(1.0, 85.7, 0.03775));
    }

    #[rstest]
    #[case(2.5, 2.0)]
    #[case(1.25, 1.0)]
    #[case(0.625, 0.5)]
    #[case(5.5, 5.0)]
    #[case(2.6, 3.0)]
    #[case(0.0, 0.25)]
    #[case(0.3, 0.25)]
    #[case(14.0, 10.0)]
    #[case(7.0, 7.0)]
    fn test_closest_band(#[case] age: f64, #[case] expected: f64) {
        for (metric, sex) in ALL_TABLES {
            assert_eq!(closest_reference(metric, sex, age).age_years, expected);
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Property: no tabulated age is strictly closer than the selected one
        #[test]
        fn prop_closest_is_minimal(age in 0.0f64..15.0) {
            let table = reference_table(GrowthMetric::Weight, BiologicalSex::Female);
            let chosen = table.closest(age);
            let chosen_distance = (chosen.age_years - age).abs();
            for key in table.ages() {
                prop_assert!((key - age).abs() >= chosen_distance);
            }
        }
    }

    #[test]
    fn test_metric_parsing() {
        assert_eq!("Height".parse::<GrowthMetric>().unwrap(), GrowthMetric::Height);
        assert_eq!("weight".parse::<GrowthMetric>().unwrap(), GrowthMetric::Weight);
        assert!("bmi".parse::<GrowthMetric>().is_err());
    }
}
