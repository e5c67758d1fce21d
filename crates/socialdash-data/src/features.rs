//! Derived per-user categories.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Age bracket of a user; ages outside `(0, 100]` have none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeGroup {
    /// (0, 20]
    Under20,
    /// (20, 30]
    Twenties,
    /// (30, 40]
    Thirties,
    /// (40, 50]
    Forties,
    /// (50, 100]
    FiftyPlus,
}

impl AgeGroup {
    /// All groups in ascending age order.
    pub const ALL: [Self; 5] = [
        Self::Under20,
        Self::Twenties,
        Self::Thirties,
        Self::Forties,
        Self::FiftyPlus,
    ];

    /// Inclusive upper bound of each group, in [`AgeGroup::ALL`] order.
    const UPPER_BOUNDS: [f64; 5] = [20.0, 30.0, 40.0, 50.0, 100.0];

    /// Bins an age into its group with `(lower, upper]` edges, so `25.5`
    /// lands in `20-29` and `20.0` in `<20`.
    pub fn from_age(age: f64) -> Option<Self> {
        if age.is_nan() || age <= 0.0 {
            return None;
        }
        Self::UPPER_BOUNDS
            .iter()
            .position(|&upper| age <= upper)
            .map(|index| Self::ALL[index])
    }

    /// Display label of the group.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Under20 => "<20",
            Self::Twenties => "20-29",
            Self::Thirties => "30-39",
            Self::Forties => "40-49",
            Self::FiftyPlus => "50+",
        }
    }

    /// Position of the group in [`AgeGroup::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Activity bracket of a user, from their total activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActivityLevel {
    /// No activity at all.
    Inactive,
    /// 1 to 5.
    Low,
    /// 6 to 15.
    Medium,
    /// 16 to 30.
    High,
    /// More than 30.
    VeryActive,
}

/// Inclusive upper bound of each level; anything above the last is `VeryActive`.
const ACTIVITY_THRESHOLDS: [(u64, ActivityLevel); 4] = [
    (0, ActivityLevel::Inactive),
    (5, ActivityLevel::Low),
    (15, ActivityLevel::Medium),
    (30, ActivityLevel::High),
];

impl ActivityLevel {
    /// All levels from least to most active.
    pub const ALL: [Self; 5] = [
        Self::Inactive,
        Self::Low,
        Self::Medium,
        Self::High,
        Self::VeryActive,
    ];

    /// Classifies a total activity count. Total over every `u64`.
    pub fn from_total_activity(total: u64) -> Self {
        ACTIVITY_THRESHOLDS
            .iter()
            .find(|(upper, _)| total <= *upper)
            .map_or(Self::VeryActive, |(_, level)| *level)
    }

    /// Stable kebab-case identifier, used for message keys.
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Inactive => "inactive",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::VeryActive => "very-active",
        }
    }

    /// English display label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Inactive => "Inactive",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::VeryActive => "Very Active",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_age_group_boundaries() {
        assert_eq!(AgeGroup::from_age(0.0), None);
        assert_eq!(AgeGroup::from_age(1.0), Some(AgeGroup::Under20));
        assert_eq!(AgeGroup::from_age(20.0), Some(AgeGroup::Under20));
        assert_eq!(AgeGroup::from_age(21.0), Some(AgeGroup::Twenties));
        assert_eq!(AgeGroup::from_age(30.0), Some(AgeGroup::Twenties));
        assert_eq!(AgeGroup::from_age(31.0), Some(AgeGroup::Thirties));
        assert_eq!(AgeGroup::from_age(50.0), Some(AgeGroup::Forties));
        assert_eq!(AgeGroup::from_age(51.0), Some(AgeGroup::FiftyPlus));
        assert_eq!(AgeGroup::from_age(100.0), Some(AgeGroup::FiftyPlus));
        assert_eq!(AgeGroup::from_age(101.0), None);
    }

    #[test]
    fn test_age_group_negative_and_fractional() {
        assert_eq!(AgeGroup::from_age(-1.0), None);
        assert_eq!(AgeGroup::from_age(0.5), Some(AgeGroup::Under20));
        assert_eq!(AgeGroup::from_age(20.5), Some(AgeGroup::Twenties));
        assert_eq!(AgeGroup::from_age(25.5), Some(AgeGroup::Twenties));
        assert_eq!(AgeGroup::from_age(30.01), Some(AgeGroup::Thirties));
        assert_eq!(AgeGroup::from_age(100.5), None);
        assert_eq!(AgeGroup::from_age(f64::NAN), None);
    }

    #[test]
    fn test_activity_level_boundaries() {
        let cases = [
            (0, ActivityLevel::Inactive),
            (1, ActivityLevel::Low),
            (5, ActivityLevel::Low),
            (6, ActivityLevel::Medium),
            (15, ActivityLevel::Medium),
            (16, ActivityLevel::High),
            (30, ActivityLevel::High),
            (31, ActivityLevel::VeryActive),
            (u64::MAX, ActivityLevel::VeryActive),
        ];
        for (total, expected) in cases {
            assert_eq!(ActivityLevel::from_total_activity(total), expected, "total {total}");
        }
    }

    #[test]
    fn test_index_matches_all_order() {
        for (i, group) in AgeGroup::ALL.into_iter().enumerate() {
            assert_eq!(group.index(), i);
        }
    }

    proptest! {
        #[test]
        fn prop_activity_level_is_monotonic(a in 0u64..200, b in 0u64..200) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(ActivityLevel::from_total_activity(lo) <= ActivityLevel::from_total_activity(hi));
        }

        #[test]
        fn prop_age_group_defined_exactly_in_range(age in -10.0f64..=130.0) {
            prop_assert_eq!(AgeGroup::from_age(age).is_some(), age > 0.0 && age <= 100.0);
        }
    }
}
