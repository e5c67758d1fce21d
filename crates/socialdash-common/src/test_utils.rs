//! Test utilities and shared fixtures for the dashboard workspace.
//!
//! Fixtures are raw CSV text in the same shape as the published dataset files,
//! so every crate can exercise the real parsing path.

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialize logging for tests; safe to call multiple times.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Create a temporary directory for tests that automatically cleans up.
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// CSV fixtures shaped like the four dataset files.
pub mod csv_fixtures {
    /// Header line of the users file.
    pub const USERS_HEADER: &str = "Name,Surname,Age,Subscription Date";
    /// Header line of the friendships file.
    pub const FRIENDS_HEADER: &str = "Friend 1,Friend 2";
    /// Header line of the posts file.
    pub const POSTS_HEADER: &str = "User,Post Type,Post Date";
    /// Header line of the reactions file.
    pub const REACTIONS_HEADER: &str = "User,Reaction Type,Reaction Date";

    /// Five users, one of them duplicated verbatim.
    ///
    /// After deduplication: 1 Ada (25, 2019), 2 Budi (45, 2020),
    /// 3 Citra (19, 2020), 4 Dewi (67, 2021), 5 Eko (33, 2021).
    pub fn users_csv() -> String {
        [
            USERS_HEADER,
            "Ada,Lovelace,25,1546300800",
            "Budi,Santoso,45,1577836800",
            "Ada,Lovelace,25,1546300800",
            "Citra,Lestari,19,1590969600",
            "Dewi,Sartika,67,1609459200",
            "Eko,Prasetyo,33,1622505600",
        ]
        .join("\n")
    }

    /// Friendship pairs, with one duplicated pair.
    ///
    /// After deduplication friend counts are: 1→3, 2→2, 3→1, 5→2, 4→0.
    pub fn friends_csv() -> String {
        [FRIENDS_HEADER, "1,2", "1,3", "2,5", "1,2", "5,1"].join("\n")
    }

    /// Posts by users 1, 1, 2, 5 plus one exact duplicate.
    pub fn posts_csv() -> String {
        [
            POSTS_HEADER,
            "1,photo,1600000000",
            "1,status,1600003600",
            "2,video,1600007200",
            "1,photo,1600000000",
            "5,photo,1600010800",
        ]
        .join("\n")
    }

    /// Reactions including a row without a user, a missing type and a missing date.
    pub fn reactions_csv() -> String {
        [
            REACTIONS_HEADER,
            "2,like,1600100000",
            "3,love,1600200000",
            ",like,1600300000",
            "1,,1600400000",
            "5,like,",
            "3,love,1600200000",
            "4,haha,1600500000",
        ]
        .join("\n")
    }

    /// A file holding only the given header.
    pub fn header_only(header: &str) -> String {
        format!("{header}\n")
    }
}

/// Property-based testing strategies using proptest.
#[cfg(feature = "proptest")]
pub mod property_testing {
    use proptest::prelude::*;

    /// Ages including fractional values and the out-of-range edges `<= 0`
    /// and `> 100`.
    pub fn age_strategy() -> impl Strategy<Value = f64> {
        prop_oneof![
            (-10i32..=130).prop_map(f64::from),
            (-100i32..=1300).prop_map(|tenths| f64::from(tenths) / 10.0),
        ]
    }

    /// A users CSV with between 1 and `max_users` rows.
    pub fn users_csv_strategy(max_users: usize) -> impl Strategy<Value = String> {
        prop::collection::vec(
            ("[A-Z][a-z]{2,8}", age_strategy(), 1_262_304_000i64..1_704_067_200i64),
            1..=max_users,
        )
        .prop_map(|rows| {
            let mut csv = String::from(super::csv_fixtures::USERS_HEADER);
            for (name, age, ts) in rows {
                csv.push_str(&format!("\n{name},Test,{age},{ts}"));
            }
            csv
        })
    }

    /// A friendships CSV referencing ids in `1..=max_id`.
    pub fn friends_csv_strategy(max_id: u64, max_rows: usize) -> impl Strategy<Value = String> {
        prop::collection::vec((1..=max_id, 1..=max_id), 0..=max_rows).prop_map(|pairs| {
            let mut csv = String::from(super::csv_fixtures::FRIENDS_HEADER);
            for (a, b) in pairs {
                csv.push_str(&format!("\n{a},{b}"));
            }
            csv
        })
    }

    /// A posts CSV authored by ids in `1..=max_id`.
    pub fn posts_csv_strategy(max_id: u64, max_rows: usize) -> impl Strategy<Value = String> {
        prop::collection::vec(
            (1..=max_id, prop::sample::select(vec!["photo", "video", "status"]), 1_600_000_000i64..1_700_000_000i64),
            1..=max_rows,
        )
        .prop_map(|rows| {
            let mut csv = String::from(super::csv_fixtures::POSTS_HEADER);
            for (user, kind, ts) in rows {
                csv.push_str(&format!("\n{user},{kind},{ts}"));
            }
            csv
        })
    }

    /// A reactions CSV given by ids in `1..=max_id`.
    pub fn reactions_csv_strategy(max_id: u64, max_rows: usize) -> impl Strategy<Value = String> {
        prop::collection::vec(
            (1..=max_id, prop::sample::select(vec!["like", "love", "haha", "wow"]), 1_600_000_000i64..1_700_000_000i64),
            0..=max_rows,
        )
        .prop_map(|rows| {
            let mut csv = String::from(super::csv_fixtures::REACTIONS_HEADER);
            for (user, kind, ts) in rows {
                csv.push_str(&format!("\n{user},{kind},{ts}"));
            }
            csv
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_multiple_calls() {
        init_test_logging();
        init_test_logging();
    }

    #[test]
    fn test_assert_approx_eq() {
        assert_approx_eq(1.0, 1.0001, 0.001);
        assert_approx_eq(1.0, 0.9999, 0.001);
    }

    #[test]
    #[should_panic]
    fn test_assert_approx_eq_fails() {
        assert_approx_eq(1.0, 1.1, 0.05);
    }

    #[test]
    fn test_fixtures_have_headers() {
        assert!(csv_fixtures::users_csv().starts_with(csv_fixtures::USERS_HEADER));
        assert_eq!(csv_fixtures::friends_csv().lines().count(), 6);
        assert_eq!(
            csv_fixtures::header_only(csv_fixtures::POSTS_HEADER),
            "User,Post Type,Post Date\n"
        );
    }
}
