//! Raw rows of the four dataset files.
//!
//! Cells are read leniently: whole numbers may be written as `25` or `25.0`,
//! blank cells and `NaN` become `None`, and timestamps are epoch seconds
//! converted to naive UTC date-times while parsing. Ages are any finite
//! number; whether they fall in a group is decided later. Columns not named
//! here are ignored.

use chrono::NaiveDateTime;
use serde::Deserialize;
use std::hash::{Hash, Hasher};

/// A row of the users file.
#[derive(Debug, Clone, Deserialize)]
pub struct RawUser {
    /// Given name.
    #[serde(rename = "Name", default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    /// Family name.
    #[serde(rename = "Surname", default, deserialize_with = "lenient::text")]
    pub surname: Option<String>,
    /// Age in years.
    #[serde(rename = "Age", default, deserialize_with = "lenient::number")]
    pub age: Option<f64>,
    /// Subscription instant.
    #[serde(rename = "Subscription Date", default, deserialize_with = "lenient::epoch")]
    pub subscription_date: Option<NaiveDateTime>,
}

impl RawUser {
    // Ages are always finite, so comparing bit patterns is an equivalence.
    fn key(&self) -> (&Option<String>, &Option<String>, Option<u64>, &Option<NaiveDateTime>) {
        (
            &self.name,
            &self.surname,
            self.age.map(f64::to_bits),
            &self.subscription_date,
        )
    }
}

impl PartialEq for RawUser {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for RawUser {}

impl Hash for RawUser {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// A row of the friendships file: an unordered pair of user ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct RawFriendship {
    /// First user of the pair.
    #[serde(rename = "Friend 1", default, deserialize_with = "lenient::integer")]
    pub friend_1: Option<u64>,
    /// Second user of the pair.
    #[serde(rename = "Friend 2", default, deserialize_with = "lenient::integer")]
    pub friend_2: Option<u64>,
}

/// A row of the posts file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct RawPost {
    /// Author id.
    #[serde(rename = "User", default, deserialize_with = "lenient::integer")]
    pub user: Option<u64>,
    /// Post type such as `photo` or `video`.
    #[serde(rename = "Post Type", default, deserialize_with = "lenient::text")]
    pub post_type: Option<String>,
    /// Publication instant.
    #[serde(rename = "Post Date", default, deserialize_with = "lenient::epoch")]
    pub post_date: Option<NaiveDateTime>,
}

/// A row of the reactions file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct RawReaction {
    /// Id of the reacting user.
    #[serde(rename = "User", default, deserialize_with = "lenient::integer")]
    pub user: Option<u64>,
    /// Reaction type such as `like`.
    #[serde(rename = "Reaction Type", default, deserialize_with = "lenient::text")]
    pub reaction_type: Option<String>,
    /// Reaction instant.
    #[serde(rename = "Reaction Date", default, deserialize_with = "lenient::epoch")]
    pub reaction_date: Option<NaiveDateTime>,
}

/// Lenient cell deserializers.
pub(crate) mod lenient {
    use chrono::{DateTime, NaiveDateTime};
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    fn cell<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.and_then(|value| {
            let trimmed = value.trim();
            if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
                None
            } else {
                Some(trimmed.to_string())
            }
        }))
    }

    /// Parses an integral number written either as `25` or `25.0`.
    pub(crate) fn parse_integral<T: TryFrom<i64>>(value: &str) -> Option<T> {
        let whole = value.parse::<i64>().ok().or_else(|| {
            let float = value.parse::<f64>().ok()?;
            (float.is_finite() && float.fract() == 0.0 && float.abs() < 9.0e15)
                .then_some(float as i64)
        })?;
        T::try_from(whole).ok()
    }

    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        cell(deserializer)
    }

    pub fn integer<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: TryFrom<i64>,
    {
        cell(deserializer)?
            .map(|value| {
                parse_integral(&value)
                    .ok_or_else(|| D::Error::custom(format!("'{value}' is not a valid whole number")))
            })
            .transpose()
    }

    /// A finite decimal number such as `25`, `-1` or `25.5`.
    pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        cell(deserializer)?
            .map(|value| {
                value
                    .parse::<f64>()
                    .ok()
                    .filter(|number| number.is_finite())
                    // Normalize -0 so equal cells dedup together.
                    .map(|number| number + 0.0)
                    .ok_or_else(|| D::Error::custom(format!("'{value}' is not a valid number")))
            })
            .transpose()
    }

    pub fn epoch<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        cell(deserializer)?
            .map(|value| {
                parse_integral::<i64>(&value)
                    .and_then(|secs| DateTime::from_timestamp(secs, 0))
                    .map(|dt| dt.naive_utc())
                    .ok_or_else(|| D::Error::custom(format!("'{value}' is not an epoch timestamp")))
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::lenient::parse_integral;
    use super::RawUser;
    use std::collections::HashSet;

    fn users(body: &str) -> Result<Vec<RawUser>, csv::Error> {
        let csv = format!("Name,Surname,Age,Subscription Date\n{body}");
        csv::Reader::from_reader(csv.as_bytes()).deserialize().collect()
    }

    #[test]
    fn test_parse_integral_accepts_float_notation() {
        assert_eq!(parse_integral::<u32>("25"), Some(25));
        assert_eq!(parse_integral::<u32>("25.0"), Some(25));
        assert_eq!(parse_integral::<i64>("1546300800.0"), Some(1_546_300_800));
    }

    #[test]
    fn test_parse_integral_rejects_fractions_and_text() {
        assert_eq!(parse_integral::<u32>("25.5"), None);
        assert_eq!(parse_integral::<u32>("abc"), None);
        assert_eq!(parse_integral::<u32>("-3"), None);
        assert_eq!(parse_integral::<u64>("inf"), None);
    }

    #[test]
    fn test_age_accepts_negative_and_fractional_values() {
        let rows = users("A,B,-1,1577836800\nC,D,25.5,1577836800\nE,F,,1577836800\nG,H,NaN,\n").unwrap();
        let ages: Vec<Option<f64>> = rows.iter().map(|u| u.age).collect();
        assert_eq!(ages, [Some(-1.0), Some(25.5), None, None]);
    }

    #[test]
    fn test_age_rejects_text_and_infinity() {
        assert!(users("A,B,old,1577836800\n").is_err());
        assert!(users("A,B,inf,1577836800\n").is_err());
    }

    #[test]
    fn test_equal_users_hash_together() {
        let rows = users("A,B,25.0,1577836800\nA,B,25,1577836800\nA,B,-0,\nA,B,0,\nA,B,25.5,1577836800\n").unwrap();
        let distinct: HashSet<RawUser> = rows.into_iter().collect();
        assert_eq!(distinct.len(), 3);
    }
}
