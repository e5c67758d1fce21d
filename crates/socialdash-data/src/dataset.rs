//! The integrated output tables.

use crate::features::{ActivityLevel, AgeGroup};
use chrono::{Datelike, NaiveDateTime};
use serde::Serialize;
use socialdash_common::{PostId, ReactionId, UserId};

/// One user joined with their aggregates and derived features.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntegratedRecord {
    /// Dense user id.
    pub user_id: UserId,
    /// Given name.
    pub name: Option<String>,
    /// Family name.
    pub surname: Option<String>,
    /// Age in years.
    pub age: Option<f64>,
    /// Subscription instant.
    pub subscription_date: Option<NaiveDateTime>,
    /// Occurrences of the user in either friendship column.
    pub friend_count: u64,
    /// Posts authored.
    pub post_count: u64,
    /// Reactions given.
    pub reactions_given: u64,
    /// Reactions received through the synthetic reaction to post link.
    pub reactions_received: u64,
    /// Age bracket, `None` when the age is missing or out of range.
    pub age_group: Option<AgeGroup>,
    /// Year of the subscription date.
    pub registration_year: Option<i32>,
    /// `friend_count + post_count + reactions_given`.
    pub total_activity: u64,
    /// `reactions_received / (post_count + 1)`.
    pub engagement_ratio: f64,
    /// Activity bracket of `total_activity`.
    pub activity_level: ActivityLevel,
}

impl IntegratedRecord {
    /// Display name, `"Name Surname"` with missing parts left out.
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [self.name.as_deref(), self.surname.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        if parts.is_empty() {
            format!("User {}", self.user_id)
        } else {
            parts.join(" ")
        }
    }

    /// Subscription year derived from a date.
    pub fn year_of(date: Option<NaiveDateTime>) -> Option<i32> {
        date.map(|d| d.year())
    }
}

/// A deduplicated post with its dense id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    /// Dense post id.
    pub id: PostId,
    /// Author, `None` when the cell was blank.
    pub author: Option<UserId>,
    /// Post type.
    pub post_type: Option<String>,
    /// Publication instant.
    pub post_date: Option<NaiveDateTime>,
}

/// A cleaned, deduplicated reaction with its dense id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reaction {
    /// Dense reaction id.
    pub id: ReactionId,
    /// Reacting user.
    pub user: UserId,
    /// Reaction type.
    pub reaction_type: String,
    /// Reaction instant.
    pub reaction_date: NaiveDateTime,
    /// Post the reaction is attributed to: `(id mod post total) + 1`.
    pub post: PostId,
}

/// The output of one integration run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntegratedDataset {
    /// One record per deduplicated user, in id order.
    pub records: Vec<IntegratedRecord>,
    /// Cleaned posts in id order.
    pub posts: Vec<Post>,
    /// Cleaned reactions in id order.
    pub reactions: Vec<Reaction>,
}

impl IntegratedDataset {
    /// Record of `user_id`, if the user exists.
    pub fn record(&self, user_id: UserId) -> Option<&IntegratedRecord> {
        let index = usize::try_from(user_id.0.checked_sub(1)?).ok()?;
        self.records.get(index)
    }

    /// Post of `post_id`, if it exists.
    pub fn post(&self, post_id: PostId) -> Option<&Post> {
        let index = usize::try_from(post_id.0.checked_sub(1)?).ok()?;
        self.posts.get(index)
    }

    /// Number of users.
    pub fn user_count(&self) -> usize {
        self.records.len()
    }

    /// Whether there are no users at all.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
