//! Joining the cleaned tables into one record per user.

use crate::cleaning::{clean_reactions, dedup_rows, CleanReactionRow};
use crate::dataset::{IntegratedDataset, IntegratedRecord, Post, Reaction};
use crate::features::{ActivityLevel, AgeGroup};
use crate::parser::RawTables;
use crate::records::{RawFriendship, RawUser};
use crate::source::RawSources;
use socialdash_common::{sequential_ids, DashError, PostId, ReactionId, Result, UserId};
use std::collections::HashMap;
use tracing::{debug, info, instrument};

/// Builds an [`IntegratedDataset`] from raw tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataIntegrator;

impl DataIntegrator {
    /// Parses the fetched sources and integrates them.
    pub fn integrate_sources(sources: &RawSources) -> Result<IntegratedDataset> {
        Self::integrate(RawTables::parse(sources)?)
    }

    /// Cleans, deduplicates, joins and derives features.
    #[instrument(skip_all, fields(
        users = tables.users.len(),
        friendships = tables.friendships.len(),
        posts = tables.posts.len(),
        reactions = tables.reactions.len(),
    ))]
    pub fn integrate(tables: RawTables) -> Result<IntegratedDataset> {
        let RawTables {
            users,
            friendships,
            posts,
            reactions,
        } = tables;

        let reactions = clean_reactions(reactions)?;

        let users = dedup_rows(users);
        let friendships = dedup_rows(friendships);
        let posts = dedup_rows(posts);
        let reactions = dedup_rows(reactions);
        debug!(
            "After deduplication: {} users, {} friendships, {} posts, {} reactions",
            users.len(),
            friendships.len(),
            posts.len(),
            reactions.len()
        );

        let posts: Vec<Post> = sequential_ids(posts.len(), PostId)
            .zip(posts)
            .map(|(id, row)| Post {
                id,
                author: row.user.map(UserId),
                post_type: row.post_type,
                post_date: row.post_date,
            })
            .collect();
        let reactions = link_reactions(reactions, posts.len())?;

        let friend_counts = count_friends(&friendships);
        let post_counts = count_by(posts.iter().filter_map(|p| p.author));
        let given_counts = count_by(reactions.iter().map(|r| r.user));
        let received_counts = count_by(reactions.iter().filter_map(|r| {
            let index = usize::try_from(r.post.0 - 1).ok()?;
            posts.get(index).and_then(|p| p.author)
        }));

        let records = sequential_ids(users.len(), UserId)
            .zip(users)
            .map(|(user_id, user)| {
                let lookup = |counts: &HashMap<UserId, u64>| counts.get(&user_id).copied().unwrap_or(0);
                build_record(
                    user_id,
                    user,
                    Aggregates {
                        friend_count: lookup(&friend_counts),
                        post_count: lookup(&post_counts),
                        reactions_given: lookup(&given_counts),
                        reactions_received: lookup(&received_counts),
                    },
                )
            })
            .collect::<Vec<_>>();

        info!(
            "Integrated {} users, {} posts, {} reactions",
            records.len(),
            posts.len(),
            reactions.len()
        );

        Ok(IntegratedDataset {
            records,
            posts,
            reactions,
        })
    }
}

struct Aggregates {
    friend_count: u64,
    post_count: u64,
    reactions_given: u64,
    reactions_received: u64,
}

fn build_record(user_id: UserId, user: RawUser, aggregates: Aggregates) -> IntegratedRecord {
    let Aggregates {
        friend_count,
        post_count,
        reactions_given,
        reactions_received,
    } = aggregates;

    let total_activity = friend_count + post_count + reactions_given;
    #[allow(clippy::cast_precision_loss)]
    let engagement_ratio = reactions_received as f64 / (post_count + 1) as f64;

    IntegratedRecord {
        user_id,
        age_group: user.age.and_then(AgeGroup::from_age),
        registration_year: IntegratedRecord::year_of(user.subscription_date),
        name: user.name,
        surname: user.surname,
        age: user.age,
        subscription_date: user.subscription_date,
        friend_count,
        post_count,
        reactions_given,
        reactions_received,
        total_activity,
        engagement_ratio,
        activity_level: ActivityLevel::from_total_activity(total_activity),
    }
}

/// Assigns reaction ids and attributes each reaction to post
/// `(reaction_id mod post_total) + 1`.
fn link_reactions(rows: Vec<CleanReactionRow>, post_total: usize) -> Result<Vec<Reaction>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    if post_total == 0 {
        return Err(DashError::data_shape(format!(
            "{} reactions cannot be attributed to posts: the posts table is empty",
            rows.len()
        )));
    }

    let post_total = post_total as u64;
    Ok(sequential_ids(rows.len(), ReactionId)
        .zip(rows)
        .map(|(id, row)| Reaction {
            id,
            user: UserId(row.user),
            reaction_type: row.reaction_type,
            reaction_date: row.reaction_date,
            post: PostId(id.0 % post_total + 1),
        })
        .collect())
}

/// Occurrences of each id across both friendship columns.
fn count_friends(friendships: &[RawFriendship]) -> HashMap<UserId, u64> {
    count_by(
        friendships
            .iter()
            .flat_map(|f| [f.friend_1, f.friend_2])
            .flatten()
            .map(UserId),
    )
}

fn count_by(ids: impl Iterator<Item = UserId>) -> HashMap<UserId, u64> {
    let mut counts = HashMap::new();
    for id in ids {
        *counts.entry(id).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{RawPost, RawReaction};
    use chrono::DateTime;

    fn user(name: &str, age: Option<f64>) -> RawUser {
        RawUser {
            name: Some(name.to_string()),
            surname: None,
            age,
            subscription_date: DateTime::from_timestamp(1_577_836_800, 0).map(|d| d.naive_utc()),
        }
    }

    fn post(author: u64) -> RawPost {
        RawPost {
            user: Some(author),
            post_type: Some("photo".to_string()),
            post_date: None,
        }
    }

    fn reaction(user: u64, secs: i64) -> RawReaction {
        RawReaction {
            user: Some(user),
            reaction_type: Some("like".to_string()),
            reaction_date: DateTime::from_timestamp(secs, 0).map(|d| d.naive_utc()),
        }
    }

    #[test]
    fn test_empty_reactions_give_zero_received() {
        let tables = RawTables {
            users: vec![user("Ada", Some(25.0))],
            friendships: Vec::new(),
            posts: vec![post(1)],
            reactions: Vec::new(),
        };

        let dataset = DataIntegrator::integrate(tables).unwrap();
        let record = &dataset.records[0];
        assert_eq!(record.reactions_received, 0);
        assert_eq!(record.post_count, 1);
        assert_eq!(record.total_activity, 1);
        assert_eq!(record.activity_level, ActivityLevel::Low);
        assert_eq!(record.registration_year, Some(2020));
    }

    #[test]
    fn test_reactions_without_posts_is_data_shape_error() {
        let tables = RawTables {
            users: vec![user("Ada", Some(25.0))],
            friendships: Vec::new(),
            posts: Vec::new(),
            reactions: vec![reaction(1, 1_600_000_000)],
        };

        let err = DataIntegrator::integrate(tables).unwrap_err();
        assert!(err.is_data_shape());
    }

    #[test]
    fn test_synthetic_post_link() {
        let tables = RawTables {
            users: vec![user("Ada", None), user("Budi", None)],
            friendships: Vec::new(),
            posts: vec![post(1), post(2), post(2)],
            reactions: (0..4).map(|i| reaction(1, 1_600_000_000 + i)).collect(),
        };

        let dataset = DataIntegrator::integrate(tables).unwrap();
        // Duplicate post removed: two posts, so reactions 1..=4 hit posts 2, 1, 2, 1.
        let linked: Vec<u64> = dataset.reactions.iter().map(|r| r.post.0).collect();
        assert_eq!(linked, vec![2, 1, 2, 1]);
        assert_eq!(dataset.records[0].reactions_received, 2);
        assert_eq!(dataset.records[1].reactions_received, 2);
        assert!((dataset.records[1].engagement_ratio - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_ids_do_not_create_records() {
        let tables = RawTables {
            users: vec![user("Ada", Some(0.0))],
            friendships: vec![RawFriendship {
                friend_1: Some(1),
                friend_2: Some(99),
            }],
            posts: vec![post(42)],
            reactions: Vec::new(),
        };

        let dataset = DataIntegrator::integrate(tables).unwrap();
        assert_eq!(dataset.records.len(), 1);
        assert_eq!(dataset.records[0].friend_count, 1);
        assert_eq!(dataset.records[0].post_count, 0);
        assert_eq!(dataset.records[0].age_group, None);
    }
}
