//! CSV parsing of fetched sources into raw row tables.

use crate::records::{RawFriendship, RawPost, RawReaction, RawUser};
use crate::source::{RawSource, RawSources, SourceKind};
use serde::de::DeserializeOwned;
use socialdash_common::{DashError, Result};
use tracing::{debug, instrument};

/// The four dataset files parsed into rows, before any cleaning.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawTables {
    /// Users in file order.
    pub users: Vec<RawUser>,
    /// Friendship pairs in file order.
    pub friendships: Vec<RawFriendship>,
    /// Posts in file order.
    pub posts: Vec<RawPost>,
    /// Reactions in file order.
    pub reactions: Vec<RawReaction>,
}

impl RawTables {
    /// Parses all four sources; the first unparseable one aborts with an
    /// error naming it.
    #[instrument(skip_all)]
    pub fn parse(sources: &RawSources) -> Result<Self> {
        Ok(Self {
            users: parse_source(&sources.users)?,
            friendships: parse_source(&sources.friends)?,
            posts: parse_source(&sources.posts)?,
            reactions: parse_source(&sources.reactions)?,
        })
    }
}

/// Parses one source into rows of `T`.
pub fn parse_source<T: DeserializeOwned>(source: &RawSource) -> Result<Vec<T>> {
    parse_csv(source.kind, &source.content)
}

/// Parses CSV bytes of the given kind into rows of `T`.
///
/// The header must contain the columns the kind requires; other columns are
/// ignored. Row numbers in errors count the header as row 1.
pub fn parse_csv<T: DeserializeOwned>(kind: SourceKind, content: &[u8]) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(false)
        .from_reader(content);

    let headers = reader
        .headers()
        .map_err(|e| DashError::parse_with_source(kind.name(), "unreadable header", e))?
        .clone();

    let missing: Vec<&str> = kind
        .required_columns()
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|h| h == *column))
        .collect();
    if !missing.is_empty() {
        return Err(DashError::parse(
            kind.name(),
            format!("missing column(s): {}", missing.join(", ")),
        ));
    }

    let rows = reader
        .deserialize()
        .enumerate()
        .map(|(index, row)| {
            row.map_err(|e| {
                DashError::parse_with_source(kind.name(), format!("invalid row {}", index + 2), e)
            })
        })
        .collect::<Result<Vec<T>>>()?;

    debug!("Parsed {} {} rows", rows.len(), kind);
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_users_converts_epochs() {
        let csv = "Name,Surname,Age,Subscription Date\nAda,Lovelace,25.0,1546300800\n";
        let users: Vec<RawUser> = parse_csv(SourceKind::Users, csv.as_bytes()).unwrap();

        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name.as_deref(), Some("Ada"));
        assert_eq!(users[0].age, Some(25.0));
        assert_eq!(
            users[0].subscription_date,
            NaiveDate::from_ymd_opt(2019, 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0))
        );
    }

    #[test]
    fn test_blank_cells_are_none_and_extra_columns_ignored() {
        let csv = ",Friend 1,Friend 2,Note\n0,1,,x\n1,,3,y\n";
        let rows: Vec<RawFriendship> = parse_csv(SourceKind::Friends, csv.as_bytes()).unwrap();

        assert_eq!(rows[0].friend_1, Some(1));
        assert_eq!(rows[0].friend_2, None);
        assert_eq!(rows[1].friend_1, None);
        assert_eq!(rows[1].friend_2, Some(3));
    }

    #[test]
    fn test_missing_column_names_source() {
        let csv = "User,Post Type\n1,photo\n";
        let err = parse_csv::<RawPost>(SourceKind::Posts, csv.as_bytes()).unwrap_err();

        let message = err.to_string();
        assert!(message.contains("posts source"), "{message}");
        assert!(message.contains("Post Date"), "{message}");
    }

    #[test]
    fn test_bad_cell_reports_row() {
        let csv = "User,Reaction Type,Reaction Date\n1,like,1600000000\nabc,love,1600000001\n";
        let err = parse_csv::<RawReaction>(SourceKind::Reactions, csv.as_bytes()).unwrap_err();

        assert!(matches!(err, DashError::Parse { ref source_name, .. } if source_name == "reactions"));
        assert!(err.to_string().contains("row 3"));
    }

    #[test]
    fn test_empty_file_is_unparseable() {
        let err = parse_csv::<RawUser>(SourceKind::Users, b"").unwrap_err();
        assert!(err.to_string().contains("missing column"));
    }

    #[test]
    fn test_header_only_gives_no_rows() {
        let rows: Vec<RawReaction> =
            parse_csv(SourceKind::Reactions, b"User,Reaction Type,Reaction Date\n").unwrap();
        assert!(rows.is_empty());
    }
}
