//! Fetching the raw bytes of the four dataset files.

use async_trait::async_trait;
use reqwest::Client;
use socialdash_common::{DashError, Result};
use socialdash_config::schema::{HttpConfig, SourcesConfig};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, instrument};
use url::Url;

/// The four dataset files, in fetch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceKind {
    /// Users table.
    Users,
    /// Friendships table.
    Friends,
    /// Posts table.
    Posts,
    /// Reactions table.
    Reactions,
}

impl SourceKind {
    /// All kinds in fetch order.
    pub const ALL: [Self; 4] = [Self::Users, Self::Friends, Self::Posts, Self::Reactions];

    /// Name used in logs and error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Friends => "friends",
            Self::Posts => "posts",
            Self::Reactions => "reactions",
        }
    }

    /// Header columns that must be present in the file.
    pub const fn required_columns(self) -> &'static [&'static str] {
        match self {
            Self::Users => &["Name", "Surname", "Age", "Subscription Date"],
            Self::Friends => &["Friend 1", "Friend 2"],
            Self::Posts => &["User", "Post Type", "Post Date"],
            Self::Reactions => &["User", "Reaction Type", "Reaction Date"],
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a dataset file lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceLocation {
    /// An `http` or `https` URL.
    Remote(Url),
    /// A local file, given as a path or a `file://` URL.
    Local(PathBuf),
}

impl SourceLocation {
    /// Classifies a configured location string.
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        if !value.contains("://") {
            return Ok(Self::Local(PathBuf::from(value)));
        }

        let url = Url::parse(value)
            .map_err(|e| DashError::config_with_source(format!("invalid source URL '{value}'"), e))?;
        match url.scheme() {
            "http" | "https" => Ok(Self::Remote(url)),
            "file" => url
                .to_file_path()
                .map(Self::Local)
                .map_err(|()| DashError::config(format!("invalid file URL '{value}'"))),
            other => Err(DashError::config(format!(
                "unsupported URL scheme '{other}' in '{value}'"
            ))),
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(url) => write!(f, "{url}"),
            Self::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Locations of the four dataset files.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceSet {
    /// Users table location.
    pub users: SourceLocation,
    /// Friendships table location.
    pub friends: SourceLocation,
    /// Posts table location.
    pub posts: SourceLocation,
    /// Reactions table location.
    pub reactions: SourceLocation,
}

impl SourceSet {
    /// Builds the set from the `sources` configuration section.
    pub fn from_config(config: &SourcesConfig) -> Result<Self> {
        Ok(Self {
            users: SourceLocation::parse(&config.users)?,
            friends: SourceLocation::parse(&config.friends)?,
            posts: SourceLocation::parse(&config.posts)?,
            reactions: SourceLocation::parse(&config.reactions)?,
        })
    }

    /// The location of `kind`.
    pub const fn get(&self, kind: SourceKind) -> &SourceLocation {
        match kind {
            SourceKind::Users => &self.users,
            SourceKind::Friends => &self.friends,
            SourceKind::Posts => &self.posts,
            SourceKind::Reactions => &self.reactions,
        }
    }
}

/// The fetched bytes of one dataset file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawSource {
    /// Which file this is.
    pub kind: SourceKind,
    /// Identifier of the location the bytes came from.
    pub identifier: String,
    /// File contents.
    pub content: Vec<u8>,
}

impl RawSource {
    /// Wraps already available contents, e.g. for tests.
    pub fn new(kind: SourceKind, identifier: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            kind,
            identifier: identifier.into(),
            content: content.into(),
        }
    }
}

/// The fetched contents of all four dataset files.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawSources {
    /// Users file.
    pub users: RawSource,
    /// Friendships file.
    pub friends: RawSource,
    /// Posts file.
    pub posts: RawSource,
    /// Reactions file.
    pub reactions: RawSource,
}

impl RawSources {
    /// Builds the set from in-memory CSV text, identified as `memory:<kind>`.
    pub fn from_csv(users: &str, friends: &str, posts: &str, reactions: &str) -> Self {
        let source = |kind: SourceKind, text: &str| {
            RawSource::new(kind, format!("memory:{}", kind.name()), text.as_bytes())
        };
        Self {
            users: source(SourceKind::Users, users),
            friends: source(SourceKind::Friends, friends),
            posts: source(SourceKind::Posts, posts),
            reactions: source(SourceKind::Reactions, reactions),
        }
    }

    /// All four sources in fetch order.
    pub fn iter(&self) -> impl Iterator<Item = &RawSource> {
        [&self.users, &self.friends, &self.posts, &self.reactions].into_iter()
    }
}

/// Retrieves the raw bytes behind a [`SourceLocation`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    /// Fetches the full contents at `location`.
    async fn fetch(&self, location: &SourceLocation) -> Result<Vec<u8>>;
}

/// Fetches remote files over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with the configured timeout and user agent.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| DashError::network_with_source("Failed to create HTTP client", e))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl SourceFetcher for HttpFetcher {
    #[instrument(skip_all, fields(location = %location))]
    async fn fetch(&self, location: &SourceLocation) -> Result<Vec<u8>> {
        let SourceLocation::Remote(url) = location else {
            return Err(DashError::network(format!(
                "HTTP fetcher cannot read local location {location}"
            )));
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| DashError::network_with_source(format!("Request to {url} failed"), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DashError::network_with_status(
                format!("{url} responded with {status}"),
                status.as_u16(),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| DashError::network_with_source(format!("Failed to read body of {url}"), e))?;
        debug!("Fetched {} bytes", body.len());
        Ok(body.to_vec())
    }
}

/// Reads local files.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileFetcher;

#[async_trait]
impl SourceFetcher for FileFetcher {
    #[instrument(skip_all, fields(location = %location))]
    async fn fetch(&self, location: &SourceLocation) -> Result<Vec<u8>> {
        let SourceLocation::Local(path) = location else {
            return Err(DashError::network(format!(
                "File fetcher cannot read remote location {location}"
            )));
        };
        let content = tokio::fs::read(path).await?;
        debug!("Read {} bytes", content.len());
        Ok(content)
    }
}

/// Dispatches remote locations to HTTP and local ones to the file system.
#[derive(Debug, Clone)]
pub struct RoutingFetcher {
    http: HttpFetcher,
    file: FileFetcher,
}

impl RoutingFetcher {
    /// Creates a router over a configured HTTP client.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        Ok(Self {
            http: HttpFetcher::new(config)?,
            file: FileFetcher,
        })
    }
}

#[async_trait]
impl SourceFetcher for RoutingFetcher {
    async fn fetch(&self, location: &SourceLocation) -> Result<Vec<u8>> {
        match location {
            SourceLocation::Remote(_) => self.http.fetch(location).await,
            SourceLocation::Local(_) => self.file.fetch(location).await,
        }
    }
}

/// Fetches all four files one after another: users, friends, posts, reactions.
///
/// The first failure aborts the load; the error names the failing source.
#[instrument(skip_all)]
pub async fn fetch_all(fetcher: &dyn SourceFetcher, sources: &SourceSet) -> Result<RawSources> {
    Ok(RawSources {
        users: fetch_one(fetcher, sources, SourceKind::Users).await?,
        friends: fetch_one(fetcher, sources, SourceKind::Friends).await?,
        posts: fetch_one(fetcher, sources, SourceKind::Posts).await?,
        reactions: fetch_one(fetcher, sources, SourceKind::Reactions).await?,
    })
}

async fn fetch_one(
    fetcher: &dyn SourceFetcher,
    sources: &SourceSet,
    kind: SourceKind,
) -> Result<RawSource> {
    let location = sources.get(kind);
    let content = fetcher.fetch(location).await.map_err(|e| {
        DashError::network_with_source(format!("Failed to load {kind} source from {location}"), e)
    })?;
    info!("Loaded {} source ({} bytes) from {}", kind, content.len(), location);
    Ok(RawSource::new(kind, location.to_string(), content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;
    use mockall::Sequence;
    use std::io::Write;

    fn local(name: &str) -> SourceLocation {
        SourceLocation::Local(PathBuf::from(name))
    }

    fn local_set() -> SourceSet {
        SourceSet {
            users: local("users.csv"),
            friends: local("friends.csv"),
            posts: local("posts.csv"),
            reactions: local("reactions.csv"),
        }
    }

    #[test]
    fn test_location_classification() {
        assert!(matches!(
            SourceLocation::parse("https://example.com/users.csv").unwrap(),
            SourceLocation::Remote(_)
        ));
        assert_eq!(
            SourceLocation::parse("data/users.csv").unwrap(),
            local("data/users.csv")
        );
        assert_eq!(
            SourceLocation::parse("file:///tmp/users.csv").unwrap(),
            local("/tmp/users.csv")
        );
        assert!(SourceLocation::parse("ftp://example.com/users.csv").is_err());
    }

    #[test]
    fn test_source_set_from_default_config() {
        let set = SourceSet::from_config(&SourcesConfig::default()).unwrap();
        for kind in SourceKind::ALL {
            assert!(matches!(set.get(kind), SourceLocation::Remote(_)));
        }
        assert!(set.reactions.to_string().ends_with("reactions_table.csv"));
    }

    #[tokio::test]
    async fn test_fetch_all_in_order() {
        let mut fetcher = MockSourceFetcher::new();
        let mut seq = Sequence::new();
        for name in ["users.csv", "friends.csv", "posts.csv", "reactions.csv"] {
            fetcher
                .expect_fetch()
                .with(eq(local(name)))
                .times(1)
                .in_sequence(&mut seq)
                .returning(move |_| Ok(name.as_bytes().to_vec()));
        }

        let sources = fetch_all(&fetcher, &local_set()).await.unwrap();
        assert_eq!(sources.users.content, b"users.csv");
        assert_eq!(sources.reactions.kind, SourceKind::Reactions);
        assert_eq!(sources.posts.identifier, "posts.csv");
    }

    #[tokio::test]
    async fn test_fetch_all_names_failing_source() {
        let mut fetcher = MockSourceFetcher::new();
        fetcher
            .expect_fetch()
            .with(eq(local("users.csv")))
            .returning(|_| Ok(Vec::new()));
        fetcher
            .expect_fetch()
            .with(eq(local("friends.csv")))
            .returning(|_| Err(DashError::network_with_status("not found", 404)));

        let err = fetch_all(&fetcher, &local_set()).await.unwrap_err();
        assert!(err.to_string().contains("friends source"));
        assert!(matches!(err, DashError::Network { .. }));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[tokio::test]
    async fn test_file_fetcher_reads_local_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Friend 1,Friend 2\n1,2").unwrap();

        let location = SourceLocation::Local(file.path().to_path_buf());
        let content = FileFetcher.fetch(&location).await.unwrap();
        assert_eq!(content, b"Friend 1,Friend 2\n1,2");

        let missing = FileFetcher.fetch(&local("/definitely/not/here.csv")).await;
        assert!(matches!(missing, Err(DashError::Io(_))));
    }

    #[tokio::test]
    async fn test_http_fetcher_rejects_local_location() {
        let fetcher = HttpFetcher::new(&HttpConfig::default()).unwrap();
        let err = fetcher.fetch(&local("users.csv")).await.unwrap_err();
        assert!(matches!(err, DashError::Network { .. }));
    }

    #[tokio::test]
    async fn test_file_fetcher_rejects_remote_location() {
        let location = SourceLocation::Remote(Url::parse("https://example.com/users.csv").unwrap());
        let err = FileFetcher.fetch(&location).await.unwrap_err();
        assert!(matches!(err, DashError::Network { .. }));
        assert!(err.to_string().contains("remote location"));
    }
}
