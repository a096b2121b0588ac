//! Gist references and the URLs they resolve to.
//!
//! A reference is written `[owner/]id [filename]`:
//!
//! - `jbrains/4111662 TestingIoFailure.java`
//! - `4111662 TestingIoFailure.java`
//! - `jbrains/4111662`
//! - `4111662`

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

static REFERENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:([^\s/]+)/)?(\d+)(?:\s+(\S+))?$").unwrap());

/// Error parsing a gist reference.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ReferenceError {
    /// Text does not have the `[owner/]id [filename]` shape.
    #[error("invalid gist reference {0:?}: expected [owner/]id [filename]")]
    Malformed(String),

    /// The ID is all digits but does not fit an integer.
    #[error("invalid gist ID {id:?}")]
    InvalidId {
        /// ID text as written.
        id: String,
        /// Integer parsing failure.
        #[source]
        source: ParseIntError,
    },
}

/// Identifies a gist, and optionally one file in it.
///
/// # Example
///
/// ```
/// use octoblock_gist::GistReference;
///
/// let reference: GistReference = "jbrains/1234 Gist1.java".parse().unwrap();
/// assert_eq!(reference.id(), 1234);
/// assert_eq!(reference.owner(), Some("jbrains"));
/// assert_eq!(reference.filename(), Some("Gist1.java"));
/// assert_eq!(reference.raw_path(), "/jbrains/1234/raw/Gist1.java");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GistReference {
    id: i64,
    owner: Option<String>,
    filename: Option<String>,
}

impl GistReference {
    /// Reference the gist with the given ID and no owner or filename.
    #[must_use]
    pub fn new(id: i64) -> Self {
        Self {
            id,
            owner: None,
            filename: None,
        }
    }

    /// Set the gist owner.
    #[must_use]
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Set the file within the gist.
    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    #[must_use]
    pub fn id(&self) -> i64 {
        self.id
    }

    #[must_use]
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Path serving the raw file contents.
    ///
    /// - with owner: `/{owner}/{id}/raw[/{filename}]`
    /// - without owner: `/raw/{id}[/{filename}]`
    #[must_use]
    pub fn raw_path(&self) -> String {
        let mut path = match &self.owner {
            Some(owner) => format!("/{owner}/{}/raw", self.id),
            None => format!("/raw/{}", self.id),
        };
        if let Some(filename) = &self.filename {
            path.push('/');
            path.push_str(filename);
        }
        path
    }

    /// Path of the gist page, for display. Never includes the filename.
    #[must_use]
    pub fn pretty_path(&self) -> String {
        match &self.owner {
            Some(owner) => format!("/{owner}/{}", self.id),
            None => format!("/{}", self.id),
        }
    }

    /// Absolute raw URL under `base_url`.
    #[must_use]
    pub fn raw_url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.raw_path())
    }

    /// Absolute gist page URL under `base_url`.
    #[must_use]
    pub fn pretty_url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.pretty_path())
    }
}

impl FromStr for GistReference {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = REFERENCE_RE
            .captures(s.trim())
            .ok_or_else(|| ReferenceError::Malformed(s.to_owned()))?;
        let id_text = caps
            .get(2)
            .ok_or_else(|| ReferenceError::Malformed(s.to_owned()))?
            .as_str();
        let id = id_text.parse().map_err(|source| ReferenceError::InvalidId {
            id: id_text.to_owned(),
            source,
        })?;

        Ok(Self {
            id,
            owner: caps.get(1).map(|m| m.as_str().to_owned()),
            filename: caps.get(3).map(|m| m.as_str().to_owned()),
        })
    }
}

impl fmt::Display for GistReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(owner) = &self.owner {
            write!(f, "{owner}/")?;
        }
        write!(f, "{}", self.id)?;
        if let Some(filename) = &self.filename {
            write!(f, " {filename}")?;
        }
        Ok(())
    }
}
