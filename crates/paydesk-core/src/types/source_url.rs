//! Where a record source reads from.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use url::{Host, Url};

use crate::error::{Error, InvalidInputError};

/// A validated record source location.
///
/// Either the base of the gateway REST API (`https://`, or `http://` on a
/// loopback host) or a snapshot directory (`file:///path/to/snapshot`)
/// holding one JSON file per collection.
///
/// # Example
///
/// ```
/// use paydesk_core::SourceUrl;
///
/// let api: SourceUrl = "https://gateway.example.com/backoffice".parse().unwrap();
/// assert_eq!(
///     api.endpoint("api/transfers"),
///     "https://gateway.example.com/backoffice/api/transfers"
/// );
///
/// let snapshot = SourceUrl::new("file:///var/lib/paydesk/2024-05-10").unwrap();
/// assert!(snapshot.is_local());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceUrl {
    url: Url,
    snapshot_dir: Option<PathBuf>,
}

impl SourceUrl {
    /// Parse and validate a source location.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInputError::SourceUrl` for unparseable text, schemes
    /// other than `https`/`http`/`file`, plain HTTP to a remote host, API
    /// URLs without a host, and `file://` URLs that do not name a local
    /// directory below the filesystem root.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let input = s.as_ref().trim();
        let url = Url::parse(input).map_err(|e| rejected(input, e))?;

        let snapshot_dir = match url.scheme() {
            "file" => {
                let dir = url
                    .to_file_path()
                    .ok()
                    .filter(|path| path.parent().is_some())
                    .ok_or_else(|| rejected(input, "file:// URL must name a snapshot directory"))?;
                Some(dir)
            }
            "https" if url.host().is_some() => None,
            "http" if is_loopback(&url) => None,
            "https" => return Err(rejected(input, "API URL must have a host")),
            "http" => return Err(rejected(input, "plain HTTP is only allowed for localhost")),
            other => return Err(rejected(input, format!("unsupported scheme '{other}'"))),
        };

        Ok(Self { url, snapshot_dir })
    }

    /// Full URL of an API path below this base.
    ///
    /// Empty segments are dropped, so leading and trailing slashes on either
    /// side never double up.
    pub fn endpoint(&self, path: &str) -> String {
        let mut url = self.url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(path.split('/').filter(|segment| !segment.is_empty()));
        }
        url.into()
    }

    /// The snapshot directory for `file://` sources.
    pub fn snapshot_dir(&self) -> Option<&Path> {
        self.snapshot_dir.as_deref()
    }

    /// True for `file://` snapshot directories.
    pub fn is_local(&self) -> bool {
        self.snapshot_dir.is_some()
    }

    /// True for gateway API bases.
    pub fn is_network(&self) -> bool {
        !self.is_local()
    }
}

fn rejected(input: &str, reason: impl fmt::Display) -> Error {
    InvalidInputError::SourceUrl {
        value: input.to_string(),
        reason: reason.to_string(),
    }
    .into()
}

fn is_loopback(url: &Url) -> bool {
    match url.host() {
        Some(Host::Domain(name)) => name.eq_ignore_ascii_case("localhost"),
        Some(Host::Ipv4(ip)) => ip.is_loopback(),
        Some(Host::Ipv6(ip)) => ip.is_loopback(),
        None => false,
    }
}

impl fmt::Display for SourceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

impl FromStr for SourceUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
