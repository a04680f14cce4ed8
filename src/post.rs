//! Defines the [`Post`] and [`PostSummary`] types and the logic for finding
//! post sources on disk and turning one into a [`Post`].
//!
//! Post sources are named `YYYY-MM-DD-some-words.md`. The file stem is the
//! post's slug, and the date is read back out of the slug's first three
//! `-`-separated tokens.

use crate::config::POST_EXTENSION;
use crate::markup;
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::fmt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A post parsed from a source file. Only lives long enough to be written to
/// disk and summarized.
#[derive(Clone, Debug, PartialEq)]
pub struct Post {
    /// The post title (unescaped).
    pub title: String,

    /// The source file's stem. Used as the output file name and link path.
    pub slug: String,

    /// The date from the slug, or the fallback date if the slug doesn't start
    /// with one.
    pub date: NaiveDate,

    /// The rendered HTML body fragment.
    pub body: String,
}

/// The metadata kept for each post once its page is written. The index and
/// the feed are built from a list of these.
#[derive(Clone, Debug, PartialEq)]
pub struct PostSummary {
    pub title: String,
    pub slug: String,
    pub date: NaiveDate,
}

impl Post {
    /// Parses a post from its slug and source text. Returns `None` for an
    /// empty source. `fallback_date` is used when [`date_from_slug`] can't find
    /// a date.
    pub fn from_source(slug: &str, source: &str, fallback_date: NaiveDate) -> Option<Post> {
        let rendered = markup::to_html(source)?;
        Some(Post {
            title: rendered.title,
            slug: slug.to_owned(),
            date: date_from_slug(slug).unwrap_or(fallback_date),
            body: rendered.body,
        })
    }

    /// Drops the body, keeping only what the index and feed need.
    pub fn summarize(self) -> PostSummary {
        PostSummary {
            title: self.title,
            slug: self.slug,
            date: self.date,
        }
    }
}

/// Parses the first three `-`-separated tokens of `slug` as a `YYYY-MM-DD`
/// date. Returns `None` if there aren't three tokens or they aren't a valid
/// date.
///
/// The year must be exactly four ASCII digits and the month and day one or
/// two. chrono alone would also take short years and a leading sign.
pub fn date_from_slug(slug: &str) -> Option<NaiveDate> {
    let prefix: Vec<&str> = slug.split('-').take(3).collect();
    match prefix.as_slice() {
        [year, month, day]
            if is_digits(year, 4..=4)
                && is_digits(month, 1..=2)
                && is_digits(day, 1..=2) =>
        {
            NaiveDate::parse_from_str(&prefix.join("-"), "%Y-%m-%d").ok()
        }
        _ => None,
    }
}

fn is_digits(token: &str, len: std::ops::RangeInclusive<usize>) -> bool {
    len.contains(&token.len()) && token.bytes().all(|b| b.is_ascii_digit())
}

/// Returns the slug for a post source: its file name less the extension.
pub fn slug_from_path(path: &Path) -> Result<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_owned)
        .ok_or_else(|| Error::InvalidFileName(path.to_owned()))
}

/// Lists the post sources (files ending in `.md`) directly inside
/// `source_directory`, ordered by file name descending. With date-prefixed
/// names this puts the newest post first.
pub fn sources(source_directory: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for result in WalkDir::new(source_directory)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by(|a, b| descending(a.file_name(), b.file_name()))
    {
        let entry = result?;
        let is_post = entry.path().extension().map_or(false, |ext| ext == POST_EXTENSION);
        if is_post && entry.file_type().is_file() {
            paths.push(entry.into_path());
        }
    }
    Ok(paths)
}

fn descending(a: &std::ffi::OsStr, b: &std::ffi::OsStr) -> Ordering {
    b.cmp(a)
}

/// Represents the result of a [`Post`]-parse operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error finding or reading post sources.
#[derive(Debug)]
pub enum Error {
    /// Returned when the posts directory can't be walked.
    WalkDir(walkdir::Error),

    /// Returned when a source file can't be read.
    Read { path: PathBuf, err: std::io::Error },

    /// Returned when a source file's name isn't valid UTF-8.
    InvalidFileName(PathBuf),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::WalkDir(err) => write!(f, "listing posts: {}", err),
            Error::Read { path, err } => {
                write!(f, "reading post '{}': {}", path.display(), err)
            }
            Error::InvalidFileName(path) => {
                write!(f, "invalid file name: {:?}", path)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::WalkDir(err) => Some(err),
            Error::Read { path: _, err } => Some(err),
            Error::InvalidFileName(_) => None,
        }
    }
}

impl From<walkdir::Error> for Error {
    /// Converts a [`walkdir::Error`] into an [`Error`]. It allows us to use
    /// the `?` operator while listing the posts directory.
    fn from(err: walkdir::Error) -> Error {
        Error::WalkDir(err)
    }
}
