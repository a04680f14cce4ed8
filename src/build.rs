//! Exports the [`build_site`] function which stitches together the high-level
//! steps of building the output static site: loading the template
//! ([`crate::template`]), parsing and writing each post ([`crate::post`],
//! [`crate::write`]), writing the index page, and generating the RSS feed
//! ([`crate::feed`]).

use crate::config::Config;
use crate::feed::{Error as FeedError, *};
use crate::post::{self, Error as ParseError, Post, PostSummary};
use crate::template::{Error as TemplateError, Template};
use crate::write::{Error as WriteError, Writer};
use chrono::{Local, NaiveDate};
use log::{debug, info};
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Builds the site from a [`Config`] object and returns the summaries of every
/// post written, newest file name first. This calls into [`build_posts`],
/// [`Writer::write_index`] and [`write_feed`] which do the heavy-lifting.
///
/// The output directory is created if needed but never cleaned. A failure
/// part-way through leaves whatever was already written on disk.
pub fn build_site(config: &Config) -> Result<Vec<PostSummary>> {
    info!(
        "building site from '{}' into '{}'",
        config.posts_source_directory.display(),
        config.output_directory.display()
    );

    std::fs::create_dir_all(&config.output_directory).map_err(|err| Error::CreateDir {
        path: config.output_directory.clone(),
        err,
    })?;

    let template = Template::load(&config.template_path)?;
    let writer = Writer {
        template: &template,
        output_directory: &config.output_directory,
    };

    let posts = build_posts(&config.posts_source_directory, &writer, today())?;
    writer.write_index(&posts)?;

    let feed_path = config.output_directory.join(FEED_FILE_NAME);
    let feed_file = File::create(&feed_path).map_err(|err| Error::Io {
        path: feed_path.clone(),
        err,
    })?;
    write_feed(&FeedConfig::new(config.base_url.clone()), &posts, feed_file)?;

    info!("wrote {} posts, index and feed", posts.len());
    Ok(posts)
}

/// Parses and writes every post source in `source_directory`, in descending
/// file name order. Empty sources are skipped. Posts without a date prefix
/// are dated `today`.
pub fn build_posts(
    source_directory: &Path,
    writer: &Writer,
    today: NaiveDate,
) -> Result<Vec<PostSummary>> {
    let mut posts = Vec::new();
    for path in post::sources(source_directory)? {
        if let Some(summary) = build_post(&path, writer, today)? {
            posts.push(summary);
        }
    }
    Ok(posts)
}

/// Parses and writes a single post source. Returns `Ok(None)` without writing
/// anything when the source is empty.
pub fn build_post(path: &Path, writer: &Writer, today: NaiveDate) -> Result<Option<PostSummary>> {
    let slug = post::slug_from_path(path)?;
    let source = std::fs::read_to_string(path).map_err(|err| ParseError::Read {
        path: path.to_owned(),
        err,
    })?;

    match Post::from_source(&slug, &source, today) {
        None => {
            debug!("{}: empty, skipped", path.display());
            Ok(None)
        }
        Some(post) => {
            let output = writer.write_post(&post)?;
            debug!("{}: wrote '{}'", path.display(), output.display());
            Ok(Some(post.summarize()))
        }
    }
}

fn today() -> NaiveDate {
    Local::now().naive_local().date()
}

type Result<T> = std::result::Result<T, Error>;

/// The error type for building a site. Errors can be during template loading,
/// parsing, writing pages, writing the feed, and other I/O.
#[derive(Debug)]
pub enum Error {
    /// Returned for errors loading the template.
    Template(TemplateError),

    /// Returned for errors finding or reading post sources.
    Parse(ParseError),

    /// Returned for errors writing post and index pages to disk.
    Write(WriteError),

    /// Returned for errors writing the feed.
    Feed(FeedError),

    /// Returned when the output directory can't be created.
    CreateDir { path: PathBuf, err: std::io::Error },

    /// Returned for other I/O errors.
    Io { path: PathBuf, err: std::io::Error },
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Template(err) => err.fmt(f),
            Error::Parse(err) => err.fmt(f),
            Error::Write(err) => err.fmt(f),
            Error::Feed(err) => write!(f, "writing feed: {}", err),
            Error::CreateDir { path, err } => {
                write!(f, "Creating directory '{}': {}", path.display(), err)
            }
            Error::Io { path, err } => write!(f, "'{}': {}", path.display(), err),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Template(err) => Some(err),
            Error::Parse(err) => Some(err),
            Error::Write(err) => Some(err),
            Error::Feed(err) => Some(err),
            Error::CreateDir { path: _, err } => Some(err),
            Error::Io { path: _, err } => Some(err),
        }
    }
}

impl From<TemplateError> for Error {
    /// Converts [`TemplateError`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: TemplateError) -> Error {
        Error::Template(err)
    }
}

impl From<ParseError> for Error {
    /// Converts [`ParseError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: ParseError) -> Error {
        Error::Parse(err)
    }
}

impl From<WriteError> for Error {
    /// Converts [`WriteError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: WriteError) -> Error {
        Error::Write(err)
    }
}

impl From<FeedError> for Error {
    /// Converts [`FeedError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: FeedError) -> Error {
        Error::Feed(err)
    }
}
