//! Defines the [`Template`] type: the shared page skeleton with `{title}` and
//! `{content}` substitution points.
//!
//! The placeholder syntax is deliberately tiny. `{title}` and `{content}` are
//! replaced verbatim, `{{` and `}}` produce literal braces, and anything else
//! inside braces is rejected when the template is loaded rather than when the
//! first page is rendered.

use std::fmt;
use std::path::{Path, PathBuf};

/// A parsed page template. Loaded once and shared by reference across every
/// render.
#[derive(Clone, Debug, PartialEq)]
pub struct Template {
    segments: Vec<Segment>,
}

#[derive(Clone, Debug, PartialEq)]
enum Segment {
    Literal(String),
    Title,
    Content,
}

impl Template {
    /// Reads and parses the template file at `path`. The build cannot proceed
    /// without a template, so callers should treat any error as fatal.
    pub fn load(path: &Path) -> Result<Template> {
        let contents =
            std::fs::read_to_string(path).map_err(|err| Error::Open {
                path: path.to_owned(),
                err,
            })?;
        Template::parse(&contents)
            .map_err(|err| Error::Annotated(path.to_owned(), Box::new(err)))
    }

    /// Parses template text into literal and placeholder segments.
    pub fn parse(input: &str) -> Result<Template> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = input.char_indices().peekable();

        while let Some((offset, c)) = chars.next() {
            match c {
                '{' if matches!(chars.peek(), Some((_, '{'))) => {
                    chars.next();
                    literal.push('{');
                }
                '}' if matches!(chars.peek(), Some((_, '}'))) => {
                    chars.next();
                    literal.push('}');
                }
                '}' => return Err(Error::UnmatchedBrace(offset)),
                '{' => {
                    let rest = &input[offset + 1..];
                    let close = rest.find('}').ok_or(Error::UnclosedPlaceholder(offset))?;
                    let segment = match &rest[..close] {
                        "title" => Segment::Title,
                        "content" => Segment::Content,
                        name => return Err(Error::UnknownPlaceholder(name.to_owned())),
                    };
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(segment);

                    // skip the placeholder name and its closing brace
                    for _ in 0..=rest[..close].chars().count() {
                        chars.next();
                    }
                }
                _ => literal.push(c),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        Ok(Template { segments })
    }

    /// Fills the placeholders. Neither argument is escaped; callers are
    /// responsible for escaping anything derived from post sources.
    pub fn render(&self, title: &str, content: &str) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            out.push_str(match segment {
                Segment::Literal(s) => s,
                Segment::Title => title,
                Segment::Content => content,
            });
        }
        out
    }
}

/// The result of a fallible template operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a problem loading or parsing a [`Template`].
#[derive(Debug)]
pub enum Error {
    /// Returned when the template file can't be read.
    Open { path: PathBuf, err: std::io::Error },

    /// Returned when a `{` has no matching `}`. Holds the byte offset.
    UnclosedPlaceholder(usize),

    /// Returned for a lone `}` that isn't part of `}}`. Holds the byte offset.
    UnmatchedBrace(usize),

    /// Returned for a placeholder other than `title` or `content`.
    UnknownPlaceholder(String),

    /// A parse error annotated with the template's path.
    Annotated(PathBuf, Box<Error>),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Open { path, err } => {
                write!(f, "Opening template file '{}': {}", path.display(), err)
            }
            Error::UnclosedPlaceholder(offset) => {
                write!(f, "unclosed placeholder starting at byte {}", offset)
            }
            Error::UnmatchedBrace(offset) => {
                write!(f, "single '}}' encountered at byte {}", offset)
            }
            Error::UnknownPlaceholder(name) => {
                write!(f, "unknown placeholder `{{{}}}`", name)
            }
            Error::Annotated(path, err) => {
                write!(f, "parsing template '{}': {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Open { path: _, err } => Some(err),
            Error::Annotated(_, err) => Some(err),
            _ => None,
        }
    }
}
