//! Converts the line-based post markup into an HTML fragment.
//!
//! The dialect is small: the first line is the title, a line starting with
//! `# ` is a heading, a blank line ends a paragraph, and every other line is
//! paragraph text. There are no links, lists, emphasis or code blocks.

use pulldown_cmark::escape::{escape_href, escape_html, StrWrite};
use std::fmt::{self, Display};
use std::io;

/// The marker introducing a heading line within the body.
const HEADING_MARKER: &str = "# ";

/// The output of [`to_html`] for a non-empty source.
#[derive(Clone, Debug, PartialEq)]
pub struct Rendered {
    /// The first line with leading `#`s and surrounding whitespace removed.
    /// This is raw text; escape it before putting it into markup.
    pub title: String,

    /// The body as `<h1>` and `<p>` elements separated by newlines. All text
    /// content is already escaped.
    pub body: String,
}

/// Parses `source` in a single forward pass. Returns `None` when the source has
/// no lines at all, which callers treat as "skip this post".
pub fn to_html(source: &str) -> Option<Rendered> {
    let mut lines = lines(source).into_iter();
    let title = lines.next()?.trim_start_matches('#').trim().to_owned();

    let mut elements: Vec<String> = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();
    for line in lines {
        if let Some(heading) = line.strip_prefix(HEADING_MARKER) {
            flush_paragraph(&mut paragraph, &mut elements);
            elements.push(format!("<h1>{}</h1>", EscapeHtml(heading)));
        } else if line.is_empty() {
            flush_paragraph(&mut paragraph, &mut elements);
        } else {
            paragraph.push(line);
        }
    }
    flush_paragraph(&mut paragraph, &mut elements);

    Some(Rendered {
        title,
        body: elements.join("\n"),
    })
}

/// Splits `source` into lines ended by `\n`, `\r\n` or a lone `\r`, without
/// the terminators. A final terminator doesn't start an extra empty line.
pub fn lines(source: &str) -> Vec<&str> {
    let bytes = source.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&source[start..i]);
                i += 1;
                start = i;
            }
            b'\r' => {
                lines.push(&source[start..i]);
                i += if bytes.get(i + 1) == Some(&b'\n') { 2 } else { 1 };
                start = i;
            }
            _ => i += 1,
        }
    }
    if start < source.len() {
        lines.push(&source[start..]);
    }
    lines
}

// Emits the buffered lines as a single `<p>` and clears the buffer. An empty
// buffer emits nothing.
fn flush_paragraph(paragraph: &mut Vec<&str>, elements: &mut Vec<String>) {
    if paragraph.is_empty() {
        return;
    }
    elements.push(format!("<p>{}</p>", EscapeHtml(&paragraph.join(" "))));
    paragraph.clear();
}

/// Escapes text for use in HTML element content or quoted attribute values.
pub fn escape(s: &str) -> String {
    EscapeHtml(s).to_string()
}

/// Escapes a link target for use in a quoted `href` attribute: unsafe
/// characters are percent-encoded and `&` and `'` become entities.
pub fn href(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    // writing into a `String` can't fail
    let _ = escape_href(&mut out, s);
    out
}

/// Wraps a string so that its [`Display`] output is HTML-escaped: `&`, `<`,
/// `>` and `"` go through [`escape_html`] and `'` becomes `&#x27;`.
pub struct EscapeHtml<'a>(pub &'a str);

impl Display for EscapeHtml<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut adaptor = Adaptor {
            formatter: f,
            result: Ok(()),
        };
        for (i, part) in self.0.split('\'').enumerate() {
            if i > 0 && adaptor.write_str("&#x27;").is_err() {
                break;
            }
            if escape_html(&mut adaptor, part).is_err() {
                break;
            }
        }
        adaptor.result
    }
}

// Lets `pulldown_cmark`'s escaping functions write straight into a
// `fmt::Formatter`, remembering the underlying `fmt::Error`.
struct Adaptor<'a, T> {
    formatter: &'a mut T,
    result: fmt::Result,
}

impl<T> Adaptor<'_, T> {
    fn handle_result(&mut self, result: fmt::Result) -> io::Result<()> {
        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                self.result = result;
                Err(io::Error::new(io::ErrorKind::Other, e))
            }
        }
    }
}

impl<T: fmt::Write> StrWrite for Adaptor<'_, T> {
    fn write_str(&mut self, s: &str) -> io::Result<()> {
        let result = self.formatter.write_str(s);
        self.handle_result(result)
    }

    fn write_fmt(&mut self, args: fmt::Arguments) -> io::Result<()> {
        let result = self.formatter.write_fmt(args);
        self.handle_result(result)
    }
}
