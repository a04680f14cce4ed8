use crate::markup::{escape, href, EscapeHtml};
use crate::post::{Post, PostSummary};
use crate::template::Template;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// The page title of the index page.
pub const INDEX_TITLE: &str = "Home";

/// The file name of the index page inside the output directory.
pub const INDEX_FILE_NAME: &str = "index.html";

/// Responsible for templating and writing HTML pages to disk.
pub struct Writer<'a> {
    /// The template shared by post pages and the index page.
    pub template: &'a Template,

    /// The directory in which every page is written. Post pages land at
    /// `{output_directory}/{slug}.html` and the index at
    /// `{output_directory}/index.html`.
    pub output_directory: &'a Path,
}

impl Writer<'_> {
    /// Writes a single post page and returns its path. The page content is
    /// the title as an `<h2>` followed by the post body.
    pub fn write_post(&self, post: &Post) -> Result<PathBuf> {
        let title = escape(&post.title);
        let content = format!("<h2>{}</h2>\n{}", title, post.body);
        let file_path = self.output_directory.join(format!("{}.html", post.slug));
        self.write_page(&file_path, &title, &content)?;
        Ok(file_path)
    }

    /// Writes the index page listing `posts` in the given order and returns
    /// its path. An empty slice still produces an (empty) list.
    pub fn write_index(&self, posts: &[PostSummary]) -> Result<PathBuf> {
        let file_path = self.output_directory.join(INDEX_FILE_NAME);
        self.write_page(&file_path, INDEX_TITLE, &index_content(posts))?;
        Ok(file_path)
    }

    fn write_page(&self, file_path: &Path, title: &str, content: &str) -> Result<()> {
        std::fs::write(file_path, self.template.render(title, content)).map_err(|err| {
            Error::Io {
                path: file_path.to_owned(),
                err,
            }
        })
    }
}

/// Builds the `<ul>` listing for the index page: one `<li>` per post linking
/// to `{slug}.html` with the date beside the title.
fn index_content(posts: &[PostSummary]) -> String {
    let items: Vec<String> = posts
        .iter()
        .map(|post| {
            format!(
                r#"<li><a href="{}.html">{}</a> <small class="text-muted">{}</small></li>"#,
                href(&post.slug),
                EscapeHtml(&post.title),
                post.date.format("%Y-%m-%d"),
            )
        })
        .collect();
    format!("<ul class=\"list-unstyled\">\n{}\n</ul>", items.join("\n"))
}

/// The result of a fallible page-writing operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error in a page-writing operation.
#[derive(Debug)]
pub enum Error {
    /// An error writing an output file.
    Io { path: PathBuf, err: io::Error },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as presentable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io { path, err } => {
                write!(f, "writing '{}': {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { path: _, err } => Some(err),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;

    type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

    fn summary(title: &str, slug: &str, (y, m, d): (i32, u32, u32)) -> PostSummary {
        PostSummary {
            title: title.to_owned(),
            slug: slug.to_owned(),
            date: NaiveDate::from_ymd_opt(y, m, d).expect("valid date"),
        }
    }

    #[test]
    fn test_index_content_lists_posts_in_order() {
        let posts = vec![
            summary("B", "2023-02-01-b", (2023, 2, 1)),
            summary("A", "2023-01-01-a", (2023, 1, 1)),
        ];
        assert_eq!(
            "<ul class=\"list-unstyled\">\n\
             <li><a href=\"2023-02-01-b.html\">B</a> <small class=\"text-muted\">2023-02-01</small></li>\n\
             <li><a href=\"2023-01-01-a.html\">A</a> <small class=\"text-muted\">2023-01-01</small></li>\n\
             </ul>",
            index_content(&posts)
        );
    }

    #[test]
    fn test_index_content_empty() {
        assert_eq!("<ul class=\"list-unstyled\">\n\n</ul>", index_content(&[]));
    }

    #[test]
    fn test_index_content_escapes_title_and_href() {
        let posts = vec![summary("Q&A <live>", "2023-01-01-q a", (2023, 1, 1))];
        let content = index_content(&posts);
        assert!(content.contains(r#"href="2023-01-01-q%20a.html""#));
        assert!(content.contains(">Q&amp;A &lt;live&gt;</a>"));
    }

    #[test]
    fn test_write_post_and_index() -> TestResult {
        let dir = tempfile::tempdir()?;
        let template = Template::parse("<title>{title}</title>\n{content}")?;
        let writer = Writer {
            template: &template,
            output_directory: dir.path(),
        };

        let post = Post {
            title: "Tom & Jerry".to_owned(),
            slug: "2023-01-01-a".to_owned(),
            date: NaiveDate::from_ymd_opt(2023, 1, 1).expect("valid date"),
            body: "<p>Hello world</p>".to_owned(),
        };
        let path = writer.write_post(&post)?;
        assert_eq!(dir.path().join("2023-01-01-a.html"), path);
        assert_eq!(
            "<title>Tom &amp; Jerry</title>\n<h2>Tom &amp; Jerry</h2>\n<p>Hello world</p>",
            fs::read_to_string(&path)?
        );

        let path = writer.write_index(&[post.summarize()])?;
        assert_eq!(dir.path().join("index.html"), path);
        let index = fs::read_to_string(&path)?;
        assert!(index.starts_with("<title>Home</title>\n<ul class=\"list-unstyled\">"));
        assert!(index.contains(r#"<a href="2023-01-01-a.html">Tom &amp; Jerry</a>"#));
        Ok(())
    }

    #[test]
    fn test_write_into_missing_directory_fails() -> TestResult {
        let dir = tempfile::tempdir()?;
        let missing = dir.path().join("missing");
        let template = Template::parse("{content}")?;
        let writer = Writer {
            template: &template,
            output_directory: &missing,
        };
        match writer.write_index(&[]) {
            Err(Error::Io { path, .. }) => assert_eq!(missing.join("index.html"), path),
            Ok(_) => panic!("expected a write error"),
        }
        Ok(())
    }
}
