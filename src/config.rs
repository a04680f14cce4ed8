//! Defines the [`Config`] type which carries every path and URL the build
//! needs. Nothing is read from a configuration file; the defaults are the fixed
//! `posts/`, `templates/base.html` and `docs/` locations relative to a project
//! root.

use std::path::{Path, PathBuf};
use url::Url;

/// The directory (relative to the project root) holding post sources.
pub const POSTS_DIRECTORY: &str = "posts";

/// The path (relative to the project root) of the shared page template.
pub const TEMPLATE_PATH: &str = "templates/base.html";

/// The directory (relative to the project root) receiving generated output.
pub const OUTPUT_DIRECTORY: &str = "docs";

/// The file extension identifying post sources.
pub const POST_EXTENSION: &str = "md";

/// Everything [`crate::build::build_site`] needs to know about where to read
/// and write.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// The directory searched (non-recursively) for `*.md` post sources.
    pub posts_source_directory: PathBuf,

    /// The shared HTML template with `{title}` and `{content}` placeholders.
    pub template_path: PathBuf,

    /// The directory receiving `<slug>.html`, `index.html` and `rss.xml`.
    pub output_directory: PathBuf,

    /// The public URL of the site. When `None`, the feed carries the literal
    /// `{base_url}` placeholder for a later deployment step to fill in.
    pub base_url: Option<Url>,
}

impl Config {
    /// Builds a [`Config`] whose paths are the fixed layout rooted at `root`.
    pub fn from_directory(root: &Path) -> Config {
        Config {
            posts_source_directory: root.join(POSTS_DIRECTORY),
            template_path: root.join(TEMPLATE_PATH),
            output_directory: root.join(OUTPUT_DIRECTORY),
            base_url: None,
        }
    }

    /// Sets the site's public URL, which the feed then uses in place of the
    /// `{base_url}` placeholder.
    pub fn with_base_url(mut self, base_url: Url) -> Config {
        self.base_url = Some(base_url);
        self
    }
}

impl Default for Config {
    /// The fixed layout relative to the current working directory.
    fn default() -> Self {
        Config::from_directory(Path::new(""))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_default_uses_fixed_relative_paths() {
        let config = Config::default();
        assert_eq!(PathBuf::from("posts"), config.posts_source_directory);
        assert_eq!(PathBuf::from("templates/base.html"), config.template_path);
        assert_eq!(PathBuf::from("docs"), config.output_directory);
        assert_eq!(None, config.base_url);
    }

    #[test]
    fn test_from_directory_roots_paths() -> Result<(), url::ParseError> {
        let config = Config::from_directory(Path::new("/srv/blog"))
            .with_base_url(Url::parse("https://example.org/blog/")?);
        assert_eq!(
            PathBuf::from("/srv/blog/posts"),
            config.posts_source_directory
        );
        assert_eq!(
            PathBuf::from("/srv/blog/templates/base.html"),
            config.template_path
        );
        assert_eq!(PathBuf::from("/srv/blog/docs"), config.output_directory);
        assert_eq!(
            Some("https://example.org/blog/"),
            config.base_url.as_ref().map(Url::as_str)
        );
        Ok(())
    }
}
