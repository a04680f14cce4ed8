//! Support for creating RSS 2.0 feeds from a list of posts.

use crate::markup::href;
use crate::post::PostSummary;
use rss::{Channel, ChannelBuilder, Error as RssError, Item, ItemBuilder};
use std::fmt;
use std::io::Write;
use url::Url;

/// The feed's channel title.
pub const CHANNEL_TITLE: &str = "My Blog";

/// The feed's channel description.
pub const CHANNEL_DESCRIPTION: &str = "Simple blog example";

/// Emitted in place of the site URL when no base URL is configured, to be
/// substituted by whatever deploys the output.
pub const BASE_URL_PLACEHOLDER: &str = "{base_url}";

/// The file name of the feed inside the output directory.
pub const FEED_FILE_NAME: &str = "rss.xml";

/// Bundled configuration for creating a feed.
pub struct FeedConfig {
    pub title: String,
    pub description: String,

    /// The site's public URL. `None` leaves [`BASE_URL_PLACEHOLDER`] in the
    /// output.
    pub base_url: Option<Url>,
}

impl FeedConfig {
    /// The fixed channel title and description with an optional base URL.
    pub fn new(base_url: Option<Url>) -> FeedConfig {
        FeedConfig {
            title: CHANNEL_TITLE.to_owned(),
            description: CHANNEL_DESCRIPTION.to_owned(),
            base_url,
        }
    }

    fn base(&self) -> &str {
        match &self.base_url {
            Some(url) => url.as_str().trim_end_matches('/'),
            None => BASE_URL_PLACEHOLDER,
        }
    }
}

/// Creates a feed from some configuration ([`FeedConfig`]) and a list of
/// [`PostSummary`]s and writes the result to a [`std::io::Write`]. Items keep
/// the order of `posts`.
pub fn write_feed<W: Write>(config: &FeedConfig, posts: &[PostSummary], w: W) -> Result<()> {
    feed(config, posts).write_to(w)?;
    Ok(())
}

fn feed(config: &FeedConfig, posts: &[PostSummary]) -> Channel {
    ChannelBuilder::default()
        .title(config.title.clone())
        .link(config.base().to_owned())
        .description(config.description.clone())
        .items(feed_items(config, posts))
        .build()
}

fn feed_items(config: &FeedConfig, posts: &[PostSummary]) -> Vec<Item> {
    posts
        .iter()
        .map(|post| {
            ItemBuilder::default()
                .title(post.title.clone())
                .link(format!("{}/{}.html", config.base(), link_path(&post.slug)))
                .pub_date(pub_date(post))
                .build()
        })
        .collect()
}

// The same escaping as the index page's `href`, minus the HTML entities: the
// XML writer escapes `&` and `'` itself.
fn link_path(slug: &str) -> String {
    href(slug).replace("&#x27;", "'").replace("&amp;", "&")
}

// Posts carry no time of day, so every item is published at midnight UTC.
fn pub_date(post: &PostSummary) -> String {
    format!("{} 00:00:00 +0000", post.date.format("%a, %d %b %Y"))
}

type Result<T> = std::result::Result<T, Error>;

/// Represents a problem creating a feed.
#[derive(Debug)]
pub enum Error {
    /// Returned when the feed can't be serialized or written.
    Rss(RssError),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Rss(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Rss(err) => Some(err),
        }
    }
}

impl From<RssError> for Error {
    /// Converts [`RssError`]s into [`Error`]. This allows us to use the `?`
    /// operator in fallible feed operations.
    fn from(err: RssError) -> Error {
        Error::Rss(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::NaiveDate;

    fn summary(title: &str, slug: &str, (y, m, d): (i32, u32, u32)) -> PostSummary {
        PostSummary {
            title: title.to_owned(),
            slug: slug.to_owned(),
            date: NaiveDate::from_ymd_opt(y, m, d).expect("valid date"),
        }
    }

    fn render(config: &FeedConfig, posts: &[PostSummary]) -> String {
        let mut out = Vec::new();
        write_feed(config, posts, &mut out).expect("writing to a Vec can't fail");
        String::from_utf8(out).expect("feed is UTF-8")
    }

    #[test]
    fn test_pub_date() {
        assert_eq!(
            "Thu, 05 Jan 2023 00:00:00 +0000",
            pub_date(&summary("x", "2023-01-05-x", (2023, 1, 5)))
        );
        assert_eq!(
            "Wed, 01 Feb 2023 00:00:00 +0000",
            pub_date(&summary("x", "2023-02-01-x", (2023, 2, 1)))
        );
    }

    #[test]
    fn test_feed_items_in_order_with_placeholder_links() {
        let posts = vec![
            summary("B", "2023-02-01-b", (2023, 2, 1)),
            summary("A", "2023-01-01-a", (2023, 1, 1)),
        ];
        let xml = render(&FeedConfig::new(None), &posts);

        assert!(xml.contains(r#"<rss version="2.0">"#));
        assert!(xml.contains("<title>My Blog</title>"));
        assert!(xml.contains("<link>{base_url}</link>"));
        assert!(xml.contains("<description>Simple blog example</description>"));
        assert_eq!(2, xml.matches("<item>").count());

        let b = xml.find("<link>{base_url}/2023-02-01-b.html</link>");
        let a = xml.find("<link>{base_url}/2023-01-01-a.html</link>");
        assert!(b.is_some() && a.is_some());
        assert!(b < a);
        assert!(xml.contains("<pubDate>Wed, 01 Feb 2023 00:00:00 +0000</pubDate>"));
    }

    #[test]
    fn test_feed_with_base_url() -> std::result::Result<(), url::ParseError> {
        let config = FeedConfig::new(Some(Url::parse("https://example.org/blog/")?));
        let xml = render(&config, &[summary("A", "2023-01-01-a", (2023, 1, 1))]);
        assert!(xml.contains("<link>https://example.org/blog</link>"));
        assert!(xml.contains("<link>https://example.org/blog/2023-01-01-a.html</link>"));
        assert!(!xml.contains(BASE_URL_PLACEHOLDER));
        Ok(())
    }

    #[test]
    fn test_feed_escapes_titles() {
        let xml = render(
            &FeedConfig::new(None),
            &[summary("Fish & <Chips>", "2023-01-01-f", (2023, 1, 1))],
        );
        assert!(xml.contains("Fish &amp; &lt;Chips&gt;"));
        assert!(!xml.contains("<Chips>"));
    }

    #[test]
    fn test_feed_links_escape_slugs_like_the_index() {
        let xml = render(
            &FeedConfig::new(None),
            &[
                summary("A", "2023-01-01-a b", (2023, 1, 1)),
                summary("Q", "2023-01-02-q&a", (2023, 1, 2)),
            ],
        );
        assert!(xml.contains("<link>{base_url}/2023-01-01-a%20b.html</link>"));
        assert!(!xml.contains("a b.html"));
        assert!(xml.contains("<link>{base_url}/2023-01-02-q&amp;a.html</link>"));
        assert!(!xml.contains("&amp;amp;"));
    }

    #[test]
    fn test_empty_feed() {
        let xml = render(&FeedConfig::new(None), &[]);
        assert!(xml.contains("<channel>"));
        assert_eq!(0, xml.matches("<item>").count());
    }
}
