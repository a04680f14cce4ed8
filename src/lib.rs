//! The library code for the `quire` static blog generator. A build is a
//! straight pipeline with no shared state between the steps:
//!
//! 1. Load the shared page template ([`crate::template`])
//! 2. Parse each post source and write its page ([`crate::post`],
//!    [`crate::markup`], [`crate::write`]), collecting a summary per post
//! 3. Write the index page from the summaries ([`crate::write`])
//! 4. Write the RSS feed from the same summaries ([`crate::feed`])
//!
//! [`crate::build::build_site`] runs all four against a [`crate::config::Config`].

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod build;
pub mod config;
pub mod feed;
pub mod markup;
pub mod post;
pub mod template;
pub mod write;
