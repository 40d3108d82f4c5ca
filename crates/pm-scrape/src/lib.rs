//! Best-effort retrieval of encyclopedia text and corpus images.
//!
//! Every network call returns a [`Fetched`] value instead of an error, so
//! callers can fall through to the next candidate source. The [`Scraper`]
//! wraps the raw sources with bounded retries, a permanent text memo, and
//! negative caches that are persisted to disk as soon as a bad URL or id
//! is discovered.

pub mod config;
pub mod error;
pub mod fetch;
pub mod imagenet;
pub mod negative;
pub mod scraper;
pub mod source;
pub mod sprite;
pub mod wikipedia;

pub use config::ScrapeConfig;
pub use error::{ScrapeError, ScrapeResult};
pub use fetch::Fetched;
pub use imagenet::ImageNetSource;
pub use negative::NegativeCache;
pub use scraper::Scraper;
pub use source::{ImageSource, OfflineImages, OfflineText, TextSource};
pub use sprite::to_sprite;
pub use wikipedia::WikipediaSource;
