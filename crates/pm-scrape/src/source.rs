//! The boundaries the generator calls into for external text and images.

use image::DynamicImage;

use crate::fetch::Fetched;

/// Something that turns a page key into plain prose.
pub trait TextSource {
    /// The stable locator (usually a URL) for a page key. Used as the
    /// negative-cache key.
    fn locate(&self, page: &str) -> String;

    /// Fetch the plain-text paragraphs of a page.
    fn fetch(&mut self, page: &str) -> Fetched<String>;
}

/// Something that can list and download raster images for a corpus id.
pub trait ImageSource {
    /// Candidate image URLs for an image-corpus identifier.
    fn image_urls(&mut self, corpus_id: &str) -> Fetched<Vec<String>>;

    /// Download and decode one image.
    fn image(&mut self, url: &str) -> Fetched<DynamicImage>;
}

/// A text source that never finds anything. Used for offline runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineText;

impl TextSource for OfflineText {
    fn locate(&self, page: &str) -> String {
        format!("offline:{page}")
    }

    fn fetch(&mut self, _page: &str) -> Fetched<String> {
        Fetched::NotFound
    }
}

/// An image source that never finds anything. Used for offline runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineImages;

impl ImageSource for OfflineImages {
    fn image_urls(&mut self, _corpus_id: &str) -> Fetched<Vec<String>> {
        Fetched::NotFound
    }

    fn image(&mut self, _url: &str) -> Fetched<DynamicImage> {
        Fetched::NotFound
    }
}
