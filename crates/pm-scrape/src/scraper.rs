//! Retrying, memoizing front end over the raw sources.

use std::collections::HashMap;

use image::RgbaImage;

use crate::config::{BAD_IMAGE_IDS_FILE, BAD_IMAGE_URLS_FILE, BAD_TEXT_URLS_FILE, ScrapeConfig};
use crate::error::ScrapeResult;
use crate::fetch::{Fetched, with_retries};
use crate::imagenet::ImageNetSource;
use crate::negative::NegativeCache;
use crate::source::{ImageSource, OfflineImages, OfflineText, TextSource};
use crate::sprite::to_sprite;
use crate::wikipedia::WikipediaSource;

/// Owns the sources plus every run-level retrieval cache.
///
/// The text cache never evicts: a page fetched once is reused for the rest
/// of the run. The three negative caches are consulted before any network
/// call and appended to disk as soon as something new goes bad.
pub struct Scraper {
    text: Box<dyn TextSource>,
    images: Box<dyn ImageSource>,
    max_attempts: u32,
    pages: HashMap<String, String>,
    bad_text: NegativeCache,
    bad_image_urls: NegativeCache,
    bad_image_ids: NegativeCache,
}

impl std::fmt::Debug for Scraper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scraper")
            .field("pages", &self.pages.len())
            .field("bad_text", &self.bad_text.len())
            .field("bad_image_urls", &self.bad_image_urls.len())
            .field("bad_image_ids", &self.bad_image_ids.len())
            .finish()
    }
}

fn open_cache(config: &ScrapeConfig, file: &str) -> ScrapeResult<NegativeCache> {
    match config.cache_file(file) {
        Some(path) => NegativeCache::open(&path),
        None => Ok(NegativeCache::in_memory()),
    }
}

impl Scraper {
    /// Wrap the given sources, loading any persisted negative caches.
    pub fn new(
        config: &ScrapeConfig,
        text: Box<dyn TextSource>,
        images: Box<dyn ImageSource>,
    ) -> ScrapeResult<Self> {
        Ok(Self {
            text,
            images,
            max_attempts: config.max_attempts,
            pages: HashMap::new(),
            bad_text: open_cache(config, BAD_TEXT_URLS_FILE)?,
            bad_image_urls: open_cache(config, BAD_IMAGE_URLS_FILE)?,
            bad_image_ids: open_cache(config, BAD_IMAGE_IDS_FILE)?,
        })
    }

    /// Scraper over the live encyclopedia and image corpus.
    pub fn online(config: &ScrapeConfig) -> ScrapeResult<Self> {
        Self::new(
            config,
            Box::new(WikipediaSource::new(config)?),
            Box::new(ImageNetSource::new(config)?),
        )
    }

    /// Scraper whose sources never find anything.
    pub fn offline(config: &ScrapeConfig) -> ScrapeResult<Self> {
        Self::new(config, Box::new(OfflineText), Box::new(OfflineImages))
    }

    /// Known-bad encyclopedia locators.
    pub fn bad_text(&self) -> &NegativeCache {
        &self.bad_text
    }

    /// Known-bad image URLs.
    pub fn bad_image_urls(&self) -> &NegativeCache {
        &self.bad_image_urls
    }

    /// Known-bad image-corpus ids.
    pub fn bad_image_ids(&self) -> &NegativeCache {
        &self.bad_image_ids
    }

    /// Plain text of a page, or `None` if it is unavailable.
    ///
    /// Cached pages are returned without a network call; known-bad pages
    /// are skipped outright. A page that fails (after retries) is added to
    /// the negative cache.
    pub fn page_text(&mut self, page: &str) -> Option<String> {
        let page = page.trim();
        if page.is_empty() {
            return None;
        }
        if let Some(text) = self.pages.get(page) {
            return Some(text.clone());
        }
        let url = self.text.locate(page);
        if self.bad_text.contains(&url) {
            return None;
        }

        let text = &mut self.text;
        match with_retries(self.max_attempts, &url, || text.fetch(page)) {
            Fetched::Found(body) => {
                tracing::debug!(page, chars = body.len(), "fetched page");
                self.pages.insert(page.to_string(), body.clone());
                Some(body)
            }
            outcome => {
                mark_bad(&mut self.bad_text, &url, &outcome);
                None
            }
        }
    }

    /// Download up to `want` images for a corpus id and turn them into sprites.
    ///
    /// Every unusable URL is remembered; if the id itself has no URL list,
    /// the id is remembered. The result may be shorter than `want`.
    pub fn crawl_sprites(&mut self, corpus_id: &str, want: usize, size: u32) -> Vec<RgbaImage> {
        let mut sprites = Vec::new();
        if want == 0 || corpus_id.trim().is_empty() || self.bad_image_ids.contains(corpus_id) {
            return sprites;
        }

        let images = &mut self.images;
        let urls = match with_retries(self.max_attempts, corpus_id, || images.image_urls(corpus_id)) {
            Fetched::Found(urls) => urls,
            outcome => {
                mark_bad(&mut self.bad_image_ids, corpus_id, &outcome);
                return sprites;
            }
        };

        for url in urls {
            if sprites.len() >= want {
                break;
            }
            if self.bad_image_urls.contains(&url) {
                continue;
            }
            let images = &mut self.images;
            match with_retries(self.max_attempts, &url, || images.image(&url)) {
                Fetched::Found(img) => sprites.push(to_sprite(&img, size)),
                outcome => mark_bad(&mut self.bad_image_urls, &url, &outcome),
            }
        }

        if sprites.len() < want {
            tracing::warn!(corpus_id, got = sprites.len(), want, "image pool under-filled");
        }
        sprites
    }
}

fn mark_bad<T>(cache: &mut NegativeCache, key: &str, outcome: &Fetched<T>) {
    let reason = match outcome {
        Fetched::Transient(reason) => reason.as_str(),
        _ => "not found",
    };
    tracing::warn!(key, reason, "marking source as bad");
    if let Err(e) = cache.insert(key) {
        // Losing a negative entry only costs a refetch next run.
        tracing::warn!(key, error = %e, "cannot persist negative cache entry");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgba};
    use std::cell::Cell;
    use std::rc::Rc;
    use tempfile::TempDir;

    /// Text source that answers from a fixed table and counts calls.
    struct Canned {
        calls: Rc<Cell<u32>>,
        transient_for: Option<&'static str>,
    }

    impl TextSource for Canned {
        fn locate(&self, page: &str) -> String {
            format!("wiki://{page}")
        }

        fn fetch(&mut self, page: &str) -> Fetched<String> {
            self.calls.set(self.calls.get() + 1);
            if Some(page) == self.transient_for {
                return Fetched::Transient("timed out".into());
            }
            match page {
                "Fox" => Fetched::Found("Foxes are small.".into()),
                _ => Fetched::NotFound,
            }
        }
    }

    struct Pictures {
        calls: Rc<Cell<u32>>,
    }

    impl ImageSource for Pictures {
        fn image_urls(&mut self, corpus_id: &str) -> Fetched<Vec<String>> {
            self.calls.set(self.calls.get() + 1);
            match corpus_id {
                "n1" => Fetched::Found(vec!["http://x/1".into(), "http://x/bad".into(), "http://x/2".into()]),
                _ => Fetched::NotFound,
            }
        }

        fn image(&mut self, url: &str) -> Fetched<DynamicImage> {
            self.calls.set(self.calls.get() + 1);
            if url.ends_with("bad") {
                return Fetched::NotFound;
            }
            Fetched::Found(DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 8, Rgba([1, 2, 3, 255]))))
        }
    }

    fn scraper(config: &ScrapeConfig, calls: &Rc<Cell<u32>>) -> Scraper {
        Scraper::new(
            config,
            Box::new(Canned {
                calls: calls.clone(),
                transient_for: Some("Flaky"),
            }),
            Box::new(Pictures {
                calls: calls.clone(),
            }),
        )
        .unwrap()
    }

    #[test]
    fn found_pages_are_memoized() {
        let calls = Rc::new(Cell::new(0));
        let mut s = scraper(&ScrapeConfig::default(), &calls);
        assert_eq!(s.page_text("Fox").as_deref(), Some("Foxes are small."));
        assert_eq!(s.page_text("Fox").as_deref(), Some("Foxes are small."));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn bad_pages_are_never_refetched() {
        let calls = Rc::new(Cell::new(0));
        let mut s = scraper(&ScrapeConfig::default(), &calls);
        assert!(s.page_text("Nope").is_none());
        assert!(s.page_text("Nope").is_none());
        assert_eq!(calls.get(), 1);
        assert!(s.bad_text().contains("wiki://Nope"));
        assert!(s.page_text("  ").is_none());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn transient_failures_retry_then_go_bad() {
        let calls = Rc::new(Cell::new(0));
        let config = ScrapeConfig::default().with_max_attempts(3);
        let mut s = scraper(&config, &calls);
        assert!(s.page_text("Flaky").is_none());
        assert_eq!(calls.get(), 3);
        assert!(s.page_text("Flaky").is_none());
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn negative_cache_shared_across_runs() {
        let dir = TempDir::new().unwrap();
        let config = ScrapeConfig::default().with_cache_dir(dir.path());

        let calls = Rc::new(Cell::new(0));
        let mut first = scraper(&config, &calls);
        assert!(first.page_text("Nope").is_none());
        assert!(first.crawl_sprites("n404", 3, 16).is_empty());
        let after_first = calls.get();

        let mut second = scraper(&config, &calls);
        assert!(second.page_text("Nope").is_none());
        assert!(second.crawl_sprites("n404", 3, 16).is_empty());
        assert_eq!(calls.get(), after_first);
    }

    #[test]
    fn crawl_skips_bad_urls_and_stops_at_want() {
        let calls = Rc::new(Cell::new(0));
        let mut s = scraper(&ScrapeConfig::default(), &calls);

        let sprites = s.crawl_sprites("n1", 2, 16);
        assert_eq!(sprites.len(), 2);
        assert_eq!(sprites[0].dimensions(), (16, 16));
        assert!(s.bad_image_urls().contains("http://x/bad"));

        let one = s.crawl_sprites("n1", 1, 16);
        assert_eq!(one.len(), 1);
    }

    #[test]
    fn crawl_of_unknown_id_marks_id() {
        let calls = Rc::new(Cell::new(0));
        let mut s = scraper(&ScrapeConfig::default(), &calls);
        assert!(s.crawl_sprites("n404", 5, 16).is_empty());
        assert!(s.bad_image_ids().contains("n404"));
        assert!(s.crawl_sprites("", 5, 16).is_empty());
    }

    #[test]
    fn offline_finds_nothing() {
        let mut s = Scraper::offline(&ScrapeConfig::default()).unwrap();
        assert!(s.page_text("Fox").is_none());
        assert!(s.crawl_sprites("n1", 2, 16).is_empty());
    }
}
