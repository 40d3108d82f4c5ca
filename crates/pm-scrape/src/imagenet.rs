//! Image-corpus retrieval: URL lists per synset id, then the images themselves.

use image::DynamicImage;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

use crate::config::ScrapeConfig;
use crate::error::ScrapeResult;
use crate::fetch::{Fetched, classify};
use crate::source::ImageSource;

/// Lists candidate image URLs for a synset and downloads them.
#[derive(Debug)]
pub struct ImageNetSource {
    client: Client,
    list_base: String,
}

impl ImageNetSource {
    /// Build a source with the configured timeout, user agent, and list endpoint.
    pub fn new(config: &ScrapeConfig) -> ScrapeResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self {
            client,
            list_base: config.imagenet_base.clone(),
        })
    }
}

/// Parse a newline-separated URL list, keeping only http(s) URLs.
pub fn parse_url_list(body: &str) -> Vec<String> {
    body.lines()
        .map(str::trim)
        .filter(|l| l.starts_with("http://") || l.starts_with("https://"))
        .map(String::from)
        .collect()
}

/// Whether a Content-Type header value names a raster image.
pub fn is_image_content_type(value: &str) -> bool {
    value.trim().to_ascii_lowercase().starts_with("image/")
}

impl ImageSource for ImageNetSource {
    fn image_urls(&mut self, corpus_id: &str) -> Fetched<Vec<String>> {
        let url = format!("{}{}", self.list_base, corpus_id);
        let resp = match self.client.get(&url).send() {
            Ok(resp) => resp,
            Err(e) => return classify(&e),
        };
        if !resp.status().is_success() {
            return Fetched::NotFound;
        }
        match resp.text() {
            Ok(body) => {
                let urls = parse_url_list(&body);
                if urls.is_empty() {
                    Fetched::NotFound
                } else {
                    Fetched::Found(urls)
                }
            }
            Err(e) => classify(&e),
        }
    }

    fn image(&mut self, url: &str) -> Fetched<DynamicImage> {
        let resp = match self.client.get(url).send() {
            Ok(resp) => resp,
            Err(e) => return classify(&e),
        };
        if !resp.status().is_success() {
            return Fetched::NotFound;
        }

        // Dead image hosts love to answer with an HTML placeholder page.
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        if !is_image_content_type(content_type) {
            tracing::debug!(url, content_type, "not an image");
            return Fetched::NotFound;
        }

        let bytes = match resp.bytes() {
            Ok(bytes) => bytes,
            Err(e) => return classify(&e),
        };
        match image::load_from_memory(&bytes) {
            Ok(img) => Fetched::Found(img),
            Err(e) => {
                tracing::debug!(url, error = %e, "undecodable image");
                Fetched::NotFound
            }
        }
    }
}
