//! Encyclopedia text retrieval.

use regex::{Captures, Regex};
use reqwest::StatusCode;
use reqwest::blocking::Client;

use crate::config::ScrapeConfig;
use crate::error::ScrapeResult;
use crate::fetch::{Fetched, classify};
use crate::source::TextSource;

/// Paragraphs whose longest line is shorter than this are lists or captions.
const MIN_PARAGRAPH_LINE: usize = 80;

/// Pulls readable paragraph text out of an article page.
#[derive(Debug, Clone)]
pub struct HtmlText {
    paragraph: Regex,
    tag: Regex,
    footnote: Regex,
    entity: Regex,
}

impl HtmlText {
    /// Compile the extraction patterns.
    pub fn new() -> ScrapeResult<Self> {
        Ok(Self {
            paragraph: Regex::new(r"(?s)<p(?:\s[^>]*)?>(.*?)</p>")?,
            tag: Regex::new(r"(?s)<[^>]*>")?,
            footnote: Regex::new(r"\[[0-9]{1,3}\]")?,
            entity: Regex::new(r"&(#[0-9]+|#x[0-9a-fA-F]+|[a-zA-Z]+);")?,
        })
    }

    /// Concatenate the text of every `<p>` element, one paragraph per line.
    ///
    /// Markup and footnote markers are stripped and short paragraphs are
    /// skipped.
    pub fn paragraphs(&self, html: &str) -> String {
        let mut out = String::new();
        for cap in self.paragraph.captures_iter(html) {
            let raw = self.tag.replace_all(&cap[1], "");
            let text = self.entity.replace_all(&raw, |c: &Captures<'_>| decode_entity(&c[1]));
            let longest = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
            if longest < MIN_PARAGRAPH_LINE {
                continue;
            }
            let text = self.footnote.replace_all(&text, "");
            out.push_str(text.trim());
            out.push('\n');
        }
        out
    }
}

fn decode_entity(body: &str) -> String {
    let numeric = if let Some(hex) = body.strip_prefix("#x") {
        u32::from_str_radix(hex, 16).ok()
    } else if let Some(dec) = body.strip_prefix('#') {
        dec.parse().ok()
    } else {
        None
    };
    if let Some(c) = numeric.and_then(char::from_u32) {
        return c.to_string();
    }
    match body {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => " ",
        "ndash" => "-",
        "mdash" => "-",
        _ => "",
    }
    .to_string()
}

/// Reads article paragraphs over HTTP.
#[derive(Debug)]
pub struct WikipediaSource {
    client: Client,
    base: String,
    html: HtmlText,
}

impl WikipediaSource {
    /// Build a source with the configured timeout, user agent, and base URL.
    pub fn new(config: &ScrapeConfig) -> ScrapeResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self {
            client,
            base: config.wikipedia_base.clone(),
            html: HtmlText::new()?,
        })
    }
}

fn page_exists(status: StatusCode) -> bool {
    status == StatusCode::OK || status == StatusCode::MOVED_PERMANENTLY
}

impl TextSource for WikipediaSource {
    fn locate(&self, page: &str) -> String {
        format!("{}{}", self.base, page.trim().replace(' ', "_"))
    }

    fn fetch(&mut self, page: &str) -> Fetched<String> {
        let url = self.locate(page);

        // A cheap HEAD first: most misses are 404s.
        match self.client.head(&url).send() {
            Ok(resp) if page_exists(resp.status()) => {}
            Ok(resp) => {
                tracing::debug!(%url, status = %resp.status(), "page missing");
                return Fetched::NotFound;
            }
            Err(e) => return classify(&e),
        }

        let resp = match self.client.get(&url).send() {
            Ok(resp) => resp,
            Err(e) => return classify(&e),
        };
        if !page_exists(resp.status()) {
            return Fetched::NotFound;
        }
        match resp.text() {
            Ok(body) => Fetched::Found(self.html.paragraphs(&body)),
            Err(e) => classify(&e),
        }
    }
}
