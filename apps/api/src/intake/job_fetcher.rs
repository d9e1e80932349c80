//! Best-effort job description fetching.
//!
//! Many job boards block bots, so every failure degrades to an empty string
//! and the caller decides what to do without a description.

use std::time::Duration;

use reqwest::{header, Client};
use scraper::{Html, Selector};
use tracing::{info, warn};

use crate::scoring::text::{truncate, FETCHED_JOB_CHARS};

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125 Safari/537.36";
const REFERER: &str = "https://www.google.com/";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

#[derive(Clone)]
pub struct JobFetcher {
    client: Client,
}

impl JobFetcher {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }

    /// Fetches `url` and returns its main text, capped at `FETCHED_JOB_CHARS`.
    /// Returns an empty string on any failure.
    pub async fn fetch_job_description(&self, url: &str) -> String {
        info!("Fetching job description: {}", url);

        match self.fetch_html(url).await {
            Ok(html) => {
                let text = extract_page_text(&html);
                truncate(&text, FETCHED_JOB_CHARS).to_string()
            }
            Err(e) => {
                warn!("Job description fetch failed for {}: {}", url, e);
                String::new()
            }
        }
    }

    async fn fetch_html(&self, url: &str) -> Result<String, reqwest::Error> {
        self.client
            .get(url)
            .header(header::REFERER, REFERER)
            .header(header::ACCEPT_LANGUAGE, ACCEPT_LANGUAGE)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

/// Text of the page's `<main>` elements, falling back to `<body>`.
/// Whitespace runs collapse to single spaces.
fn extract_page_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let main_text = selected_text(&document, "main");
    if !main_text.is_empty() {
        return main_text;
    }
    selected_text(&document, "body")
}

fn selected_text(document: &Html, selector: &str) -> String {
    let Ok(selector) = Selector::parse(selector) else {
        return String::new();
    };

    document
        .select(&selector)
        .flat_map(|element| element.text())
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
