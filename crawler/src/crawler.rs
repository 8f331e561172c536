use log::{debug, info, warn};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::sync::Semaphore;
use url::Url;

use crate::aggregator::{Aggregator, CrawlReport};
use crate::config::Config;
use crate::error::{CrawlError, FetchError, Result};
use crate::extractor::extract;
use crate::page::{PageExtract, Role, WordTokenBatch};
use crate::webfilter;

/// Link targets already scheduled during one crawl, compared verbatim.
#[derive(Debug, Default)]
pub struct LinkSet {
    links: HashSet<String>,
}

impl LinkSet {
    /// Returns `true` when `link` had not been scheduled yet.
    pub fn insert(&mut self, link: &str) -> bool {
        if self.links.contains(link) {
            return false;
        }
        self.links.insert(link.to_string())
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }
}

/// Fetches a seed page and its direct links and counts the words on them.
#[derive(Clone)]
pub struct Crawler {
    client: reqwest::Client,
    config: Arc<Config>,
}

impl Crawler {
    pub fn new(config: Config) -> Result<Crawler> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(CrawlError::Client)?;

        Ok(Crawler {
            client,
            config: Arc::new(config),
        })
    }

    /// Starts a crawl session rooted at `seed` and returns the handle that
    /// collects its results.
    ///
    /// `seed` must be an absolute URL; anything else is rejected before any
    /// request goes out. Must be called from within a Tokio runtime.
    pub fn crawl(&self, seed: &str) -> Result<Aggregator> {
        let url = Url::parse(seed).map_err(|source| CrawlError::InvalidInput {
            url: seed.to_string(),
            source,
        })?;

        let (batches, receiver) = mpsc::unbounded_channel();
        let session = Session {
            client: self.client.clone(),
            config: self.config.clone(),
            permits: self
                .config
                .max_concurrency
                .map(|limit| Arc::new(Semaphore::new(limit.max(1)))),
        };
        tokio::spawn(session.run_root(url.to_string(), batches));

        Ok(Aggregator::new(seed.to_string(), receiver))
    }

    /// Runs a whole crawl and waits for its report.
    pub async fn run(&self, seed: &str) -> Result<CrawlReport> {
        Ok(self.crawl(seed)?.finish().await)
    }

    /// Fetches one page and extracts its words, and its links for
    /// [`Role::Root`].
    pub async fn fetch_and_extract(
        &self,
        url: &str,
        role: Role,
    ) -> std::result::Result<PageExtract, FetchError> {
        fetch_and_extract(&self.client, &self.config, url, role).await
    }
}

/// State owned by a single crawl session. Each scheduled task holds a clone of
/// the batch sender; the aggregator sees the channel close after the last one
/// is dropped.
#[derive(Clone)]
struct Session {
    client: reqwest::Client,
    config: Arc<Config>,
    permits: Option<Arc<Semaphore>>,
}

impl Session {
    async fn run_root(self, url: String, batches: UnboundedSender<WordTokenBatch>) {
        let (page, batch) = self.visit(url, Role::Root).await;

        // Only the root task discovers links, so it alone owns the link set.
        let mut link_set = LinkSet::default();
        for link in page.links {
            if !link_set.insert(&link) {
                continue;
            }
            debug!("About to process {}", link);
            // Cloning the sender registers the child before it starts.
            let child_batches = batches.clone();
            tokio::spawn(self.clone().run_child(link, child_batches));
        }
        info!("Scheduled {} linked pages", link_set.len());

        let _ = batches.send(batch);
    }

    async fn run_child(self, url: String, batches: UnboundedSender<WordTokenBatch>) {
        let _permit = match &self.permits {
            Some(permits) => permits.clone().acquire_owned().await.ok(),
            None => None,
        };
        let (_, batch) = self.visit(url, Role::Child).await;
        let _ = batches.send(batch);
    }

    async fn visit(&self, url: String, role: Role) -> (PageExtract, WordTokenBatch) {
        match fetch_and_extract(&self.client, &self.config, &url, role).await {
            Ok(mut page) => {
                info!("Analysis of {} complete", url);
                let words = std::mem::take(&mut page.words);
                (page, WordTokenBatch::new(url, role, words))
            }
            Err(e) => {
                warn!("{}", e);
                (PageExtract::default(), WordTokenBatch::failed(url, role))
            }
        }
    }
}

async fn fetch_and_extract(
    client: &reqwest::Client,
    config: &Config,
    url: &str,
    role: Role,
) -> std::result::Result<PageExtract, FetchError> {
    let mut response = client
        .get(url)
        .send()
        .await
        .map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }
    if config.html_only && !webfilter::pass(response.headers()) {
        return Err(FetchError::NotHtml {
            url: url.to_string(),
            content_type: webfilter::content_type(response.headers()),
        });
    }

    // A body cut short still gets tokenized as far as it arrived.
    let mut body = Vec::new();
    loop {
        match response.chunk().await {
            Ok(Some(chunk)) => body.extend_from_slice(&chunk),
            Ok(None) => break,
            Err(e) => {
                warn!("Body of {} truncated after {} bytes: {}", url, body.len(), e);
                break;
            }
        }
    }

    Ok(extract(&String::from_utf8_lossy(&body), role))
}
