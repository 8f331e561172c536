use log::{debug, info};
use serde::Serialize;
use std::collections::HashMap;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::page::WordTokenBatch;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// Case-sensitive word counts, built up one batch at a time.
#[derive(Debug, Default)]
pub struct WordFrequencyTable {
    counts: HashMap<String, usize>,
}

impl WordFrequencyTable {
    pub fn add_batch(&mut self, words: Vec<String>) {
        for word in words {
            if !word.is_empty() {
                *self.counts.entry(word).or_insert(0) += 1;
            }
        }
    }

    pub fn get(&self, word: &str) -> usize {
        self.counts.get(word).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Orders by count, highest first. Equal counts are ordered by word so
    /// that the ranking does not depend on hash order.
    pub fn into_ranked(self) -> RankedResult {
        let mut words: Vec<WordCount> = self
            .counts
            .into_iter()
            .map(|(word, count)| WordCount { word, count })
            .collect();
        words.sort_unstable_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
        RankedResult(words)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RankedResult(Vec<WordCount>);

impl RankedResult {
    pub fn as_slice(&self) -> &[WordCount] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn count_of(&self, word: &str) -> Option<usize> {
        self.0.iter().find(|entry| entry.word == word).map(|entry| entry.count)
    }

    /// Number of tokens counted across all pages.
    pub fn total(&self) -> usize {
        self.0.iter().map(|entry| entry.count).sum()
    }

    pub fn top(&self, limit: usize) -> &[WordCount] {
        &self.0[..limit.min(self.0.len())]
    }

    pub fn truncated(mut self, limit: usize) -> RankedResult {
        self.0.truncate(limit);
        self
    }

    pub fn into_inner(self) -> Vec<WordCount> {
        self.0
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    pub seed: String,
    pub pages_fetched: usize,
    pub pages_failed: usize,
    pub words: RankedResult,
}

/// Receiving end of a crawl session.
///
/// The channel closes once every scheduled task has reported, which is what
/// ends [`Aggregator::finish`].
pub struct Aggregator {
    seed: String,
    batches: UnboundedReceiver<WordTokenBatch>,
}

impl Aggregator {
    pub fn new(seed: String, batches: UnboundedReceiver<WordTokenBatch>) -> Self {
        Self { seed, batches }
    }

    pub async fn finish(mut self) -> CrawlReport {
        let mut table = WordFrequencyTable::default();
        let mut pages_fetched = 0;
        let mut pages_failed = 0;

        while let Some(batch) = self.batches.recv().await {
            if batch.fetched {
                pages_fetched += 1;
            } else {
                pages_failed += 1;
            }
            debug!("{} words from {}", batch.words.len(), batch.url);
            table.add_batch(batch.words);
        }

        info!(
            "Crawl of {} done: {} pages analysed, {} failed, {} distinct words",
            self.seed,
            pages_fetched,
            pages_failed,
            table.len()
        );

        CrawlReport {
            seed: self.seed,
            pages_fetched,
            pages_failed,
            words: table.into_ranked(),
        }
    }
}

/// Drains `batches` until every sender is gone and ranks what arrived.
pub async fn aggregate(mut batches: UnboundedReceiver<WordTokenBatch>) -> RankedResult {
    let mut table = WordFrequencyTable::default();
    while let Some(batch) = batches.recv().await {
        table.add_batch(batch.words);
    }
    table.into_ranked()
}
