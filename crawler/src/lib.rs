//! Word-frequency crawler: fetches a seed page and every page it links to,
//! then counts the words of their visible text.

pub mod aggregator;
pub mod config;
pub mod crawler;
pub mod error;
pub mod extractor;
pub mod page;
pub mod tokenizer;
pub mod webfilter;

pub use aggregator::{aggregate, Aggregator, CrawlReport, RankedResult, WordCount, WordFrequencyTable};
pub use config::{Config, ConfigError};
pub use crawler::{Crawler, LinkSet};
pub use error::{CrawlError, FetchError};
pub use page::{PageExtract, Role, WordTokenBatch};
