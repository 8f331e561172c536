/// Whether a page is the seed of a crawl or one of its direct links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Root,
    Child,
}

impl Role {
    pub fn harvests_links(self) -> bool {
        self == Role::Root
    }
}

/// Links and words pulled out of a single document.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PageExtract {
    pub links: Vec<String>,
    pub words: Vec<String>,
}

/// What one crawl task hands to the aggregator.
#[derive(Debug, Clone)]
pub struct WordTokenBatch {
    pub url: String,
    pub role: Role,
    pub words: Vec<String>,
    pub fetched: bool,
}

impl WordTokenBatch {
    pub fn new(url: String, role: Role, words: Vec<String>) -> Self {
        Self {
            url,
            role,
            words,
            fetched: true,
        }
    }

    pub fn failed(url: String, role: Role) -> Self {
        Self {
            url,
            role,
            words: Vec::new(),
            fetched: false,
        }
    }
}
