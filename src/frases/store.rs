//! # Quote Store
//!
//! The read side of the service: an immutable, in-memory collection of
//! [`Quote`] records loaded once at startup. Because nothing mutates the
//! collection after load, every query is a plain borrow with no
//! synchronization.
//!
//! The store is constructed either from the dataset file ([`QuoteStore::load`],
//! production) or from an in-memory vec ([`QuoteStore::new`], tests). A load
//! failure is fatal to startup: the dataset is produced and validated by the
//! offline ingestion step, so a malformed snapshot means the deployment is
//! broken, not a single record.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use rand::seq::SliceRandom;
use serde::Serialize;

use crate::error::{FrasesError, Result};
use crate::model::Quote;

pub const MIN_QUERY_LEN: usize = 2;
pub const MAX_QUERY_LEN: usize = 100;

/// Aggregate counts over the loaded snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub total_quotes: usize,
    pub unique_authors: usize,
    pub unique_categories: usize,
}

pub struct QuoteStore {
    quotes: Vec<Quote>,
    search_cap: Option<usize>,
}

impl QuoteStore {
    /// Build a store from records already in memory. Each record is
    /// validated; insertion order is kept for stable listing.
    pub fn new(quotes: Vec<Quote>) -> Result<Self> {
        let quotes = quotes
            .into_iter()
            .map(Quote::validated)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            quotes,
            search_cap: None,
        })
    }

    /// Load the dataset snapshot from a JSON array file. An empty array is
    /// a valid (empty) store; anything unreadable or malformed is an error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let quotes: Vec<Quote> = serde_json::from_str(&raw)?;
        Self::new(quotes)
    }

    /// Cap search results at `cap` entries; `None` means unbounded.
    pub fn with_search_cap(mut self, cap: Option<usize>) -> Self {
        self.search_cap = cap;
        self
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Uniform pick from the whole set, or from the subset with the given
    /// category. An empty pool is a not-found condition, not a panic.
    pub fn random(&self, category: Option<&str>) -> Result<&Quote> {
        let mut rng = rand::thread_rng();
        let picked = match category {
            Some(cat) => {
                let pool: Vec<&Quote> = self
                    .quotes
                    .iter()
                    .filter(|q| q.category == cat)
                    .collect();
                pool.choose(&mut rng).copied()
            }
            None => self.quotes.choose(&mut rng),
        };
        picked.ok_or(FrasesError::NoMatch)
    }

    /// All quotes whose author matches exactly, ignoring case. Input is
    /// trimmed first. Unattributed quotes never match; no match is an
    /// empty vec rather than an error.
    pub fn by_author(&self, author: &str) -> Vec<&Quote> {
        let needle = author.trim().to_lowercase();
        self.quotes
            .iter()
            .filter(|q| {
                q.author
                    .as_deref()
                    .is_some_and(|a| a.to_lowercase() == needle)
            })
            .collect()
    }

    /// Case-insensitive substring search over text, author, and category.
    /// Results keep insertion order; no ranking. The query must be between
    /// [`MIN_QUERY_LEN`] and [`MAX_QUERY_LEN`] characters.
    pub fn search(&self, query: &str) -> Result<Vec<&Quote>> {
        let len = query.chars().count();
        if !(MIN_QUERY_LEN..=MAX_QUERY_LEN).contains(&len) {
            return Err(FrasesError::Validation(format!(
                "query length must be between {} and {} characters",
                MIN_QUERY_LEN, MAX_QUERY_LEN
            )));
        }

        let needle = query.to_lowercase();
        let hits = self.quotes.iter().filter(|q| {
            q.text.to_lowercase().contains(&needle)
                || q.author
                    .as_deref()
                    .is_some_and(|a| a.to_lowercase().contains(&needle))
                || q.category.to_lowercase().contains(&needle)
        });

        Ok(match self.search_cap {
            Some(cap) => hits.take(cap).collect(),
            None => hits.collect(),
        })
    }

    /// Distinct categories present in the snapshot, sorted.
    pub fn categories(&self) -> Vec<String> {
        self.quotes
            .iter()
            .map(|q| q.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn stats(&self) -> StoreStats {
        let authors: BTreeSet<&str> = self
            .quotes
            .iter()
            .filter_map(|q| q.author.as_deref())
            .collect();
        let categories: BTreeSet<&str> =
            self.quotes.iter().map(|q| q.category.as_str()).collect();

        StoreStats {
            total_quotes: self.quotes.len(),
            unique_authors: authors.len(),
            unique_categories: categories.len(),
        }
    }
}
