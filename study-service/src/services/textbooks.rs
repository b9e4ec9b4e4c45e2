//! Textbook lookup over a local CSV dataset.
//!
//! Rows are ranked by how many query words appear inside the lowercased
//! title. The file is owned by whoever curates the dataset, so it is re-read
//! on every lookup and edits show up without a restart.

use super::metrics;
use crate::models::{EDITION_NOT_AVAILABLE, Textbook};
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const MAX_TEXTBOOKS: usize = 3;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to open textbook dataset {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("invalid textbook dataset: {0}")]
    Decode(#[from] csv::Error),

    #[error("textbook lookup task failed: {0}")]
    Task(String),
}

/// One dataset row. Columns other than `title` and `edition` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TextbookRecord {
    pub title: String,
    #[serde(default)]
    pub edition: Option<String>,
}

impl TextbookRecord {
    pub fn to_textbook(&self) -> Textbook {
        let edition = self
            .edition
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .unwrap_or(EDITION_NOT_AVAILABLE);

        Textbook {
            title: self.title.clone(),
            edition: edition.to_string(),
        }
    }
}

/// Lowercased whitespace-separated words of a query. Repeats are kept.
pub fn search_terms(topic: &str) -> Vec<String> {
    topic.to_lowercase().split_whitespace().map(str::to_string).collect()
}

/// Number of terms occurring as substrings of `title`, case-insensitively.
pub fn relevance(title: &str, terms: &[String]) -> usize {
    let title = title.to_lowercase();
    terms.iter().filter(|t| title.contains(t.as_str())).count()
}

#[derive(Debug, Clone, Default)]
pub struct TextbookCatalog {
    records: Vec<TextbookRecord>,
}

impl TextbookCatalog {
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_path(path)
            .map_err(|source| CatalogError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_csv(reader)
    }

    pub fn from_reader<R: Read>(rdr: R) -> Result<Self, CatalogError> {
        let reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(rdr);
        Self::from_csv(reader)
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<Self, CatalogError> {
        let records = reader
            .deserialize::<TextbookRecord>()
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { records })
    }

    fn len(&self) -> usize {
        self.records.len()
    }

    /// Rows with a positive score, best first, at most `limit`.
    ///
    /// Equal scores keep dataset order (the sort is stable).
    pub fn top_matches(&self, topic: &str, limit: usize) -> Vec<&TextbookRecord> {
        let terms = search_terms(topic);
        if terms.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(usize, &TextbookRecord)> = self
            .records
            .iter()
            .map(|r| (relevance(&r.title, &terms), r))
            .filter(|(score, _)| *score > 0)
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0));

        scored.into_iter().take(limit).map(|(_, r)| r).collect()
    }
}

#[derive(Debug, Clone)]
pub struct TextbookRecommender {
    csv_path: PathBuf,
}

impl TextbookRecommender {
    pub fn new(csv_path: impl Into<PathBuf>) -> Self {
        Self {
            csv_path: csv_path.into(),
        }
    }

    async fn load(&self) -> Result<TextbookCatalog, CatalogError> {
        let path = self.csv_path.clone();
        tokio::task::spawn_blocking(move || TextbookCatalog::from_path(&path))
            .await
            .map_err(|e| CatalogError::Task(e.to_string()))?
    }

    /// Best `MAX_TEXTBOOKS` titles for `topic`.
    ///
    /// `None` when nothing scores above zero or the dataset cannot be read.
    pub async fn recommend(&self, topic: &str) -> Option<Vec<Textbook>> {
        let catalog = match self.load().await {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::error!(
                    course = %topic,
                    path = %self.csv_path.display(),
                    error = %e,
                    "Error getting textbook recommendation"
                );
                metrics::record_recommendation("textbook", false);
                return None;
            }
        };

        let books: Vec<Textbook> = catalog
            .top_matches(topic, MAX_TEXTBOOKS)
            .into_iter()
            .map(TextbookRecord::to_textbook)
            .collect();

        metrics::record_recommendation("textbook", !books.is_empty());

        if books.is_empty() {
            tracing::info!(course = %topic, rows = catalog.len(), "No matching textbooks");
            return None;
        }

        Some(books)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATASET: &str = "\
title,edition,isbn
Intro to Biology,3rd,111
Advanced Biology Lab,,222
Chemistry Basics,2nd,333
";

    fn catalog() -> TextbookCatalog {
        TextbookCatalog::from_reader(DATASET.as_bytes()).unwrap()
    }

    fn titles(matches: Vec<&TextbookRecord>) -> Vec<&str> {
        matches.into_iter().map(|r| r.title.as_str()).collect()
    }

    #[test]
    fn scores_count_matching_terms() {
        let terms = search_terms("biology lab");
        assert_eq!(relevance("Intro to Biology", &terms), 1);
        assert_eq!(relevance("Advanced Biology Lab", &terms), 2);
        assert_eq!(relevance("Chemistry Basics", &terms), 0);
    }

    #[test]
    fn ranks_by_score_then_dataset_order() {
        let catalog = catalog();
        let top = catalog.top_matches("biology lab", MAX_TEXTBOOKS);
        assert_eq!(titles(top), vec!["Advanced Biology Lab", "Intro to Biology"]);
    }

    #[test]
    fn ties_follow_dataset_not_query_order() {
        let data = "title\nPhysics of Music\nMusic Theory Physics\n";
        let catalog = TextbookCatalog::from_reader(data.as_bytes()).unwrap();

        let top = catalog.top_matches("music physics", MAX_TEXTBOOKS);
        assert_eq!(titles(top), vec!["Physics of Music", "Music Theory Physics"]);
    }

    #[test]
    fn substring_matches_count() {
        // "bio" is a substring of "biology"
        let catalog = catalog();
        let top = catalog.top_matches("BIO", MAX_TEXTBOOKS);
        assert_eq!(titles(top), vec!["Intro to Biology", "Advanced Biology Lab"]);
    }

    #[test]
    fn repeated_terms_each_count() {
        let terms = search_terms("lab lab");
        assert_eq!(relevance("Advanced Biology Lab", &terms), 2);
    }

    #[test]
    fn empty_or_unrelated_topic_matches_nothing() {
        assert!(catalog().top_matches("", MAX_TEXTBOOKS).is_empty());
        assert!(catalog().top_matches("   ", MAX_TEXTBOOKS).is_empty());
        assert!(catalog().top_matches("astronomy", MAX_TEXTBOOKS).is_empty());
    }

    #[test]
    fn limit_is_applied() {
        let data = "title\nAlgebra I\nAlgebra II\nAlgebra III\nAlgebra IV\n";
        let catalog = TextbookCatalog::from_reader(data.as_bytes()).unwrap();
        assert_eq!(catalog.top_matches("algebra", MAX_TEXTBOOKS).len(), 3);
    }

    #[test]
    fn missing_edition_uses_placeholder() {
        let catalog = catalog();
        let top = catalog.top_matches("lab", MAX_TEXTBOOKS);
        assert_eq!(top[0].to_textbook().edition, EDITION_NOT_AVAILABLE);

        let data = "title\nGenetics\n";
        let catalog = TextbookCatalog::from_reader(data.as_bytes()).unwrap();
        let top = catalog.top_matches("genetics", MAX_TEXTBOOKS);
        assert_eq!(
            top[0].to_textbook(),
            Textbook {
                title: "Genetics".to_string(),
                edition: EDITION_NOT_AVAILABLE.to_string(),
            }
        );
    }

    #[test]
    fn dataset_without_title_column_is_an_error() {
        let data = "name,edition\nIntro to Biology,3rd\n";
        assert!(TextbookCatalog::from_reader(data.as_bytes()).is_err());
    }

    #[tokio::test]
    async fn unreadable_dataset_is_absent() {
        let recommender = TextbookRecommender::new("/nonexistent/textbooks.csv");
        assert_eq!(recommender.recommend("biology").await, None);
    }
}
