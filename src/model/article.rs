//! The common article row

use super::{Record, ToRecord};
use serde::{Deserialize, Serialize};

/// Who published an article.
///
/// Search providers report a name and a homepage; generated articles carry
/// a fixed label and the generator's host URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publisher {
    pub title: String,
    #[serde(default)]
    pub href: String,
}

impl Publisher {
    pub fn new(title: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            href: href.into(),
        }
    }
}

/// A gathered or generated news article.
///
/// Immutable once produced; analysis derives new columns next to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub headline: String,
    pub description: String,
    pub url: String,
    pub published_date: String,
    pub publisher: Publisher,
}

impl Article {
    /// Text of one of the two analyzed fields (`headline` or `description`).
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            super::column::HEADLINE => Some(&self.headline),
            super::column::DESCRIPTION => Some(&self.description),
            _ => None,
        }
    }

    /// Rebuild an article from a stored record.
    pub fn from_record(record: &Record) -> Result<Self, serde_json::Error> {
        serde_json::from_value(serde_json::Value::Object(record.clone()))
    }
}

impl ToRecord for Article {
    fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert(super::column::HEADLINE.into(), self.headline.clone().into());
        record.insert(super::column::DESCRIPTION.into(), self.description.clone().into());
        record.insert(super::column::URL.into(), self.url.clone().into());
        record.insert(
            super::column::PUBLISHED_DATE.into(),
            self.published_date.clone().into(),
        );
        let mut publisher = Record::new();
        publisher.insert("title".into(), self.publisher.title.clone().into());
        publisher.insert("href".into(), self.publisher.href.clone().into());
        record.insert(super::column::PUBLISHER.into(), publisher.into());
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Article {
        Article {
            headline: "Markets rally after vote".to_string(),
            description: "Stocks climbed on Tuesday.".to_string(),
            url: "https://example.com/a".to_string(),
            published_date: "Tue, 05 Nov 2024 10:00:00 GMT".to_string(),
            publisher: Publisher::new("Example News", "https://example.com"),
        }
    }

    #[test]
    fn record_has_common_columns() {
        let record = sample().to_record();
        let mut keys: Vec<_> = record.keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            vec!["description", "headline", "published_date", "publisher", "url"]
        );
        assert!(record["publisher"].is_object());
    }

    #[test]
    fn record_converts_back() {
        let article = sample();
        let back = Article::from_record(&article.to_record()).unwrap();
        assert_eq!(back, article);
    }

    #[test]
    fn field_lookup() {
        let article = sample();
        assert_eq!(article.field("headline"), Some("Markets rally after vote"));
        assert_eq!(article.field("url"), None);
    }
}
