//! Query descriptor and the provider requests it expands to

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Optional fetch filters for a gatherer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryDescriptor {
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub top: bool,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub site: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// One provider fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchRequest {
    Keyword(String),
    Top,
    Location(String),
    Topic(String),
    Site(String),
    Since(NaiveDate),
    Until(NaiveDate),
}

impl fmt::Display for SearchRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyword(k) => write!(f, "keyword={}", k),
            Self::Top => write!(f, "top"),
            Self::Location(l) => write!(f, "location={}", l),
            Self::Topic(t) => write!(f, "topic={}", t),
            Self::Site(s) => write!(f, "site={}", s),
            Self::Since(d) => write!(f, "start_date={}", d),
            Self::Until(d) => write!(f, "end_date={}", d),
        }
    }
}

fn populated(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl QueryDescriptor {
    pub fn keyword(keyword: impl Into<String>) -> Self {
        Self {
            keyword: Some(keyword.into()),
            ..Self::default()
        }
    }

    pub fn top() -> Self {
        Self {
            top: true,
            ..Self::default()
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    pub fn with_site(mut self, site: impl Into<String>) -> Self {
        self.site = Some(site.into());
        self
    }

    pub fn with_date_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    /// One request per populated filter, in field order.
    pub fn requests(&self) -> Vec<SearchRequest> {
        let mut requests = Vec::new();
        if let Some(keyword) = populated(&self.keyword) {
            requests.push(SearchRequest::Keyword(keyword.to_string()));
        }
        if self.top {
            requests.push(SearchRequest::Top);
        }
        if let Some(location) = populated(&self.location) {
            requests.push(SearchRequest::Location(location.to_string()));
        }
        if let Some(topic) = populated(&self.topic) {
            requests.push(SearchRequest::Topic(topic.to_string()));
        }
        if let Some(site) = populated(&self.site) {
            requests.push(SearchRequest::Site(site.to_string()));
        }
        if let Some(start) = self.start_date {
            requests.push(SearchRequest::Since(start));
        }
        if let Some(end) = self.end_date {
            requests.push(SearchRequest::Until(end));
        }
        requests
    }

    pub fn is_empty(&self) -> bool {
        self.requests().is_empty()
    }
}

impl fmt::Display for QueryDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let requests = self.requests();
        if requests.is_empty() {
            return write!(f, "top");
        }
        let parts: Vec<String> = requests.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_follow_field_order() {
        let query = QueryDescriptor {
            keyword: Some("election".into()),
            top: true,
            site: Some("example.com".into()),
            start_date: NaiveDate::from_ymd_opt(2024, 11, 1),
            ..Default::default()
        }
        .with_topic("WORLD");

        assert_eq!(
            query.requests(),
            vec![
                SearchRequest::Keyword("election".into()),
                SearchRequest::Top,
                SearchRequest::Topic("WORLD".into()),
                SearchRequest::Site("example.com".into()),
                SearchRequest::Since(NaiveDate::from_ymd_opt(2024, 11, 1).unwrap()),
            ]
        );
    }

    #[test]
    fn blank_filters_are_not_populated() {
        let query = QueryDescriptor {
            keyword: Some("  ".into()),
            location: Some(String::new()),
            ..Default::default()
        };
        assert!(query.is_empty());
        assert_eq!(query.to_string(), "top");
    }

    #[test]
    fn display_lists_populated_filters() {
        let query = QueryDescriptor::keyword("mars rover").with_location("Houston");
        assert_eq!(query.to_string(), "keyword=mars rover, location=Houston");
        assert_eq!(QueryDescriptor::top().to_string(), "top");
    }

    #[test]
    fn deserializes_with_defaults() {
        let query: QueryDescriptor = serde_yaml::from_str("keyword: space\nend_date: 2024-05-01").unwrap();
        assert_eq!(query.keyword.as_deref(), Some("space"));
        assert!(!query.top);
        assert_eq!(query.end_date, NaiveDate::from_ymd_opt(2024, 5, 1));
    }
}
