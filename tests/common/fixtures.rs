//! Article fixtures

use looksatwords::gather::{mock_article, MockSearchClient, SearchRequest};
use looksatwords::{Article, Publisher};

pub fn article(headline: &str, description: &str) -> Article {
    Article {
        headline: headline.to_string(),
        description: description.to_string(),
        url: format!(
            "https://news.example.com/{}",
            headline.to_lowercase().replace(' ', "-")
        ),
        published_date: "2024-11-05T12:00:00Z".to_string(),
        publisher: Publisher::new("Example News", "https://news.example.com"),
    }
}

/// Two rows with clearly positive and clearly negative headlines.
pub fn sample_articles() -> Vec<Article> {
    vec![
        article(
            "Voters celebrate a historic win - Example News",
            "Crowds cheered and danced in the streets.\nMore coverage below.",
        ),
        article(
            "Storm damage leaves towns in ruins",
            "Residents fear the worst as the terrible flooding continues.",
        ),
    ]
}

/// Search client answering `keyword=election` with one canned story.
pub fn election_client() -> MockSearchClient {
    MockSearchClient::new().with_articles(
        SearchRequest::Keyword("election".into()),
        vec![mock_article(
            "Election results show a surprising lead",
            "Officials counted ballots through the night.",
        )],
    )
}
