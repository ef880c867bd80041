//! Blog articles.

use serde::{Deserialize, Serialize};

use crate::ContentError;

const BUILTIN_ARTICLES: &str = include_str!("../data/articles.json");

/// A published blog article. `date` is the human form used on the site,
/// e.g. `"Jan 2026"`; `content` is markdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub read_time: String,
    pub date: String,
    pub featured: bool,
    #[serde(default)]
    pub seo_keywords: Vec<String>,
    pub content: String,
}

/// Articles compiled into the binary, newest first.
pub fn builtin_articles() -> Result<Vec<Article>, ContentError> {
    Ok(serde_json::from_str(BUILTIN_ARTICLES)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn builtin_articles_parse() {
        let articles = builtin_articles().unwrap();
        assert_eq!(articles.len(), 9);
        assert_eq!(articles[0].slug, "latency-tax-separated-compute-storage");
        assert_eq!(articles[0].date, "Jan 2026");
    }

    #[test]
    fn slugs_are_unique() {
        let articles = builtin_articles().unwrap();
        let slugs: HashSet<_> = articles.iter().map(|a| a.slug.as_str()).collect();
        assert_eq!(slugs.len(), articles.len());
    }

    fn by_slug<'a>(articles: &'a [Article], slug: &str) -> &'a Article {
        articles.iter().find(|a| a.slug == slug).unwrap()
    }

    #[test]
    fn keywords_default_to_empty() {
        let articles = builtin_articles().unwrap();
        let skew = by_slug(&articles, "data-skew-distributed-joins");
        assert!(skew.seo_keywords.is_empty());
        let cap = by_slug(&articles, "cap-theorem-production");
        assert!(cap.seo_keywords.contains(&"CAP theorem".to_string()));
    }
}
