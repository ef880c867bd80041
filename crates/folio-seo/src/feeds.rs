//! RSS 2.0 and JSON Feed 1.1 generation.

use chrono::{DateTime, SecondsFormat, Utc};
use folio_config::SiteConfig;
use folio_content::Article;
use serde::Serialize;

use crate::dates::article_datetime;
use crate::text::{escape_xml, markdown_excerpt};
use crate::SeoError;

const JSON_FEED_VERSION: &str = "https://jsonfeed.org/version/1.1";

/// RFC 822 date in the `GMT` form feed readers expect.
fn rss_date(dt: DateTime<Utc>) -> String {
    dt.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

fn article_url(site: &SiteConfig, article: &Article) -> String {
    format!("{}/blog/{}", site.base_url(), article.slug)
}

fn rss_item(site: &SiteConfig, article: &Article, now: DateTime<Utc>) -> String {
    let link = article_url(site, article);
    let mut categories = vec![format!(
        "<category>{}</category>",
        escape_xml(&article.category)
    )];
    categories.extend(
        article
            .seo_keywords
            .iter()
            .map(|kw| format!("<category>{}</category>", escape_xml(kw))),
    );

    format!(
        r#"
    <item>
      <title>{title}</title>
      <link>{link}</link>
      <guid isPermaLink="true">{link}</guid>
      <description>{description}</description>
      <content:encoded><![CDATA[{excerpt}...]]></content:encoded>
      <pubDate>{pub_date}</pubDate>
      {categories}
    </item>"#,
        title = escape_xml(&article.title),
        link = escape_xml(&link),
        description = escape_xml(&article.description),
        excerpt = escape_xml(&markdown_excerpt(&article.content)),
        pub_date = rss_date(article_datetime(&article.date, now)),
        categories = categories.join("\n      "),
    )
}

/// RSS 2.0 feed with content and atom namespaces. `now` is the build
/// date and the fallback for articles without a parsable date.
pub fn generate_rss(site: &SiteConfig, articles: &[Article], now: DateTime<Utc>) -> String {
    let base = escape_xml(site.base_url());
    let title = escape_xml(&site.blog_title);
    let items: String = articles.iter().map(|a| rss_item(site, a, now)).collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"
  xmlns:content="http://purl.org/rss/1.0/modules/content/"
  xmlns:atom="http://www.w3.org/2005/Atom">
  <channel>
    <title>{title}</title>
    <link>{base}</link>
    <description>{description}</description>
    <language>{language}</language>
    <lastBuildDate>{build_date}</lastBuildDate>
    <atom:link href="{base}/rss.xml" rel="self" type="application/rss+xml"/>
    <image>
      <url>{base}/favicon.ico</url>
      <title>{title}</title>
      <link>{base}</link>
    </image>{items}
  </channel>
</rss>
"#,
        description = escape_xml(&site.blog_description),
        language = escape_xml(&site.language),
        build_date = rss_date(now),
    )
}

#[derive(Serialize)]
struct JsonFeed<'a> {
    version: &'static str,
    title: &'a str,
    home_page_url: &'a str,
    feed_url: String,
    description: &'a str,
    language: &'a str,
    items: Vec<JsonFeedItem<'a>>,
}

#[derive(Serialize)]
struct JsonFeedItem<'a> {
    id: String,
    url: String,
    title: &'a str,
    summary: &'a str,
    content_text: String,
    date_published: String,
    tags: Vec<&'a str>,
}

pub fn generate_json_feed(
    site: &SiteConfig,
    articles: &[Article],
    now: DateTime<Utc>,
) -> Result<String, SeoError> {
    let items = articles
        .iter()
        .map(|article| {
            let url = article_url(site, article);
            JsonFeedItem {
                id: url.clone(),
                url,
                title: &article.title,
                summary: &article.description,
                content_text: format!("{}...", markdown_excerpt(&article.content)),
                date_published: article_datetime(&article.date, now)
                    .to_rfc3339_opts(SecondsFormat::Millis, true),
                tags: std::iter::once(article.category.as_str())
                    .chain(article.seo_keywords.iter().map(String::as_str))
                    .collect(),
            }
        })
        .collect();

    let feed = JsonFeed {
        version: JSON_FEED_VERSION,
        title: &site.blog_title,
        home_page_url: site.base_url(),
        feed_url: format!("{}/feed.json", site.base_url()),
        description: &site.blog_description,
        language: &site.language,
        items,
    };

    Ok(serde_json::to_string_pretty(&feed)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 3, 12, 30, 0).unwrap()
    }

    fn articles() -> Vec<Article> {
        folio_content::builtin_articles().unwrap()
    }

    #[test]
    fn rss_channel_metadata() {
        let rss = generate_rss(&SiteConfig::default(), &articles(), now());
        assert!(rss.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<rss version=\"2.0\""));
        assert!(rss.contains("<title>Shahid Moosa - Distributed Systems Engineering</title>"));
        assert!(rss.contains("<lastBuildDate>Tue, 03 Feb 2026 12:30:00 GMT</lastBuildDate>"));
        assert!(rss.contains(
            "<atom:link href=\"https://shahidster.tech/rss.xml\" rel=\"self\" type=\"application/rss+xml\"/>"
        ));
        assert_eq!(rss.matches("<item>").count(), articles().len());
    }

    #[test]
    fn rss_item_fields() {
        let rss = generate_rss(&SiteConfig::default(), &articles(), now());
        assert!(rss.contains(
            "<guid isPermaLink=\"true\">https://shahidster.tech/blog/non-blocking-ddl-myth</guid>"
        ));
        assert!(rss.contains("<pubDate>Thu, 01 Jan 2026 00:00:00 GMT</pubDate>"));
        assert!(rss.contains("<category>Deep Dive</category>"));
        assert!(rss.contains("<category>online DDL</category>"));
        // Titles are escaped.
        assert!(rss.contains("<title>Pragmatic Consistency: When Stronger Isn&apos;t Better</title>"));
    }

    #[test]
    fn rss_content_is_markdown_free_excerpt() {
        let rss = generate_rss(&SiteConfig::default(), &articles()[..1], now());
        let start = rss.find("<![CDATA[").unwrap();
        let end = rss.find("]]>").unwrap();
        let excerpt = &rss[start + 9..end];
        assert!(excerpt.starts_with("The Promise and Reality of Disaggregation"));
        assert!(excerpt.ends_with("..."));
        assert!(!excerpt.contains("**"));
        assert!(!excerpt.contains("SELECT"));
    }

    #[test]
    fn json_feed_shape() {
        let json = generate_json_feed(&SiteConfig::default(), &articles(), now()).unwrap();
        let feed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(feed["version"], JSON_FEED_VERSION);
        assert_eq!(feed["feed_url"], "https://shahidster.tech/feed.json");
        let items = feed["items"].as_array().unwrap();
        assert_eq!(items.len(), articles().len());

        let first = &items[0];
        assert_eq!(
            first["id"],
            "https://shahidster.tech/blog/latency-tax-separated-compute-storage"
        );
        assert_eq!(first["date_published"], "2026-01-01T00:00:00.000Z");
        assert_eq!(first["tags"][0], "Architecture");
        assert_eq!(first["tags"][1], "disaggregated storage");
        assert!(first["content_text"].as_str().unwrap().ends_with("..."));
    }

    #[test]
    fn json_feed_without_keywords_has_category_only() {
        let articles = articles();
        let skew = articles
            .iter()
            .find(|a| a.slug == "data-skew-distributed-joins")
            .unwrap();
        let json = generate_json_feed(&SiteConfig::default(), std::slice::from_ref(skew), now())
            .unwrap();
        let feed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(feed["items"][0]["tags"], serde_json::json!(["Performance"]));
    }
}
