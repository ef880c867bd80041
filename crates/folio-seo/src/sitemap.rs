//! `sitemap.xml` generation.

use chrono::NaiveDate;
use folio_config::SiteConfig;
use folio_content::Article;

use crate::dates::parse_article_date;
use crate::text::escape_xml;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
    Weekly,
    Monthly,
}

impl ChangeFreq {
    fn as_str(self) -> &'static str {
        match self {
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapUrl {
    pub loc: String,
    pub lastmod: NaiveDate,
    pub changefreq: ChangeFreq,
    pub priority: f32,
}

/// Homepage first, then one entry per article. Featured articles rank
/// slightly above the rest.
pub fn sitemap_urls(site: &SiteConfig, articles: &[Article], today: NaiveDate) -> Vec<SitemapUrl> {
    let base = site.base_url();
    let mut urls = Vec::with_capacity(articles.len() + 1);

    urls.push(SitemapUrl {
        loc: base.to_string(),
        lastmod: today,
        changefreq: ChangeFreq::Weekly,
        priority: 1.0,
    });

    urls.extend(articles.iter().map(|article| SitemapUrl {
        loc: format!("{base}/blog/{}", article.slug),
        lastmod: parse_article_date(&article.date).unwrap_or(today),
        changefreq: ChangeFreq::Monthly,
        priority: if article.featured { 0.9 } else { 0.8 },
    }));

    urls
}

pub fn generate_sitemap(site: &SiteConfig, articles: &[Article], today: NaiveDate) -> String {
    let entries: Vec<String> = sitemap_urls(site, articles, today)
        .iter()
        .map(|url| {
            format!(
                "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    <changefreq>{}</changefreq>\n    <priority>{:.1}</priority>\n  </url>",
                escape_xml(&url.loc),
                url.lastmod.format("%Y-%m-%d"),
                url.changefreq.as_str(),
                url.priority,
            )
        })
        .collect();

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n{}\n</urlset>\n",
        entries.join("\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 3).unwrap()
    }

    #[test]
    fn homepage_comes_first() {
        let articles = folio_content::builtin_articles().unwrap();
        let urls = sitemap_urls(&SiteConfig::default(), &articles, today());
        assert_eq!(urls.len(), articles.len() + 1);
        assert_eq!(urls[0].loc, "https://shahidster.tech");
        assert_eq!(urls[0].lastmod, today());
        assert_eq!(urls[0].changefreq, ChangeFreq::Weekly);
    }

    #[test]
    fn article_entries_use_month_and_featured_priority() {
        let articles = folio_content::builtin_articles().unwrap();
        let urls = sitemap_urls(&SiteConfig::default(), &articles, today());

        let cap = urls
            .iter()
            .find(|u| u.loc.ends_with("/blog/cap-theorem-production"))
            .unwrap();
        assert_eq!(cap.lastmod, NaiveDate::from_ymd_opt(2025, 11, 1).unwrap());
        assert_eq!(cap.priority, 0.9);

        let skew = urls
            .iter()
            .find(|u| u.loc.ends_with("/blog/data-skew-distributed-joins"))
            .unwrap();
        assert_eq!(skew.priority, 0.8);
        assert_eq!(skew.changefreq, ChangeFreq::Monthly);
    }

    #[test]
    fn unparsable_article_date_uses_today() {
        let mut articles = folio_content::builtin_articles().unwrap();
        articles.truncate(1);
        articles[0].date = "Someday".into();
        let urls = sitemap_urls(&SiteConfig::default(), &articles, today());
        assert_eq!(urls[1].lastmod, today());
    }

    #[test]
    fn xml_shape() {
        let articles = folio_content::builtin_articles().unwrap();
        let xml = generate_sitemap(&SiteConfig::default(), &articles, today());

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset"));
        assert!(xml.trim_end().ends_with("</urlset>"));
        assert_eq!(xml.matches("<url>").count(), articles.len() + 1);
        assert!(xml.contains(
            "<loc>https://shahidster.tech/blog/latency-tax-separated-compute-storage</loc>\n    <lastmod>2026-01-01</lastmod>"
        ));
        assert!(xml.contains("<priority>1.0</priority>"));
    }

    #[test]
    fn locations_are_escaped() {
        let site = SiteConfig {
            site_url: "https://example.com/?a=1&b=2".into(),
            ..Default::default()
        };
        let xml = generate_sitemap(&site, &[], today());
        assert!(xml.contains("<loc>https://example.com/?a=1&amp;b=2</loc>"));
    }
}
