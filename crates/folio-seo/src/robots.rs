use folio_config::SiteConfig;

pub fn generate_robots_txt(site: &SiteConfig) -> String {
    format!(
        "User-agent: *\nAllow: /\n\nSitemap: {}/sitemap.xml\n",
        site.base_url()
    )
}
