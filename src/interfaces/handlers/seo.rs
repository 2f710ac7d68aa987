use actix_web::{get, web, HttpResponse, Responder};

use crate::{
    constants::STATIC_PAGES,
    entities::{blog_post::BlogPost, project::Project},
    errors::AppError,
    AppState,
};

/// Sitemap regenerated per request from canonical slugs, so it always
/// reflects the store without a publish step.
#[get("/sitemap.xml")]
pub async fn sitemap(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let posts = state.blog_handler.get_published_blog_posts().await?;
    let projects = state.project_handler.get_published_projects().await?;

    let xml = build_sitemap_xml(&state.site_base_url, &posts, &projects);

    Ok(HttpResponse::Ok()
        .content_type("application/xml; charset=utf-8")
        .body(xml))
}

#[get("/robots.txt")]
pub async fn robots(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(build_robots_txt(&state.site_base_url))
}

pub fn build_sitemap_xml(base_url: &str, posts: &[BlogPost], projects: &[Project]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );

    for (path, change_freq, priority) in STATIC_PAGES {
        push_url(&mut xml, &format!("{base_url}{path}"), None, change_freq, priority);
    }

    for post in posts {
        push_url(
            &mut xml,
            &format!("{base_url}/blog/{}", post.slug),
            Some(post.date.format("%Y-%m-%d").to_string()),
            "monthly",
            "0.6",
        );
    }

    for project in projects {
        push_url(
            &mut xml,
            &format!("{base_url}/case-studies/{}", project.slug),
            Some(project.updated_at.format("%Y-%m-%d").to_string()),
            "monthly",
            "0.7",
        );
    }

    xml.push_str("</urlset>\n");
    xml
}

fn push_url(xml: &mut String, loc: &str, lastmod: Option<String>, change_freq: &str, priority: &str) {
    xml.push_str("  <url>\n");
    xml.push_str(&format!("    <loc>{}</loc>\n", xml_escape(loc)));
    if let Some(lastmod) = lastmod {
        xml.push_str(&format!("    <lastmod>{lastmod}</lastmod>\n"));
    }
    xml.push_str(&format!("    <changefreq>{change_freq}</changefreq>\n"));
    xml.push_str(&format!("    <priority>{priority}</priority>\n"));
    xml.push_str("  </url>\n");
}

pub fn build_robots_txt(base_url: &str) -> String {
    let mut body = String::from(
        "User-agent: *\n\
         Allow: /\n\
         Disallow: /admin\n\
         Disallow: /api/\n\n",
    );

    // Content-scraping crawlers are kept off the whole site
    for bot in ["GPTBot", "ChatGPT-User", "CCBot"] {
        body.push_str(&format!("User-agent: {bot}\nDisallow: /\n\n"));
    }

    body.push_str(&format!("Sitemap: {base_url}/sitemap.xml\n"));
    body.push_str(&format!("Host: {base_url}\n"));
    body
}

fn xml_escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn post(slug: &str) -> BlogPost {
        BlogPost {
            id: 1,
            title: "Post".into(),
            slug: slug.to_string(),
            excerpt: "excerpt".into(),
            content: "content".into(),
            image: None,
            tags: vec![],
            author: "Editorial Team".into(),
            date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            is_published: true,
            seo_title: None,
            seo_description: None,
            faqs: vec![],
            cta: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn sitemap_lists_static_and_dynamic_urls() {
        let xml = build_sitemap_xml("https://example.com", &[post("my-first-post")], &[]);

        assert!(xml.contains("<loc>https://example.com</loc>"));
        assert!(xml.contains("<loc>https://example.com/blog/my-first-post</loc>"));
        assert!(xml.contains("<lastmod>2025-03-14</lastmod>"));
        assert!(xml.starts_with("<?xml"));
        assert!(xml.trim_end().ends_with("</urlset>"));
    }

    #[test]
    fn sitemap_escapes_reserved_characters() {
        let xml = build_sitemap_xml("https://example.com?a=1&b=2", &[], &[]);
        assert!(xml.contains("a=1&amp;b=2"));
    }

    #[test]
    fn robots_disallows_admin_and_points_at_sitemap() {
        let body = build_robots_txt("https://example.com");
        assert!(body.contains("Disallow: /admin"));
        assert!(body.contains("Sitemap: https://example.com/sitemap.xml"));
    }
}
