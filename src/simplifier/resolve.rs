use url::Url;

use crate::app::{GleanerError, Result};

/// Origin (`scheme://host[:port]`) used for root-relative URLs.
pub fn origin_for(page_url: &str, canonical: Option<&str>) -> Result<String> {
    if let Some(origin) = canonical {
        return Ok(origin.trim_end_matches('/').to_string());
    }

    let origin = Url::parse(page_url)?.origin();
    if !origin.is_tuple() {
        return Err(GleanerError::InvalidUrl(url::ParseError::EmptyHost));
    }
    Ok(origin.ascii_serialization())
}

/// Absolute image source: `//` gains `https:`, `/` gains the origin.
pub fn resolve_image_src(src: &str, origin: &str) -> String {
    if src.starts_with("//") {
        format!("https:{src}")
    } else if src.starts_with('/') {
        format!("{origin}{src}")
    } else {
        src.to_string()
    }
}

/// Root-relative hrefs gain the origin; everything else passes through.
pub fn resolve_href(href: &str, origin: &str) -> String {
    if href.starts_with('/') && !href.starts_with("//") {
        format!("{origin}{href}")
    } else {
        href.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://www.ithome.com";

    #[test]
    fn test_origin_from_page_url() {
        let origin = origin_for("https://www.ithome.com/0/800/123.htm?x=1", None).unwrap();
        assert_eq!(origin, "https://www.ithome.com");

        let origin = origin_for("http://localhost:8080/a", None).unwrap();
        assert_eq!(origin, "http://localhost:8080");
    }

    #[test]
    fn test_canonical_origin_wins() {
        let origin = origin_for("https://m.ithome.com/a", Some("https://www.ithome.com/")).unwrap();
        assert_eq!(origin, ORIGIN);
    }

    #[test]
    fn test_origin_rejects_bad_urls() {
        assert!(origin_for("not a url", None).is_err());
        assert!(origin_for("data:text/plain,hi", None).is_err());
    }

    #[test]
    fn test_image_src_resolution() {
        assert_eq!(
            resolve_image_src("//img.ithome.com/a.jpg", ORIGIN),
            "https://img.ithome.com/a.jpg"
        );
        assert_eq!(
            resolve_image_src("/img/a.jpg", ORIGIN),
            "https://www.ithome.com/img/a.jpg"
        );
        assert_eq!(
            resolve_image_src("https://cdn.example.com/a.jpg", ORIGIN),
            "https://cdn.example.com/a.jpg"
        );
    }

    #[test]
    fn test_href_resolution() {
        assert_eq!(resolve_href("/foo", ORIGIN), "https://www.ithome.com/foo");
        assert_eq!(
            resolve_href("//other.example.com/x", ORIGIN),
            "//other.example.com/x"
        );
        assert_eq!(resolve_href("https://a.b/c", ORIGIN), "https://a.b/c");
        assert_eq!(resolve_href("#top", ORIGIN), "#top");
    }
}
