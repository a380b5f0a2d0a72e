//! Media URL resolution against the API base

/// Hosts that only exist on a developer machine
const DEV_HOSTS: [&str; 2] = ["127.0.0.1:9001", "localhost:9001"];

/// Turn a media reference from the API or a template into an absolute URL
pub fn resolve_media_url(base: &str, url: &str) -> String {
    let base = base.trim_end_matches('/');
    let url = url.trim();

    if url.is_empty() {
        return String::new();
    }

    if url.starts_with("http://") || url.starts_with("https://") {
        if DEV_HOSTS.iter().any(|host| url.contains(host)) {
            return match reqwest::Url::parse(url) {
                Ok(parsed) => format!("{}{}", base, parsed.path()),
                Err(e) => {
                    log::warn!("Could not parse media URL '{}': {}", url, e);
                    url.to_string()
                }
            };
        }
        return url.to_string();
    }

    if url.starts_with('/') {
        format!("{}{}", base, url)
    } else {
        format!("{}/{}", base, url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://lingyealu.cn";

    #[test]
    fn test_empty_url() {
        assert_eq!(resolve_media_url(BASE, ""), "");
        assert_eq!(resolve_media_url(BASE, "   "), "");
    }

    #[test]
    fn test_relative_paths() {
        assert_eq!(
            resolve_media_url(BASE, "/media/products/a.jpg"),
            "http://lingyealu.cn/media/products/a.jpg"
        );
        assert_eq!(
            resolve_media_url(BASE, "media/products/a.jpg"),
            "http://lingyealu.cn/media/products/a.jpg"
        );
        assert_eq!(
            resolve_media_url("http://lingyealu.cn/", "/images/factory/packing.jpg"),
            "http://lingyealu.cn/images/factory/packing.jpg"
        );
    }

    #[test]
    fn test_dev_host_is_rebased() {
        assert_eq!(
            resolve_media_url(BASE, "http://127.0.0.1:9001/media/x.png?v=2"),
            "http://lingyealu.cn/media/x.png"
        );
        assert_eq!(
            resolve_media_url(BASE, "http://localhost:9001/media/y.png"),
            "http://lingyealu.cn/media/y.png"
        );
    }

    #[test]
    fn test_foreign_absolute_url_untouched() {
        let url = "https://cdn.example.com/media/z.png";
        assert_eq!(resolve_media_url(BASE, url), url);
    }
}
