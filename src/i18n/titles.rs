//! Document titles per page and language

use std::collections::HashMap;

/// Site name, also the title of unknown pages
pub const SITE_NAME: &str = "LingYe Aluminum";

/// Page title table keyed by (page, language)
pub fn get_titles() -> HashMap<(&'static str, &'static str), &'static str> {
    let mut t = HashMap::new();

    // Home
    t.insert(("home", "en"), "LingYe Aluminum");
    t.insert(("home", "zh"), "lingye \u{94DD}\u{4E1A}");
    t.insert(("home", "es"), "LingYe Aluminum");
    t.insert(("home", "pt"), "LingYe Aluminum");

    // About
    t.insert(("about", "en"), "About Us - Aluminum Expert");
    t.insert(("about", "zh"), "\u{5173}\u{4E8E}\u{6211}\u{4EEC} - \u{94DD}\u{4E1A}\u{4E13}\u{5BB6}");
    t.insert(("about", "es"), "Sobre Nosotros - Aluminum Expert");
    t.insert(("about", "pt"), "Sobre N\u{00F3}s - Aluminum Expert");

    // Products
    t.insert(("products", "en"), "Products - Aluminum Expert");
    t.insert(("products", "zh"), "\u{4EA7}\u{54C1}\u{4E2D}\u{5FC3} - \u{94DD}\u{4E1A}\u{4E13}\u{5BB6}");
    t.insert(("products", "es"), "Productos - Aluminum Expert");
    t.insert(("products", "pt"), "Produtos - Aluminum Expert");

    // News
    t.insert(("news", "en"), "News - Aluminum Expert");
    t.insert(("news", "zh"), "\u{65B0}\u{95FB}\u{8D44}\u{8BAF} - \u{94DD}\u{4E1A}\u{4E13}\u{5BB6}");
    t.insert(("news", "es"), "Noticias - Aluminum Expert");
    t.insert(("news", "pt"), "Not\u{00ED}cias - Aluminum Expert");

    // News detail
    t.insert(("news_detail", "en"), "News Detail - Aluminum Expert");
    t.insert(("news_detail", "zh"), "\u{65B0}\u{95FB}\u{8BE6}\u{60C5} - \u{94DD}\u{4E1A}\u{4E13}\u{5BB6}");
    t.insert(("news_detail", "es"), "Detalle de Noticia - Aluminum Expert");
    t.insert(("news_detail", "pt"), "Detalhes da Not\u{00ED}cia - Aluminum Expert");

    // Inquiry
    t.insert(("inquiry", "en"), "Inquiry - Aluminum Expert");
    t.insert(("inquiry", "zh"), "\u{5728}\u{7EBF}\u{8BE2}\u{4EF7} - \u{94DD}\u{4E1A}\u{4E13}\u{5BB6}");
    t.insert(("inquiry", "es"), "Consulta - Aluminum Expert");
    t.insert(("inquiry", "pt"), "Consulta - Aluminum Expert");

    t
}

/// Title for a page.
///
/// A custom title wins; otherwise the page's title in `language`, then in
/// English, then the site name.
pub fn page_title(page: &str, language: &str, custom: Option<&str>) -> String {
    if let Some(custom) = custom.filter(|c| !c.is_empty()) {
        return custom.to_string();
    }

    let titles = get_titles();
    titles
        .get(&(page, language))
        .or_else(|| titles.get(&(page, "en")))
        .map(|title| title.to_string())
        .unwrap_or_else(|| SITE_NAME.to_string())
}

/// Title for a news article: `"{article} - {news detail title}"`
pub fn news_detail_title(article: Option<&str>, language: &str) -> String {
    let base = page_title("news_detail", language, None);
    match article.filter(|a| !a.is_empty()) {
        Some(article) => format!("{} - {}", article, base),
        None => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_page_has_all_languages() {
        let titles = get_titles();
        for page in ["home", "about", "products", "news", "news_detail", "inquiry"] {
            for lang in ["en", "zh", "es", "pt"] {
                assert!(titles.contains_key(&(page, lang)), "{} / {}", page, lang);
            }
        }
    }

    #[test]
    fn test_page_title_fallbacks() {
        assert_eq!(page_title("products", "es", None), "Productos - Aluminum Expert");
        assert_eq!(page_title("products", "ru", None), "Products - Aluminum Expert");
        assert_eq!(page_title("showcase", "en", None), SITE_NAME);
        assert_eq!(page_title("products", "en", Some("6063 T-Slot")), "6063 T-Slot");
        assert_eq!(page_title("products", "en", Some("")), "Products - Aluminum Expert");
    }

    #[test]
    fn test_news_detail_title() {
        assert_eq!(
            news_detail_title(Some("New Extrusion Line"), "en"),
            "New Extrusion Line - News Detail - Aluminum Expert"
        );
        assert_eq!(news_detail_title(None, "pt"), "Detalhes da Not\u{00ED}cia - Aluminum Expert");
    }
}
