use crate::config::CubeConfig;
use crate::dom::parser::parse_html;
use crate::dom::registry::{load_items, Item};
use crate::net::fetch::fetch_url;

/// Result of loading and processing the host page
pub struct MenuResult {
    pub title: String,
    pub url: String,
    pub items: Vec<Item>,
    pub fetch_status: u16,
}

/// Error during menu loading
#[derive(Debug)]
pub struct MenuError {
    pub message: String,
    pub phase: &'static str,
}

impl std::fmt::Display for MenuError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.phase, self.message)
    }
}

/// The menu pipeline: Fetch → Parse → Item registry
pub struct MenuEngine {
    config: CubeConfig,
}

impl MenuEngine {
    pub fn new(config: CubeConfig) -> Self {
        Self { config }
    }

    /// Load a host page URL through the full pipeline
    pub fn load_menu(&self, url: &str) -> Result<MenuResult, MenuError> {
        let fetch_result = fetch_url(url).map_err(|e| MenuError {
            message: e.message,
            phase: "fetch",
        })?;

        self.process_html(&fetch_result.html, &fetch_result.url, fetch_result.status)
    }

    /// Process raw HTML through the pipeline (for testing)
    pub fn process_html(
        &self,
        html: &str,
        url: &str,
        status: u16,
    ) -> Result<MenuResult, MenuError> {
        let tree = parse_html(html, url);
        let items = load_items(&tree, &self.config);

        Ok(MenuResult {
            title: tree.title,
            url: tree.url,
            items,
            fetch_status: status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn process_html_orders_items() {
        let engine = MenuEngine::new(CubeConfig::default());
        let html = r#"
        <html>
            <head><title>Menu</title></head>
            <body>
                <div data-cube-item="2" data-link="b"><h2>Second</h2></div>
                <div data-cube-item="1" data-link="a"><h2>First</h2></div>
            </body>
        </html>
        "#;

        let result = engine.process_html(html, "https://example.com", 200).unwrap();
        assert_eq!(result.title, "Menu");
        assert_eq!(result.items.len(), 2);
        assert_eq!(result.items[0].link, "a");
        assert_eq!(result.items[1].link, "b");
    }

    #[test]
    fn pages_without_items_still_succeed() {
        let engine = MenuEngine::new(CubeConfig::default());
        let result = engine
            .process_html("<html><body><p>plain</p></body></html>", "https://example.com", 200)
            .unwrap();
        assert!(result.items.is_empty());
    }
}
