//! Item discovery.
//!
//! Scans the parsed document for elements carrying the cube-item marker and
//! builds the ordered item list the rest of the widget works from.

use crate::config::CubeConfig;
use crate::dom::{DomNode, DomTree};

/// One logical navigation item.
///
/// `number` is the explicit 1-based sort key from the marker attribute;
/// `index` is the position after sorting. The fragment is the item element
/// itself and is what gets baked into a face texture.
#[derive(Debug, Clone)]
pub struct Item {
    pub index: usize,
    pub number: i32,
    pub link: String,
    pub fragment: DomNode,
}

/// Collect and order cube items from a parsed document.
///
/// Elements carrying `config.item_attr` become items. The attribute value is
/// the explicit ordering number; absent or unparsable values fall back to the
/// 1-based discovery order. Sorting is stable, so equal numbers keep their
/// discovery order. An empty result is not an error — the caller skips
/// baking and disables navigation.
pub fn load_items(tree: &DomTree, config: &CubeConfig) -> Vec<Item> {
    let mut items: Vec<Item> = Vec::new();

    tree.root.walk_elements(&mut |el| {
        if let Some(raw) = el.attr(&config.item_attr) {
            let discovery_number = items.len() as i32 + 1;
            let number = raw.trim().parse::<i32>().unwrap_or(discovery_number);
            let link = el.attr(&config.link_attr).unwrap_or("").to_string();
            items.push(Item {
                index: 0,
                number,
                link,
                fragment: el.clone(),
            });
        }
    });

    if items.is_empty() {
        log::warn!(
            "no cube items found; expected elements with the {} attribute",
            config.item_attr
        );
        return items;
    }

    items.sort_by_key(|item| item.number);
    for (index, item) in items.iter_mut().enumerate() {
        item.index = index;
    }

    log::info!(
        "loaded {} cube items: {:?}",
        items.len(),
        items
            .iter()
            .map(|i| (i.number, i.link.as_str()))
            .collect::<Vec<_>>()
    );

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parser::parse_html;

    fn load(html: &str) -> Vec<Item> {
        let tree = parse_html(html, "https://example.com");
        load_items(&tree, &CubeConfig::default())
    }

    #[test]
    fn sorts_by_explicit_number() {
        let items = load(
            r#"<body>
                <div data-cube-item="3" data-link="c"></div>
                <div data-cube-item="1" data-link="a"></div>
                <div data-cube-item="2" data-link="b"></div>
            </body>"#,
        );
        let links: Vec<&str> = items.iter().map(|i| i.link.as_str()).collect();
        assert_eq!(links, vec!["a", "b", "c"]);
        assert_eq!(items[0].index, 0);
        assert_eq!(items[2].index, 2);
    }

    #[test]
    fn unparsable_number_falls_back_to_discovery_order() {
        let items = load(
            r#"<body>
                <div data-cube-item="" data-link="first"></div>
                <div data-cube-item="x" data-link="second"></div>
            </body>"#,
        );
        assert_eq!(items[0].number, 1);
        assert_eq!(items[1].number, 2);
        assert_eq!(items[0].link, "first");
    }

    #[test]
    fn ties_keep_discovery_order() {
        let items = load(
            r#"<body>
                <div data-cube-item="5" data-link="p"></div>
                <div data-cube-item="5" data-link="q"></div>
            </body>"#,
        );
        assert_eq!(items[0].link, "p");
        assert_eq!(items[1].link, "q");
    }

    #[test]
    fn missing_link_is_empty_string() {
        let items = load(r#"<body><div data-cube-item="1"></div></body>"#);
        assert_eq!(items[0].link, "");
    }

    #[test]
    fn no_items_yields_empty_list() {
        let items = load(r#"<body><div class="plain"></div></body>"#);
        assert!(items.is_empty());
    }

    #[test]
    fn numbers_need_not_be_contiguous() {
        let items = load(
            r#"<body>
                <div data-cube-item="10" data-link="ten"></div>
                <div data-cube-item="2" data-link="two"></div>
            </body>"#,
        );
        assert_eq!(items[0].link, "two");
        assert_eq!(items[1].link, "ten");
        assert_eq!(items[1].number, 10);
    }
}
