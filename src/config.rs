// Layout loading module
// Builds a widget tree from a YAML layout file

use log::{debug, info, warn};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

use crate::core::{ConfigDict, TreeError, Widget, WidgetId, WidgetKind, WidgetTree};
use crate::elements::{Button, Tab, TabBar, Text};
use crate::ui::{styles::parse_color, StyleColor};

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("failed to read layout file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid layout: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// Top level of a layout file
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub items: Vec<ItemConfigYaml>,
}

fn default_title() -> String {
    "tabtree".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    TabBar,
    Tab,
    Text,
    Button,
}

/// One widget of a layout file
///
/// `type`, `name`, `colors` and `children` are structural. Every other key
/// (`label`, `tip`, `closable`, `reorderable`, ...) is handed to the widget
/// as its configuration dictionary.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemConfigYaml {
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub name: String,
    /// Style slot (`text`, `tab`, `tab_active`, ...) to color name or `#rrggbb`
    #[serde(default)]
    pub colors: BTreeMap<String, String>,
    #[serde(default)]
    pub children: Vec<ItemConfigYaml>,
    #[serde(flatten)]
    pub options: ConfigDict,
}

/// Load a layout file, defaulting to the bundled demo layout
pub fn load_layout(layout_path: Option<PathBuf>) -> Result<LayoutConfig, LayoutError> {
    let path = layout_path.unwrap_or_else(|| {
        let mut default_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        default_path.push("src");
        default_path.push("layout.yaml");
        default_path
    });

    let contents = fs::read_to_string(&path).map_err(|source| LayoutError::Io {
        path: path.clone(),
        source,
    })?;
    let layout = parse_layout(&contents)?;
    info!("loaded layout '{}' from {}", layout.title, path.display());
    Ok(layout)
}

pub fn parse_layout(contents: &str) -> Result<LayoutConfig, LayoutError> {
    Ok(serde_yaml::from_str(contents)?)
}

/// Create the layout's widgets under the tree root, returning the top-level handles
pub fn build_layout(tree: &mut WidgetTree, layout: &LayoutConfig) -> Result<Vec<WidgetId>, LayoutError> {
    let mut roots = Vec::with_capacity(layout.items.len());
    for item in &layout.items {
        roots.push(build_item(tree, None, item)?);
    }
    debug!("layout built: {} widgets", tree.len());
    Ok(roots)
}

fn build_item(tree: &mut WidgetTree, parent: Option<WidgetId>, item: &ItemConfigYaml) -> Result<WidgetId, LayoutError> {
    let kind = match item.item_type {
        ItemType::TabBar => WidgetKind::TabBar(TabBar::new()),
        ItemType::Tab => WidgetKind::Tab(Tab::new()),
        ItemType::Text => WidgetKind::Text(Text::default()),
        ItemType::Button => WidgetKind::Button(Button),
    };

    let id = tree.add(parent, Widget::new(&item.name, kind))?;
    tree.configure_item(id, Some(&item.options))?;

    for (key, value) in &item.colors {
        let Some(target) = StyleColor::from_key(key) else {
            warn!("'{}': unknown color slot '{}'", item.name, key);
            continue;
        };
        let Some(color) = parse_color(value) else {
            warn!("'{}': unknown color '{}' for '{}'", item.name, value, key);
            continue;
        };
        tree.add_color_style(id, target, color)?;
    }

    for child in &item.children {
        build_item(tree, Some(id), child)?;
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    const LAYOUT: &str = r##"
title: demo
items:
  - type: tab_bar
    name: bar
    callback: changed
    reorderable: true
    children:
      - type: tab
        name: a
        label: Alpha
        closable: true
        children:
          - type: text
            name: a_text
            value: hello
            colors:
              text: "#ff0000"
              nonsense: red
      - type: tab
        name: b
"##;

    #[test]
    fn test_build_layout() {
        let layout = parse_layout(LAYOUT).unwrap();
        assert_eq!(layout.title, "demo");

        let mut tree = WidgetTree::new();
        let roots = build_layout(&mut tree, &layout).unwrap();
        assert_eq!(roots.len(), 1);
        let bar = roots[0];

        let widget = tree.get(bar).unwrap();
        assert_eq!(widget.callback.as_deref(), Some("changed"));
        assert!(tree.tab_bar(bar).unwrap().reorderable());
        assert_eq!(tree.children(bar).len(), 2);

        let a = tree.find("a").unwrap();
        assert_eq!(tree.get(a).unwrap().label, "Alpha");
        assert!(tree.tab(a).unwrap().closable);

        let text = tree.get(tree.find("a_text").unwrap()).unwrap();
        assert_eq!(text.colors, vec![(StyleColor::Text, Color::Rgb(255, 0, 0))]);
    }

    #[test]
    fn test_tab_outside_tab_bar_is_rejected() {
        let layout = parse_layout(
            r#"
items:
  - type: tab
    name: orphan
"#,
        )
        .unwrap();
        let mut tree = WidgetTree::new();
        let err = build_layout(&mut tree, &layout).unwrap_err();
        assert!(matches!(err, LayoutError::Tree(TreeError::TabOutsideTabBar { .. })));
    }

    #[test]
    fn test_unknown_type_is_a_yaml_error() {
        let err = parse_layout("items:\n  - type: slider\n    name: s\n").unwrap_err();
        assert!(matches!(err, LayoutError::Yaml(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = load_layout(Some(PathBuf::from("/nonexistent/layout.yaml"))).unwrap_err();
        assert!(matches!(err, LayoutError::Io { .. }));
    }

    #[test]
    fn test_bundled_layout_builds() {
        let layout = load_layout(None).unwrap();
        let mut tree = WidgetTree::new();
        build_layout(&mut tree, &layout).unwrap();
        assert!(tree.find("main_tabs").is_some());
    }
}
