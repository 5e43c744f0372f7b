//! Overview element tree.

use dsinsights_core::RenderedObjectInfo;
use serde_json::{json, Map, Value};

use super::{
    pixels_visible_per_object_figure, per_capture_count_figure, total_counts_figure,
    OverviewConfig, OBJECT_COUNT_FILTER, OVERVIEW, PER_OBJECT_COUNT,
    PER_OBJECT_COUNT_FILTER_GRAPH, PIXELS_VISIBLE_FILTER, PIXELS_VISIBLE_FILTER_GRAPH,
    PIXELS_VISIBLE_PER_OBJECT, TOTAL_COUNT,
};
use crate::spec::ChartSpec;
use crate::{Error, Result};

/// Container style.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style {
    /// Number of columns children are laid out in.
    pub column_count: Option<u32>,
    pub text_align: Option<String>,
}

impl Style {
    #[must_use]
    pub fn columns(count: u32) -> Self {
        Self {
            column_count: Some(count),
            text_align: None,
        }
    }

    #[must_use]
    pub fn centered(mut self) -> Self {
        self.text_align = Some("center".to_string());
        self
    }

    fn to_json(&self) -> Value {
        let mut map = Map::new();
        if let Some(count) = self.column_count {
            map.insert("columnCount".into(), json!(count));
        }
        if let Some(align) = &self.text_align {
            map.insert("text-align".into(), json!(align));
        }
        Value::Object(map)
    }
}

/// A layout element.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// A container.
    Div {
        id: Option<String>,
        children: Vec<Element>,
        style: Style,
    },
    /// Markdown text.
    Markdown(String),
    /// A chart; `figure` is `None` until a callback fills it.
    Graph {
        id: String,
        figure: Option<ChartSpec>,
    },
    /// A single-choice dropdown.
    Dropdown {
        id: String,
        options: Vec<String>,
        value: Option<String>,
    },
}

impl Element {
    /// Returns the element id, if it has one.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Element::Div { id, .. } => id.as_deref(),
            Element::Graph { id, .. } | Element::Dropdown { id, .. } => Some(id.as_str()),
            Element::Markdown(_) => None,
        }
    }

    fn div(children: Vec<Element>, style: Style) -> Self {
        Element::Div {
            id: None,
            children,
            style,
        }
    }

    fn graph(id: &str, figure: Option<ChartSpec>) -> Self {
        Element::Graph {
            id: id.to_string(),
            figure,
        }
    }

    fn dropdown(id: &str, options: &[String]) -> Self {
        Element::Dropdown {
            id: id.to_string(),
            options: options.to_vec(),
            value: options.first().cloned(),
        }
    }

    fn find(&self, target: &str) -> Option<&Element> {
        if self.id() == Some(target) {
            return Some(self);
        }
        match self {
            Element::Div { children, .. } => children.iter().find_map(|c| c.find(target)),
            _ => None,
        }
    }

    fn find_mut(&mut self, target: &str) -> Option<&mut Element> {
        if self.id() == Some(target) {
            return Some(self);
        }
        match self {
            Element::Div { children, .. } => {
                children.iter_mut().find_map(|c| c.find_mut(target))
            }
            _ => None,
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Element::Div {
                id,
                children,
                style,
            } => {
                let mut value = json!({
                    "type": "Div",
                    "children": children.iter().map(Element::to_json).collect::<Vec<_>>(),
                });
                if let Some(id) = id {
                    value["id"] = json!(id);
                }
                if *style != Style::default() {
                    value["style"] = style.to_json();
                }
                value
            }
            Element::Markdown(text) => json!({ "type": "Markdown", "children": text }),
            Element::Graph { id, figure } => {
                let mut value = json!({ "type": "Graph", "id": id });
                if let Some(figure) = figure {
                    value["figure"] = figure.to_plotly();
                }
                value
            }
            Element::Dropdown { id, options, value } => json!({
                "type": "Dropdown",
                "id": id,
                "options": options
                    .iter()
                    .map(|o| json!({ "label": o, "value": o }))
                    .collect::<Vec<_>>(),
                "value": value,
            }),
        }
    }
}

/// The overview element tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    root: Element,
}

impl Layout {
    /// Builds the overview page for a loaded dataset.
    ///
    /// The dropdowns default to the first label name; filter graphs are left
    /// without a figure.
    ///
    /// # Errors
    /// Propagates chart builder errors.
    pub fn overview(info: &RenderedObjectInfo, config: &OverviewConfig) -> Result<Self> {
        let label_names = info.label_names();

        let root = Element::div(
            vec![
                Element::Div {
                    id: Some(OVERVIEW.to_string()),
                    children: Vec::new(),
                    style: Style::default(),
                },
                Element::graph(TOTAL_COUNT, Some(total_counts_figure(info)?)),
                Element::div(
                    vec![
                        Element::Markdown("## Object Count Distribution".to_string()),
                        Element::dropdown(OBJECT_COUNT_FILTER, &label_names),
                    ],
                    Style::columns(2).centered(),
                ),
                Element::div(
                    vec![
                        Element::graph(
                            PER_OBJECT_COUNT,
                            Some(per_capture_count_figure(info, config)?),
                        ),
                        Element::graph(PER_OBJECT_COUNT_FILTER_GRAPH, None),
                    ],
                    Style::columns(2),
                ),
                Element::div(
                    vec![
                        Element::Markdown("## Visible Pixels Distribution".to_string()),
                        Element::dropdown(PIXELS_VISIBLE_FILTER, &label_names),
                    ],
                    Style::columns(2).centered(),
                ),
                Element::div(
                    vec![
                        Element::graph(
                            PIXELS_VISIBLE_PER_OBJECT,
                            Some(pixels_visible_per_object_figure(info, config)?),
                        ),
                        Element::graph(PIXELS_VISIBLE_FILTER_GRAPH, None),
                    ],
                    Style::columns(2),
                ),
            ],
            Style::default(),
        );
        Ok(Self { root })
    }

    /// Returns the root element.
    #[must_use]
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Finds an element by id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Element> {
        self.root.find(id)
    }

    /// Returns the figure of graph `id`, if it has one.
    #[must_use]
    pub fn figure(&self, id: &str) -> Option<&ChartSpec> {
        match self.find(id)? {
            Element::Graph { figure, .. } => figure.as_ref(),
            _ => None,
        }
    }

    /// Returns the current value of dropdown `id`.
    #[must_use]
    pub fn dropdown_value(&self, id: &str) -> Option<&str> {
        match self.find(id)? {
            Element::Dropdown { value, .. } => value.as_deref(),
            _ => None,
        }
    }

    /// Returns the options of dropdown `id`.
    #[must_use]
    pub fn dropdown_options(&self, id: &str) -> Option<&[String]> {
        match self.find(id)? {
            Element::Dropdown { options, .. } => Some(options),
            _ => None,
        }
    }

    /// Replaces the figure of graph `id`.
    ///
    /// # Errors
    /// Returns `UnknownElement` if no graph has this id.
    pub fn set_figure(&mut self, id: &str, spec: ChartSpec) -> Result<()> {
        match self.root.find_mut(id) {
            Some(Element::Graph { figure, .. }) => {
                *figure = Some(spec);
                Ok(())
            }
            _ => Err(Error::UnknownElement(id.to_string())),
        }
    }

    /// Sets the value of dropdown `id`.
    ///
    /// # Errors
    /// Returns `UnknownElement` if no dropdown has this id.
    pub fn set_dropdown_value(&mut self, id: &str, new_value: &str) -> Result<()> {
        match self.root.find_mut(id) {
            Some(Element::Dropdown { value, .. }) => {
                *value = Some(new_value.to_string());
                Ok(())
            }
            _ => Err(Error::UnknownElement(id.to_string())),
        }
    }

    /// Serializes the tree; figures are rendered as Plotly JSON.
    #[must_use]
    pub fn to_json(&self) -> Value {
        self.root.to_json()
    }
}
