//! Reactive callbacks of the overview page.
//!
//! A callback maps one input `(element_id, property)` to one output graph.
//! Handlers are plain functions of the loaded dataset and the new input
//! value; they hold no state between calls.

use std::fmt;

use dsinsights_core::RenderedObjectInfo;

use super::{
    object_count_for_label_config, object_count_for_label_figure,
    visible_pixels_for_label_config, visible_pixels_for_label_figure, OverviewConfig, FIGURE,
    OBJECT_COUNT_FILTER, PER_OBJECT_COUNT_FILTER_GRAPH, PIXELS_VISIBLE_FILTER,
    PIXELS_VISIBLE_FILTER_GRAPH, VALUE,
};
use crate::spec::ChartSpec;
use crate::{Error, Result};

/// An element property.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Port {
    pub element_id: String,
    pub property: String,
}

impl Port {
    #[must_use]
    pub fn new(element_id: impl Into<String>, property: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
            property: property.into(),
        }
    }

    fn matches(&self, element_id: &str, property: &str) -> bool {
        self.element_id == element_id && self.property == property
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.element_id, self.property)
    }
}

/// Read-only state handed to handlers.
#[derive(Debug, Clone, Copy)]
pub struct HandlerContext<'a> {
    pub info: &'a RenderedObjectInfo,
    pub config: &'a OverviewConfig,
}

/// Computes the output chart for a new input value.
pub type Handler = fn(&HandlerContext<'_>, &str) -> Result<ChartSpec>;

/// Empty chart with the titles the handler would have produced.
pub type Fallback = fn(&OverviewConfig, &str) -> ChartSpec;

/// One input-to-output binding.
#[derive(Clone)]
pub struct Callback {
    pub input: Port,
    pub output: Port,
    handler: Handler,
    fallback: Fallback,
}

impl Callback {
    #[must_use]
    pub fn new(input: Port, output: Port, handler: Handler, fallback: Fallback) -> Self {
        Self {
            input,
            output,
            handler,
            fallback,
        }
    }

    /// Runs the handler. A failing handler yields the fallback chart.
    #[must_use]
    pub fn invoke(&self, ctx: &HandlerContext<'_>, value: &str) -> Update {
        let figure = match (self.handler)(ctx, value) {
            Ok(spec) => spec,
            Err(e) => {
                log::warn!("callback {} -> {} failed: {e}", self.input, self.output);
                (self.fallback)(ctx.config, value)
            }
        };
        Update {
            output: self.output.clone(),
            figure,
        }
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("input", &self.input)
            .field("output", &self.output)
            .finish_non_exhaustive()
    }
}

/// A new figure for an output element.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub output: Port,
    pub figure: ChartSpec,
}

/// Callbacks keyed by their input.
#[derive(Debug, Clone, Default)]
pub struct CallbackRegistry {
    callbacks: Vec<Callback>,
}

impl CallbackRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the two overview filter callbacks.
    #[must_use]
    pub fn overview() -> Self {
        Self {
            callbacks: vec![
                Callback::new(
                    Port::new(OBJECT_COUNT_FILTER, VALUE),
                    Port::new(PER_OBJECT_COUNT_FILTER_GRAPH, FIGURE),
                    update_object_counts_figure,
                    |config, label| object_count_for_label_config(config, label).empty_chart(),
                ),
                Callback::new(
                    Port::new(PIXELS_VISIBLE_FILTER, VALUE),
                    Port::new(PIXELS_VISIBLE_FILTER_GRAPH, FIGURE),
                    update_visible_pixels_figure,
                    |config, label| visible_pixels_for_label_config(config, label).empty_chart(),
                ),
            ],
        }
    }

    /// Adds a callback.
    ///
    /// # Errors
    /// Returns `DuplicateCallback` if its input already has a callback.
    pub fn register(&mut self, callback: Callback) -> Result<()> {
        let input = &callback.input;
        if self.find(&input.element_id, &input.property).is_some() {
            return Err(Error::DuplicateCallback {
                element_id: input.element_id.clone(),
                property: input.property.clone(),
            });
        }
        self.callbacks.push(callback);
        Ok(())
    }

    /// Returns the callback listening on `element_id.property`.
    #[must_use]
    pub fn find(&self, element_id: &str, property: &str) -> Option<&Callback> {
        self.callbacks
            .iter()
            .find(|c| c.input.matches(element_id, property))
    }

    /// Iterates over the registered callbacks in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Callback> {
        self.callbacks.iter()
    }

    /// Runs the callback for `element_id.property`, if any.
    #[must_use]
    pub fn dispatch(
        &self,
        ctx: &HandlerContext<'_>,
        element_id: &str,
        property: &str,
        value: &str,
    ) -> Option<Update> {
        let Some(callback) = self.find(element_id, property) else {
            log::warn!("no callback registered for {element_id}.{property}");
            return None;
        };
        Some(callback.invoke(ctx, value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

fn update_object_counts_figure(ctx: &HandlerContext<'_>, label: &str) -> Result<ChartSpec> {
    object_count_for_label_figure(ctx.info, ctx.config, label)
}

fn update_visible_pixels_figure(ctx: &HandlerContext<'_>, label: &str) -> Result<ChartSpec> {
    visible_pixels_for_label_figure(ctx.info, ctx.config, label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::{histogram_plot, HistogramConfig};
    use dsinsights_core::stats::CaptureCount;
    use dsinsights_core::ObjectTable;

    fn info() -> RenderedObjectInfo {
        let mut table = ObjectTable::default();
        table.push("1", 1, "cube", 0, 10);
        table.push("2", 1, "cube", 0, 20);
        table.push("2", 2, "sphere", 1, 30);
        RenderedObjectInfo::new(table)
    }

    fn broken(_: &HandlerContext<'_>, _: &str) -> Result<ChartSpec> {
        let rows: Vec<CaptureCount> = Vec::new();
        histogram_plot(&rows, &HistogramConfig::new("area"))
    }

    fn titled_fallback(_: &OverviewConfig, value: &str) -> ChartSpec {
        HistogramConfig::new("count")
            .with_title(format!("Fallback {value}"))
            .empty_chart()
    }

    #[test]
    fn test_overview_registry() {
        let registry = CallbackRegistry::overview();
        assert_eq!(registry.len(), 2);
        let callback = registry.find(OBJECT_COUNT_FILTER, VALUE).unwrap();
        assert_eq!(callback.output, Port::new(PER_OBJECT_COUNT_FILTER_GRAPH, FIGURE));
        assert!(registry.find(OBJECT_COUNT_FILTER, FIGURE).is_none());
    }

    #[test]
    fn test_dispatch_recomputes_output() {
        let info = info();
        let config = OverviewConfig::default();
        let ctx = HandlerContext {
            info: &info,
            config: &config,
        };
        let registry = CallbackRegistry::overview();

        let update = registry
            .dispatch(&ctx, PIXELS_VISIBLE_FILTER, VALUE, "cube")
            .unwrap();
        assert_eq!(update.output.element_id, PIXELS_VISIBLE_FILTER_GRAPH);
        assert_eq!(update.figure.title, "Distribution of Visible Pixels For cube");
        assert_eq!(update.figure.as_histogram().unwrap().values, vec![10.0, 20.0]);
    }

    #[test]
    fn test_dispatch_unknown_input() {
        let info = info();
        let config = OverviewConfig::default();
        let ctx = HandlerContext {
            info: &info,
            config: &config,
        };
        assert!(CallbackRegistry::overview()
            .dispatch(&ctx, "no_such_dropdown", VALUE, "cube")
            .is_none());
    }

    #[test]
    fn test_failing_handler_uses_fallback() {
        let info = info();
        let config = OverviewConfig::default();
        let ctx = HandlerContext {
            info: &info,
            config: &config,
        };
        let mut registry = CallbackRegistry::new();
        registry
            .register(Callback::new(
                Port::new("broken_filter", VALUE),
                Port::new("broken_graph", FIGURE),
                broken,
                titled_fallback,
            ))
            .unwrap();

        let update = registry
            .dispatch(&ctx, "broken_filter", VALUE, "cube")
            .unwrap();
        assert!(update.figure.is_empty());
        assert_eq!(update.figure.title, "Fallback cube");
    }

    #[test]
    fn test_duplicate_registration() {
        let mut registry = CallbackRegistry::overview();
        let err = registry
            .register(Callback::new(
                Port::new(OBJECT_COUNT_FILTER, VALUE),
                Port::new("other_graph", FIGURE),
                broken,
                titled_fallback,
            ))
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateCallback { .. }));
        assert_eq!(registry.len(), 2);
    }
}
