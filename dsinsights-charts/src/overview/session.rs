//! One overview page bound to one loaded dataset.

use std::collections::BTreeMap;

use dsinsights_core::{CaptureSource, RenderedObjectInfo};

use super::callbacks::{CallbackRegistry, HandlerContext, Update};
use super::layout::Layout;
use super::{OverviewConfig, VALUE};
use crate::Result;

/// Selection state of a label dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterState {
    /// Page just loaded; the dropdown holds its default label.
    Initial(String),
    /// The user picked a label.
    Filtered(String),
}

impl FilterState {
    /// Returns the selected label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            FilterState::Initial(label) | FilterState::Filtered(label) => label,
        }
    }
}

/// Overview session state.
///
/// Owns the capture source, the table loaded from it, the rendered layout and
/// the selection state of each dropdown. Nothing is shared between sessions.
pub struct OverviewSession<S: CaptureSource> {
    source: S,
    info: RenderedObjectInfo,
    config: OverviewConfig,
    layout: Layout,
    callbacks: CallbackRegistry,
    filters: BTreeMap<String, FilterState>,
}

impl<S: CaptureSource> OverviewSession<S> {
    /// Loads the table from `source` and renders the initial page.
    ///
    /// Each filter graph is computed once for its dropdown's default label.
    ///
    /// # Errors
    /// Returns the load error if `source` cannot produce a table; it is not
    /// retried.
    pub fn init(source: S, config: OverviewConfig) -> Result<Self> {
        let info = RenderedObjectInfo::new(source.load()?);
        log::info!(
            "overview session for {}: {} objects in {} captures",
            source.describe(),
            info.num_objects(),
            info.num_captures()
        );

        let layout = Layout::overview(&info, &config)?;
        let mut session = Self {
            source,
            info,
            config,
            layout,
            callbacks: CallbackRegistry::overview(),
            filters: BTreeMap::new(),
        };

        let defaults: Vec<(String, String)> = session
            .callbacks
            .iter()
            .filter(|c| c.input.property == VALUE)
            .filter_map(|c| {
                let id = &c.input.element_id;
                let value = session.layout.dropdown_value(id)?;
                Some((id.clone(), value.to_string()))
            })
            .collect();
        for (id, label) in defaults {
            session.apply(&id, VALUE, &label);
            session.filters.insert(id, FilterState::Initial(label));
        }
        Ok(session)
    }

    /// Handles a new value of `element_id.property`.
    ///
    /// Recomputes the one dependent chart and returns it. Handler failures
    /// yield an empty chart with the expected titles. Returns `None` if
    /// nothing listens on the input.
    pub fn dispatch(&mut self, element_id: &str, property: &str, value: &str) -> Option<Update> {
        let update = self.apply(element_id, property, value)?;
        if property == VALUE {
            if let Err(e) = self.layout.set_dropdown_value(element_id, value) {
                log::warn!("{e}");
            }
            self.filters
                .insert(element_id.to_string(), FilterState::Filtered(value.to_string()));
        }
        Some(update)
    }

    fn apply(&mut self, element_id: &str, property: &str, value: &str) -> Option<Update> {
        let ctx = HandlerContext {
            info: &self.info,
            config: &self.config,
        };
        let update = self.callbacks.dispatch(&ctx, element_id, property, value)?;
        if let Err(e) = self
            .layout
            .set_figure(&update.output.element_id, update.figure.clone())
        {
            log::warn!("{e}");
        }
        Some(update)
    }

    /// Returns the selection state of dropdown `element_id`.
    #[must_use]
    pub fn filter_state(&self, element_id: &str) -> Option<&FilterState> {
        self.filters.get(element_id)
    }

    /// Returns the current layout.
    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Returns the loaded dataset.
    #[must_use]
    pub fn info(&self) -> &RenderedObjectInfo {
        &self.info
    }

    #[must_use]
    pub fn config(&self) -> &OverviewConfig {
        &self.config
    }

    /// Label names offered by the dropdowns.
    #[must_use]
    pub fn label_names(&self) -> Vec<String> {
        self.info.label_names()
    }

    /// Ends the session and hands back its source.
    pub fn teardown(self) -> S {
        log::debug!("closing overview session for {}", self.source.describe());
        self.source
    }
}

impl<S: CaptureSource> std::fmt::Debug for OverviewSession<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverviewSession")
            .field("source", &self.source.describe())
            .field("objects", &self.info.num_objects())
            .field("filters", &self.filters)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overview::{
        OBJECT_COUNT_FILTER, PER_OBJECT_COUNT_FILTER_GRAPH, PIXELS_VISIBLE_FILTER,
        PIXELS_VISIBLE_FILTER_GRAPH,
    };
    use dsinsights_core::{InMemorySource, ObjectTable};

    fn source() -> InMemorySource {
        let mut table = ObjectTable::default();
        table.push("1", 1, "cube", 0, 100);
        table.push("1", 2, "sphere", 1, 40);
        table.push("2", 2, "sphere", 0, 60);
        InMemorySource::new(table)
    }

    #[test]
    fn test_init_uses_first_label() {
        let session = OverviewSession::init(source(), OverviewConfig::default()).unwrap();
        assert_eq!(
            session.filter_state(OBJECT_COUNT_FILTER),
            Some(&FilterState::Initial("cube".into()))
        );
        let figure = session.layout().figure(PER_OBJECT_COUNT_FILTER_GRAPH).unwrap();
        assert_eq!(figure.title, "Distribution of Object Counts Per Capture For cube");
    }

    #[test]
    fn test_dispatch_changes_only_dependent_chart() {
        let mut session = OverviewSession::init(source(), OverviewConfig::default()).unwrap();
        let before = session.layout().figure(PIXELS_VISIBLE_FILTER_GRAPH).cloned();

        let update = session
            .dispatch(OBJECT_COUNT_FILTER, VALUE, "sphere")
            .unwrap();
        assert_eq!(update.output.element_id, PER_OBJECT_COUNT_FILTER_GRAPH);
        assert_eq!(
            session.filter_state(OBJECT_COUNT_FILTER),
            Some(&FilterState::Filtered("sphere".into()))
        );
        assert_eq!(
            session.filter_state(PIXELS_VISIBLE_FILTER).map(FilterState::label),
            Some("cube")
        );
        assert_eq!(session.layout().figure(PIXELS_VISIBLE_FILTER_GRAPH).cloned(), before);
        assert_eq!(session.layout().dropdown_value(OBJECT_COUNT_FILTER), Some("sphere"));
    }

    #[test]
    fn test_teardown_returns_source() {
        let session = OverviewSession::init(source(), OverviewConfig::default()).unwrap();
        let source = session.teardown();
        assert_eq!(source.load().unwrap().len(), 3);
    }
}
