use std::collections::{BTreeMap, BTreeSet};

use crate::foundation::core::{ElementBox, NodeId, Property, PropertyValue};

/// Capability interface to the host page.
///
/// Orchestration code only ever reads geometry and writes style properties through this
/// trait, so it can be driven by a browser binding or by [`InMemorySurface`] in tests.
pub trait Surface {
    /// Height of the visible viewport in pixels.
    fn viewport_height(&self) -> f64;

    /// Total scrollable document height in pixels.
    fn document_height(&self) -> f64;

    /// Document-space box of `node`, or `None` when the node is no longer attached.
    fn element_box(&self, node: NodeId) -> Option<ElementBox>;

    /// Current value of a style property, if the host knows it.
    fn get_property(&self, node: NodeId, prop: Property) -> Option<PropertyValue>;

    /// Write a style property.
    fn set_property(&mut self, node: NodeId, prop: Property, value: PropertyValue);

    /// Toggle a body-level attribute (e.g. `data-scrolled`).
    fn set_body_attribute(&mut self, name: &str, present: bool);

    /// Toggle a class on `node`.
    fn set_class(&mut self, node: NodeId, class: &str, on: bool);

    /// Move the page scroll position.
    fn set_scroll_offset(&mut self, offset: f64);

    /// Whether `node` is still attached to the document.
    fn is_attached(&self, node: NodeId) -> bool {
        self.element_box(node).is_some()
    }

    /// Largest reachable scroll offset.
    fn max_scroll(&self) -> f64 {
        (self.document_height() - self.viewport_height()).max(0.0)
    }
}

/// One recorded [`Surface::set_property`] call.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StyleWrite {
    /// Target node.
    pub node: NodeId,
    /// Written property.
    pub prop: Property,
    /// Written value.
    pub value: PropertyValue,
}

/// In-memory surface for tests, the simulator and debugging.
///
/// Keeps the latest value per `(node, property)` plus an ordered log of every write.
#[derive(Debug, Default)]
pub struct InMemorySurface {
    viewport_height: f64,
    document_height: f64,
    boxes: BTreeMap<NodeId, ElementBox>,
    styles: BTreeMap<(NodeId, Property), PropertyValue>,
    writes: Vec<StyleWrite>,
    detached_writes: usize,
    body_attributes: BTreeSet<String>,
    classes: BTreeSet<(NodeId, String)>,
    scroll_offset: f64,
}

impl InMemorySurface {
    /// Create a surface with the given viewport and document heights.
    pub fn new(viewport_height: f64, document_height: f64) -> Self {
        Self {
            viewport_height,
            document_height,
            ..Self::default()
        }
    }

    /// Builder-style [`InMemorySurface::insert_node`].
    pub fn with_node(mut self, node: NodeId, bounds: ElementBox) -> Self {
        self.insert_node(node, bounds);
        self
    }

    /// Attach (or move) a node.
    pub fn insert_node(&mut self, node: NodeId, bounds: ElementBox) {
        self.boxes.insert(node, bounds);
    }

    /// Detach a node, as if it was removed from the DOM.
    pub fn detach(&mut self, node: NodeId) {
        self.boxes.remove(&node);
    }

    /// Change the viewport height (a resize).
    pub fn set_viewport_height(&mut self, h: f64) {
        self.viewport_height = h;
    }

    /// Latest value written for `(node, prop)`.
    pub fn style(&self, node: NodeId, prop: Property) -> Option<&PropertyValue> {
        self.styles.get(&(node, prop))
    }

    /// Latest numeric value written for `(node, prop)`.
    pub fn number(&self, node: NodeId, prop: Property) -> Option<f64> {
        self.style(node, prop).and_then(PropertyValue::as_number)
    }

    /// Every write in call order.
    pub fn writes(&self) -> &[StyleWrite] {
        &self.writes
    }

    /// Drain the write log, keeping the latest styles.
    pub fn take_writes(&mut self) -> Vec<StyleWrite> {
        std::mem::take(&mut self.writes)
    }

    /// Number of writes recorded so far.
    pub fn write_count(&self) -> usize {
        self.writes.len()
    }

    /// Writes that targeted a node no longer attached (always a bug in the caller).
    pub fn detached_writes(&self) -> usize {
        self.detached_writes
    }

    /// Whether a body attribute is present.
    pub fn has_body_attribute(&self, name: &str) -> bool {
        self.body_attributes.contains(name)
    }

    /// Whether `node` currently carries `class`.
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.classes.contains(&(node, class.to_owned()))
    }

    /// Last scroll position requested through [`Surface::set_scroll_offset`].
    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Final styles as a flat list, ordered by node then property.
    pub fn snapshot(&self) -> Vec<StyleWrite> {
        self.styles
            .iter()
            .map(|(&(node, prop), value)| StyleWrite {
                node,
                prop,
                value: value.clone(),
            })
            .collect()
    }
}

impl Surface for InMemorySurface {
    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn document_height(&self) -> f64 {
        self.document_height
    }

    fn element_box(&self, node: NodeId) -> Option<ElementBox> {
        self.boxes.get(&node).copied()
    }

    fn get_property(&self, node: NodeId, prop: Property) -> Option<PropertyValue> {
        self.styles.get(&(node, prop)).cloned()
    }

    fn set_property(&mut self, node: NodeId, prop: Property, value: PropertyValue) {
        if !self.boxes.contains_key(&node) {
            self.detached_writes += 1;
            return;
        }
        self.styles.insert((node, prop), value.clone());
        self.writes.push(StyleWrite { node, prop, value });
    }

    fn set_body_attribute(&mut self, name: &str, present: bool) {
        if present {
            self.body_attributes.insert(name.to_owned());
        } else {
            self.body_attributes.remove(name);
        }
    }

    fn set_class(&mut self, node: NodeId, class: &str, on: bool) {
        if on {
            self.classes.insert((node, class.to_owned()));
        } else {
            self.classes.remove(&(node, class.to_owned()));
        }
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll_offset = offset.clamp(0.0, self.max_scroll());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
