use egui::Pos2;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

use crate::element::{Element, ElementId, ElementType};

/// Immutable copy of a document's elements, captured for history.
///
/// Holds its own copy of every element (river points included), so later edits
/// to the live document never reach it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    elements: Arc<[ElementType]>,
}

impl Snapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn elements(&self) -> &[ElementType] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// The live map: elements in z-order, later ones drawn on top.
///
/// Every element has a distinct id. Serialized as a plain element array.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(from = "Vec<ElementType>", into = "Vec<ElementType>")]
pub struct Document {
    elements: Vec<ElementType>,
    dirty: bool,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from loaded elements. Repeated ids are replaced with
    /// fresh ones so selection and removal always address a single element.
    pub fn from_elements(mut elements: Vec<ElementType>) -> Self {
        let mut seen = HashSet::with_capacity(elements.len());
        for element in &mut elements {
            if !seen.insert(element.id()) {
                let id = ElementId::new();
                log::warn!("Duplicate element id {}, reassigned to {}", element.id(), id);
                element.set_id(id);
                seen.insert(id);
            }
        }
        Self {
            elements,
            dirty: true,
        }
    }

    pub fn elements(&self) -> &[ElementType] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn append(&mut self, element: ElementType) {
        self.elements.push(element);
        self.dirty = true;
    }

    /// Remove the element with the given id, if present
    pub fn remove_selected(&mut self, id: ElementId) -> Option<ElementType> {
        let index = self.elements.iter().position(|e| e.id() == id)?;
        self.dirty = true;
        Some(self.elements.remove(index))
    }

    pub fn clear(&mut self) {
        self.elements.clear();
        self.dirty = true;
    }

    pub fn get(&self, id: ElementId) -> Option<&ElementType> {
        self.elements.iter().find(|e| e.id() == id)
    }

    /// Mutable access for in-progress gestures. Marks the document dirty.
    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut ElementType> {
        let element = self.elements.iter_mut().find(|e| e.id() == id)?;
        self.dirty = true;
        Some(element)
    }

    /// Topmost element under `pos`
    pub fn element_at(&self, pos: Pos2) -> Option<&ElementType> {
        self.elements.iter().rev().find(|e| e.hit_test(pos))
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            elements: self.elements.iter().cloned().collect(),
        }
    }

    pub fn restore(&mut self, snapshot: &Snapshot) {
        self.elements = snapshot.elements().to_vec();
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns whether a redraw was pending and clears the flag
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

impl From<Vec<ElementType>> for Document {
    fn from(elements: Vec<ElementType>) -> Self {
        Self::from_elements(elements)
    }
}

impl From<Document> for Vec<ElementType> {
    fn from(document: Document) -> Self {
        document.elements
    }
}
