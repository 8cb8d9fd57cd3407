//! Column layout: which source cell lands in each output column, and which
//! output columns are written at all.

use serde::{Deserialize, Serialize};

use crate::error::TableError;
use crate::Result;

/// Column order map plus visibility mask.
///
/// `order[i]` is the index of the row cell written as output column `i`.
/// `visible[i]` is false when output column `i` is dropped entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLayout")]
pub struct ColumnLayout {
    order: Vec<usize>,
    visible: Vec<bool>,
}

#[derive(Deserialize)]
struct RawLayout {
    order: Vec<usize>,
    visible: Vec<bool>,
}

impl TryFrom<RawLayout> for ColumnLayout {
    type Error = TableError;

    fn try_from(raw: RawLayout) -> Result<Self> {
        ColumnLayout::new(raw.order, raw.visible)
    }
}

impl ColumnLayout {
    /// Create a layout from an order map and a visibility mask of equal length.
    pub fn new(order: Vec<usize>, visible: Vec<bool>) -> Result<Self> {
        if order.len() != visible.len() {
            return Err(TableError::LayoutMismatch {
                order: order.len(),
                visible: visible.len(),
            });
        }
        Ok(Self { order, visible })
    }

    /// Identity order over `columns` columns, all visible
    pub fn identity(columns: usize) -> Self {
        Self {
            order: (0..columns).collect(),
            visible: vec![true; columns],
        }
    }

    /// Create an all-visible layout with the given order
    pub fn with_order(order: Vec<usize>) -> Self {
        let visible = vec![true; order.len()];
        Self { order, visible }
    }

    /// Builder: hide an output column. Positions past the end are ignored.
    pub fn hide(mut self, position: usize) -> Self {
        if let Some(v) = self.visible.get_mut(position) {
            *v = false;
        }
        self
    }

    /// Builder: show an output column. Positions past the end are ignored.
    pub fn show(mut self, position: usize) -> Self {
        if let Some(v) = self.visible.get_mut(position) {
            *v = true;
        }
        self
    }

    /// The column order map
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// The visibility mask
    pub fn visible(&self) -> &[bool] {
        &self.visible
    }

    /// Number of output columns
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the layout has no output columns
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of hidden output columns
    pub fn invisible_count(&self) -> usize {
        self.visible.iter().filter(|v| !**v).count()
    }

    /// Number of written output columns
    pub fn visible_count(&self) -> usize {
        self.visible.len() - self.invisible_count()
    }
}
