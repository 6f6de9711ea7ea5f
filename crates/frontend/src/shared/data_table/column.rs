use contracts::shared::Record;
use leptos::prelude::*;
use serde_json::Value;
use std::sync::Arc;

/// Everything a cell renderer may look at.
///
/// `handlers` is the page-supplied bundle (edit/delete/expand callbacks,
/// lookup maps) that the table passes through untouched.
pub struct CellContext<'a, H> {
    /// `None` when the record has no such field
    pub value: Option<&'a Value>,
    pub record: &'a Record,
    pub handlers: &'a H,
}

pub type CellRenderer<H> = Arc<dyn Fn(CellContext<'_, H>) -> AnyView + Send + Sync>;

/// Optional drawer rendered under a row. Returning `None` keeps the row collapsed.
pub type ExpandedRenderer<H> = Arc<dyn Fn(&Record, &H) -> Option<AnyView> + Send + Sync>;

pub struct ColumnSpec<H> {
    pub header: String,
    /// Field name looked up in each record; also the sort key
    pub accessor: String,
    pub render: Option<CellRenderer<H>>,
    pub width: Option<&'static str>,
    pub sortable: bool,
}

impl<H> Clone for ColumnSpec<H> {
    fn clone(&self) -> Self {
        Self {
            header: self.header.clone(),
            accessor: self.accessor.clone(),
            render: self.render.clone(),
            width: self.width,
            sortable: self.sortable,
        }
    }
}

impl<H> ColumnSpec<H> {
    pub fn new(header: impl Into<String>, accessor: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            accessor: accessor.into(),
            render: None,
            width: None,
            sortable: true,
        }
    }

    pub fn render(
        mut self,
        render: impl Fn(CellContext<'_, H>) -> AnyView + Send + Sync + 'static,
    ) -> Self {
        self.render = Some(Arc::new(render));
        self
    }

    pub fn width(mut self, width: &'static str) -> Self {
        self.width = Some(width);
        self
    }

    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    pub fn header_style(&self) -> String {
        self.width
            .map(|w| format!("width: {};", w))
            .unwrap_or_default()
    }
}
