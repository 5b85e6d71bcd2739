//! Column definitions

use std::fmt;
use std::sync::Arc;

use super::CellValue;

/// Custom cell renderer: receives the cell value and the whole row
pub type CellRenderer = Arc<dyn Fn(&CellValue, &[CellValue]) -> String + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Number,
    Date,
    /// Rendered by the column's component
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
    Center,
}

/// One table column
#[derive(Clone)]
pub struct Column {
    pub label: String,
    /// Field the column shows (also the sort key)
    pub key: String,
    pub kind: ColumnKind,
    pub align: Align,
    /// Fixed width in characters; sized to content when unset
    pub width: Option<usize>,
    component: Option<CellRenderer>,
}

impl Column {
    /// Text column
    pub fn new(label: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            key: key.into(),
            kind: ColumnKind::Text,
            align: Align::Left,
            width: None,
            component: None,
        }
    }

    /// Right-aligned numeric column
    pub fn number(label: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            kind: ColumnKind::Number,
            align: Align::Right,
            ..Self::new(label, key)
        }
    }

    pub fn date(label: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            kind: ColumnKind::Date,
            ..Self::new(label, key)
        }
    }

    /// Column rendered by a callback
    pub fn custom<F>(label: impl Into<String>, key: impl Into<String>, component: F) -> Self
    where
        F: Fn(&CellValue, &[CellValue]) -> String + Send + Sync + 'static,
    {
        Self {
            kind: ColumnKind::Custom,
            component: Some(Arc::new(component)),
            ..Self::new(label, key)
        }
    }

    /// Builder: set alignment
    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Builder: set fixed width
    pub fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Text for one cell of this column
    pub fn render(&self, value: &CellValue, row: &[CellValue]) -> String {
        match &self.component {
            Some(component) => component(value, row),
            None => value.to_string(),
        }
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("label", &self.label)
            .field("key", &self.key)
            .field("kind", &self.kind)
            .field("align", &self.align)
            .field("width", &self.width)
            .field("component", &self.component.is_some())
            .finish()
    }
}

/// Ordered columns of a table
#[derive(Debug, Clone, Default)]
pub struct TableSchema {
    columns: Vec<Column>,
}

impl TableSchema {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.label.as_str()).collect()
    }

    pub fn column(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_builders() {
        let col = Column::number("Order", "orderIndex").width(6);
        assert_eq!(col.kind, ColumnKind::Number);
        assert_eq!(col.align, Align::Right);
        assert_eq!(col.width, Some(6));
    }

    #[test]
    fn test_custom_component_sees_row() {
        let col = Column::custom("Name", "name", |value, row| {
            format!("{} ({})", value, row.len())
        });
        let row = vec![CellValue::from("Rust"), CellValue::from(90)];

        assert_eq!(col.kind, ColumnKind::Custom);
        assert_eq!(col.render(&row[0], &row), "Rust (2)");
    }

    #[test]
    fn test_schema_lookup() {
        let schema = TableSchema::new(vec![
            Column::new("Title", "title"),
            Column::date("Created", "createdAt"),
        ]);

        assert_eq!(schema.labels(), vec!["Title", "Created"]);
        assert_eq!(schema.column("createdAt").map(|c| c.kind), Some(ColumnKind::Date));
        assert!(schema.column("missing").is_none());
    }
}
