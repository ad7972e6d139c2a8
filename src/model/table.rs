//! Table types.
//!
//! A table arrives in one of two shapes: a flat grid of strings, or row
//! groups whose cells own their content blocks. Renderers accept both.

use super::Block;
use serde::{Deserialize, Serialize};

/// A table structure.
///
/// Input with `headers` or `rows` is read as a grid; input with `rowGroups`
/// (or `children`) alone is read as row groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged, from = "RawTable")]
pub enum Table {
    /// Header/body/footer row groups of block cells
    Grouped(GroupedTable),
    /// Flat `headers` + `rows` of strings
    Grid(GridTable),
}

/// A table given as plain strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridTable {
    /// Header cell contents
    #[serde(default)]
    pub headers: Vec<String>,

    /// Data rows
    #[serde(default)]
    pub rows: Vec<Vec<String>>,

    /// Table caption
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

/// A table given as row groups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedTable {
    /// Row groups in document order
    #[serde(alias = "children")]
    pub row_groups: Vec<RowGroup>,

    /// Table caption
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

/// Section of a grouped table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RowGroupKind {
    /// Header rows
    #[serde(alias = "THEAD")]
    Head,
    /// Body rows
    #[serde(alias = "TBODY")]
    Body,
    /// Footer rows
    #[serde(alias = "TFOOT")]
    Foot,
}

impl RowGroupKind {
    /// HTML tag name for this group.
    pub fn html_tag(self) -> &'static str {
        match self {
            RowGroupKind::Head => "thead",
            RowGroupKind::Body => "tbody",
            RowGroupKind::Foot => "tfoot",
        }
    }
}

/// A group of rows (`thead`, `tbody`, `tfoot`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowGroup {
    /// Group kind
    #[serde(rename = "type", alias = "kind")]
    pub kind: RowGroupKind,

    /// Rows in the group
    #[serde(default, alias = "children")]
    pub rows: Vec<TableRow>,
}

/// A table row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row
    #[serde(default, alias = "children")]
    pub cells: Vec<TableCell>,
}

/// A table cell owning its content blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawCell")]
pub struct TableCell {
    /// Whether this is a header cell (`th`)
    #[serde(default)]
    pub header: bool,

    /// Cell content, usually a single paragraph or text block
    #[serde(default)]
    pub children: Vec<Block>,
}

/// Wire shape accepted for either table representation.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTable {
    #[serde(default)]
    headers: Option<Vec<String>>,
    #[serde(default)]
    rows: Option<Vec<Vec<String>>>,
    #[serde(default, alias = "children")]
    row_groups: Option<Vec<RowGroup>>,
    #[serde(default)]
    caption: Option<String>,
}

impl From<RawTable> for Table {
    fn from(raw: RawTable) -> Self {
        let is_grid = raw.headers.is_some() || raw.rows.is_some();
        match raw.row_groups {
            Some(row_groups) if !is_grid => Table::Grouped(GroupedTable {
                row_groups,
                caption: raw.caption,
            }),
            _ => Table::Grid(GridTable {
                headers: raw.headers.unwrap_or_default(),
                rows: raw.rows.unwrap_or_default(),
                caption: raw.caption,
            }),
        }
    }
}

/// Wire shape of a cell; `"type": "TH"` marks a header cell.
#[derive(Deserialize)]
struct RawCell {
    #[serde(default)]
    header: Option<bool>,
    #[serde(default, rename = "type")]
    tag: Option<String>,
    #[serde(default)]
    children: Vec<Block>,
}

impl From<RawCell> for TableCell {
    fn from(raw: RawCell) -> Self {
        let header = raw
            .header
            .unwrap_or_else(|| raw.tag.is_some_and(|t| t.eq_ignore_ascii_case("th")));
        TableCell {
            header,
            children: raw.children,
        }
    }
}

impl Table {
    /// Create a grid table from header and row strings.
    pub fn grid<S: Into<String>>(
        headers: impl IntoIterator<Item = S>,
        rows: Vec<Vec<String>>,
    ) -> Self {
        Table::Grid(GridTable {
            headers: headers.into_iter().map(Into::into).collect(),
            rows,
            caption: None,
        })
    }

    /// Create a grouped table.
    pub fn grouped(row_groups: Vec<RowGroup>) -> Self {
        Table::Grouped(GroupedTable {
            row_groups,
            caption: None,
        })
    }

    /// Table caption, if any.
    pub fn caption(&self) -> Option<&str> {
        match self {
            Table::Grid(t) => t.caption.as_deref(),
            Table::Grouped(t) => t.caption.as_deref(),
        }
    }

    /// Check if the table has no header and no rows.
    pub fn is_empty(&self) -> bool {
        match self {
            Table::Grid(t) => t.headers.is_empty() && t.rows.is_empty(),
            Table::Grouped(t) => t.row_groups.iter().all(|g| g.rows.is_empty()),
        }
    }

    /// Flatten into header strings and data row strings.
    ///
    /// For grouped tables the first row of the first header group becomes the
    /// header; every other row, including extra header rows, becomes data.
    pub fn to_grid(&self) -> (Vec<String>, Vec<Vec<String>>) {
        match self {
            Table::Grid(t) => (t.headers.clone(), t.rows.clone()),
            Table::Grouped(t) => {
                let mut headers: Option<Vec<String>> = None;
                let mut rows = Vec::new();
                for group in &t.row_groups {
                    for row in &group.rows {
                        if headers.is_none() && group.kind == RowGroupKind::Head {
                            headers = Some(row.texts());
                        } else {
                            rows.push(row.texts());
                        }
                    }
                }
                (headers.unwrap_or_default(), rows)
            }
        }
    }

    /// All blocks owned by cells of a grouped table.
    pub fn cell_blocks(&self) -> impl Iterator<Item = &Block> {
        let groups: &[RowGroup] = match self {
            Table::Grid(_) => &[],
            Table::Grouped(t) => &t.row_groups,
        };
        groups
            .iter()
            .flat_map(|g| &g.rows)
            .flat_map(|r| &r.cells)
            .flat_map(|c| &c.children)
    }
}

impl RowGroup {
    /// Create a row group.
    pub fn new(kind: RowGroupKind, rows: Vec<TableRow>) -> Self {
        Self { kind, rows }
    }
}

impl TableRow {
    /// Create a new row with cells.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self { cells }
    }

    /// Text of every cell in order.
    pub fn texts(&self) -> Vec<String> {
        self.cells.iter().map(TableCell::text).collect()
    }
}

impl TableCell {
    /// Create a data cell holding one paragraph.
    pub fn data(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            header: false,
            children: vec![Block::paragraph(id, text)],
        }
    }

    /// Create a header cell holding one paragraph.
    pub fn heading(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            header: true,
            ..Self::data(id, text)
        }
    }

    /// Plain text of the cell: its paragraph and text blocks joined by a space.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter(|b| b.is_text())
            .filter_map(Block::text)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn grouped_sample() -> Table {
        Table::grouped(vec![
            RowGroup::new(
                RowGroupKind::Head,
                vec![TableRow::new(vec![
                    TableCell::heading("h1", "Name"),
                    TableCell::heading("h2", "Age"),
                ])],
            ),
            RowGroup::new(
                RowGroupKind::Body,
                vec![TableRow::new(vec![
                    TableCell::data("c1", "Alice"),
                    TableCell::data("c2", "30"),
                ])],
            ),
        ])
    }

    #[test]
    fn test_grouped_to_grid() {
        let (headers, rows) = grouped_sample().to_grid();
        assert_eq!(headers, vec!["Name", "Age"]);
        assert_eq!(rows, vec![vec!["Alice".to_string(), "30".to_string()]]);
    }

    #[test]
    fn test_cell_blocks() {
        let table = grouped_sample();
        let ids: Vec<&str> = table.cell_blocks().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["h1", "h2", "c1", "c2"]);
        assert_eq!(Table::grid(["A"], vec![]).cell_blocks().count(), 0);
    }

    #[test]
    fn test_deserialize_both_shapes() {
        let grid: Table = serde_json::from_value(json!({
            "headers": ["H1", "H2"],
            "rows": [["a", "b"]]
        }))
        .unwrap();
        assert!(matches!(grid, Table::Grid(_)));

        let grouped: Table = serde_json::from_value(json!({
            "rowGroups": [
                { "type": "THEAD", "children": [
                    { "children": [ { "header": true, "children": [
                        { "blockId": "p", "type": "PARAGRAPH", "text": "H" }
                    ]}]}
                ]}
            ]
        }))
        .unwrap();
        assert!(matches!(grouped, Table::Grouped(_)));
        assert_eq!(grouped.to_grid().0, vec!["H"]);
    }

    #[test]
    fn test_deserialize_children_shape() {
        let table: Table = serde_json::from_value(json!({
            "children": [
                { "type": "THEAD", "children": [
                    { "type": "TR", "children": [
                        { "type": "TH", "children": [
                            { "blockId": "p", "type": "PARAGRAPH", "text": "H" }
                        ]}
                    ]}
                ]}
            ]
        }))
        .unwrap();
        let Table::Grouped(grouped) = &table else {
            panic!("expected a grouped table");
        };
        assert!(grouped.row_groups[0].rows[0].cells[0].header);
    }

    #[test]
    fn test_grid_wins_over_empty_children() {
        let table: Table = serde_json::from_value(json!({
            "headers": ["A"],
            "rows": [["1"]],
            "children": []
        }))
        .unwrap();
        assert_eq!(table, Table::grid(["A"], vec![vec!["1".to_string()]]));
    }

    #[test]
    fn test_empty_table() {
        assert!(Table::grid(Vec::<String>::new(), vec![]).is_empty());
        assert!(!grouped_sample().is_empty());
    }
}
