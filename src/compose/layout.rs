use std::fmt::Write as _;

/// Width of the layout grid. Column spans and table widths are in grid units.
pub const GRID_COLUMNS: u8 = 12;

/// One renderer-agnostic unit of document content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutBlock {
    /// Document title.
    Title(Text),
    /// Free text, possibly several lines separated by `\n`.
    Paragraph(Text),
    /// Side-by-side columns on one grid row.
    Columns(Vec<Column>),
    Table(Table),
    /// Horizontal separator line.
    Rule,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextStyle {
    /// Large and bold.
    Title,
    /// Bold.
    Heading,
    #[default]
    Body,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    pub content: String,
    pub align: Align,
    pub style: TextStyle,
}

impl Text {
    pub fn new(content: impl Into<String>, style: TextStyle) -> Self {
        Self {
            content: content.into(),
            align: Align::Left,
            style,
        }
    }

    /// Centered title text.
    pub fn title(content: impl Into<String>) -> Self {
        Self::new(content, TextStyle::Title).aligned(Align::Center)
    }

    pub fn heading(content: impl Into<String>) -> Self {
        Self::new(content, TextStyle::Heading)
    }

    pub fn body(content: impl Into<String>) -> Self {
        Self::new(content, TextStyle::Body)
    }

    pub fn aligned(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.content.split('\n')
    }
}

/// A slice of a [`LayoutBlock::Columns`] row. Empty content leaves a gap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub span: u8,
    pub content: Vec<Text>,
}

impl Column {
    pub fn new(span: u8, content: Vec<Text>) -> Self {
        Self { span, content }
    }

    pub fn spacer(span: u8) -> Self {
        Self::new(span, Vec::new())
    }

    pub fn is_spacer(&self) -> bool {
        self.content.is_empty()
    }
}

/// Columns of the line-item table, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableColumn {
    Name,
    Tax,
    Amount,
}

impl TableColumn {
    pub const ALL: [TableColumn; 3] = [TableColumn::Name, TableColumn::Tax, TableColumn::Amount];

    /// Grid width when every column is shown.
    pub fn base_width(self) -> u8 {
        match self {
            Self::Name => 8,
            Self::Tax | Self::Amount => 2,
        }
    }
}

/// A table cell tagged with the column it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub column: TableColumn,
    pub text: String,
}

impl Cell {
    pub fn new(column: TableColumn, text: impl Into<String>) -> Self {
        Self {
            column,
            text: text.into(),
        }
    }
}

/// Which table columns are shown.
///
/// Applied the same way to the header and to every row: cells of hidden
/// columns are dropped, the order of the remaining cells is kept, and
/// applying a mask twice changes nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMask {
    visible: Vec<TableColumn>,
}

impl Default for ColumnMask {
    fn default() -> Self {
        Self {
            visible: TableColumn::ALL.to_vec(),
        }
    }
}

impl ColumnMask {
    pub fn all() -> Self {
        Self::default()
    }

    /// The mask for a record: the tax column is hidden when `no_tax` is set.
    pub fn for_record(no_tax: bool) -> Self {
        if no_tax {
            Self::all().hide(TableColumn::Tax)
        } else {
            Self::all()
        }
    }

    pub fn hide(mut self, column: TableColumn) -> Self {
        self.visible.retain(|c| *c != column);
        self
    }

    pub fn columns(&self) -> &[TableColumn] {
        &self.visible
    }

    pub fn is_visible(&self, column: TableColumn) -> bool {
        self.visible.contains(&column)
    }

    pub fn apply(&self, mut cells: Vec<Cell>) -> Vec<Cell> {
        cells.retain(|cell| self.is_visible(cell.column));
        cells
    }

    /// Grid widths of the visible columns. Hidden widths go to the first
    /// visible column, so `{8,2,2}` becomes `{10,2}` without the tax column.
    pub fn widths(&self) -> Vec<u8> {
        let hidden: u8 = TableColumn::ALL
            .iter()
            .filter(|c| !self.is_visible(**c))
            .map(|c| c.base_width())
            .sum();
        let mut widths: Vec<u8> = self.visible.iter().map(|c| c.base_width()).collect();
        if let Some(first) = widths.first_mut() {
            *first += hidden;
        }
        widths
    }
}

/// A table with its column mask already applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<TableColumn>,
    /// Grid width per column, same length as `columns`.
    pub widths: Vec<u8>,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Render the last row highlighted (used for totals).
    pub emphasize_last_row: bool,
}

impl Table {
    /// Build a table from full-width cells, dropping the ones `mask` hides.
    pub fn new(mask: &ColumnMask, header: Vec<Cell>, rows: Vec<Vec<Cell>>) -> Self {
        let texts = |cells: Vec<Cell>| -> Vec<String> {
            mask.apply(cells).into_iter().map(|cell| cell.text).collect()
        };
        Self {
            columns: mask.columns().to_vec(),
            widths: mask.widths(),
            header: texts(header),
            rows: rows.into_iter().map(texts).collect(),
            emphasize_last_row: false,
        }
    }

    pub fn emphasize_last_row(mut self) -> Self {
        self.emphasize_last_row = true;
        self
    }
}

/// Receiver of layout blocks, e.g. a PDF writer.
pub trait DocumentSink {
    fn title(&mut self, text: &Text);
    fn paragraph(&mut self, text: &Text);
    fn columns(&mut self, columns: &[Column]);
    fn table(&mut self, table: &Table);
    fn rule(&mut self);
}

/// Feed `blocks` to `sink` in order.
pub fn render<S: DocumentSink + ?Sized>(blocks: &[LayoutBlock], sink: &mut S) {
    for block in blocks {
        match block {
            LayoutBlock::Title(text) => sink.title(text),
            LayoutBlock::Paragraph(text) => sink.paragraph(text),
            LayoutBlock::Columns(columns) => sink.columns(columns),
            LayoutBlock::Table(table) => sink.table(table),
            LayoutBlock::Rule => sink.rule(),
        }
    }
}

/// Plain-text rendering, handy for logs and terminal previews.
///
/// Columns are written one after another, table cells are separated by ` | `.
#[derive(Debug, Default)]
pub struct TextSink {
    out: String,
}

impl TextSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn line(&mut self, line: &str) {
        self.out.push_str(line);
        self.out.push('\n');
    }
}

impl DocumentSink for TextSink {
    fn title(&mut self, text: &Text) {
        self.line(&text.content);
        self.out.push('\n');
    }

    fn paragraph(&mut self, text: &Text) {
        for line in text.lines() {
            self.line(line);
        }
    }

    fn columns(&mut self, columns: &[Column]) {
        for text in columns.iter().flat_map(|c| &c.content) {
            self.paragraph(text);
        }
    }

    fn table(&mut self, table: &Table) {
        self.line(&table.header.join(" | "));
        for row in &table.rows {
            self.line(&row.join(" | "));
        }
    }

    fn rule(&mut self) {
        let _ = writeln!(self.out, "{}", "-".repeat(40));
    }
}
