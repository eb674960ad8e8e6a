use std::io::Write;
use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, StringFormat, dictionary};

use super::PageConfig;
use super::font::{Font, encode_win_ansi};
use crate::compose::{
    Align, Column, DocumentSink, GRID_COLUMNS, Table, TableColumn, Text, TextStyle,
};
use crate::core::RachunekError;

/// Vertical space between blocks, as a fraction of the body line height.
const BLOCK_GAP: f32 = 0.6;
/// Horizontal padding inside table cells.
const CELL_PADDING: f32 = 4.0;
/// Gray level of the emphasized table row.
const EMPHASIS_GRAY: f32 = 0.9;

/// A paginated PDF built from layout blocks.
///
/// Feed it with [`render`](crate::compose::render), then call
/// [`finish`](Self::finish) for the bytes or [`save`](Self::save) to write
/// them to disk.
#[derive(Debug)]
pub struct PdfDocument {
    config: PageConfig,
    pages: Vec<Vec<Operation>>,
    current: Vec<Operation>,
    cursor_y: f32,
}

impl Default for PdfDocument {
    fn default() -> Self {
        Self::new(PageConfig::default())
    }
}

impl PdfDocument {
    pub fn new(config: PageConfig) -> Self {
        Self {
            cursor_y: config.height - config.margin,
            config,
            pages: Vec::new(),
            current: Vec::new(),
        }
    }

    /// Pages started so far, including the current one.
    pub fn page_count(&self) -> usize {
        self.pages.len() + 1
    }

    /// Serialize the document.
    pub fn finish(mut self) -> Result<Vec<u8>, RachunekError> {
        self.pages.push(std::mem::take(&mut self.current));

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let mut fonts = lopdf::Dictionary::new();
        for font in [Font::Regular, Font::Bold] {
            let font_id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(font.resource_name(), Object::Reference(font_id));
        }
        let resources_id = doc.add_object(dictionary! {
            "Font" => fonts,
        });

        let mut kids = Vec::with_capacity(self.pages.len());
        for operations in self.pages {
            let content = Content { operations }
                .encode()
                .map_err(|e| RachunekError::Document(format!("failed to encode page: {e}")))?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, content));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(Object::Reference(page_id));
        }

        let pages = dictionary! {
            "Type" => "Pages",
            "Count" => kids.len() as i64,
            "Kids" => kids,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), self.config.width.into(), self.config.height.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.compress();

        let mut output = Vec::new();
        doc.save_to(&mut output)
            .map_err(|e| RachunekError::Document(format!("failed to save PDF: {e}")))?;
        Ok(output)
    }

    /// Write the document to `path`.
    ///
    /// The bytes go to a uniquely named temporary file in the same directory
    /// which is then renamed over `path`. A failed write never leaves a
    /// partial document behind.
    pub fn save(self, path: impl AsRef<Path>) -> Result<(), RachunekError> {
        let path = path.as_ref();
        let pages = self.page_count();
        let bytes = self.finish()?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp =
            tempfile::NamedTempFile::new_in(dir).map_err(|e| RachunekError::io(path, e))?;
        tmp.write_all(&bytes)
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| RachunekError::io(path, e))?;
        tmp.persist(path)
            .map_err(|e| RachunekError::io(path, e.error))?;
        tracing::info!(path = %path.display(), pages, bytes = bytes.len(), "document saved");
        Ok(())
    }

    fn content_width(&self) -> f32 {
        self.config.width - 2.0 * self.config.margin
    }

    fn grid_unit(&self) -> f32 {
        self.content_width() / f32::from(GRID_COLUMNS)
    }

    fn style(&self, style: TextStyle) -> (Font, f32) {
        match style {
            TextStyle::Title => (Font::Bold, self.config.title_size),
            TextStyle::Heading => (Font::Bold, self.config.heading_size),
            TextStyle::Body => (Font::Regular, self.config.body_size),
        }
    }

    fn line_height(&self, size: f32) -> f32 {
        size * self.config.line_spacing
    }

    fn gap(&self) -> f32 {
        self.line_height(self.config.body_size) * BLOCK_GAP
    }

    fn new_page(&mut self) {
        self.pages.push(std::mem::take(&mut self.current));
        self.cursor_y = self.config.height - self.config.margin;
    }

    /// Start a new page unless `height` still fits above the bottom margin.
    /// Nothing happens at the top of a page, whatever the height.
    fn reserve(&mut self, height: f32) {
        let top = self.config.height - self.config.margin;
        if self.cursor_y - height < self.config.margin && self.cursor_y < top {
            self.new_page();
        }
    }

    fn text_line(&mut self, font: Font, size: f32, x: f32, baseline: f32, line: &str) {
        self.current.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![Object::Name(font.resource_name().to_vec()), size.into()]),
            Operation::new("Td", vec![x.into(), baseline.into()]),
            Operation::new(
                "Tj",
                vec![Object::String(encode_win_ansi(line), StringFormat::Literal)],
            ),
            Operation::new("ET", vec![]),
        ]);
    }

    fn wrap(&self, text: &Text, x: f32, width: f32) -> TextBox {
        let (font, size) = self.style(text.style);
        let lines = text
            .lines()
            .flat_map(|l| font.wrap(l, size, width))
            .map(|line| {
                let line_x = aligned_x(font, size, &line, x, width, text.align);
                (line_x, line)
            })
            .collect();
        TextBox { font, size, lines }
    }

    /// Height of line `row` across side-by-side stacks of text boxes.
    fn row_height(&self, stacks: &[Vec<(&TextBox, usize)>], row: usize) -> f32 {
        stacks
            .iter()
            .filter_map(|stack| stack.get(row))
            .map(|(text_box, _)| self.line_height(text_box.size))
            .fold(0.0, f32::max)
    }

    /// Draw stacks of text boxes side by side, one line row at a time.
    ///
    /// The stacks are kept together on one page when they fit. Otherwise
    /// they break between line rows.
    fn flow(&mut self, stacks: &[Vec<TextBox>]) {
        let lines: Vec<Vec<(&TextBox, usize)>> = stacks
            .iter()
            .map(|stack| {
                stack
                    .iter()
                    .flat_map(|text_box| (0..text_box.lines.len()).map(move |i| (text_box, i)))
                    .collect()
            })
            .collect();
        let rows = lines.iter().map(Vec::len).max().unwrap_or(0);
        let total: f32 = (0..rows).map(|row| self.row_height(&lines, row)).sum();
        self.reserve(total);

        for row in 0..rows {
            let height = self.row_height(&lines, row);
            self.reserve(height);
            let top = self.cursor_y;
            for (text_box, i) in lines.iter().filter_map(|stack| stack.get(row)) {
                let (x, line) = &text_box.lines[*i];
                self.text_line(text_box.font, text_box.size, *x, top - text_box.size, line);
            }
            self.cursor_y = top - height;
        }
    }

    fn block(&mut self, text: &Text) {
        let text_box = self.wrap(text, self.config.margin, self.content_width());
        self.flow(&[vec![text_box]]);
        self.cursor_y -= self.gap();
    }

    fn column_width(&self, column: &Column) -> f32 {
        f32::from(column.span) * self.grid_unit()
    }

    fn table_row(&mut self, table: &Table, cells: &[String], font: Font, emphasize: bool) {
        let size = self.config.body_size;
        let line_height = self.line_height(size);
        let widths: Vec<f32> = table
            .widths
            .iter()
            .map(|w| f32::from(*w) * self.grid_unit())
            .collect();
        let wrapped: Vec<Vec<String>> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| font.wrap(cell, size, width - 2.0 * CELL_PADDING))
            .collect();
        let lines = wrapped.iter().map(Vec::len).max().unwrap_or(1);
        let height = lines as f32 * line_height + CELL_PADDING;

        self.reserve(height);
        let top = self.cursor_y;
        if emphasize {
            self.current.extend([
                Operation::new("g", vec![EMPHASIS_GRAY.into()]),
                Operation::new(
                    "re",
                    vec![
                        self.config.margin.into(),
                        (top - height).into(),
                        self.content_width().into(),
                        height.into(),
                    ],
                ),
                Operation::new("f", vec![]),
                Operation::new("g", vec![0.0_f32.into()]),
            ]);
        }

        let mut x = self.config.margin;
        for ((column, width), cell_lines) in table.columns.iter().zip(&widths).zip(wrapped) {
            let align = match column {
                TableColumn::Name => Align::Left,
                TableColumn::Tax | TableColumn::Amount => Align::Right,
            };
            let inner = width - 2.0 * CELL_PADDING;
            let mut baseline = top - CELL_PADDING / 2.0 - size;
            for line in &cell_lines {
                let line_x = aligned_x(font, size, line, x + CELL_PADDING, inner, align);
                self.text_line(font, size, line_x, baseline, line);
                baseline -= line_height;
            }
            x += width;
        }
        self.cursor_y = top - height;
    }

    fn horizontal_line(&mut self, y: f32, thickness: f32) {
        let left = self.config.margin;
        let right = self.config.width - self.config.margin;
        self.current.extend([
            Operation::new("w", vec![thickness.into()]),
            Operation::new("m", vec![left.into(), y.into()]),
            Operation::new("l", vec![right.into(), y.into()]),
            Operation::new("S", vec![]),
        ]);
    }
}

impl DocumentSink for PdfDocument {
    fn title(&mut self, text: &Text) {
        self.block(text);
        self.cursor_y -= self.gap();
    }

    fn paragraph(&mut self, text: &Text) {
        self.block(text);
    }

    fn columns(&mut self, columns: &[Column]) {
        let mut x = self.config.margin;
        let mut stacks = Vec::with_capacity(columns.len());
        for column in columns {
            let width = self.column_width(column);
            stacks.push(
                column
                    .content
                    .iter()
                    .map(|text| self.wrap(text, x, width))
                    .collect::<Vec<_>>(),
            );
            x += width;
        }
        self.flow(&stacks);
        self.cursor_y -= self.gap();
    }

    fn table(&mut self, table: &Table) {
        self.table_row(table, &table.header, Font::Bold, false);
        let y = self.cursor_y;
        self.horizontal_line(y, 0.5);

        let last = table.rows.len().saturating_sub(1);
        for (i, row) in table.rows.iter().enumerate() {
            let emphasize = table.emphasize_last_row && i == last;
            let font = if emphasize { Font::Bold } else { Font::Regular };
            self.table_row(table, row, font, emphasize);
        }
        self.cursor_y -= self.gap();
    }

    fn rule(&mut self) {
        let gap = self.gap();
        self.reserve(gap);
        let y = self.cursor_y - gap / 2.0;
        self.horizontal_line(y, 0.75);
        self.cursor_y -= gap;
    }
}

fn aligned_x(font: Font, size: f32, line: &str, x: f32, width: f32, align: Align) -> f32 {
    let slack = (width - font.text_width(line, size)).max(0.0);
    match align {
        Align::Left => x,
        Align::Center => x + slack / 2.0,
        Align::Right => x + slack,
    }
}

/// Wrapped lines of one [`Text`], each with its start x.
struct TextBox {
    font: Font,
    size: f32,
    lines: Vec<(f32, String)>,
}
