use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Landscape A4 in points.
const PAGE_W: f32 = 842.0;
const PAGE_H: f32 = 595.0;

/// Encode text for a WinAnsi Type1 font. Unmappable characters become `?`.
pub(crate) fn to_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '–' => 0x96,
            '—' => 0x97,
            c if (c as u32) < 0x80 => c as u8,
            c if (0xA0..=0xFF).contains(&(c as u32)) => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}

/// Rough Helvetica advance, good enough to size table columns.
fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * 0.52
}

/// Multi-page document made of a title block and flowing tables.
pub struct PdfManager {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    page_refs: Vec<Ref>,
    content: Option<(Ref, Content)>,

    margin: f32,
    row_h: f32,
    cursor_y: f32,

    next_id: i32,
    font_id: Ref,
    bold_id: Ref,

    title: String,
    font_size: f32,
    header_font_size: f32,
    title_font_size: f32,
}

impl PdfManager {
    pub fn new(title: &str) -> Self {
        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);
        let bold_id = Ref::new(4);
        let next_id = 5;

        pdf.type1_font(font_id)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        pdf.type1_font(bold_id)
            .base_font(Name(b"Helvetica-Bold"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        let margin = 40.0;

        Self {
            pdf,
            catalog_id,
            pages_id,
            page_refs: Vec::new(),
            content: None,

            margin,
            row_h: 18.0,
            cursor_y: PAGE_H - margin,

            next_id,
            font_id,
            bold_id,

            title: title.to_string(),
            font_size: 9.0,
            header_font_size: 9.5,
            title_font_size: 16.0,
        }
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    fn finalize_page(&mut self) {
        if let Some((id, content)) = self.content.take() {
            self.pdf.stream(id, &content.finish());
        }
    }

    /// Close the current page and open a new one with the running footer.
    fn new_page(&mut self) {
        self.finalize_page();

        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();
        self.page_refs.push(page_id);

        {
            let mut page = self.pdf.page(page_id);
            page.parent(self.pages_id)
                .media_box(Rect::new(0.0, 0.0, PAGE_W, PAGE_H))
                .contents(content_id);
            let mut resources = page.resources();
            let mut fonts = resources.fonts();
            fonts.pair(Name(b"F1"), self.font_id);
            fonts.pair(Name(b"F2"), self.bold_id);
        }

        let mut content = Content::new();
        let footer = format!("{}  |  Page {}", self.title, self.page_refs.len());
        draw_text(
            &mut content,
            b"F1",
            self.margin,
            self.margin - 22.0,
            7.5,
            &footer,
        );

        self.content = Some((content_id, content));
        self.cursor_y = PAGE_H - self.margin;
    }

    fn ensure_room(&mut self, height: f32) {
        if self.content.is_none() || self.cursor_y - height < self.margin {
            self.new_page();
        }
    }

    /// Big title plus a smaller subtitle line.
    pub fn write_title(&mut self, subtitle: &str) {
        self.ensure_room(50.0);
        let y = self.cursor_y - self.title_font_size;
        let (margin, title_size, font_size) = (self.margin, self.title_font_size, self.font_size);
        let title = self.title.clone();

        if let Some((_, content)) = self.content.as_mut() {
            draw_text(content, b"F2", margin, y, title_size, &title);
            draw_text(content, b"F1", margin, y - 16.0, font_size, subtitle);
        }
        self.cursor_y = y - 32.0;
    }

    fn compute_col_widths(&self, headers: &[&str], rows: &[Vec<String>]) -> Vec<f32> {
        let mut widths: Vec<f32> = headers
            .iter()
            .map(|h| text_width(h, self.header_font_size) + 10.0)
            .collect();

        for row in rows {
            for (i, cell) in row.iter().enumerate().take(widths.len()) {
                widths[i] = widths[i].max(text_width(cell, self.font_size) + 10.0);
            }
        }

        let total: f32 = widths.iter().sum();
        let max = PAGE_W - 2.0 * self.margin;
        if total > max {
            let scale = max / total;
            for w in &mut widths {
                *w *= scale;
            }
        }
        widths
    }

    fn draw_row(&mut self, widths: &[f32], cells: &[String], header: bool, shaded: bool) {
        let y = self.cursor_y - self.row_h;
        let (margin, row_h) = (self.margin, self.row_h);
        let (font, size) = if header {
            (b"F2", self.header_font_size)
        } else {
            (b"F1", self.font_size)
        };

        if let Some((_, content)) = self.content.as_mut() {
            let total: f32 = widths.iter().sum();
            if header || shaded {
                let grey = if header { 0.85 } else { 0.96 };
                content.save_state();
                content.set_fill_rgb(grey, grey + 0.02, grey + 0.04);
                content.rect(margin, y, total, row_h);
                content.fill_nonzero();
                content.restore_state();
            }

            let mut x = margin;
            for (i, w) in widths.iter().enumerate() {
                let text = cells.get(i).map(String::as_str).unwrap_or("");
                draw_text(content, font, x + 4.0, y + 5.5, size, text);

                content.save_state();
                content.set_stroke_rgb(0.65, 0.65, 0.65);
                content.rect(x, y, *w, row_h);
                content.stroke();
                content.restore_state();

                x += w;
            }
        }

        self.cursor_y = y;
    }

    /// Table with an optional heading; it flows onto new pages,
    /// repeating the header row on each of them.
    pub fn write_table(&mut self, heading: Option<&str>, headers: &[&str], rows: &[Vec<String>]) {
        let widths = self.compute_col_widths(headers, rows);
        let header_row: Vec<String> = headers.iter().map(|s| s.to_string()).collect();

        // Heading, header and at least one row stay together.
        self.ensure_room(self.row_h * 3.0 + 20.0);

        if let Some(h) = heading {
            let y = self.cursor_y - self.header_font_size - 4.0;
            let (margin, size) = (self.margin, self.header_font_size + 1.5);
            if let Some((_, content)) = self.content.as_mut() {
                draw_text(content, b"F2", margin, y, size, h);
            }
            self.cursor_y = y - 6.0;
        }

        self.draw_row(&widths, &header_row, true, false);

        if rows.is_empty() {
            self.draw_row(&widths, &["No entries".to_string()], false, false);
        }

        for (i, row) in rows.iter().enumerate() {
            if self.cursor_y - self.row_h < self.margin {
                self.new_page();
                self.draw_row(&widths, &header_row, true, false);
            }
            self.draw_row(&widths, row, false, i % 2 == 0);
        }

        self.cursor_y -= 18.0;
    }

    pub fn save(mut self, path: &Path) -> std::io::Result<()> {
        if self.page_refs.is_empty() {
            self.new_page();
        }
        self.finalize_page();

        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        {
            let mut pages = self.pdf.pages(self.pages_id);
            pages.count(self.page_refs.len() as i32);
            pages.kids(self.page_refs.iter().copied());
        }

        let bytes = self.pdf.finish();
        let mut f = File::create(path)?;
        f.write_all(&bytes)?;
        Ok(())
    }
}

fn draw_text(content: &mut Content, font: &[u8], x: f32, y: f32, size: f32, text: &str) {
    let encoded = to_win_ansi(text);
    content.begin_text();
    content.set_font(Name(font), size);
    content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
    content.show(Str(&encoded));
    content.end_text();
}
