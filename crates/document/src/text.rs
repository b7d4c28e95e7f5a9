//! Fixed-width plain-text rendering of a [`RenderedDocument`].
//!
//! Used for terminal previews and logs. Pages are separated by a form feed.
//! Widths are display columns, so double-width text keeps columns aligned.

use prettytable::format::{Alignment, FormatBuilder, LinePosition, LineSeparator};
use prettytable::{Cell, Row, Table};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::layout::{
    Align, Block, Footer, HeaderBlock, ItemTable, PartiesBlock, RenderedDocument, TableRow,
    TotalsBlock,
};

pub const DEFAULT_WIDTH: usize = 80;

const MIN_WIDTH: usize = 48;
const LABEL_CHARS: usize = 10;
const COLUMN_GAP: usize = 2;
const DESCRIPTION_COLUMN: usize = 1;

pub fn render_text(document: &RenderedDocument, width: usize) -> String {
    let width = width.max(MIN_WIDTH);
    let mut out = String::new();

    for (i, page) in document.pages.iter().enumerate() {
        if i > 0 {
            out.push('\u{000C}');
            out.push('\n');
        }
        for block in &page.blocks {
            match block {
                Block::Header(header) => render_header(&mut out, header, width),
                Block::Title(title) => push_line(&mut out, &fit(title, width, Align::Center)),
                Block::Parties(parties) => render_parties(&mut out, parties, width),
                Block::ItemTable(table) => render_table(&mut out, table, width),
                Block::Totals(totals) => render_totals(&mut out, totals, width),
            }
            out.push('\n');
        }
        render_footer(&mut out, &page.footer, width);
    }
    out
}

/// Longest prefix of `text` that fits in `width` display columns, and its width.
fn truncate(text: &str, width: usize) -> (String, usize) {
    let mut kept = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        kept.push(c);
    }
    (kept, used)
}

/// Truncate or pad `text` to exactly `width` display columns.
fn fit(text: &str, width: usize, align: Align) -> String {
    let (text, used) = truncate(text, width);
    let pad = width - used;
    match align {
        Align::Left => format!("{text}{}", " ".repeat(pad)),
        Align::Right => format!("{}{text}", " ".repeat(pad)),
        Align::Center => {
            let left = pad / 2;
            format!("{}{text}{}", " ".repeat(left), " ".repeat(pad - left))
        }
    }
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line.trim_end());
    out.push('\n');
}

fn push_block(out: &mut String, block: &str, indent: usize) {
    let indent = " ".repeat(indent);
    for line in block.lines() {
        push_line(out, &format!("{indent}{line}"));
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    let format = FormatBuilder::new()
        .padding(0, COLUMN_GAP)
        .separator(LinePosition::Title, LineSeparator::new('-', '-', '-', '-'))
        .build();
    table.set_format(format);
    table
}

fn cell(text: &str, align: Align) -> Cell {
    let align = match align {
        Align::Left => Alignment::LEFT,
        Align::Center => Alignment::CENTER,
        Align::Right => Alignment::RIGHT,
    };
    Cell::new_align(text, align)
}

fn render_header(out: &mut String, header: &HeaderBlock, width: usize) {
    push_line(out, &fit(&header.seller_name, width, Align::Center));
    for line in &header.address_lines {
        push_line(out, &fit(line, width, Align::Center));
    }
}

fn render_parties(out: &mut String, parties: &PartiesBlock, width: usize) {
    let left_width = width * 2 / 3 - 1;
    let right_width = width - left_width - 1;

    let left: Vec<String> = parties
        .customer
        .rows
        .iter()
        .map(|r| format!("{}{}", fit(&r.label, LABEL_CHARS, Align::Left), r.value))
        .collect();
    let right: Vec<String> = parties
        .meta
        .rows
        .iter()
        .map(|r| format!("{} {}", r.label, r.value))
        .collect();

    for i in 0..left.len().max(right.len()) {
        let l = left.get(i).map(String::as_str).unwrap_or("");
        let r = right.get(i).map(String::as_str).unwrap_or("");
        push_line(
            out,
            &format!(
                "{} {}",
                fit(l, left_width, Align::Left),
                fit(r, right_width, Align::Left)
            ),
        );
    }
}

/// Display columns left for descriptions once the other columns are laid out.
fn description_budget(table: &ItemTable, width: usize) -> usize {
    let columns = table.header.cells.len();
    let others: usize = (0..columns)
        .filter(|&i| i != DESCRIPTION_COLUMN)
        .map(|i| {
            std::iter::once(&table.header)
                .chain(&table.rows)
                .filter_map(|r| r.cells.get(i))
                .map(|c| c.text.width())
                .max()
                .unwrap_or(0)
        })
        .sum();
    let heading = table
        .header
        .cells
        .get(DESCRIPTION_COLUMN)
        .map_or(0, |c| c.text.width());
    width
        .saturating_sub(others + columns * COLUMN_GAP)
        .max(heading)
}

fn table_row(row: &TableRow, description_width: usize) -> Row {
    Row::new(
        row.cells
            .iter()
            .enumerate()
            .map(|(i, c)| {
                if i == DESCRIPTION_COLUMN {
                    cell(&truncate(&c.text, description_width).0, c.align)
                } else {
                    cell(&c.text, c.align)
                }
            })
            .collect(),
    )
}

fn render_table(out: &mut String, table: &ItemTable, width: usize) {
    let description_width = description_budget(table, width);
    let mut grid = new_table();
    grid.set_titles(table_row(&table.header, description_width));
    for row in &table.rows {
        grid.add_row(table_row(row, description_width));
    }
    push_block(out, &grid.to_string(), 0);
}

/// Totals sit flush with the right edge of the page.
fn render_totals(out: &mut String, totals: &TotalsBlock, width: usize) {
    let mut grid = new_table();
    for row in &totals.rows {
        grid.add_row(Row::new(vec![
            cell(&row.label, Align::Left),
            cell(row.weight.as_deref().unwrap_or(""), Align::Center),
            cell(&row.amount, Align::Right),
        ]));
    }
    let rendered = grid.to_string();
    let block_width = rendered.lines().map(UnicodeWidthStr::width).max().unwrap_or(0);
    push_block(out, &rendered, (width + COLUMN_GAP).saturating_sub(block_width));
}

fn render_footer(out: &mut String, footer: &Footer, width: usize) {
    push_line(out, &"-".repeat(width));
    let right_width = footer.right.width().min(width);
    push_line(
        out,
        &format!(
            "{}{}",
            fit(&footer.left, width - right_width, Align::Left),
            fit(&footer.right, right_width, Align::Right)
        ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use invoicedesk_events::Projection;
    use invoicedesk_invoicing::{FormController, InvoiceField, ItemField};

    use crate::pagination::PageSettings;
    use crate::projector::DocumentProjector;

    fn copper_invoice() -> FormController {
        let mut controller = FormController::new();
        controller.update_field(InvoiceField::CustomerName, "Acme Metals");
        controller.update_field(InvoiceField::InvoiceNumber, "INV-007");
        controller.update_item(0, ItemField::Description, "Copper");
        controller.update_item(0, ItemField::UnitPrice, "10");
        controller.update_item(0, ItemField::NetWeight, "2");
        controller
    }

    #[test]
    fn fit_pads_and_truncates() {
        assert_eq!(fit("ab", 6, Align::Left), "ab    ");
        assert_eq!(fit("ab", 6, Align::Right), "    ab");
        assert_eq!(fit("ab", 6, Align::Center), "  ab  ");
        assert_eq!(fit("abcdef", 3, Align::Center), "abc");
        assert_eq!(fit("銅線x", 3, Align::Left), "銅 ");
        assert_eq!(fit("銅", 4, Align::Right), "  銅");
    }

    #[test]
    fn renders_every_section_of_a_page() {
        let doc = DocumentProjector::default().project(&copper_invoice().snapshot());
        let text = render_text(&doc, DEFAULT_WIDTH);
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].trim_start().starts_with("SUMON HANIF SCRAP"));
        assert!(lines.iter().any(|l| l.trim() == "TAX INVOICE"));
        assert!(lines.iter().any(|l| l.starts_with("Customer  Acme Metals")
            && l.ends_with("Inv. No. INV-007")));
        assert!(lines.iter().any(|l| l.contains("Copper") && l.contains("20.00")));
        assert!(lines.iter().any(|l| l.contains("TOTAL") && l.contains("2.000 (kg)")));
        assert!(lines.iter().any(|l| l.contains("CHANGE AMOUNT") && l.ends_with("-21.00")));

        let footer = lines.last().unwrap();
        assert!(footer.starts_with("SUMON HANIF SCRAP"));
        assert!(footer.ends_with("Receiver"));
        assert_eq!(footer.width(), DEFAULT_WIDTH);
    }

    #[test]
    fn double_width_descriptions_keep_columns_aligned() {
        let mut controller = FormController::new();
        controller.update_item(0, ItemField::Description, "銅線");
        controller.update_item(0, ItemField::UnitPrice, "10");
        controller.update_item(0, ItemField::NetWeight, "1");
        controller.add_item();
        controller.update_item(1, ItemField::Description, "Lot-A");
        controller.update_item(1, ItemField::UnitPrice, "10");
        controller.update_item(1, ItemField::NetWeight, "1");

        let doc = DocumentProjector::default().project(&controller.snapshot());
        let text = render_text(&doc, DEFAULT_WIDTH);
        let column_of = |row: &str, cell: &str| {
            let line = text.lines().find(|l| l.contains(row)).unwrap();
            line[..line.find(cell).unwrap()].width()
        };

        let price_column = column_of("UNIT PRICE", "UNIT PRICE");
        assert_eq!(column_of("銅線", "10.00"), column_of("Lot-A", "10.00"));
        assert_eq!(column_of("銅線", "10.00"), price_column + 2);
        assert_eq!(column_of("銅線", "1.000"), column_of("NET WT", "NET WT"));
    }

    #[test]
    fn long_descriptions_are_cut_to_the_page_width() {
        let mut controller = copper_invoice();
        controller.update_item(0, ItemField::Description, &"x".repeat(200));

        let doc = DocumentProjector::default().project(&controller.snapshot());
        let text = render_text(&doc, DEFAULT_WIDTH);
        let row = text.lines().find(|l| l.contains("xxxx")).unwrap();
        assert!(row.width() <= DEFAULT_WIDTH);
        assert!(row.contains("20.00"));
    }

    #[test]
    fn pages_are_separated_by_form_feed() {
        let mut controller = copper_invoice();
        controller.add_item();
        controller.add_item();
        let projector = DocumentProjector::new(
            Default::default(),
            PageSettings {
                first_page_rows: 1,
                continuation_rows: 1,
                totals_reserve_rows: 0,
                ..PageSettings::default()
            },
        );

        let text = render_text(&projector.project(&controller.snapshot()), DEFAULT_WIDTH);
        assert_eq!(text.matches('\u{000C}').count(), 2);
        assert_eq!(text.matches("Receiver").count(), 3);
    }
}
