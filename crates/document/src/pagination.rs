//! Splitting the item table across fixed-size pages.
//!
//! Page 1 carries the header, title and parties blocks plus up to
//! `first_page_rows` item rows; later pages carry up to `continuation_rows`.
//! The table header repeats on each page with item rows. The totals block follows
//! the last item row when `totals_reserve_rows` rows are still free on that
//! page, otherwise it moves to a page of its own. Every page gets the footer.

use serde::{Deserialize, Serialize};

use crate::layout::{Block, Footer, ItemTable, Page, PageSize, TableRow, TotalsBlock};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageSettings {
    pub size: PageSize,
    pub first_page_rows: usize,
    pub continuation_rows: usize,
    pub totals_reserve_rows: usize,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            size: PageSize::A4,
            first_page_rows: 18,
            continuation_rows: 32,
            totals_reserve_rows: 6,
        }
    }
}

pub(crate) fn paginate(
    settings: &PageSettings,
    lead: Vec<Block>,
    header: TableRow,
    rows: Vec<TableRow>,
    totals: TotalsBlock,
    footer: Footer,
) -> Vec<Page> {
    let mut pages: Vec<Vec<Block>> = Vec::new();
    let mut blocks = lead;
    let mut capacity = settings.first_page_rows.max(1);
    let mut rows = rows.into_iter().peekable();

    loop {
        let chunk: Vec<TableRow> = rows.by_ref().take(capacity).collect();
        let used = chunk.len();
        blocks.push(Block::ItemTable(ItemTable {
            header: header.clone(),
            rows: chunk,
        }));

        if rows.peek().is_none() {
            if capacity - used < settings.totals_reserve_rows {
                pages.push(std::mem::take(&mut blocks));
            }
            blocks.push(Block::Totals(totals));
            pages.push(blocks);
            break;
        }

        pages.push(std::mem::take(&mut blocks));
        capacity = settings.continuation_rows.max(1);
    }

    pages
        .into_iter()
        .enumerate()
        .map(|(i, blocks)| Page {
            number: i + 1,
            blocks,
            footer: footer.clone(),
        })
        .collect()
}
