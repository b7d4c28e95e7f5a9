use invoicedesk_core::numeric::{format_money, format_weight};
use invoicedesk_events::Projection;
use invoicedesk_invoicing::{InvoiceRecord, InvoiceTotals, SellerCatalog};

use crate::export::export_file_name;
use crate::layout::{
    Align, Block, CUSTOMER_LABEL_WIDTH, CustomerBlock, Footer, HeaderBlock, ITEM_COLUMNS,
    LabeledRow, MetaBlock, NOT_AVAILABLE, PartiesBlock, RECEIVER, RenderedDocument, TITLE,
    TableRow, TextCell, TotalsBlock, TotalsRow, WEIGHT_UNIT,
};
use crate::pagination::{PageSettings, paginate};
use crate::settings::{DocumentSettings, SettingsError};

/// Projects an invoice snapshot into a [`RenderedDocument`].
///
/// Holds only static configuration (seller catalog, page settings); projecting
/// never mutates the projector or the record.
#[derive(Debug, Clone)]
pub struct DocumentProjector {
    sellers: SellerCatalog,
    pages: PageSettings,
}

impl DocumentProjector {
    pub fn new(sellers: SellerCatalog, pages: PageSettings) -> Self {
        Self { sellers, pages }
    }

    pub fn from_settings(settings: &DocumentSettings) -> Result<Self, SettingsError> {
        Ok(Self::new(settings.seller_catalog()?, settings.pagination))
    }

    pub fn sellers(&self) -> &SellerCatalog {
        &self.sellers
    }

    pub fn page_settings(&self) -> &PageSettings {
        &self.pages
    }

    fn customer_block(record: &InvoiceRecord) -> CustomerBlock {
        CustomerBlock {
            label_width: CUSTOMER_LABEL_WIDTH,
            rows: vec![
                LabeledRow::new("Customer", record.customer_name()),
                LabeledRow::new("TRN", record.tax_registration_number()),
                LabeledRow::new("Address", record.customer_address()),
            ],
        }
    }

    fn meta_block(record: &InvoiceRecord) -> MetaBlock {
        let or_na = |v: &str| {
            if v.is_empty() {
                NOT_AVAILABLE.to_string()
            } else {
                v.to_string()
            }
        };
        MetaBlock {
            rows: vec![
                LabeledRow::new("Inv. No.", or_na(record.invoice_number())),
                LabeledRow::new("Inv. Date", or_na(record.invoice_date())),
            ],
        }
    }

    fn table_header() -> TableRow {
        TableRow {
            cells: ITEM_COLUMNS
                .iter()
                .map(|c| TextCell::new(*c, Align::Center).emphasized())
                .collect(),
        }
    }

    fn item_rows(record: &InvoiceRecord) -> Vec<TableRow> {
        record
            .items()
            .iter()
            .enumerate()
            .map(|(i, item)| TableRow {
                cells: vec![
                    TextCell::new((i + 1).to_string(), Align::Center),
                    TextCell::new(item.description(), Align::Left),
                    TextCell::new(format_money(item.unit_price()), Align::Center),
                    TextCell::new(format_weight(item.net_weight()), Align::Center),
                    TextCell::new(format_money(item.total_amount()), Align::Center),
                ],
            })
            .collect()
    }

    fn totals_block(totals: &InvoiceTotals) -> TotalsBlock {
        let row = |label: &str, amount: f64| TotalsRow {
            label: label.to_string(),
            weight: None,
            amount: format_money(amount),
        };
        TotalsBlock {
            rows: vec![
                TotalsRow {
                    label: "TOTAL".to_string(),
                    weight: Some(format!(
                        "{} {WEIGHT_UNIT}",
                        format_weight(totals.total_weight)
                    )),
                    amount: format_money(totals.total_amount),
                },
                row("VAT 5%", totals.vat),
                row("GRAND TOTAL", totals.grand_total),
                row("PAID AMOUNT", totals.paid_amount),
                row("CHANGE AMOUNT", totals.change_amount),
            ],
        }
    }
}

impl Default for DocumentProjector {
    fn default() -> Self {
        Self::new(SellerCatalog::builtin(), PageSettings::default())
    }
}

impl Projection for DocumentProjector {
    type Source = InvoiceRecord;
    type View = RenderedDocument;

    fn project(&self, record: &InvoiceRecord) -> RenderedDocument {
        let totals = InvoiceTotals::compute(record);

        if self.sellers.get(record.seller_id()).is_none() {
            tracing::debug!(seller_id = %record.seller_id(), "unknown seller, using default profile");
        }
        let seller = self.sellers.resolve(record.seller_id());

        let lead = vec![
            Block::Header(HeaderBlock {
                seller_name: seller.display_name.clone(),
                address_lines: seller.address_lines.clone(),
            }),
            Block::Title(TITLE.to_string()),
            Block::Parties(PartiesBlock {
                customer: Self::customer_block(record),
                meta: Self::meta_block(record),
            }),
        ];
        let footer = Footer {
            left: seller.display_name.clone(),
            right: RECEIVER.to_string(),
        };

        let pages = paginate(
            &self.pages,
            lead,
            Self::table_header(),
            Self::item_rows(record),
            Self::totals_block(&totals),
            footer,
        );

        tracing::debug!(
            items = record.items().len(),
            pages = pages.len(),
            total_amount = totals.total_amount,
            grand_total = totals.grand_total,
            change_amount = totals.change_amount,
            "projected invoice document"
        );

        RenderedDocument {
            page_size: self.pages.size,
            pages,
            totals,
            file_name: export_file_name(record.invoice_number()),
        }
    }
}
