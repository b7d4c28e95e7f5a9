//! Hand-off to the external export backend (PDF encoding, download).

use serde::Serialize;
use thiserror::Error;

use invoicedesk_events::Projection;
use invoicedesk_invoicing::InvoiceRecord;

use crate::layout::RenderedDocument;
use crate::projector::DocumentProjector;

/// `Invoice-<invoiceNumber>.pdf`, used verbatim (an empty number gives `Invoice-.pdf`).
pub fn export_file_name(invoice_number: &str) -> String {
    format!("Invoice-{invoice_number}.pdf")
}

/// Everything an export backend needs: the snapshot and its projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub file_name: String,
    pub record: InvoiceRecord,
    pub document: RenderedDocument,
}

impl ExportRequest {
    pub fn new(record: InvoiceRecord, document: RenderedDocument) -> Self {
        Self {
            file_name: export_file_name(record.invoice_number()),
            record,
            document,
        }
    }
}

/// Downloadable output of an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export backend failed: {0}")]
    Backend(String),
    #[error("export backend produced an empty artifact")]
    Empty,
}

/// Seam to the export backend.
pub trait Exporter {
    fn export(&self, request: &ExportRequest) -> Result<ExportArtifact, ExportError>;
}

/// Project `record` and pass the result to `exporter`.
pub fn export_with<E: Exporter + ?Sized>(
    projector: &DocumentProjector,
    record: &InvoiceRecord,
    exporter: &E,
) -> Result<ExportArtifact, ExportError> {
    let request = ExportRequest::new(record.clone(), projector.project(record));
    tracing::info!(
        file_name = %request.file_name,
        pages = request.document.pages.len(),
        "exporting invoice"
    );

    let artifact = exporter.export(&request)?;
    if artifact.bytes.is_empty() {
        return Err(ExportError::Empty);
    }
    Ok(artifact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use invoicedesk_invoicing::{FormController, InvoiceField};

    #[derive(Default)]
    struct RecordingExporter {
        seen: RefCell<Vec<String>>,
        fail: bool,
    }

    impl Exporter for RecordingExporter {
        fn export(&self, request: &ExportRequest) -> Result<ExportArtifact, ExportError> {
            self.seen.borrow_mut().push(request.file_name.clone());
            if self.fail {
                return Err(ExportError::Backend("encoder unavailable".to_string()));
            }
            Ok(ExportArtifact {
                file_name: request.file_name.clone(),
                media_type: "application/pdf".to_string(),
                bytes: request.document.file_name.clone().into_bytes(),
            })
        }
    }

    #[test]
    fn file_name_embeds_invoice_number() {
        assert_eq!(export_file_name("INV-007"), "Invoice-INV-007.pdf");
        assert_eq!(export_file_name(""), "Invoice-.pdf");
    }

    #[test]
    fn export_hands_snapshot_to_backend() {
        let mut controller = FormController::new();
        controller.update_field(InvoiceField::InvoiceNumber, "INV-007");
        let exporter = RecordingExporter::default();

        let artifact =
            export_with(&DocumentProjector::default(), &controller.snapshot(), &exporter).unwrap();
        assert_eq!(artifact.file_name, "Invoice-INV-007.pdf");
        assert_eq!(*exporter.seen.borrow(), vec!["Invoice-INV-007.pdf".to_string()]);
    }

    #[test]
    fn backend_failure_is_surfaced() {
        let exporter = RecordingExporter {
            fail: true,
            ..RecordingExporter::default()
        };
        let err = export_with(
            &DocumentProjector::default(),
            &FormController::new().snapshot(),
            &exporter,
        )
        .unwrap_err();
        assert!(matches!(err, ExportError::Backend(msg) if msg.contains("encoder")));
    }

    #[test]
    fn empty_artifact_is_an_error() {
        struct Hollow;
        impl Exporter for Hollow {
            fn export(&self, request: &ExportRequest) -> Result<ExportArtifact, ExportError> {
                Ok(ExportArtifact {
                    file_name: request.file_name.clone(),
                    media_type: "application/pdf".to_string(),
                    bytes: Vec::new(),
                })
            }
        }

        let err = export_with(
            &DocumentProjector::default(),
            &FormController::new().snapshot(),
            &Hollow,
        )
        .unwrap_err();
        assert!(matches!(err, ExportError::Empty));
    }
}
