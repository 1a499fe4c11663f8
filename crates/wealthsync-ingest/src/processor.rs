//! Per-request evidence processing: classify each item, stage what needs
//! remote ingestion, decode what can ride inline.
//!
//! Items are processed strictly in submission order; the classified output
//! preserves that order so the assembled prompt is reproducible.

use std::sync::Arc;

use tracing::{debug, warn};

use wealthsync_core::{
    ClassifiedEvidence, EvidenceItem, FileIngestor, Result, UnsupportedPolicy,
};

use crate::classifier::{self, MediaRoute};
use crate::stager::EvidenceStager;

/// Classified evidence plus the names of anything that was dropped.
#[derive(Debug)]
pub struct ProcessedEvidence {
    /// One entry per submitted item, in submission order.
    pub items: Vec<ClassifiedEvidence>,
    /// Filenames of items that classified as unsupported.
    pub dropped: Vec<String>,
}

/// Runs the classify → stage/decode pass over a request's evidence.
pub struct EvidenceProcessor {
    stager: EvidenceStager,
    policy: UnsupportedPolicy,
}

impl EvidenceProcessor {
    pub fn new(ingestor: Arc<dyn FileIngestor>, policy: UnsupportedPolicy) -> Self {
        Self {
            stager: EvidenceStager::new(ingestor),
            policy,
        }
    }

    /// Process all items in order. Staging failures abort the request;
    /// unsupported items are collected, never fatal.
    pub async fn process(&self, items: Vec<EvidenceItem>) -> Result<ProcessedEvidence> {
        let mut classified = Vec::with_capacity(items.len());
        let mut dropped = Vec::new();

        for item in items {
            match classifier::route(&item.filename, &item.media_type) {
                MediaRoute::InlineImage => {
                    debug!(
                        subsystem = "ingest",
                        component = "processor",
                        filename = %item.filename,
                        "Evidence classified as inline image"
                    );
                    let media_type = image_media_type(&item.filename, &item.media_type);
                    classified.push(ClassifiedEvidence::Image {
                        media_type,
                        bytes: item.bytes,
                    });
                }
                MediaRoute::RemoteFile { suffix } => {
                    debug!(
                        subsystem = "ingest",
                        component = "processor",
                        filename = %item.filename,
                        suffix = %suffix,
                        "Evidence classified for remote ingestion"
                    );
                    let handle = self
                        .stager
                        .stage(&item.bytes, &suffix, &item.filename)
                        .await?;
                    classified.push(ClassifiedEvidence::RemoteFile(handle));
                }
                MediaRoute::TextCandidate => match String::from_utf8(item.bytes) {
                    Ok(text) => classified.push(ClassifiedEvidence::InlineText {
                        filename: item.filename,
                        text,
                    }),
                    Err(_) => {
                        if self.policy == UnsupportedPolicy::Warn {
                            warn!(
                                subsystem = "ingest",
                                component = "processor",
                                filename = %item.filename,
                                "Dropping unsupported evidence item"
                            );
                        }
                        dropped.push(item.filename.clone());
                        classified.push(ClassifiedEvidence::Unsupported {
                            filename: item.filename,
                        });
                    }
                },
            }
        }

        Ok(ProcessedEvidence {
            items: classified,
            dropped,
        })
    }
}

/// Media type for an inline image part.
///
/// Trusts a declared `image/` type; otherwise derives from the extension
/// that got the item classified as an image in the first place.
fn image_media_type(filename: &str, declared: &str) -> String {
    let declared_lower = declared.to_ascii_lowercase();
    if declared_lower.starts_with("image/") {
        return declared_lower;
    }
    if filename.to_ascii_lowercase().ends_with(".png") {
        "image/png".to_string()
    } else {
        "image/jpeg".to_string()
    }
}
