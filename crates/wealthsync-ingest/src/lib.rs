//! # wealthsync-ingest
//!
//! Evidence ingestion pipeline for wealthsync:
//!
//! - Media classification by filename/declared type
//! - Scoped temporary staging and provider file upload
//! - Ordered multimodal prompt assembly
//!
//! The pipeline runs strictly in submission order and has exactly one
//! network touchpoint (the provider upload behind [`FileIngestor`]).
//!
//! [`FileIngestor`]: wealthsync_core::FileIngestor

pub mod assembler;
pub mod classifier;
pub mod processor;
pub mod stager;

pub use assembler::assemble;
pub use classifier::{route, MediaRoute};
pub use processor::{EvidenceProcessor, ProcessedEvidence};
pub use stager::EvidenceStager;
