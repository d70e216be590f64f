//! # labxml - Vendor Lab Files to XML and Text Reports
//!
//! `labxml` converts a tree of chromatography instrument files into plain XML
//! and human-readable text reports. The input tree is copied first and only
//! the copy is modified.
//!
//! ## Key Features
//!
//! - **Staged batch conversion**: one global pass per file type, so every
//!   file produced by an earlier pass is picked up by the later ones.
//!
//! - **Safe deletes**: an original is removed only after its output has been
//!   written and confirmed on disk. Existing outputs are never overwritten.
//!
//! - **Embedded payload decoding**: Base64 + GZip `XmlContent` blocks in
//!   `.scml` containers and ACAML injection metadata are inflated in place.
//!
//! - **Schema-aware reports**: Fileset, ACAML, SampleContainerInfo,
//!   content-types and ACMD documents each get a fixed template, anything
//!   else a generic dump.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use labxml::pipeline::{Pipeline, PipelineConfig};
//!
//! let config = PipelineConfig {
//!     skip_dx: true,
//!     ..PipelineConfig::default()
//! };
//! let summary = Pipeline::new(config).run()?;
//! println!("{} files converted", summary.total_converted());
//! # Ok::<(), labxml::pipeline::PipelineError>(())
//! ```
//!
//! Rendering a single document:
//!
//! ```rust
//! use labxml::report::render_source;
//!
//! let report = render_source("<Bogus/>");
//! assert!(report.text.starts_with("Unknown XML type: Bogus"));
//! ```
//!
//! ## Stages
//!
//! | Stage | Input | Output |
//! |-------|-------|--------|
//! | CopyTree | `Data_to_parse/*` | `Output/*` |
//! | ConvertExternalFormat | `*.dx` | `<base>/` (external interpreter) |
//! | ConvertEncodedXmlContainer | `*.scml` | `<base>_scml.xml` |
//! | RenameProprietaryToXml | `*.acaml`, `*.acmd`, `*.mfx` | `<base>_<ext>.xml` |
//! | ParseXmlToReport | `*.xml` | `<base>_<YYYYMMDD_HHMMSS>.txt` |
//!
//! ## Architecture
//!
//! - [`xml`]: owned element tree with namespace resolution
//! - [`decoders`]: single-file conversions (SCML, rename, `.dx`)
//! - [`report`]: schema classification and text templates
//! - [`pipeline`]: tree copy, staged walk and two-phase commit

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod decoders;
pub mod pipeline;
pub mod report;
pub mod xml;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::decoders::{
        copy_rename, decode_content, scml_to_xml, ConvertError, DxConverter, DxMode,
        EmbeddedText,
    };
    pub use crate::pipeline::{
        commit, ConversionResult, Outcome, Pipeline, PipelineConfig, PipelineError,
        PipelineSummary, Stage, StageStats,
    };
    pub use crate::report::{render, render_file, render_source, Report, SchemaKind};
    pub use crate::xml::{parse_document, write_document, Document, Element};
}
