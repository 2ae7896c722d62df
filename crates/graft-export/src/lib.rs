//! # graft-export
//!
//! The export pipeline: drive the scene assembler over one host scene
//! snapshot, serialize the resolved project graph, and hand the finished
//! document to the sink. A failed resolution aborts the whole run; the
//! sink never receives partial output.

pub mod assembler;
pub mod resolver;
pub mod writer;

pub use assembler::{ExportOptions, SceneAssembler};
pub use resolver::DependencyResolver;
pub use writer::serialize;

use graft_core::host::{DocumentSink, GeometryExporter, SceneSource};
use graft_core::GraftResult;
use graft_ir::Project;

/// Run a full export: assemble the project graph from the scene source,
/// serialize it, and write the document to the sink. Returns the project
/// graph for callers that want to inspect what was exported.
pub fn export(
    source: &mut dyn SceneSource,
    exporter: &mut dyn GeometryExporter,
    sink: &mut dyn DocumentSink,
    options: ExportOptions,
) -> GraftResult<Project> {
    let project = SceneAssembler::new(source, exporter, options).assemble()?;
    let document = writer::serialize(&project);
    tracing::debug!(bytes = document.len(), "serialized project document");
    sink.write(&document)?;
    Ok(project)
}
