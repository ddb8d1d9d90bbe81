//! Core analysis engine.
//!
//! - `frontend`: boundary to the C++ front end (declaration stream, environment)
//! - `collect`: doc-comment tag and registration attribute grammars
//! - `model`: the reflection model (`TypeRecord` and friends)
//! - `extract`: per-file extraction of records from declarations
//! - `registry`: global store of records keyed by qualified name
//! - `resolve`: binds cross references once all files are merged
//! - `orchestrator`: worker pool driving a whole run
//! - `scan`: discovery of declaration dumps under a source root

pub mod collect;
pub mod extract;
pub mod frontend;
pub mod model;
pub mod orchestrator;
pub mod registry;
pub mod resolve;
pub mod scan;

pub use orchestrator::{AnalysisError, AnalysisOptions, AnalysisOrchestrator, AnalysisOutcome};
pub use registry::TypeRegistry;
pub use resolve::{ResolveError, resolve_references};
