//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `scribe-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `ScaffoldCatalog`: Read-only scaffold lookup
//!   - `TextProvider`: One-shot text generation from a prompt
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{CompletionRequest, Filesystem, ScaffoldCatalog, TextProvider};

#[cfg(test)]
pub use output::{MockFilesystem, MockScaffoldCatalog, MockTextProvider};
