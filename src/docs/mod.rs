//! Documentation tree construction
//!
//! Naming rules, the static getting-started section, the pure tree builder
//! and the staged writer that places a rendered tree on disk.

pub mod getting_started;
pub mod naming;
pub mod tree;
pub mod writer;

pub use naming::{endpoint_file_stem, sanitize_dir_name, OperationKind};
pub use tree::{CategoryContent, DocPage, DocTreeBuilder, RenderedTree, SynthesizedDocs};
pub use writer::write_tree;
