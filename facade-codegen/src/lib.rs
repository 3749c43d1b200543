//! Entry-file synthesis and writing.
//!
//! Given the export set collected by `facade-scan`, this crate computes the
//! content of every `__init__.py` entry file implied by the declared export
//! paths and writes the tree to disk, fully overwriting prior output so
//! regeneration is idempotent.

mod entry;
mod file;
mod generator;

pub use entry::{ENTRY_FILE_NAME, EntryFile, EntryLine, EntryTree, GENERATED_HEADER};
pub use file::{PreviewFile, write_file};
pub use generator::{GenerateReport, Generator};
