//! Craftplan Data -- recipe pack loading for the craftplan engine.
//!
//! Upstream tooling scrapes packaged game content into registry documents
//! (item id -> recipe entry). This crate is the boundary that consumes
//! those documents: format detection by extension (RON, TOML, or JSON),
//! data-file discovery with conflicting-format errors, and multi-pack
//! merging where later packs override earlier ones.

pub mod loader;

pub use loader::{
    Format, PackError, detect_format, find_data_file, load_book, load_document, merge_packs,
    require_data_file,
};
