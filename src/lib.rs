//! Extract gettext-style translatable strings from JavaScript and TypeScript
//! sources into per-domain PO template catalogs.

pub mod binder;
pub mod catalog;
pub mod commands;
pub mod comments;
pub mod config;
pub mod error;
pub mod extractor;
pub mod fold;
pub mod fs;
pub mod logging;
pub mod matcher;
pub mod message;
pub mod po;

#[cfg(test)]
pub(crate) mod testing;

pub use catalog::{Catalog, PoItem, PoTemplate};
pub use error::ExtractError;
pub use extractor::{extract, extract_messages, ExtractOptions};
pub use message::{MessageEntry, Role, SourceReference};
