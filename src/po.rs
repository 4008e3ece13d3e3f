use anyhow::{Context, Result};
use polib::catalog::Catalog as PoCatalog;
use polib::message::Message;
use polib::metadata::CatalogMetadata;
use std::path::{Path, PathBuf};

use crate::catalog::{PoItem, PoTemplate};

/// Plural forms declared in template headers; every plural entry carries this many `msgstr[n]`.
pub const TEMPLATE_NPLURALS: usize = 2;
const TEMPLATE_PLURAL_EXPR: &str = "(n != 1)";

/// Build a polib catalog for one domain's template.
pub fn to_po_catalog(template: &PoTemplate) -> PoCatalog {
    let mut metadata = CatalogMetadata::new();
    metadata.project_id_version = template.domain.clone();
    metadata.mime_version = "1.0".to_string();
    metadata.content_type = "text/plain; charset=UTF-8".to_string();
    metadata.content_transfer_encoding = "8bit".to_string();
    metadata.plural_rules.nplurals = TEMPLATE_NPLURALS;
    metadata.plural_rules.expr = TEMPLATE_PLURAL_EXPR.to_string();

    let mut catalog = PoCatalog::new(metadata);
    for item in &template.items {
        catalog.append_or_update(to_message(item, TEMPLATE_NPLURALS));
    }
    catalog
}

fn to_message(item: &PoItem, nplurals: usize) -> Message {
    let mut builder = match &item.msgid_plural {
        Some(_) => Message::build_plural(),
        None => Message::build_singular(),
    };

    builder
        .with_msgid(item.msgid.clone())
        .with_source(item.references.join(" "));

    if !item.extracted_comments.is_empty() {
        builder.with_comments(item.extracted_comments.join("\n"));
    }
    if let Some(msgctxt) = &item.msgctxt {
        builder.with_msgctxt(msgctxt.clone());
    }
    if let Some(plural) = &item.msgid_plural {
        builder
            .with_msgid_plural(plural.clone())
            .with_msgstr_plural(vec![String::new(); nplurals]);
    }

    builder.done()
}

/// Path of the template file for `domain` under `output_dir`.
pub fn template_path(output_dir: &Path, domain: &str) -> PathBuf {
    output_dir.join(format!("{}.pot", domain))
}

/// Write one `<domain>.pot` per template into `output_dir`.
///
/// Returns the written paths in template order.
pub fn write_templates(templates: &[PoTemplate], output_dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Could not create {}", output_dir.display()))?;

    let mut written = Vec::new();
    for template in templates {
        let path = template_path(output_dir, &template.domain);
        polib::po_file::write(&to_po_catalog(template), &path)
            .with_context(|| format!("Writing messages to {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}
