//! services/api/src/bin/openapi.rs
//!
//! Writes the OpenAPI document of the journal API.
//!
//! Usage: `openapi [PATH]`, defaulting to `openapi.json` in the working directory.

use journal_api_lib::web::ApiDoc;
use std::path::{Path, PathBuf};
use utoipa::OpenApi;

const DEFAULT_OUTPUT: &str = "openapi.json";

fn write_document(doc: &utoipa::openapi::OpenApi, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, doc.to_pretty_json()?)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    let doc = ApiDoc::openapi();
    write_document(&doc, &path)?;
    println!(
        "OpenAPI document for {} paths written to {}",
        doc.paths.paths.len(),
        path.display()
    );
    Ok(())
}
