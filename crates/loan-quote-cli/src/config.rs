use loan_quote_core::catalog::{LoanType, LoanTypeCatalog};
use std::fs;
use std::path::Path;

use crate::input::file::resolve_path;

/// The builtin catalog, or a replacement read from `path`.
///
/// Files ending in `.yaml` / `.yml` are parsed as YAML, anything else as JSON.
/// Both hold a list of loan types.
pub fn load_catalog(path: Option<&str>) -> Result<LoanTypeCatalog, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(LoanTypeCatalog::builtin().clone());
    };

    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;

    let loan_types: Vec<LoanType> = if is_yaml(&canonical) {
        serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?
    } else {
        serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?
    };

    let catalog = LoanTypeCatalog::new(loan_types)?;
    tracing::info!(
        path = %canonical.display(),
        loan_types = catalog.loan_types().len(),
        "loaded replacement catalog"
    );
    Ok(catalog)
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}
