//! The `smartstart validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(catalog_path: PathBuf) -> Result<()> {
    let catalogs = if catalog_path.is_dir() {
        smartstart_core::parser::load_catalog_directory(&catalog_path)?
    } else {
        vec![smartstart_core::parser::parse_catalog(&catalog_path)?]
    };

    let mut total_warnings = 0;

    for catalog in &catalogs {
        println!(
            "Catalog: {} ({} focus, {} letter, {} pairs)",
            catalog.name,
            catalog.focus.len(),
            catalog.letter.len(),
            catalog.pair_count()
        );

        let warnings = smartstart_core::parser::validate_catalog(catalog);
        for w in &warnings {
            let prefix = w
                .target
                .as_ref()
                .map(|target| format!("  [{target}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All catalogs valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
