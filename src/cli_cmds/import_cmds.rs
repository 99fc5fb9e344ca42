use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Select};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{open_catalog, resolve_target};
use crate::catalog::{CatalogStore, SqliteCatalog};
use crate::config::Config;
use crate::discovery::folder_name_variants;
use crate::error::ImportError;
use crate::importer::{CategoryTarget, ImportOutcome, ImportSummary, Importer};

fn print_summary(summary: &ImportSummary) {
    println!("  Wallpapers added: {}", summary.succeeded);
    println!("  Failed:           {}", summary.failed);
    println!("  Desktop:          {}", summary.desktop);
    println!("  Mobile:           {}", summary.mobile);
}

fn prompt_category(store: &SqliteCatalog, config: &Config) -> Result<Option<CategoryTarget>> {
    let categories = store.categories()?;
    if categories.is_empty() {
        println!("No categories in the catalog. Run 'wallpic category sync' first.");
        return Ok(None);
    }

    let items: Vec<String> = categories
        .iter()
        .map(|c| format!("{:>3}. {} ({} wallpapers)", c.id, c.name, c.total()))
        .collect();

    let theme = ColorfulTheme::default();
    let choice = Select::with_theme(&theme)
        .with_prompt("Select a category to import")
        .items(&items)
        .default(0)
        .interact_opt()?;

    Ok(choice.map(|idx| CategoryTarget::from_category(&categories[idx], config)))
}

pub fn cmd_import(config: &Config, category: Option<&str>, all: bool) -> Result<()> {
    let mut store = open_catalog(config)?;
    let mut importer = Importer::new(config, StdRng::from_entropy());

    if all {
        let targets: Vec<CategoryTarget> = store
            .categories()?
            .iter()
            .map(|c| CategoryTarget::from_category(c, config))
            .collect();
        if targets.is_empty() {
            println!("No categories in the catalog. Run 'wallpic category sync' first.");
            return Ok(());
        }

        let batch = importer.import_all(&targets, &mut store);
        println!(
            "\n✓ Imported {} of {} categories",
            batch.categories_imported,
            targets.len()
        );
        print_summary(&batch.totals);
        return Ok(());
    }

    let target = match category {
        Some(key) => match resolve_target(config, &store, key)? {
            Some(target) => target,
            None => {
                eprintln!("Category '{}' not found in the catalog.", key);
                eprintln!("Run 'wallpic category list' to see available categories.");
                return Ok(());
            }
        },
        None => match prompt_category(&store, config)? {
            Some(target) => target,
            None => return Ok(()),
        },
    };

    match importer.import_category(&target, &mut store) {
        Ok(ImportOutcome::Imported(summary)) => {
            println!("\n✓ Import complete for '{}'", target.name);
            print_summary(&summary);
            if let Some(category) = store.category_by_id(target.id)? {
                println!(
                    "  Category totals: {} desktop, {} mobile",
                    category.desktop_count, category.mobile_count
                );
            }
        }
        Ok(ImportOutcome::NothingToDo) => {
            println!("No images found for '{}'. Nothing to do.", target.name);
        }
        Err(ImportError::CategoryFolderNotFound(name)) => {
            eprintln!(
                "No folder for '{}' under {}",
                name,
                config.library_root().display()
            );
            eprintln!("Tried: {}", folder_name_variants(&name).join(", "));
        }
        Err(e) => {
            eprintln!("Import of '{}' failed: {}", target.name, e);
        }
    }

    Ok(())
}

/// Target for a dry run: the catalog entry when one exists, otherwise the
/// config mapping, so scanning works before the catalog is created.
fn scan_target(config: &Config, key: &str) -> Result<Option<CategoryTarget>> {
    if config.database_path().exists() {
        let store = open_catalog(config)?;
        if let Some(target) = resolve_target(config, &store, key)? {
            return Ok(Some(target));
        }
    }

    Ok(config.mapping_for(key).map(|mapping| CategoryTarget {
        id: mapping.id,
        name: mapping.name.clone(),
        folder: mapping.folder.clone(),
    }))
}

pub fn cmd_scan(config: &Config, key: &str) -> Result<()> {
    let Some(target) = scan_target(config, key)? else {
        eprintln!("Category '{}' not found in the catalog or configuration.", key);
        eprintln!("Run 'wallpic category list' to see available categories.");
        return Ok(());
    };
    let mut importer = Importer::new(config, StdRng::from_entropy());

    let items = match importer.preview(&target) {
        Ok(items) => items,
        Err(ImportError::CategoryFolderNotFound(name)) => {
            eprintln!(
                "No folder for '{}' under {}",
                name,
                config.library_root().display()
            );
            eprintln!("Tried: {}", folder_name_variants(&name).join(", "));
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if items.is_empty() {
        println!("No images found for '{}'.", target.name);
        return Ok(());
    }

    println!("Scan of '{}' (id {}):", target.name, target.id);
    for item in &items {
        let thumb = if item.pair.has_thumbnail() {
            item.pair
                .thumbnail_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        } else {
            "-".to_string()
        };

        match &item.record {
            Ok(record) => println!(
                "{:>4}. {} -> {} [{}]\n      {} | {} | {}x{} {} {} | {}",
                item.index,
                item.pair.filename,
                thumb,
                item.pair.confidence,
                record.title,
                record.tags_joined(),
                record.width,
                record.height,
                record.orientation.as_str(),
                record.quality.as_str(),
                record.aspect_ratio
            ),
            Err(e) => println!(
                "{:>4}. {} -> {} [{}]\n      unreadable: {}",
                item.index, item.pair.filename, thumb, item.pair.confidence, e
            ),
        }
    }

    let readable = items.iter().filter(|i| i.record.is_ok()).count();
    println!(
        "\n{} pairs, {} readable, {} unreadable",
        items.len(),
        readable,
        items.len() - readable
    );

    Ok(())
}
