use anyhow::Result;
use std::path::Path;

use super::open_catalog;
use crate::catalog::{CatalogStore, Category, NewCategory};
use crate::config::Config;
use crate::CategoryAction;

fn print_categories(categories: &[Category]) {
    println!(
        "{:>4}  {:<24} {:>6} {:>8} {:>8} {:>8}  Description",
        "ID", "Name", "Order", "Desktop", "Mobile", "Total"
    );
    for c in categories {
        println!(
            "{:>4}  {:<24} {:>6} {:>8} {:>8} {:>8}  {}",
            c.id,
            c.name,
            c.display_order,
            c.desktop_count,
            c.mobile_count,
            c.total(),
            c.description
        );
    }
}

pub fn cmd_category(action: CategoryAction, config: &Config) -> Result<()> {
    let mut store = open_catalog(config)?;

    match action {
        CategoryAction::List => {
            let categories = store.categories()?;
            if categories.is_empty() {
                println!("No categories in {}", store.path().display());
                println!("Add [[categories]] to your config and run 'wallpic category sync'.");
                return Ok(());
            }
            print_categories(&categories);
        }
        CategoryAction::Sync => {
            if config.categories.is_empty() {
                println!("No [[categories]] entries in the configuration.");
                return Ok(());
            }

            for (i, mapping) in config.categories.iter().enumerate() {
                let category = NewCategory {
                    name: mapping.name.clone(),
                    id: Some(mapping.id),
                    description: mapping.description.clone(),
                    display_order: mapping.display_order.unwrap_or((i as u32 + 1) * 10),
                    cover_image_url: mapping.cover_image_url.clone(),
                };
                let id = store.upsert_category(&category)?;
                if id == mapping.id {
                    println!("✓ {} (id {})", mapping.name, id);
                } else {
                    println!(
                        "✓ {} (id {}, configured id {} was taken)",
                        mapping.name, id, mapping.id
                    );
                }
            }
            println!(
                "Synced {} categories into {}",
                config.categories.len(),
                store.path().display()
            );
        }
        CategoryAction::Recount => {
            let categories = store.recount()?;
            print_categories(&categories);
            println!("Recounted {} categories", categories.len());
        }
    }

    Ok(())
}

pub fn cmd_config(config: &Config, path: &Path) -> Result<()> {
    println!("Config file: {}", path.display());
    println!("Library root: {}", config.library_root().display());
    println!("Catalog: {}", config.database_path().display());
    println!();
    print!("{}", toml::to_string_pretty(config)?);

    Ok(())
}
