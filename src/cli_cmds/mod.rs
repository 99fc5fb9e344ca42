mod category_cmds;
mod export_cmds;
mod import_cmds;

pub use category_cmds::{cmd_category, cmd_config};
pub use export_cmds::cmd_export_urls;
pub use import_cmds::{cmd_import, cmd_scan};

use anyhow::{Context, Result};

use crate::catalog::{find_category, CatalogStore, SqliteCatalog};
use crate::config::Config;
use crate::importer::CategoryTarget;

fn open_catalog(config: &Config) -> Result<SqliteCatalog> {
    let path = config.database_path();
    SqliteCatalog::open(&path)
        .with_context(|| format!("Could not open catalog at {}", path.display()))
}

/// Resolve a category key through the config mapping, then the catalog.
///
/// A mapping's id is trusted only while the catalog row under that id still
/// carries the mapped name; a category synced under a fallback id is found
/// by name instead.
fn resolve_target(
    config: &Config,
    store: &dyn CatalogStore,
    key: &str,
) -> Result<Option<CategoryTarget>> {
    if let Some(mapping) = config.mapping_for(key) {
        let by_id = store
            .category_by_id(mapping.id)?
            .filter(|c| c.name.eq_ignore_ascii_case(&mapping.name));
        let category = match by_id {
            Some(category) => Some(category),
            None => find_category(store, &mapping.name)?,
        };
        if let Some(category) = category {
            return Ok(Some(CategoryTarget::from_category(&category, config)));
        }
    }

    Ok(find_category(store, key)?.map(|c| CategoryTarget::from_category(&c, config)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::memory::MemoryCatalog;
    use crate::catalog::NewCategory;
    use crate::config::CategoryMapping;

    fn mapping(name: &str, id: i64) -> CategoryMapping {
        CategoryMapping {
            name: name.to_string(),
            id,
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_target_uses_mapping_id() {
        let mut config = Config::default();
        config.categories.push(mapping("Cars", 9));
        let mut store = MemoryCatalog::default();
        store.upsert_category(&NewCategory::named("Cars", Some(9))).unwrap();

        let target = resolve_target(&config, &store, "cars").unwrap().unwrap();
        assert_eq!((target.id, target.name.as_str()), (9, "Cars"));
    }

    #[test]
    fn test_resolve_target_ignores_taken_mapping_id() {
        let mut config = Config::default();
        config.categories.push(mapping("Nature", 3));
        config.categories.push(mapping("Space", 3));
        let mut store = MemoryCatalog::default();
        store.upsert_category(&NewCategory::named("Nature", Some(3))).unwrap();
        let space_id = store.upsert_category(&NewCategory::named("Space", Some(3))).unwrap();
        assert_eq!(space_id, 4);

        let target = resolve_target(&config, &store, "Space").unwrap().unwrap();
        assert_eq!((target.id, target.name.as_str()), (4, "Space"));
        let target = resolve_target(&config, &store, "Nature").unwrap().unwrap();
        assert_eq!(target.id, 3);
    }

    #[test]
    fn test_resolve_target_unknown_is_none() {
        let config = Config::default();
        let store = MemoryCatalog::default();
        assert!(resolve_target(&config, &store, "Nowhere").unwrap().is_none());
    }
}
