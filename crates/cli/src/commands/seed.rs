//! Seed the catalog from a YAML file.
//!
//! ```yaml
//! items:
//!   - name: Round Widget
//!     description: A widget that is round
//!     price: "2.99"
//! ```
//!
//! The whole file is parsed and validated before the database is touched.

use std::path::Path;

use serde::Deserialize;
use tracing::{error, info};

use cartwright_api::db::{self, ItemRepository, PgItemRepository};
use cartwright_core::{NewItem, Price};

use super::{CommandError, database_url};

/// Top-level layout of a seed file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedFile {
    pub items: Vec<SeedItem>,
}

/// One catalog entry in a seed file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedItem {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
}

impl From<SeedItem> for NewItem {
    fn from(item: SeedItem) -> Self {
        Self {
            name: item.name,
            description: item.description,
            price: item.price,
        }
    }
}

/// Check every entry, returning one message per problem.
#[must_use]
pub fn validate(file: &SeedFile) -> Vec<String> {
    let mut errors = Vec::new();

    for (index, item) in file.items.iter().enumerate() {
        let entry = index + 1;
        if item.name.trim().is_empty() {
            errors.push(format!("item {entry}: name must not be empty"));
        }
        if item.price.is_negative() {
            errors.push(format!(
                "item {entry} ({}): price must not be negative, got {}",
                item.name, item.price
            ));
        }
        if item.price.exceeds_max() {
            errors.push(format!(
                "item {entry} ({}): price must be at most {}, got {}",
                item.name,
                Price::MAX,
                item.price
            ));
        }
    }

    errors
}

/// Insert catalog items from `file_path`.
///
/// # Arguments
///
/// * `file_path` - Path to the YAML file
/// * `clear_existing` - If true, delete every existing item first
///
/// # Errors
///
/// Returns an error if the file cannot be read or fails validation, or if
/// any database operation fails.
pub async fn items(file_path: &str, clear_existing: bool) -> Result<(), CommandError> {
    let path = Path::new(file_path);
    info!(path = %file_path, "Loading catalog items from file");

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CommandError::Read {
            path: file_path.to_string(),
            source,
        })?;
    let seed: SeedFile = serde_yaml::from_str(&content)?;

    info!(items = seed.items.len(), "Parsed seed file");

    let errors = validate(&seed);
    if !errors.is_empty() {
        error!("Seed file validation failed:");
        for err in &errors {
            error!("  - {err}");
        }
        return Err(CommandError::Validation(errors.len()));
    }

    let database_url = database_url()?;
    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    let repo = PgItemRepository::new(pool);

    if clear_existing {
        let removed = repo.delete_all().await?;
        info!(removed, "Cleared existing catalog");
    }

    let mut inserted = 0_usize;
    for item in seed.items {
        let item = repo.create(NewItem::from(item)).await?;
        info!(id = %item.id, name = %item.name, price = %item.price, "Inserted item");
        inserted += 1;
    }

    info!(inserted, "Seeding complete!");
    Ok(())
}
