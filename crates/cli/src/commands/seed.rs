//! Seed the product catalog from a YAML file.
//!
//! ```yaml
//! products:
//!   - name: Control DualSense
//!     price: "69.99"
//!     description: Control inalámbrico para PS5
//!     image_url: https://example.com/dualsense.jpg
//! ```
//!
//! The whole file is validated before anything is written, and all inserts
//! run in a single transaction.

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{error, info};

use super::{CommandError, connect};

/// Top-level structure of a catalog file.
#[derive(Debug, Deserialize)]
pub struct CatalogFile {
    pub products: Vec<CatalogProduct>,
}

/// One product entry.
#[derive(Debug, Deserialize)]
pub struct CatalogProduct {
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Check every entry, returning one message per problem.
#[must_use]
pub fn validate_catalog(catalog: &CatalogFile) -> Vec<String> {
    let mut errors = Vec::new();

    if catalog.products.is_empty() {
        errors.push("catalog has no products".to_string());
    }

    for (i, product) in catalog.products.iter().enumerate() {
        let position = i + 1;
        if product.name.trim().is_empty() {
            errors.push(format!("product #{position}: name is empty"));
        }
        if product.price.is_sign_negative() {
            errors.push(format!(
                "product #{position} ({}): price must not be negative",
                product.name
            ));
        }
        if product.price.scale() > 2 {
            errors.push(format!(
                "product #{position} ({}): price has more than two decimals",
                product.name
            ));
        }
    }

    errors
}

/// Load products from `file_path` into `productos`.
///
/// With `clear`, products that no order references are deleted first.
/// Products that appear in an order are always kept so history and receipts
/// stay intact.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, validation fails,
/// or a database operation fails (nothing is written in that case).
pub async fn products(file_path: &str, clear: bool) -> Result<(), CommandError> {
    let path = Path::new(file_path);
    info!(path = %file_path, "Loading catalog from file");

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CommandError::Io {
            path: file_path.to_string(),
            source,
        })?;
    let catalog: CatalogFile = serde_yaml::from_str(&content)?;

    let errors = validate_catalog(&catalog);
    if !errors.is_empty() {
        error!("Catalog validation failed:");
        for err in &errors {
            error!("  - {err}");
        }
        return Err(CommandError::Validation(errors.len()));
    }
    info!(products = catalog.products.len(), "Catalog validated");

    let pool = connect().await?;
    let mut tx = pool.begin().await?;

    if clear {
        let removed = sqlx::query(
            "DELETE FROM productos WHERE id NOT IN (SELECT producto_id FROM orden_detalle)",
        )
        .execute(&mut *tx)
        .await?
        .rows_affected();
        info!(removed, "Cleared unreferenced products");
    }

    for product in &catalog.products {
        sqlx::query(
            "INSERT INTO productos (nombre, precio, descripcion, imagen_url) VALUES ($1, $2, $3, $4)",
        )
        .bind(product.name.trim())
        .bind(product.price)
        .bind(product.description.as_deref())
        .bind(product.image_url.as_deref())
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    info!(inserted = catalog.products.len(), "Seeding complete");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> CatalogFile {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_parse_catalog() {
        let catalog = parse(
            r#"
products:
  - name: Control DualSense
    price: "69.99"
    description: Control inalámbrico
  - name: Funda
    price: "5"
"#,
        );
        assert_eq!(catalog.products.len(), 2);
        assert_eq!(catalog.products[0].price, Decimal::new(6999, 2));
        assert!(catalog.products[1].image_url.is_none());
        assert!(validate_catalog(&catalog).is_empty());
    }

    #[test]
    fn test_missing_price_is_a_parse_error() {
        assert!(serde_yaml::from_str::<CatalogFile>("products:\n  - name: X\n").is_err());
    }

    #[test]
    fn test_validation_collects_every_problem() {
        let catalog = parse(
            r#"
products:
  - name: "  "
    price: "-1"
  - name: Funda
    price: "1.999"
"#,
        );
        let errors = validate_catalog(&catalog);
        assert_eq!(errors.len(), 3);
        assert!(errors[0].contains("name is empty"));
        assert!(errors[1].contains("negative"));
        assert!(errors[2].contains("two decimals"));
    }

    #[test]
    fn test_empty_catalog_is_rejected() {
        let catalog = parse("products: []\n");
        assert_eq!(validate_catalog(&catalog).len(), 1);
    }
}
