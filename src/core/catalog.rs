//! Product catalog — the ordered item list the ring displays.
//!
//! The catalog is supplied up front and is immutable for the lifetime of a
//! carousel instance; slot order follows file order.  Catalogs load from a
//! TOML file, or fall back to the built-in demo set so the binary works
//! out of the box.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// One product on the ring.
#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    /// Opaque identifier used in the navigation URL.
    pub slug: String,
    pub title: String,
    /// Price in minor units (cents).
    pub price_minor: u64,
    /// Display image, resolved against the assets directory.
    #[serde(default)]
    pub image: Option<PathBuf>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("catalog file {path} contains no products")]
    Empty { path: PathBuf },
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(rename = "product", default)]
    products: Vec<Product>,
}

/// Ordered, immutable product list.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Load a catalog from a TOML file of `[[product]]` tables.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &contents)
    }

    fn parse(path: &Path, contents: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile =
            toml::from_str(contents).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        if file.products.is_empty() {
            return Err(CatalogError::Empty {
                path: path.to_path_buf(),
            });
        }
        Ok(Self {
            products: file.products,
        })
    }

    /// The built-in demo storefront: eight prints and posters.
    pub fn demo() -> Self {
        let demo = |slug: &str, title: &str, price_minor: u64, description: &str| Product {
            slug: slug.to_string(),
            title: title.to_string(),
            price_minor,
            image: Some(PathBuf::from(format!("{slug}.webp"))),
            description: Some(description.to_string()),
        };
        Self {
            products: vec![
                demo("1", "Aurora Canvas Print", 4900, "High-resolution canvas print with vibrant color reproduction."),
                demo("2", "Noir Photo Poster", 2900, "Museum-grade photo poster with deep blacks and crisp detail."),
                demo("3", "Sunlit Print", 3900, "Archival print capturing warm highlights and soft gradients."),
                demo("4", "Minimal Study", 3500, "Minimal composition print."),
                demo("5", "Urban Geometry", 4500, "Geometric urban landscape print."),
                demo("6", "Pastel Flow", 3200, "Soft pastel colorway poster."),
                demo("7", "Coastal Breeze", 4200, "Coastal themed fine-art print."),
                demo("8", "Night Drive", 3800, "Moody, cinematic night scene."),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Product> {
        self.products.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }
}

/// Format a minor-unit price for display, e.g. `"$49.00"`.
pub fn format_price(minor: u64) -> String {
    format!("${}.{:02}", minor / 100, minor % 100)
}

// ───────────────────────────────────────── tests ─────────────
