//! Catalog
//!
//! The catalog is read once from a CSV file and never changes afterwards.
//! Filtering never copies products: every query hands back references into
//! the loaded catalog, in catalog order.

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
    str::FromStr,
};

use csv::{ReaderBuilder, Trim};
use rustc_hash::FxHashMap;
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use thiserror::Error;
use tracing::info;

use crate::products::{PriceSchema, PriceTier, Product, ProductId};

pub mod records;

use records::{ProductRecord, detect_schema};

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file is missing or cannot be read.
    #[error("catalog file {} is unavailable: {source}", .path.display())]
    DataUnavailable {
        /// Path that was tried
        path: PathBuf,

        /// Underlying IO error
        source: io::Error,
    },

    /// The CSV could not be parsed.
    #[error("malformed catalog: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row.
    #[error("catalog is missing the {0:?} column")]
    MissingColumn(&'static str),

    /// A price cell is empty, not a number, or negative.
    #[error("row {row}: invalid {column} value {value:?}")]
    InvalidPrice {
        /// 1-based data row
        row: usize,

        /// Column holding the bad value
        column: &'static str,

        /// Cell contents
        value: String,
    },

    /// Two rows share the same product id.
    #[error("row {row}: duplicate product id {id}")]
    DuplicateProduct {
        /// 1-based data row of the second occurrence
        row: usize,

        /// Repeated identifier
        id: ProductId,
    },
}

/// Options controlling how a catalog is read.
#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    /// Force a pricing layout instead of detecting it from the header row.
    pub schema: Option<PriceSchema>,

    /// Currency the prices are expressed in.
    pub currency: &'static Currency,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            schema: None,
            currency: iso::BRL,
        }
    }
}

/// Category criterion for filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Every category.
    #[default]
    All,

    /// Only products in this category.
    Only(String),
}

impl CategoryFilter {
    /// Whether a product in `category` passes the filter.
    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if trimmed.eq_ignore_ascii_case("all") || trimmed.eq_ignore_ascii_case("todas") {
            Ok(CategoryFilter::All)
        } else {
            Ok(CategoryFilter::Only(trimmed.to_string()))
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("Todas"),
            CategoryFilter::Only(category) => f.write_str(category),
        }
    }
}

/// Keep the products in the given category.
pub fn filter_by_category<'p, 'a: 'p>(
    products: impl IntoIterator<Item = &'p Product<'a>>,
    category: &CategoryFilter,
) -> Vec<&'p Product<'a>> {
    products
        .into_iter()
        .filter(|product| category.matches(&product.category))
        .collect()
}

/// Keep the products whose Pix (or single) price is at most `ceiling`.
pub fn filter_by_max_price<'p, 'a: 'p>(
    products: impl IntoIterator<Item = &'p Product<'a>>,
    ceiling: &Money<'_, Currency>,
) -> Vec<&'p Product<'a>> {
    filter_by_max_price_on(products, ceiling, PriceTier::Pix)
}

/// Keep the products whose price in `tier` is at most `ceiling`.
pub fn filter_by_max_price_on<'p, 'a: 'p>(
    products: impl IntoIterator<Item = &'p Product<'a>>,
    ceiling: &Money<'_, Currency>,
    tier: PriceTier,
) -> Vec<&'p Product<'a>> {
    let ceiling = ceiling.to_minor_units();

    products
        .into_iter()
        .filter(|product| product.pricing.price(tier).to_minor_units() <= ceiling)
        .collect()
}

/// Both catalog criteria, applied together.
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter<'a> {
    /// Category criterion
    pub category: CategoryFilter,

    /// Price ceiling; `None` keeps every price
    pub max_price: Option<Money<'a, Currency>>,

    /// Tier the ceiling applies to
    pub tier: Option<PriceTier>,
}

impl CatalogFilter<'_> {
    /// Whether `product` passes every criterion.
    pub fn matches(&self, product: &Product<'_>) -> bool {
        let tier = self.tier.unwrap_or(PriceTier::Pix);

        self.category.matches(&product.category)
            && self.max_price.is_none_or(|ceiling| {
                product.pricing.price(tier).to_minor_units() <= ceiling.to_minor_units()
            })
    }
}

/// Catalog
#[derive(Debug)]
pub struct Catalog<'a> {
    products: Vec<Product<'a>>,
    index: FxHashMap<ProductId, usize>,
    schema: PriceSchema,
    currency: &'static Currency,
    base_dir: PathBuf,
}

impl Catalog<'static> {
    /// Load the catalog from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DataUnavailable`] if the file cannot be opened
    /// or read, or another [`CatalogError`] if its contents are malformed.
    pub fn load(path: impl AsRef<Path>, options: LoadOptions) -> Result<Self, CatalogError> {
        let path = path.as_ref();

        // Any IO failure, at open or while reading, means the catalog is unavailable
        let contents = fs::read(path).map_err(|source| CatalogError::DataUnavailable {
            path: path.to_path_buf(),
            source,
        })?;

        let base_dir = path
            .parent()
            .map_or_else(PathBuf::new, Path::to_path_buf);

        let catalog = Self::from_reader(contents.as_slice(), options)?.with_base_dir(base_dir);

        info!(
            path = %path.display(),
            products = catalog.len(),
            schema = ?catalog.schema(),
            "catalog loaded"
        );

        Ok(catalog)
    }

    /// Read the catalog from any CSV source.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the header row lacks a required column,
    /// a row fails to parse, a price is invalid, or an id repeats.
    pub fn from_reader(reader: impl io::Read, options: LoadOptions) -> Result<Self, CatalogError> {
        let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

        let schema = detect_schema(reader.headers()?, options.schema)?;

        let mut products = Vec::new();
        let mut index = FxHashMap::default();

        for (i, record) in reader.deserialize::<ProductRecord>().enumerate() {
            let row = i + 1;
            let product = record?.into_product(row, schema, options.currency)?;

            if index.insert(product.id, products.len()).is_some() {
                return Err(CatalogError::DuplicateProduct {
                    row,
                    id: product.id,
                });
            }

            products.push(product);
        }

        Ok(Self {
            products,
            index,
            schema,
            currency: options.currency,
            base_dir: PathBuf::new(),
        })
    }
}

impl<'a> Catalog<'a> {
    /// Set the directory local image references are resolved against.
    #[must_use]
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    /// All products, in file order.
    pub fn products(&self) -> &[Product<'a>] {
        &self.products
    }

    /// Look up a product by id.
    pub fn product(&self, id: ProductId) -> Option<&Product<'a>> {
        self.index
            .get(&id)
            .and_then(|&position| self.products.get(position))
    }

    /// Products matching `filter`, in file order.
    pub fn filter(&self, filter: &CatalogFilter<'_>) -> Vec<&Product<'a>> {
        self.products
            .iter()
            .filter(|product| filter.matches(product))
            .collect()
    }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();

        for product in &self.products {
            if !categories.contains(&product.category.as_str()) {
                categories.push(&product.category);
            }
        }

        categories
    }

    /// Highest price in `tier`; the upper bound of a price slider.
    pub fn price_ceiling(&self, tier: PriceTier) -> Money<'a, Currency> {
        self.products
            .iter()
            .map(|product| product.pricing.price(tier))
            .max_by_key(|price| price.to_minor_units())
            .unwrap_or_else(|| Money::from_minor(0, self.currency))
    }

    /// Pricing layout of every product in the catalog.
    pub fn schema(&self) -> PriceSchema {
        self.schema
    }

    /// Currency of every price in the catalog.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Directory local image references are relative to.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
