//! Seller Catalog
//!
//! Marketplace listings loaded once from a CSV export into a Polars
//! DataFrame and queried per recommendation: which active sellers stock
//! the recommended crop. The catalog is an immutable snapshot, like every
//! other artifact consumed by this crate.

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::Serialize;

use crate::features::CategoryInput;
use crate::predictor::{CropRecommender, Recommendation};

/// One seller's listing for one crop.
#[derive(Debug, Clone, Serialize)]
pub struct SellerListing {
    pub seller_id: i64,
    pub business_name: String,
    pub contact_number: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub province: Option<String>,
    pub crop_name: String,
    pub crop_variety: Option<String>,
    pub price_per_kg: Option<f64>,
    pub quantity_available: Option<f64>,
    pub minimum_order: Option<f64>,
    pub quality_grade: Option<String>,
    pub organic_certified: bool,
    pub pesticide_free: bool,
    pub is_verified: bool,
}

impl SellerListing {
    /// "City, District, Province" from whichever parts are present.
    pub fn location_text(&self) -> String {
        [&self.city, &self.district, &self.province]
            .iter()
            .filter_map(|part| part.as_deref())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A recommendation paired with the sellers stocking the recommended crop.
#[derive(Debug, Clone, Serialize)]
pub struct MarketRecommendation {
    pub recommendation: Recommendation,
    pub sellers: Vec<SellerListing>,
}

impl MarketRecommendation {
    pub fn sellers_count(&self) -> usize {
        self.sellers.len()
    }
}

/// In-memory seller listing store.
pub struct SellerCatalog {
    listings: DataFrame,
}

impl SellerCatalog {
    /// Load listings from a CSV export.
    pub fn from_csv(path: &str) -> Result<Self> {
        let listings = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.into()))
            .with_context(|| format!("Failed to create CSV reader: {}", path))?
            .finish()
            .with_context(|| format!("Failed to load seller listings: {}", path))?;

        tracing::info!("Loaded {} seller listings from {}", listings.height(), path);

        Ok(Self { listings })
    }

    /// Wrap an already-loaded DataFrame.
    pub fn from_dataframe(listings: DataFrame) -> Self {
        Self { listings }
    }

    /// Number of listings in the catalog (including unavailable ones).
    pub fn len(&self) -> usize {
        self.listings.height()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.height() == 0
    }

    /// Sellers stocking a crop: case-insensitive name match, available
    /// listings from active sellers only, verified sellers first and
    /// cheaper offers before pricier ones.
    pub fn sellers_with_crop(&self, crop: &str) -> Result<Vec<SellerListing>> {
        let needle = crop.trim().to_lowercase();

        let filtered = self
            .listings
            .clone()
            .lazy()
            .filter(
                col("crop_name")
                    .str()
                    .to_lowercase()
                    .eq(lit(needle))
                    .and(col("is_available"))
                    .and(col("is_active")),
            )
            .collect()
            .with_context(|| format!("Failed to query listings for crop '{}'", crop))?;

        let mut listings = Self::rows_to_listings(&filtered)?;
        listings.sort_by(|a, b| {
            b.is_verified.cmp(&a.is_verified).then_with(|| {
                a.price_per_kg
                    .unwrap_or(f64::INFINITY)
                    .total_cmp(&b.price_per_kg.unwrap_or(f64::INFINITY))
            })
        });

        Ok(listings)
    }

    /// Recommend a crop and look up who sells it, in one step.
    pub fn recommend_with_sellers(
        &self,
        recommender: &CropRecommender,
        input: &CategoryInput,
    ) -> Result<MarketRecommendation> {
        let recommendation = recommender.recommend(input)?;
        let sellers = self.sellers_with_crop(&recommendation.crop)?;

        tracing::debug!(
            "Found {} seller(s) offering '{}'",
            sellers.len(),
            recommendation.crop
        );

        Ok(MarketRecommendation {
            recommendation,
            sellers,
        })
    }

    /// Extract typed listings from a filtered frame.
    fn rows_to_listings(df: &DataFrame) -> Result<Vec<SellerListing>> {
        // Numeric column with i64 fallback (CSV inference may pick either).
        fn float_col(df: &DataFrame, name: &str) -> Option<Float64Chunked> {
            let column = df.column(name).ok()?;
            if let Ok(f) = column.f64() {
                return Some(f.clone());
            }
            if let Ok(i) = column.i64() {
                let cast = i.cast(&DataType::Float64).ok()?;
                return Some(cast.f64().ok()?.clone());
            }
            None
        }

        fn str_col<'a>(df: &'a DataFrame, name: &str) -> Option<&'a StringChunked> {
            df.column(name).ok().and_then(|c| c.str().ok())
        }

        fn bool_col<'a>(df: &'a DataFrame, name: &str) -> Option<&'a BooleanChunked> {
            df.column(name).ok().and_then(|c| c.bool().ok())
        }

        let seller_id = df
            .column("seller_id")
            .context("Column 'seller_id' not found")?
            .i64()
            .context("Column 'seller_id' is not integer type")?;
        let business_name =
            str_col(df, "business_name").context("Column 'business_name' missing or not string")?;
        let crop_name =
            str_col(df, "crop_name").context("Column 'crop_name' missing or not string")?;

        let contact_number = str_col(df, "contact_number");
        let city = str_col(df, "city");
        let district = str_col(df, "district");
        let province = str_col(df, "province");
        let crop_variety = str_col(df, "crop_variety");
        let quality_grade = str_col(df, "quality_grade");

        let price_per_kg = float_col(df, "price_per_kg");
        let quantity_available = float_col(df, "quantity_available");
        let minimum_order = float_col(df, "minimum_order");

        let organic_certified = bool_col(df, "organic_certified");
        let pesticide_free = bool_col(df, "pesticide_free");
        let is_verified = bool_col(df, "is_verified");

        let mut listings = Vec::with_capacity(df.height());
        for idx in 0..df.height() {
            let (Some(id), Some(name), Some(crop)) = (
                seller_id.get(idx),
                business_name.get(idx),
                crop_name.get(idx),
            ) else {
                // Rows without an identity are export noise; skip them.
                continue;
            };

            listings.push(SellerListing {
                seller_id: id,
                business_name: name.to_string(),
                contact_number: contact_number.and_then(|c| c.get(idx)).map(str::to_string),
                city: city.and_then(|c| c.get(idx)).map(str::to_string),
                district: district.and_then(|c| c.get(idx)).map(str::to_string),
                province: province.and_then(|c| c.get(idx)).map(str::to_string),
                crop_name: crop.to_string(),
                crop_variety: crop_variety.and_then(|c| c.get(idx)).map(str::to_string),
                price_per_kg: price_per_kg.as_ref().and_then(|c| c.get(idx)),
                quantity_available: quantity_available.as_ref().and_then(|c| c.get(idx)),
                minimum_order: minimum_order.as_ref().and_then(|c| c.get(idx)),
                quality_grade: quality_grade.and_then(|c| c.get(idx)).map(str::to_string),
                organic_certified: organic_certified.and_then(|c| c.get(idx)).unwrap_or(false),
                pesticide_free: pesticide_free.and_then(|c| c.get(idx)).unwrap_or(false),
                is_verified: is_verified.and_then(|c| c.get(idx)).unwrap_or(false),
            });
        }

        Ok(listings)
    }
}
