//! # Seed Data
//!
//! The built-in appliance catalog and the sample reviews shown on the
//! refrigerator page. Loaded at startup unless a catalog file is configured.
//!
//! ## Catalog File
//! A JSON array of product payloads, the same shape the admin "Add
//! Product" form posts:
//! ```json
//! [
//!   { "name": "Toaster", "priceCents": 2999, "category": "Small Appliances" }
//! ]
//! ```
//! Ids are assigned in file order starting at 1.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use cheapware_core::{NewProduct, Product, Review};
use tracing::{debug, info};

use crate::error::StoreResult;

/// Id of the product that carries the sample reviews and detail fields.
pub const SHOWCASE_PRODUCT_ID: u64 = 1;

fn placeholder(text: &str) -> String {
    format!("/placeholder.svg?height=300&width=300&text={text}")
}

fn gallery_image(text: &str) -> String {
    format!("/placeholder.svg?height=600&width=600&text={text}")
}

/// Catalog launch date. Product `n` was added `n - 1` days later, so the
/// "newest" sort has something to work with.
fn launch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

#[allow(clippy::too_many_arguments)]
fn appliance(
    id: u64,
    name: &str,
    description: &str,
    price_cents: i64,
    category: &str,
    brand: &str,
    stock: i64,
    featured: bool,
    rating: f32,
    image_text: &str,
) -> Product {
    let created_at = launch() + Duration::days(id as i64 - 1);
    Product {
        id,
        name: name.to_string(),
        description: description.to_string(),
        price_cents,
        original_price_cents: None,
        image: placeholder(image_text),
        images: Vec::new(),
        category: category.to_string(),
        brand: brand.to_string(),
        stock,
        featured,
        rating,
        features: Vec::new(),
        specifications: BTreeMap::new(),
        created_at,
        updated_at: created_at,
    }
}

/// The six-appliance starter catalog.
pub fn default_catalog() -> Vec<Product> {
    let mut fridge = appliance(
        1,
        "Premium Refrigerator",
        "Energy-efficient refrigerator with smart features",
        89999,
        "Refrigeration",
        "CoolTech",
        15,
        true,
        4.5,
        "Refrigerator",
    );
    fridge.original_price_cents = Some(109999);
    fridge.images = ["Refrigerator+Front", "Refrigerator+Side", "Refrigerator+Inside", "Refrigerator+Features"]
        .into_iter()
        .map(gallery_image)
        .collect();
    fridge.features = [
        "Smart temperature control via app",
        "Internal cameras for remote viewing",
        "Voice assistant compatible",
        "Energy Star certified",
        "Fingerprint-resistant stainless steel",
        "Dual ice maker",
        "Adjustable shelving",
    ]
    .into_iter()
    .map(String::from)
    .collect();
    fridge.specifications = [
        ("Dimensions", "36\" W x 70\" H x 31\" D"),
        ("Capacity", "26.8 cubic feet"),
        ("Color", "Stainless Steel"),
        ("Energy Rating", "Energy Star Certified"),
        ("Warranty", "2 Years Parts & Labor"),
        ("Weight", "320 lbs"),
        ("Connectivity", "Wi-Fi, Bluetooth"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    vec![
        fridge,
        appliance(
            2,
            "Front Load Washing Machine",
            "High-efficiency washing machine with multiple wash programs",
            64999,
            "Laundry",
            "CleanPro",
            8,
            true,
            4.2,
            "Washing+Machine",
        ),
        appliance(
            3,
            "Smart Microwave Oven",
            "Microwave with smart sensors and multiple cooking modes",
            12999,
            "Kitchen",
            "SmartCook",
            20,
            false,
            4.7,
            "Microwave",
        ),
        appliance(
            4,
            "Electric Kettle",
            "Fast-boiling electric kettle with auto shut-off",
            3999,
            "Small Appliances",
            "QuickBoil",
            30,
            false,
            4.0,
            "Kettle",
        ),
        appliance(
            5,
            "Dishwasher",
            "Energy-efficient dishwasher with multiple wash cycles",
            54999,
            "Kitchen",
            "CleanDish",
            12,
            false,
            4.6,
            "Dishwasher",
        ),
        appliance(
            6,
            "Air Conditioner",
            "Energy-efficient air conditioner with smart temperature control",
            49999,
            "Climate Control",
            "CoolAir",
            10,
            false,
            4.3,
            "AC",
        ),
    ]
}

fn review_date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_else(launch)
}

/// Sample reviews for the showcase refrigerator.
pub fn default_reviews() -> Vec<Review> {
    let review = |id, author: &str, rating, date, title: &str, content: &str, helpful, unhelpful| Review {
        id,
        product_id: SHOWCASE_PRODUCT_ID,
        author: author.to_string(),
        rating,
        title: title.to_string(),
        content: content.to_string(),
        helpful,
        unhelpful,
        created_at: date,
    };

    vec![
        review(
            1,
            "Sarah Johnson",
            5,
            review_date(2023, 10, 15),
            "Excellent refrigerator with smart features",
            "This refrigerator exceeded my expectations. The smart features are intuitive and actually useful. \
             I love being able to check what's inside when I'm at the grocery store. The temperature control \
             is precise and the ice maker works perfectly.",
            24,
            2,
        ),
        review(
            2,
            "Michael Rodriguez",
            4,
            review_date(2023, 9, 28),
            "Great product with minor issues",
            "Overall, I'm very satisfied with this refrigerator. The capacity is excellent and it runs quietly. \
             The only issue I've had is that the app sometimes disconnects from the fridge, requiring me to \
             reset the connection. Otherwise, it's a great purchase.",
            15,
            3,
        ),
        review(
            3,
            "Jennifer Lee",
            5,
            review_date(2023, 11, 2),
            "Worth every penny",
            "After researching refrigerators for months, I finally decided on this model and I couldn't be \
             happier. The design is sleek, the features are amazing, and it keeps everything at the perfect \
             temperature. The internal cameras are a game-changer!",
            32,
            1,
        ),
    ]
}

/// Loads a catalog from a JSON file of product payloads.
///
/// Every entry goes through the same validation as the admin form, so a
/// bad file fails startup instead of serving half a catalog.
pub async fn load_catalog(path: &Path) -> StoreResult<Vec<Product>> {
    info!(path = %path.display(), "Loading catalog file");

    let raw = tokio::fs::read_to_string(path).await?;
    let entries: Vec<NewProduct> = serde_json::from_str(&raw)?;
    let now = Utc::now();

    let mut products = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let product = entry.into_product(index as u64 + 1, now)?;
        debug!(id = product.id, name = %product.name, "Catalog entry loaded");
        products.push(product);
    }

    info!(count = products.len(), "Catalog file loaded");
    Ok(products)
}

/// Converts a product back to the payload shape used in catalog files.
pub fn to_catalog_entry(product: &Product) -> NewProduct {
    NewProduct {
        name: Some(product.name.clone()),
        description: product.description.clone(),
        price_cents: Some(product.price_cents),
        original_price_cents: product.original_price_cents,
        image: Some(product.image.clone()),
        images: product.images.clone(),
        category: product.category.clone(),
        brand: product.brand.clone(),
        stock: product.stock,
        featured: product.featured,
        rating: product.rating,
        features: product.features.clone(),
        specifications: product.specifications.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cheapware_core::catalog;
    use std::io::Write;

    #[test]
    fn test_default_catalog_shape() {
        let products = default_catalog();
        assert_eq!(products.len(), 6);
        assert_eq!(products.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(products[0].discount_label().as_deref(), Some("18% OFF"));
        assert_eq!(products[3].image, "/placeholder.svg?height=300&width=300&text=Kettle");
        assert_eq!(catalog::featured_products(&products).len(), 2);
    }

    #[test]
    fn test_default_reviews_belong_to_showcase() {
        let reviews = default_reviews();
        assert_eq!(reviews.len(), 3);
        assert!(reviews.iter().all(|r| r.product_id == SHOWCASE_PRODUCT_ID));
        assert_eq!(cheapware_core::reviews::summarize(&reviews).average, 4.7);
    }

    #[tokio::test]
    async fn test_load_catalog_round_trips_default() {
        let entries: Vec<NewProduct> = default_catalog().iter().map(to_catalog_entry).collect();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(&entries).unwrap().as_bytes())
            .unwrap();

        let loaded = load_catalog(file.path()).await.unwrap();
        assert_eq!(loaded.len(), 6);
        assert_eq!(loaded[0].name, "Premium Refrigerator");
        assert_eq!(loaded[0].features.len(), 7);
        assert_eq!(loaded[5].id, 6);
    }

    #[tokio::test]
    async fn test_load_catalog_rejects_invalid_entries() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"[{"name":"No price"}]"#).unwrap();
        assert!(load_catalog(file.path()).await.is_err());

        assert!(load_catalog(Path::new("/definitely/not/here.json")).await.is_err());
    }
}
