//! Seeded product catalog with client-style filtering, sorting and paging.
//!
//! There is no product database. The catalog is generated once from a seed
//! so every process started with the same seed serves identical prices,
//! and queries are plain filter/sort passes over the in-memory lists.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// Products shown per "page"; "load more" reveals this many more.
pub const PAGE_SIZE: usize = 12;

/// Search queries shorter than this return nothing.
pub const MIN_SEARCH_LENGTH: usize = 3;

const PLACEHOLDER_IMAGE: &str = "/placeholder.svg?height=400&width=400";
const PLACEHOLDER_GALLERY_IMAGE: &str = "/placeholder.svg?height=600&width=600";

/// Jewelry category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Rings,
    Necklaces,
    Earrings,
    Bracelets,
    Anklets,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Self; 5] = [
        Self::Rings,
        Self::Necklaces,
        Self::Earrings,
        Self::Bracelets,
        Self::Anklets,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rings => "Rings",
            Self::Necklaces => "Necklaces",
            Self::Earrings => "Earrings",
            Self::Bracelets => "Bracelets",
            Self::Anklets => "Anklets",
        }
    }

    /// Name prefixes used by the collections generator.
    const fn collection_styles(self) -> [&'static str; 5] {
        match self {
            Self::Rings => ["Celestial", "Statement", "Stackable", "Minimalist", "Chunky"],
            Self::Necklaces => ["Layered", "Pendant", "Choker", "Chain", "Statement"],
            Self::Earrings => ["Hoop", "Stud", "Drop", "Chandelier", "Ear Cuff"],
            Self::Bracelets => ["Cuff", "Chain", "Bangle", "Charm", "Tennis"],
            Self::Anklets => ["Beaded", "Chain", "Charm", "Layered", "Minimal"],
        }
    }

    const fn singular(self) -> &'static str {
        match self {
            Self::Rings => "Ring",
            Self::Necklaces => "Necklace",
            Self::Earrings => "Earrings",
            Self::Bracelets => "Bracelet",
            Self::Anklets => "Anklet",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("invalid category: {s}"))
    }
}

/// A product record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Price>,
    pub image: String,
    pub images: Vec<String>,
    pub category: Category,
    pub rating: f64,
    pub reviews: u32,
    pub is_new: bool,
    pub is_sale: bool,
    pub description: String,
    pub in_stock: bool,
    pub style: String,
    pub material: String,
    pub occasion: String,
}

/// Sort orders offered by listing pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Catalog order.
    #[default]
    Featured,
    PriceLow,
    PriceHigh,
    Rating,
    /// New arrivals first, otherwise catalog order.
    Newest,
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "featured" => Ok(Self::Featured),
            "price-low" => Ok(Self::PriceLow),
            "price-high" => Ok(Self::PriceHigh),
            "rating" => Ok(Self::Rating),
            "newest" => Ok(Self::Newest),
            _ => Err(format!("invalid sort order: {s}")),
        }
    }
}

/// Which generated list a query runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    Collections,
    Rings,
    Earrings,
}

/// Listing filters. Tag lists are OR within a list, AND across lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub category: Option<Category>,
    pub min_price: Option<Price>,
    pub max_price: Option<Price>,
    pub styles: Vec<String>,
    pub materials: Vec<String>,
    pub occasions: Vec<String>,
    pub sort: SortOrder,
    /// How many results are revealed; defaults to [`PAGE_SIZE`].
    pub visible: Option<usize>,
}

impl ProductQuery {
    fn matches(&self, product: &Product) -> bool {
        if self.category.is_some_and(|c| c != product.category) {
            return false;
        }
        if self.min_price.is_some_and(|min| product.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| product.price > max) {
            return false;
        }
        tag_matches(&self.styles, &product.style)
            && tag_matches(&self.materials, &product.material)
            && tag_matches(&self.occasions, &product.occasion)
    }
}

fn tag_matches(selected: &[String], value: &str) -> bool {
    selected.is_empty() || selected.iter().any(|s| s.eq_ignore_ascii_case(value))
}

/// One revealed slice of a listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub products: Vec<Product>,
    /// Matches before slicing.
    pub total: usize,
    pub visible: usize,
    pub has_more: bool,
    /// `visible` value for the "load more" request.
    pub next_visible: usize,
}

/// The in-memory catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    collections: Vec<Product>,
    rings: Vec<Product>,
    earrings: Vec<Product>,
}

impl Catalog {
    /// Build the catalog from a seed.
    #[must_use]
    pub fn generate(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let collections = (0..100).map(|i| collection_product(&mut rng, i)).collect();
        let rings = (0..50).map(|i| ring(&mut rng, i)).collect();
        let earrings = (0..50).map(|i| earring(&mut rng, i)).collect();

        Self {
            collections,
            rings,
            earrings,
        }
    }

    /// The products of one listing in catalog order.
    #[must_use]
    pub fn listing(&self, listing: Listing) -> &[Product] {
        match listing {
            Listing::Collections => &self.collections,
            Listing::Rings => &self.rings,
            Listing::Earrings => &self.earrings,
        }
    }

    fn all(&self) -> impl Iterator<Item = &Product> {
        self.collections
            .iter()
            .chain(self.rings.iter())
            .chain(self.earrings.iter())
    }

    /// Find a product in any listing.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.all().find(|p| &p.id == id)
    }

    /// Filter, sort, and slice a listing.
    #[must_use]
    pub fn query(&self, listing: Listing, query: &ProductQuery) -> ProductPage {
        let mut matches: Vec<&Product> = self
            .listing(listing)
            .iter()
            .filter(|p| query.matches(p))
            .collect();

        match query.sort {
            SortOrder::Featured => {}
            SortOrder::PriceLow => matches.sort_by(|a, b| a.price.cmp(&b.price)),
            SortOrder::PriceHigh => matches.sort_by(|a, b| b.price.cmp(&a.price)),
            SortOrder::Rating => matches.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
            SortOrder::Newest => matches.sort_by_key(|p| !p.is_new),
        }

        let total = matches.len();
        let visible = query.visible.unwrap_or(PAGE_SIZE);
        let products = matches.into_iter().take(visible).cloned().collect();

        ProductPage {
            products,
            total,
            visible,
            has_more: visible < total,
            next_visible: visible.saturating_add(PAGE_SIZE),
        }
    }

    /// Case-insensitive substring search on name or category.
    #[must_use]
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Product> {
        let needle = query.trim().to_lowercase();
        if needle.chars().count() < MIN_SEARCH_LENGTH {
            return Vec::new();
        }

        self.all()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.category.as_str().to_lowercase().contains(&needle)
            })
            .take(limit)
            .collect()
    }

    /// Highest rated collection pieces.
    #[must_use]
    pub fn featured(&self, count: usize) -> Vec<&Product> {
        let mut products: Vec<&Product> = self.collections.iter().collect();
        products.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        products.truncate(count);
        products
    }
}

// =============================================================================
// Generators
// =============================================================================

fn pick<'a>(options: &[&'a str], index: usize) -> &'a str {
    options.get(index % options.len().max(1)).copied().unwrap_or_default()
}

fn rating(rng: &mut StdRng) -> f64 {
    let raw: f64 = rng.random_range(4.5..5.0);
    (raw * 10.0).round() / 10.0
}

fn gallery() -> Vec<String> {
    vec![PLACEHOLDER_GALLERY_IMAGE.to_string(); 3]
}

fn collection_product(rng: &mut StdRng, i: usize) -> Product {
    let category = Category::ALL
        .get(i % Category::ALL.len())
        .copied()
        .unwrap_or(Category::Rings);
    let name = format!(
        "{} {} {}",
        pick(&category.collection_styles(), i),
        category.singular(),
        i / 5 + 1
    );
    let price = Price::from_rupees(rng.random_range(500..2000));
    let original_price = rng
        .random_bool(0.3)
        .then(|| Price::from_rupees(rng.random_range(700..2700)));

    Product {
        id: ProductId::new(format!("product-{}", i + 1)),
        description: format!(
            "Stunning anti-tarnish {} designed for the modern influencer. Perfect for content creation and everyday wear.",
            name.to_lowercase()
        ),
        name,
        price,
        original_price,
        image: PLACEHOLDER_IMAGE.to_string(),
        images: gallery(),
        category,
        rating: rating(rng),
        reviews: rng.random_range(10..210),
        is_new: rng.random_bool(0.2),
        is_sale: rng.random_bool(0.3),
        in_stock: true,
        style: pick(&["Trendy", "Minimal", "Statement", "Casual", "Elegant"], i).to_string(),
        material: pick(&["Gold Plated", "Silver Plated", "Rose Gold Plated"], i).to_string(),
        occasion: pick(&["Everyday", "Party", "Content Creation", "Photoshoot"], i).to_string(),
    }
}

fn ring(rng: &mut StdRng, i: usize) -> Product {
    let style = pick(
        &[
            "Kundan",
            "Diamond",
            "Gold",
            "Silver",
            "Ruby",
            "Emerald",
            "Pearl",
            "Traditional",
        ],
        i,
    );
    let name = format!("{style} Ring {}", i + 1);

    Product {
        id: ProductId::new(format!("ring-{}", i + 1)),
        description: format!("Handcrafted {} with an anti-tarnish finish.", name.to_lowercase()),
        name,
        price: Price::from_rupees(rng.random_range(5_000..55_000)),
        original_price: Some(Price::from_rupees(rng.random_range(6_000..66_000))),
        image: PLACEHOLDER_IMAGE.to_string(),
        images: gallery(),
        category: Category::Rings,
        rating: rating(rng),
        reviews: rng.random_range(10..210),
        is_new: rng.random_bool(0.2),
        is_sale: rng.random_bool(0.3),
        in_stock: true,
        style: style.to_string(),
        material: pick(&["Gold", "Silver", "Platinum", "Rose Gold", "White Gold"], i).to_string(),
        occasion: pick(
            &["Wedding", "Engagement", "Festival", "Daily Wear", "Party"],
            i,
        )
        .to_string(),
    }
}

fn earring(rng: &mut StdRng, i: usize) -> Product {
    let style = pick(
        &[
            "Jhumka",
            "Chandbali",
            "Stud",
            "Drop",
            "Hoop",
            "Temple",
            "Pearl",
            "Kundan",
        ],
        i,
    );
    let name = format!("{style} Earrings {}", i + 1);

    Product {
        id: ProductId::new(format!("earring-{}", i + 1)),
        description: format!("Lightweight {} for festive and everyday looks.", name.to_lowercase()),
        name,
        price: Price::from_rupees(rng.random_range(3_000..43_000)),
        original_price: Some(Price::from_rupees(rng.random_range(4_000..54_000))),
        image: PLACEHOLDER_IMAGE.to_string(),
        images: gallery(),
        category: Category::Earrings,
        rating: rating(rng),
        reviews: rng.random_range(10..210),
        is_new: rng.random_bool(0.2),
        is_sale: rng.random_bool(0.3),
        in_stock: true,
        style: style.to_string(),
        material: pick(
            &["Gold", "Silver", "Kundan", "Pearl", "Beads", "Meenakari"],
            i,
        )
        .to_string(),
        occasion: pick(
            &["Wedding", "Festival", "Party", "Daily Wear", "Traditional"],
            i,
        )
        .to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::generate(2009)
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = catalog();
        let b = catalog();
        assert_eq!(
            a.listing(Listing::Collections),
            b.listing(Listing::Collections)
        );
        assert_eq!(a.listing(Listing::Rings), b.listing(Listing::Rings));
    }

    #[test]
    fn test_listing_sizes_and_ranges() {
        let catalog = catalog();
        assert_eq!(catalog.listing(Listing::Collections).len(), 100);
        assert_eq!(catalog.listing(Listing::Rings).len(), 50);
        assert_eq!(catalog.listing(Listing::Earrings).len(), 50);

        for p in catalog.listing(Listing::Collections) {
            assert!(p.price >= Price::from_rupees(500) && p.price < Price::from_rupees(2000));
            assert!((4.5..=5.0).contains(&p.rating));
        }
        for p in catalog.listing(Listing::Rings) {
            assert!(p.price >= Price::from_rupees(5_000) && p.price < Price::from_rupees(55_000));
            assert_eq!(p.category, Category::Rings);
        }
    }

    #[test]
    fn test_categories_round_robin() {
        let catalog = catalog();
        let products = catalog.listing(Listing::Collections);
        assert_eq!(products.first().unwrap().category, Category::Rings);
        assert_eq!(products.get(2).unwrap().category, Category::Earrings);
        assert_eq!(products.first().unwrap().name, "Celestial Ring 1");
        assert_eq!(products.get(1).unwrap().name, "Pendant Necklace 1");
    }

    #[test]
    fn test_filter_by_category_and_price() {
        let catalog = catalog();
        let query = ProductQuery {
            category: Some(Category::Necklaces),
            max_price: Some(Price::from_rupees(1000)),
            visible: Some(100),
            ..ProductQuery::default()
        };
        let page = catalog.query(Listing::Collections, &query);

        assert!(page.total <= 20);
        assert!(page.products.iter().all(|p| p.category == Category::Necklaces
            && p.price <= Price::from_rupees(1000)));
    }

    #[test]
    fn test_tag_filters_are_conjunctive() {
        let catalog = catalog();
        let query = ProductQuery {
            styles: vec!["trendy".to_string()],
            materials: vec!["Gold Plated".to_string()],
            visible: Some(100),
            ..ProductQuery::default()
        };
        let page = catalog.query(Listing::Collections, &query);

        // style repeats every 5, material every 3: indices divisible by 15
        assert_eq!(page.total, 7);
        assert!(page
            .products
            .iter()
            .all(|p| p.style == "Trendy" && p.material == "Gold Plated"));
    }

    #[test]
    fn test_sorting() {
        let catalog = catalog();
        let visible = Some(50);

        let low = catalog.query(
            Listing::Rings,
            &ProductQuery {
                sort: SortOrder::PriceLow,
                visible,
                ..ProductQuery::default()
            },
        );
        assert!(low.products.windows(2).all(|w| w[0].price <= w[1].price));

        let high = catalog.query(
            Listing::Rings,
            &ProductQuery {
                sort: SortOrder::PriceHigh,
                visible,
                ..ProductQuery::default()
            },
        );
        assert!(high.products.windows(2).all(|w| w[0].price >= w[1].price));

        let rated = catalog.query(
            Listing::Rings,
            &ProductQuery {
                sort: SortOrder::Rating,
                visible,
                ..ProductQuery::default()
            },
        );
        assert!(rated.products.windows(2).all(|w| w[0].rating >= w[1].rating));

        let newest = catalog.query(
            Listing::Rings,
            &ProductQuery {
                sort: SortOrder::Newest,
                visible,
                ..ProductQuery::default()
            },
        );
        let first_old = newest.products.iter().position(|p| !p.is_new);
        if let Some(idx) = first_old {
            assert!(newest.products.iter().skip(idx).all(|p| !p.is_new));
        }
    }

    #[test]
    fn test_pagination_load_more() {
        let catalog = catalog();
        let first = catalog.query(Listing::Collections, &ProductQuery::default());
        assert_eq!(first.products.len(), PAGE_SIZE);
        assert_eq!(first.total, 100);
        assert!(first.has_more);
        assert_eq!(first.next_visible, 24);

        let last = catalog.query(
            Listing::Collections,
            &ProductQuery {
                visible: Some(108),
                ..ProductQuery::default()
            },
        );
        assert_eq!(last.products.len(), 100);
        assert!(!last.has_more);
    }

    #[test]
    fn test_search() {
        let catalog = catalog();
        assert!(catalog.search("ri", 10).is_empty());

        let results = catalog.search("JHUMKA", 50);
        assert!(!results.is_empty());
        assert!(results.iter().all(|p| p.name.contains("Jhumka")));

        let by_category = catalog.search("anklet", 100);
        assert_eq!(by_category.len(), 20);
    }

    #[test]
    fn test_get_across_listings() {
        let catalog = catalog();
        assert!(catalog.get(&ProductId::new("product-1")).is_some());
        assert!(catalog.get(&ProductId::new("ring-50")).is_some());
        assert!(catalog.get(&ProductId::new("earring-1")).is_some());
        assert!(catalog.get(&ProductId::new("ring-51")).is_none());
    }

    #[test]
    fn test_parse_query_enums() {
        assert_eq!("price-low".parse::<SortOrder>().unwrap(), SortOrder::PriceLow);
        assert_eq!("rings".parse::<Category>().unwrap(), Category::Rings);
        assert!("hats".parse::<Category>().is_err());
    }
}
