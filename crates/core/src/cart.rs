//! Shopping cart state and order totals.
//!
//! The cart is a plain value: services load it, apply one mutation, and
//! store it back. Lines are keyed by product id only, so two configurations
//! of the same product (different size or colour) share one line.
//!
//! Money maths is checked. A total that does not fit a `Decimal` is a
//! [`CartError::Overflow`], never a panic.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Product;
use crate::types::{Price, ProductId};

/// Orders strictly above this subtotal ship free.
pub const FREE_SHIPPING_THRESHOLD: i64 = 50_000;

/// Flat shipping fee below the threshold.
pub const SHIPPING_FEE: i64 = 500;

/// Largest quantity a single line can hold.
pub const MAX_LINE_QUANTITY: u32 = 99;

/// GST applied to the subtotal (18%).
#[must_use]
pub fn tax_rate() -> Decimal {
    Decimal::new(18, 2)
}

/// Errors from cart operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// A line or order total does not fit the decimal range.
    #[error("cart total is out of range")]
    Overflow,

    #[error("invalid promo code: {0}")]
    UnknownPromo(String),
}

/// Promo codes accepted at the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PromoCode {
    /// 10% of the subtotal, rounded to whole rupees.
    #[serde(rename = "WELCOME10")]
    Welcome10,
    /// A flat ₹500.
    #[serde(rename = "SAVE500")]
    Save500,
}

impl PromoCode {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Welcome10 => "WELCOME10",
            Self::Save500 => "SAVE500",
        }
    }

    /// Discount this code gives on `subtotal`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Overflow` if the discount cannot be computed.
    pub fn discount_for(&self, subtotal: Price) -> Result<Price, CartError> {
        match self {
            Self::Welcome10 => subtotal
                .checked_rate_rounded(Decimal::new(10, 2))
                .ok_or(CartError::Overflow),
            Self::Save500 => Ok(Price::from_rupees(500)),
        }
    }
}

impl FromStr for PromoCode {
    type Err = CartError;

    /// Codes match exactly after trimming surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "WELCOME10" => Ok(Self::Welcome10),
            "SAVE500" => Ok(Self::Save500),
            other => Err(CartError::UnknownPromo(other.to_string())),
        }
    }
}

impl std::fmt::Display for PromoCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customization: Option<String>,
}

const fn default_quantity() -> u32 {
    1
}

impl CartItem {
    /// A line for a catalog product, priced from the catalog.
    #[must_use]
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            quantity,
            image: product.image.clone(),
            size: None,
            color: None,
            customization: None,
        }
    }

    /// Price times quantity.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Overflow` if the product does not fit.
    pub fn line_total(&self) -> Result<Price, CartError> {
        self.price
            .checked_times(self.quantity)
            .ok_or(CartError::Overflow)
    }
}

/// The shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    promo: Option<PromoCode>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            promo: None,
        }
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up a line by product id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Add an item, merging into an existing line with the same id.
    ///
    /// A quantity of zero counts as one unit, and a line never holds more
    /// than [`MAX_LINE_QUANTITY`]. When the line already exists only its
    /// quantity changes; the stored name, price and configuration are kept.
    pub fn add_item(&mut self, mut item: CartItem) {
        let quantity = item.quantity.clamp(1, MAX_LINE_QUANTITY);
        if let Some(existing) = self.items.iter_mut().find(|line| line.id == item.id) {
            existing.quantity = existing
                .quantity
                .saturating_add(quantity)
                .min(MAX_LINE_QUANTITY);
        } else {
            item.quantity = quantity;
            self.items.push(item);
        }
    }

    /// Set a line's quantity. Zero or negative removes the line; larger
    /// values are capped at [`MAX_LINE_QUANTITY`].
    ///
    /// Unknown ids are ignored.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(id);
            return;
        }

        let quantity = u32::try_from(quantity)
            .unwrap_or(MAX_LINE_QUANTITY)
            .min(MAX_LINE_QUANTITY);
        if let Some(line) = self.items.iter_mut().find(|line| &line.id == id) {
            line.quantity = quantity;
        }
    }

    /// Remove a line if present.
    pub fn remove_item(&mut self, id: &ProductId) {
        self.items.retain(|line| &line.id != id);
    }

    /// Remove every line and any applied promo code.
    pub fn clear(&mut self) {
        self.items.clear();
        self.promo = None;
    }

    /// Apply a promo code, replacing any earlier one.
    ///
    /// # Errors
    ///
    /// Returns `CartError::UnknownPromo` and leaves the cart unchanged when
    /// the code is not recognised.
    pub fn apply_promo(&mut self, code: &str) -> Result<PromoCode, CartError> {
        let promo = code.parse::<PromoCode>()?;
        self.promo = Some(promo);
        Ok(promo)
    }

    #[must_use]
    pub const fn promo(&self) -> Option<PromoCode> {
        self.promo
    }

    pub fn remove_promo(&mut self) {
        self.promo = None;
    }

    /// Sum of price times quantity over all lines.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Overflow` if any line or the sum is out of range.
    pub fn total(&self) -> Result<Price, CartError> {
        self.items.iter().try_fold(Price::ZERO, |acc, line| {
            acc.checked_add(line.line_total()?)
                .ok_or(CartError::Overflow)
        })
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0_u32, |acc, line| acc.saturating_add(line.quantity))
    }

    /// Order totals for the current contents, including any promo.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Overflow` if the totals are out of range.
    pub fn summary(&self) -> Result<OrderSummary, CartError> {
        OrderSummary::compute(self.total()?, self.promo)
    }

    /// Stable description of the cart contents.
    ///
    /// Two carts with the same fingerprint would produce the same order.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let lines = self
            .items
            .iter()
            .map(|line| format!("{}x{}@{}", line.id, line.quantity, line.price.amount()))
            .collect::<Vec<_>>()
            .join(";");
        match self.promo {
            Some(promo) => format!("{lines}|{promo}"),
            None => lines,
        }
    }
}

/// Checkout totals derived from a subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub subtotal: Price,
    pub shipping: Price,
    pub tax: Price,
    /// Promo discount taken off the total.
    #[serde(default)]
    pub discount: Price,
    pub total: Price,
}

impl OrderSummary {
    /// Apply the shipping rule and GST to a subtotal.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Overflow` if the totals are out of range.
    pub fn from_subtotal(subtotal: Price) -> Result<Self, CartError> {
        Self::compute(subtotal, None)
    }

    /// Shipping and GST on the subtotal, less the promo discount.
    ///
    /// Shipping and tax are based on the undiscounted subtotal. The total
    /// never goes below zero.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Overflow` if the totals are out of range.
    pub fn compute(subtotal: Price, promo: Option<PromoCode>) -> Result<Self, CartError> {
        let shipping = if subtotal > Price::from_rupees(FREE_SHIPPING_THRESHOLD) {
            Price::ZERO
        } else {
            Price::from_rupees(SHIPPING_FEE)
        };
        let tax = subtotal
            .checked_rate_rounded(tax_rate())
            .ok_or(CartError::Overflow)?;
        let discount = promo.map_or(Ok(Price::ZERO), |p| p.discount_for(subtotal))?;

        let total = subtotal
            .checked_add(shipping)
            .and_then(|t| t.checked_add(tax))
            .and_then(|t| t.checked_sub(discount))
            .ok_or(CartError::Overflow)?
            .max(Price::ZERO);

        Ok(Self {
            subtotal,
            shipping,
            tax,
            discount,
            total,
        })
    }

    #[must_use]
    pub fn ships_free(&self) -> bool {
        self.shipping == Price::ZERO
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(id: &str, price: i64, quantity: u32) -> CartItem {
        CartItem {
            id: ProductId::new(id),
            name: format!("Item {id}"),
            price: Price::from_rupees(price),
            quantity,
            image: "/placeholder.svg".to_string(),
            size: None,
            color: None,
            customization: None,
        }
    }

    fn assert_invariants(cart: &Cart) {
        let count: u32 = cart.items().iter().map(|l| l.quantity).sum();
        let total: Price = cart
            .items()
            .iter()
            .try_fold(Price::ZERO, |acc, l| acc.checked_add(l.price.checked_times(l.quantity)?))
            .unwrap();
        assert_eq!(cart.item_count(), count);
        assert_eq!(cart.total().unwrap(), total);
        assert!(cart.items().iter().all(|l| l.quantity > 0));
    }

    #[test]
    fn test_add_merges_same_id() {
        let mut cart = Cart::new();
        cart.add_item(item("ring-1", 1000, 1));
        cart.add_item(item("ring-1", 1000, 2));
        cart.add_item(item("earring-3", 250, 1));

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.get(&ProductId::new("ring-1")).unwrap().quantity, 3);
        assert_eq!(cart.total().unwrap(), Price::from_rupees(3250));
        assert_eq!(cart.item_count(), 4);
    }

    #[test]
    fn test_add_zero_quantity_adds_one() {
        let mut cart = Cart::new();
        cart.add_item(item("ring-1", 1000, 0));
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_configurations_of_same_product_collide() {
        let mut cart = Cart::new();
        let mut small = item("ring-1", 1000, 1);
        small.size = Some("6".to_string());
        let mut large = item("ring-1", 1000, 1);
        large.size = Some("8".to_string());

        cart.add_item(small);
        cart.add_item(large);

        assert_eq!(cart.items().len(), 1);
        let line = cart.get(&ProductId::new("ring-1")).unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(line.size.as_deref(), Some("6"));
    }

    #[test]
    fn test_update_quantity_to_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add_item(item("ring-1", 1000, 2));
        cart.update_quantity(&ProductId::new("ring-1"), 0);
        assert!(cart.is_empty());

        cart.add_item(item("ring-2", 1000, 2));
        cart.update_quantity(&ProductId::new("ring-2"), -3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(item("ring-1", 1000, 2));
        let before = cart.clone();

        cart.update_quantity(&ProductId::new("missing"), 5);
        cart.remove_item(&ProductId::new("missing"));

        assert_eq!(cart, before);
    }

    #[test]
    fn test_invariants_hold_over_mixed_operations() {
        let mut cart = Cart::new();
        let ops: Vec<Box<dyn Fn(&mut Cart)>> = vec![
            Box::new(|c| c.add_item(item("a", 120, 1))),
            Box::new(|c| c.add_item(item("b", 999, 3))),
            Box::new(|c| c.update_quantity(&ProductId::new("a"), 4)),
            Box::new(|c| c.add_item(item("a", 120, 2))),
            Box::new(|c| c.remove_item(&ProductId::new("b"))),
            Box::new(|c| c.add_item(item("c", 5000, 1))),
            Box::new(|c| c.update_quantity(&ProductId::new("c"), 0)),
            Box::new(|c| c.update_quantity(&ProductId::new("zzz"), 9)),
        ];

        for op in &ops {
            op(&mut cart);
            assert_invariants(&cart);
        }

        assert_eq!(cart.item_count(), 6);
        assert_eq!(cart.total().unwrap(), Price::from_rupees(720));
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_item(item("ring-1", 1000, 2));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total().unwrap(), Price::ZERO);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_summary_single_ring() {
        let mut cart = Cart::new();
        cart.add_item(item("ring-1", 24_999, 1));

        let summary = cart.summary().unwrap();
        assert_eq!(summary.subtotal, Price::from_rupees(24_999));
        assert_eq!(summary.shipping, Price::from_rupees(500));
        assert_eq!(summary.tax, Price::from_rupees(4500));
        assert_eq!(summary.discount, Price::ZERO);
        assert_eq!(summary.total, Price::from_rupees(29_999));
    }

    #[test]
    fn test_free_shipping_is_strictly_above_threshold() {
        let at = OrderSummary::from_subtotal(Price::from_rupees(50_000)).unwrap();
        assert!(!at.ships_free());

        let above = OrderSummary::from_subtotal(Price::from_rupees(50_001)).unwrap();
        assert!(above.ships_free());
        assert_eq!(above.tax, Price::from_rupees(9000));
        assert_eq!(above.total, Price::from_rupees(59_001));
    }

    #[test]
    fn test_fingerprint_tracks_contents() {
        let mut a = Cart::new();
        a.add_item(item("ring-1", 1000, 1));
        let mut b = a.clone();
        assert_eq!(a.fingerprint(), b.fingerprint());

        b.update_quantity(&ProductId::new("ring-1"), 2);
        assert_ne!(a.fingerprint(), b.fingerprint());
        a.clear();
        assert_eq!(a.fingerprint(), "");
    }

    #[test]
    fn test_line_from_catalog_product() {
        let catalog = crate::Catalog::generate(7);
        let product = catalog.get(&ProductId::new("ring-3")).unwrap();
        let line = CartItem::from_product(product, 2);

        assert_eq!(line.price, product.price);
        assert_eq!(line.name, product.name);
        assert_eq!(line.line_total().unwrap(), product.price.checked_times(2).unwrap());
    }

    #[test]
    fn test_quantities_are_capped() {
        let mut cart = Cart::new();
        cart.add_item(item("ring-1", 1000, u32::MAX));
        assert_eq!(cart.item_count(), MAX_LINE_QUANTITY);

        cart.add_item(item("ring-1", 1000, 5));
        assert_eq!(cart.item_count(), MAX_LINE_QUANTITY);

        cart.update_quantity(&ProductId::new("ring-1"), i64::MAX);
        assert_eq!(cart.item_count(), MAX_LINE_QUANTITY);
    }

    #[test]
    fn test_huge_price_reports_overflow() {
        let mut cart = Cart::new();
        let mut line = item("x", 0, 1);
        line.price = Price::new(Decimal::MAX);
        cart.add_item(line);
        cart.update_quantity(&ProductId::new("x"), i64::MAX);

        assert_eq!(cart.total(), Err(CartError::Overflow));
        assert_eq!(cart.summary(), Err(CartError::Overflow));
        assert_eq!(cart.item_count(), MAX_LINE_QUANTITY);
    }

    #[test]
    fn test_large_price_with_huge_quantity_stays_in_range() {
        let mut cart = Cart::new();
        let mut line = item("x", 0, 1);
        line.price = Price::new(Decimal::from(100_000_000_000_000_000_000_u128));
        cart.add_item(line);
        cart.update_quantity(&ProductId::new("x"), i64::MAX);

        let summary = cart.summary().unwrap();
        assert_eq!(
            summary.subtotal,
            Price::new(Decimal::from(9_900_000_000_000_000_000_000_u128))
        );
    }

    #[test]
    fn test_welcome_promo_takes_ten_percent() {
        let mut cart = Cart::new();
        cart.add_item(item("ring-1", 24_999, 1));
        assert_eq!(cart.apply_promo("WELCOME10").unwrap(), PromoCode::Welcome10);

        let summary = cart.summary().unwrap();
        assert_eq!(summary.discount, Price::from_rupees(2500));
        assert_eq!(summary.tax, Price::from_rupees(4500));
        assert_eq!(summary.total, Price::from_rupees(27_499));
    }

    #[test]
    fn test_flat_promo_and_replacement() {
        let mut cart = Cart::new();
        cart.add_item(item("ring-1", 1000, 1));
        cart.apply_promo("WELCOME10").unwrap();
        cart.apply_promo(" SAVE500 ").unwrap();

        let summary = cart.summary().unwrap();
        assert_eq!(summary.discount, Price::from_rupees(500));
        // 1000 + 500 shipping + 180 GST - 500
        assert_eq!(summary.total, Price::from_rupees(1180));
    }

    #[test]
    fn test_unknown_promo_leaves_cart_unchanged() {
        let mut cart = Cart::new();
        cart.add_item(item("ring-1", 1000, 1));
        cart.apply_promo("SAVE500").unwrap();
        let before = cart.clone();

        let err = cart.apply_promo("welcome10").unwrap_err();
        assert_eq!(err, CartError::UnknownPromo("welcome10".to_string()));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_promo_changes_fingerprint_and_clear_drops_it() {
        let mut cart = Cart::new();
        cart.add_item(item("ring-1", 1000, 1));
        let plain = cart.fingerprint();

        cart.apply_promo("SAVE500").unwrap();
        assert_ne!(cart.fingerprint(), plain);

        cart.clear();
        assert_eq!(cart.promo(), None);
    }
}
