//! Checkout total commands.

use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use nurvi_core::cart::{CartError, FREE_SHIPPING_THRESHOLD, OrderSummary, PromoCode};
use nurvi_core::Price;

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Invalid subtotal {0:?}: expected a non-negative rupee amount")]
    InvalidSubtotal(String),

    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Print shipping, GST, discount and total for a subtotal.
///
/// # Errors
///
/// Returns `CheckoutError::InvalidSubtotal` for malformed or negative input
/// and `CheckoutError::Cart` for an unknown promo code or an out-of-range
/// amount.
pub fn summary(subtotal: &str, promo: Option<&str>) -> Result<(), CheckoutError> {
    let summary = summarize(subtotal, promo)?;

    #[allow(clippy::print_stdout)]
    {
        println!("{}", render(&summary));
    }
    Ok(())
}

fn summarize(subtotal: &str, promo: Option<&str>) -> Result<OrderSummary, CheckoutError> {
    let amount = Decimal::from_str(subtotal.trim().trim_start_matches('₹').replace(',', "").as_str())
        .map_err(|_| CheckoutError::InvalidSubtotal(subtotal.to_string()))?;
    if amount.is_sign_negative() {
        return Err(CheckoutError::InvalidSubtotal(subtotal.to_string()));
    }
    let promo = promo.map(str::parse::<PromoCode>).transpose()?;
    Ok(OrderSummary::compute(Price::new(amount), promo)?)
}

fn render(summary: &OrderSummary) -> String {
    let shipping = if summary.ships_free() {
        format!("Free (over {})", Price::from_rupees(FREE_SHIPPING_THRESHOLD))
    } else {
        summary.shipping.to_string()
    };

    let mut out = format!(
        "Subtotal: {}\nShipping: {shipping}\nGST (18%): {}",
        summary.subtotal, summary.tax
    );
    if summary.discount.is_positive() {
        out.push_str(&format!("\nDiscount: -{}", summary.discount));
    }
    out.push_str(&format!("\nTotal:    {}", summary.total));
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_for_single_ring() {
        let summary = summarize("24999", None).unwrap();
        assert_eq!(summary.total, Price::from_rupees(29_999));

        let text = render(&summary);
        assert!(text.contains("Shipping: ₹500"));
        assert!(text.contains("GST (18%): ₹4,500"));
        assert!(text.contains("Total:    ₹29,999"));
    }

    #[test]
    fn test_accepts_grouped_input() {
        let summary = summarize("₹60,000", None).unwrap();
        assert!(summary.ships_free());
        assert!(render(&summary).contains("Free (over ₹50,000)"));
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(summarize("abc", None).is_err());
        assert!(summarize("-10", None).is_err());
        assert!(matches!(
            summarize("1000", Some("FREESTUFF")),
            Err(CheckoutError::Cart(CartError::UnknownPromo(_)))
        ));
    }

    #[test]
    fn test_promo_discount_is_rendered() {
        let summary = summarize("24999", Some("WELCOME10")).unwrap();
        assert_eq!(summary.total, Price::from_rupees(27_499));

        let text = render(&summary);
        assert!(text.contains("Discount: -₹2,500"));
        assert!(text.contains("Total:    ₹27,499"));
        assert!(!render(&summarize("24999", None).unwrap()).contains("Discount"));
    }
}
