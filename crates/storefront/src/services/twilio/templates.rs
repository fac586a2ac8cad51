//! Customer SMS bodies.

use nurvi_core::{OrderId, Price};

/// A purchased line as shown in a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifiedItem {
    pub name: String,
    pub quantity: u32,
}

/// Short confirmation sent right after a verified payment.
#[must_use]
pub fn order_confirmation_message(
    first_name: &str,
    order_id: &OrderId,
    total: Price,
    business_name: &str,
    website_url: &str,
) -> String {
    let site = display_host(website_url);
    format!(
        "Dear {first_name}, your order #{order_id} for {total} has been confirmed! \
         Thank you for shopping with {business_name}. Track your order at {site}"
    )
}

/// Itemised confirmation with a tracking link.
#[must_use]
pub fn detailed_order_confirmation_message(
    customer_name: &str,
    order_id: &OrderId,
    items: &[NotifiedItem],
    total: Price,
    website_url: &str,
) -> String {
    let lines = items
        .iter()
        .map(|item| format!("• {} (Qty: {})", item.name, item.quantity))
        .collect::<Vec<_>>()
        .join("\n");
    let base = website_url.trim_end_matches('/');

    format!(
        "Hi {customer_name}! 🎉\n\n\
         Your Nurvi Jewel order #{order_id} has been confirmed!\n\n\
         Order Details:\n{lines}\n\n\
         Total: {total}\n\n\
         We'll notify you once your jewelry is shipped. Thank you for choosing Nurvi Jewel! ✨\n\n\
         Track your order: {base}/orders/{order_id}"
    )
}

/// Sent when a parcel leaves the warehouse.
#[must_use]
pub fn shipping_notification_message(
    customer_name: &str,
    order_id: &OrderId,
    tracking_number: &str,
    website_url: &str,
) -> String {
    let base = website_url.trim_end_matches('/');
    format!(
        "Hi {customer_name}! 📦\n\n\
         Great news! Your Nurvi Jewel order #{order_id} has been shipped!\n\n\
         Tracking Number: {tracking_number}\n\n\
         Your beautiful jewelry is on its way to you. Expected delivery: 3-5 business days.\n\n\
         Track your package: {base}/track/{tracking_number}\n\n\
         Thank you for choosing Nurvi Jewel! ✨"
    )
}

/// `https://nurvijewel.com/` -> `nurvijewel.com`
fn display_host(url: &str) -> &str {
    url.trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_confirmation_text() {
        let message = order_confirmation_message(
            "Priya",
            &OrderId::new("order_abc"),
            Price::from_rupees(29_999),
            "Nurvi Jewel",
            "https://nurvijewel.com",
        );
        assert_eq!(
            message,
            "Dear Priya, your order #order_abc for ₹29,999 has been confirmed! \
             Thank you for shopping with Nurvi Jewel. Track your order at nurvijewel.com"
        );
    }

    #[test]
    fn test_detailed_confirmation_lists_items() {
        let message = detailed_order_confirmation_message(
            "Priya",
            &OrderId::new("ORD-9"),
            &[
                NotifiedItem {
                    name: "Kundan Ring 1".to_string(),
                    quantity: 2,
                },
                NotifiedItem {
                    name: "Jhumka Earrings 1".to_string(),
                    quantity: 1,
                },
            ],
            Price::from_rupees(245_000),
            "https://nurvijewel.com/",
        );
        assert!(message.contains("• Kundan Ring 1 (Qty: 2)\n• Jhumka Earrings 1 (Qty: 1)"));
        assert!(message.contains("Total: ₹2,45,000"));
        assert!(message.ends_with("https://nurvijewel.com/orders/ORD-9"));
    }

    #[test]
    fn test_shipping_notification_links_tracking() {
        let message = shipping_notification_message(
            "Priya",
            &OrderId::new("ORD-9"),
            "TRK123",
            "https://nurvijewel.com",
        );
        assert!(message.contains("Tracking Number: TRK123"));
        assert!(message.contains("https://nurvijewel.com/track/TRK123"));
    }
}
