//! Mock customers and orders shown by the dashboard.

use nurvi_core::{CustomerId, CustomerStatus, OrderId, OrderStatus, Price, ProductId};

use super::{CustomerProfile, Records};
use crate::models::{CustomerOrder, CustomerRecord, OrderRecord, SavedItem};

const PLACEHOLDER_THUMBNAIL: &str = "/placeholder.svg?height=60&width=60";

#[allow(clippy::too_many_arguments)]
fn customer(
    id: &str,
    name: &str,
    email: &str,
    phone: &str,
    total_orders: u32,
    total_spent: i64,
    last_order: &str,
    status: CustomerStatus,
    join_date: &str,
) -> CustomerRecord {
    CustomerRecord {
        id: CustomerId::new(id),
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        total_orders,
        total_spent: Price::from_rupees(total_spent),
        last_order: last_order.to_string(),
        status,
        join_date: join_date.to_string(),
    }
}

fn order(
    id: &str,
    customer: &str,
    email: &str,
    total: i64,
    status: OrderStatus,
    date: &str,
    items: u32,
) -> OrderRecord {
    OrderRecord {
        id: OrderId::new(id),
        customer: customer.to_string(),
        email: email.to_string(),
        total: Price::from_rupees(total),
        status,
        date: date.to_string(),
        items,
        payment_method: "Razorpay".to_string(),
    }
}

fn sarah_profile() -> CustomerProfile {
    CustomerProfile {
        address: "123 Main St, New York, NY 10001".to_string(),
        notes: "VIP customer, prefers gold jewelry".to_string(),
        orders: vec![
            CustomerOrder {
                id: OrderId::new("ORD-001"),
                date: "2024-01-15".to_string(),
                total: Price::from_rupees(450),
                status: OrderStatus::Delivered,
                items: vec!["Gold Necklace".to_string(), "Diamond Earrings".to_string()],
            },
            CustomerOrder {
                id: OrderId::new("ORD-002"),
                date: "2024-01-10".to_string(),
                total: Price::from_rupees(320),
                status: OrderStatus::Processing,
                items: vec!["Silver Ring".to_string()],
            },
        ],
        wishlist: vec![
            SavedItem {
                id: ProductId::new("1"),
                name: "Diamond Ring".to_string(),
                price: Price::from_rupees(1200),
                image: PLACEHOLDER_THUMBNAIL.to_string(),
            },
            SavedItem {
                id: ProductId::new("2"),
                name: "Gold Bracelet".to_string(),
                price: Price::from_rupees(800),
                image: PLACEHOLDER_THUMBNAIL.to_string(),
            },
        ],
    }
}

pub(crate) fn records() -> Records {
    let customers = vec![
        customer(
            "1",
            "Sarah Johnson",
            "sarah@example.com",
            "+1 234 567 8901",
            5,
            2450,
            "2024-01-15",
            CustomerStatus::Active,
            "2023-08-15",
        ),
        customer(
            "2",
            "Emily Davis",
            "emily@example.com",
            "+1 234 567 8902",
            3,
            1200,
            "2024-01-10",
            CustomerStatus::Active,
            "2023-09-20",
        ),
        customer(
            "3",
            "Michael Brown",
            "michael@example.com",
            "+1 234 567 8903",
            8,
            4200,
            "2024-01-12",
            CustomerStatus::Vip,
            "2023-06-10",
        ),
    ];

    let orders = vec![
        order(
            "ORD-001",
            "Sarah Johnson",
            "sarah@example.com",
            450,
            OrderStatus::Delivered,
            "2024-01-15",
            2,
        ),
        order(
            "ORD-002",
            "Emily Davis",
            "emily@example.com",
            320,
            OrderStatus::Processing,
            "2024-01-14",
            1,
        ),
        order(
            "ORD-003",
            "Michael Brown",
            "michael@example.com",
            890,
            OrderStatus::Shipped,
            "2024-01-12",
            3,
        ),
    ];

    let mut records = Records {
        customers,
        orders,
        ..Records::default()
    };
    records
        .profiles
        .insert(CustomerId::new("1"), sarah_profile());
    records
}
