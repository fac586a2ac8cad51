pub mod admin;
pub mod checkout;
