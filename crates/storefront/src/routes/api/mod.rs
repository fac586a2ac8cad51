//! Provider-facing JSON endpoints kept for the browser widget.

pub mod razorpay;
pub mod twilio;
