//! Domain models for the payment service.

pub mod payment;

pub use payment::{NewPayment, Payment, PaymentId, PaymentStatus, PaymentType};
