//! Payment integration (Stripe Checkout).

pub mod stripe;
