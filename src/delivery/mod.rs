//! Fire-and-forget event delivery
//!
//! Every failure is reported on the log and turned into `false`.

pub mod client;

pub use client::DeliveryClient;
