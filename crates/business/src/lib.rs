//! # Chartbook Business
//!
//! Chart operations over SQLite storage: list, get, create, update, delete
//! and next-code suggestion. Validation comes from `chartbook-core`; this crate
//! makes validate-then-commit atomic.

pub mod error;
pub mod service;

pub use error::{BusinessError, BusinessResult};
pub use service::{ChartOptions, ChartService};
