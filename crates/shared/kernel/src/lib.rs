//! Kernel utilities shared across slices.
//! Keep this crate lightweight; today it only knows how to load layered configuration.
//!
//! ## Config loading
//! ```rust,no_run
//! use fdesk_kernel::config::load_client_config;
//!
//! let cfg = load_client_config(None::<&str>).unwrap();
//! println!("{}", cfg.api.base_url);
//! ```
pub mod config;

pub use fdesk_domain as domain;
