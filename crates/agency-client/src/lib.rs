//! Data access for the agency listing API.
//!
//! A single read: `GET {base_url}/agencies`, decoded into
//! [`agency_core::AgencyRecord`]s in server order.

pub mod client;
pub mod error;

pub use client::AgencyClient;
pub use error::FetchError;
