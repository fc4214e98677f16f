//! Data layer of the clinic dashboards: domain resources, list queries and the
//! controller that keeps notice, patient and document lists in sync with the
//! remote API.

#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod query;

#[cfg(feature = "client")]
pub mod controller;
#[cfg(feature = "client")]
pub mod dto;
#[cfg(feature = "client")]
mod error_conversions;
#[cfg(feature = "client")]
pub mod models;
#[cfg(feature = "client")]
pub mod services;
#[cfg(feature = "client")]
pub mod transport;
