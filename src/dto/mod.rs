//! Data transfer objects exchanged with the remote API.

pub mod api;
