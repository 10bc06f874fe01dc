//! Domain service functions
//!
//! Each function issues exactly one request to a fixed endpoint. Query
//! structs are the allow-list: only their fields can reach the URL, and
//! `None` fields are left out.

pub mod badges;
pub mod bookings;
pub mod events;
pub mod orders;
pub mod reports;
