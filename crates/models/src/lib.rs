//! Domain types shared by the service and HTTP layers.
//!
//! The JSON shape defined here is used for request bodies, response bodies
//! and the backing file alike.

pub mod car;
pub mod errors;

pub use car::{Car, CarId, CarInput};
