//! Barracuda WAF Core
//!
//! Resource model, schemas and the provider abstraction shared by the
//! provider implementation and the host driver.

pub mod differ;
pub mod effect;
pub mod plan;
pub mod provider;
pub mod resource;
pub mod schema;
