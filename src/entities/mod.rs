//! Entities module - Entità del dominio applicativo
//!
//! Questo modulo contiene tutte le entità (models) persistite nel database.
//! Ogni entity corrisponde a una tabella nel database.

pub mod address;
pub mod client;
pub mod image;
pub mod product;
pub mod supplier;
pub mod user;

// Re-exports per facilitare l'import
pub use address::Address;
pub use client::Client;
pub use image::Image;
pub use product::Product;
pub use supplier::Supplier;
pub use user::User;
