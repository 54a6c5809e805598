//! DTOs module - Data Transfer Objects
//!
//! Questo modulo contiene tutti i DTOs usati per la comunicazione client-server.
//! I DTOs separano la rappresentazione esterna (API) dalla rappresentazione interna (entities).

pub mod address;
pub mod client;
pub mod product;
pub mod query;
pub mod supplier;
pub mod user;

// Re-exports per facilitare l'import
pub use address::{AddressDTO, CreateAddressDTO};
pub use client::{ClientDTO, CreateClientDTO};
pub use product::{CreateProductDTO, ProductDTO};
pub use query::{
    ClientSearchQuery, IdQuery, ImageUploadQuery, PageQuery, ProductIdQuery, StockReductionQuery,
};
pub use supplier::{CreateSupplierDTO, SupplierDTO};
pub use user::{CreateUserDTO, LoginDTO, TokenResponseDTO, UserDTO};
