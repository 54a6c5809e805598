//! Repositories module - Coordinatore per tutti i repository del progetto
//!
//! Questo modulo organizza i repository in sotto-moduli separati per una migliore manutenibilità.
//! Ogni repository gestisce le operazioni di database per una specifica entità.

// ************************* NOTA SULLE QUERY ************************* //

/*
   Le query usano la forma runtime di sqlx (`sqlx::query`, `sqlx::query_as::<_, T>`,
   `.bind(...)`) e le entity derivano `sqlx::FromRow`. La forma con le macro
   (`query!`, `query_as!`) controlla lo schema a compile time ma richiede un
   database raggiungibile (o la cache offline di `cargo sqlx prepare`) anche solo
   per compilare: qui lo schema è invece verificato dai test `#[sqlx::test]`,
   che applicano le migrations di `migrations/` su un database isolato.

   Promemoria sui metodi di fetch:
   Number of Rows   Method to Call              Returns
   None             .execute(...).await         sqlx::Result<PgQueryResult>   no RETURNING
   Zero or One      .fetch_optional(...).await  sqlx::Result<Option<T>>
   Exactly One      .fetch_one(...).await       sqlx::Result<T>               RowNotFound se vuoto
   Multiple         .fetch_all(...).await       sqlx::Result<Vec<T>>
*/

// ************************* MODULI REPOSITORY ************************* //

pub mod address;
pub mod client;
pub mod image;
pub mod product;
pub mod supplier;
pub mod traits;
pub mod user;

// Re-esportazione dei trait per facilitare l'import
pub use traits::{Create, Delete, Read, ReadAll, Update};

// Re-esportazione delle struct dei repository per facilitare l'import
pub use address::AddressRepository;
pub use client::ClientRepository;
pub use image::ImageRepository;
pub use product::ProductRepository;
pub use supplier::SupplierRepository;
pub use user::UserRepository;
