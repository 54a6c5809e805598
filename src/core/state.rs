//! Application State - Stato globale dell'applicazione
//!
//! Contiene tutti i repository, il token service e le impostazioni condivise
//! necessarie per gestire le richieste.

use crate::core::token::TokenService;
use crate::repositories::{
    AddressRepository, ClientRepository, ImageRepository, ProductRepository, SupplierRepository,
    UserRepository,
};
use sqlx::PgPool;

/// Stato globale dell'applicazione condiviso tra tutte le route e middleware
pub struct AppState {
    /// Repository per la gestione degli utenti
    pub user: UserRepository,

    /// Repository per la gestione degli indirizzi
    pub address: AddressRepository,

    /// Repository per la gestione dei clienti
    pub client: ClientRepository,

    /// Repository per la gestione dei fornitori
    pub supplier: SupplierRepository,

    /// Repository per la gestione dei prodotti
    pub product: ProductRepository,

    /// Repository per la gestione delle immagini
    pub image: ImageRepository,

    /// Emissione e verifica dei token JWT
    pub tokens: TokenService,

    /// Dimensione massima accettata per il body di un'immagine
    pub max_image_bytes: usize,
}

impl AppState {
    /// Dimensione di default del body di un'immagine (10 MiB)
    pub const DEFAULT_MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

    /// Crea una nuova istanza di AppState inizializzando tutti i repository
    /// con il pool di connessioni fornito e il token service.
    ///
    /// # Arguments
    /// * `pool` - Pool di connessioni PostgreSQL condiviso
    /// * `tokens` - Servizio per la firma e la verifica dei token JWT
    pub fn new(pool: PgPool, tokens: TokenService) -> Self {
        Self {
            user: UserRepository::new(pool.clone()),
            address: AddressRepository::new(pool.clone()),
            client: ClientRepository::new(pool.clone()),
            supplier: SupplierRepository::new(pool.clone()),
            product: ProductRepository::new(pool.clone()),
            image: ImageRepository::new(pool),
            tokens,
            max_image_bytes: Self::DEFAULT_MAX_IMAGE_BYTES,
        }
    }

    pub fn with_max_image_bytes(mut self, max_image_bytes: usize) -> Self {
        self.max_image_bytes = max_image_bytes;
        self
    }
}
