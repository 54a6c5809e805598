//! Query DTOs - Parametri di query string

use serde::{Deserialize, Serialize};
use utoipa::IntoParams;
use uuid::Uuid;

/// Paginazione opzionale: senza parametri vengono restituiti tutti i record
#[derive(Serialize, Deserialize, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Numero massimo di elementi (>= 1)
    pub limit: Option<i64>,
    /// Elementi da saltare (>= 0)
    pub offset: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ClientSearchQuery {
    pub first_name: String,
    pub last_name: String,
}

/// `?id=<uuid>` usato dalle DELETE
#[derive(Serialize, Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IdQuery {
    pub id: Uuid,
}

#[derive(Serialize, Deserialize, Debug, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProductIdQuery {
    pub product_id: Uuid,
}

#[derive(Serialize, Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StockReductionQuery {
    /// Unità da sottrarre allo stock disponibile
    pub amount: i32,
}

/// Id opzionale per il caricamento di un'immagine
#[derive(Serialize, Deserialize, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ImageUploadQuery {
    pub id: Option<Uuid>,
}
