//! Product DTOs - Data Transfer Objects per prodotti

use crate::entities::Product;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDTO {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub available_stock: i32,
    pub last_update_date: NaiveDate,
    pub supplier_id: Uuid,
    pub image_id: Option<Uuid>,
}

impl From<Product> for ProductDTO {
    fn from(value: Product) -> Self {
        Self {
            id: value.id,
            name: value.name,
            category: value.category,
            price: value.price,
            available_stock: value.available_stock,
            last_update_date: value.last_update_date,
            supplier_id: value.supplier_id,
            image_id: value.image_id,
        }
    }
}

/// DTO per creare un nuovo prodotto. `lastUpdateDate` è gestita dal server.
#[derive(Serialize, Deserialize, Debug, Clone, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductDTO {
    pub id: Option<Uuid>,
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 50, message = "Category must be between 1 and 50 characters"))]
    pub category: String,
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
    #[validate(range(min = 0, message = "Available stock cannot be negative"))]
    pub available_stock: i32,
    pub supplier_id: Uuid,
    pub image_id: Option<Uuid>,
}

impl CreateProductDTO {
    pub fn into_entity(self, last_update_date: NaiveDate) -> Product {
        Product {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            name: self.name,
            category: self.category,
            price: self.price,
            available_stock: self.available_stock,
            last_update_date,
            supplier_id: self.supplier_id,
            image_id: self.image_id,
        }
    }
}

/// NUMERIC(10,2): non negativo, al massimo due decimali, otto cifre intere
fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    let message = if price.is_sign_negative() && !price.is_zero() {
        Some("Price cannot be negative")
    } else if price.normalize().scale() > 2 {
        Some("Price cannot be more precise than cents")
    } else if *price >= Decimal::new(100_000_000, 0) {
        Some("Price is too large")
    } else {
        None
    };

    match message {
        Some(message) => {
            let mut err = ValidationError::new("price");
            err.message = Some(message.into());
            Err(err)
        }
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn with_price(price: &str) -> CreateProductDTO {
        CreateProductDTO {
            id: None,
            name: "Kettle".to_string(),
            category: "Kitchen".to_string(),
            price: Decimal::from_str(price).unwrap(),
            available_stock: 3,
            supplier_id: Uuid::new_v4(),
            image_id: None,
        }
    }

    #[test]
    fn prices_in_cents_are_accepted() {
        assert!(with_price("0").validate().is_ok());
        assert!(with_price("19.99").validate().is_ok());
        assert!(with_price("19.90").validate().is_ok());
        assert!(with_price("99999999.99").validate().is_ok());
    }

    #[test]
    fn invalid_prices_are_rejected() {
        assert!(with_price("-1.00").validate().is_err());
        assert!(with_price("1.999").validate().is_err());
        assert!(with_price("100000000").validate().is_err());
    }

    #[test]
    fn negative_stock_is_rejected() {
        let mut dto = with_price("5.00");
        dto.available_stock = -1;
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("available_stock"));
    }

    #[test]
    fn price_accepts_json_numbers_and_strings() {
        let body = serde_json::json!({
            "name": "Kettle",
            "category": "Kitchen",
            "price": "12.50",
            "availableStock": 4,
            "supplierId": Uuid::nil(),
        });
        let dto: CreateProductDTO = serde_json::from_value(body).unwrap();
        assert_eq!(dto.price, Decimal::new(1250, 2));
        assert!(dto.image_id.is_none());

        let body = serde_json::json!({
            "name": "Kettle",
            "category": "Kitchen",
            "price": 12,
            "availableStock": 4,
            "supplierId": Uuid::nil(),
        });
        let dto: CreateProductDTO = serde_json::from_value(body).unwrap();
        assert_eq!(dto.price, Decimal::new(12, 0));
    }
}
