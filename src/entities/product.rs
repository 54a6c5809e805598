//! Product entity - Prodotto a catalogo

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub price: Decimal, // NUMERIC(10,2): il prezzo non è mai più preciso dei centesimi
    pub available_stock: i32,
    pub last_update_date: NaiveDate,
    pub supplier_id: Uuid,
    pub image_id: Option<Uuid>,
}

impl Product {
    /// Una riduzione è ammessa se positiva e non superiore allo stock disponibile
    pub fn can_reduce_by(&self, amount: i32) -> bool {
        amount >= 1 && amount <= self.available_stock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(stock: i32) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: "Kettle".to_string(),
            category: "Kitchen".to_string(),
            price: Decimal::new(2999, 2),
            available_stock: stock,
            last_update_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            supplier_id: Uuid::new_v4(),
            image_id: None,
        }
    }

    #[test]
    fn reduction_bounds() {
        let p = product(5);
        assert!(p.can_reduce_by(1));
        assert!(p.can_reduce_by(5));
        assert!(!p.can_reduce_by(6));
        assert!(!p.can_reduce_by(0));
        assert!(!p.can_reduce_by(-1));
    }

    #[test]
    fn empty_stock_cannot_be_reduced() {
        assert!(!product(0).can_reduce_by(1));
    }
}
