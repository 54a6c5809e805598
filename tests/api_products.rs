//! Integration tests per gli endpoints dei prodotti

mod common;

#[cfg(test)]
mod product_tests {
    use super::common::{authorization, create_authorized_server};
    use axum::http::StatusCode;
    use chrono::Utc;
    use futures::future::join_all;
    use rust_decimal::Decimal;
    use serde_json::json;
    use shop_server::dtos::ProductDTO;
    use sqlx::PgPool;
    use std::future::IntoFuture;
    use std::str::FromStr;

    const ANVIL: &str = "b0000000-0000-0000-0000-000000000001";
    const SKATES: &str = "b0000000-0000-0000-0000-000000000002";

    #[sqlx::test(fixtures(
        path = "../fixtures",
        scripts("addresses", "suppliers", "images", "products")
    ))]
    #[ignore = "requires a PostgreSQL DATABASE_URL"]
    async fn test_list_and_get_products(pool: PgPool) -> sqlx::Result<()> {
        let (server, auth) = create_authorized_server(pool);

        let list = server.get("/api/v1/products").add_header(authorization(), auth.clone()).await;
        list.assert_status_ok();
        assert_eq!(list.json::<Vec<ProductDTO>>().len(), 3);

        let anvil = server
            .get(&format!("/api/v1/products/{}", ANVIL))
            .add_header(authorization(), auth)
            .await;
        anvil.assert_status_ok();
        let anvil: ProductDTO = anvil.json();
        assert_eq!(anvil.price, Decimal::from_str("99.90").unwrap());
        assert!(anvil.image_id.is_some());
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("addresses", "suppliers")))]
    #[ignore = "requires a PostgreSQL DATABASE_URL"]
    async fn test_add_product(pool: PgPool) -> sqlx::Result<()> {
        let (server, auth) = create_authorized_server(pool);

        let response = server
            .post("/api/v1/products")
            .add_header(authorization(), auth.clone())
            .json(&json!({
                "name": "Portable hole",
                "category": "misc",
                "price": "12.50",
                "availableStock": 4,
                "supplierId": "50000000-0000-0000-0000-000000000002"
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let product: ProductDTO = response.json();
        assert_eq!(product.last_update_date, Utc::now().date_naive());
        assert_eq!(product.image_id, None);

        let unknown_supplier = server
            .post("/api/v1/products")
            .add_header(authorization(), auth.clone())
            .json(&json!({
                "name": "Portable hole",
                "category": "misc",
                "price": "12.50",
                "availableStock": 4,
                "supplierId": "50000000-0000-0000-0000-0000000000ff"
            }))
            .await;
        unknown_supplier.assert_status(StatusCode::CONFLICT);

        let negative_price = server
            .post("/api/v1/products")
            .add_header(authorization(), auth)
            .json(&json!({
                "name": "Portable hole",
                "category": "misc",
                "price": "-1.00",
                "availableStock": 4,
                "supplierId": "50000000-0000-0000-0000-000000000002"
            }))
            .await;
        negative_price.assert_status_bad_request();
        Ok(())
    }

    // ============================================================
    // Test per PATCH /api/v1/products/{id}/available-stock
    // ============================================================

    #[sqlx::test(fixtures(
        path = "../fixtures",
        scripts("addresses", "suppliers", "images", "products")
    ))]
    #[ignore = "requires a PostgreSQL DATABASE_URL"]
    async fn test_reduce_stock(pool: PgPool) -> sqlx::Result<()> {
        let (server, auth) = create_authorized_server(pool);

        let response = server
            .patch(&format!("/api/v1/products/{}/available-stock", ANVIL))
            .add_query_param("amount", 3)
            .add_header(authorization(), auth)
            .await;

        response.assert_status_ok();
        let product: ProductDTO = response.json();
        assert_eq!(product.available_stock, 7);
        assert_eq!(product.last_update_date, Utc::now().date_naive());
        Ok(())
    }

    #[sqlx::test(fixtures(
        path = "../fixtures",
        scripts("addresses", "suppliers", "images", "products")
    ))]
    #[ignore = "requires a PostgreSQL DATABASE_URL"]
    async fn test_reduce_stock_to_zero_then_beyond(pool: PgPool) -> sqlx::Result<()> {
        let (server, auth) = create_authorized_server(pool);
        let path = format!("/api/v1/products/{}/available-stock", SKATES);

        let all = server
            .patch(&path)
            .add_query_param("amount", 3)
            .add_header(authorization(), auth.clone())
            .await;
        all.assert_status_ok();
        assert_eq!(all.json::<ProductDTO>().available_stock, 0);

        let beyond = server
            .patch(&path)
            .add_query_param("amount", 1)
            .add_header(authorization(), auth)
            .await;
        beyond.assert_status_bad_request();
        Ok(())
    }

    #[sqlx::test(fixtures(
        path = "../fixtures",
        scripts("addresses", "suppliers", "images", "products")
    ))]
    #[ignore = "requires a PostgreSQL DATABASE_URL"]
    async fn test_concurrent_reductions_never_go_below_zero(pool: PgPool) -> sqlx::Result<()> {
        let (server, auth) = create_authorized_server(pool.clone());
        let path = format!("/api/v1/products/{}/available-stock", SKATES);

        // stock iniziale 3, otto richieste da 1 in parallelo
        let requests = (0..8).map(|_| {
            server
                .patch(&path)
                .add_query_param("amount", 1)
                .add_header(authorization(), auth.clone())
                .into_future()
        });
        let responses = join_all(requests).await;

        let succeeded = responses
            .iter()
            .filter(|r| r.status_code() == StatusCode::OK)
            .count();
        let rejected = responses
            .iter()
            .filter(|r| r.status_code() == StatusCode::BAD_REQUEST)
            .count();
        assert_eq!(succeeded, 3);
        assert_eq!(rejected, 5);

        let stock: i32 = sqlx::query_scalar("SELECT available_stock FROM product WHERE id = $1")
            .bind(uuid::Uuid::parse_str(SKATES).unwrap())
            .fetch_one(&pool)
            .await?;
        assert_eq!(stock, 0);
        Ok(())
    }

    #[sqlx::test(fixtures(
        path = "../fixtures",
        scripts("addresses", "suppliers", "images", "products")
    ))]
    #[ignore = "requires a PostgreSQL DATABASE_URL"]
    async fn test_reduce_stock_of_missing_product(pool: PgPool) -> sqlx::Result<()> {
        let (server, auth) = create_authorized_server(pool);

        let response = server
            .patch("/api/v1/products/b0000000-0000-0000-0000-0000000000ff/available-stock")
            .add_query_param("amount", 1)
            .add_header(authorization(), auth)
            .await;

        response.assert_status_not_found();
        Ok(())
    }

    #[sqlx::test(fixtures(
        path = "../fixtures",
        scripts("addresses", "suppliers", "images", "products")
    ))]
    #[ignore = "requires a PostgreSQL DATABASE_URL"]
    async fn test_delete_product(pool: PgPool) -> sqlx::Result<()> {
        let (server, auth) = create_authorized_server(pool);

        let response = server
            .delete("/api/v1/products")
            .add_query_param("productId", SKATES)
            .add_header(authorization(), auth.clone())
            .await;
        response.assert_status(StatusCode::NO_CONTENT);

        let fetched = server
            .get(&format!("/api/v1/products/{}", SKATES))
            .add_header(authorization(), auth.clone())
            .await;
        fetched.assert_status_not_found();

        let again = server
            .delete("/api/v1/products")
            .add_query_param("productId", SKATES)
            .add_header(authorization(), auth)
            .await;
        again.assert_status_not_found();
        Ok(())
    }
}
