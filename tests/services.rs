mod common;

use bakery_admin::{
    errors::ApiError,
    http::{Method, MultipartPart, RequestBody},
    schema::{ImageOrderPayload, ImageUpload, Role},
    services::{
        AdminUserListParams, CategoryListParams, DeliveryBoyListParams, ListParams,
        ProductListParams,
    },
};
use common::harness;
use serde_json::{Value, json};

fn product(id: u64) -> Value {
    json!({
        "id": id,
        "name": format!("Loaf {id}"),
        "price": "120.00",
        "selling_price": 99.5,
        "category_id": 3,
        "stock": 4,
        "is_available": 1,
        "gst": 5
    })
}

#[tokio::test]
async fn list_envelopes_decode_to_the_same_rows() {
    let h = harness();
    let rows = json!([{"id": 1, "name": "Breads"}, {"id": 2, "name": "Cakes"}]);
    let shapes = [
        rows.clone(),
        json!({ "data": rows.clone() }),
        json!({ "data": { "data": rows.clone(), "current_page": 1, "per_page": 15, "total": 2, "last_page": 1 } }),
        json!({ "categories": rows.clone() }),
    ];

    let mut decoded = Vec::new();
    for shape in shapes {
        h.transport.respond(Method::Get, "/categories", 200, shape);
        let page = h
            .api
            .categories()
            .list(&CategoryListParams::default())
            .await
            .unwrap();
        decoded.push(page.data);
    }

    assert_eq!(decoded[0].len(), 2);
    assert!(decoded.iter().all(|rows| *rows == decoded[0]));
}

fn shapes(rows: Value, name: &str) -> [Value; 3] {
    [rows.clone(), json!({ "data": rows.clone() }), json!({ name: rows })]
}

#[tokio::test]
async fn every_list_service_normalizes_the_same_shapes() {
    let h = harness();
    let users = json!([{"id": 7, "name": "Asha", "email": "asha@example.com", "roles": ["admin"]}]);
    let riders = json!([{"id": 9, "name": "Ravi", "email": "ravi@example.com", "is_active": "1"}]);
    let products = json!([product(1), product(2)]);

    for shape in shapes(users, "users") {
        h.transport.respond(Method::Get, "/users", 200, shape);
        let page = h.api.admin_users().list(&AdminUserListParams::default()).await.unwrap();
        assert_eq!(page.data[0].roles, vec![Role::Admin]);
        assert_eq!(page.meta.current_page, 1);
    }

    for shape in shapes(riders, "delivery_boys") {
        h.transport.respond(Method::Get, "/delivery-boys", 200, shape);
        let page = h
            .api
            .delivery_boys()
            .list(&DeliveryBoyListParams::default())
            .await
            .unwrap();
        assert_eq!(page.data[0].is_active, Some(true));
    }

    for shape in shapes(products, "products") {
        h.transport.respond(Method::Get, "/products", 200, shape);
        let page = h
            .api
            .products()
            .list_paginated(&ProductListParams::default())
            .await
            .unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page.data[0].price, 120.0);
        assert!(page.data[0].is_available);
    }
}

#[tokio::test]
async fn list_without_any_array_is_empty() {
    let h = harness();
    h.transport
        .respond(Method::Get, "/categories", 200, json!({"message": "nothing here"}));

    let all = h.api.categories().list_all().await.unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
async fn paginated_products_send_paging_and_filters() {
    let h = harness();
    let rows: Vec<Value> = (31..43).map(product).collect();
    h.transport.respond(
        Method::Get,
        "/products",
        200,
        json!({
            "data": rows,
            "meta": { "current_page": 2, "per_page": 15, "total": 27, "last_page": 2 }
        }),
    );

    let params = ProductListParams {
        list: ListParams::page(2, 15),
        category_id: Some(3),
        is_available: None,
    };
    let page = h.api.products().list_paginated(&params).await.unwrap();

    assert_eq!(page.len(), 12);
    assert_eq!(page.meta.current_page, 2);
    assert!(!page.meta.has_next());

    let request = h.transport.last(Method::Get, "/products").unwrap();
    assert_eq!(request.target(), "/products?page=2&per_page=15&category_id=3");
    assert_eq!(request.header("Authorization"), Some("Bearer test-token"));
}

#[tokio::test]
async fn entity_envelopes_decode_to_the_same_record() {
    let h = harness();
    let category = json!({"id": 4, "name": "Breads", "is_active": true});
    let shapes = [
        json!({ "category": category.clone() }),
        json!({ "data": { "category": category.clone() } }),
        json!({ "data": category.clone() }),
        category.clone(),
    ];

    for shape in shapes {
        h.transport.respond(Method::Get, "/categories/4", 200, shape);
        let found = h.api.categories().get(4).await.unwrap();
        assert_eq!(found.id, 4);
        assert_eq!(found.name, "Breads");
    }
}

#[tokio::test]
async fn http_errors_carry_status_and_server_message() {
    let h = harness();
    h.transport.respond(
        Method::Delete,
        "/categories/5",
        409,
        json!({"message": "Category has products"}),
    );

    let err = h.api.categories().delete(5).await.unwrap_err();
    assert_eq!(err.status(), Some(409));
    assert_eq!(err.to_string(), "Category has products");

    let err = h.api.categories().get(404_404).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn malformed_detail_is_invalid_response() {
    let h = harness();
    h.transport
        .respond(Method::Get, "/products/2", 200, json!({"data": {"id": "two"}}));

    let err = h.api.products().get(2).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidResponse { .. }));
}

#[tokio::test]
async fn html_success_body_lists_empty_and_fails_detail() {
    let h = harness();
    h.transport
        .respond_raw(Method::Get, "/categories", 200, "<html>ok</html>");
    h.transport
        .respond_raw(Method::Get, "/categories/4", 200, "<html>ok</html>");

    let page = h
        .api
        .categories()
        .list(&CategoryListParams::default())
        .await
        .unwrap();
    assert!(page.data.is_empty());

    let err = h.api.categories().get(4).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidResponse { .. }));
}

#[tokio::test]
async fn image_upload_is_multipart_with_primary_index() {
    let h = harness();
    h.transport.respond(
        Method::Post,
        "/products/3/images",
        201,
        json!({"images": [{"id": 10, "image_url": "/a.jpg", "is_primary": true}]}),
    );

    let uploads = vec![
        ImageUpload {
            filename: "a.jpg".into(),
            content_type: "image/jpeg".into(),
            bytes: vec![1, 2, 3],
        },
        ImageUpload {
            filename: "b.png".into(),
            content_type: "image/png".into(),
            bytes: vec![4],
        },
    ];
    let images = h
        .api
        .products()
        .upload_images(3, uploads, Some(1))
        .await
        .unwrap();
    assert_eq!(images.len(), 1);

    let request = h.transport.last(Method::Post, "/products/3/images").unwrap();
    let RequestBody::Multipart(parts) = request.body else {
        panic!("expected a multipart body");
    };
    let names: Vec<_> = parts.iter().map(MultipartPart::name).collect();
    assert_eq!(names, ["images[]", "images[]", "primary_index"]);
}

#[tokio::test]
async fn image_upload_rejects_non_images_locally() {
    let h = harness();
    let uploads = vec![ImageUpload {
        filename: "notes.txt".into(),
        content_type: "text/plain".into(),
        bytes: vec![1],
    }];

    let err = h
        .api
        .products()
        .upload_images(3, uploads, None)
        .await
        .unwrap_err();
    assert!(err.is_local());
    assert!(h.transport.requests().is_empty());
}

#[tokio::test]
async fn user_status_and_delete_hit_user_endpoints() {
    let h = harness();
    h.transport.respond(Method::Patch, "/users/7", 200, json!({}));
    h.transport.respond_raw(Method::Delete, "/users/7", 204, "");

    h.api.admin_users().set_active(7, false).await.unwrap();
    h.api.admin_users().delete(7).await.unwrap();

    let patch = h.transport.last(Method::Patch, "/users/7").unwrap();
    assert_eq!(patch.body, RequestBody::Json(json!({"is_active": false})));
    assert_eq!(h.transport.count(Method::Delete, "/users/7"), 1);
}

#[tokio::test]
async fn export_downloads_spreadsheet_with_filters() {
    let h = harness();
    h.transport
        .respond_raw(Method::Get, "/products-export/xlsx", 200, "PK-sheet");

    let params = ProductListParams {
        list: ListParams::page(3, 15).with_search("rye"),
        category_id: Some(2),
        is_available: Some(true),
    };
    let file = h.api.products().export_xlsx(&params).await.unwrap();

    assert_eq!(file.bytes, b"PK-sheet");
    assert!(file.filename.starts_with("products-export-"));
    assert!(file.filename.ends_with(".xlsx"));

    let request = h.transport.last(Method::Get, "/products-export/xlsx").unwrap();
    assert_eq!(
        request.target(),
        "/products-export/xlsx?search=rye&category_id=2&is_available=1"
    );
    assert_eq!(request.header("Accept"), Some("application/octet-stream"));
    assert_eq!(request.header("Authorization"), Some("Bearer test-token"));
}

#[tokio::test]
async fn export_failure_keeps_server_message() {
    let h = harness();
    h.transport.respond(
        Method::Get,
        "/products-export/xlsx",
        500,
        json!({"message": "Export failed"}),
    );

    let err = h
        .api
        .products()
        .export_xlsx(&ProductListParams::default())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "Export failed");
}

#[tokio::test]
async fn image_delete_and_primary_hit_gallery_endpoints() {
    let h = harness();
    h.transport
        .respond_raw(Method::Delete, "/products/3/images/10", 204, "");
    h.transport
        .respond(Method::Patch, "/products/3/images/11/primary", 200, json!({}));

    h.api.products().delete_image(3, 10).await.unwrap();
    h.api.products().set_primary_image(3, 11).await.unwrap();

    assert_eq!(h.transport.count(Method::Delete, "/products/3/images/10"), 1);
    let patch = h
        .transport
        .last(Method::Patch, "/products/3/images/11/primary")
        .unwrap();
    assert_eq!(patch.body, RequestBody::Json(json!({})));
}

#[tokio::test]
async fn image_reorder_sends_ids_in_order() {
    let h = harness();
    h.transport
        .respond(Method::Put, "/products/3/images/order", 200, json!({"message": "ok"}));

    let order = ImageOrderPayload {
        image_ids: vec![12, 10, 11],
    };
    h.api.products().reorder_images(3, &order).await.unwrap();

    let put = h.transport.last(Method::Put, "/products/3/images/order").unwrap();
    assert_eq!(put.body, RequestBody::Json(json!({"image_ids": [12, 10, 11]})));
}

#[tokio::test]
async fn image_reorder_rejects_empty_order_locally() {
    let h = harness();
    let order = ImageOrderPayload { image_ids: vec![] };

    let err = h.api.products().reorder_images(3, &order).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidPayload { .. }));
    assert!(h.transport.requests().is_empty());
}
