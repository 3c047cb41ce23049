mod common;

use std::time::Duration;

use bakery_admin::{
    controllers::ProductsController,
    forms::{AdminUserForm, DeliveryBoyForm, EntityForm, FormMode, ProductForm},
    http::{Method, RequestBody},
    queries::keys,
    query::{Query, QueryKey, ToastKind},
    schema::{AdminUser, Page, Role},
    services::{AdminUserListParams, ProductListParams},
};
use common::harness;
use serde_json::json;

fn users_page() -> serde_json::Value {
    json!({
        "data": [
            {"id": 7, "name": "Asha", "email": "asha@example.com", "roles": ["admin"]},
            {"id": 8, "name": "Ravi", "email": "ravi@example.com", "roles": ["delivery_boy"]}
        ],
        "meta": {"current_page": 1, "per_page": 15, "total": 2, "last_page": 1}
    })
}

#[tokio::test]
async fn concurrent_identical_reads_share_one_request() {
    let h = harness();
    h.transport.set_delay(Duration::from_millis(20));
    h.transport.respond(Method::Get, "/users", 200, users_page());

    let client = h.api.client();
    let query = h.api.admin_user_list(AdminUserListParams::default());
    let (a, b, c) = tokio::join!(
        client.fetch_query(&query),
        client.fetch_query(&query),
        client.fetch_query(&query),
    );

    assert_eq!(a.unwrap(), b.clone().unwrap());
    assert_eq!(b.unwrap().data, c.unwrap().data);
    assert_eq!(h.transport.count(Method::Get, "/users"), 1);
}

#[tokio::test]
async fn writes_to_another_family_keep_a_running_list_fresh() {
    let h = harness();
    h.transport.set_delay(Duration::from_millis(20));
    h.transport
        .respond(Method::Get, "/categories", 200, json!([{"id": 1, "name": "Breads"}]));

    let client = h.api.client();
    let query = h.api.all_categories();
    let (first, ()) = tokio::join!(client.fetch_query(&query), async {
        tokio::time::sleep(Duration::from_millis(5)).await;
        client.invalidate(&keys::admin_users());
    });
    assert_eq!(first.unwrap().len(), 1);

    let again = client.fetch_query(&query).await.unwrap();
    assert_eq!(again.len(), 1);
    assert_eq!(h.transport.count(Method::Get, "/categories"), 1);
}

#[tokio::test]
async fn deleting_an_admin_user_invalidates_and_refetches_the_family() {
    let h = harness();
    h.transport.respond(Method::Get, "/users", 200, users_page());
    h.transport.respond(Method::Delete, "/users/7", 200, json!({"message": "deleted"}));

    let client = h.api.client();
    let mut events = client.subscribe();
    let query = h.api.admin_user_list(AdminUserListParams::default());
    client.fetch_query(&query).await.unwrap();

    client.mutate(&h.api.delete_admin_user(), 7).await.unwrap();

    let first = events.recv().await.unwrap();
    let second = events.recv().await.unwrap();
    assert_eq!(first, QueryKey::new("adminUsers"));
    assert_eq!(second, keys::delivery_boys());

    // stale data is kept, but the next read goes back to the server
    let cached = client.get_query_data::<Page<AdminUser>>(&query.key());
    assert_eq!(cached.map(|page| page.len()), Some(2));
    client.fetch_query(&query).await.unwrap();
    assert_eq!(h.transport.count(Method::Get, "/users"), 2);

    let toasts = h.toasts.drain();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].kind, ToastKind::Success);
    assert_eq!(toasts[0].message, "Admin user deleted successfully");
}

#[tokio::test]
async fn failed_write_leaves_the_cache_alone() {
    let h = harness();
    h.transport.respond(Method::Get, "/categories", 200, json!([{"id": 1, "name": "Breads"}]));
    h.transport
        .respond(Method::Delete, "/categories/1", 409, json!({"message": "Category has products"}));

    let client = h.api.client();
    let mut events = client.subscribe();
    let query = h.api.all_categories();
    client.fetch_query(&query).await.unwrap();

    let err = client.mutate(&h.api.delete_category(), 1).await.unwrap_err();
    assert_eq!(err.status(), Some(409));
    assert!(events.try_recv().is_err());

    // still fresh: served from cache
    client.fetch_query(&query).await.unwrap();
    assert_eq!(h.transport.count(Method::Get, "/categories"), 1);

    let toasts = h.toasts.drain();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].kind, ToastKind::Error);
    assert_eq!(toasts[0].message, "Category has products");
}

#[tokio::test]
async fn selling_price_above_price_never_reaches_the_network() {
    let h = harness();
    let form = ProductForm {
        name: "Croissant".into(),
        price: 50.0,
        selling_price: 60.0,
        category_id: Some(2),
        ..ProductForm::default()
    };

    let err = form.to_payload(FormMode::Create).unwrap_err();
    assert_eq!(err, "Selling price must be less than or equal to price");

    let mut page = ProductsController::new(h.api.clone(), 15);
    page.modal.open_create();
    *page.modal.form_mut() = form;
    let result = page.submit().await;

    assert!(result.unwrap_err().is_local());
    assert!(h.transport.requests().is_empty());
    assert!(page.modal.is_open());
    assert_eq!(
        h.toasts.drain()[0].message,
        "Selling price must be less than or equal to price"
    );
}

#[tokio::test]
async fn blank_password_on_edit_is_left_out_of_the_request() {
    let h = harness();
    h.transport.respond(
        Method::Put,
        "/users/7",
        200,
        json!({"user": {"id": 7, "name": "Asha K", "email": "asha@example.com", "roles": ["admin", "store_owner"]}}),
    );

    let form = AdminUserForm {
        name: "Asha K".into(),
        email: "asha@example.com".into(),
        roles: vec![Role::Admin, Role::StoreOwner],
        ..AdminUserForm::default()
    };
    let payload = form.to_payload(FormMode::Edit).unwrap();
    let user = h
        .api
        .client()
        .mutate(&h.api.update_admin_user(), (7, payload))
        .await
        .unwrap();
    assert!(user.has_role(Role::StoreOwner));

    let request = h.transport.last(Method::Put, "/users/7").unwrap();
    let RequestBody::Json(body) = request.body else {
        panic!("expected a JSON body");
    };
    assert!(body.get("password").is_none());
    assert_eq!(body["roles"], json!(["admin", "store_owner"]));
}

#[tokio::test]
async fn read_failure_is_toasted_once_per_fetch() {
    let h = harness();
    h.transport.set_delay(Duration::from_millis(10));
    h.transport
        .respond(Method::Get, "/products", 500, json!({"message": "Database unavailable"}));

    let client = h.api.client();
    let query = h.api.product_list(ProductListParams::default());
    let (a, b) = tokio::join!(client.fetch_query(&query), client.fetch_query(&query));

    assert_eq!(a.unwrap_err().status(), Some(500));
    assert!(b.is_err());
    let toasts = h.toasts.drain();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].message, "Database unavailable");
}

#[tokio::test]
async fn creating_a_delivery_boy_posts_a_user_with_the_delivery_role() {
    let h = harness();
    h.transport.respond(
        Method::Post,
        "/users",
        201,
        json!({"data": {"id": 12, "name": "Ravi", "email": "ravi@example.com", "roles": ["delivery_boy"], "is_active": true}}),
    );

    let form = DeliveryBoyForm {
        name: "Ravi".into(),
        email: "ravi@example.com".into(),
        password: "secret1".into(),
        ..Default::default()
    };
    let payload = form.to_payload(FormMode::Create).unwrap();
    let rider = h
        .api
        .client()
        .mutate(&h.api.create_delivery_boy(), payload)
        .await
        .unwrap();
    assert_eq!(rider.id, 12);

    let RequestBody::Json(body) = h.transport.last(Method::Post, "/users").unwrap().body else {
        panic!("expected a JSON body");
    };
    assert_eq!(body["roles"], json!(["delivery_boy"]));
    assert_eq!(body["password"], "secret1");
}
