mod common;

use bakery_admin::{
    controllers::{
        AdminUsersController, CategoriesController, DeliveryBoysController, Instant, Modal,
        ProductFilters, ProductsController, SEARCH_DEBOUNCE,
    },
    http::{Method, RequestBody},
    schema::{AdminUser, Category, Location, Role},
};
use chrono::NaiveDate;
use common::harness;
use serde_json::json;

fn empty_products() -> serde_json::Value {
    json!({
        "data": [],
        "meta": {"current_page": 1, "per_page": 15, "total": 0, "last_page": 1}
    })
}

#[tokio::test]
async fn search_and_filter_changes_reset_to_page_one() {
    let h = harness();
    h.transport.respond(Method::Get, "/products", 200, empty_products());
    let mut page = ProductsController::new(h.api.clone(), 15);

    page.list.set_page(4);
    assert!(page.list.update_filters(|f| f.category_id = Some(3)));
    assert_eq!(page.list.page(), 1);

    page.list.set_page(4);
    let typed = Instant::now();
    page.list.type_search("rye", typed);
    assert!(!page.list.tick(typed));
    assert_eq!(page.list.page(), 4, "nothing commits before the debounce");

    assert!(page.list.tick(typed + SEARCH_DEBOUNCE));
    assert_eq!(page.list.page(), 1);

    page.load().await.unwrap();
    let request = h.transport.last(Method::Get, "/products").unwrap();
    assert_eq!(
        request.target(),
        "/products?page=1&per_page=15&search=rye&category_id=3"
    );
}

#[tokio::test]
async fn only_the_last_keystroke_is_searched() {
    let h = harness();
    h.transport.respond(Method::Get, "/categories", 200, json!([]));
    let mut page = CategoriesController::new(h.api.clone(), 15);

    let start = Instant::now();
    for (i, text) in ["b", "br", "bre", "brea"].into_iter().enumerate() {
        page.list.type_search(text, start + SEARCH_DEBOUNCE / 4 * i as u32);
    }
    assert!(page.list.tick(start + SEARCH_DEBOUNCE * 2));
    page.load().await.unwrap();

    let requests = h.transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].query.get("search"), Some("brea"));
}

#[test]
fn product_view_round_trips_through_the_url() {
    let h = harness();
    let mut page = ProductsController::new(h.api.clone(), 15);
    assert_eq!(page.url_query(), "");

    page.list.set_filters(ProductFilters {
        category_id: Some(3),
        is_available: Some(false),
    });
    page.list.type_search("rye bread", Instant::now());
    page.list.submit_search();
    page.list.set_page(2);
    page.list.set_per_page(30);
    page.list.set_page(3);

    let url = page.url_query();
    let mut restored = ProductsController::new(h.api.clone(), 15);
    restored.restore_from_url(&format!("?{url}"));

    assert_eq!(restored.params(), page.params());
    assert_eq!(restored.url_query(), url);
}

#[test]
fn garbage_in_the_url_falls_back_to_defaults() {
    let h = harness();
    let mut page = ProductsController::new(h.api.clone(), 15);
    page.restore_from_url("page=abc&per_page=-3&category_id=x&is_available=maybe");

    assert_eq!(page.list.page(), 1);
    assert_eq!(page.list.per_page(), 15);
    assert_eq!(page.list.filters(), &ProductFilters::default());
}

#[tokio::test]
async fn failed_delete_keeps_the_confirmation_open() {
    let h = harness();
    h.transport
        .respond(Method::Delete, "/categories/4", 500, json!({"message": "Server error"}));
    let mut page = CategoriesController::new(h.api.clone(), 15);
    let category = Category {
        id: 4,
        name: "Breads".into(),
        description: None,
        is_active: true,
        created_at: None,
        updated_at: None,
    };

    page.modal.request_delete(&category);
    assert!(page.confirm_delete().await.is_err());
    assert_eq!(page.modal.pending_delete(), Some(4));

    h.transport.respond(Method::Delete, "/categories/4", 200, json!({}));
    page.confirm_delete().await.unwrap();
    assert_eq!(page.modal.modal(), &Modal::Closed);
}

#[tokio::test]
async fn location_assignment_keeps_a_single_primary() {
    let h = harness();
    h.transport.respond(Method::Post, "/users/7/locations", 200, json!({}));
    let mut page = AdminUsersController::new(h.api.clone(), 15);
    let user = AdminUser {
        id: 7,
        name: "Asha".into(),
        email: "asha@example.com".into(),
        roles: vec![Role::StoreOwner],
        phone: None,
        address: None,
        is_active: Some(true),
        locations: vec![Location {
            id: 1,
            name: "MG Road".into(),
            address: None,
            is_primary: true,
        }],
        created_at: None,
    };

    page.open_assign(&user);
    assert_eq!(page.assignment().primary_location_id, Some(1));

    page.toggle_location(1);
    assert_eq!(page.assignment().primary_location_id, None);
    page.set_primary_location(2);
    page.toggle_location(3);
    assert_eq!(page.assignment().location_ids, vec![2, 3]);

    page.submit_assignment().await.unwrap();
    let request = h.transport.last(Method::Post, "/users/7/locations").unwrap();
    assert_eq!(
        request.body,
        RequestBody::Json(json!({
            "location_ids": [2, 3],
            "primary_location_id": 2
        }))
    );
    assert!(!page.modal.is_open());
}

#[test]
fn reversed_date_range_is_swapped() {
    let h = harness();
    let mut page = DeliveryBoysController::new(h.api.clone(), 15);
    let early = NaiveDate::from_ymd_opt(2026, 1, 1);
    let late = NaiveDate::from_ymd_opt(2026, 3, 1);

    page.list.set_page(3);
    assert!(page.set_date_range(late, early));
    assert_eq!(page.list.page(), 1);

    let query = page.params().to_query();
    assert_eq!(query.get("from"), Some("2026-01-01"));
    assert_eq!(query.get("to"), Some("2026-03-01"));
}
