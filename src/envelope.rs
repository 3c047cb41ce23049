//! # Response envelopes
//!
//! The backend wraps payloads inconsistently across endpoints: a list may come
//! back as a bare array, as `{data: [...]}`, as a Laravel paginator nested in
//! `{data: {data: [...], current_page, ...}}`, or under a resource-named key such
//! as `{categories: [...]}`. Detail endpoints do the same with single objects.
//!
//! Every endpoint decodes through [`ListEnvelope`] / [`EntityEnvelope`], which
//! classify the body first and decode second, so the accepted shapes are an
//! explicit, testable list instead of ad-hoc probing at each call site.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    errors::{ApiError, ApiResult},
    schema::{Page, PaginationMeta},
};

/// Where a list body keeps its rows
#[derive(Debug, Clone, PartialEq)]
pub enum ListEnvelope<'a> {
    /// `[...]`
    Bare(&'a [Value]),
    /// `{data: [...]}`
    Data(&'a [Value]),
    /// `{data: {data: [...]}}`
    NestedData(&'a [Value]),
    /// `{<name>: [...]}`
    Named(&'a str, &'a [Value]),
    /// No array anywhere we know to look
    Missing,
}

impl<'a> ListEnvelope<'a> {
    /// Classify a list body. The first matching shape wins.
    pub fn classify(body: &'a Value, names: &[&'a str]) -> Self {
        if let Some(rows) = body.as_array() {
            return ListEnvelope::Bare(rows);
        }
        if let Some(rows) = body.get("data").and_then(Value::as_array) {
            return ListEnvelope::Data(rows);
        }
        if let Some(rows) = body
            .get("data")
            .and_then(|data| data.get("data"))
            .and_then(Value::as_array)
        {
            return ListEnvelope::NestedData(rows);
        }
        for name in names {
            if let Some(rows) = body.get(*name).and_then(Value::as_array) {
                return ListEnvelope::Named(*name, rows);
            }
        }
        ListEnvelope::Missing
    }

    pub fn rows(&self) -> &'a [Value] {
        match self {
            ListEnvelope::Bare(rows)
            | ListEnvelope::Data(rows)
            | ListEnvelope::NestedData(rows)
            | ListEnvelope::Named(_, rows) => rows,
            ListEnvelope::Missing => &[],
        }
    }
}

/// Where a detail body keeps its object
#[derive(Debug, Clone, PartialEq)]
pub enum EntityEnvelope<'a> {
    /// `{<name>: {...}}`
    Named(&'a str, &'a Value),
    /// `{data: {<name>: {...}}}`
    DataNamed(&'a str, &'a Value),
    /// `{data: {...}}`
    Data(&'a Value),
    /// `{...}`
    Bare(&'a Value),
    Missing,
}

impl<'a> EntityEnvelope<'a> {
    pub fn classify(body: &'a Value, names: &[&'a str]) -> Self {
        for name in names {
            if let Some(entity) = body.get(*name).filter(|v| v.is_object()) {
                return EntityEnvelope::Named(*name, entity);
            }
        }
        if let Some(data) = body.get("data").filter(|v| v.is_object()) {
            for name in names {
                if let Some(entity) = data.get(*name).filter(|v| v.is_object()) {
                    return EntityEnvelope::DataNamed(*name, entity);
                }
            }
            return EntityEnvelope::Data(data);
        }
        if body.is_object() {
            return EntityEnvelope::Bare(body);
        }
        EntityEnvelope::Missing
    }

    pub fn entity(&self) -> Option<&'a Value> {
        match self {
            EntityEnvelope::Named(_, v)
            | EntityEnvelope::DataNamed(_, v)
            | EntityEnvelope::Data(v)
            | EntityEnvelope::Bare(v) => Some(v),
            EntityEnvelope::Missing => None,
        }
    }
}

/// Decode a list body. A body without any recognized array yields an empty list;
/// rows that do not match the schema fail with `Invalid <resource> response`.
pub fn decode_list<T: DeserializeOwned>(
    resource: &'static str,
    body: &Value,
    names: &[&str],
) -> ApiResult<Vec<T>> {
    let envelope = ListEnvelope::classify(body, names);
    if envelope == ListEnvelope::Missing {
        crate::warn_log!("[ENVELOPE] no {} list found in response, using empty list", resource);
        return Ok(Vec::new());
    }
    decode_rows(resource, envelope.rows())
}

/// Decode a paginated list body together with its paging state.
pub fn decode_page<T: DeserializeOwned>(
    resource: &'static str,
    body: &Value,
    names: &[&str],
) -> ApiResult<Page<T>> {
    let data: Vec<T> = decode_list(resource, body, names)?;
    let meta = find_meta(body).unwrap_or_else(|| PaginationMeta::single_page(data.len()));
    Ok(Page { data, meta })
}

/// Decode a detail body into a single entity.
pub fn decode_entity<T: DeserializeOwned>(
    resource: &'static str,
    body: &Value,
    names: &[&str],
) -> ApiResult<T> {
    let entity = EntityEnvelope::classify(body, names)
        .entity()
        .ok_or(ApiError::InvalidResponse { resource })?;
    serde_json::from_value(entity.clone()).map_err(|e| {
        crate::warn_log!("[ENVELOPE] {} response did not match schema: {}", resource, e);
        ApiError::InvalidResponse { resource }
    })
}

fn decode_rows<T: DeserializeOwned>(resource: &'static str, rows: &[Value]) -> ApiResult<Vec<T>> {
    rows.iter()
        .map(|row| {
            serde_json::from_value(row.clone()).map_err(|e| {
                crate::warn_log!("[ENVELOPE] {} row did not match schema: {}", resource, e);
                ApiError::InvalidResponse { resource }
            })
        })
        .collect()
}

/// `meta` object, nested paginator fields, or top-level paginator fields
fn find_meta(body: &Value) -> Option<PaginationMeta> {
    let candidates = [body.get("meta"), body.get("data"), Some(body)];
    candidates
        .into_iter()
        .flatten()
        .filter(|candidate| candidate.get("current_page").is_some())
        .find_map(|candidate| serde_json::from_value(candidate.clone()).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: u64,
    }

    #[test]
    fn classifies_list_shapes_in_order() {
        let bare = json!([{"id": 1}]);
        assert!(matches!(ListEnvelope::classify(&bare, &["rows"]), ListEnvelope::Bare(_)));

        let data = json!({"data": [{"id": 1}], "rows": []});
        assert!(matches!(ListEnvelope::classify(&data, &["rows"]), ListEnvelope::Data(_)));

        let nested = json!({"data": {"data": [{"id": 1}], "current_page": 1}});
        assert!(matches!(
            ListEnvelope::classify(&nested, &["rows"]),
            ListEnvelope::NestedData(_)
        ));

        let named = json!({"rows": [{"id": 1}]});
        assert_eq!(
            ListEnvelope::classify(&named, &["rows"]),
            ListEnvelope::Named("rows", named["rows"].as_array().unwrap().as_slice())
        );
    }

    #[test]
    fn missing_array_is_empty_list() {
        let rows: Vec<Row> = decode_list("row", &json!({"message": "ok"}), &["rows"]).unwrap();
        assert!(rows.is_empty());
        let rows: Vec<Row> = decode_list("row", &Value::Null, &["rows"]).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn malformed_row_is_invalid_response() {
        let err = decode_list::<Row>("row", &json!([{"name": "x"}]), &[]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid row response");
    }

    #[test]
    fn page_meta_from_meta_or_paginator() {
        let body = json!({
            "data": [{"id": 1}, {"id": 2}],
            "meta": {"current_page": 2, "per_page": 2, "total": 6, "last_page": 3}
        });
        let page: Page<Row> = decode_page("row", &body, &[]).unwrap();
        assert_eq!(page.meta.current_page, 2);
        assert!(page.meta.has_next());

        let body = json!({"data": {"data": [{"id": 1}], "current_page": 1, "per_page": 15, "total": 1, "last_page": 1}});
        let page: Page<Row> = decode_page("row", &body, &[]).unwrap();
        assert_eq!(page.meta.total, 1);

        let page: Page<Row> = decode_page("row", &json!([{"id": 5}]), &[]).unwrap();
        assert_eq!(page.meta, PaginationMeta::single_page(1));
    }

    #[test]
    fn entity_shapes() {
        let named = json!({"row": {"id": 3}, "message": "ok"});
        assert_eq!(decode_entity::<Row>("row", &named, &["row"]).unwrap(), Row { id: 3 });

        let data_named = json!({"data": {"row": {"id": 4}}});
        assert_eq!(decode_entity::<Row>("row", &data_named, &["row"]).unwrap(), Row { id: 4 });

        let data = json!({"data": {"id": 5}});
        assert_eq!(decode_entity::<Row>("row", &data, &["row"]).unwrap(), Row { id: 5 });

        let bare = json!({"id": 6});
        assert_eq!(decode_entity::<Row>("row", &bare, &["row"]).unwrap(), Row { id: 6 });

        let err = decode_entity::<Row>("row", &json!([1, 2]), &["row"]).unwrap_err();
        assert_eq!(err, ApiError::InvalidResponse { resource: "row" });
    }
}
