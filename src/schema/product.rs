use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::CategorySummary;

/// GST tax slab applied to a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value", into = "u8")]
pub enum GstSlab {
    #[default]
    Zero,
    Five,
    Eighteen,
}

impl GstSlab {
    pub const ALL: [GstSlab; 3] = [GstSlab::Zero, GstSlab::Five, GstSlab::Eighteen];

    pub fn percent(&self) -> u8 {
        match self {
            GstSlab::Zero => 0,
            GstSlab::Five => 5,
            GstSlab::Eighteen => 18,
        }
    }
}

impl TryFrom<u8> for GstSlab {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(GstSlab::Zero),
            5 => Ok(GstSlab::Five),
            18 => Ok(GstSlab::Eighteen),
            other => Err(format!("GST must be 0, 5 or 18, got {other}")),
        }
    }
}

impl TryFrom<serde_json::Value> for GstSlab {
    type Error = String;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        let number = match &value {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
            serde_json::Value::Null => Some(0.0),
            _ => None,
        }
        .ok_or_else(|| format!("invalid GST value {value}"))?;

        if number.fract() != 0.0 || !(0.0..=u8::MAX as f64).contains(&number) {
            return Err(format!("invalid GST value {value}"));
        }
        GstSlab::try_from(number as u8)
    }
}

impl From<GstSlab> for u8 {
    fn from(slab: GstSlab) -> Self {
        slab.percent()
    }
}

/// One image in a product's gallery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: u64,
    pub image_url: String,
    #[serde(default, deserialize_with = "super::count")]
    pub sort_order: u32,
    #[serde(default, deserialize_with = "super::flag")]
    pub is_primary: bool,
    #[serde(default)]
    pub alt_text: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A product as returned by `/products`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(deserialize_with = "super::money")]
    pub price: f64,
    #[serde(deserialize_with = "super::money")]
    pub selling_price: f64,
    #[serde(default, deserialize_with = "super::opt_money")]
    pub market_price: Option<f64>,
    pub category_id: u64,
    #[serde(default)]
    pub category: Option<CategorySummary>,
    #[serde(default, deserialize_with = "super::count")]
    pub stock: u32,
    #[serde(default, deserialize_with = "super::flag")]
    pub is_available: bool,
    #[serde(default)]
    pub gst: GstSlab,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Product {
    /// The image flagged primary, falling back to the lowest sort order
    pub fn primary_image(&self) -> Option<&ProductImage> {
        self.images
            .iter()
            .find(|image| image.is_primary)
            .or_else(|| self.images.iter().min_by_key(|image| image.sort_order))
    }

    /// Gallery sorted by `sort_order`
    pub fn sorted_images(&self) -> Vec<&ProductImage> {
        let mut images: Vec<_> = self.images.iter().collect();
        images.sort_by_key(|image| (image.sort_order, image.id));
        images
    }

    /// Discount against the list price, in percent
    pub fn discount_percent(&self) -> f64 {
        if self.price <= 0.0 {
            return 0.0;
        }
        ((self.price - self.selling_price) / self.price * 100.0).max(0.0)
    }
}

/// Body of `POST /products` and `PUT /products/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_selling_price"))]
pub struct ProductPayload {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(range(min = 0.0))]
    pub selling_price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub market_price: Option<f64>,
    #[validate(range(min = 1))]
    pub category_id: u64,
    #[validate(range(min = 0))]
    pub stock: i64,
    pub is_available: bool,
    pub gst: GstSlab,
}

fn validate_selling_price(payload: &ProductPayload) -> Result<(), ValidationError> {
    let prices = [payload.price, payload.selling_price, payload.market_price.unwrap_or(0.0)];
    if !prices.iter().all(|price| price.is_finite()) {
        return Err(ValidationError::new("not_finite"));
    }
    if payload.selling_price > payload.price {
        let mut error = ValidationError::new("selling_price");
        error.message = Some("Selling price must be less than or equal to price".into());
        return Err(error);
    }
    Ok(())
}

/// A file to attach to a product's gallery
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Body of `PUT /products/{id}/images/order`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ImageOrderPayload {
    #[validate(length(min = 1))]
    pub image_ids: Vec<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product_json() -> serde_json::Value {
        json!({
            "id": 12,
            "name": "Sourdough",
            "price": "120.00",
            "selling_price": "99.50",
            "market_price": null,
            "category_id": 3,
            "stock": "8",
            "is_available": 1,
            "gst": "5",
            "images": [
                {"id": 1, "image_url": "a.jpg", "sort_order": 2, "is_primary": 0},
                {"id": 2, "image_url": "b.jpg", "sort_order": 1, "is_primary": 1}
            ]
        })
    }

    #[test]
    fn decodes_decimal_strings_and_flags() {
        let product: Product = serde_json::from_value(product_json()).unwrap();
        assert_eq!(product.price, 120.0);
        assert_eq!(product.selling_price, 99.5);
        assert_eq!(product.market_price, None);
        assert_eq!(product.stock, 8);
        assert!(product.is_available);
        assert_eq!(product.gst, GstSlab::Five);
        assert_eq!(product.primary_image().map(|i| i.id), Some(2));
    }

    #[test]
    fn rejects_unknown_gst_slab() {
        let mut value = product_json();
        value["gst"] = json!(12);
        assert!(serde_json::from_value::<Product>(value).is_err());
    }

    #[test]
    fn gst_serializes_as_number() {
        assert_eq!(serde_json::to_value(GstSlab::Eighteen).unwrap(), json!(18));
    }

    #[test]
    fn payload_rejects_selling_above_price() {
        let payload = ProductPayload {
            name: "Croissant".into(),
            slug: None,
            description: None,
            price: 40.0,
            selling_price: 45.0,
            market_price: None,
            category_id: 2,
            stock: 10,
            is_available: true,
            gst: GstSlab::Zero,
        };
        assert!(payload.validate().is_err());

        let payload = ProductPayload {
            selling_price: 40.0,
            ..payload
        };
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn payload_rejects_non_finite_prices() {
        let payload = ProductPayload {
            name: "Croissant".into(),
            slug: None,
            description: None,
            price: f64::NAN,
            selling_price: 10.0,
            market_price: None,
            category_id: 2,
            stock: 10,
            is_available: true,
            gst: GstSlab::Zero,
        };
        assert!(payload.validate().is_err());

        let payload = ProductPayload {
            price: 40.0,
            selling_price: f64::NAN,
            ..payload
        };
        assert!(payload.validate().is_err());
    }
}
