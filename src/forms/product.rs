use validator::{Validate, ValidationError};

use super::{EntityForm, FormMode, field_error, optional_text};
use crate::schema::{GstSlab, Product, ProductPayload};

pub const SELLING_PRICE_MESSAGE: &str = "Selling price must be less than or equal to price";

const GST_MESSAGE: &str = "GST must be 0, 5 or 18";

/// Errors are reported in form order; struct-level rules sit under `__all__`
const FIELD_ORDER: [&str; 7] = [
    "name",
    "price",
    "selling_price",
    "__all__",
    "market_price",
    "category_id",
    "stock",
];

/// Product create/edit form. Numeric inputs are bound as numbers.
#[derive(Debug, Clone, PartialEq, Validate)]
#[validate(schema(function = "selling_not_above_price"))]
pub struct ProductForm {
    #[validate(length(min = 1, message = "Product name is required"))]
    pub name: String,
    pub slug: String,
    pub description: String,
    #[validate(range(min = 0.0, message = "Price must be a non-negative number"))]
    pub price: f64,
    #[validate(range(min = 0.0, message = "Selling price must be a non-negative number"))]
    pub selling_price: f64,
    #[validate(range(min = 0.0, message = "Market price must be a non-negative number"))]
    pub market_price: Option<f64>,
    #[validate(required(message = "Category is required"))]
    pub category_id: Option<u64>,
    #[validate(range(min = 0, message = "Stock must be a non-negative integer"))]
    pub stock: i64,
    pub is_available: bool,
    /// Percent; one of 0, 5, 18
    pub gst: u8,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            slug: String::new(),
            description: String::new(),
            price: 0.0,
            selling_price: 0.0,
            market_price: None,
            category_id: None,
            stock: 0,
            is_available: true,
            gst: 0,
        }
    }
}

fn selling_not_above_price(form: &ProductForm) -> Result<(), ValidationError> {
    // NaN passes every range comparison
    let prices = [
        (form.price, "Price must be a non-negative number"),
        (form.selling_price, "Selling price must be a non-negative number"),
        (form.market_price.unwrap_or(0.0), "Market price must be a non-negative number"),
    ];
    if let Some((_, message)) = prices.into_iter().find(|(value, _)| !value.is_finite()) {
        let mut error = ValidationError::new("not_finite");
        error.message = Some(message.into());
        return Err(error);
    }
    if form.selling_price > form.price {
        let mut error = ValidationError::new("selling_price");
        error.message = Some(SELLING_PRICE_MESSAGE.into());
        return Err(error);
    }
    Ok(())
}

impl ProductForm {
    fn first_error(&self) -> Option<String> {
        if let Err(errors) = self.validate() {
            let message = FIELD_ORDER
                .into_iter()
                .find_map(|field| field_error(&errors, field));
            return Some(message.unwrap_or_else(|| errors.to_string()));
        }
        GstSlab::try_from(self.gst).err().map(|_| GST_MESSAGE.to_string())
    }
}

impl EntityForm for ProductForm {
    type Entity = Product;
    type Payload = ProductPayload;

    fn from_entity(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            slug: product.slug.clone().unwrap_or_default(),
            description: product.description.clone().unwrap_or_default(),
            price: product.price,
            selling_price: product.selling_price,
            market_price: product.market_price,
            category_id: Some(product.category_id),
            stock: i64::from(product.stock),
            is_available: product.is_available,
            gst: product.gst.percent(),
        }
    }

    fn to_payload(&self, _mode: FormMode) -> Result<ProductPayload, String> {
        let trimmed = Self {
            name: self.name.trim().to_string(),
            ..self.clone()
        };
        if let Some(message) = trimmed.first_error() {
            return Err(message);
        }

        let (Some(category_id), Ok(gst)) = (trimmed.category_id, GstSlab::try_from(trimmed.gst))
        else {
            return Err(GST_MESSAGE.to_string());
        };
        Ok(ProductPayload {
            name: trimmed.name,
            slug: optional_text(&self.slug),
            description: optional_text(&self.description),
            price: self.price,
            selling_price: self.selling_price,
            market_price: self.market_price,
            category_id,
            stock: self.stock,
            is_available: self.is_available,
            gst,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ProductForm {
        ProductForm {
            name: "Sourdough".into(),
            price: 120.0,
            selling_price: 99.0,
            category_id: Some(3),
            stock: 8,
            gst: 5,
            ..Default::default()
        }
    }

    #[test]
    fn selling_above_price_is_rejected() {
        let form = ProductForm {
            selling_price: 150.0,
            ..valid()
        };
        assert_eq!(form.to_payload(FormMode::Create).unwrap_err(), SELLING_PRICE_MESSAGE);
    }

    #[test]
    fn nan_prices_are_rejected() {
        let form = ProductForm {
            selling_price: f64::NAN,
            ..valid()
        };
        assert_eq!(
            form.to_payload(FormMode::Create).unwrap_err(),
            "Selling price must be a non-negative number"
        );

        let form = ProductForm {
            price: f64::NAN,
            ..valid()
        };
        assert_eq!(
            form.to_payload(FormMode::Edit).unwrap_err(),
            "Price must be a non-negative number"
        );

        let form = ProductForm {
            market_price: Some(f64::INFINITY),
            ..valid()
        };
        assert!(form.to_payload(FormMode::Create).is_err());
    }

    #[test]
    fn first_error_follows_field_order() {
        let form = ProductForm {
            name: String::new(),
            stock: -1,
            category_id: None,
            ..valid()
        };
        assert_eq!(form.to_payload(FormMode::Create).unwrap_err(), "Product name is required");

        let form = ProductForm {
            stock: -1,
            category_id: None,
            ..valid()
        };
        assert_eq!(form.to_payload(FormMode::Create).unwrap_err(), "Category is required");
    }

    #[test]
    fn gst_outside_slabs_is_rejected() {
        let form = ProductForm { gst: 12, ..valid() };
        assert_eq!(form.to_payload(FormMode::Edit).unwrap_err(), GST_MESSAGE);
    }

    #[test]
    fn valid_form_builds_payload() {
        let payload = valid().to_payload(FormMode::Create).unwrap();
        assert_eq!(payload.gst, GstSlab::Five);
        assert_eq!(payload.category_id, 3);
        assert_eq!(payload.slug, None);
    }
}
