//! JSON body used to create or replace a product.

use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use crate::domain::product::{NewProduct, UpdateProduct};
use crate::domain::types::{ImageUrl, Price, ProductName};
use crate::forms::FormError;

/// Raw product body. Every field is optional at this stage so that a missing
/// field becomes a `400` instead of a deserialization failure.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ProductForm {
    #[serde(default)]
    #[validate(length(max = 255))]
    pub name: String,
    /// Accepts a JSON number or a decimal string.
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    #[validate(length(max = 2048))]
    pub image: String,
}

/// Validated product fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPayload {
    pub name: ProductName,
    pub price: Price,
    pub image: ImageUrl,
}

fn price_is_blank(value: &Option<Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(raw)) => raw.trim().is_empty(),
        Some(_) => false,
    }
}

fn parse_price(value: &Value) -> Result<Price, FormError> {
    match value {
        Value::Number(number) => number
            .to_string()
            .parse()
            .map_err(|_| FormError::InvalidPrice),
        Value::String(raw) => raw.parse().map_err(|_| FormError::InvalidPrice),
        _ => Err(FormError::InvalidPrice),
    }
}

impl TryFrom<ProductForm> for ProductPayload {
    type Error = FormError;

    fn try_from(form: ProductForm) -> Result<Self, Self::Error> {
        if form.name.trim().is_empty() || form.image.trim().is_empty() || price_is_blank(&form.price)
        {
            return Err(FormError::MissingFields);
        }

        form.validate()?;

        let price = form
            .price
            .as_ref()
            .ok_or(FormError::MissingFields)
            .and_then(parse_price)?;
        if price.is_zero() {
            return Err(FormError::MissingFields);
        }

        Ok(Self {
            name: ProductName::new(form.name).map_err(|_| FormError::InvalidName)?,
            price,
            image: ImageUrl::new(form.image).map_err(|_| FormError::InvalidImage)?,
        })
    }
}

impl ProductPayload {
    pub fn into_new_product(self) -> NewProduct {
        NewProduct::new(self.name, self.price, self.image)
    }

    pub fn into_update(self) -> UpdateProduct {
        UpdateProduct {
            name: self.name,
            price: self.price,
            image: self.image,
        }
    }
}
