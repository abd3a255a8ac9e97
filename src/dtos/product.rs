// src/dtos/product.rs
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::product::{NewProduct, Product};

pub const NAME_MAX_LEN: usize = 100;
pub const SKU_MAX_LEN: usize = 50;
pub const CATEGORY_MAX_LEN: usize = 50;

/// `NUMERIC(10, 2)` leaves eight digits before the decimal point.
const PRICE_INTEGER_DIGITS: u32 = 8;
const PRICE_SCALE: u32 = 2;

/// Raw product form as submitted by the add and update pages.
///
/// Every field is optional text so that a missing or malformed field becomes
/// a validation message instead of an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductForm {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<String>,
    pub price: Option<String>,
}

impl ProductForm {
    /// Parse and validate into the typed field set, collecting every problem.
    pub fn validate(&self) -> Result<NewProduct, Vec<String>> {
        let mut errors = Vec::new();

        let name = required_text(&self.name, "Name", NAME_MAX_LEN, &mut errors);
        let sku = required_text(&self.sku, "SKU", SKU_MAX_LEN, &mut errors);

        let category = match trimmed(&self.category) {
            "" => None,
            value if value.chars().count() > CATEGORY_MAX_LEN => {
                errors.push(format!("Category must be at most {CATEGORY_MAX_LEN} characters"));
                None
            }
            value => Some(value.to_string()),
        };

        let quantity = match trimmed(&self.quantity) {
            "" => 0,
            value => value.parse::<i32>().unwrap_or_else(|_| {
                errors.push(format!("Quantity must be a whole number, got '{value}'"));
                0
            }),
        };

        let price = parse_price(trimmed(&self.price)).unwrap_or_else(|msg| {
            errors.push(msg);
            Decimal::ZERO
        });

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(NewProduct {
            name,
            sku,
            category,
            quantity,
            price,
        })
    }
}

impl From<&Product> for ProductForm {
    fn from(product: &Product) -> Self {
        Self {
            name: Some(product.name.clone()),
            sku: Some(product.sku.clone()),
            category: product.category.clone(),
            quantity: Some(product.quantity.to_string()),
            price: Some(product.price.to_string()),
        }
    }
}

fn trimmed(value: &Option<String>) -> &str {
    value.as_deref().map(str::trim).unwrap_or("")
}

fn required_text(
    value: &Option<String>,
    label: &str,
    max_len: usize,
    errors: &mut Vec<String>,
) -> String {
    let value = trimmed(value);
    if value.is_empty() {
        errors.push(format!("{label} is required"));
    } else if value.chars().count() > max_len {
        errors.push(format!("{label} must be at most {max_len} characters"));
    }
    value.to_string()
}

fn parse_price(value: &str) -> Result<Decimal, String> {
    if value.is_empty() {
        return Err("Price is required".to_string());
    }

    if !is_plain_decimal(value) {
        return Err(format!("Price must be a decimal number, got '{value}'"));
    }
    // Checked on the text: `Decimal` parsing rounds past 28 significant digits.
    let fraction = value.split_once('.').map(|(_, f)| f).unwrap_or("");
    if fraction.trim_end_matches('0').len() > PRICE_SCALE as usize {
        return Err("Price can have at most 2 decimal places".to_string());
    }

    let price: Decimal = value
        .parse()
        .map_err(|_| format!("Price must be a decimal number, got '{value}'"))?;

    if price.is_sign_negative() && !price.is_zero() {
        return Err("Price cannot be negative".to_string());
    }
    let mut price = price;
    price.rescale(PRICE_SCALE);
    if price.trunc() >= Decimal::from(10_i64.pow(PRICE_INTEGER_DIGITS)) {
        return Err("Price must be below 100000000".to_string());
    }

    Ok(price)
}

/// Optional sign, digits, at most one `.`, at least one digit.
fn is_plain_decimal(value: &str) -> bool {
    let unsigned = value.strip_prefix(&['-', '+'][..]).unwrap_or(value);
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    !(whole.is_empty() && fraction.is_empty())
        && whole.bytes().all(|b| b.is_ascii_digit())
        && fraction.bytes().all(|b| b.is_ascii_digit())
}

/// `?notice=` on the product list, set by the redirect after a save.
#[derive(Debug, Default, Deserialize)]
pub struct NoticeQuery {
    pub notice: Option<String>,
}

impl NoticeQuery {
    pub fn message(&self) -> Option<&'static str> {
        match self.notice.as_deref() {
            Some("added") => Some("Product added successfully!"),
            Some("updated") => Some("Product updated successfully!"),
            _ => None,
        }
    }
}
