//! Product payload validation.
//!
//! Turns a decoded JSON body into [`NewProduct`] or [`ProductUpdate`],
//! collecting every problem per field instead of stopping at the first one.
//! Read-only and unknown fields are ignored.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::products::models::{NewProduct, ProductUpdate, default_price};

const TITLE_MAX_CHARS: usize = 120;
const PRICE_MAX_DIGITS: u32 = 15;
const PRICE_DECIMAL_PLACES: u32 = 2;

const REQUIRED: &str = "This field is required.";
const NOT_NULL: &str = "This field may not be null.";
const NOT_BLANK: &str = "This field may not be blank.";
const NOT_A_STRING: &str = "Not a valid string.";
const NOT_A_NUMBER: &str = "A valid number is required.";

/// Key under which errors that concern the whole payload are reported.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Field name → messages, serialized as a plain JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    /// Errors with a single payload-level message.
    pub fn non_field(message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add(NON_FIELD_ERRORS, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_owned()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&[String]> {
        self.0.get(name).map(Vec::as_slice)
    }

    fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Which fields an update must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// `PUT`: `title` is required.
    Full,
    /// `PATCH`: every field is optional.
    Partial,
}

/// Validates the payload of a create request.
pub fn new_product(payload: &Value) -> Result<NewProduct, ValidationErrors> {
    let object = expect_object(payload)?;
    let mut errors = ValidationErrors::default();

    let title = title(object.get("title"), true, &mut errors);
    let content = content(object.get("content"), &mut errors);
    let price = price(object.get("price"), &mut errors);

    errors.into_result(NewProduct {
        title: title.unwrap_or_default(),
        content: content.flatten(),
        price: price.unwrap_or_else(default_price),
    })
}

/// Validates the payload of an update request.
pub fn product_update(payload: &Value, mode: UpdateMode) -> Result<ProductUpdate, ValidationErrors> {
    let object = expect_object(payload)?;
    let mut errors = ValidationErrors::default();

    let title = title(object.get("title"), mode == UpdateMode::Full, &mut errors);
    let content = content(object.get("content"), &mut errors);
    let price = price(object.get("price"), &mut errors);

    errors.into_result(ProductUpdate { title, content, price })
}

/// Rejects anything but a JSON object.
pub fn expect_object(payload: &Value) -> Result<&Map<String, Value>, ValidationErrors> {
    payload.as_object().ok_or_else(|| {
        ValidationErrors::non_field(format!(
            "Invalid data. Expected a dictionary, but got {}.",
            kind(payload)
        ))
    })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

/// Strings are trimmed; numbers are accepted as their decimal text.
fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_owned()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn title(value: Option<&Value>, required: bool, errors: &mut ValidationErrors) -> Option<String> {
    let value = match value {
        None if required => {
            errors.add("title", REQUIRED);
            return None;
        }
        None => return None,
        Some(Value::Null) => {
            errors.add("title", NOT_NULL);
            return None;
        }
        Some(value) => value,
    };

    let Some(text) = as_text(value) else {
        errors.add("title", NOT_A_STRING);
        return None;
    };

    if text.is_empty() {
        errors.add("title", NOT_BLANK);
        return None;
    }

    if text.chars().count() > TITLE_MAX_CHARS {
        errors.add(
            "title",
            format!("Ensure this field has no more than {TITLE_MAX_CHARS} characters."),
        );
        return None;
    }

    Some(text)
}

/// `None`: absent. `Some(None)`: explicit null.
fn content(value: Option<&Value>, errors: &mut ValidationErrors) -> Option<Option<String>> {
    match value? {
        Value::Null => Some(None),
        value => match as_text(value) {
            Some(text) => Some(Some(text)),
            None => {
                errors.add("content", NOT_A_STRING);
                None
            }
        },
    }
}

fn price(value: Option<&Value>, errors: &mut ValidationErrors) -> Option<Decimal> {
    let value = value?;

    if value.is_null() {
        errors.add("price", NOT_NULL);
        return None;
    }

    let Some(text) = as_text(value) else {
        errors.add("price", NOT_A_NUMBER);
        return None;
    };

    let Some(parsed) = parse_decimal(&text) else {
        // Well-formed but outside `Decimal` range.
        let message = if is_number_syntax(&text) {
            too_many_digits()
        } else {
            NOT_A_NUMBER.to_owned()
        };
        errors.add("price", message);
        return None;
    };

    let problems = precision_errors(parsed);
    if !problems.is_empty() {
        for message in problems {
            errors.add("price", message);
        }
        return None;
    }

    let mut price = parsed;
    price.rescale(PRICE_DECIMAL_PLACES);
    Some(price)
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Plain or scientific decimal notation, of any magnitude.
fn is_number_syntax(text: &str) -> bool {
    let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());

    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (unsigned, None),
    };
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    let exponent_ok = exponent.is_none_or(|exponent| {
        let exponent = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);
        !exponent.is_empty() && digits(exponent)
    });

    !(whole.is_empty() && fraction.is_empty()) && digits(whole) && digits(fraction) && exponent_ok
}

fn too_many_digits() -> String {
    format!("Ensure that there are no more than {PRICE_MAX_DIGITS} digits in total.")
}

/// Checks a price against 15 significant digits with at most 2 of them
/// after the decimal point.
fn precision_errors(value: Decimal) -> Vec<String> {
    let decimals = value.scale();
    let mantissa_digits = value.mantissa().unsigned_abs().to_string().len() as u32;
    let digits = mantissa_digits.max(decimals);
    let whole_digits = digits - decimals;
    let max_whole_digits = PRICE_MAX_DIGITS - PRICE_DECIMAL_PLACES;

    let mut messages = Vec::new();

    if digits > PRICE_MAX_DIGITS {
        messages.push(too_many_digits());
    } else if decimals > PRICE_DECIMAL_PLACES {
        messages.push(format!(
            "Ensure that there are no more than {PRICE_DECIMAL_PLACES} decimal places."
        ));
    } else if whole_digits > max_whole_digits {
        messages.push(format!(
            "Ensure that there are no more than {max_whole_digits} digits before the decimal point."
        ));
    }

    messages
}
