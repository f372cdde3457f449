//! Product Models

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

/// Product identifier, assigned sequentially from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProductId(u64);

impl ProductId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ProductId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Price applied when a new product does not specify one.
#[must_use]
pub fn default_price() -> Decimal {
    Decimal::new(9999, 2)
}

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub content: Option<String>,
    /// Always carried with two decimal places.
    pub price: Decimal,
}

impl Product {
    /// 80% of the price, rounded to cents.
    #[must_use]
    pub fn sale_price(&self) -> Decimal {
        (self.price * Decimal::new(8, 1)).round_dp(2)
    }

    /// 20% of the price, rounded to cents.
    #[must_use]
    pub fn discount(&self) -> Decimal {
        (self.price * Decimal::new(2, 1)).round_dp(2)
    }

    pub(crate) fn apply(&mut self, update: ProductUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(content) = update.content {
            self.content = content;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
    }

    pub(crate) fn has_content(&self) -> bool {
        self.content.as_deref().is_some_and(|c| !c.is_empty())
    }
}

/// Validated data for a product that does not exist yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub title: String,
    pub content: Option<String>,
    pub price: Decimal,
}

/// Validated changes to an existing product. `None` leaves a field as is;
/// `content: Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    pub title: Option<String>,
    pub content: Option<Option<String>>,
    pub price: Option<Decimal>,
}

/// What a product's content becomes when it is missing or empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPolicy {
    /// Reuse the product title.
    Title,
    /// Use a fixed text.
    Placeholder(String),
}

impl ContentPolicy {
    #[must_use]
    pub fn content_for(&self, title: &str) -> String {
        match self {
            Self::Title => title.to_owned(),
            Self::Placeholder(text) => text.clone(),
        }
    }
}

/// What the `my_discount` field of a serialized product reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DiscountPolicy {
    /// The formatted sale price, same as `sale_price`.
    SalePrice,
    /// 20% of the price, as a number.
    Percentage,
}
