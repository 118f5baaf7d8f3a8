use chrono::{DateTime, Duration, SubsecRound, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub quantity: i32,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /products` and `PUT /products/{id}`.
///
/// Every field is optional here so that validation can report all the
/// problems of a request at once instead of failing on the first missing
/// key. Fields the API does not accept (`id`, timestamps) are ignored.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct ProductPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ProductPayload {
    /// Fills every omitted field with the value currently stored, which gives
    /// `PUT` its partial-update semantics.
    pub fn merged_with(&self, current: &Product) -> ProductPayload {
        ProductPayload {
            name: Some(self.name.clone().unwrap_or_else(|| current.name.clone())),
            description: Some(
                self.description
                    .clone()
                    .unwrap_or_else(|| current.description.clone()),
            ),
            price: Some(self.price.unwrap_or(current.price)),
            quantity: Some(self.quantity.unwrap_or(i64::from(current.quantity))),
            category: Some(
                self.category
                    .clone()
                    .unwrap_or_else(|| current.category.clone()),
            ),
        }
    }
}

impl From<&NewProduct> for ProductPayload {
    fn from(product: &NewProduct) -> Self {
        ProductPayload {
            name: Some(product.name.clone()),
            description: Some(product.description.clone()),
            price: Some(product.price),
            quantity: Some(i64::from(product.quantity)),
            category: Some(product.category.clone()),
        }
    }
}

/// A field set that already passed validation. Stores only accept this.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub quantity: i32,
    pub category: String,
}

/// Current time at the precision Postgres keeps for `TIMESTAMPTZ`.
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Timestamp for a mutation of a record last touched at `previous`; always
/// strictly later than `previous`.
pub fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = timestamp_now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn stored() -> Product {
        let at = timestamp_now();
        Product {
            id: 7,
            name: "Clean Code".to_string(),
            description: "Livro sobre boas práticas de programação".to_string(),
            price: dec!(49.99),
            quantity: 50,
            category: "Livros".to_string(),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn merge_keeps_omitted_fields() {
        let patch = ProductPayload {
            quantity: Some(40),
            ..Default::default()
        };
        let merged = patch.merged_with(&stored());
        assert_eq!(merged.name.as_deref(), Some("Clean Code"));
        assert_eq!(merged.price, Some(dec!(49.99)));
        assert_eq!(merged.quantity, Some(40));
        assert_eq!(merged.category.as_deref(), Some("Livros"));
    }

    #[test]
    fn merge_lets_blank_category_through() {
        let patch = ProductPayload {
            category: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(patch.merged_with(&stored()).category.as_deref(), Some("  "));
    }

    #[test]
    fn next_timestamp_is_strictly_later() {
        let future = Utc::now() + Duration::seconds(60);
        assert!(next_timestamp(future) > future);
        let past = Utc::now() - Duration::seconds(60);
        assert!(next_timestamp(past) > past);
    }

    #[test]
    fn payload_accepts_numbers_and_ignores_server_fields() {
        let payload: ProductPayload = serde_json::from_str(
            r#"{"id": 99, "name": "Clean Code", "price": 49.99, "quantity": 50, "created_at": "x"}"#,
        )
        .unwrap();
        assert_eq!(payload.price, Some(dec!(49.99)));
        assert_eq!(payload.quantity, Some(50));
        assert_eq!(payload.category, None);
    }
}
