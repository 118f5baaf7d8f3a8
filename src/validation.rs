use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{NewProduct, ProductPayload};

pub const DEFAULT_CATEGORY: &str = "Geral";

pub const CATEGORIES: [&str; 11] = [
    "Eletrônicos",
    "Livros",
    "Roupas",
    "Casa e Jardim",
    "Esportes",
    "Brinquedos",
    "Automotivo",
    "Saúde e Beleza",
    "Alimentos & Bebidas",
    "Materiais de Escritório",
    DEFAULT_CATEGORY,
];

const MAX_NAME_CHARS: usize = 255;
const MAX_CATEGORY_CHARS: usize = 255;
const MAX_PRICE_SCALE: u32 = 2;

/// Field name -> messages, serialized as a plain JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Takes the messages of `other` for fields not reported yet.
    pub fn absorb(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_insert(messages);
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationRules {
    pub default_category: String,
    /// `None` keeps the category as free text.
    pub allowed_categories: Option<Vec<String>>,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self::strict()
    }
}

impl ValidationRules {
    /// Categories restricted to [`CATEGORIES`].
    pub fn strict() -> Self {
        ValidationRules {
            default_category: DEFAULT_CATEGORY.to_string(),
            allowed_categories: Some(CATEGORIES.iter().map(|c| c.to_string()).collect()),
        }
    }

    pub fn free_text() -> Self {
        ValidationRules {
            default_category: DEFAULT_CATEGORY.to_string(),
            allowed_categories: None,
        }
    }

    pub fn is_allowed_category(&self, category: &str) -> bool {
        match &self.allowed_categories {
            Some(allowed) => allowed.iter().any(|c| c == category),
            None => true,
        }
    }

    pub fn validate(&self, payload: &ProductPayload) -> Result<NewProduct, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = payload.name.as_deref().map(str::trim).unwrap_or_default();
        if name.is_empty() {
            errors.add("name", "el nombre es obligatorio");
        } else if name.chars().count() > MAX_NAME_CHARS {
            errors.add(
                "name",
                format!("el nombre no puede superar los {} caracteres", MAX_NAME_CHARS),
            );
        }

        let description = payload
            .description
            .as_deref()
            .map(str::trim)
            .unwrap_or_default();

        let price = match payload.price {
            None => {
                errors.add("price", "el precio es obligatorio");
                None
            }
            Some(price) if price <= Decimal::ZERO => {
                errors.add("price", "el precio debe ser mayor que 0");
                None
            }
            Some(price) if price.normalize().scale() > MAX_PRICE_SCALE => {
                errors.add("price", "el precio admite como máximo 2 decimales");
                None
            }
            Some(price) if price >= Decimal::from(100_000_000) => {
                errors.add("price", "el precio debe ser menor que 100000000");
                None
            }
            Some(price) => Some(price),
        };

        let quantity = match payload.quantity {
            None => {
                errors.add("quantity", "la cantidad es obligatoria");
                None
            }
            Some(quantity) if quantity < 0 => {
                errors.add("quantity", "la cantidad no puede ser negativa");
                None
            }
            Some(quantity) => match i32::try_from(quantity) {
                Ok(quantity) => Some(quantity),
                Err(_) => {
                    errors.add("quantity", "la cantidad es demasiado grande");
                    None
                }
            },
        };

        let category = match payload.category.as_deref().map(str::trim) {
            None | Some("") => self.default_category.clone(),
            Some(category) => {
                if category.chars().count() > MAX_CATEGORY_CHARS {
                    errors.add(
                        "category",
                        format!(
                            "la categoría no puede superar los {} caracteres",
                            MAX_CATEGORY_CHARS
                        ),
                    );
                } else if !self.is_allowed_category(category) {
                    errors.add("category", format!("categoría no válida: {}", category));
                }
                category.to_string()
            }
        };

        match (price, quantity) {
            (Some(price), Some(quantity)) if errors.is_empty() => Ok(NewProduct {
                name: name.to_string(),
                description: description.to_string(),
                price,
                quantity,
                category,
            }),
            _ => Err(errors),
        }
    }
}
