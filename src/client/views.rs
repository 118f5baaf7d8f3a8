//! State of each client screen, independent of how it is rendered.

use std::str::FromStr;

use log::warn;
use rust_decimal::Decimal;

use super::{ClientError, FallbackSource, RemoteSource, Sourced};
use crate::models::{Product, ProductPayload};
use crate::validation::{FieldErrors, ValidationRules};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    List,
    New,
    Detail(i64),
    Edit(i64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Ready(Sourced<T>),
    Failed(String),
}

impl<T> LoadState<T> {
    fn from_result(result: Result<Sourced<T>, ClientError>) -> Self {
        match result {
            Ok(sourced) => LoadState::Ready(sourced),
            Err(err) => LoadState::Failed(err.to_string()),
        }
    }

    pub fn warning(&self) -> Option<&str> {
        match self {
            LoadState::Ready(sourced) => sourced.warning.as_deref(),
            _ => None,
        }
    }
}

pub struct ListView {
    state: LoadState<Vec<Product>>,
}

impl Default for ListView {
    fn default() -> Self {
        Self::new()
    }
}

impl ListView {
    pub fn new() -> Self {
        ListView {
            state: LoadState::Loading,
        }
    }

    pub async fn load(&mut self, source: &FallbackSource) {
        self.state = LoadState::from_result(source.list().await);
    }

    /// Same as [`ListView::load`]; the explicit action offered next to the
    /// connectivity warning.
    pub async fn retry(&mut self, source: &FallbackSource) {
        self.load(source).await
    }

    pub fn state(&self) -> &LoadState<Vec<Product>> {
        &self.state
    }

    pub fn products(&self) -> &[Product] {
        match &self.state {
            LoadState::Ready(sourced) => &sourced.data,
            _ => &[],
        }
    }
}

pub struct DetailView {
    id: i64,
    state: LoadState<Product>,
}

impl DetailView {
    pub fn new(id: i64) -> Self {
        DetailView {
            id,
            state: LoadState::Loading,
        }
    }

    pub async fn load(&mut self, source: &FallbackSource) {
        self.state = LoadState::from_result(source.get(self.id).await);
    }

    pub fn state(&self) -> &LoadState<Product> {
        &self.state
    }

    pub fn product(&self) -> Option<&Product> {
        match &self.state {
            LoadState::Ready(sourced) => Some(&sourced.data),
            _ => None,
        }
    }

    pub fn edit_route(&self) -> Route {
        Route::Edit(self.id)
    }
}

/// Raw text of the create/edit form, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub quantity: String,
    pub category: String,
}

impl ProductForm {
    pub fn from_product(product: &Product) -> Self {
        ProductForm {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            quantity: product.quantity.to_string(),
            category: product.category.clone(),
        }
    }

    /// Parses the form and runs the same rules the API applies. The returned
    /// payload carries every field, so an edit replaces the whole record.
    pub fn to_payload(&self, rules: &ValidationRules) -> Result<ProductPayload, FieldErrors> {
        let mut errors = FieldErrors::new();

        let price = match self.price.trim() {
            "" => None,
            text => match Decimal::from_str(&text.replace(',', ".")) {
                Ok(price) => Some(price),
                Err(_) => {
                    errors.add("price", "el precio debe ser un número");
                    None
                }
            },
        };

        let quantity = match self.quantity.trim() {
            "" => None,
            text => match text.parse::<i64>() {
                Ok(quantity) => Some(quantity),
                Err(_) => {
                    errors.add("quantity", "la cantidad debe ser un número entero");
                    None
                }
            },
        };

        let raw = ProductPayload {
            name: Some(self.name.clone()),
            description: Some(self.description.clone()),
            price,
            quantity,
            category: Some(self.category.clone()),
        };

        match rules.validate(&raw) {
            Ok(product) if errors.is_empty() => Ok(ProductPayload::from(&product)),
            Ok(_) => Err(errors),
            Err(validation) => {
                errors.absorb(validation);
                Err(errors)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome {
    /// Confirmation state; the client then goes to `next`.
    Saved { product: Product, next: Route },
    /// Field errors, either found locally or returned by the API verbatim.
    Invalid(FieldErrors),
    Failed(String),
}

impl FormOutcome {
    fn from_result(result: Result<Product, ClientError>) -> Self {
        match result {
            Ok(product) => FormOutcome::Saved {
                product,
                next: Route::List,
            },
            Err(ClientError::Validation(errors)) => FormOutcome::Invalid(errors),
            Err(err) => FormOutcome::Failed(err.to_string()),
        }
    }
}

pub async fn submit_create(
    remote: &RemoteSource,
    rules: &ValidationRules,
    form: &ProductForm,
) -> FormOutcome {
    match form.to_payload(rules) {
        Ok(payload) => FormOutcome::from_result(remote.create(&payload).await),
        Err(errors) => FormOutcome::Invalid(errors),
    }
}

pub async fn submit_update(
    remote: &RemoteSource,
    rules: &ValidationRules,
    id: i64,
    form: &ProductForm,
) -> FormOutcome {
    match form.to_payload(rules) {
        Ok(payload) => FormOutcome::from_result(remote.update(id, &payload).await),
        Err(errors) => FormOutcome::Invalid(errors),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    /// The user did not confirm; nothing was sent.
    Cancelled,
    Deleted { next: Route },
    /// The request failed but the client leaves the page anyway.
    NavigatedAway { next: Route, warning: String },
}

pub async fn delete_product(remote: &RemoteSource, id: i64, confirmed: bool) -> DeleteOutcome {
    if !confirmed {
        return DeleteOutcome::Cancelled;
    }
    match remote.delete(id).await {
        Ok(()) => DeleteOutcome::Deleted { next: Route::List },
        Err(err) => {
            warn!("No se pudo eliminar el producto {}: {}", id, err);
            DeleteOutcome::NavigatedAway {
                next: Route::List,
                warning: err.to_string(),
            }
        }
    }
}
