//! Validation of the raw form input submitted by the user.
//!
//! Form values arrive as untyped strings. They are checked here, field by field
//! in a fixed order, and either converted into typed values or rejected with a
//! [FieldError] naming the first field that failed.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::transaction::core::{CreateTransactionRequest, TransactionType};

/// The form fields that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// The description text box.
    Description,
    /// The price number input.
    Price,
    /// The category text box.
    Category,
    /// The income/outcome radio buttons.
    Type,
    /// The search box.
    Query,
}

impl FormField {
    /// The `name` attribute of the field's input element.
    pub fn name(self) -> &'static str {
        match self {
            FormField::Description => "description",
            FormField::Price => "price",
            FormField::Category => "category",
            FormField::Type => "type",
            FormField::Query => "q",
        }
    }
}

/// A form field that failed validation and the message to show the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    /// The first field that failed validation.
    pub field: FormField,
    /// What the user should fix, shown under the field.
    pub message: &'static str,
}

impl Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field.name(), self.message)
    }
}

impl std::error::Error for FieldError {}

pub const DESCRIPTION_REQUIRED: &str = "Description is required";
pub const PRICE_NOT_A_NUMBER: &str = "Price must be a number";
pub const PRICE_NEGATIVE: &str = "Price cannot be negative";
pub const CATEGORY_REQUIRED: &str = "Category is required";
pub const TYPE_INVALID: &str = "Type must be either income or outcome";
pub const QUERY_REQUIRED: &str = "Fill in the search field";

/// The raw form data for creating a transaction.
///
/// Every field defaults to empty so that a missing field is reported as a
/// validation error rather than rejected by the form extractor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewTransactionForm {
    /// What the transaction was for.
    #[serde(default)]
    pub description: String,
    /// The price as typed by the user.
    #[serde(default)]
    pub price: String,
    /// The category, e.g. "Housing".
    #[serde(default)]
    pub category: String,
    /// "income", "outcome", or unset.
    #[serde(default, rename = "type")]
    pub type_: Option<String>,
}

impl NewTransactionForm {
    /// Check the form and convert it into a request for the store.
    ///
    /// The rules are checked in order: description, price, category, type.
    /// An unset type defaults to income.
    ///
    /// # Errors
    /// Returns a [FieldError] for the first field that fails its rule.
    pub fn validate(&self) -> Result<CreateTransactionRequest, FieldError> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(FieldError {
                field: FormField::Description,
                message: DESCRIPTION_REQUIRED,
            });
        }

        let price = parse_price(&self.price)?;

        let category = self.category.trim();
        if category.is_empty() {
            return Err(FieldError {
                field: FormField::Category,
                message: CATEGORY_REQUIRED,
            });
        }

        let type_ = match self.type_.as_deref() {
            None | Some("") => TransactionType::default(),
            Some(type_) => TransactionType::parse(type_).ok_or(FieldError {
                field: FormField::Type,
                message: TYPE_INVALID,
            })?,
        };

        Ok(CreateTransactionRequest::new_unchecked(
            description,
            price,
            category,
            type_,
        ))
    }

    /// The transaction type the form should show as selected.
    pub fn selected_type(&self) -> TransactionType {
        self.type_
            .as_deref()
            .and_then(TransactionType::parse)
            .unwrap_or_default()
    }
}

fn parse_price(price: &str) -> Result<f64, FieldError> {
    let price: f64 = price.trim().parse().map_err(|_| FieldError {
        field: FormField::Price,
        message: PRICE_NOT_A_NUMBER,
    })?;

    if !price.is_finite() {
        return Err(FieldError {
            field: FormField::Price,
            message: PRICE_NOT_A_NUMBER,
        });
    }

    if price < 0.0 {
        return Err(FieldError {
            field: FormField::Price,
            message: PRICE_NEGATIVE,
        });
    }

    // "-0" parses as -0.0. Adding zero gives 0.0.
    Ok(price + 0.0)
}

/// The raw query string of the search form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchForm {
    /// The search text, `None` if the form was not submitted.
    pub q: Option<String>,
}

/// The outcome of checking the search form.
#[derive(Debug, Clone, PartialEq)]
pub enum Search {
    /// The form was not submitted, show every transaction.
    All,
    /// Show the transactions matching the trimmed query.
    Query(String),
}

impl SearchForm {
    /// Check the search query.
    ///
    /// # Errors
    /// Returns a [FieldError] if the form was submitted with a blank query.
    pub fn validate(&self) -> Result<Search, FieldError> {
        match self.q.as_deref() {
            None => Ok(Search::All),
            Some(query) => {
                let query = query.trim();

                if query.is_empty() {
                    Err(FieldError {
                        field: FormField::Query,
                        message: QUERY_REQUIRED,
                    })
                } else {
                    Ok(Search::Query(query.to_owned()))
                }
            }
        }
    }
}


#[cfg(test)]
mod search_form_tests {
    use super::{FieldError, FormField, QUERY_REQUIRED, Search, SearchForm};

    #[test]
    fn missing_query_shows_everything() {
        assert_eq!(SearchForm { q: None }.validate(), Ok(Search::All));
    }

    #[test]
    fn query_is_trimmed() {
        let form = SearchForm {
            q: Some("  groceries ".to_owned()),
        };

        assert_eq!(form.validate(), Ok(Search::Query("groceries".to_owned())));
    }

    #[test]
    fn blank_query_is_rejected() {
        let form = SearchForm {
            q: Some("   ".to_owned()),
        };

        assert_eq!(
            form.validate(),
            Err(FieldError {
                field: FormField::Query,
                message: QUERY_REQUIRED,
            })
        );
    }
}
