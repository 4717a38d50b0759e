//! # Validation Module
//!
//! Form checks run before a create or update request is built.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Operator input                                               │
//! │  └── THIS MODULE: required fields, ranges, formats                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: smartstock-client                                            │
//! │  └── Refuses to send a body that failed Layer 1                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend                                                      │
//! │  └── Its own checks; failures come back as `{"error": ...}`           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use smartstock_core::validation::{validate_product_name, validate_user_id};
//!
//! assert!(validate_product_name("Yerba 1kg").is_ok());
//! assert!(validate_product_name("  ").is_err());
//! assert!(validate_user_id(0).is_err());
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{CreateExpense, CreateProduct, CreateProvider, UpdateExpense};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 200;
const MAX_BARCODE_LEN: usize = 64;

// =============================================================================
// Field Validators
// =============================================================================

fn required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(())
}

fn max_len(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    if value.trim().chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }
    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    required("name", name)?;
    max_len("name", name, MAX_NAME_LEN)
}

/// Validates a barcode: required, at most 64 characters, no whitespace inside.
pub fn validate_barcode(barcode: &str) -> ValidationResult<()> {
    required("barcode", barcode)?;
    max_len("barcode", barcode, MAX_BARCODE_LEN)?;

    if barcode.trim().chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: "barcode".to_string(),
            reason: "must not contain spaces".to_string(),
        });
    }
    Ok(())
}

/// Validates a price. Zero is allowed.
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }
    Ok(())
}

/// Validates a stock count. Zero is allowed.
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }
    Ok(())
}

/// Validates an expense amount (strictly positive).
pub fn validate_amount(amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }
    Ok(())
}

/// Validates the operator's user id.
pub fn validate_user_id(user_id: i64) -> ValidationResult<()> {
    if user_id <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "user_id".to_string(),
        });
    }
    Ok(())
}

/// Validates a `YYYY-MM-DD` date.
pub fn validate_date(field: &str, value: &str) -> ValidationResult<()> {
    required(field, value)?;
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "expected YYYY-MM-DD".to_string(),
        })
}

/// Validates an e-mail address loosely: one `@`, a non-empty local part and a
/// dotted domain.
///
/// ## Example
/// ```rust
/// use smartstock_core::validation::validate_email;
///
/// assert!(validate_email("ventas@distribuidora.com").is_ok());
/// assert!(validate_email("ventas@localhost").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    required("contact_email", email)?;

    let invalid = || ValidationError::InvalidFormat {
        field: "contact_email".to_string(),
        reason: "not an e-mail address".to_string(),
    };

    let email = email.trim();
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    let dotted = domain
        .split('.')
        .all(|part| !part.is_empty())
        && domain.contains('.');

    if local.is_empty() || domain.contains('@') || !dotted || email.contains(char::is_whitespace) {
        return Err(invalid());
    }
    Ok(())
}

// =============================================================================
// Form Validators
// =============================================================================

pub fn validate_product(product: &CreateProduct) -> ValidationResult<()> {
    validate_product_name(&product.name)?;
    validate_barcode(&product.barcode)?;
    validate_price(product.price)?;
    validate_stock(product.stock)?;
    required("category", &product.category)
}

pub fn validate_provider(provider: &CreateProvider) -> ValidationResult<()> {
    required("name", &provider.name)?;
    max_len("name", &provider.name, MAX_NAME_LEN)?;
    validate_email(&provider.contact_email)?;
    required("phone_number", &provider.phone_number)?;
    required("address", &provider.address)
}

pub fn validate_expense(expense: &CreateExpense) -> ValidationResult<()> {
    required("description", &expense.description)?;
    required("category", &expense.category)?;
    validate_amount(expense.amount)?;
    validate_date("expense_date", &expense.expense_date)?;
    validate_user_id(expense.user_id)
}

/// Checks only the fields being changed; an empty update is refused.
pub fn validate_expense_update(update: &UpdateExpense) -> ValidationResult<()> {
    if update.is_empty() {
        return Err(ValidationError::required("update fields"));
    }
    if let Some(description) = &update.description {
        required("description", description)?;
    }
    if let Some(category) = &update.category {
        required("category", category)?;
    }
    if let Some(amount) = update.amount {
        validate_amount(amount)?;
    }
    if let Some(date) = &update.expense_date {
        validate_date("expense_date", date)?;
    }
    if let Some(user_id) = update.user_id {
        validate_user_id(user_id)?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> CreateProduct {
        CreateProduct {
            name: "Yerba 1kg".to_string(),
            barcode: "7790387000112".to_string(),
            price: Money::from_cents(245050),
            stock: 10,
            category: "Almacen".to_string(),
            url_image: None,
        }
    }

    fn expense() -> CreateExpense {
        CreateExpense {
            description: "Artículos de limpieza".to_string(),
            category: "limpieza".to_string(),
            amount: Money::from_cents(12000),
            expense_date: "2025-10-17".to_string(),
            user_id: 1,
            notes: Some("CAJA".to_string()),
        }
    }

    #[test]
    fn test_valid_product() {
        assert!(validate_product(&product()).is_ok());

        let free = CreateProduct {
            price: Money::zero(),
            stock: 0,
            ..product()
        };
        assert!(validate_product(&free).is_ok());
    }

    #[test]
    fn test_product_rules() {
        let no_category = CreateProduct {
            category: " ".to_string(),
            ..product()
        };
        assert_eq!(
            validate_product(&no_category),
            Err(ValidationError::required("category"))
        );

        let negative = CreateProduct {
            price: Money::from_cents(-1),
            ..product()
        };
        assert!(matches!(
            validate_product(&negative),
            Err(ValidationError::OutOfRange { .. })
        ));

        let spaced = CreateProduct {
            barcode: "779 001".to_string(),
            ..product()
        };
        assert!(matches!(
            validate_product(&spaced),
            Err(ValidationError::InvalidFormat { .. })
        ));

        let long_name = CreateProduct {
            name: "x".repeat(201),
            ..product()
        };
        assert!(matches!(
            validate_product(&long_name),
            Err(ValidationError::TooLong { max: 200, .. })
        ));
    }

    #[test]
    fn test_email() {
        assert!(validate_email("compras@mayorista.com.ar").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign.com").is_err());
        assert!(validate_email("@mayorista.com").is_err());
        assert!(validate_email("a@b@c.com").is_err());
        assert!(validate_email("a@mayorista.").is_err());
        assert!(validate_email("a b@mayorista.com").is_err());
    }

    #[test]
    fn test_provider() {
        let provider = CreateProvider {
            name: "Distribuidora Norte".to_string(),
            contact_email: "ventas@norte.com".to_string(),
            phone_number: "+54 11 5555-0000".to_string(),
            address: "Av. Siempre Viva 742".to_string(),
            description: String::new(),
        };
        assert!(validate_provider(&provider).is_ok());

        let no_phone = CreateProvider {
            phone_number: String::new(),
            ..provider
        };
        assert_eq!(
            validate_provider(&no_phone),
            Err(ValidationError::required("phone_number"))
        );
    }

    #[test]
    fn test_expense() {
        assert!(validate_expense(&expense()).is_ok());

        let zero = CreateExpense {
            amount: Money::zero(),
            ..expense()
        };
        assert!(matches!(
            validate_expense(&zero),
            Err(ValidationError::MustBePositive { .. })
        ));

        let bad_date = CreateExpense {
            expense_date: "17/10/2025".to_string(),
            ..expense()
        };
        assert!(matches!(
            validate_expense(&bad_date),
            Err(ValidationError::InvalidFormat { .. })
        ));

        let no_user = CreateExpense {
            user_id: 0,
            ..expense()
        };
        assert!(validate_expense(&no_user).is_err());
    }

    #[test]
    fn test_expense_update() {
        assert!(validate_expense_update(&UpdateExpense::default()).is_err());

        let update = UpdateExpense {
            notes: Some("EFECTIVO".to_string()),
            ..Default::default()
        };
        assert!(validate_expense_update(&update).is_ok());

        let update = UpdateExpense {
            amount: Some(Money::from_cents(-100)),
            ..Default::default()
        };
        assert!(validate_expense_update(&update).is_err());
    }
}
