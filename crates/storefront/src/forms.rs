//! Form schemas and inline validation messages.
//!
//! Every form posted to the storefront is validated with `validator`. A
//! failing form is re-rendered with one message per field and status 422.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::models::{ProfileDetails, SellerAccount};

/// Categories a seller (or a seller's product) can be listed under.
pub const SELLER_CATEGORIES: &[(&str, &str)] = &[
    ("electronics", "Electronics"),
    ("clothing", "Clothing"),
    ("home", "Home & Kitchen"),
    ("beauty", "Beauty & Personal Care"),
    ("sports", "Sports & Outdoors"),
    ("toys", "Toys & Games"),
    ("books", "Books & Media"),
    ("food", "Food & Grocery"),
    ("other", "Other"),
];

/// Whether `value` is one of [`SELLER_CATEGORIES`].
#[must_use]
pub fn is_seller_category(value: &str) -> bool {
    SELLER_CATEGORIES.iter().any(|(key, _)| *key == value)
}

/// An `<option>` in a category select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// [`SELLER_CATEGORIES`] as select options with `selected` marked.
#[must_use]
pub fn category_options(selected: &str) -> Vec<SelectOption> {
    SELLER_CATEGORIES
        .iter()
        .map(|&(value, label)| SelectOption {
            value,
            label,
            selected: value == selected,
        })
        .collect()
}

/// Field name to first error message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<String, String>);

impl FormErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The message for a field, if it failed.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Record a failure, keeping the first message per field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `Ok` when nothing failed.
    ///
    /// # Errors
    ///
    /// Returns `self` if any field failed.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl From<ValidationErrors> for FormErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut form_errors = Self::new();
        for (field, field_errors) in errors.field_errors() {
            let field = field.to_string();
            let message = field_errors
                .first()
                .and_then(|error| error.message.as_ref())
                .map_or_else(|| format!("{field} is invalid"), ToString::to_string);
            form_errors.add(&field, message);
        }
        form_errors
    }
}

/// Run the derived validators and collect their messages.
#[must_use]
pub fn check<T: Validate>(form: &T) -> FormErrors {
    form.validate().map_or_else(FormErrors::from, |()| FormErrors::new())
}

// =============================================================================
// Checkout
// =============================================================================

/// Contact, shipping and payment details entered at checkout.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CheckoutForm {
    #[validate(email(message = "Please enter a valid email address."))]
    pub email: String,
    #[validate(length(min = 1, message = "First name is required."))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required."))]
    pub last_name: String,
    #[validate(length(min = 1, message = "Address is required."))]
    pub address: String,
    #[serde(default)]
    pub apartment: String,
    #[validate(length(min = 1, message = "City is required."))]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[validate(length(min = 1, message = "ZIP code is required."))]
    pub zip: String,
    #[validate(length(min = 1, message = "Country is required."))]
    pub country: String,
    #[validate(length(min = 1, message = "Name on card is required."))]
    pub card_name: String,
    #[validate(length(min = 1, message = "Card number is required."))]
    pub card_number: String,
    #[validate(length(min = 1, message = "Expiration date is required."))]
    pub expiry: String,
    #[validate(length(min = 1, message = "CVV is required."))]
    pub cvv: String,
}

impl CheckoutForm {
    /// Validate after trimming whitespace-only input.
    #[must_use]
    pub fn errors(&self) -> FormErrors {
        check(&self.trimmed())
    }

    fn trimmed(&self) -> Self {
        let trim = |value: &String| value.trim().to_string();
        Self {
            email: trim(&self.email),
            first_name: trim(&self.first_name),
            last_name: trim(&self.last_name),
            address: trim(&self.address),
            apartment: trim(&self.apartment),
            city: trim(&self.city),
            state: trim(&self.state),
            zip: trim(&self.zip),
            country: trim(&self.country),
            card_name: trim(&self.card_name),
            card_number: trim(&self.card_number),
            expiry: trim(&self.expiry),
            cvv: trim(&self.cvv),
        }
    }

    /// The form as first shown: US shipping preselected.
    #[must_use]
    pub fn blank() -> Self {
        Self {
            country: "United States".to_string(),
            ..Self::default()
        }
    }
}

// =============================================================================
// Account
// =============================================================================

/// Personal information form on the account page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProfileForm {
    #[validate(length(min = 2, message = "Name must be at least 2 characters."))]
    pub full_name: String,
    #[validate(email(message = "Please enter a valid email address."))]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[validate(length(min = 5, message = "Address must be at least 5 characters."))]
    pub address: String,
}

impl ProfileForm {
    #[must_use]
    pub fn errors(&self) -> FormErrors {
        check(self)
    }

    #[must_use]
    pub fn into_details(self) -> ProfileDetails {
        let phone = self.phone.trim();
        ProfileDetails {
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: (!phone.is_empty()).then(|| phone.to_string()),
            address: self.address.trim().to_string(),
        }
    }
}

impl From<&ProfileDetails> for ProfileForm {
    fn from(details: &ProfileDetails) -> Self {
        Self {
            full_name: details.full_name.clone(),
            email: details.email.clone(),
            phone: details.phone.clone().unwrap_or_default(),
            address: details.address.clone(),
        }
    }
}

/// "Become a seller" registration form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SellerForm {
    #[validate(length(min = 2, message = "Business name must be at least 2 characters."))]
    pub business_name: String,
    #[validate(length(min = 10, message = "Description must be at least 10 characters."))]
    pub business_description: String,
    #[serde(default)]
    pub category: String,
    #[validate(length(min = 5, message = "Tax ID must be at least 5 characters."))]
    pub tax_id: String,
}

impl SellerForm {
    #[must_use]
    pub fn errors(&self) -> FormErrors {
        let mut errors = check(self);
        if !is_seller_category(&self.category) {
            errors.add("category", "Please select a category.");
        }
        errors
    }

    #[must_use]
    pub fn into_account(self) -> SellerAccount {
        SellerAccount {
            business_name: self.business_name.trim().to_string(),
            business_description: self.business_description.trim().to_string(),
            category: self.category,
            tax_id: self.tax_id.trim().to_string(),
        }
    }
}

// =============================================================================
// Seller products
// =============================================================================

/// Add/edit product form.
///
/// Price and stock arrive as free text and are parsed here so a typo becomes
/// an inline message rather than a rejected request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProductForm {
    #[validate(length(min = 2, message = "Product name must be at least 2 characters."))]
    pub name: String,
    #[validate(length(min = 10, message = "Description must be at least 10 characters."))]
    pub description: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub stock: String,
    #[serde(default)]
    pub category: String,
}

impl ProductForm {
    #[must_use]
    pub fn errors(&self) -> FormErrors {
        let mut errors = check(self);
        if self.parsed_price().is_none() {
            errors.add("price", "Price must be a positive number.");
        }
        if self.parsed_stock().is_none() {
            errors.add("stock", "Stock must be a non-negative number.");
        }
        if !is_seller_category(&self.category) {
            errors.add("category", "Please select a category.");
        }
        errors
    }

    /// The price if it is a number greater than zero.
    #[must_use]
    pub fn parsed_price(&self) -> Option<Decimal> {
        self.price
            .trim()
            .parse::<Decimal>()
            .ok()
            .filter(|price| *price > Decimal::ZERO)
    }

    /// The stock if it is a whole number of zero or more.
    #[must_use]
    pub fn parsed_stock(&self) -> Option<u32> {
        self.stock.trim().parse::<u32>().ok()
    }

    /// The placeholder product loaded into the edit form.
    #[must_use]
    pub fn sample() -> Self {
        Self {
            name: "Sample Product".to_string(),
            description: "This is a sample product description.".to_string(),
            price: "29.99".to_string(),
            stock: "10".to_string(),
            category: "electronics".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_checkout() -> CheckoutForm {
        CheckoutForm {
            email: "jane@example.com".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            address: "1 Market St".to_string(),
            city: "Springfield".to_string(),
            zip: "12345".to_string(),
            card_name: "Jane Doe".to_string(),
            card_number: "4242 4242 4242 4242".to_string(),
            expiry: "12/30".to_string(),
            cvv: "123".to_string(),
            ..CheckoutForm::blank()
        }
    }

    #[test]
    fn test_valid_checkout_has_no_errors() {
        assert!(valid_checkout().errors().is_empty());
    }

    #[test]
    fn test_checkout_reports_each_bad_field() {
        let form = CheckoutForm {
            email: "not-an-email".to_string(),
            city: "   ".to_string(),
            ..valid_checkout()
        };
        let errors = form.errors();
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.get("email"),
            Some("Please enter a valid email address.")
        );
        assert_eq!(errors.get("city"), Some("City is required."));
        assert_eq!(errors.get("zip"), None);
    }

    #[test]
    fn test_profile_minimum_lengths() {
        let form = ProfileForm {
            full_name: "J".to_string(),
            email: "john@example.com".to_string(),
            phone: String::new(),
            address: "1 St".to_string(),
        };
        let errors = form.errors();
        assert_eq!(
            errors.get("full_name"),
            Some("Name must be at least 2 characters.")
        );
        assert_eq!(
            errors.get("address"),
            Some("Address must be at least 5 characters.")
        );
    }

    #[test]
    fn test_profile_blank_phone_is_none() {
        let form = ProfileForm::from(&ProfileDetails::default());
        let details = ProfileForm {
            phone: "  ".to_string(),
            ..form
        }
        .into_details();
        assert_eq!(details.phone, None);
        assert_eq!(details.full_name, "John Doe");
    }

    #[test]
    fn test_seller_category_must_be_known() {
        let form = SellerForm {
            business_name: "Acme".to_string(),
            business_description: "Quality goods since 1999".to_string(),
            category: "weapons".to_string(),
            tax_id: "12-3456789".to_string(),
        };
        assert_eq!(
            form.errors().get("category"),
            Some("Please select a category.")
        );

        let form = SellerForm {
            category: "books".to_string(),
            ..form
        };
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_product_price_and_stock_parsing() {
        let form = ProductForm {
            price: "0".to_string(),
            stock: "-1".to_string(),
            ..ProductForm::sample()
        };
        let errors = form.errors();
        assert_eq!(errors.get("price"), Some("Price must be a positive number."));
        assert_eq!(
            errors.get("stock"),
            Some("Stock must be a non-negative number.")
        );

        let sample = ProductForm::sample();
        assert!(sample.errors().is_empty());
        assert_eq!(sample.parsed_price(), Some(Decimal::new(2999, 2)));
        assert_eq!(sample.parsed_stock(), Some(10));
    }

    #[test]
    fn test_category_options_mark_selection() {
        let options = category_options("books");
        assert_eq!(options.len(), SELLER_CATEGORIES.len());
        let selected: Vec<&str> = options
            .iter()
            .filter(|option| option.selected)
            .map(|option| option.label)
            .collect();
        assert_eq!(selected, vec!["Books & Media"]);
        assert!(category_options("").iter().all(|option| !option.selected));
    }

    #[test]
    fn test_form_errors_keep_first_message() {
        let mut errors = FormErrors::new();
        errors.add("price", "first");
        errors.add("price", "second");
        assert_eq!(errors.get("price"), Some("first"));
        assert!(errors.into_result().is_err());
        assert!(FormErrors::new().into_result().is_ok());
    }
}
