//! Field rules of the product write contract.
//!
//! `CreateProduct` uses these through `#[derive(Validate)]`; `UpdateProduct`
//! applies them by hand to the fields that are present. The category reference
//! needs storage and is checked by the service, which merges the result into
//! the same `ValidationErrors` map.

use rust_decimal::Decimal;
use std::borrow::Cow;
use validator::ValidationError;

pub const MAX_TITLE_LENGTH: usize = 255;
pub const MAX_IMAGE_LENGTH: usize = 255;
pub const MAX_PRICE_DIGITS: u32 = 6;
pub const MAX_PRICE_DECIMAL_PLACES: u32 = 2;

pub const TITLE_LENGTH: &str = "Title must be between 1 and 255 characters";
pub const TITLE_BLANK: &str = "This field may not be blank";
pub const NOT_NULL: &str = "This field may not be null";
pub const IMAGE_LENGTH: &str = "Image reference must be at most 255 characters";
pub const RATING_RANGE: &str = "Rating must be between 0 and 5";
pub const STOCK_NON_NEGATIVE: &str = "Stock cannot be negative";
pub const PRICE_POSITIVE: &str = "Price must be a positive number";
pub const PRICE_MAX_DIGITS: &str = "Ensure that there are no more than 6 digits in total";
pub const PRICE_MAX_DECIMAL_PLACES: &str = "Ensure that there are no more than 2 decimal places";
pub const PRICE_MAX_WHOLE_DIGITS: &str =
    "Ensure that there are no more than 4 digits before the decimal point";
pub const INVALID_CATEGORY: &str = "Invalid category reference";

fn error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn error_with_value<T: serde::Serialize>(
    code: &'static str,
    message: &'static str,
    value: &T,
) -> ValidationError {
    let mut err = error(code, message);
    err.add_param(Cow::Borrowed("value"), value);
    err
}

/// Titles are trimmed on input; one that is empty afterwards is blank.
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(error("blank", TITLE_BLANK));
    }
    if title.chars().count() <= MAX_TITLE_LENGTH {
        Ok(())
    } else {
        Err(error("length", TITLE_LENGTH))
    }
}

/// Explicit `null` for a field that cannot be cleared.
pub fn not_null() -> ValidationError {
    error("null", NOT_NULL)
}

pub fn validate_image(image: &str) -> Result<(), ValidationError> {
    if image.chars().count() <= MAX_IMAGE_LENGTH {
        Ok(())
    } else {
        Err(error("length", IMAGE_LENGTH))
    }
}

pub fn validate_rating(rating: f64) -> Result<(), ValidationError> {
    if (0.0..=5.0).contains(&rating) {
        Ok(())
    } else {
        Err(error_with_value("rating_range", RATING_RANGE, &rating))
    }
}

pub fn validate_stock(stock: i32) -> Result<(), ValidationError> {
    if stock >= 0 {
        Ok(())
    } else {
        Err(error_with_value("stock_non_negative", STOCK_NON_NEGATIVE, &stock))
    }
}

/// Precision rules first, then positivity. Reports one error per price.
///
/// Digits are counted as written: `19.990` has three decimal places.
pub fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    let value = price.to_string();
    let decimal_places = price.scale();
    let digits = digit_count(price.mantissa().unsigned_abs());
    let (total_digits, whole_digits) = if digits > decimal_places {
        (digits, digits - decimal_places)
    } else {
        (decimal_places, 0)
    };

    if total_digits > MAX_PRICE_DIGITS {
        return Err(error_with_value("max_digits", PRICE_MAX_DIGITS, &value));
    }
    if decimal_places > MAX_PRICE_DECIMAL_PLACES {
        return Err(error_with_value(
            "max_decimal_places",
            PRICE_MAX_DECIMAL_PLACES,
            &value,
        ));
    }
    if whole_digits > MAX_PRICE_DIGITS - MAX_PRICE_DECIMAL_PLACES {
        return Err(error_with_value(
            "max_whole_digits",
            PRICE_MAX_WHOLE_DIGITS,
            &value,
        ));
    }
    if *price <= Decimal::ZERO {
        return Err(error_with_value("price_positive", PRICE_POSITIVE, &value));
    }
    Ok(())
}

pub fn invalid_category(category_id: i32) -> ValidationError {
    error_with_value("invalid_category", INVALID_CATEGORY, &category_id)
}

fn digit_count(mut n: u128) -> u32 {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}
