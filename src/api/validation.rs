use chrono::NaiveDate;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

use super::ApiError;
use crate::constants::auth::MIN_PASSWORD_LEN;
use crate::models::recipe::RecipeKey;
use crate::models::whole_i32;

fn get_regex(re: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    re.get_or_init(|| Regex::new(pattern).expect("Invalid regex pattern defined in code"))
}

#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    get_regex(&RE, r"^[^\s@]+@[^\s@]+\.[^\s@]+$").is_match(email)
}

/// Strict `YYYY-MM-DD` that also names a real calendar day.
#[must_use]
pub fn is_valid_date(date: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    get_regex(&RE, r"^\d{4}-\d{2}-\d{2}$").is_match(date)
        && NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok()
}

#[must_use]
pub fn is_uuid(value: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    get_regex(
        &RE,
        r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$",
    )
    .is_match(value)
}

/// Path segments shaped like a UUID address the id, anything else the slug.
#[must_use]
pub fn recipe_key(id_or_slug: &str) -> RecipeKey {
    if is_uuid(id_or_slug) {
        RecipeKey::Id(id_or_slug.to_lowercase())
    } else {
        RecipeKey::Slug(id_or_slug.to_string())
    }
}

/// A field that is present and not `null`.
fn field<'a>(payload: &'a Value, key: &str) -> Option<&'a Value> {
    payload.get(key).filter(|v| !v.is_null())
}

fn non_blank_str<'a>(payload: &'a Value, key: &str) -> Option<&'a str> {
    field(payload, key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

fn require(ok: bool, message: &str) -> Result<(), ApiError> {
    if ok {
        Ok(())
    } else {
        Err(ApiError::validation(message))
    }
}

/// Whole numbers only; `2` and `2.0` both pass.
fn whole_number(value: &Value) -> Option<i32> {
    value.as_number().and_then(whole_i32)
}

fn is_positive_entry_number(value: &Value) -> bool {
    whole_number(value).is_some_and(|n| n >= 1)
}

fn is_non_empty_array(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_array)
        .is_some_and(|items| !items.is_empty())
}

pub fn validate_registration(payload: &Value) -> Result<(), ApiError> {
    require(non_blank_str(payload, "name").is_some(), "Name is required")?;

    require(
        field(payload, "email")
            .and_then(Value::as_str)
            .is_some_and(is_valid_email),
        "Valid email is required",
    )?;

    require(
        field(payload, "password")
            .and_then(Value::as_str)
            .is_some_and(|p| p.chars().count() >= MIN_PASSWORD_LEN),
        "Password must be at least 6 characters",
    )
}

pub fn validate_login(payload: &Value) -> Result<(), ApiError> {
    require(
        field(payload, "email")
            .and_then(Value::as_str)
            .is_some_and(is_valid_email),
        "Valid email is required",
    )?;

    require(
        field(payload, "password")
            .and_then(Value::as_str)
            .is_some_and(|p| !p.is_empty()),
        "Password is required",
    )
}

/// Recipe payload checks. In update mode missing fields are allowed, but
/// every field that is present must still be valid.
pub fn validate_recipe(payload: &Value, is_update: bool) -> Result<(), ApiError> {
    let present = |key: &str| !is_update || field(payload, key).is_some();

    if present("entry_number") {
        require(
            field(payload, "entry_number").is_some_and(is_positive_entry_number),
            "Valid entry number is required",
        )?;
    }

    if present("title") {
        require(non_blank_str(payload, "title").is_some(), "Title is required")?;
    }

    if present("slug") {
        require(non_blank_str(payload, "slug").is_some(), "Slug is required")?;
    }

    if present("date") {
        require(
            field(payload, "date")
                .and_then(Value::as_str)
                .is_some_and(is_valid_date),
            "Valid date is required (YYYY-MM-DD)",
        )?;
    }

    if !is_update {
        require(
            is_non_empty_array(field(payload, "ingredients")),
            "At least one ingredient is required",
        )?;
        require(
            is_non_empty_array(field(payload, "steps")),
            "At least one step is required",
        )?;
    }

    if let Some(ingredients) = field(payload, "ingredients") {
        require(ingredients.is_array(), "Ingredients must be an array")?;
    }
    if let Some(steps) = field(payload, "steps") {
        require(steps.is_array(), "Steps must be an array")?;
    }

    Ok(())
}

pub fn validate_daily_status(payload: &Value) -> Result<(), ApiError> {
    let has_date = non_blank_str(payload, "date").is_some();
    let has_day_number = field(payload, "day_number")
        .and_then(whole_number)
        .is_some_and(|n| n != 0);
    let has_ingredient = non_blank_str(payload, "ingredient_of_day").is_some();

    require(
        has_date && has_day_number && has_ingredient,
        "Missing required fields: date, day_number, ingredient_of_day",
    )?;

    require(
        field(payload, "date")
            .and_then(Value::as_str)
            .is_some_and(is_valid_date),
        "Valid date is required (YYYY-MM-DD)",
    )
}

pub fn validate_about(payload: &Value) -> Result<(), ApiError> {
    // `null` clears the optional fields, so it counts as present for them.
    require(
        field(payload, "bio").is_some()
            || payload.get("profile_image_url").is_some()
            || payload.get("email").is_some(),
        "At least one of bio, profile_image_url, email is required",
    )?;

    if let Some(email) = field(payload, "email") {
        let valid = email
            .as_str()
            .is_some_and(|e| e.is_empty() || is_valid_email(e));
        require(valid, "Valid email is required")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message(result: Result<(), ApiError>) -> String {
        match result {
            Err(ApiError::ValidationError(msg)) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    fn recipe() -> Value {
        json!({
            "entry_number": 1,
            "title": "Kale Salad",
            "slug": "kale-salad",
            "date": "2025-03-01",
            "ingredients": ["kale"],
            "steps": ["chop"],
        })
    }

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last+tag@mail.example.org"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.d"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_date_pattern() {
        assert!(is_valid_date("2025-02-28"));
        assert!(is_valid_date("2024-02-29"));
        assert!(!is_valid_date("2025-02-30"));
        assert!(!is_valid_date("2025-13-01"));
        assert!(!is_valid_date("2025-3-1"));
        assert!(!is_valid_date("2025-03-01T00:00:00Z"));
    }

    #[test]
    fn test_recipe_key() {
        assert_eq!(
            recipe_key("0F8FAD5B-D9CB-469F-A165-70867728950E"),
            RecipeKey::Id("0f8fad5b-d9cb-469f-a165-70867728950e".to_string())
        );
        assert_eq!(
            recipe_key("kale-salad"),
            RecipeKey::Slug("kale-salad".to_string())
        );
        assert_eq!(
            recipe_key("0f8fad5b-d9cb-469f-a165"),
            RecipeKey::Slug("0f8fad5b-d9cb-469f-a165".to_string())
        );
    }

    #[test]
    fn test_registration_first_violation_wins() {
        assert!(validate_registration(&json!({"name": "Ann", "email": "a@b.co", "password": "secret"})).is_ok());

        assert_eq!(
            message(validate_registration(&json!({"name": "  ", "email": "bad", "password": "x"}))),
            "Name is required"
        );
        assert_eq!(
            message(validate_registration(&json!({"name": "Ann", "email": "bad", "password": "x"}))),
            "Valid email is required"
        );
        assert_eq!(
            message(validate_registration(&json!({"name": "Ann", "email": "a@b.co", "password": "12345"}))),
            "Password must be at least 6 characters"
        );
        assert_eq!(
            message(validate_registration(&json!({"name": 42, "email": "a@b.co", "password": "secret"}))),
            "Name is required"
        );
    }

    #[test]
    fn test_login() {
        assert!(validate_login(&json!({"email": "a@b.co", "password": "x"})).is_ok());
        assert_eq!(
            message(validate_login(&json!({"email": "a@b.co", "password": ""}))),
            "Password is required"
        );
        assert_eq!(
            message(validate_login(&json!({"password": "x"}))),
            "Valid email is required"
        );
    }

    #[test]
    fn test_recipe_create() {
        assert!(validate_recipe(&recipe(), false).is_ok());

        let cases = [
            ("entry_number", json!(0), "Valid entry number is required"),
            ("entry_number", json!(2.5), "Valid entry number is required"),
            ("entry_number", json!("3"), "Valid entry number is required"),
            ("title", json!(""), "Title is required"),
            ("slug", json!("   "), "Slug is required"),
            ("date", json!("2025-02-30"), "Valid date is required (YYYY-MM-DD)"),
            ("ingredients", json!([]), "At least one ingredient is required"),
            ("ingredients", json!("kale"), "At least one ingredient is required"),
            ("steps", json!([]), "At least one step is required"),
            ("steps", json!({"1": "chop"}), "At least one step is required"),
        ];

        for (key, value, expected) in cases {
            let mut payload = recipe();
            payload[key] = value;
            assert_eq!(message(validate_recipe(&payload, false)), expected, "{key}");
        }

        let mut payload = recipe();
        payload.as_object_mut().unwrap().remove("steps");
        assert_eq!(
            message(validate_recipe(&payload, false)),
            "At least one step is required"
        );
    }

    #[test]
    fn test_entry_number_accepts_whole_floats() {
        let mut payload = recipe();
        payload["entry_number"] = json!(1.0);
        assert!(validate_recipe(&payload, false).is_ok());
        assert!(validate_recipe(&json!({"entry_number": 7.0}), true).is_ok());
        assert!(
            validate_daily_status(&json!({
                "date": "2025-03-01",
                "day_number": 3.0,
                "ingredient_of_day": "Kale",
            }))
            .is_ok()
        );
    }

    #[test]
    fn test_recipe_update_is_partial() {
        assert!(validate_recipe(&json!({}), true).is_ok());
        assert!(validate_recipe(&json!({"title": "New title"}), true).is_ok());
        assert!(validate_recipe(&json!({"hero_image_url": null}), true).is_ok());

        assert_eq!(
            message(validate_recipe(&json!({"ingredients": "kale"}), true)),
            "Ingredients must be an array"
        );
        assert_eq!(
            message(validate_recipe(&json!({"steps": 3}), true)),
            "Steps must be an array"
        );
        assert!(validate_recipe(&json!({"steps": []}), true).is_ok());
        assert!(validate_recipe(&json!({"ingredients": []}), true).is_ok());
        assert_eq!(
            message(validate_recipe(&json!({"date": "yesterday"}), true)),
            "Valid date is required (YYYY-MM-DD)"
        );
        assert_eq!(
            message(validate_recipe(&json!({"entry_number": -1}), true)),
            "Valid entry number is required"
        );
    }

    #[test]
    fn test_daily_status() {
        assert!(
            validate_daily_status(&json!({
                "date": "2025-03-01",
                "day_number": 12,
                "ingredient_of_day": "Kale",
                "weather": null,
            }))
            .is_ok()
        );

        let missing = "Missing required fields: date, day_number, ingredient_of_day";
        assert_eq!(
            message(validate_daily_status(&json!({"date": "2025-03-01", "day_number": 0, "ingredient_of_day": "Kale"}))),
            missing
        );
        assert_eq!(
            message(validate_daily_status(&json!({"day_number": 1, "ingredient_of_day": "Kale"}))),
            missing
        );
        assert_eq!(
            message(validate_daily_status(&json!({"date": "03/01/2025", "day_number": 1, "ingredient_of_day": "Kale"}))),
            "Valid date is required (YYYY-MM-DD)"
        );
    }

    #[test]
    fn test_about() {
        assert!(validate_about(&json!({"bio": "Hello"})).is_ok());
        assert!(validate_about(&json!({"email": ""})).is_ok());
        assert!(validate_about(&json!({"email": null})).is_ok());
        assert!(validate_about(&json!({"profile_image_url": null})).is_ok());
        assert_eq!(
            message(validate_about(&json!({"bio": null}))),
            "At least one of bio, profile_image_url, email is required"
        );
        assert_eq!(
            message(validate_about(&json!({"unrelated": true}))),
            "At least one of bio, profile_image_url, email is required"
        );
        assert_eq!(
            message(validate_about(&json!({"email": "not-an-email"}))),
            "Valid email is required"
        );
    }
}
