pub mod content;
pub mod recipe;
pub mod user;

use serde::{Deserialize, Deserializer, de::Error as _};
use serde_json::Number;

/// Reads a JSON number as an `i32` when it is whole, so `3` and `3.0`
/// both give 3.
#[must_use]
pub fn whole_i32(number: &Number) -> Option<i32> {
    if let Some(n) = number.as_i64() {
        return i32::try_from(n).ok();
    }

    let f = number.as_f64()?;
    let in_range = (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&f);
    #[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
    (f.fract() == 0.0 && in_range).then_some(f as i32)
}

pub(crate) fn whole_number<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Number::deserialize(deserializer)?;
    whole_i32(&number).ok_or_else(|| D::Error::custom(format!("expected a whole number, got {number}")))
}

pub(crate) fn optional_whole_number<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Number>::deserialize(deserializer)?
        .map(|number| {
            whole_i32(&number)
                .ok_or_else(|| D::Error::custom(format!("expected a whole number, got {number}")))
        })
        .transpose()
}

/// Keeps an explicit `null` apart from an absent key: absent is `None`
/// (through `#[serde(default)]`), `null` is `Some(None)`.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
