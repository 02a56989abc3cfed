use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyStatus {
    pub id: String,
    pub date: String,
    pub day_number: i32,
    pub ingredient_of_day: String,
    pub weather: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyStatusInput {
    pub date: String,
    #[serde(deserialize_with = "super::whole_number")]
    pub day_number: i32,
    pub ingredient_of_day: String,
    /// Absent keeps the stored weather on overwrite; `null` clears it.
    #[serde(default, deserialize_with = "super::nullable")]
    pub weather: Option<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AboutContent {
    pub id: String,
    pub bio: String,
    pub profile_image_url: Option<String>,
    pub email: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl AboutContent {
    /// Splits the bio on blank lines, dropping empty paragraphs.
    #[must_use]
    pub fn paragraphs(&self) -> Vec<String> {
        let mut paragraphs = Vec::new();
        let mut current: Vec<&str> = Vec::new();

        for line in self.bio.lines() {
            if line.trim().is_empty() {
                if !current.is_empty() {
                    paragraphs.push(current.join("\n"));
                    current.clear();
                }
            } else {
                current.push(line.trim_end());
            }
        }
        if !current.is_empty() {
            paragraphs.push(current.join("\n"));
        }

        paragraphs
    }
}

/// Singleton upsert; absent fields keep their stored value and an explicit
/// `null` clears the optional ones.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AboutInput {
    pub bio: Option<String>,
    #[serde(deserialize_with = "super::nullable")]
    pub profile_image_url: Option<Option<String>>,
    #[serde(deserialize_with = "super::nullable")]
    pub email: Option<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resource {
    pub id: String,
    pub name: String,
    pub url: String,
    pub image_url: Option<String>,
    pub display_order: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialLink {
    pub id: String,
    pub platform: String,
    pub url: String,
    pub display_order: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn about(bio: &str) -> AboutContent {
        AboutContent {
            id: "1".to_string(),
            bio: bio.to_string(),
            profile_image_url: None,
            email: None,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn test_paragraphs_split_on_blank_lines() {
        let content = about("First line.\nStill first.\n\nSecond.\n   \n\n\nThird.\n");
        assert_eq!(
            content.paragraphs(),
            vec!["First line.\nStill first.", "Second.", "Third."]
        );
    }

    #[test]
    fn test_paragraphs_empty_bio() {
        assert!(about("").paragraphs().is_empty());
        assert!(about("\n\n").paragraphs().is_empty());
    }

    #[test]
    fn test_about_input_null_differs_from_absent() {
        let input: AboutInput =
            serde_json::from_value(serde_json::json!({"bio": "Hi", "email": null})).unwrap();
        assert_eq!(input.bio.as_deref(), Some("Hi"));
        assert_eq!(input.email, Some(None));
        assert_eq!(input.profile_image_url, None);
    }

    #[test]
    fn test_daily_status_input_numbers_and_weather() {
        let input: DailyStatusInput = serde_json::from_value(serde_json::json!({
            "date": "2024-01-01",
            "day_number": 4.0,
            "ingredient_of_day": "Kale",
        }))
        .unwrap();
        assert_eq!(input.day_number, 4);
        assert_eq!(input.weather, None);

        let input: DailyStatusInput = serde_json::from_value(serde_json::json!({
            "date": "2024-01-01",
            "day_number": 4,
            "ingredient_of_day": "Kale",
            "weather": null,
        }))
        .unwrap();
        assert_eq!(input.weather, Some(None));
    }
}
