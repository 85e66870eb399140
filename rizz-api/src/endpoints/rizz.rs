use crate::macros::setter;
use crate::request::{ApiRequest, RequestData};
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize, de::IgnoredAny};
use std::borrow::Cow;
use std::fmt::Display;

/// Free generations per day before the backend starts answering 429.
pub const FREE_DAILY_LIMIT: u32 = 5;

// Common

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Flirty,
    Professional,
    Funny,
    #[default]
    Chill,
    Savage,
    Romantic,
    Confident,
    Mysterious,
}

impl Tone {
    pub const ALL: [Tone; 8] = [
        Tone::Flirty,
        Tone::Professional,
        Tone::Funny,
        Tone::Chill,
        Tone::Savage,
        Tone::Romantic,
        Tone::Confident,
        Tone::Mysterious,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Tone::Flirty => "Flirty",
            Tone::Professional => "Professional",
            Tone::Funny => "Funny",
            Tone::Chill => "Chill",
            Tone::Savage => "Savage",
            Tone::Romantic => "Romantic",
            Tone::Confident => "Confident",
            Tone::Mysterious => "Mysterious",
        }
    }
}

impl Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Dating,
    Work,
    #[default]
    Casual,
    Family,
    Friends,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Dating,
        Category::Work,
        Category::Casual,
        Category::Family,
        Category::Friends,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Dating => "Dating",
            Category::Work => "Work",
            Category::Casual => "Casual",
            Category::Family => "Family",
            Category::Friends => "Friends",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One generation: the input and up to three suggested replies.
///
/// Only `id` is required; the echoed request fields may be missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RizzResponse {
    pub id: String,
    #[serde(default)]
    pub input_text: String,
    #[serde(default)]
    pub tone: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub response_1: String,
    #[serde(default)]
    pub response_2: String,
    #[serde(default)]
    pub response_3: String,
    #[serde(default)]
    pub selected_idx: i32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl RizzResponse {
    /// The non-empty suggestions, in order.
    pub fn responses(&self) -> Vec<&str> {
        [&self.response_1, &self.response_2, &self.response_3]
            .into_iter()
            .map(String::as_str)
            .filter(|r| !r.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RizzStats {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_rizzes: u32,
    pub free_uses_today: u32,
}

impl RizzStats {
    pub fn limit_reached(&self) -> bool {
        self.free_uses_today >= FREE_DAILY_LIMIT
    }

    pub fn remaining_free_uses(&self) -> u32 {
        FREE_DAILY_LIMIT.saturating_sub(self.free_uses_today)
    }
}

// Requests

#[derive(Default, Debug, Clone, Serialize)]
pub struct GenerateRizz {
    input_text: String,
    tone: Tone,
    category: Category,
}

impl GenerateRizz {
    pub fn new(input_text: impl Into<String>) -> Self {
        Self {
            input_text: input_text.into(),
            ..Self::default()
        }
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    setter!(tone: Tone);
    setter!(category: Category);
}

impl ApiRequest for GenerateRizz {
    type Data = Self;
    type Response = GenerateResponse;

    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/rizz/generate".into()
    }

    fn data(&self) -> RequestData<&Self> {
        RequestData::Json(self)
    }
}

#[derive(Default, Debug, Clone, Serialize)]
pub struct GetStats;

impl ApiRequest for GetStats {
    type Data = ();
    type Response = RizzStats;

    fn endpoint(&self) -> Cow<'_, str> {
        "/rizz/stats".into()
    }
}

/// Records which suggestion the user picked. `selected_idx` is 1-based.
#[derive(Debug, Clone, Serialize)]
pub struct SelectResponse {
    response_id: String,
    selected_idx: u8,
}

impl SelectResponse {
    pub fn new(response_id: impl Into<String>, selected_idx: u8) -> Self {
        Self {
            response_id: response_id.into(),
            selected_idx,
        }
    }
}

impl ApiRequest for SelectResponse {
    type Data = Self;
    type Response = IgnoredAny;

    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/rizz/select".into()
    }

    fn data(&self) -> RequestData<&Self> {
        RequestData::Json(self)
    }
}

// Responses

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub data: RizzResponse,
}
