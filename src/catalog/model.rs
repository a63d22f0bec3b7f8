use std::fmt::Display;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A product as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: i64,
    pub stock: i64,
}

impl Display for Product {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {}", self.id, self.name)
    }
}

/// Body of create and update requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPayload {
    pub name: String,
    pub price: i64,
    pub stock: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Deleted,
    Error,
}

/// Outcome of the last backend action, shown under the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    text: String,
    tone: Tone,
    at: DateTime<Local>,
}

impl StatusMessage {
    fn new(text: String, tone: Tone) -> Self {
        Self {
            text,
            tone,
            at: Local::now(),
        }
    }

    pub fn created() -> Self {
        Self::new("✅ Product created".to_string(), Tone::Success)
    }

    pub fn updated() -> Self {
        Self::new("✅ Product updated".to_string(), Tone::Success)
    }

    pub fn deleted(id: i64) -> Self {
        Self::new(format!("🗑️ Product {id} deleted"), Tone::Deleted)
    }

    /// A failed create, update or delete.
    pub fn failed(error: impl Display) -> Self {
        Self::new(format!("❌ {error}"), Tone::Error)
    }

    /// A failed list fetch carries the bare error text.
    pub fn load_failed(error: impl Display) -> Self {
        Self::new(error.to_string(), Tone::Error)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn tone(&self) -> Tone {
        self.tone
    }

    pub fn timestamp(&self) -> String {
        self.at.format("%H:%M:%S").to_string()
    }
}

/// Group digits by thousands, e.g. `10000` becomes `10,000`.
pub fn format_price(price: i64) -> String {
    let digits = price.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if price < 0 {
        grouped.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
