use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Category selection that places no constraint on a listing.
pub const ALL_CATEGORIES: &str = "All";

/// A record as delivered by the store, before it is decoded into one of the
/// typed kinds below.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    pub data: Map<String, Value>,
}

impl Document {
    pub fn new(data: Map<String, Value>) -> Self {
        Self { data }
    }

    pub fn id(&self) -> Option<&str> {
        self.data.get("_id").and_then(Value::as_str)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }

    pub fn decode<T: DeserializeOwned>(self) -> serde_json::Result<T> {
        serde_json::from_value(Value::Object(self.data))
    }
}

impl TryFrom<Value> for Document {
    type Error = serde_json::Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        serde_json::from_value(value)
    }
}

/// Equality constraints sent to the store with a collection query.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct QueryFilter {
    fields: BTreeMap<String, Value>,
}

impl QueryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn matches(&self, document: &Document) -> bool {
        self.fields
            .iter()
            .all(|(field, expected)| document.get(field) == Some(expected))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryOptions {
    pub limit: Option<usize>,
}

impl QueryOptions {
    pub fn limit(limit: usize) -> Self {
        Self { limit: Some(limit) }
    }
}

/// Behaviour shared by every record kind the site lists.
pub trait ContentRecord: DeserializeOwned + Serialize + Clone + Send + Sync + 'static {
    /// Name of the store collection holding this kind.
    const COLLECTION: &'static str;

    fn id(&self) -> &str;

    fn category(&self) -> Option<&str> {
        None
    }

    /// Text fields a free-text query is matched against. Absent fields are
    /// left out.
    fn searchable_text(&self) -> Vec<&str>;

    /// Short line used when the record is shown in a list.
    fn headline(&self) -> Option<&str>;

    fn is_featured(&self) -> bool {
        false
    }
}

fn present<'a, const N: usize>(fields: [Option<&'a String>; N]) -> Vec<&'a str> {
    fields.into_iter().flatten().map(String::as_str).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_createdDate", default, deserialize_with = "crate::utils::date::deserialize_optional")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(rename = "_updatedDate", default, deserialize_with = "crate::utils::date::deserialize_optional")]
    pub updated_date: Option<DateTime<Utc>>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub featured_image: Option<String>,
    #[serde(default, deserialize_with = "crate::utils::date::deserialize_optional")]
    pub publish_date: Option<DateTime<Utc>>,
}

impl ContentRecord for BlogPost {
    const COLLECTION: &'static str = "blogposts";

    fn id(&self) -> &str {
        &self.id
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn searchable_text(&self) -> Vec<&str> {
        present([self.title.as_ref(), self.content.as_ref()])
    }

    fn headline(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faq {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_createdDate", default, deserialize_with = "crate::utils::date::deserialize_optional")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(rename = "_updatedDate", default, deserialize_with = "crate::utils::date::deserialize_optional")]
    pub updated_date: Option<DateTime<Utc>>,
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<String>,
    pub is_featured: Option<bool>,
    #[serde(default, deserialize_with = "crate::utils::date::deserialize_optional")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl ContentRecord for Faq {
    const COLLECTION: &'static str = "faq";

    fn id(&self) -> &str {
        &self.id
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn searchable_text(&self) -> Vec<&str> {
        present([self.question.as_ref(), self.answer.as_ref()])
    }

    fn headline(&self) -> Option<&str> {
        self.question.as_deref()
    }

    fn is_featured(&self) -> bool {
        self.is_featured.unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_createdDate", default, deserialize_with = "crate::utils::date::deserialize_optional")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(rename = "_updatedDate", default, deserialize_with = "crate::utils::date::deserialize_optional")]
    pub updated_date: Option<DateTime<Utc>>,
    pub title: Option<String>,
    pub short_summary: Option<String>,
    pub description: Option<String>,
    pub service_image: Option<String>,
    pub booking_link: Option<String>,
    pub price: Option<String>,
}

impl ContentRecord for Service {
    const COLLECTION: &'static str = "services";

    fn id(&self) -> &str {
        &self.id
    }

    fn searchable_text(&self) -> Vec<&str> {
        present([
            self.title.as_ref(),
            self.short_summary.as_ref(),
            self.description.as_ref(),
        ])
    }

    fn headline(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_createdDate", default, deserialize_with = "crate::utils::date::deserialize_optional")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(rename = "_updatedDate", default, deserialize_with = "crate::utils::date::deserialize_optional")]
    pub updated_date: Option<DateTime<Utc>>,
    pub client_name: Option<String>,
    pub testimonial_text: Option<String>,
    pub client_photo: Option<String>,
    #[serde(default, deserialize_with = "crate::utils::date::deserialize_optional")]
    pub testimonial_date: Option<DateTime<Utc>>,
    pub service_received: Option<String>,
    pub is_featured: Option<bool>,
}

impl ContentRecord for Testimonial {
    const COLLECTION: &'static str = "testimonials";

    fn id(&self) -> &str {
        &self.id
    }

    fn searchable_text(&self) -> Vec<&str> {
        present([
            self.client_name.as_ref(),
            self.testimonial_text.as_ref(),
            self.service_received.as_ref(),
        ])
    }

    fn headline(&self) -> Option<&str> {
        self.client_name.as_deref()
    }

    fn is_featured(&self) -> bool {
        self.is_featured.unwrap_or(false)
    }
}
