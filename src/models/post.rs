//! Blog post model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Display format of [`BlogPost::date`], e.g. `Mar 15, 2024`.
pub const POST_DATE_FORMAT: &str = "%b %-d, %Y";

/// Fixed set of blog categories.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Category {
    #[serde(rename = "Web Development")]
    WebDevelopment,
    #[serde(rename = "Cloud Computing")]
    CloudComputing,
    #[serde(rename = "Artificial Intelligence")]
    ArtificialIntelligence,
    Architecture,
    DevOps,
    Security,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::WebDevelopment,
        Category::CloudComputing,
        Category::ArtificialIntelligence,
        Category::Architecture,
        Category::DevOps,
        Category::Security,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::WebDevelopment => "Web Development",
            Category::CloudComputing => "Cloud Computing",
            Category::ArtificialIntelligence => "Artificial Intelligence",
            Category::Architecture => "Architecture",
            Category::DevOps => "DevOps",
            Category::Security => "Security",
        }
    }
}

/// Byline shown on a post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub avatar: String,
}

/// A blog post. Content is markdown and stored verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub image: String,
    pub category: Category,
    pub date: String,
    pub read_time: u32,
    pub author: Author,
}

impl BlogPost {
    /// Parsed publication date, if `date` is in the display format.
    pub fn published_on(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), "%b %d, %Y").ok()
    }
}

/// Request body for creating a new post. Id, date and author are assigned on create.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image: String,
    pub category: Category,
    pub read_time: u32,
}
