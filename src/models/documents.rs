//! Persisted documents, one per storage key.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{BlogPost, Project, Technology, Topic};

/// Storage key of the blog post document.
pub const POSTS_KEY: &str = "blog-posts.json";
/// Storage key of the project document.
pub const PROJECTS_KEY: &str = "projects.json";
/// Storage key of the per-technology topic map.
pub const TOPICS_KEY: &str = "tech-topics";
/// Storage key of the technology catalog.
pub const TECHNOLOGIES_KEY: &str = "technologies";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostDocument {
    #[serde(default)]
    pub posts: Vec<BlogPost>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectDocument {
    #[serde(default)]
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TechnologyDocument {
    #[serde(default)]
    pub technologies: Vec<Technology>,
}

/// Topics keyed by technology id.
pub type TopicDocument = BTreeMap<String, Vec<Topic>>;
