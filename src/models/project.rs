//! Project model for the notable projects section.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Id marking a project that has not been persisted yet.
pub const NEW_PROJECT_ID: &str = "new";

/// Icon shown next to a project. Glyph lookup belongs to the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectIcon {
    #[default]
    Globe,
    Shield,
    Search,
    Cloud,
    Smartphone,
}

impl ProjectIcon {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectIcon::Globe => "Globe",
            ProjectIcon::Shield => "Shield",
            ProjectIcon::Search => "Search",
            ProjectIcon::Cloud => "Cloud",
            ProjectIcon::Smartphone => "Smartphone",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "Globe" => Some(ProjectIcon::Globe),
            "Shield" => Some(ProjectIcon::Shield),
            "Search" => Some(ProjectIcon::Search),
            "Cloud" => Some(ProjectIcon::Cloud),
            "Smartphone" => Some(ProjectIcon::Smartphone),
            _ => None,
        }
    }
}

impl Serialize for ProjectIcon {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

// Unknown names fall back to the default icon instead of failing the whole document.
impl<'de> Deserialize<'de> for ProjectIcon {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(ProjectIcon::from_name(&name).unwrap_or_default())
    }
}

/// A project entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Free-text summary of the stack
    #[serde(default)]
    pub tech: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub client: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub icon: ProjectIcon,
    #[serde(default)]
    pub responsibilities: String,
}

impl Project {
    pub fn is_new(&self) -> bool {
        self.id == NEW_PROJECT_ID
    }
}

/// Request body for creating a project. The id is generated on create.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tech: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub client: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub icon: ProjectIcon,
    #[serde(default)]
    pub responsibilities: String,
}

impl CreateProjectRequest {
    pub fn into_project(self, id: String) -> Project {
        Project {
            id,
            title: self.title,
            description: self.description,
            tech: self.tech,
            duration: self.duration,
            company: self.company,
            client: self.client,
            role: self.role,
            location: self.location,
            icon: self.icon,
            responsibilities: self.responsibilities,
        }
    }
}

impl From<Project> for CreateProjectRequest {
    fn from(project: Project) -> Self {
        Self {
            title: project.title,
            description: project.description,
            tech: project.tech,
            duration: project.duration,
            company: project.company,
            client: project.client,
            role: project.role,
            location: project.location,
            icon: project.icon,
            responsibilities: project.responsibilities,
        }
    }
}
