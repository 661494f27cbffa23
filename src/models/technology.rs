//! Technology catalog model. Topic collections are keyed by [`Technology::id`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Skill {
    pub id: String,
    pub name: String,
}

/// A group of related skills, e.g. "Frontend".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Technology {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

/// Catalog written into an empty store.
pub fn default_technologies() -> Vec<Technology> {
    fn group(id: &str, title: &str, skills: &[(&str, &str)]) -> Technology {
        Technology {
            id: id.to_string(),
            title: title.to_string(),
            skills: skills
                .iter()
                .map(|(id, name)| Skill {
                    id: id.to_string(),
                    name: name.to_string(),
                })
                .collect(),
        }
    }

    vec![
        group(
            "1",
            "Frontend",
            &[
                ("fe1", "HTML5"),
                ("fe2", "CSS3"),
                ("fe3", "JavaScript"),
                ("fe4", "TypeScript"),
                ("fe5", "React"),
                ("fe6", "Angular"),
                ("fe7", "Vue.js"),
                ("fe8", "Tailwind CSS"),
            ],
        ),
        group(
            "2",
            "Backend and Cloud",
            &[
                ("be1", "Node.js"),
                ("be2", "Express"),
                ("be3", "Python"),
                ("be4", "Django"),
                ("be5", "AWS"),
                ("be6", "Azure"),
            ],
        ),
        group(
            "3",
            "Database",
            &[
                ("db1", "MongoDB"),
                ("db2", "PostgreSQL"),
                ("db3", "MySQL"),
                ("db4", "Redis"),
            ],
        ),
        group(
            "4",
            "DevOps",
            &[
                ("do1", "Docker"),
                ("do2", "Kubernetes"),
                ("do3", "Jenkins"),
                ("do4", "GitHub Actions"),
            ],
        ),
    ]
}
