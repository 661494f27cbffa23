//! Project repository.

use nanoid::nanoid;
use tokio::sync::Mutex;

use super::require_title;
use crate::errors::AppError;
use crate::models::{CreateProjectRequest, Project, ProjectDocument, PROJECTS_KEY};
use crate::storage::{KeyValueStore, Storage};

const ID_LEN: usize = 9;

const BASE36: [char; 36] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
    'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// Notable projects, newest first.
pub struct ProjectRepository<S> {
    storage: Storage<S>,
    write_lock: Mutex<()>,
}

impl<S: KeyValueStore> ProjectRepository<S> {
    pub fn new(storage: Storage<S>) -> Self {
        Self {
            storage,
            write_lock: Mutex::new(()),
        }
    }

    pub async fn list(&self) -> Vec<Project> {
        self.load().await.projects
    }

    /// Create a project under a fresh random id.
    pub async fn create(&self, request: CreateProjectRequest) -> Result<Project, AppError> {
        require_title("Project", &request.title)?;

        let _guard = self.write_lock.lock().await;
        let mut document = self.load_for_update().await?;

        let id = loop {
            let candidate = nanoid!(ID_LEN, &BASE36);
            if !document.projects.iter().any(|p| p.id == candidate) {
                break candidate;
            }
        };
        let project = request.into_project(id);

        document.projects.insert(0, project.clone());
        self.storage.write(PROJECTS_KEY, &document).await?;

        tracing::info!("Created project {}", project.id);
        Ok(project)
    }

    /// Replace the project with the same id.
    pub async fn update(&self, project: Project) -> Result<Project, AppError> {
        require_title("Project", &project.title)?;
        if project.is_new() {
            return Err(AppError::BadRequest(
                "Unsaved project cannot be updated".to_string(),
            ));
        }

        let _guard = self.write_lock.lock().await;
        let mut document = self.load_for_update().await?;

        let slot = document
            .projects
            .iter_mut()
            .find(|p| p.id == project.id)
            .ok_or_else(|| AppError::NotFound(format!("Project {} not found", project.id)))?;
        *slot = project.clone();

        self.storage.write(PROJECTS_KEY, &document).await?;

        tracing::info!("Updated project {}", project.id);
        Ok(project)
    }

    /// Create the project if it carries the unsaved id, update it otherwise.
    pub async fn save(&self, project: Project) -> Result<Project, AppError> {
        if project.is_new() {
            self.create(project.into()).await
        } else {
            self.update(project).await
        }
    }

    /// Delete a project. Unknown ids are ignored.
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.load_for_update().await?;

        let before = document.projects.len();
        document.projects.retain(|p| p.id != id);
        if document.projects.len() == before {
            tracing::debug!("Delete of unknown project {} ignored", id);
            return Ok(());
        }

        self.storage.write(PROJECTS_KEY, &document).await?;
        tracing::info!("Deleted project {}", id);
        Ok(())
    }

    async fn load(&self) -> ProjectDocument {
        self.storage.read(PROJECTS_KEY).await
    }

    async fn load_for_update(&self) -> Result<ProjectDocument, AppError> {
        self.storage.read_for_update(PROJECTS_KEY).await
    }
}
