//! Per-technology topic repository with like/dislike voting.

use tokio::sync::Mutex;

use super::{now_rfc3339, require_title, timestamp_id};
use crate::errors::AppError;
use crate::models::{
    CreateTopicRequest, Topic, TopicDocument, UpdateTopicRequest, VoteKind, TOPICS_KEY,
};
use crate::storage::{KeyValueStore, Storage};

/// Discussion topics, one newest-first collection per technology id.
pub struct TopicRepository<S> {
    storage: Storage<S>,
    write_lock: Mutex<()>,
}

impl<S: KeyValueStore> TopicRepository<S> {
    pub fn new(storage: Storage<S>) -> Self {
        Self {
            storage,
            write_lock: Mutex::new(()),
        }
    }

    /// Topics of one technology. Unknown technologies have no topics.
    pub async fn list(&self, tech_id: &str) -> Vec<Topic> {
        self.load().await.remove(tech_id).unwrap_or_default()
    }

    pub async fn create(
        &self,
        tech_id: &str,
        request: CreateTopicRequest,
    ) -> Result<Topic, AppError> {
        require_title("Topic", &request.title)?;

        let _guard = self.write_lock.lock().await;
        let mut document = self.load_for_update().await?;
        let topics = document.entry(tech_id.to_string()).or_default();

        let now = now_rfc3339();
        let topic = Topic {
            id: timestamp_id(|id| topics.iter().any(|t| t.id == id)),
            title: request.title,
            content: request.content,
            created_at: now.clone(),
            updated_at: now,
            likes: 0,
            dislikes: 0,
            user_vote: None,
        };
        topics.insert(0, topic.clone());

        self.storage.write(TOPICS_KEY, &document).await?;

        tracing::info!("Created topic {} for technology {}", topic.id, tech_id);
        Ok(topic)
    }

    /// Change title and/or content of a topic.
    pub async fn update(
        &self,
        tech_id: &str,
        topic_id: &str,
        request: UpdateTopicRequest,
    ) -> Result<Topic, AppError> {
        if let Some(title) = &request.title {
            require_title("Topic", title)?;
        }

        self.mutate(tech_id, topic_id, |topic| {
            if let Some(title) = request.title {
                topic.title = title;
            }
            if let Some(content) = request.content {
                topic.content = content;
            }
            topic.updated_at = now_rfc3339();
        })
        .await
    }

    /// Delete a topic. Unknown technologies and ids are ignored.
    pub async fn delete(&self, tech_id: &str, topic_id: &str) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.load_for_update().await?;

        let Some(topics) = document.get_mut(tech_id) else {
            return Ok(());
        };
        let before = topics.len();
        topics.retain(|t| t.id != topic_id);
        if topics.len() == before {
            tracing::debug!("Delete of unknown topic {}/{} ignored", tech_id, topic_id);
            return Ok(());
        }

        self.storage.write(TOPICS_KEY, &document).await?;
        tracing::info!("Deleted topic {} for technology {}", topic_id, tech_id);
        Ok(())
    }

    /// Apply the viewer's vote; see [`Topic::apply_vote`].
    pub async fn vote(
        &self,
        tech_id: &str,
        topic_id: &str,
        requested: Option<VoteKind>,
    ) -> Result<Topic, AppError> {
        let topic = self
            .mutate(tech_id, topic_id, |topic| {
                topic.apply_vote(requested, now_rfc3339())
            })
            .await?;

        tracing::debug!(
            "Vote on topic {}: likes={} dislikes={} vote={:?}",
            topic.id,
            topic.likes,
            topic.dislikes,
            topic.user_vote
        );
        Ok(topic)
    }

    /// Read-modify-write of a single topic. Nothing is written if the topic is missing.
    async fn mutate(
        &self,
        tech_id: &str,
        topic_id: &str,
        change: impl FnOnce(&mut Topic),
    ) -> Result<Topic, AppError> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.load_for_update().await?;

        let topic = document
            .get_mut(tech_id)
            .and_then(|topics| topics.iter_mut().find(|t| t.id == topic_id))
            .ok_or_else(|| AppError::NotFound(format!("Topic {} not found", topic_id)))?;
        change(topic);
        let topic = topic.clone();

        self.storage.write(TOPICS_KEY, &document).await?;
        Ok(topic)
    }

    async fn load(&self) -> TopicDocument {
        self.storage.read(TOPICS_KEY).await
    }

    async fn load_for_update(&self) -> Result<TopicDocument, AppError> {
        self.storage.read_for_update(TOPICS_KEY).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::task::JoinSet;

    use super::*;
    use crate::storage::MemoryStore;

    fn repo() -> TopicRepository<MemoryStore> {
        TopicRepository::new(Storage::new(MemoryStore::new()))
    }

    fn request(title: &str) -> CreateTopicRequest {
        CreateTopicRequest {
            title: title.to_string(),
            content: "What do you think?".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_is_partitioned_by_technology() {
        let repo = repo();
        repo.create("1", request("Signals vs hooks")).await.unwrap();
        repo.create("1", request("CSS-in-JS")).await.unwrap();
        repo.create("4", request("Helm charts")).await.unwrap();

        let frontend: Vec<String> = repo.list("1").await.into_iter().map(|t| t.title).collect();
        assert_eq!(frontend, vec!["CSS-in-JS", "Signals vs hooks"]);
        assert_eq!(repo.list("4").await.len(), 1);
        assert!(repo.list("9").await.is_empty());
    }

    #[tokio::test]
    async fn test_create_starts_without_votes() {
        let repo = repo();
        let topic = repo.create("2", request("Django ORM")).await.unwrap();

        assert_eq!((topic.likes, topic.dislikes), (0, 0));
        assert_eq!(topic.user_vote, None);
        assert_eq!(topic.created_at, topic.updated_at);
    }

    #[tokio::test]
    async fn test_create_requires_title() {
        let repo = repo();
        let err = repo.create("2", request("")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_vote_like_twice_returns_to_no_vote() {
        let repo = repo();
        let topic = repo.create("3", request("Redis streams")).await.unwrap();

        let liked = repo.vote("3", &topic.id, Some(VoteKind::Like)).await.unwrap();
        assert_eq!((liked.likes, liked.dislikes), (1, 0));

        let cleared = repo.vote("3", &topic.id, Some(VoteKind::Like)).await.unwrap();
        assert_eq!((cleared.likes, cleared.dislikes), (0, 0));
        assert_eq!(cleared.user_vote, None);
        assert_eq!(repo.list("3").await[0], cleared);
    }

    #[tokio::test]
    async fn test_vote_like_then_dislike() {
        let repo = repo();
        let topic = repo.create("3", request("Redis streams")).await.unwrap();

        repo.vote("3", &topic.id, Some(VoteKind::Like)).await.unwrap();
        let switched = repo
            .vote("3", &topic.id, Some(VoteKind::Dislike))
            .await
            .unwrap();

        assert_eq!(switched.likes, 0);
        assert_eq!(switched.dislikes, 1);
        assert_eq!(switched.user_vote, Some(VoteKind::Dislike));
    }

    #[tokio::test]
    async fn test_vote_on_missing_topic_is_not_found() {
        let repo = repo();
        repo.create("3", request("Redis streams")).await.unwrap();
        let before = repo.list("3").await;

        let err = repo.vote("3", "missing", Some(VoteKind::Like)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = repo.vote("8", "missing", None).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        assert_eq!(repo.list("3").await, before);
    }

    #[tokio::test]
    async fn test_update_changes_only_given_fields() {
        let repo = repo();
        let topic = repo.create("1", request("Old title")).await.unwrap();

        let updated = repo
            .update(
                "1",
                &topic.id,
                UpdateTopicRequest {
                    title: Some("New title".to_string()),
                    content: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "New title");
        assert_eq!(updated.content, topic.content);
        assert_eq!(updated.created_at, topic.created_at);

        let err = repo
            .update("1", "missing", UpdateTopicRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_ignores_unknown() {
        let repo = repo();
        let topic = repo.create("1", request("Keep me")).await.unwrap();

        repo.delete("1", "missing").await.unwrap();
        repo.delete("7", &topic.id).await.unwrap();
        assert_eq!(repo.list("1").await.len(), 1);

        repo.delete("1", &topic.id).await.unwrap();
        assert!(repo.list("1").await.is_empty());
    }

    #[tokio::test]
    async fn test_failed_vote_write_keeps_stored_counts() {
        let repo = repo();
        let topic = repo.create("1", request("Vue 3")).await.unwrap();
        repo.storage.backend().fail_writes(true);

        let err = repo.vote("1", &topic.id, Some(VoteKind::Like)).await.unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
        assert_eq!(repo.list("1").await[0].likes, 0);
    }

    #[tokio::test]
    async fn test_read_failure_rejects_vote_and_create() {
        let repo = repo();
        let topic = repo.create("1", request("Vue 3")).await.unwrap();
        repo.create("2", request("Axum extractors")).await.unwrap();
        let before = repo.storage.read::<TopicDocument>(TOPICS_KEY).await;

        repo.storage.backend().fail_reads(true);
        let err = repo.vote("1", &topic.id, Some(VoteKind::Like)).await.unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
        let err = repo.create("1", request("Pinia")).await.unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
        let err = repo.delete("2", &topic.id).await.unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));

        repo.storage.backend().fail_reads(false);
        assert_eq!(repo.storage.read::<TopicDocument>(TOPICS_KEY).await, before);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_across_technologies_are_all_kept() {
        let repo = Arc::new(repo());
        let mut tasks = JoinSet::new();
        for i in 0..24 {
            let repo = Arc::clone(&repo);
            let tech_id = (i % 3).to_string();
            tasks.spawn(async move {
                repo.create(&tech_id, request(&format!("Topic {}", i)))
                    .await
            });
        }
        while let Some(joined) = tasks.join_next().await {
            joined.unwrap().unwrap();
        }

        for tech_id in ["0", "1", "2"] {
            assert_eq!(repo.list(tech_id).await.len(), 8);
        }
    }
}
