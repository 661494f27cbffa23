//! Blog post repository.

use chrono::Local;
use tokio::sync::Mutex;

use super::{require_title, timestamp_id};
use crate::errors::AppError;
use crate::models::{
    Author, BlogPost, Category, CreatePostRequest, PostDocument, POSTS_KEY, POST_DATE_FORMAT,
};
use crate::storage::{KeyValueStore, Storage};

/// Number of posts returned by [`PostRepository::recent`] when no count is given.
pub const DEFAULT_RECENT_COUNT: usize = 5;

/// Blog posts, newest first.
pub struct PostRepository<S> {
    storage: Storage<S>,
    default_author: Author,
    write_lock: Mutex<()>,
}

impl<S: KeyValueStore> PostRepository<S> {
    pub fn new(storage: Storage<S>, default_author: Author) -> Self {
        Self {
            storage,
            default_author,
            write_lock: Mutex::new(()),
        }
    }

    /// List all posts in collection order.
    pub async fn list(&self) -> Vec<BlogPost> {
        self.load().await.posts
    }

    /// The `count` most recently dated posts. Posts with unparsable dates come last.
    pub async fn recent(&self, count: usize) -> Vec<BlogPost> {
        let mut posts = self.list().await;
        posts.sort_by(|a, b| b.published_on().cmp(&a.published_on()));
        posts.truncate(count);
        posts
    }

    /// Create a post stamped with today's date and the default author.
    pub async fn create(&self, request: CreatePostRequest) -> Result<BlogPost, AppError> {
        validate(&request.title, request.read_time)?;

        let _guard = self.write_lock.lock().await;
        let mut document = self.load_for_update().await?;

        let id = timestamp_id(|id| document.posts.iter().any(|p| p.id == id));
        let post = BlogPost {
            id,
            title: request.title,
            excerpt: request.excerpt,
            content: request.content,
            image: request.image,
            category: request.category,
            date: Local::now().format(POST_DATE_FORMAT).to_string(),
            read_time: request.read_time,
            author: self.default_author.clone(),
        };

        document.posts.insert(0, post.clone());
        self.storage.write(POSTS_KEY, &document).await?;

        tracing::info!("Created post {}", post.id);
        Ok(post)
    }

    /// Replace the post with the same id. Its position in the collection is kept.
    pub async fn update(&self, post: BlogPost) -> Result<BlogPost, AppError> {
        validate(&post.title, post.read_time)?;

        let _guard = self.write_lock.lock().await;
        let mut document = self.load_for_update().await?;

        let slot = document
            .posts
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or_else(|| AppError::NotFound(format!("Post {} not found", post.id)))?;
        *slot = post.clone();

        self.storage.write(POSTS_KEY, &document).await?;

        tracing::info!("Updated post {}", post.id);
        Ok(post)
    }

    /// Delete a post. Unknown ids are ignored.
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.load_for_update().await?;

        let before = document.posts.len();
        document.posts.retain(|p| p.id != id);
        if document.posts.len() == before {
            tracing::debug!("Delete of unknown post {} ignored", id);
            return Ok(());
        }

        self.storage.write(POSTS_KEY, &document).await?;
        tracing::info!("Deleted post {}", id);
        Ok(())
    }

    /// Write the default posts if the collection is empty. Returns whether anything was written.
    pub async fn seed_defaults(&self) -> Result<bool, AppError> {
        let _guard = self.write_lock.lock().await;
        let document = self.load_for_update().await?;
        if !document.posts.is_empty() {
            return Ok(false);
        }

        let document = PostDocument {
            posts: default_posts(&self.default_author),
        };
        self.storage.write(POSTS_KEY, &document).await?;

        tracing::info!("Seeded {} default posts", document.posts.len());
        Ok(true)
    }

    async fn load(&self) -> PostDocument {
        self.storage.read(POSTS_KEY).await
    }

    async fn load_for_update(&self) -> Result<PostDocument, AppError> {
        self.storage.read_for_update(POSTS_KEY).await
    }
}

fn validate(title: &str, read_time: u32) -> Result<(), AppError> {
    require_title("Post", title)?;
    if read_time == 0 {
        return Err(AppError::Validation(
            "Read time must be at least one minute".to_string(),
        ));
    }
    Ok(())
}

fn default_posts(author: &Author) -> Vec<BlogPost> {
    vec![
        BlogPost {
            id: "1".to_string(),
            title: "The Future of Web Development: What to Expect in 2024".to_string(),
            excerpt: "Explore the upcoming trends and technologies that will shape web development in the coming year.".to_string(),
            content: "# The Future of Web Development: What to Expect in 2024\n\n\
                ## Key Trends\n\n\
                ### 1. WebAssembly Goes Mainstream\n\n\
                WebAssembly enables high-performance code in the browser, written in languages like Rust and C++.\n\n\
                ### 2. AI-Driven Development\n\n\
                From code completion to automated testing, AI is becoming part of the everyday toolchain.\n\n\
                ### 3. Edge Computing\n\n\
                Running code close to users is changing how applications are architected and deployed.\n"
                .to_string(),
            image: "https://images.unsplash.com/photo-1461749280684-dccba630e2f6?q=80&w=2069".to_string(),
            category: Category::WebDevelopment,
            date: "Mar 15, 2024".to_string(),
            read_time: 5,
            author: author.clone(),
        },
        BlogPost {
            id: "2".to_string(),
            title: "Mastering Cloud Architecture: Best Practices".to_string(),
            excerpt: "Learn the essential principles and best practices for building scalable cloud architectures.".to_string(),
            content: "# Mastering Cloud Architecture: Best Practices\n\n\
                ## Key Principles\n\n\
                ### 1. Security First\n\n\
                Design authentication and authorization in from the start.\n\n\
                ### 2. Scalability\n\n\
                Prefer systems that scale horizontally under load.\n\n\
                ### 3. Cost Optimization\n\n\
                Keep spend proportional to the performance you actually need.\n"
                .to_string(),
            image: "https://images.unsplash.com/photo-1451187580459-43490279c0fa?q=80&w=2072".to_string(),
            category: Category::CloudComputing,
            date: "Mar 12, 2024".to_string(),
            read_time: 7,
            author: author.clone(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::task::JoinSet;

    use super::*;
    use crate::storage::MemoryStore;

    fn author() -> Author {
        Author {
            name: "Site Owner".to_string(),
            avatar: "/images/avatar.png".to_string(),
        }
    }

    fn repo() -> PostRepository<MemoryStore> {
        PostRepository::new(Storage::new(MemoryStore::new()), author())
    }

    fn request(title: &str) -> CreatePostRequest {
        CreatePostRequest {
            title: title.to_string(),
            excerpt: format!("About {}", title),
            content: "Body".to_string(),
            image: String::new(),
            category: Category::Security,
            read_time: 4,
        }
    }

    fn titles(posts: &[BlogPost]) -> Vec<&str> {
        posts.iter().map(|p| p.title.as_str()).collect()
    }

    #[tokio::test]
    async fn test_create_lists_newest_first() {
        let repo = repo();
        repo.create(request("A")).await.unwrap();
        repo.create(request("B")).await.unwrap();

        let posts = repo.list().await;
        assert_eq!(titles(&posts), vec!["B", "A"]);
    }

    #[tokio::test]
    async fn test_create_assigns_unique_ids_and_stamps() {
        let repo = repo();
        let mut ids = Vec::new();
        for i in 0..10 {
            let post = repo.create(request(&format!("Post {}", i))).await.unwrap();
            assert_eq!(post.author, author());
            assert!(post.published_on().is_some());
            assert_eq!(repo.list().await[0].id, post.id);
            ids.push(post.id);
        }

        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input() {
        let repo = repo();

        let err = repo.create(request("  ")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let mut zero_minutes = request("Quick");
        zero_minutes.read_time = 0;
        let err = repo.create(zero_minutes).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        assert!(repo.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_in_place() {
        let repo = repo();
        let first = repo.create(request("A")).await.unwrap();
        repo.create(request("B")).await.unwrap();

        let mut edited = first.clone();
        edited.title = "A, revised".to_string();
        edited.category = Category::DevOps;
        let updated = repo.update(edited.clone()).await.unwrap();

        assert_eq!(updated, edited);
        assert_eq!(titles(&repo.list().await), vec!["B", "A, revised"]);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found_and_unchanged() {
        let repo = repo();
        let existing = repo.create(request("A")).await.unwrap();
        let before = repo.list().await;

        let mut ghost = existing.clone();
        ghost.id = "does-not-exist".to_string();
        let err = repo.update(ghost).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(repo.list().await, before);
    }

    #[tokio::test]
    async fn test_delete_removes_and_ignores_unknown() {
        let repo = repo();
        let a = repo.create(request("A")).await.unwrap();
        repo.create(request("B")).await.unwrap();

        repo.delete("unknown").await.unwrap();
        assert_eq!(repo.list().await.len(), 2);

        repo.delete(&a.id).await.unwrap();
        assert_eq!(titles(&repo.list().await), vec!["B"]);
    }

    #[tokio::test]
    async fn test_write_failure_aborts_create() {
        let store = MemoryStore::new();
        store.fail_writes(true);
        let repo = PostRepository::new(Storage::new(store), author());

        let err = repo.create(request("A")).await.unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
        assert!(repo.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_read_failure_aborts_mutations_without_writing() {
        let repo = repo();
        repo.seed_defaults().await.unwrap();
        let seeded = repo.list().await;

        repo.storage.backend().fail_reads(true);
        let err = repo.create(request("New")).await.unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
        let err = repo.update(seeded[0].clone()).await.unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
        let err = repo.delete(&seeded[1].id).await.unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
        let err = repo.seed_defaults().await.unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));

        repo.storage.backend().fail_reads(false);
        assert_eq!(repo.list().await, seeded);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_are_all_kept() {
        let repo = Arc::new(repo());
        let mut tasks = JoinSet::new();
        for i in 0..32 {
            let repo = Arc::clone(&repo);
            tasks.spawn(async move { repo.create(request(&format!("Post {}", i))).await });
        }
        while let Some(joined) = tasks.join_next().await {
            joined.unwrap().unwrap();
        }

        let posts = repo.list().await;
        assert_eq!(posts.len(), 32);
        let mut ids: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 32);
    }

    #[tokio::test]
    async fn test_recent_orders_by_date() {
        let repo = repo();
        repo.seed_defaults().await.unwrap();

        let mut undated = repo.create(request("Undated")).await.unwrap();
        undated.date = "someday".to_string();
        repo.update(undated).await.unwrap();

        let mut old = repo.create(request("Old")).await.unwrap();
        old.date = "Jan 2, 2020".to_string();
        repo.update(old).await.unwrap();

        let recent = repo.recent(10).await;
        assert_eq!(
            titles(&recent),
            vec![
                "The Future of Web Development: What to Expect in 2024",
                "Mastering Cloud Architecture: Best Practices",
                "Old",
                "Undated",
            ]
        );

        assert_eq!(repo.recent(1).await.len(), 1);
    }

    #[tokio::test]
    async fn test_seed_defaults_only_into_empty_collection() {
        let repo = repo();
        assert!(repo.seed_defaults().await.unwrap());
        assert_eq!(repo.list().await.len(), 2);

        assert!(!repo.seed_defaults().await.unwrap());
        assert_eq!(repo.list().await.len(), 2);

        let other = self::repo();
        other.create(request("Mine")).await.unwrap();
        assert!(!other.seed_defaults().await.unwrap());
        assert_eq!(titles(&other.list().await), vec!["Mine"]);
    }
}
