use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::db::models::BlogPost;
use crate::db::pagination::{Page, PageRequest};
use crate::error::AppError;

/// Repository trait for blog posts.
///
/// Every read method applies the public visibility gate (published, and
/// `published_at` not in the future relative to `now`).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlogPostRepository: Send + Sync {
    /// Published posts whose title, content or excerpt contains `query`
    /// (case-insensitive), newest first.
    async fn search_published(
        &self,
        query: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<BlogPost>, AppError>;

    /// One page of published posts, newest first.
    async fn list_published(
        &self,
        now: DateTime<Utc>,
        page: PageRequest,
    ) -> Result<Page<BlogPost>, AppError>;

    /// Find a published post by its slug.
    async fn find_published_by_slug(
        &self,
        slug: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<BlogPost>, AppError>;

    /// Create a post or replace the one with the same id.
    async fn create_or_update(&self, post: BlogPost) -> Result<(), AppError>;
}

/// MongoDB implementation of the BlogPostRepository.
pub struct MongoBlogPostRepository {
    collection: mongodb::Collection<BlogPost>,
}

impl MongoBlogPostRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection("blog_posts"),
        }
    }

    fn published_filter(now: DateTime<Utc>) -> mongodb::bson::Document {
        mongodb::bson::doc! {
            "is_published": true,
            "published_at": { "$lte": mongodb::bson::DateTime::from_chrono(now) },
        }
    }
}

#[async_trait]
impl BlogPostRepository for MongoBlogPostRepository {
    async fn search_published(
        &self,
        query: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<BlogPost>, AppError> {
        use crate::db::query::{collect_all, contains_ci};
        use mongodb::bson::doc;
        use mongodb::options::FindOptions;

        let mut filter = Self::published_filter(now);
        filter.insert(
            "$or",
            vec![
                contains_ci("title", query),
                contains_ci("content", query),
                contains_ci("excerpt", query),
            ],
        );

        // _id breaks ties so repeated searches return the same order
        let options = FindOptions::builder()
            .sort(doc! { "published_at": -1, "_id": 1 })
            .build();

        let cursor = self.collection.find(filter).with_options(options).await?;
        collect_all(cursor).await
    }

    async fn list_published(
        &self,
        now: DateTime<Utc>,
        page: PageRequest,
    ) -> Result<Page<BlogPost>, AppError> {
        use crate::db::query::collect_all;
        use mongodb::bson::doc;
        use mongodb::options::FindOptions;

        let filter = Self::published_filter(now);
        let total = self.collection.count_documents(filter.clone()).await?;

        let options = FindOptions::builder()
            .sort(doc! { "published_at": -1, "_id": 1 })
            .skip(page.offset())
            .limit(page.per_page as i64)
            .build();

        let cursor = self.collection.find(filter).with_options(options).await?;
        let items = collect_all(cursor).await?;

        Ok(Page::new(items, page, total))
    }

    async fn find_published_by_slug(
        &self,
        slug: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<BlogPost>, AppError> {
        let mut filter = Self::published_filter(now);
        filter.insert("slug", slug);

        Ok(self.collection.find_one(filter).await?)
    }

    async fn create_or_update(&self, post: BlogPost) -> Result<(), AppError> {
        use mongodb::bson::doc;
        use mongodb::options::ReplaceOptions;

        let filter = doc! { "_id": post.id };
        let options = ReplaceOptions::builder().upsert(true).build();

        self.collection
            .replace_one(filter, &post)
            .with_options(options)
            .await?;

        Ok(())
    }
}
