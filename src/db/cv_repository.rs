use async_trait::async_trait;

use crate::db::models::Cv;
use crate::error::AppError;

/// Repository trait for CVs. Only active CVs are ever returned.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CvRepository: Send + Sync {
    /// Active CVs whose title or content contains `query` (case-insensitive),
    /// in storage order.
    async fn search_active(&self, query: &str) -> Result<Vec<Cv>, AppError>;

    /// All active CVs, in storage order.
    async fn list_active(&self) -> Result<Vec<Cv>, AppError>;

    /// Create a CV or replace the one with the same id.
    async fn create_or_update(&self, cv: Cv) -> Result<(), AppError>;
}

/// MongoDB implementation of the CvRepository.
pub struct MongoCvRepository {
    collection: mongodb::Collection<Cv>,
}

impl MongoCvRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection("cvs"),
        }
    }
}

#[async_trait]
impl CvRepository for MongoCvRepository {
    async fn search_active(&self, query: &str) -> Result<Vec<Cv>, AppError> {
        use crate::db::query::{collect_all, contains_ci};
        use mongodb::bson::doc;

        let clauses = vec![contains_ci("title", query), contains_ci("content", query)];
        let filter = doc! {
            "is_active": true,
            "$or": clauses,
        };

        let cursor = self.collection.find(filter).await?;
        collect_all(cursor).await
    }

    async fn list_active(&self) -> Result<Vec<Cv>, AppError> {
        use crate::db::query::collect_all;
        use mongodb::bson::doc;

        let cursor = self.collection.find(doc! { "is_active": true }).await?;
        collect_all(cursor).await
    }

    async fn create_or_update(&self, cv: Cv) -> Result<(), AppError> {
        use mongodb::bson::doc;
        use mongodb::options::ReplaceOptions;

        let options = ReplaceOptions::builder().upsert(true).build();

        self.collection
            .replace_one(doc! { "_id": cv.id }, &cv)
            .with_options(options)
            .await?;

        Ok(())
    }
}
