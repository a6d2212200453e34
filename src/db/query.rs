use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Build a filter matching documents whose `field` contains `query` as a
/// case-insensitive substring. The query is escaped, so regex metacharacters
/// in user input match literally.
pub(crate) fn contains_ci(field: &str, query: &str) -> Document {
    let mut filter = Document::new();
    filter.insert(
        field,
        doc! {
            "$regex": regex::escape(query),
            "$options": "i",
        },
    );
    filter
}

/// Drain a cursor into a `Vec`, mapping driver errors to [`AppError::Database`].
pub(crate) async fn collect_all<T>(cursor: mongodb::Cursor<T>) -> Result<Vec<T>, AppError>
where
    T: DeserializeOwned + Send + Sync + Unpin,
{
    cursor
        .try_collect()
        .await
        .map_err(|e| AppError::Database(e.to_string()))
}
