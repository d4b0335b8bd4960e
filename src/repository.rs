use async_trait::async_trait;

use crate::core::errors::ClientResult;
use crate::models::models::Id;

/// The collection re-listed after an accepted mutation. It fails on its own
/// without undoing the change.
pub type Refreshed<T> = ClientResult<Vec<T>>;

/// The current user's collection of one resource kind.
#[async_trait]
pub trait ResourceRepository: Send + Sync {
    type Item: Clone + Send + Sync;
    type Draft: Send + 'static;

    async fn list(&self) -> ClientResult<Vec<Self::Item>>;

    async fn create(&self, draft: Self::Draft) -> ClientResult<Refreshed<Self::Item>>;

    async fn update(&self, id: Id, draft: Self::Draft) -> ClientResult<Refreshed<Self::Item>>;

    async fn delete(&self, id: Id) -> ClientResult<Refreshed<Self::Item>>;
}

pub trait Identified {
    fn id(&self) -> Option<Id>;
}

impl Identified for crate::models::models::Post {
    fn id(&self) -> Option<Id> {
        Some(self.id)
    }
}

impl Identified for crate::models::models::LearningPlan {
    fn id(&self) -> Option<Id> {
        self.id
    }
}
