use async_trait::async_trait;
use reqwest::Method;
use tracing::info;

use crate::core::errors::ClientResult;
use crate::core::http::ApiClient;
use crate::forms::learning_plan::LearningPlanForm;
use crate::lifecycle::{ResourceLabels, ResourceView};
use crate::models::models::{Id, LearningPlan};
use crate::repository::{Refreshed, ResourceRepository};

pub const PLAN_LABELS: ResourceLabels = ResourceLabels {
    load_failed: "Could not fetch learning plans",
    created: "Learning plan created!",
    create_failed: "Failed to add plan!",
    updated: "Plan updated!",
    update_failed: "Update failed!",
    deleted: "Plan deleted!",
    delete_failed: "Failed to delete plan.",
    empty_call_to_action: "Create your first learning plan to track your progress",
};

pub type LearningPlansView = ResourceView<LearningPlanRepository, LearningPlanForm>;

#[derive(Debug, Clone)]
pub struct LearningPlanRepository {
    api: ApiClient,
}

impl LearningPlanRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    // The backend saves by id, so create and update share one endpoint.
    async fn save(&self, plan: &LearningPlan) -> ClientResult<()> {
        self.api.send_json(Method::POST, "learning-plans", plan).await
    }
}

#[async_trait]
impl ResourceRepository for LearningPlanRepository {
    type Item = LearningPlan;
    type Draft = LearningPlan;

    async fn list(&self) -> ClientResult<Vec<LearningPlan>> {
        self.api.get("learning-plans/my").await
    }

    async fn create(&self, mut plan: LearningPlan) -> ClientResult<Refreshed<LearningPlan>> {
        plan.id = None;
        self.save(&plan).await?;
        info!(title = %plan.title, "Learning plan created");
        Ok(self.list().await)
    }

    async fn update(&self, id: Id, mut plan: LearningPlan) -> ClientResult<Refreshed<LearningPlan>> {
        plan.id = Some(id);
        self.save(&plan).await?;
        info!(id, "Learning plan updated");
        Ok(self.list().await)
    }

    async fn delete(&self, id: Id) -> ClientResult<Refreshed<LearningPlan>> {
        self.api.delete(&format!("learning-plans/{id}")).await?;
        info!(id, "Learning plan deleted");
        Ok(self.list().await)
    }
}
