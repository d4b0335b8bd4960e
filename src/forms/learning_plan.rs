use chrono::NaiveDate;

use crate::core::errors::{ClientError, ClientResult};
use crate::core::helpers::parse_date;
use crate::forms::list_text::{join_list, split_list};
use crate::forms::{is_blank, Mode, ResourceForm};
use crate::models::models::{LearningPlan, Progress};

pub const MSG_REQUIRED: &str = "Please fill out all fields";
pub const MSG_BAD_DATE: &str = "Please enter a valid target date";
pub const MSG_PAST_DATE: &str = "Target date cannot be in the past.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LearningPlanForm {
    pub title: String,
    pub topics: String,
    pub resources: String,
    pub target_date: String,
    pub progress: Progress,
}

impl ResourceForm for LearningPlanForm {
    type Item = LearningPlan;
    type Draft = LearningPlan;

    fn from_item(plan: &LearningPlan) -> Self {
        Self {
            title: plan.title.clone(),
            topics: join_list(&plan.topics),
            resources: join_list(&plan.resources),
            target_date: plan.target_date.format("%Y-%m-%d").to_string(),
            progress: plan.progress,
        }
    }

    fn validate(&self, mode: Mode, today: NaiveDate) -> ClientResult<LearningPlan> {
        let topics = split_list(&self.topics);
        let resources = split_list(&self.resources);
        if is_blank(&self.title) || topics.is_empty() || resources.is_empty() || is_blank(&self.target_date) {
            return Err(ClientError::validation(MSG_REQUIRED));
        }

        let target_date = parse_date(&self.target_date).ok_or_else(|| ClientError::validation(MSG_BAD_DATE))?;
        if target_date < today {
            return Err(ClientError::validation(MSG_PAST_DATE));
        }

        Ok(LearningPlan {
            id: match mode {
                Mode::Create => None,
                Mode::Edit(id) => Some(id),
            },
            title: self.title.trim().to_string(),
            topics,
            resources,
            target_date,
            progress: self.progress,
        })
    }
}
