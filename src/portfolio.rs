use crate::config::RetainerConfig;
use crate::error::RetainerResult;
use crate::filters::RetainerFilters;
use crate::record::TimeRecord;
use crate::view::{RetainerView, compute_retainer_view_at};
use chrono::{Local, NaiveDate};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// One retainer project with its own policy and time history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectInput {
    pub project_id: String,
    pub config: RetainerConfig,
    pub records: Vec<TimeRecord>,
}

#[derive(Debug, Clone)]
pub struct ProjectView {
    pub project_id: String,
    pub result: RetainerResult<RetainerView>,
}

pub fn compute_portfolio(projects: &[ProjectInput], filters: &RetainerFilters) -> Vec<ProjectView> {
    compute_portfolio_at(projects, filters, Local::now().date_naive())
}

/// Computes every project independently, in parallel. Output order matches input.
pub fn compute_portfolio_at(
    projects: &[ProjectInput],
    filters: &RetainerFilters,
    today: NaiveDate,
) -> Vec<ProjectView> {
    projects
        .par_iter()
        .map(|project| ProjectView {
            project_id: project.project_id.clone(),
            result: compute_retainer_view_at(&project.records, &project.config, filters, today),
        })
        .collect()
}
