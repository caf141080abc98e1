//! Garage feature slice.
//!
//! Job cards under `/job-cards/`. Status changes and technician assignment are plain
//! `PATCH` calls; which transitions are allowed is decided by the backend.

use fdesk_domain::constants::endpoints;
use fdesk_domain::{Id, JobCard, JobCardPatch, JobCardPayload, JobCardStatus};
use fdesk_http::{ApiClient, ApiError, ListQuery, Resource};
use tracing::info;

/// Garage feature state.
#[derive(Debug, Clone)]
pub struct Garage {
    job_cards: Resource<JobCard>,
}

impl Garage {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { job_cards: Resource::new(client, endpoints::JOB_CARDS) }
    }

    pub async fn list_job_cards(&self, query: &ListQuery) -> Result<Vec<JobCard>, ApiError> {
        self.job_cards.list(query).await
    }

    /// Every job card matching `query`, across all pages.
    pub async fn all_job_cards(&self, query: &ListQuery) -> Result<Vec<JobCard>, ApiError> {
        self.job_cards.list_all(query).await
    }

    pub async fn fetch_job_card(&self, id: Id) -> Result<JobCard, ApiError> {
        self.job_cards.fetch(id).await
    }

    pub async fn create_job_card(&self, payload: &JobCardPayload) -> Result<JobCard, ApiError> {
        let card = self.job_cards.create(payload).await?;
        info!(id = card.id, number = %card.job_number, "Job card opened");
        Ok(card)
    }

    pub async fn update_job_card(
        &self,
        id: Id,
        payload: &JobCardPayload,
    ) -> Result<JobCard, ApiError> {
        self.job_cards.update(id, payload).await
    }

    pub async fn delete_job_card(&self, id: Id) -> Result<(), ApiError> {
        self.job_cards.delete(id).await
    }

    pub async fn update_job_card_status(
        &self,
        id: Id,
        status: JobCardStatus,
    ) -> Result<JobCard, ApiError> {
        let patch = JobCardPatch { status: Some(status), ..JobCardPatch::default() };
        let card = self.job_cards.patch(id, &patch).await?;
        info!(id, status = %card.status, "Job card status changed");
        Ok(card)
    }

    pub async fn assign_technician(&self, id: Id, technician: Id) -> Result<JobCard, ApiError> {
        let patch = JobCardPatch { technician: Some(technician), ..JobCardPatch::default() };
        self.job_cards.patch(id, &patch).await
    }
}
