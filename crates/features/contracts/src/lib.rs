//! Contracts feature slice.
//!
//! Wraps `/contracts/` and its nested `payments/` and `terminate/` actions. The backend
//! owns the contract lifecycle; this crate only shapes requests and derives the
//! collection figures shown next to a contract.

mod summary;

pub use crate::summary::FinancialSummary;

use chrono::NaiveDate;
use fdesk_domain::constants::endpoints;
use fdesk_domain::{
    Contract, ContractPatch, ContractPayload, Id, NewPayment, Payment, TerminateRequest,
};
use fdesk_http::{ApiClient, ApiError, ListQuery, Resource};
use tracing::info;

/// Contracts feature state.
#[derive(Debug, Clone)]
pub struct Contracts {
    contracts: Resource<Contract>,
}

impl Contracts {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { contracts: Resource::new(client, endpoints::CONTRACTS) }
    }

    pub async fn list_contracts(&self, query: &ListQuery) -> Result<Vec<Contract>, ApiError> {
        self.contracts.list(query).await
    }

    /// Every contract matching `query`, across all pages.
    pub async fn all_contracts(&self, query: &ListQuery) -> Result<Vec<Contract>, ApiError> {
        self.contracts.list_all(query).await
    }

    pub async fn fetch_contract(&self, id: Id) -> Result<Contract, ApiError> {
        self.contracts.fetch(id).await
    }

    pub async fn create_contract(&self, payload: &ContractPayload) -> Result<Contract, ApiError> {
        let contract = self.contracts.create(payload).await?;
        info!(id = contract.id, number = %contract.contract_number, "Contract created");
        Ok(contract)
    }

    /// Replaces every writable field (`PUT`).
    pub async fn update_contract(
        &self,
        id: Id,
        payload: &ContractPayload,
    ) -> Result<Contract, ApiError> {
        self.contracts.update(id, payload).await
    }

    pub async fn patch_contract(&self, id: Id, patch: &ContractPatch) -> Result<Contract, ApiError> {
        self.contracts.patch(id, patch).await
    }

    pub async fn delete_contract(&self, id: Id) -> Result<(), ApiError> {
        self.contracts.delete(id).await
    }

    pub async fn contract_payments(&self, id: Id) -> Result<Vec<Payment>, ApiError> {
        let path = self.contracts.action_path(id, endpoints::CONTRACT_PAYMENTS);
        self.contracts.client().list(&path, &ListQuery::default()).await
    }

    pub async fn record_payment(&self, id: Id, payment: &NewPayment) -> Result<Payment, ApiError> {
        let path = self.contracts.action_path(id, endpoints::CONTRACT_PAYMENTS);
        let payment: Payment = self.contracts.client().post(&path, payment).await?;
        info!(contract = id, amount = payment.amount, kind = %payment.kind, "Payment recorded");
        Ok(payment)
    }

    /// Ends a contract early. The backend sets the status and returns the contract.
    pub async fn terminate_contract(
        &self,
        id: Id,
        reason: impl Into<String>,
        termination_date: Option<NaiveDate>,
    ) -> Result<Contract, ApiError> {
        let path = self.contracts.action_path(id, endpoints::CONTRACT_TERMINATE);
        let body = TerminateRequest { reason: reason.into(), termination_date };
        let contract: Contract = self.contracts.client().post(&path, &body).await?;
        info!(id, status = %contract.status, "Contract terminated");
        Ok(contract)
    }

    /// Fetches a contract and its payments concurrently and derives the collection figures.
    pub async fn financial_summary(&self, id: Id) -> Result<FinancialSummary, ApiError> {
        let (contract, payments) =
            tokio::try_join!(self.fetch_contract(id), self.contract_payments(id))?;
        Ok(FinancialSummary::new(contract, payments))
    }
}
