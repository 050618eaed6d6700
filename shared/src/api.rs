//! The backend operations the dashboard consumes.
//!
//! [`FleetApi`] is implemented over HTTP by the front end's `ApiClient` and by
//! in-memory fakes in the workflow tests.

use async_trait::async_trait;

use crate::forms::{FormPayload, Submission};
use crate::query::AnalysisFilters;
use crate::{
    AnalysisResult, Dashboard, ExpenseList, FilterOptions, MutationAck, PerDiem, RecordId,
    RequestFailure, Resource,
};

pub type ApiResult<T> = Result<T, RequestFailure>;

#[async_trait(?Send)]
pub trait FleetApi {
    /// `GET /dashboard`
    async fn dashboard(&self) -> ApiResult<Dashboard>;

    /// `GET /gastos`, records plus the warranty summary
    async fn list_expenses(&self) -> ApiResult<ExpenseList>;

    /// `GET /diarias`
    async fn list_per_diems(&self) -> ApiResult<Vec<PerDiem>>;

    /// `GET /analise` with the given filters
    async fn analysis(&self, filters: &AnalysisFilters) -> ApiResult<AnalysisResult>;

    /// `GET /filtros`
    async fn filter_options(&self) -> ApiResult<FilterOptions>;

    /// POST to the collection or PUT to the item, depending on the submission mode
    async fn submit(&self, submission: &Submission) -> ApiResult<MutationAck>;

    /// `DELETE /{resource}/{id}`
    async fn delete(&self, resource: Resource, id: &RecordId) -> ApiResult<MutationAck>;

    async fn create_expense(&self, payload: &FormPayload) -> ApiResult<MutationAck> {
        self.submit(&mutation(Resource::Expenses, None, payload)).await
    }

    async fn update_expense(&self, id: &RecordId, payload: &FormPayload) -> ApiResult<MutationAck> {
        self.submit(&mutation(Resource::Expenses, Some(id), payload)).await
    }

    async fn delete_expense(&self, id: &RecordId) -> ApiResult<MutationAck> {
        self.delete(Resource::Expenses, id).await
    }

    async fn create_per_diem(&self, payload: &FormPayload) -> ApiResult<MutationAck> {
        self.submit(&mutation(Resource::PerDiems, None, payload)).await
    }

    async fn update_per_diem(&self, id: &RecordId, payload: &FormPayload) -> ApiResult<MutationAck> {
        self.submit(&mutation(Resource::PerDiems, Some(id), payload)).await
    }

    async fn delete_per_diem(&self, id: &RecordId) -> ApiResult<MutationAck> {
        self.delete(Resource::PerDiems, id).await
    }
}

fn mutation(resource: Resource, id: Option<&RecordId>, payload: &FormPayload) -> Submission {
    Submission {
        resource,
        id: id.cloned(),
        payload: payload.clone(),
    }
}
