//! Mutation workflows: submit, delete, edit lookup and the refresh cascade.
//!
//! The UI supplies confirmation, notification and reload capabilities through
//! small traits so the same flow runs in the browser and in unit tests.

use crate::api::FleetApi;
use crate::forms::Submission;
use crate::notifications::NotificationKind;
use crate::{Expense, MutationAck, RecordId, RequestFailure, Resource};

/// Interactive yes/no prompt
pub trait Confirmer {
    fn confirm(&self, message: &str) -> bool;
}

pub trait Notifier {
    fn notify(&self, kind: NotificationKind, message: String);
}

/// Reload hooks triggered after a successful mutation
pub trait Refresher {
    fn reload_list(&self, resource: Resource);
    fn reload_dashboard(&self);
    fn analysis_active(&self) -> bool;
    fn reload_analysis(&self);
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Saved(MutationAck),
    Failed(RequestFailure),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    Cancelled,
    Deleted(MutationAck),
    Failed(RequestFailure),
}

/// User-facing text for a failed action. Server-side rejections already carry
/// a readable message and are shown unchanged.
pub fn failure_message(action: &str, failure: &RequestFailure) -> String {
    match failure {
        RequestFailure::Application(message) => message.clone(),
        other => format!("{}: {}", action, other),
    }
}

pub fn delete_prompt(resource: Resource, id: &RecordId) -> String {
    format!("Tem certeza que deseja excluir {} ID {}?", resource.noun_with_article(), id)
}

/// Reload the owning list, the dashboard, and the analysis when it is on screen
pub fn refresh_after_mutation(resource: Resource, refresher: &dyn Refresher) {
    refresher.reload_list(resource);
    refresher.reload_dashboard();
    if refresher.analysis_active() {
        refresher.reload_analysis();
    }
}

/// Send a create or update. The caller resets its form on `Saved`.
pub async fn submit_form(
    api: &dyn FleetApi,
    submission: &Submission,
    notifier: &dyn Notifier,
    refresher: &dyn Refresher,
) -> SubmitOutcome {
    match api.submit(submission).await {
        Ok(ack) => {
            notifier.notify(NotificationKind::Success, ack.message_or_default());
            refresh_after_mutation(submission.resource, refresher);
            SubmitOutcome::Saved(ack)
        }
        Err(failure) => {
            let action = format!("Erro ao {} {}", submission.verb(), submission.resource.noun());
            notifier.notify(NotificationKind::Error, failure_message(&action, &failure));
            SubmitOutcome::Failed(failure)
        }
    }
}

/// Ask for confirmation, then delete and refresh
pub async fn delete_record(
    api: &dyn FleetApi,
    resource: Resource,
    id: &RecordId,
    confirmer: &dyn Confirmer,
    notifier: &dyn Notifier,
    refresher: &dyn Refresher,
) -> DeleteOutcome {
    if !confirmer.confirm(&delete_prompt(resource, id)) {
        return DeleteOutcome::Cancelled;
    }
    match api.delete(resource, id).await {
        Ok(ack) => {
            notifier.notify(NotificationKind::Success, ack.message_or_default());
            refresh_after_mutation(resource, refresher);
            DeleteOutcome::Deleted(ack)
        }
        Err(failure) => {
            let action = format!("Erro ao excluir {}", resource.noun());
            notifier.notify(NotificationKind::Error, failure_message(&action, &failure));
            DeleteOutcome::Failed(failure)
        }
    }
}

/// Fetch the expense list and pick the record to edit.
/// Failures and unknown ids are reported through `notifier`.
pub async fn find_expense(
    api: &dyn FleetApi,
    id: &RecordId,
    notifier: &dyn Notifier,
) -> Option<Expense> {
    match api.list_expenses().await {
        Ok(list) => {
            let found = list.expenses.into_iter().find(|e| &e.id == id);
            if found.is_none() {
                notifier.notify(NotificationKind::Error, format!("Gasto ID {} não encontrado.", id));
            }
            found
        }
        Err(failure) => {
            notifier.notify(NotificationKind::Error, failure_message("Erro ao carregar gasto", &failure));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiResult;
    use crate::forms::{ExpenseForm, ExpenseField};
    use crate::query::AnalysisFilters;
    use crate::{AnalysisResult, Dashboard, ExpenseList, FilterOptions, PerDiem};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct FakeApi {
        expenses: Vec<Expense>,
        fail_with: Option<RequestFailure>,
        deletes: Cell<u32>,
        submits: RefCell<Vec<String>>,
    }

    impl FakeApi {
        fn outcome(&self) -> ApiResult<MutationAck> {
            match &self.fail_with {
                Some(failure) => Err(failure.clone()),
                None => Ok(MutationAck {
                    mensagem: Some("Gasto registrado com sucesso!".to_string()),
                    id: None,
                }),
            }
        }
    }

    #[async_trait(?Send)]
    impl FleetApi for FakeApi {
        async fn dashboard(&self) -> ApiResult<Dashboard> {
            Ok(Dashboard::default())
        }
        async fn list_expenses(&self) -> ApiResult<ExpenseList> {
            match &self.fail_with {
                Some(failure) => Err(failure.clone()),
                None => Ok(ExpenseList { expenses: self.expenses.clone(), summary: None }),
            }
        }
        async fn list_per_diems(&self) -> ApiResult<Vec<PerDiem>> {
            Ok(vec![])
        }
        async fn analysis(&self, _filters: &AnalysisFilters) -> ApiResult<AnalysisResult> {
            Ok(AnalysisResult::default())
        }
        async fn filter_options(&self) -> ApiResult<FilterOptions> {
            Ok(FilterOptions::default())
        }
        async fn submit(&self, submission: &Submission) -> ApiResult<MutationAck> {
            self.submits
                .borrow_mut()
                .push(format!("{} {}", submission.method().as_str(), submission.path()));
            self.outcome()
        }
        async fn delete(&self, _resource: Resource, _id: &RecordId) -> ApiResult<MutationAck> {
            self.deletes.set(self.deletes.get() + 1);
            self.outcome()
        }
    }

    struct FixedAnswer(bool);

    impl Confirmer for FixedAnswer {
        fn confirm(&self, _message: &str) -> bool {
            self.0
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        messages: RefCell<Vec<(NotificationKind, String)>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, kind: NotificationKind, message: String) {
            self.messages.borrow_mut().push((kind, message));
        }
    }

    #[derive(Default)]
    struct CountingRefresher {
        analysis_on_screen: bool,
        lists: RefCell<Vec<Resource>>,
        dashboards: Cell<u32>,
        analyses: Cell<u32>,
    }

    impl Refresher for CountingRefresher {
        fn reload_list(&self, resource: Resource) {
            self.lists.borrow_mut().push(resource);
        }
        fn reload_dashboard(&self) {
            self.dashboards.set(self.dashboards.get() + 1);
        }
        fn analysis_active(&self) -> bool {
            self.analysis_on_screen
        }
        fn reload_analysis(&self) {
            self.analyses.set(self.analyses.get() + 1);
        }
    }

    fn expense(id: i64) -> Expense {
        Expense {
            id: RecordId::Number(id),
            date: "2024-01-15".to_string(),
            vehicle: "Carro A".to_string(),
            plate: "ABC-1234".to_string(),
            driver: "João Silva".to_string(),
            expense_type: "Manutencao".to_string(),
            amount: 350.5,
            invoice_number: None,
            service_order: None,
            warranty_expiry: None,
            notes: None,
            registered_at: None,
            warranty_status: None,
        }
    }

    #[tokio::test]
    async fn test_cancelled_delete_sends_nothing() {
        let api = FakeApi::default();
        let notifier = RecordingNotifier::default();
        let refresher = CountingRefresher::default();

        let outcome = delete_record(
            &api,
            Resource::Expenses,
            &RecordId::from(5),
            &FixedAnswer(false),
            &notifier,
            &refresher,
        )
        .await;

        assert_eq!(outcome, DeleteOutcome::Cancelled);
        assert_eq!(api.deletes.get(), 0);
        assert!(refresher.lists.borrow().is_empty());
        assert_eq!(refresher.dashboards.get(), 0);
        assert!(notifier.messages.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_confirmed_delete_reloads_once() {
        let api = FakeApi::default();
        let notifier = RecordingNotifier::default();
        let refresher = CountingRefresher::default();

        let outcome = delete_record(
            &api,
            Resource::PerDiems,
            &RecordId::from(5),
            &FixedAnswer(true),
            &notifier,
            &refresher,
        )
        .await;

        assert!(matches!(outcome, DeleteOutcome::Deleted(_)));
        assert_eq!(api.deletes.get(), 1);
        assert_eq!(*refresher.lists.borrow(), vec![Resource::PerDiems]);
        assert_eq!(refresher.dashboards.get(), 1);
        assert_eq!(refresher.analyses.get(), 0);
        assert_eq!(notifier.messages.borrow()[0].0, NotificationKind::Success);
    }

    #[tokio::test]
    async fn test_failed_delete_leaves_lists_alone() {
        let api = FakeApi {
            fail_with: Some(RequestFailure::Transport("offline".to_string())),
            ..Default::default()
        };
        let notifier = RecordingNotifier::default();
        let refresher = CountingRefresher::default();

        let outcome = delete_record(
            &api,
            Resource::Expenses,
            &RecordId::from(9),
            &FixedAnswer(true),
            &notifier,
            &refresher,
        )
        .await;

        assert!(matches!(outcome, DeleteOutcome::Failed(_)));
        assert!(refresher.lists.borrow().is_empty());
        let messages = notifier.messages.borrow();
        assert_eq!(messages[0].0, NotificationKind::Error);
        assert_eq!(messages[0].1, "Erro ao excluir gasto: Falha de conexão: offline");
    }

    #[tokio::test]
    async fn test_submit_refreshes_analysis_when_visible() {
        let api = FakeApi::default();
        let notifier = RecordingNotifier::default();
        let refresher = CountingRefresher { analysis_on_screen: true, ..Default::default() };
        let mut form = ExpenseForm::new(NaiveDate::from_ymd_opt(2024, 1, 20).unwrap());
        form.set(ExpenseField::Vehicle, "Carro A");

        let outcome = submit_form(&api, &form.submission(), &notifier, &refresher).await;

        assert!(matches!(outcome, SubmitOutcome::Saved(_)));
        assert_eq!(*api.submits.borrow(), vec!["POST /gastos"]);
        assert_eq!(*refresher.lists.borrow(), vec![Resource::Expenses]);
        assert_eq!(refresher.dashboards.get(), 1);
        assert_eq!(refresher.analyses.get(), 1);
        assert_eq!(notifier.messages.borrow()[0].1, "Gasto registrado com sucesso!");
    }

    #[tokio::test]
    async fn test_submit_failure_messages() {
        let notifier = RecordingNotifier::default();
        let refresher = CountingRefresher::default();
        let mut form = ExpenseForm::new(NaiveDate::from_ymd_opt(2024, 1, 20).unwrap());
        form.load_from(&expense(4));

        let api = FakeApi {
            fail_with: Some(RequestFailure::HttpStatus { status: 500, message: "falhou".to_string() }),
            ..Default::default()
        };
        let outcome = submit_form(&api, &form.submission(), &notifier, &refresher).await;
        assert!(matches!(outcome, SubmitOutcome::Failed(_)));

        let api = FakeApi {
            fail_with: Some(RequestFailure::Application("Placa inválida".to_string())),
            ..Default::default()
        };
        submit_form(&api, &form.submission(), &notifier, &refresher).await;

        let messages = notifier.messages.borrow();
        assert_eq!(messages[0].1, "Erro ao editar gasto: Erro HTTP 500: falhou");
        assert_eq!(messages[1].1, "Placa inválida");
        assert!(refresher.lists.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_find_expense() {
        let api = FakeApi { expenses: vec![expense(1), expense(2)], ..Default::default() };
        let notifier = RecordingNotifier::default();

        let found = find_expense(&api, &RecordId::from(2), &notifier).await;
        assert_eq!(found.map(|e| e.id), Some(RecordId::Number(2)));

        let missing = find_expense(&api, &RecordId::from(9), &notifier).await;
        assert!(missing.is_none());
        assert_eq!(notifier.messages.borrow()[0].1, "Gasto ID 9 não encontrado.");
    }

    #[test]
    fn test_delete_prompt() {
        assert_eq!(
            delete_prompt(Resource::Expenses, &RecordId::from(3)),
            "Tem certeza que deseja excluir o gasto ID 3?"
        );
        assert_eq!(
            delete_prompt(Resource::PerDiems, &RecordId::from("x1")),
            "Tem certeza que deseja excluir a diária ID x1?"
        );
    }
}
