//! Pricing mutations.
//!
//! Every mutation is a single round trip. Local state only changes once the
//! backend confirms, and the affected panels are reloaded afterwards.

use super::DashboardController;
use super::updates::{Mutation, Update};
use crate::api::MonitorApi;
use crate::api::error::ApiError;
use crate::events::{Event, EventType, Panel};
use crate::logging::LogLevel;
use crate::models::MutationResponse;
use crate::ui::dashboard::form::PricingForm;
use crate::ui::dashboard::state::{Confirm, ToastKind};

use std::future::Future;
use std::sync::Arc;

impl DashboardController {
    pub fn open_add_form(&mut self) {
        self.state.modal = Some(PricingForm::new_entry());
    }

    /// Open the form prefilled with the selected table row.
    pub fn open_edit_form(&mut self) {
        let Some(name) = self.state.selected_model() else {
            return;
        };
        let form = self
            .state
            .pricing
            .as_ref()
            .and_then(|pricing| pricing.model(&name))
            .map(|entry| PricingForm::edit(&name, entry));
        if form.is_some() {
            self.state.modal = form;
        }
    }

    pub fn close_form(&mut self) {
        self.state.modal = None;
    }

    /// Save the form. An empty model name is rejected without a request.
    pub fn submit_pricing_form(&mut self) {
        let Some(form) = self.state.modal.as_ref() else {
            return;
        };
        let update = match form.to_update() {
            Ok(update) => update,
            Err(e) => {
                self.state.push_toast(e.to_string(), ToastKind::Error);
                return;
            }
        };
        let mutation = Mutation::SavePricing {
            model: update.model.clone(),
        };
        self.spawn_mutation(mutation, move |api| async move {
            api.save_pricing(&update).await
        });
    }

    /// Ask before deleting the selected row.
    pub fn request_delete(&mut self) {
        if let Some(model) = self.state.selected_model() {
            self.state.confirm = Some(Confirm::Delete(model));
        }
    }

    pub fn request_reset(&mut self) {
        self.state.confirm = Some(Confirm::Reset);
    }

    /// Resolve the pending confirmation dialog.
    pub fn answer_confirm(&mut self, accepted: bool) {
        let Some(confirm) = self.state.confirm.take() else {
            return;
        };
        if !accepted {
            return;
        }
        match confirm {
            Confirm::Delete(model) => {
                let mutation = Mutation::DeletePricing {
                    model: model.clone(),
                };
                self.spawn_mutation(mutation, move |api| async move {
                    api.delete_pricing(&model).await
                });
            }
            Confirm::Reset => {
                self.spawn_mutation(Mutation::ResetPricing, |api| async move {
                    api.reset_pricing().await
                });
            }
        }
    }

    /// Ask the backend to switch to the other display currency.
    pub fn toggle_currency(&mut self) {
        let currency = self.state.currency.toggled();
        self.spawn_mutation(Mutation::SetCurrency(currency), move |api| async move {
            api.set_currency(currency).await
        });
    }

    /// Submit the rate input, or let the backend fetch a live rate when `auto`.
    pub fn update_exchange_rate(&mut self, auto: bool) {
        self.state.editing_rate = false;
        let rate = if auto {
            None
        } else {
            match self.state.rate_input.trim().parse::<f64>() {
                Ok(rate) if rate.is_finite() && rate > 0.0 => Some(rate),
                _ => {
                    self.state.push_toast("请输入有效的汇率", ToastKind::Error);
                    return;
                }
            }
        };
        self.spawn_mutation(Mutation::UpdateRate { auto }, move |api| async move {
            api.update_exchange_rate(rate).await
        });
    }

    pub(super) fn finish_mutation(
        &mut self,
        mutation: Mutation,
        result: Result<MutationResponse, String>,
    ) {
        let response = match result {
            Ok(response) if response.success => response,
            Ok(response) => {
                let message = mutation.rejected_message(&response);
                self.record_mutation_failure(&mutation, &message);
                return;
            }
            Err(error) => {
                let message = mutation.failed_message(&error);
                self.record_mutation_failure(&mutation, &message);
                return;
            }
        };

        self.state
            .push_toast(mutation.success_message(&response), ToastKind::Success);
        self.state.add_diagnostic(Event::new(
            Panel::Pricing,
            format!("{:?} succeeded", mutation),
            EventType::Success,
            LogLevel::Info,
        ));

        match mutation {
            Mutation::SavePricing { model } => {
                // a form opened after the save went out stays open
                let saved_form_open = self
                    .state
                    .modal
                    .as_ref()
                    .is_some_and(|form| form.model() == Some(model.as_str()));
                if saved_form_open {
                    self.state.modal = None;
                }
                self.load(Panel::Pricing);
            }
            Mutation::DeletePricing { .. } | Mutation::ResetPricing => {
                self.load(Panel::Pricing);
            }
            Mutation::SetCurrency(currency) => {
                self.state.currency = currency;
                self.load(Panel::Pricing);
                self.refresh_all(false);
            }
            Mutation::UpdateRate { .. } => {
                if let Some(rate) = response.rate {
                    self.state.rate_input = rate.to_string();
                }
                self.load(Panel::Pricing);
            }
        }
    }

    fn record_mutation_failure(&mut self, mutation: &Mutation, message: &str) {
        self.state.push_toast(message, ToastKind::Error);
        self.state.add_diagnostic(Event::new(
            Panel::Pricing,
            format!("{:?} failed: {}", mutation, message),
            EventType::Error,
            LogLevel::Warn,
        ));
    }

    fn spawn_mutation<F, Fut>(&self, mutation: Mutation, call: F)
    where
        F: FnOnce(Arc<dyn MonitorApi>) -> Fut + Send + 'static,
        Fut: Future<Output = Result<MutationResponse, ApiError>> + Send + 'static,
    {
        let api = Arc::clone(&self.api);
        let updates = self.updates.clone();
        tokio::spawn(async move {
            let result = call(api).await.map_err(|e| e.user_message());
            let _ = updates.send(Update::Mutated { mutation, result }).await;
        });
    }
}
