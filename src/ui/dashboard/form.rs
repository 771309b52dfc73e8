//! Pricing edit form shown in the modal.

use crate::models::{Currency, ModelPricing, PricingUpdate};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("请输入模型名称")]
    EmptyModel,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FormField {
    Model,
    Provider,
    InputPrice,
    OutputPrice,
    Currency,
    Reason,
}

impl FormField {
    const ORDER: [FormField; 6] = [
        FormField::Model,
        FormField::Provider,
        FormField::InputPrice,
        FormField::OutputPrice,
        FormField::Currency,
        FormField::Reason,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Model => "模型",
            FormField::Provider => "提供商",
            FormField::InputPrice => "输入 / 1K",
            FormField::OutputPrice => "输出 / 1K",
            FormField::Currency => "货币",
            FormField::Reason => "修改原因",
        }
    }

    fn index(&self) -> usize {
        Self::ORDER.iter().position(|f| f == self).unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PricingForm {
    /// Name of the entry being edited; empty when adding a new model.
    model_name: String,
    /// Name typed by the user when adding a new model.
    pub model_display: String,
    pub provider: String,
    pub input_price: String,
    pub output_price: String,
    pub currency: Currency,
    pub reason: String,
    pub focus: FormField,
}

impl PricingForm {
    /// Blank form for a new model.
    pub fn new_entry() -> Self {
        Self {
            model_name: String::new(),
            model_display: String::new(),
            provider: String::new(),
            input_price: String::new(),
            output_price: String::new(),
            currency: Currency::Cny,
            reason: String::new(),
            focus: FormField::Model,
        }
    }

    /// Form prefilled from an existing entry.
    pub fn edit(name: &str, pricing: &ModelPricing) -> Self {
        Self {
            model_name: name.to_string(),
            model_display: name.to_string(),
            provider: pricing.provider.clone().unwrap_or_default(),
            input_price: pricing.input_per_1k.unwrap_or(0.0).to_string(),
            output_price: pricing.output_per_1k.unwrap_or(0.0).to_string(),
            currency: pricing
                .currency
                .as_deref()
                .map(Currency::from_code)
                .unwrap_or(Currency::Cny),
            reason: String::new(),
            focus: FormField::Provider,
        }
    }

    pub fn is_editing(&self) -> bool {
        !self.model_name.is_empty()
    }

    /// The model the form targets: the edited entry, else the typed name.
    pub fn model(&self) -> Option<&str> {
        [self.model_name.as_str(), self.model_display.as_str()]
            .into_iter()
            .map(str::trim)
            .find(|name| !name.is_empty())
    }

    /// Build the request body. Unparseable prices count as zero.
    pub fn to_update(&self) -> Result<PricingUpdate, FormError> {
        let model = self.model().ok_or(FormError::EmptyModel)?;
        Ok(PricingUpdate {
            model: model.to_string(),
            input_per_1k: parse_price(&self.input_price),
            output_per_1k: parse_price(&self.output_price),
            currency: self.currency.to_string(),
            provider: self.provider.clone(),
            reason: self.reason.clone(),
        })
    }

    pub fn focus_next(&mut self) {
        let next = (self.focus.index() + 1) % FormField::ORDER.len();
        self.focus = FormField::ORDER[next];
        if self.focus == FormField::Model && self.is_editing() {
            self.focus_next();
        }
    }

    pub fn focus_prev(&mut self) {
        let len = FormField::ORDER.len();
        let prev = (self.focus.index() + len - 1) % len;
        self.focus = FormField::ORDER[prev];
        if self.focus == FormField::Model && self.is_editing() {
            self.focus_prev();
        }
    }

    pub fn input_char(&mut self, c: char) {
        match self.focus {
            FormField::Currency => {
                if c == ' ' {
                    self.currency = self.currency.toggled();
                }
            }
            FormField::InputPrice | FormField::OutputPrice
                if !(c.is_ascii_digit() || c == '.') => {}
            _ => {
                if let Some(field) = self.focused_text_mut() {
                    field.push(c);
                }
            }
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.focused_text_mut() {
            field.pop();
        }
    }

    pub fn toggle_currency(&mut self) {
        if self.focus == FormField::Currency {
            self.currency = self.currency.toggled();
        }
    }

    /// Display value of a field.
    pub fn value(&self, field: FormField) -> String {
        match field {
            FormField::Model => self.model_display.clone(),
            FormField::Provider => self.provider.clone(),
            FormField::InputPrice => self.input_price.clone(),
            FormField::OutputPrice => self.output_price.clone(),
            FormField::Currency => self.currency.to_string(),
            FormField::Reason => self.reason.clone(),
        }
    }

    pub fn fields() -> &'static [FormField] {
        &FormField::ORDER
    }

    fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Model if self.is_editing() => None,
            FormField::Model => Some(&mut self.model_display),
            FormField::Provider => Some(&mut self.provider),
            FormField::InputPrice => Some(&mut self.input_price),
            FormField::OutputPrice => Some(&mut self.output_price),
            FormField::Reason => Some(&mut self.reason),
            FormField::Currency => None,
        }
    }
}

fn parse_price(value: &str) -> f64 {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_model_is_rejected() {
        let form = PricingForm::new_entry();
        assert_eq!(form.to_update(), Err(FormError::EmptyModel));

        let mut form = PricingForm::new_entry();
        form.model_display = "   ".to_string();
        assert_eq!(form.to_update(), Err(FormError::EmptyModel));
    }

    #[test]
    fn test_edit_targets_existing_entry() {
        let pricing = ModelPricing {
            provider: Some("OpenAI".to_string()),
            input_per_1k: Some(0.005),
            output_per_1k: Some(0.015),
            currency: Some("USD".to_string()),
        };
        let mut form = PricingForm::edit("gpt-4o", &pricing);
        assert_eq!(form.focus, FormField::Provider);

        // The name of an edited entry is read-only.
        form.focus = FormField::Model;
        form.input_char('x');
        form.reason = "price cut".to_string();

        let update = form.to_update().unwrap();
        assert_eq!(update.model, "gpt-4o");
        assert_eq!(update.input_per_1k, 0.005);
        assert_eq!(update.currency, "USD");
        assert_eq!(update.provider, "OpenAI");
        assert_eq!(update.reason, "price cut");
    }

    #[test]
    fn test_unparseable_prices_fall_back_to_zero() {
        let mut form = PricingForm::new_entry();
        form.model_display = "custom".to_string();
        form.input_price = "abc".to_string();
        form.output_price = "0.25".to_string();

        let update = form.to_update().unwrap();
        assert_eq!(update.input_per_1k, 0.0);
        assert_eq!(update.output_per_1k, 0.25);
        assert_eq!(update.currency, "CNY");
    }

    #[test]
    fn test_typing_and_focus_cycle() {
        let mut form = PricingForm::new_entry();
        for c in "qwen".chars() {
            form.input_char(c);
        }
        form.focus_next();
        form.focus_next();
        form.input_char('1');
        form.input_char('x');
        form.backspace();
        form.input_char('2');
        assert_eq!(form.model_display, "qwen");
        assert_eq!(form.input_price, "2");

        form.focus_prev();
        form.focus_prev();
        form.focus_prev();
        assert_eq!(form.focus, FormField::Reason);
        form.focus_prev();
        form.toggle_currency();
        assert_eq!(form.currency, Currency::Usd);
    }
}
