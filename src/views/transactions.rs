use tracing::warn;

use crate::dom::{class, el, id, Node, Tag};
use crate::error::Result;
use crate::fmt::{self, Locale};
use crate::models::{NewTransaction, Transaction, WoodType};
use crate::router::Msg;
use crate::views::form::{Form, FormField};
use crate::views::transactions_table;

pub const LIST_ID: &str = "tx-list";

pub struct TransactionsView {
    pub form: Form,
    pub transactions: Vec<Transaction>,
}

impl TransactionsView {
    pub fn new() -> Self {
        Self {
            form: Form::new(
                vec![
                    FormField::text("challan", "Challan no").required(),
                    FormField::selector(
                        "wood_type",
                        "Wood type",
                        WoodType::ALL.iter().map(|w| w.to_string()).collect(),
                    ),
                    FormField::number("kg", "KG", ""),
                    FormField::number("buy_rate", "Buy rate (BDT/kg)", ""),
                    FormField::number("sell_rate", "Sell rate (BDT/kg)", ""),
                    FormField::date("date", "Date", fmt::iso_date(fmt::today())),
                    FormField::textarea("narration", "Narration"),
                ],
                "Save Challan",
            ),
            transactions: Vec::new(),
        }
    }

    /// Build the challan to post; the total is kg × sell rate.
    pub fn payload(&self) -> std::result::Result<NewTransaction, String> {
        self.form.check()?;
        let wood_type = self
            .form
            .value("wood_type")
            .parse::<WoodType>()
            .map_err(|e| e.to_string())?;
        let date = self
            .form
            .date("date")
            .ok_or_else(|| "Date: please enter a date as YYYY-MM-DD".to_string())?;
        NewTransaction::new(
            self.form.value("challan").to_string(),
            wood_type,
            self.form.number("kg"),
            self.form.number("buy_rate"),
            self.form.number("sell_rate"),
            date,
            self.form.value("narration").to_string(),
        )
        .map_err(|e| e.to_string())
    }

    pub fn apply_refresh(&mut self, result: Result<Vec<Transaction>>) {
        match result {
            Ok(txs) => self.transactions = txs,
            Err(e) => warn!(error = %e, "transaction list refresh failed"),
        }
    }

    /// Reset the whole form after a save, with the date back on today.
    pub fn after_save(&mut self) {
        self.form.reset();
        self.form.set_value("date", &fmt::iso_date(fmt::today()));
    }

    pub fn build(&self, locale: Locale) -> Node<Msg> {
        let mut card = el(
            Tag::Div,
            [class("card")],
            vec![
                el(Tag::H2, [], "Transactions / Challan"),
                self.form.to_node(Msg::Submit),
                el(Tag::Div, [id(LIST_ID)], ()),
            ],
        );
        card.replace_children(LIST_ID, vec![transactions_table(&self.transactions, locale)]);
        card
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::fixtures::transaction;
    use rust_decimal::Decimal;

    fn filled() -> TransactionsView {
        let mut view = TransactionsView::new();
        view.form.set_value("challan", "C-101");
        view.form.set_value("kg", "10");
        view.form.set_value("buy_rate", "200");
        view.form.set_value("sell_rate", "250");
        view.form.set_value("narration", "Truck 4");
        view
    }

    #[test]
    fn test_date_defaults_to_today() {
        let view = TransactionsView::new();
        assert_eq!(view.form.value("date"), fmt::iso_date(fmt::today()));
        assert_eq!(view.form.value("wood_type"), "Chamble");
    }

    #[test]
    fn test_payload_total_is_kg_times_sell_rate() {
        let body = filled().payload().unwrap();
        assert_eq!(body.total_amount, Decimal::new(2500, 0));
        assert_eq!(body.buy_rate, Decimal::new(200, 0));
        assert_eq!(body.challan, "C-101");
        assert_eq!(body.narration, "Truck 4");
    }

    #[test]
    fn test_empty_rates_count_as_zero() {
        let mut view = filled();
        view.form.set_value("sell_rate", "");
        assert!(view.payload().unwrap().total_amount.is_zero());
    }

    #[test]
    fn test_overflowing_total_is_rejected() {
        let mut view = filled();
        view.form.set_value("kg", "99999999999999999999");
        view.form.set_value("sell_rate", "99999999999999999999");
        assert!(view.form.check().is_ok());
        let err = view.payload().unwrap_err();
        assert!(err.starts_with("Amount out of range"));
    }

    #[test]
    fn test_after_save_resets_everything() {
        let mut view = filled();
        view.form.set_value("date", "2024-12-31");
        view.after_save();
        assert_eq!(view.form.value("challan"), "");
        assert_eq!(view.form.value("kg"), "");
        assert_eq!(view.form.value("narration"), "");
        assert_eq!(view.form.value("date"), fmt::iso_date(fmt::today()));
    }

    #[test]
    fn test_table_lives_in_list_region() {
        let mut view = TransactionsView::new();
        view.apply_refresh(Ok(vec![transaction("C-1", 5)]));
        let node = view.build(Locale::EnIn);
        let region = node.find_by_id(LIST_ID).unwrap();
        assert_eq!(region.children.len(), 1);
        assert!(node.text_content().contains("5/1/2025"));
    }
}
