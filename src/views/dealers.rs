use tracing::warn;

use crate::dom::{class, el, id, text, Node, Tag};
use crate::error::Result;
use crate::fmt::Locale;
use crate::models::{Dealer, NewDealer};
use crate::router::Msg;
use crate::views::balance_line;
use crate::views::form::{Form, FormField};

pub const LIST_ID: &str = "dealer-list";

pub struct DealersView {
    pub form: Form,
    pub dealers: Vec<Dealer>,
}

impl DealersView {
    pub fn new() -> Self {
        Self {
            form: Form::new(
                vec![
                    FormField::text("name", "Dealer name").required(),
                    FormField::text("phone", "Phone (optional)"),
                    FormField::number("balance", "Initial advance (BDT)", "0"),
                ],
                "Add Dealer",
            ),
            dealers: Vec::new(),
        }
    }

    pub fn payload(&self) -> std::result::Result<NewDealer, String> {
        self.form.check()?;
        Ok(NewDealer {
            name: self.form.value("name").to_string(),
            phone: self.form.value("phone").to_string(),
            balance: self.form.number("balance"),
        })
    }

    /// A failed refresh leaves the previous list in place.
    pub fn apply_refresh(&mut self, result: Result<Vec<Dealer>>) {
        match result {
            Ok(dealers) => self.dealers = dealers,
            Err(e) => warn!(error = %e, "dealer list refresh failed"),
        }
    }

    /// Clear the inputs after a dealer was created. Focus stays where it is.
    pub fn clear_inputs(&mut self) {
        self.form.set_value("name", "");
        self.form.set_value("phone", "");
        self.form.set_value("balance", "0");
        self.form.notice = None;
    }

    pub fn build(&self, locale: Locale) -> Node<Msg> {
        let mut card = el(
            Tag::Div,
            [class("card")],
            vec![
                el(Tag::H2, [], "Dealers & Advances"),
                self.form.to_node(Msg::Submit),
                el(Tag::Div, [id(LIST_ID)], ()),
            ],
        );
        card.replace_children(
            LIST_ID,
            self.dealers
                .iter()
                .map(|d| el(Tag::Div, [], vec![text(balance_line(&d.name, d.balance, locale))]))
                .collect(),
        );
        card
    }
}
