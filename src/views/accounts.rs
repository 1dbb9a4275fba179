use crate::dom::{class, el, text, Node, Tag};
use crate::fmt::Locale;
use crate::models::{Account, NewAccount};
use crate::router::Msg;
use crate::views::form::{Form, FormField};
use crate::views::{balance_line, Load};

pub struct AccountsView {
    pub form: Form,
    pub accounts: Load<Vec<Account>>,
}

impl AccountsView {
    pub fn new() -> Self {
        Self {
            form: Form::new(
                vec![
                    FormField::text("name", "Account name").required(),
                    FormField::number("balance", "Balance (BDT)", "0"),
                ],
                "Add Account",
            ),
            accounts: Load::Pending,
        }
    }

    pub fn payload(&self) -> Result<NewAccount, String> {
        self.form.check()?;
        Ok(NewAccount {
            name: self.form.value("name").to_string(),
            balance: self.form.number("balance"),
        })
    }

    pub fn build(&self, locale: Locale) -> Node<Msg> {
        let mut card = el(
            Tag::Div,
            [class("card")],
            vec![el(Tag::H2, [], "Manage Accounts"), self.form.to_node(Msg::Submit)],
        );
        match &self.accounts {
            Load::Pending => {}
            Load::Ready(accounts) => {
                let list = el(
                    Tag::Div,
                    [],
                    accounts
                        .iter()
                        .map(|a| el(Tag::Div, [], vec![text(balance_line(&a.name, a.balance, locale))]))
                        .collect::<Vec<_>>(),
                );
                card.append(el(Tag::Div, [], vec![list]));
            }
            Load::Failed(_) => card.append(el(Tag::Div, [], "Error loading accounts")),
        }
        card
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::fixtures::account;
    use crossterm::event::KeyCode;
    use rust_decimal::Decimal;

    #[test]
    fn test_list_lines_use_grouped_balance() {
        let mut view = AccountsView::new();
        view.accounts = Load::Ready(vec![account("Cash", 1500), account("Bank", 1234567)]);
        let text = view.build(Locale::EnUs).text_content();
        assert!(text.contains("Cash — 1,500 BDT"));
        assert!(text.contains("Bank — 1,234,567 BDT"));
    }

    #[test]
    fn test_list_failure_keeps_form() {
        let mut view = AccountsView::new();
        view.accounts = Load::Failed("HTTP 502".into());
        let node = view.build(Locale::EnUs);
        assert!(node.find(&|e| e.tag == Tag::Form).is_some());
        assert!(node.text_content().contains("Error loading accounts"));
    }

    #[test]
    fn test_payload_requires_name() {
        let mut view = AccountsView::new();
        assert!(view.payload().is_err());
        for c in "Cash".chars() {
            view.form.handle_key(KeyCode::Char(c));
        }
        view.form.set_value("balance", "1500");
        assert_eq!(
            view.payload().unwrap(),
            NewAccount {
                name: "Cash".into(),
                balance: Decimal::new(1500, 0)
            }
        );
    }
}
