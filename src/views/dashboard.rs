use crate::dom::{class, el, text, Node, Tag};
use crate::fmt::{self, Locale};
use crate::models::{Account, Transaction};
use crate::router::Msg;
use crate::views::{transactions_table, Load};

/// Number of transactions shown on the dashboard.
pub const RECENT_LIMIT: usize = 10;

pub struct DashboardView {
    pub data: Load<(Vec<Transaction>, Vec<Account>)>,
}

impl DashboardView {
    pub fn new() -> Self {
        Self {
            data: Load::Pending,
        }
    }

    pub fn build(&self, locale: Locale) -> Node<Msg> {
        let (txs, accounts) = match &self.data {
            Load::Pending => {
                return el(Tag::P, [class("small-muted")], "Loading dashboard…");
            }
            Load::Failed(msg) => {
                return el(
                    Tag::Div,
                    [],
                    vec![text(format!("Error loading dashboard: {msg}"))],
                );
            }
            Load::Ready(data) => data,
        };

        let recent = &txs[..txs.len().min(RECENT_LIMIT)];
        let card = el(
            Tag::Div,
            [class("card")],
            vec![
                el(Tag::H2, [], "Dashboard"),
                el(
                    Tag::P,
                    [class("small-muted")],
                    "Recent transactions and account summary will appear here.",
                ),
                transactions_table(recent, locale),
            ],
        );
        let summary = el(
            Tag::Div,
            [],
            vec![
                el(Tag::H3, [], "Accounts"),
                el(
                    Tag::Ul,
                    [],
                    accounts
                        .iter()
                        .map(|a| {
                            el(
                                Tag::Li,
                                [],
                                vec![text(format!("{}: {}", a.name, fmt::money(a.balance, locale)))],
                            )
                        })
                        .collect::<Vec<_>>(),
                ),
            ],
        );
        let right = el(Tag::Div, [class("card")], vec![summary]);
        el(Tag::Div, [class("grid-2")], vec![card, right])
    }
}
