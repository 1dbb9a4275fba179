//! Single-active-view controller.
//!
//! The router owns the content region. Entering a view clears it, hands out a
//! new ticket and starts that view's fetches on worker threads. Completions
//! come back over a channel tagged with the ticket they were started under;
//! anything tagged with an older ticket is dropped, so a slow response can
//! never touch a view the user has already left.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use tracing::{debug, info, warn};

use crate::api::ApiClient;
use crate::dom::{el, Attr, AttrValue, EventKind, Node, Tag};
use crate::error::{Error, Result};
use crate::fmt::Locale;
use crate::models::{Account, Dealer, Transaction};
use crate::render::render;
use crate::tui::{centered, wrap_text, ALERT_BORDER_STYLE, FOOTER_STYLE, HEADER_STYLE};
use crate::views::accounts::AccountsView;
use crate::views::dashboard::DashboardView;
use crate::views::dealers::DealersView;
use crate::views::form::FormEvent;
use crate::views::transactions::TransactionsView;
use crate::views::Load;

const SCROLL_STEP: u16 = 10;
const ALERT_WIDTH: u16 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Accounts,
    Dealers,
    Transactions,
}

impl View {
    pub const ALL: [View; 4] = [
        View::Dashboard,
        View::Accounts,
        View::Dealers,
        View::Transactions,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Accounts => "Accounts",
            View::Dealers => "Dealers",
            View::Transactions => "Transactions",
        }
    }

    fn key(&self) -> &'static str {
        match self {
            View::Dashboard => "F1",
            View::Accounts => "F2",
            View::Dealers => "F3",
            View::Transactions => "F4",
        }
    }
}

/// Messages carried by element listeners.
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Navigate(View),
    Submit,
}

pub enum RouterAction {
    Continue,
    Quit,
}

enum Completion {
    Dashboard(Result<(Vec<Transaction>, Vec<Account>)>),
    Accounts(Result<Vec<Account>>),
    Dealers(Result<Vec<Dealer>>),
    Transactions(Result<Vec<Transaction>>),
    AccountCreated(Result<()>),
    DealerCreated(Result<()>),
    TransactionCreated(Result<()>),
}

type Job = Box<dyn FnOnce(&ApiClient) -> Completion + Send>;

enum Screen {
    Dashboard(DashboardView),
    Accounts(AccountsView),
    Dealers(DealersView),
    Transactions(TransactionsView),
}

/// Work to do once a completion has been applied to the screen.
enum FollowUp {
    Reenter(View),
    Spawn(Job),
}

pub struct Router {
    api: ApiClient,
    locale: Locale,
    screen: Screen,
    ticket: u64,
    content: Node<Msg>,
    nav: Node<Msg>,
    alert: Option<String>,
    in_flight: usize,
    scroll: u16,
    tx: Sender<(u64, Completion)>,
    rx: Receiver<(u64, Completion)>,
}

impl Router {
    /// Create the router and enter the dashboard.
    pub fn new(api: ApiClient, locale: Locale) -> Result<Self> {
        let (tx, rx) = mpsc::channel();
        let mut router = Self {
            api,
            locale,
            screen: Screen::Dashboard(DashboardView::new()),
            ticket: 0,
            content: el(Tag::Div, [], ()),
            nav: nav_bar(View::Dashboard)?,
            alert: None,
            in_flight: 0,
            scroll: 0,
            tx,
            rx,
        };
        router.show(View::Dashboard);
        Ok(router)
    }

    pub fn current(&self) -> View {
        match self.screen {
            Screen::Dashboard(_) => View::Dashboard,
            Screen::Accounts(_) => View::Accounts,
            Screen::Dealers(_) => View::Dealers,
            Screen::Transactions(_) => View::Transactions,
        }
    }

    pub fn content(&self) -> &Node<Msg> {
        &self.content
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }

    /// Enter a view: clear the content region, invalidate every outstanding
    /// completion and start the view's fetches.
    pub fn show(&mut self, view: View) {
        self.ticket += 1;
        info!(view = view.title(), ticket = self.ticket, "enter view");
        self.content = el(Tag::Div, [], ());
        self.scroll = 0;
        let job: Job = match view {
            View::Dashboard => {
                self.screen = Screen::Dashboard(DashboardView::new());
                Box::new(|api: &ApiClient| Completion::Dashboard(fetch_dashboard(api)))
            }
            View::Accounts => {
                self.screen = Screen::Accounts(AccountsView::new());
                Box::new(|api: &ApiClient| Completion::Accounts(api.accounts()))
            }
            View::Dealers => {
                self.screen = Screen::Dealers(DealersView::new());
                Box::new(|api: &ApiClient| Completion::Dealers(api.dealers()))
            }
            View::Transactions => {
                self.screen = Screen::Transactions(TransactionsView::new());
                Box::new(|api: &ApiClient| Completion::Transactions(api.transactions()))
            }
        };
        self.spawn(job);
        self.rebuild();
    }

    fn spawn(&mut self, job: Job) {
        let api = self.api.clone();
        let tx = self.tx.clone();
        let ticket = self.ticket;
        self.in_flight += 1;
        thread::spawn(move || {
            let completion = job(&api);
            // The receiver only goes away when the app is shutting down.
            let _ = tx.send((ticket, completion));
        });
    }

    /// Apply every completion that has arrived. Returns true if any did.
    pub fn pump(&mut self) -> bool {
        let mut any = false;
        while let Ok((ticket, completion)) = self.rx.try_recv() {
            self.deliver(ticket, completion);
            any = true;
        }
        any
    }

    fn deliver(&mut self, ticket: u64, completion: Completion) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if ticket != self.ticket {
            debug!(ticket, current = self.ticket, "discarding stale completion");
            return;
        }
        match self.apply(completion) {
            Some(FollowUp::Reenter(view)) => self.show(view),
            Some(FollowUp::Spawn(job)) => {
                self.spawn(job);
                self.rebuild();
            }
            None => self.rebuild(),
        }
    }

    fn apply(&mut self, completion: Completion) -> Option<FollowUp> {
        match (&mut self.screen, completion) {
            (Screen::Dashboard(v), Completion::Dashboard(r)) => v.data = Load::from(r),
            (Screen::Accounts(v), Completion::Accounts(r)) => v.accounts = Load::from(r),
            (Screen::Dealers(v), Completion::Dealers(r)) => v.apply_refresh(r),
            (Screen::Transactions(v), Completion::Transactions(r)) => v.apply_refresh(r),
            (Screen::Accounts(v), Completion::AccountCreated(r)) => {
                v.form.pending = false;
                match r {
                    Ok(()) => {
                        self.alert = Some("Account added".into());
                        return Some(FollowUp::Reenter(View::Accounts));
                    }
                    Err(e) => self.alert = Some(format!("Error: {e}")),
                }
            }
            (Screen::Dealers(v), Completion::DealerCreated(r)) => {
                v.form.pending = false;
                match r {
                    Ok(()) => {
                        self.alert = Some("Dealer added".into());
                        v.clear_inputs();
                        return Some(FollowUp::Spawn(Box::new(|api: &ApiClient| {
                            Completion::Dealers(api.dealers())
                        })));
                    }
                    Err(e) => self.alert = Some(format!("Error: {e}")),
                }
            }
            (Screen::Transactions(v), Completion::TransactionCreated(r)) => {
                v.form.pending = false;
                match r {
                    Ok(()) => {
                        self.alert = Some("Saved".into());
                        v.after_save();
                        return Some(FollowUp::Spawn(Box::new(|api: &ApiClient| {
                            Completion::Transactions(api.transactions())
                        })));
                    }
                    Err(e) => self.alert = Some(format!("Error: {e}")),
                }
            }
            _ => debug!("completion does not match the current view"),
        }
        None
    }

    fn rebuild(&mut self) {
        match nav_bar(self.current()) {
            Ok(nav) => self.nav = nav,
            Err(e) => warn!(error = %e, "keeping previous navigation bar"),
        }
        self.content = match &self.screen {
            Screen::Dashboard(v) => v.build(self.locale),
            Screen::Accounts(v) => v.build(self.locale),
            Screen::Dealers(v) => v.build(self.locale),
            Screen::Transactions(v) => v.build(self.locale),
        };
    }

    pub fn dispatch(&mut self, msg: Msg) {
        match msg {
            Msg::Navigate(view) => self.show(view),
            Msg::Submit => self.submit(),
        }
    }

    /// Fire the click listener of the navigation button bound to `key`.
    fn click_nav(&mut self, key: &str) {
        let msg = self
            .nav
            .find_by_attr("data-key", key)
            .and_then(|e| e.listener(EventKind::Click))
            .cloned();
        if let Some(msg) = msg {
            self.dispatch(msg);
        }
    }

    /// Fire the submit listener of the form in the content region.
    fn submit_form(&mut self) {
        let msg = self
            .content
            .find(&|e| e.tag == Tag::Form)
            .and_then(|e| e.listener(EventKind::Submit))
            .cloned();
        if let Some(msg) = msg {
            self.dispatch(msg);
        }
    }

    fn submit(&mut self) {
        let job: Option<Job> = match &mut self.screen {
            Screen::Dashboard(_) => None,
            Screen::Accounts(v) if !v.form.pending => match v.payload() {
                Ok(body) => {
                    v.form.pending = true;
                    v.form.notice = None;
                    Some(Box::new(move |api: &ApiClient| {
                        Completion::AccountCreated(api.create_account(&body).map(|_| ()))
                    }))
                }
                Err(msg) => {
                    v.form.notice = Some(msg);
                    None
                }
            },
            Screen::Dealers(v) if !v.form.pending => match v.payload() {
                Ok(body) => {
                    v.form.pending = true;
                    v.form.notice = None;
                    Some(Box::new(move |api: &ApiClient| {
                        Completion::DealerCreated(api.create_dealer(&body).map(|_| ()))
                    }))
                }
                Err(msg) => {
                    v.form.notice = Some(msg);
                    None
                }
            },
            Screen::Transactions(v) if !v.form.pending => match v.payload() {
                Ok(body) => {
                    v.form.pending = true;
                    v.form.notice = None;
                    Some(Box::new(move |api: &ApiClient| {
                        Completion::TransactionCreated(api.create_transaction(&body).map(|_| ()))
                    }))
                }
                Err(msg) => {
                    v.form.notice = Some(msg);
                    None
                }
            },
            _ => {
                debug!("submit ignored while a save is in flight");
                None
            }
        };
        if let Some(job) = job {
            self.spawn(job);
        }
        self.rebuild();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> RouterAction {
        if self.alert.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.alert = None;
            }
            return RouterAction::Continue;
        }

        match key.code {
            KeyCode::F(n) => {
                self.click_nav(&format!("F{n}"));
                return RouterAction::Continue;
            }
            KeyCode::PageDown => {
                self.scroll = self.scroll.saturating_add(SCROLL_STEP);
                return RouterAction::Continue;
            }
            KeyCode::PageUp => {
                self.scroll = self.scroll.saturating_sub(SCROLL_STEP);
                return RouterAction::Continue;
            }
            _ => {}
        }

        if matches!(self.screen, Screen::Dashboard(_)) {
            match key.code {
                KeyCode::Char(c @ '1'..='4') => self.click_nav(&format!("F{c}")),
                KeyCode::Char('r') => self.show(View::Dashboard),
                KeyCode::Char('q') => return RouterAction::Quit,
                _ => {}
            }
            return RouterAction::Continue;
        }
        if key.code == KeyCode::Esc {
            self.show(View::Dashboard);
            return RouterAction::Continue;
        }

        let form = match &mut self.screen {
            Screen::Dashboard(_) => return RouterAction::Continue,
            Screen::Accounts(v) => &mut v.form,
            Screen::Dealers(v) => &mut v.form,
            Screen::Transactions(v) => &mut v.form,
        };
        match form.handle_key(key.code) {
            FormEvent::Submit => self.submit_form(),
            FormEvent::Continue => self.rebuild(),
        }
        RouterAction::Continue
    }

    pub fn draw(&self, frame: &mut Frame, api_base: &str) {
        let area = frame.area();
        let border_style = Style::default().fg(Color::DarkGray);

        let [header_area, sep1, nav_area, sep2, content_area, hints_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(format!(" Timberbook · {api_base}")).style(HEADER_STYLE),
            header_area,
        );
        let sep_line = "━".repeat(area.width as usize);
        let sep_widget = Paragraph::new(sep_line.as_str()).style(border_style);
        frame.render_widget(sep_widget.clone(), sep1);
        frame.render_widget(sep_widget, sep2);

        frame.render_widget(
            Paragraph::new(render(&self.nav, nav_area.width)),
            nav_area,
        );

        let mut lines = vec![Line::default()];
        lines.extend(render(self.content(), content_area.width));
        frame.render_widget(Paragraph::new(lines).scroll((self.scroll, 0)), content_area);

        let hints = match self.current() {
            View::Dashboard => " 1-4/F1-F4=switch view  r=reload  PgUp/PgDn=scroll  q=quit",
            _ => " Tab=next field  ←/→=choose  Enter=save  F1-F4=switch view  Esc=dashboard",
        };
        let hints = if self.is_busy() {
            format!("{hints}  (loading…)")
        } else {
            hints.to_string()
        };
        frame.render_widget(Paragraph::new(hints).style(FOOTER_STYLE), hints_area);

        if let Some(msg) = self.alert() {
            let inner_width = ALERT_WIDTH.saturating_sub(4) as usize;
            let (wrapped, line_count) = wrap_text(msg, inner_width);
            let popup = centered(area, ALERT_WIDTH, line_count + 4);
            let mut body: Vec<Line> = wrapped.lines().map(|l| Line::from(format!(" {l}"))).collect();
            body.push(Line::default());
            body.push(Line::from(" Enter=OK").style(FOOTER_STYLE));
            frame.render_widget(Clear, popup);
            frame.render_widget(
                Paragraph::new(body).block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(ALERT_BORDER_STYLE),
                ),
                popup,
            );
        }
    }
}

/// The four navigation buttons, built from key/value attribute pairs.
fn nav_bar(current: View) -> Result<Node<Msg>> {
    let buttons = View::ALL
        .iter()
        .map(|v| -> Result<Node<Msg>> {
            let cls = if *v == current { "nav-btn active" } else { "nav-btn" };
            let attrs = [
                Attr::from_pair("class", AttrValue::Str(cls.to_string()))?,
                Attr::from_pair("data-key", AttrValue::Str(v.key().to_string()))?,
                Attr::from_pair("onclick", AttrValue::Handler(Msg::Navigate(*v)))?,
            ];
            Ok(el(Tag::Button, attrs, v.title()))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(el(Tag::Nav, [], buttons))
}

/// Both lists at once; either failure fails the whole dashboard.
fn fetch_dashboard(api: &ApiClient) -> Result<(Vec<Transaction>, Vec<Account>)> {
    let (txs, accounts) = thread::scope(|s| {
        let txs = s.spawn(|| api.transactions());
        let accounts = s.spawn(|| api.accounts());
        (
            txs.join().unwrap_or_else(|_| Err(worker_panicked())),
            accounts.join().unwrap_or_else(|_| Err(worker_panicked())),
        )
    });
    Ok((txs?, accounts?))
}

fn worker_panicked() -> Error {
    Error::Other("fetch worker panicked".into())
}
