use chrono::NaiveDate;
use crossterm::event::KeyCode;
use rust_decimal::Decimal;

use crate::dom::{attr, class, el, on, text, EventKind, Node, Tag};

pub enum FieldKind {
    Text,
    Number,
    Date,
    TextArea,
    Selector { options: Vec<String>, selected: usize },
}

pub struct FormField {
    pub name: &'static str,
    pub placeholder: &'static str,
    pub value: String,
    default: String,
    pub kind: FieldKind,
    pub required: bool,
}

impl FormField {
    pub fn text(name: &'static str, placeholder: &'static str) -> Self {
        Self {
            name,
            placeholder,
            value: String::new(),
            default: String::new(),
            kind: FieldKind::Text,
            required: false,
        }
    }

    pub fn number(name: &'static str, placeholder: &'static str, default: &str) -> Self {
        Self {
            kind: FieldKind::Number,
            value: default.to_string(),
            default: default.to_string(),
            ..Self::text(name, placeholder)
        }
    }

    pub fn date(name: &'static str, placeholder: &'static str, default: String) -> Self {
        Self {
            kind: FieldKind::Date,
            value: default.clone(),
            default,
            ..Self::text(name, placeholder)
        }
    }

    pub fn textarea(name: &'static str, placeholder: &'static str) -> Self {
        Self {
            kind: FieldKind::TextArea,
            ..Self::text(name, placeholder)
        }
    }

    pub fn selector(name: &'static str, placeholder: &'static str, options: Vec<String>) -> Self {
        let first = options.first().cloned().unwrap_or_default();
        Self {
            kind: FieldKind::Selector {
                options,
                selected: 0,
            },
            value: first.clone(),
            default: first,
            ..Self::text(name, placeholder)
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn accepts(&self, c: char) -> bool {
        match self.kind {
            FieldKind::Text | FieldKind::TextArea => true,
            FieldKind::Number => c.is_ascii_digit() || c == '.' || c == '-',
            FieldKind::Date => c.is_ascii_digit() || c == '-',
            FieldKind::Selector { .. } => false,
        }
    }

    fn reset(&mut self) {
        self.value = self.default.clone();
        if let FieldKind::Selector { selected, .. } = &mut self.kind {
            *selected = 0;
        }
    }

    fn to_node<M>(&self, focused: bool) -> Node<M> {
        let cls = if focused { "input focused" } else { "input" };
        let mut attrs = vec![
            class(cls),
            attr("name", self.name),
            attr("placeholder", self.placeholder),
            attr("value", self.value.clone()),
        ];
        if self.required {
            attrs.push(attr("required", "required"));
        }
        match &self.kind {
            FieldKind::Text => el(Tag::Input, attrs, ()),
            FieldKind::Number => {
                attrs.push(attr("type", "number"));
                el(Tag::Input, attrs, ())
            }
            FieldKind::Date => {
                attrs.push(attr("type", "date"));
                el(Tag::Input, attrs, ())
            }
            FieldKind::TextArea => el(Tag::Textarea, attrs, ()),
            FieldKind::Selector { options, .. } => el(
                Tag::Select,
                attrs,
                options
                    .iter()
                    .map(|o| el(Tag::SelectOption, [], vec![text(o.clone())]))
                    .collect::<Vec<_>>(),
            ),
        }
    }
}

pub enum FormEvent {
    Continue,
    Submit,
}

/// Keyboard-driven form. Focus cycles through the fields and then the
/// submit button.
pub struct Form {
    pub fields: Vec<FormField>,
    pub focused: usize,
    submit_label: &'static str,
    /// Set while a write is in flight; further submits are ignored.
    pub pending: bool,
    /// Constraint violation from the last submit attempt.
    pub notice: Option<String>,
}

impl Form {
    pub fn new(fields: Vec<FormField>, submit_label: &'static str) -> Self {
        Self {
            fields,
            focused: 0,
            submit_label,
            pending: false,
            notice: None,
        }
    }

    fn slots(&self) -> usize {
        self.fields.len() + 1
    }

    fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn value(&self, name: &str) -> &str {
        self.field(name).map(|f| f.value.as_str()).unwrap_or("")
    }

    pub fn set_value(&mut self, name: &str, value: &str) {
        if let Some(f) = self.fields.iter_mut().find(|f| f.name == name) {
            f.value = value.to_string();
        }
    }

    /// Restore every field to its default and focus the first one.
    pub fn reset(&mut self) {
        for f in &mut self.fields {
            f.reset();
        }
        self.focused = 0;
        self.notice = None;
    }

    /// Numeric value of a field; an empty field counts as zero.
    pub fn number(&self, name: &str) -> Decimal {
        self.value(name).trim().parse().unwrap_or(Decimal::ZERO)
    }

    pub fn date(&self, name: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.value(name).trim(), "%Y-%m-%d").ok()
    }

    /// Input constraints only: required fields present, numbers numeric,
    /// dates valid. Returns the message to show next to the form.
    pub fn check(&self) -> Result<(), String> {
        for f in &self.fields {
            let v = f.value.trim();
            if f.required && v.is_empty() {
                return Err(format!("{}: please fill out this field", f.placeholder));
            }
            match f.kind {
                FieldKind::Number if !v.is_empty() && v.parse::<Decimal>().is_err() => {
                    return Err(format!("{}: please enter a number", f.placeholder));
                }
                FieldKind::Date if NaiveDate::parse_from_str(v, "%Y-%m-%d").is_err() => {
                    return Err(format!("{}: please enter a date as YYYY-MM-DD", f.placeholder));
                }
                _ => {}
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, code: KeyCode) -> FormEvent {
        use crossterm::event::KeyCode::*;
        match code {
            Enter => return FormEvent::Submit,
            Tab | Down => self.focused = (self.focused + 1) % self.slots(),
            BackTab | Up => {
                self.focused = if self.focused == 0 {
                    self.slots() - 1
                } else {
                    self.focused - 1
                };
            }
            Left | Right => {
                let Some(field) = self.fields.get_mut(self.focused) else {
                    return FormEvent::Continue;
                };
                if let FieldKind::Selector { options, selected } = &mut field.kind {
                    if options.is_empty() {
                        return FormEvent::Continue;
                    }
                    *selected = if code == Left {
                        (*selected + options.len() - 1) % options.len()
                    } else {
                        (*selected + 1) % options.len()
                    };
                    field.value = options[*selected].clone();
                }
            }
            Char(c) => {
                if let Some(field) = self.fields.get_mut(self.focused) {
                    if field.accepts(c) {
                        field.value.push(c);
                    }
                }
            }
            Backspace => {
                if let Some(field) = self.fields.get_mut(self.focused) {
                    if !matches!(field.kind, FieldKind::Selector { .. }) {
                        field.value.pop();
                    }
                }
            }
            _ => {}
        }
        FormEvent::Continue
    }

    pub fn to_node<M>(&self, on_submit: M) -> Node<M> {
        let mut children: Vec<Node<M>> = self
            .fields
            .iter()
            .enumerate()
            .map(|(i, f)| f.to_node(i == self.focused))
            .collect();
        let button_cls = if self.focused == self.fields.len() {
            "btn focused"
        } else {
            "btn"
        };
        children.push(el(
            Tag::Button,
            [class(button_cls), attr("type", "submit")],
            self.submit_label,
        ));
        if self.pending {
            children.push(el(Tag::P, [class("small-muted")], "Saving…"));
        }
        if let Some(msg) = &self.notice {
            children.push(el(Tag::P, [class("notice")], vec![text(msg.clone())]));
        }
        el(Tag::Form, [on(EventKind::Submit, on_submit)], children)
    }
}
