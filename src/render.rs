//! Turns element trees into styled terminal lines.

use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::dom::{Element, Node, Tag};
use crate::tui::{
    BOLD_STYLE, COLUMN_STYLE, FOCUSED_STYLE, HEADER_STYLE, MUTED_STYLE, NOTICE_STYLE,
    SELECTED_STYLE,
};

const LABEL_WIDTH: usize = 24;
const COLUMN_GAP: usize = 2;

pub fn render<M>(node: &Node<M>, width: u16) -> Vec<Line<'static>> {
    let mut out = Vec::new();
    block(node, width as usize, &mut out);
    out
}

fn block<M>(node: &Node<M>, width: usize, out: &mut Vec<Line<'static>>) {
    match node {
        Node::Text(s) | Node::Markup(s) => {
            for l in s.lines() {
                out.push(Line::from(format!(" {l}")));
            }
        }
        Node::Element(e) => element(e, width, out),
    }
}

fn element<M>(e: &Element<M>, width: usize, out: &mut Vec<Line<'static>>) {
    match e.tag {
        Tag::H2 => {
            out.push(Line::from(Span::styled(format!(" {}", inline_text(e)), HEADER_STYLE)));
            out.push(Line::default());
        }
        Tag::H3 => out.push(Line::from(Span::styled(format!(" {}", inline_text(e)), BOLD_STYLE))),
        Tag::P => {
            let style = if e.has_class("small-muted") {
                MUTED_STYLE
            } else if e.has_class("notice") {
                NOTICE_STYLE
            } else {
                Style::default()
            };
            out.push(Line::from(Span::styled(format!(" {}", inline_text(e)), style)));
        }
        Tag::Li => out.push(Line::from(format!("   • {}", inline_text(e)))),
        Tag::Table => table(e, out),
        Tag::Nav => out.push(nav(e)),
        Tag::Input | Tag::Textarea | Tag::Select => out.push(field(e)),
        Tag::Button => {
            let style = if e.has_class("focused") {
                SELECTED_STYLE
            } else {
                BOLD_STYLE
            };
            out.push(Line::from(vec![
                Span::raw("   "),
                Span::styled(format!("[ {} ]", inline_text(e)), style),
            ]));
        }
        Tag::Div if e.has_class("grid-2") => grid(e, width, out),
        _ => {
            if is_inline(e) {
                for l in inline_text(e).lines() {
                    out.push(Line::from(format!(" {l}")));
                }
            } else {
                for c in &e.children {
                    block(c, width, out);
                }
            }
            if e.has_class("card") {
                out.push(Line::default());
            }
        }
    }
}

fn is_inline<M>(e: &Element<M>) -> bool {
    !e.children.is_empty()
        && e
            .children
            .iter()
            .all(|c| matches!(c, Node::Text(_) | Node::Markup(_)))
}

fn inline_text<M>(e: &Element<M>) -> String {
    e.children.iter().map(Node::text_content).collect()
}

/// Two columns side by side, each given half the width. When a left line
/// would run into the right column the cards are stacked instead.
fn grid<M>(e: &Element<M>, width: usize, out: &mut Vec<Line<'static>>) {
    let half = width / 2;
    let mut columns: Vec<Vec<Line<'static>>> = Vec::new();
    for c in e.children.iter().take(2) {
        let mut lines = Vec::new();
        block(c, half, &mut lines);
        columns.push(lines);
    }
    let right = if columns.len() == 2 { columns.pop() } else { None };
    let Some(left) = columns.pop() else { return };
    let Some(right) = right else {
        out.extend(left);
        return;
    };

    // One column of gap keeps the cards from touching.
    if left.iter().any(|l| line_width(l) >= half) {
        out.extend(left);
        out.extend(right);
        return;
    }

    let rows = left.len().max(right.len());
    for i in 0..rows {
        let mut spans: Vec<Span<'static>> = Vec::new();
        let used = match left.get(i) {
            Some(l) => {
                spans.extend(l.spans.iter().cloned());
                line_width(l)
            }
            None => 0,
        };
        if let Some(r) = right.get(i) {
            spans.push(Span::raw(" ".repeat(half - used)));
            spans.extend(r.spans.iter().cloned());
        }
        out.push(Line::from(spans));
    }
}

fn line_width(line: &Line<'_>) -> usize {
    line.spans.iter().map(|s| s.content.chars().count()).sum()
}

fn table<M>(e: &Element<M>, out: &mut Vec<Line<'static>>) {
    let mut header: Vec<String> = Vec::new();
    let mut rows: Vec<Vec<String>> = Vec::new();
    collect_rows(e, &mut header, &mut rows);

    let cols = header.len().max(rows.iter().map(Vec::len).max().unwrap_or(0));
    let mut widths = vec![0usize; cols];
    for row in std::iter::once(&header).chain(rows.iter()) {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let format_row = |row: &[String]| -> String {
        let mut s = String::from("   ");
        for (i, w) in widths.iter().enumerate() {
            let cell = row.get(i).map(String::as_str).unwrap_or("");
            s.push_str(&format!("{cell:<w$}", w = *w));
            if i + 1 < cols {
                s.push_str(&" ".repeat(COLUMN_GAP));
            }
        }
        s.trim_end().to_string()
    };

    if !header.is_empty() {
        out.push(Line::from(Span::styled(format_row(&header), COLUMN_STYLE)));
    }
    for row in &rows {
        out.push(Line::from(format_row(row)));
    }
}

fn collect_rows<M>(e: &Element<M>, header: &mut Vec<String>, rows: &mut Vec<Vec<String>>) {
    for c in &e.children {
        let Some(child) = c.element() else { continue };
        match child.tag {
            Tag::Tr => {
                let cells: Vec<&Element<M>> =
                    child.children.iter().filter_map(Node::element).collect();
                if cells.iter().all(|c| c.tag == Tag::Th) && header.is_empty() && !cells.is_empty() {
                    *header = cells.iter().map(|c| inline_text(c)).collect();
                } else {
                    rows.push(cells.iter().map(|c| inline_text(c)).collect());
                }
            }
            _ => collect_rows(child, header, rows),
        }
    }
}

fn nav<M>(e: &Element<M>) -> Line<'static> {
    let mut spans = vec![Span::raw(" ")];
    for c in e.children.iter().filter_map(Node::element) {
        let key = c.attr("data-key").unwrap_or("");
        let label = format!(" {key} {} ", inline_text(c));
        let style = if c.has_class("active") {
            SELECTED_STYLE
        } else {
            Style::default()
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn field<M>(e: &Element<M>) -> Line<'static> {
    let focused = e.has_class("focused");
    let mut label = e
        .attr("placeholder")
        .or_else(|| e.attr("name"))
        .unwrap_or("")
        .to_string();
    if e.attr("required").is_some() {
        label.push_str(" *");
    }
    let value = e.attr("value").unwrap_or("");
    let shown = match (e.tag, focused) {
        (Tag::Select, true) => format!("< {value} >"),
        (Tag::Select, false) => format!("  {value}  "),
        (_, true) => format!("{value}_"),
        (_, false) => value.to_string(),
    };
    let (label_style, value_style) = if focused {
        (BOLD_STYLE, FOCUSED_STYLE)
    } else {
        (Style::default(), Style::default())
    };
    Line::from(vec![
        Span::styled(format!("   {label:<w$} ", w = LABEL_WIDTH), label_style),
        Span::styled(shown, value_style),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{attr, class, el, text};

    fn plain(lines: &[Line<'static>]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_heading_and_inline_div() {
        let node: Node<()> = el(
            Tag::Div,
            [class("card")],
            vec![el(Tag::H2, [], "Manage Accounts"), el(Tag::Div, [], vec![text("Cash — 1,500 BDT")])],
        );
        let lines = plain(&render(&node, 80));
        assert_eq!(lines[0], " Manage Accounts");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], " Cash — 1,500 BDT");
        assert_eq!(lines.last().unwrap(), "");
    }

    #[test]
    fn test_table_aligns_columns() {
        let node: Node<()> = el(
            Tag::Table,
            [class("table")],
            vec![
                el(
                    Tag::Thead,
                    [],
                    vec![el(Tag::Tr, [], vec![el(Tag::Th, [], "Challan"), el(Tag::Th, [], "KG")])],
                ),
                el(
                    Tag::Tbody,
                    [],
                    vec![el(Tag::Tr, [], vec![el(Tag::Td, [], "7"), el(Tag::Td, [], "1200")])],
                ),
            ],
        );
        let lines = plain(&render(&node, 80));
        assert_eq!(lines, vec!["   Challan  KG", "   7        1200"]);
    }

    #[test]
    fn test_focused_input_shows_cursor() {
        let node: Node<()> = el(
            Tag::Input,
            [
                class("input focused"),
                attr("placeholder", "Account name"),
                attr("required", "required"),
                attr("value", "Cash"),
            ],
            (),
        );
        let lines = plain(&render(&node, 80));
        assert!(lines[0].starts_with("   Account name *"));
        assert!(lines[0].ends_with("Cash_"));
    }

    #[test]
    fn test_grid_places_columns_side_by_side() {
        let node: Node<()> = el(
            Tag::Div,
            [class("grid-2")],
            vec![el(Tag::Div, [], "left"), el(Tag::Div, [], "right")],
        );
        let lines = plain(&render(&node, 40));
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with(" left"));
        assert_eq!(lines[0].find("right"), Some(21));
    }

    #[test]
    fn test_grid_right_column_starts_at_half() {
        let node: Node<()> = el(
            Tag::Div,
            [class("grid-2")],
            vec![
                el(Tag::Div, [], vec![el(Tag::H3, [], "Recent"), el(Tag::P, [], "a much longer line")]),
                el(Tag::Ul, [], vec![el(Tag::Li, [], "one"), el(Tag::Li, [], "two"), el(Tag::Li, [], "three")]),
            ],
        );
        let lines = plain(&render(&node, 60));
        assert_eq!(lines.len(), 3);
        for line in &lines {
            let bullet = line.char_indices().position(|(_, c)| c == '•').unwrap();
            assert_eq!(bullet, 33);
        }
    }

    #[test]
    fn test_dashboard_stacks_when_table_is_wider_than_half() {
        use crate::fmt::Locale;
        use crate::views::dashboard::DashboardView;
        use crate::views::fixtures::{account, transaction};
        use crate::views::Load;

        let txs = (1..=3).map(|i| transaction(&format!("CH-{i}"), i)).collect();
        let accounts = (1..=6).map(|i| account(&format!("Dealer adv {i}"), 9)).collect();
        let view = DashboardView {
            data: Load::Ready((txs, accounts)),
        };
        let lines = plain(&render(&view.build(Locale::EnUs), 80));

        let rows: Vec<&String> = lines.iter().filter(|l| l.contains("CH-")).collect();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|l| !l.contains('•')));
        let bullets: Vec<&String> = lines.iter().filter(|l| l.contains('•')).collect();
        assert_eq!(bullets.len(), 6);
        assert!(bullets.iter().all(|l| l.starts_with("   • Dealer adv")));
    }

    #[test]
    fn test_list_items_are_bulleted() {
        let node: Node<()> = el(Tag::Ul, [], vec![el(Tag::Li, [], vec![text("Cash: 10 BDT")])]);
        assert_eq!(plain(&render(&node, 80)), vec!["   • Cash: 10 BDT"]);
    }
}
