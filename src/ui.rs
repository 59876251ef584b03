//! Widget helpers shared by the drawing code

use ratatui::{prelude::*, widgets::*};

use crate::models::HttpMethod;

/// Border style for a panel
pub fn border_style(is_focused: bool, is_editing: bool) -> Style {
    if is_focused && is_editing {
        Style::default().fg(Color::Yellow)
    } else if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

/// One `label: value` row of a form
pub fn field_line(label: &str, value: &str, is_selected: bool, is_choice: bool) -> Line<'static> {
    let marker = if is_selected { "> " } else { "  " };
    let label_style = if is_selected {
        Style::default().fg(Color::Yellow).bold()
    } else {
        Style::default().fg(Color::Gray)
    };
    let value = if is_choice {
        format!("< {} >", value)
    } else if value.is_empty() {
        String::from("<empty>")
    } else {
        value.to_string()
    };
    Line::from(vec![
        Span::styled(format!("{}{:<8} ", marker, label), label_style),
        Span::raw(value),
    ])
}

/// Renders tabs
pub fn render_tabs<'a>(titles: &[&'a str], selected: usize) -> Tabs<'a> {
    let titles: Vec<Line> = titles.iter().map(|t| Line::from(*t)).collect();

    Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .divider("|")
}

/// Response headers as a two-column table, in received order
pub fn render_header_table<'a>(headers: &'a [(String, String)], block: Block<'a>) -> Table<'a> {
    let rows = headers
        .iter()
        .map(|(key, value)| Row::new(vec![key.as_str(), value.as_str()]));

    Table::new(rows, [Constraint::Percentage(35), Constraint::Percentage(65)])
        .header(Row::new(vec!["Key", "Value"]).style(Style::default().bold()))
        .block(block)
}

/// Simple JSON syntax highlighting
pub fn highlight_json(text: &str) -> Vec<Line<'static>> {
    text.lines().map(highlight_json_line).collect()
}

fn highlight_json_line(line: &str) -> Line<'static> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut chars = line.char_indices().peekable();

    let flush = |plain: &mut String, spans: &mut Vec<Span<'static>>| {
        if !plain.is_empty() {
            let style = match plain.trim() {
                "true" | "false" | "null" => Style::default().fg(Color::Magenta),
                t if !t.is_empty() && t.parse::<f64>().is_ok() => Style::default().fg(Color::Yellow),
                _ => Style::default(),
            };
            spans.push(Span::styled(std::mem::take(plain), style));
        }
    };

    while let Some((start, c)) = chars.next() {
        match c {
            '"' => {
                flush(&mut plain, &mut spans);
                let mut end = line.len();
                let mut escaped = false;
                for (i, ch) in chars.by_ref() {
                    if escaped {
                        escaped = false;
                    } else if ch == '\\' {
                        escaped = true;
                    } else if ch == '"' {
                        end = i + 1;
                        break;
                    }
                }
                let is_key = line[end..].trim_start().starts_with(':');
                let color = if is_key { Color::Cyan } else { Color::Green };
                spans.push(Span::styled(
                    line[start..end].to_string(),
                    Style::default().fg(color),
                ));
            }
            '{' | '}' | '[' | ']' => {
                flush(&mut plain, &mut spans);
                spans.push(Span::styled(c.to_string(), Style::default().fg(Color::Yellow)));
            }
            ':' | ',' => {
                flush(&mut plain, &mut spans);
                spans.push(Span::raw(c.to_string()));
            }
            _ => plain.push(c),
        }
    }
    flush(&mut plain, &mut spans);

    Line::from(spans)
}

/// Status color, keyed on the leading code of a status line
pub fn status_color(status: &str) -> Color {
    let code = status
        .split_whitespace()
        .next()
        .and_then(|c| c.parse::<u16>().ok())
        .unwrap_or(0);
    match code {
        200..=299 => Color::Green,
        300..=399 => Color::Cyan,
        400..=499 => Color::Red,
        500..=599 => Color::Magenta,
        _ => Color::Yellow,
    }
}

/// Method color
pub fn method_color(method: HttpMethod) -> Color {
    match method {
        HttpMethod::GET => Color::Green,
        HttpMethod::POST => Color::Yellow,
        HttpMethod::PUT => Color::Blue,
        HttpMethod::PATCH => Color::Cyan,
        HttpMethod::DELETE => Color::Red,
    }
}
