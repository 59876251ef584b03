//! ctlprobe - Actor-based control-plane exploration console
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async HTTP execution

use std::io;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use ctlprobe::app::{AppActor, AppState};
use ctlprobe::config::Args;
use ctlprobe::constants::APP_NAME;
use ctlprobe::forms::ActionKind;
use ctlprobe::messages::ui_events::{key_to_ui_event, InputMode, Panel, RequestField};
use ctlprobe::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use ctlprobe::network::NetworkActor;
use ctlprobe::presets::PRESET_ENDPOINTS;
use ctlprobe::ui::{
    border_style, field_line, highlight_json, method_color, render_header_table, render_tabs,
    status_color,
};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging to file
    let log_dir = match args.log_file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => std::path::PathBuf::from("."),
    };
    let log_name = args
        .log_file
        .file_name()
        .map(|n| n.to_os_string())
        .ok_or_else(|| anyhow::anyhow!("--log-file must name a file"))?;
    let file_appender = tracing_appender::rolling::never(log_dir, log_name);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    tracing::info!(base_url = %args.base_url, "Starting {}", APP_NAME);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(
        AppState::with_request(args.request_state()),
        net_cmd_tx,
        render_tx,
    );
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    tracing::info!("Shutting down");
    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(
                    key,
                    current_state.active_panel,
                    current_state.input_mode,
                    current_state.show_help,
                ) {
                    let quit = matches!(event, UiEvent::Quit);
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
        .split(rows[0]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8),  // Quick actions
            Constraint::Length(8),  // Request
            Constraint::Min(6),     // Response
        ])
        .split(columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(PRESET_ENDPOINTS.len() as u16 + 2),
            Constraint::Min(3),
        ])
        .split(columns[1]);

    draw_actions(f, state, left[0]);
    draw_request(f, state, left[1]);
    draw_response(f, state, left[2]);
    draw_presets(f, state, right[0]);
    draw_history(f, state, right[1]);
    draw_status_bar(f, state, rows[1]);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_actions(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.active_panel == Panel::Actions;
    let editing = state.input_mode == InputMode::Editing;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(is_focused, editing))
        .title(" Quick actions (←/→ pick, g:generate, r:run) ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let titles: Vec<&str> = ActionKind::ALL.iter().map(|k| k.as_str()).collect();
    let selected = ActionKind::ALL
        .iter()
        .position(|k| *k == state.selected_action)
        .unwrap_or(0);
    f.render_widget(render_tabs(&titles, selected), parts[0]);

    let fields = state.selected_action.fields();
    let lines: Vec<Line> = if fields.is_empty() {
        vec![Line::from(Span::styled(
            "No parameters.",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        fields
            .iter()
            .enumerate()
            .map(|(i, field)| {
                field_line(
                    field.label(),
                    &state.forms.display(*field),
                    is_focused && i == state.selected_form_field,
                    field.is_choice(),
                )
            })
            .collect()
    };
    f.render_widget(Paragraph::new(lines), parts[1]);

    if is_focused && editing {
        let row = parts[1].y + state.selected_form_field as u16;
        set_cursor(f, parts[1], row, 11 + state.cursor_position as u16);
    }
}

fn draw_request(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.active_panel == Panel::Request;
    let editing = state.input_mode == InputMode::Editing;
    let loading = if state.is_loading { " [...]" } else { "" };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(is_focused, editing))
        .title(format!(" {}{} ", state.request.method.as_str(), loading))
        .title_style(Style::default().fg(method_color(state.request.method)).bold())
        .title_bottom(Line::from(format!(" {} ", state.full_url)).right_aligned());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let body_label = if state.request.method.allows_body() {
        "Body"
    } else {
        "Body (not sent with GET)"
    };

    let lines: Vec<Line> = RequestField::ALL
        .iter()
        .map(|field| {
            let value = match field {
                RequestField::BaseUrl => state.request.base_url.as_str(),
                RequestField::AuthToken => state.request.auth_token.as_str(),
                RequestField::Path => state.request.path.as_str(),
                RequestField::Body => state.request.body.as_str(),
            };
            let label = if *field == RequestField::Body { body_label } else { field.label() };
            field_line(label, value, is_focused && *field == state.request_field, false)
        })
        .collect();
    f.render_widget(Paragraph::new(lines), inner);

    if is_focused && editing {
        let index = RequestField::ALL
            .iter()
            .position(|r| *r == state.request_field)
            .unwrap_or(0);
        let label = if state.request_field == RequestField::Body {
            body_label
        } else {
            state.request_field.label()
        };
        let offset = 3 + label.chars().count().max(8) as u16;
        set_cursor(f, inner, inner.y + index as u16, offset + state.cursor_position as u16);
    }
}

fn set_cursor(f: &mut Frame, area: Rect, y: u16, offset: u16) {
    let max_x = area.x + area.width.saturating_sub(1);
    let x = (area.x + offset).min(max_x);
    f.set_cursor_position(Position::new(x, y));
}

fn draw_response(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.active_panel == Panel::Response;
    let response = &state.response;

    let title = if state.is_loading {
        Span::raw(" Loading... ")
    } else if response.status.is_empty() {
        Span::raw(" Response ")
    } else {
        Span::styled(
            format!(" {} ", response.status),
            Style::default().fg(status_color(&response.status)).bold(),
        )
    };
    let time_text = state
        .last_duration_ms
        .map(|ms| format!(" {}ms ", ms))
        .unwrap_or_else(|| String::from(" - "));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(is_focused, false))
        .title(title)
        .title_bottom(Line::from(time_text).right_aligned());

    if let Some(error) = &response.error {
        let text = Paragraph::new(error.as_str())
            .style(Style::default().fg(Color::Red))
            .block(block)
            .wrap(Wrap { trim: false });
        f.render_widget(text, area);
        return;
    }

    let inner = block.inner(area);
    f.render_widget(block, area);

    let header_height = (response.headers.len() as u16 + 3).min(inner.height / 2);
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(header_height), Constraint::Min(0)])
        .split(inner);

    let headers_block = Block::default()
        .borders(Borders::BOTTOM)
        .title(" Headers ");
    f.render_widget(render_header_table(&response.headers, headers_block), parts[0]);

    let body = Paragraph::new(highlight_json(&response.body))
        .wrap(Wrap { trim: false })
        .scroll((state.response_scroll, 0));
    f.render_widget(body, parts[1]);
}

fn draw_presets(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.active_panel == Panel::Presets;

    let items: Vec<ListItem> = PRESET_ENDPOINTS
        .iter()
        .map(|preset| {
            let method = Span::styled(
                format!("{:6}", preset.method.as_str()),
                Style::default().fg(method_color(preset.method)).bold(),
            );
            ListItem::new(Line::from(vec![method, Span::raw(preset.path)]))
        })
        .collect();

    let highlight_style = if is_focused {
        Style::default().fg(Color::Yellow).bold()
    } else {
        Style::default()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(is_focused, false))
                .title(" Presets (Enter:apply) "),
        )
        .highlight_style(highlight_style);

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected_preset));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_history(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.active_panel == Panel::History;

    let mut lines: Vec<Line> = Vec::new();
    for entry in &state.history {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} ", entry.method.as_str()),
                Style::default().fg(method_color(entry.method)).bold(),
            ),
            Span::raw(entry.url.clone()),
        ]));
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {} | ", entry.timestamp),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                entry.status.clone(),
                Style::default().fg(status_color(&entry.status)),
            ),
        ]));
    }
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "No requests yet.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let history = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(is_focused, false))
                .title(format!(" History ({}) x:clear ", state.history.len())),
        )
        .scroll((state.history_scroll, 0));
    f.render_widget(history, area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    if let Some(message) = &state.notification {
        let bar = Paragraph::new(format!(" {} ", message))
            .style(Style::default().fg(Color::White).bg(Color::Red));
        f.render_widget(bar, area);
        return;
    }

    let status = if state.is_loading {
        " Loading... "
    } else if state.input_mode == InputMode::Editing {
        " ESC/Enter:stop editing | arrows:move "
    } else {
        " Tab:panel | ↑/↓:field | e:edit | m:method | s:send | ?:help | q:quit "
    };

    let bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 NAVIGATION
   Tab / Shift+Tab    Switch panels
   ↑ / ↓              Select field, preset, or scroll

 QUICK ACTIONS
   ← / →              Pick action
   e / Enter          Edit field (toggles choice fields)
   g                  Generate request into the draft
   r                  Generate and send

 REQUEST
   m                  Cycle HTTP method
   s                  Send request
   e / Enter          Edit field

 PRESETS
   Enter              Apply method and path

 GENERAL
   x                  Clear history
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} help ", APP_NAME))
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
