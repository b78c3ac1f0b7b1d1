use ratatui::{
    Frame,
    layout::{Alignment, Layout, Direction, Constraint, Rect},
    widgets::{Block, Borders, BorderType, List, ListItem, ListState, Paragraph, Wrap, Clear},
    style::{Style, Modifier},
    text::{Line, Span},
};
use crate::app::{App, InputMode};
use crate::constants::messages;
use crate::controller::{FetchState, FetchStatus, Mode};
use crate::router::Route;
use crate::util_text::{format_klay, short_address, truncate_chars};

// ===============================
// Top-level draw
// ===============================
pub fn draw(f:&mut Frame, app:&mut App){
    app.tick_spinner();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),   // header
            Constraint::Min(0),      // body
            Constraint::Length(1),   // footer
        ])
        .split(f.area());

    header(f, chunks[0], app);
    match app.route() {
        Route::Home => home(f, chunks[1], app),
        Route::Project { .. } => project(f, chunks[1], app),
    }
    footer(f, chunks[2], app);

    if app.toast_message().is_some() {
        draw_toast(f, app);
    }
}

// ===============================
// Header / Footer
// ===============================
fn header(f:&mut Frame, area:Rect, app:&App){
    let on_project = matches!(app.route(), Route::Project { .. });
    let tab = |title: &'static str, selected: bool| {
        if selected {
            Span::styled(title, Style::default().fg(app.theme().focus_border).add_modifier(Modifier::BOLD))
        } else {
            Span::styled(title, Style::default().fg(app.theme().text_dim))
        }
    };

    let line = Line::from(vec![
        Span::raw("┌─"),
        tab("Home", !on_project),
        Span::raw("─┬─"),
        tab("Project", on_project),
        Span::raw("─┐  "),
        Span::styled(app.href(), Style::default().fg(app.theme().text_dim)),
    ]);
    let paragraph = Paragraph::new(line)
        .block(Block::default().borders(Borders::BOTTOM).border_type(BorderType::Plain));
    f.render_widget(paragraph, area);
}

fn footer(f:&mut Frame, area:Rect, app:&App){
    let hints = match (app.route(), app.input_mode()) {
        (Route::Home, _) => "Enter/p project  / search  [ ] back/fwd  q quit",
        (_, InputMode::Search) => "type item number  Backspace delete  Enter/Esc done",
        (_, InputMode::Normal) => "/ search  x clear  j/k move  m load more  [ ] back/fwd  h home  q quit",
    };
    let p = Paragraph::new(hints).style(Style::default().fg(app.theme().text_dim));
    f.render_widget(p, area);
}

// ===============================
// Home
// ===============================
fn home(f:&mut Frame, area:Rect, app:&App){
    let text = vec![
        Line::from(Span::styled("palaview", Style::default().fg(app.theme().accent).add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(format!("Project Address: {}", app.project_address())),
        Line::from(""),
        Line::from(Span::styled("Press Enter to open the project listings", Style::default().fg(app.theme().text_dim))),
    ];
    let rows = Layout::vertical([
        Constraint::Percentage(35),
        Constraint::Length(7),
        Constraint::Min(0),
    ]).split(area);

    let p = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(app.theme().unfocused_border)));
    f.render_widget(p, rows[1]);
}

// ===============================
// Project
// ===============================
fn project(f:&mut Frame, area:Rect, app:&App){
    let state = app.state();

    // Nothing to show yet: the whole screen is the status.
    if state.mode == Mode::Browse && state.pages.is_empty() {
        match state.status {
            FetchStatus::Error => {
                centered_message(f, area, &format!("Error: {}", state.error.unwrap_or("unknown")), app.theme().error);
                return;
            }
            FetchStatus::Loading | FetchStatus::Idle => {
                centered_message(f, area, messages::LOADING, app.theme().text);
                return;
            }
            _ => {}
        }
    }

    let address = if area.width < 70 {
        short_address(app.project_address())
    } else {
        app.project_address().to_string()
    };

    let rows = Layout::vertical([
        Constraint::Length(1),  // project address
        Constraint::Length(3),  // search box
        Constraint::Min(0),     // results
        Constraint::Length(1),  // load more / status
    ]).split(area);

    f.render_widget(Paragraph::new(format!("Project Address: {address}")), rows[0]);
    search_bar(f, rows[1], app);
    match state.mode {
        Mode::Lookup => lookup_panel(f, rows[2], app, &state),
        Mode::Browse => browse_list(f, rows[2], app, &state),
    }
    status_line(f, rows[3], app, &state);
}

fn search_bar(f:&mut Frame, area:Rect, app:&App){
    let focused = app.input_mode() == InputMode::Search;
    let term = app.search_term();
    let border_color = if focused { app.theme().focus_border } else { app.theme().unfocused_border };
    let (text, style) = if term.is_empty() && !focused {
        (messages::SEARCH_HINT, Style::default().fg(app.theme().text_dim))
    } else {
        (term, Style::default().fg(if focused { app.theme().focus_border } else { app.theme().text }))
    };

    let paragraph = Paragraph::new(text)
        .style(style)
        .block(Block::default()
            .title(" Search Item ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color)));
    f.render_widget(paragraph, area);

    if focused && area.width > 2 {
        let x = area.x + 1 + (term.chars().count().min(area.width.saturating_sub(2) as usize) as u16);
        f.set_cursor_position((x, area.y + 1));
    }
}

fn lookup_panel(f:&mut Frame, area:Rect, app:&App, state:&FetchState){
    let block = Block::default()
        .title(format!(" Item {} ", app.search_term()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(app.theme().unfocused_border));

    let dim = Style::default().fg(app.theme().text_dim);
    let lines: Vec<Line> = match (state.status, state.item) {
        (FetchStatus::Error, _) => vec![Line::from(Span::styled(
            format!("Error: {}", state.error.unwrap_or("unknown")),
            Style::default().fg(app.theme().error),
        ))],
        (_, Some(item)) => {
            let mut lines = vec![
                Line::from(Span::styled(
                    item.name.clone().unwrap_or_else(|| "(unnamed)".to_string()),
                    Style::default().fg(app.theme().text).add_modifier(Modifier::BOLD),
                )),
                Line::from(vec![Span::styled("image: ", dim), Span::raw(item.image_url.clone().unwrap_or_default())]),
            ];
            if let Some(ref owner) = item.owner_address {
                lines.push(Line::from(vec![Span::styled("owner: ", dim), Span::raw(owner.clone())]));
            }
            if item.list_price_in_klay.is_some() {
                lines.push(Line::from(vec![
                    Span::styled("price: ", dim),
                    Span::raw(format_klay(item.list_price_in_klay.as_ref())),
                ]));
            }
            lines
        }
        _ => vec![Line::from(Span::styled(format!("{} {}", app.spinner(), messages::LOADING), dim))],
    };

    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(block);
    f.render_widget(p, area);
}

fn browse_list(f:&mut Frame, area:Rect, app:&App, state:&FetchState){
    let name_width = area.width.saturating_sub(20) as usize;
    let items: Vec<ListItem> = state.items().map(|item| {
        ListItem::new(Line::from(vec![
            Span::styled(
                format!("{:<width$}", truncate_chars(&item.name, name_width), width = name_width),
                Style::default().fg(app.theme().text),
            ),
            Span::styled(
                format!("{:>14}", format_klay(item.list_price_in_klay.as_ref())),
                Style::default().fg(app.theme().text_dim),
            ),
        ]))
    }).collect();

    let title = format!(" Listings ({} items, {} pages) ", state.item_count(), state.pages.len());
    let mut list_state = ListState::default();
    if !items.is_empty() {
        list_state.select(Some(app.selection()));
    }

    let list = List::new(items)
        .highlight_style(Style::default().bg(app.theme().selection_bg).fg(app.theme().selection_fg).add_modifier(Modifier::BOLD))
        .block(Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(app.theme().unfocused_border)));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn status_line(f:&mut Frame, area:Rect, app:&App, state:&FetchState){
    let mut spans = Vec::new();

    if state.mode == Mode::Browse {
        let (label, style) = if state.is_fetching_next_page {
            (format!("{} {}", app.spinner(), messages::LOADING_MORE), Style::default().fg(app.theme().accent))
        } else if state.has_next_page {
            (format!("[ {} (m) ]", messages::LOAD_MORE), Style::default().fg(app.theme().accent).add_modifier(Modifier::BOLD))
        } else {
            (format!("[ {} ]", messages::NOTHING_MORE), Style::default().fg(app.theme().text_dim))
        };
        spans.push(Span::styled(label, style));
    }

    if state.is_fetching && !state.is_fetching_next_page {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(messages::FETCHING, Style::default().fg(app.theme().accent)));
    }

    if state.mode == Mode::Browse && state.status == FetchStatus::Error {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("Error: {}", state.error.unwrap_or("unknown")),
            Style::default().fg(app.theme().error),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

// ===============================
// Overlays
// ===============================
fn centered_message(f:&mut Frame, area:Rect, msg:&str, color:ratatui::style::Color){
    let rows = Layout::vertical([
        Constraint::Percentage(45),
        Constraint::Length(1),
        Constraint::Min(0),
    ]).split(area);
    let p = Paragraph::new(msg)
        .alignment(Alignment::Center)
        .style(Style::default().fg(color));
    f.render_widget(p, rows[1]);
}

fn draw_toast(f:&mut Frame, app:&App){
    let Some(msg) = app.toast_message() else { return };
    let area = f.area();
    let width = (msg.chars().count() as u16 + 4).min(area.width);
    let rect = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(4),
        width,
        height: 3.min(area.height),
    };
    f.render_widget(Clear, rect);
    let p = Paragraph::new(msg)
        .alignment(Alignment::Center)
        .style(Style::default().fg(app.theme().toast))
        .block(Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(app.theme().toast)));
    f.render_widget(p, rect);
}
