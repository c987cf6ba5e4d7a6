// File: src/tui/view.rs
use crate::app::form::{Field, Form};
use crate::app::home::HomeState;
use crate::app::{App, Route};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

pub fn draw(f: &mut Frame, app: &App) {
    match app.route {
        Route::Login => {
            let area = centered_rect(50, 60, f.area());
            draw_form(
                f,
                area,
                " Login ",
                &app.login.form,
                "Enter:Login  Tab:Next  Ctrl+R:Register  Esc:Quit",
                app.login.status.as_deref(),
            );
        }
        Route::Register => {
            let area = centered_rect(50, 70, f.area());
            draw_form(
                f,
                area,
                " Register ",
                &app.register.form,
                "Enter:Register  Tab:Next  Esc:Back to Login",
                app.register.status.as_deref(),
            );
            if let Some(alert) = &app.register.alert {
                draw_alert(f, alert);
            }
        }
        Route::Home => draw_home(f, &app.home),
    }
}

fn draw_form<F: Field>(
    f: &mut Frame,
    area: Rect,
    title: &str,
    form: &Form<F>,
    help: &str,
    status: Option<&str>,
) {
    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title.to_string())
        .title_alignment(Alignment::Center);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut constraints: Vec<Constraint> = F::ALL.iter().map(|_| Constraint::Length(3)).collect();
    constraints.push(Constraint::Length(2));
    constraints.push(Constraint::Min(1));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (i, field) in F::ALL.iter().enumerate() {
        let focused = form.focused() == *field;
        let border_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let text = form.display(*field);
        let input = Paragraph::new(text.clone()).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", field.label()))
                .border_style(border_style),
        );
        f.render_widget(input, rows[i]);

        if focused {
            let cursor_x = rows[i].x + 1 + text.chars().count() as u16;
            let max_x = rows[i].x + rows[i].width.saturating_sub(2);
            if cursor_x <= max_x {
                f.set_cursor_position((cursor_x, rows[i].y + 1));
            }
        }
    }

    let n = F::ALL.len();
    if let Some(status) = status {
        let p = Paragraph::new(status.to_string())
            .style(Style::default().fg(Color::Cyan))
            .wrap(Wrap { trim: true });
        f.render_widget(p, rows[n]);
    }
    let p = Paragraph::new(help.to_string())
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(p, rows[n + 1]);
}

fn draw_alert(f: &mut Frame, message: &str) {
    let area = centered_rect(40, 20, f.area());
    f.render_widget(Clear, area);
    let p = Paragraph::new(vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Alert ")
            .border_style(Style::default().fg(Color::Red)),
    );
    f.render_widget(p, area);
}

fn draw_home(f: &mut Frame, state: &HomeState) {
    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    // --- Header ---
    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(v_chunks[0]);
    let name = state.user.as_ref().map(|u| u.name.as_str()).unwrap_or("");
    let user = Paragraph::new(Span::styled(
        name.to_string(),
        Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::BOLD),
    ))
    .block(Block::default().borders(Borders::LEFT | Borders::TOP | Borders::BOTTOM));
    let new_event = Paragraph::new(Line::from(vec![
        Span::styled("n", Style::default().fg(Color::Yellow)),
        Span::raw(" New Event "),
        Span::styled("+", Style::default().fg(Color::Blue)),
    ]))
    .alignment(Alignment::Right)
    .block(Block::default().borders(Borders::RIGHT | Borders::TOP | Borders::BOTTOM));
    f.render_widget(user, h_chunks[0]);
    f.render_widget(new_event, h_chunks[1]);

    // --- Events ---
    let list_area = v_chunks[1];
    if state.is_loading() {
        let p = Paragraph::new("Loading...")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" Events "));
        f.render_widget(p, list_area);
    } else if state.events.is_empty() {
        let p = Paragraph::new("No events found.")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" Events "));
        f.render_widget(p, list_area);
    } else {
        let items: Vec<ListItem> = state
            .events
            .iter()
            .map(|event| {
                let interested = state.is_interested(&event.id);
                let pending = state.pending.contains(&event.id);

                let mut title = vec![Span::styled(
                    event.name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )];
                if pending {
                    title.push(Span::styled(" ...", Style::default().fg(Color::DarkGray)));
                }

                let (label, color) = if interested {
                    ("[ Drop Event ]", Color::Green)
                } else {
                    ("[ Participate! ]", Color::Blue)
                };

                let mut lines = vec![
                    Line::from(title),
                    Line::from(Span::styled(
                        event.description.clone(),
                        Style::default().fg(Color::Gray),
                    )),
                    Line::from(vec![
                        Span::styled("Date: ", Style::default().add_modifier(Modifier::BOLD)),
                        Span::raw(event.date.clone()),
                        Span::raw("   "),
                        Span::styled("Location: ", Style::default().add_modifier(Modifier::BOLD)),
                        Span::raw(event.location.clone()),
                    ]),
                ];
                if !event.photo_url.is_empty() {
                    lines.push(Line::from(Span::styled(
                        event.photo_url.clone(),
                        Style::default().fg(Color::DarkGray),
                    )));
                }
                lines.push(Line::from(Span::styled(
                    label,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(""));
                ListItem::new(lines)
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" Events ({}) ", state.events.len())),
            )
            .highlight_symbol("> ")
            .highlight_style(Style::default().bg(Color::Black));
        let mut list_state = ListState::default().with_selected(Some(state.selected));
        f.render_stateful_widget(list, list_area, &mut list_state);
    }

    // --- Footer ---
    let f_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(v_chunks[2]);
    let status = Paragraph::new(state.status.clone().unwrap_or_default())
        .style(Style::default().fg(Color::Cyan))
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::TOP | Borders::BOTTOM)
                .title(" Status "),
        );
    let help = Paragraph::new("j/k:Move Ret:Participate n:New r:Refresh L:Logout q:Quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::TOP | Borders::BOTTOM)
                .title(" Actions "),
        );
    f.render_widget(status, f_chunks[0]);
    f.render_widget(help, f_chunks[1]);

    if state.modal_open {
        let area = centered_rect(60, 80, f.area());
        draw_form(
            f,
            area,
            " Create New Event ",
            &state.new_event,
            "Enter:Submit Event  Tab:Next  Esc:Close",
            state.status.as_deref(),
        );
    }
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
