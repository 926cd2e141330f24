use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph},
    Frame,
};

use crate::core::constants::ROUND_SECONDS;
use crate::core::session::GameSession;
use crate::ui::state::UiState;
use crate::ui::{difficulty_color, severity_color};

/// Draws the combat screen: header, gauges, battlefield, problem, message.
pub fn draw_battle_scene(frame: &mut Frame, area: Rect, ui: &UiState, session: &GameSession) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Score and group header
            Constraint::Length(3), // Health and countdown gauges
            Constraint::Min(7),    // Battlefield
            Constraint::Length(4), // Problem and answer input
            Constraint::Length(3), // Message line
            Constraint::Length(1), // Key help
        ])
        .split(area);

    draw_header(frame, chunks[0], ui, session);
    draw_gauges(frame, chunks[1], ui);
    draw_battlefield(frame, chunks[2], ui);
    draw_problem_panel(frame, chunks[3], ui, session);
    draw_message(frame, chunks[4], ui);
    draw_help(frame, chunks[5]);

    if session.paused {
        draw_pause_overlay(frame);
    }
}

/// Draws the run score, current group, and round tally.
fn draw_header(frame: &mut Frame, area: Rect, ui: &UiState, session: &GameSession) {
    let score_style = if ui.score < 0 {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    };
    let group_style = Style::default()
        .fg(difficulty_color(ui.group_difficulty))
        .add_modifier(Modifier::BOLD);

    let header = Line::from(vec![
        Span::styled("Score: ", Style::default().fg(Color::DarkGray)),
        Span::styled(format!("{}", ui.score), score_style),
        Span::raw("   "),
        Span::styled("Sums of ", Style::default().fg(Color::DarkGray)),
        Span::styled(format!("{}", ui.group_sum), group_style),
        Span::raw(" "),
        Span::styled(
            format!("({})", ui.group_difficulty.name()),
            Style::default().fg(difficulty_color(ui.group_difficulty)),
        ),
        Span::raw("   "),
        Span::styled(
            format!("Won {}  Lost {}", session.rounds_won, session.rounds_lost),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let paragraph = Paragraph::new(header)
        .block(Block::default().borders(Borders::ALL).title(" Arithmancer "))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Draws the player HP bar and the round countdown side by side.
fn draw_gauges(frame: &mut Frame, area: Rect, ui: &UiState) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let hp_ratio = if ui.hp_max == 0 {
        0.0
    } else {
        ui.hp as f64 / ui.hp_max as f64
    };
    let hp_gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Health"))
        .gauge_style(
            Style::default()
                .fg(gauge_color(hp_ratio))
                .add_modifier(Modifier::BOLD),
        )
        .label(format!("{}/{}", ui.hp, ui.hp_max))
        .ratio(hp_ratio.clamp(0.0, 1.0));
    frame.render_widget(hp_gauge, halves[0]);

    let time_ratio = ui.seconds_left as f64 / ROUND_SECONDS as f64;
    let time_gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Time"))
        .gauge_style(
            Style::default()
                .fg(gauge_color(time_ratio))
                .add_modifier(Modifier::BOLD),
        )
        .label(format!("{}s", ui.seconds_left))
        .ratio(time_ratio.clamp(0.0, 1.0));
    frame.render_widget(time_gauge, halves[1]);
}

fn gauge_color(ratio: f64) -> Color {
    if ratio > 0.66 {
        Color::Green
    } else if ratio > 0.33 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Draws the player and the approaching monster.
fn draw_battlefield(frame: &mut Frame, area: Rect, ui: &UiState) {
    let block = Block::default().borders(Borders::ALL).title("Battlefield");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width as usize;
    if width < 12 {
        return;
    }

    let player_col = 2usize;
    let mut duel = vec![Span::raw(" ".repeat(player_col))];
    duel.push(Span::styled(
        "🧙",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ));
    if ui.hurt_flash > 0.0 {
        duel.push(Span::styled(
            " ✹",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }

    let mut lines = vec![Line::from("")];
    match &ui.monster {
        Some(monster) => {
            // The gap shrinks as the monster covers its approach path.
            let travel = width.saturating_sub(player_col + 10);
            let gap = ((ui.monster_distance * travel as f64) as usize).max(1);
            duel.push(Span::raw(" ".repeat(gap)));
            if ui.strike_flash > 0.0 {
                duel.push(Span::styled(
                    "⚔ ",
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ));
            }
            duel.push(Span::styled(
                monster.glyph,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ));
            lines.push(Line::from(duel));
            lines.push(Line::from(""));

            let name_pad = (player_col + 4 + gap).min(width.saturating_sub(monster.name.len() + 1));
            lines.push(Line::from(vec![
                Span::raw(" ".repeat(name_pad)),
                Span::styled(monster.name.clone(), Style::default().fg(Color::Red)),
            ]));
        }
        None => {
            lines.push(Line::from(duel));
            lines.push(Line::from(""));
            let idle = "The road is quiet...";
            let pad = width.saturating_sub(idle.len()) / 2;
            lines.push(Line::from(vec![
                Span::raw(" ".repeat(pad)),
                Span::styled(
                    idle,
                    Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
                ),
            ]));
        }
    }

    if ui.victory_flash > 0.0 {
        lines.push(Line::from(""));
        let banner = format!("+{} points!", ui.victory_points);
        let pad = width.saturating_sub(banner.len()) / 2;
        lines.push(Line::from(vec![
            Span::raw(" ".repeat(pad)),
            Span::styled(
                banner,
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ]));
    }

    let paragraph = Paragraph::new(lines);
    frame.render_widget(paragraph, inner);
}

/// Draws the posed problem and the answer being typed.
fn draw_problem_panel(frame: &mut Frame, area: Rect, ui: &UiState, session: &GameSession) {
    let mut lines = Vec::new();
    match &ui.problem_text {
        Some(problem) => {
            lines.push(Line::from(Span::styled(
                format!("{} = ?", problem),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )));
            if ui.keyboard_visible {
                lines.push(Line::from(vec![
                    Span::styled("Answer: ", Style::default().fg(Color::DarkGray)),
                    Span::styled(
                        format!("{}_", session.answer_input),
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                    ),
                ]));
            }
        }
        None => {
            lines.push(Line::from(Span::styled(
                "...",
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Problem"))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Draws the message line in its severity color.
fn draw_message(frame: &mut Frame, area: Rect, ui: &UiState) {
    let line = match &ui.notice {
        Some((text, severity)) => Line::from(Span::styled(
            text.clone(),
            Style::default()
                .fg(severity_color(*severity))
                .add_modifier(Modifier::BOLD),
        )),
        None => Line::from(""),
    };

    let paragraph = Paragraph::new(line)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_help(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new(Line::from(Span::styled(
        "[0-9] answer  [Enter] submit  [Backspace] erase  [H] hint  [P] pause  [M] sound  [Q] menu",
        Style::default().fg(Color::DarkGray),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(help, area);
}

/// Draws the pause dialog as a centered overlay.
fn draw_pause_overlay(frame: &mut Frame) {
    let size = frame.size();

    let dialog_width = 34.min(size.width.saturating_sub(4));
    let dialog_height = 7.min(size.height.saturating_sub(4));
    let x = (size.width.saturating_sub(dialog_width)) / 2;
    let y = (size.height.saturating_sub(dialog_height)) / 2;
    let dialog_area = Rect::new(x, y, dialog_width, dialog_height);

    // Clear the area behind the dialog
    frame.render_widget(Clear, dialog_area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Paused",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("[P] resume", Style::default().fg(Color::Green))),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, dialog_area);
}
