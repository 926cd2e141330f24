use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::build_info;
use crate::core::session::GameSession;
use crate::curriculum::{Curriculum, Difficulty};
use crate::ui::state::UiState;
use crate::ui::{difficulty_color, severity_color};

/// Width of a per-group progress bar in cells.
const BAR_WIDTH: usize = 16;

/// Draws the title screen: lifetime score, training level, group progress.
pub fn draw_menu_scene(
    frame: &mut Frame,
    area: Rect,
    ui: &UiState,
    session: &GameSession,
    curriculum: &Curriculum,
    last_played: i64,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),  // Title banner
            Constraint::Length(3),  // Lifetime score and training level
            Constraint::Min(10),    // Per-group progress
            Constraint::Length(3),  // Last played and notices
            Constraint::Length(1),  // Key help
            Constraint::Length(1),  // Version footer
        ])
        .split(area);

    draw_title(frame, chunks[0], session);
    draw_standing(frame, chunks[1], session, curriculum);
    draw_progress_table(frame, chunks[2], curriculum);
    draw_footnotes(frame, chunks[3], ui, last_played);
    draw_help(frame, chunks[4]);
    draw_version(frame, chunks[5]);
}

/// Draws the placeholder shown before the first boot finishes.
pub fn draw_loading(frame: &mut Frame, area: Rect) {
    let loading = Paragraph::new("Loading...")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(loading, area);
}

fn draw_title(frame: &mut Frame, area: Rect, session: &GameSession) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "A R I T H M A N C E R",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Multiplication combat for the terminal",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    if session.game_over {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(
                "Game over - won {}, lost {}, run score {}",
                session.rounds_won, session.rounds_lost, session.score
            ),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
    }

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Draws the lifetime score and the group the next run starts on.
fn draw_standing(frame: &mut Frame, area: Rect, session: &GameSession, curriculum: &Curriculum) {
    let difficulty = Difficulty::for_sum(curriculum.group());
    let lines = vec![
        Line::from(vec![
            Span::styled("Total score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", session.total_score),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Training level: sums of ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", curriculum.group()),
                Style::default()
                    .fg(difficulty_color(difficulty))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(
                format!("({})", difficulty.name()),
                Style::default().fg(difficulty_color(difficulty)),
            ),
        ]),
    ];

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Draws one bar per digit-sum group, colored by tier, with the current
/// group marked.
fn draw_progress_table(frame: &mut Frame, area: Rect, curriculum: &Curriculum) {
    let block = Block::default().borders(Borders::ALL).title("Progress");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (solved, total) = curriculum.progress_summary();
    let mut lines = vec![
        Line::from(Span::styled(
            format!("{} of {} problems solved", solved, total),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
    ];

    for stats in curriculum.group_stats() {
        let filled = if stats.total == 0 {
            0
        } else {
            (stats.solved * BAR_WIDTH) / stats.total
        };
        let bar = format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled));
        let marker = if stats.sum == curriculum.group() { ">" } else { " " };

        lines.push(Line::from(vec![
            Span::styled(
                format!("{} {:>2} ", marker, stats.sum),
                Style::default().fg(Color::White),
            ),
            Span::styled(bar, Style::default().fg(difficulty_color(stats.difficulty))),
            Span::raw(format!(" {}/{}", stats.solved, stats.total)),
        ]));
    }

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}

/// Draws the last-played date and any lingering message.
fn draw_footnotes(frame: &mut Frame, area: Rect, ui: &UiState, last_played: i64) {
    let played = if last_played > 0 {
        chrono::DateTime::from_timestamp(last_played, 0)
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "unknown".to_string())
    } else {
        "never".to_string()
    };

    let mut lines = vec![Line::from(Span::styled(
        format!("Last played: {}", played),
        Style::default().fg(Color::DarkGray),
    ))];

    if let Some((text, severity)) = &ui.notice {
        lines.push(Line::from(Span::styled(
            text.clone(),
            Style::default().fg(severity_color(*severity)),
        )));
    }

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_help(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new(Line::from(Span::styled(
        "[Enter] play  [R] reset progress  [M] sound  [Q] quit",
        Style::default().fg(Color::DarkGray),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(help, area);
}

fn draw_version(frame: &mut Frame, area: Rect) {
    let version = Paragraph::new(Line::from(Span::styled(
        format!(
            "arithmancer {} ({})",
            build_info::BUILD_DATE,
            build_info::BUILD_COMMIT
        ),
        Style::default().fg(Color::DarkGray),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(version, area);
}
