use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use rust_i18n::t;

use crate::session::result::SessionSummary;
use crate::store::schema::ProgressStats;
use crate::ui::theme::{Theme, ThemeColors};

pub struct StatsSidebar<'a> {
    summary: &'a SessionSummary,
    stats: &'a ProgressStats,
    theme: &'a Theme,
}

impl<'a> StatsSidebar<'a> {
    pub fn new(summary: &'a SessionSummary, stats: &'a ProgressStats, theme: &'a Theme) -> Self {
        Self {
            summary,
            stats,
            theme,
        }
    }
}

fn accuracy_color(colors: &ThemeColors, percent: u32) -> Color {
    if percent >= 90 {
        colors.success()
    } else if percent >= 70 {
        colors.warning()
    } else {
        colors.error()
    }
}

fn stat_line(label: String, value: String, value_color: Color, colors: &ThemeColors) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(colors.fg())),
        Span::styled(value, Style::default().fg(value_color)),
    ])
}

impl Widget for StatsSidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(7), Constraint::Min(8)])
            .split(area);

        // Current session
        {
            let accuracy = self.summary.accuracy();
            let lines = vec![
                stat_line(
                    t!("sidebar.words").into_owned(),
                    self.summary.words().to_string(),
                    colors.accent(),
                    colors,
                ),
                stat_line(
                    t!("sidebar.correct").into_owned(),
                    self.summary.correct().to_string(),
                    colors.success(),
                    colors,
                ),
                stat_line(
                    t!("sidebar.mistakes").into_owned(),
                    self.summary.mistakes().to_string(),
                    colors.error(),
                    colors,
                ),
                stat_line(
                    t!("sidebar.accuracy").into_owned(),
                    format!("{accuracy}%"),
                    accuracy_color(colors, accuracy),
                    colors,
                ),
            ];

            let block = Block::bordered()
                .title(format!(" {} ", t!("sidebar.session")))
                .border_style(Style::default().fg(colors.border()))
                .style(Style::default().bg(colors.bg()));
            Paragraph::new(lines).block(block).render(sections[0], buf);
        }

        // Whole vocabulary
        {
            let stats = self.stats;
            let lines = vec![
                stat_line(
                    t!("sidebar.vocabulary").into_owned(),
                    stats.total.to_string(),
                    colors.fg(),
                    colors,
                ),
                stat_line(
                    t!("sidebar.learned").into_owned(),
                    stats.learned.to_string(),
                    colors.accent(),
                    colors,
                ),
                stat_line(
                    t!("sidebar.mastered").into_owned(),
                    stats.mastered.to_string(),
                    colors.success(),
                    colors,
                ),
                stat_line(
                    t!("sidebar.due").into_owned(),
                    stats.due.to_string(),
                    colors.warning(),
                    colors,
                ),
                stat_line(
                    t!("sidebar.accuracy").into_owned(),
                    format!("{}%", stats.accuracy),
                    accuracy_color(colors, stats.accuracy),
                    colors,
                ),
            ];

            let block = Block::bordered()
                .title(format!(" {} ", t!("sidebar.title")))
                .border_style(Style::default().fg(colors.border()))
                .style(Style::default().bg(colors.bg()));
            Paragraph::new(lines).block(block).render(sections[1], buf);
        }
    }
}
