use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget, Wrap};
use rust_i18n::t;

use crate::session::result::SessionSummary;
use crate::ui::theme::Theme;

const POPUP_WIDTH: u16 = 48;

/// End-of-session popup.
pub struct SessionSummaryView<'a> {
    summary: &'a SessionSummary,
    theme: &'a Theme,
}

impl<'a> SessionSummaryView<'a> {
    pub fn new(summary: &'a SessionSummary, theme: &'a Theme) -> Self {
        Self { summary, theme }
    }

    /// Width and height the popup wants, borders included.
    pub fn size(&self) -> (u16, u16) {
        let body = if self.summary.words() == 0 {
            1
        } else {
            let missed = self.summary.missed().count();
            4 + if missed > 0 { 2 + missed } else { 0 }
        };
        let height = u16::try_from(body + 2 + 2).unwrap_or(u16::MAX);
        (POPUP_WIDTH, height)
    }
}

impl Widget for SessionSummaryView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let summary = self.summary;
        let plain = Style::default().fg(colors.fg());

        let mut lines: Vec<Line> = Vec::new();
        if summary.words() == 0 {
            lines.push(Line::styled(t!("summary.empty").into_owned(), plain));
        } else {
            lines.push(Line::styled(
                t!("summary.words", count = summary.words()).into_owned(),
                plain,
            ));
            lines.push(Line::styled(
                t!("summary.correct", count = summary.correct()).into_owned(),
                Style::default().fg(colors.success()),
            ));
            lines.push(Line::styled(
                t!("summary.accuracy", percent = summary.accuracy()).into_owned(),
                Style::default().fg(colors.accent()),
            ));
            lines.push(Line::styled(
                t!("summary.time", seconds = format!("{:.0}", summary.elapsed_secs()))
                    .into_owned(),
                plain,
            ));

            let missed: Vec<&str> = summary.missed().collect();
            if !missed.is_empty() {
                lines.push(Line::from(""));
                lines.push(Line::styled(
                    t!("summary.review").into_owned(),
                    Style::default().fg(colors.warning()),
                ));
                for id in missed {
                    // Ids look like `de:noun:Haus`; show the lemma.
                    let lemma = id.rsplit(':').next().unwrap_or(id);
                    lines.push(Line::from(Span::styled(
                        format!("  {lemma}"),
                        Style::default().fg(colors.text_incorrect()),
                    )));
                }
            }
        }
        lines.push(Line::from(""));
        lines.push(Line::styled(
            t!("summary.hint").into_owned(),
            Style::default().fg(colors.text_pending()),
        ));

        let block = Block::bordered()
            .title(format!(" {} ", t!("summary.title")))
            .title_style(Style::default().add_modifier(Modifier::BOLD))
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));

        Clear.render(area, buf);
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
