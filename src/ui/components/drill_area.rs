use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};
use rust_i18n::t;

use crate::engine::{DrillEngine, DrillPhase};
use crate::ui::theme::Theme;
use crate::vocab::Language;
use crate::vocab::source::WordCard;

pub fn phase_label(phase: DrillPhase) -> String {
    let label = match phase {
        DrillPhase::Article => t!("phase.article"),
        DrillPhase::Singular => t!("phase.singular"),
        DrillPhase::Plural => t!("phase.plural"),
        DrillPhase::Definite => t!("phase.definite"),
        DrillPhase::Infinitive => t!("phase.infinitive"),
        DrillPhase::Conjugation | DrillPhase::Conjugation2 | DrillPhase::Conjugation3 => {
            t!("phase.conjugation")
        }
        DrillPhase::Translation => t!("phase.translation"),
        DrillPhase::ExampleTarget => t!("phase.example_target"),
        DrillPhase::ExampleBase => t!("phase.example_base"),
        DrillPhase::Complete => t!("phase.complete"),
    };
    label.into_owned()
}

/// Reveal-phase content already uncovered, in phase order.
pub fn revealed_lines(
    card: &WordCard,
    base: Language,
    order: &[DrillPhase],
    current: DrillPhase,
) -> Vec<(DrillPhase, String)> {
    let Some(current_pos) = order.iter().position(|p| *p == current) else {
        return Vec::new();
    };
    order[..=current_pos]
        .iter()
        .filter(|p| p.is_reveal())
        .filter_map(|&phase| {
            let text = match phase {
                DrillPhase::Translation => card.word.translation(base).map(str::to_string),
                DrillPhase::ExampleTarget => card.word.example().map(|e| e.text.clone()),
                DrillPhase::ExampleBase => card
                    .word
                    .example()
                    .and_then(|e| e.translation(base))
                    .map(str::to_string),
                _ => None,
            }?;
            Some((phase, text))
        })
        .collect()
}

pub struct DrillArea<'a> {
    card: &'a WordCard,
    engine: &'a DrillEngine,
    base: Language,
    composing: Option<char>,
    error_flash: bool,
    theme: &'a Theme,
}

impl<'a> DrillArea<'a> {
    pub fn new(
        card: &'a WordCard,
        engine: &'a DrillEngine,
        base: Language,
        theme: &'a Theme,
    ) -> Self {
        Self {
            card,
            engine,
            base,
            composing: None,
            error_flash: false,
            theme,
        }
    }

    pub fn composing(mut self, pending: Option<char>) -> Self {
        self.composing = pending;
        self
    }

    pub fn error_flash(mut self, flash: bool) -> Self {
        self.error_flash = flash;
        self
    }

    /// Completed segments followed by the live input of the current phase.
    fn answer_line(&self) -> Line<'a> {
        let colors = &self.theme.colors;
        let mut spans: Vec<Span> = Vec::new();

        for segment in self.engine.completed_segments() {
            let style = match segment.color {
                Some(tag) => Style::default()
                    .fg(colors.gender(tag))
                    .add_modifier(Modifier::BOLD),
                None => Style::default().fg(colors.text_correct()),
            };
            spans.push(Span::styled(segment.text.clone(), style));
        }

        if !self.engine.phase().is_data_entry() {
            return Line::from(spans);
        }

        let expected = self.engine.expected_input();
        let typed = self.engine.user_input();
        spans.push(Span::styled(
            typed.to_string(),
            Style::default().fg(colors.text_correct()),
        ));

        if self.engine.is_composing() {
            let buffer = self.engine.display_input();
            let provisional = buffer.strip_prefix(typed).unwrap_or(buffer);
            spans.push(Span::styled(
                provisional.to_string(),
                Style::default()
                    .fg(colors.warning())
                    .add_modifier(Modifier::UNDERLINED),
            ));
        }

        if let Some(found) = self.engine.error_char() {
            spans.push(Span::styled(
                found.to_string(),
                Style::default()
                    .fg(colors.text_incorrect())
                    .bg(colors.text_incorrect_bg())
                    .add_modifier(Modifier::CROSSED_OUT),
            ));
        }

        let mut rest = expected
            .strip_prefix(typed)
            .unwrap_or_default()
            .chars();
        if let Some(next) = rest.next() {
            spans.push(Span::styled(
                next.to_string(),
                Style::default()
                    .fg(colors.text_cursor_fg())
                    .bg(colors.text_cursor_bg()),
            ));
        }
        spans.push(Span::styled(
            rest.as_str().to_string(),
            Style::default().fg(colors.text_pending()),
        ));

        Line::from(spans)
    }
}

impl Widget for DrillArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let phase = self.engine.phase();

        let mut lines: Vec<Line> = vec![self.answer_line()];
        lines.push(Line::from(""));

        for (reveal, text) in
            revealed_lines(self.card, self.base, self.engine.phase_order(), phase)
        {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{}: ", phase_label(reveal)),
                    Style::default().fg(colors.accent_dim()),
                ),
                Span::styled(text, Style::default().fg(colors.fg())),
            ]));
        }

        let status = if phase == DrillPhase::Complete {
            if self.engine.mistakes() == 0 {
                Span::styled(t!("drill.perfect").into_owned(), Style::default().fg(colors.success()))
            } else {
                Span::styled(
                    format!(
                        "{} ({})",
                        t!("drill.missed"),
                        t!("drill.mistakes", count = self.engine.mistakes())
                    ),
                    Style::default().fg(colors.warning()),
                )
            }
        } else if let Some(key) = self.composing {
            Span::styled(
                t!("drill.composing", key = key).into_owned(),
                Style::default().fg(colors.warning()),
            )
        } else {
            Span::raw("")
        };
        lines.push(Line::from(""));
        lines.push(Line::from(status));

        let border = if self.error_flash {
            colors.error()
        } else {
            colors.border_focused()
        };
        let block = Block::bordered()
            .title(format!(
                " {} · {} ",
                self.card.word.word_type().as_str(),
                phase_label(phase)
            ))
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(colors.bg()));

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
