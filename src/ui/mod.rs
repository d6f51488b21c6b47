pub mod components;
pub mod layout;
pub mod theme;

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use rust_i18n::t;

use crate::app::{App, AppScreen};
use crate::ui::components::drill_area::DrillArea;
use crate::ui::components::progress_bar::ProgressBar;
use crate::ui::components::session_summary::SessionSummaryView;
use crate::ui::components::stats_sidebar::StatsSidebar;
use crate::ui::layout::{DrillLayout, pack_hint_lines, popup_rect};

pub fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    render_drill(frame, app);
    if app.screen == AppScreen::Summary {
        let view = SessionSummaryView::new(&app.summary, &app.theme);
        let (width, height) = view.size();
        frame.render_widget(view, popup_rect(width, height, area));
    }
}

fn render_drill(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;
    let hints = drill_hints(app);
    let hint_refs: Vec<&str> = hints.iter().map(String::as_str).collect();
    let hint_lines: Vec<Line> = pack_hint_lines(&hint_refs, area.width as usize)
        .into_iter()
        .map(|l| Line::from(Span::styled(l, Style::default().fg(colors.text_pending()))))
        .collect();
    let app_layout = DrillLayout::new(area, hint_lines.len() as u16);

    let total = app.queue.len();
    let current = (app.queue_index + 1).min(total);
    let header_text = format!(
        " {} · {} → {} | {}",
        t!("app.title"),
        app.vocab.language.native_name(),
        app.config.base_language.native_name(),
        t!("drill.word_of", current = current, total = total),
    );
    let header = Paragraph::new(Line::from(Span::styled(
        header_text,
        Style::default()
            .fg(colors.header_fg())
            .bg(colors.header_bg())
            .add_modifier(Modifier::BOLD),
    )))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, app_layout.header);

    if let Some(active) = app.active.as_ref() {
        let drill = DrillArea::new(
            &active.card,
            &active.engine,
            app.config.base_language,
            &app.theme,
        )
        .composing(app.input.pending_dead_key())
        .error_flash(app.error_flash);
        frame.render_widget(drill, app_layout.drill);
    }

    if let Some(progress_area) = app_layout.progress {
        let progress = ProgressBar::new(
            &t!("progress.session"),
            app.summary.words(),
            total,
            &app.theme,
        );
        frame.render_widget(progress, progress_area);
    }

    if let Some(sidebar_area) = app_layout.sidebar {
        let sidebar = StatsSidebar::new(&app.summary, &app.stats, &app.theme);
        frame.render_widget(sidebar, sidebar_area);
    }

    frame.render_widget(Paragraph::new(hint_lines), app_layout.footer);
}

fn drill_hints(app: &App) -> Vec<String> {
    let mut hints: Vec<String> = Vec::new();
    match app.phase() {
        Some(p) if p.is_reveal() => hints.push(t!("drill.reveal_hint").into_owned()),
        Some(p) if p.is_data_entry() => {
            hints.push(t!("drill.type_hint").into_owned());
            if app.error_flash {
                hints.push(t!("hints.backspace").into_owned());
            }
        }
        Some(_) => hints.push(t!("drill.next_hint").into_owned()),
        None => {}
    }
    hints.push(t!("hints.finish").into_owned());
    hints.push(t!("hints.quit").into_owned());
    hints
}
