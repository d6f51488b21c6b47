use ratatui::layout::{Constraint, Layout, Rect};

/// Rows the drill card needs: borders, answer line, three reveal lines, status.
pub const DRILL_HEIGHT: u16 = 9;
/// Narrowest drill card that still fits a long German plural with its article.
pub const DRILL_MIN_WIDTH: u16 = 56;
/// Fits "Vocabulary: 9999" inside a bordered block.
pub const SIDEBAR_WIDTH: u16 = 26;
/// Both sidebar blocks stacked.
pub const SIDEBAR_HEIGHT: u16 = 15;
const PROGRESS_HEIGHT: u16 = 3;

/// Screen regions of the drill view. The sidebar and the progress bar are
/// dropped, in that order, when the terminal is too small for them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrillLayout {
    pub header: Rect,
    pub drill: Rect,
    pub sidebar: Option<Rect>,
    pub progress: Option<Rect>,
    pub footer: Rect,
}

impl DrillLayout {
    /// `footer_lines` is the number of packed hint lines to reserve.
    pub fn new(area: Rect, footer_lines: u16) -> Self {
        let footer_height = footer_lines.max(1);
        let chrome = 1 + footer_height;
        let body_height = area.height.saturating_sub(chrome);

        let progress_height = if body_height >= DRILL_HEIGHT + PROGRESS_HEIGHT {
            PROGRESS_HEIGHT
        } else {
            0
        };

        let [header, body, progress, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(progress_height),
            Constraint::Length(footer_height),
        ])
        .areas(area);

        let wants_sidebar =
            body.width >= DRILL_MIN_WIDTH + SIDEBAR_WIDTH && body.height >= SIDEBAR_HEIGHT;
        let (drill, sidebar) = if wants_sidebar {
            let [drill, sidebar] =
                Layout::horizontal([Constraint::Min(DRILL_MIN_WIDTH), Constraint::Length(SIDEBAR_WIDTH)])
                    .areas(body);
            (drill, Some(sidebar))
        } else {
            (body, None)
        };

        Self {
            header,
            drill,
            sidebar,
            progress: (progress_height > 0).then_some(progress),
            footer,
        }
    }
}

/// Join key hints into as few lines as fit `width`, two spaces apart.
pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    const GAP: &str = "  ";
    if width == 0 {
        return Vec::new();
    }

    let mut lines: Vec<String> = Vec::new();
    for hint in hints.iter().filter(|h| !h.is_empty()) {
        match lines.last_mut() {
            Some(line) if line.chars().count() + GAP.len() + hint.chars().count() <= width => {
                line.push_str(GAP);
                line.push_str(hint);
            }
            _ => lines.push(format!("{GAP}{hint}")),
        }
    }
    lines
}

/// Rect of `width` x `height` centred in `area`, shrunk to fit.
pub fn popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
