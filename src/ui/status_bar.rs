use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::Theme;

/// A key hint shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybinding {
    pub key: String,
    pub description: String,
}

impl Keybinding {
    pub fn new(key: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
        }
    }
}

/// What the left half of the status bar reports.
#[derive(Debug, Clone, Default)]
pub struct StatusInfo {
    pub base_url: String,
    pub product_count: usize,
    pub running: Vec<String>,
}

const INFO_WIDTH: u16 = 44;
const LABEL_WIDTH: usize = 9;

#[derive(Default)]
pub struct StatusBar;

impl StatusBar {
    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        theme: &Theme,
        info: &StatusInfo,
        keybindings: &[Keybinding],
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.border()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [left, right] =
            Layout::horizontal([Constraint::Length(INFO_WIDTH), Constraint::Min(20)]).areas(inner);

        Self::render_info(frame, left, theme, info);
        Self::render_keybindings(frame, right, theme, keybindings);
    }

    fn render_info(frame: &mut Frame, area: Rect, theme: &Theme, info: &StatusInfo) {
        let width = area.width as usize;
        let label = Style::default().fg(theme.overlay1());
        let value = Style::default().fg(theme.text());

        let activity = match info.running.as_slice() {
            [] => "idle".to_string(),
            [one] => one.clone(),
            [first, rest @ ..] => format!("{first} (+{})", rest.len()),
        };
        let activity_style = if info.running.is_empty() {
            Style::default().fg(theme.overlay0())
        } else {
            Style::default().fg(theme.yellow())
        };

        let lines = vec![
            status_line("backend", &info.base_url, width, label, value),
            status_line(
                "products",
                &info.product_count.to_string(),
                width,
                label,
                Style::default().fg(theme.green()).add_modifier(Modifier::BOLD),
            ),
            status_line("activity", &activity, width, label, activity_style),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_keybindings(frame: &mut Frame, area: Rect, theme: &Theme, hints: &[Keybinding]) {
        if hints.is_empty() || area.height == 0 {
            return;
        }

        // Size columns from the content so the separators line up.
        let key_w = hints.iter().map(|kb| kb.key.chars().count()).max().unwrap_or(1);
        let desc_w = hints
            .iter()
            .map(|kb| kb.description.chars().count())
            .max()
            .unwrap_or(1);
        let col_width = u16::try_from(key_w + 3 + desc_w + 2).unwrap_or(u16::MAX);
        let num_cols = (area.width / col_width).max(1) as usize;
        let num_rows = area.height as usize;

        let mut columns: Vec<Vec<Line>> = vec![Vec::new(); num_cols];
        for (i, kb) in hints.iter().enumerate() {
            let Some(column) = columns.get_mut(i / num_rows) else {
                break;
            };
            column.push(Line::from(vec![
                Span::styled(format!("{:>key_w$}", kb.key), Style::default().fg(theme.peach())),
                Span::styled(" │ ", Style::default().fg(theme.surface2())),
                Span::styled(kb.description.clone(), Style::default().fg(theme.subtext0())),
            ]));
        }

        let areas = Layout::horizontal(vec![Constraint::Length(col_width); num_cols]).split(area);
        for (lines, col_area) in columns.into_iter().zip(areas.iter()) {
            frame.render_widget(Paragraph::new(lines), *col_area);
        }
    }
}

fn status_line<'a>(
    label: &'a str,
    value: &str,
    max_width: usize,
    label_style: Style,
    value_style: Style,
) -> Line<'a> {
    let available = max_width.saturating_sub(LABEL_WIDTH + 1);
    Line::from(vec![
        Span::styled(format!("{label:>LABEL_WIDTH$}"), label_style),
        Span::raw(" "),
        Span::styled(truncate(value, available), value_style),
    ])
}

/// Truncate to `max_width` characters, ending in "..." when cut.
fn truncate(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width > 3 {
        let kept: String = s.chars().take(max_width - 3).collect();
        format!("{kept}...")
    } else {
        s.chars().take(max_width).collect()
    }
}
