use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use throbber_widgets_tui::WhichUse::Spin;
use throbber_widgets_tui::{BRAILLE_SIX, Throbber, ThrobberState};

use crate::Theme;
use crate::ui::Component;

/// Braille spinner with an optional label, advanced on every tick.
#[derive(Default)]
pub struct Spinner {
    state: ThrobberState,
    label: Option<&'static str>,
}

impl Spinner {
    pub fn with_label(label: &'static str) -> Self {
        Self {
            state: ThrobberState::default(),
            label: Some(label),
        }
    }
}

impl Component for Spinner {
    type Output = ();

    fn handle_tick(&mut self) {
        self.state.calc_next();
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let mut throbber = Throbber::default()
            .throbber_set(BRAILLE_SIX)
            .use_type(Spin)
            .throbber_style(Style::default().fg(theme.lavender()))
            .style(Style::default().fg(theme.subtext1()));

        if let Some(label) = self.label {
            throbber = throbber.label(label);
        }

        frame.render_stateful_widget(throbber, area, &mut self.state);
    }
}
