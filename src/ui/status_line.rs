//! Bottom line with status messages and key hints

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::state::{AppState, Screen};
use crate::theme::Theme;

/// Draw the status line
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let line = match &state.status.message {
        Some(msg) => Line::from(Span::styled(msg.clone(), Style::default().fg(theme.warning))),
        None => hints(state.screen, theme),
    };

    frame.render_widget(Paragraph::new(line).style(Style::default().bg(theme.bg_primary)), area);
}

fn hints(screen: Screen, theme: &Theme) -> Line<'static> {
    let keys: &[(&str, &str)] = match screen {
        Screen::BookPage => &[
            ("[h/l]", " page  "),
            ("[j/k]", " select  "),
            ("[Enter]", " open  "),
            ("[b]", " back  "),
            ("[d/a]", " more/less  "),
            ("[v]", " all  "),
            ("[q]", " quit"),
        ],
        Screen::AllSimilar => &[
            ("[j/k]", " scroll  "),
            ("[Enter]", " open  "),
            ("[v]", " close  "),
            ("[q]", " quit"),
        ],
    };

    let spans = keys
        .iter()
        .flat_map(|(key, label)| {
            [
                Span::styled(*key, Style::default().fg(theme.fg_muted)),
                Span::styled(*label, Style::default().fg(theme.fg_secondary)),
            ]
        })
        .collect::<Vec<_>>();
    Line::from(spans)
}
