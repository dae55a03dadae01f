//! Every similar book for the current subject, one per row

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::state::AppState;
use crate::page::PageView;
use crate::theme::Theme;

/// Draw the all-similar list
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState, view: &PageView<'_>, theme: &Theme) {
    let title = match view.subject {
        Some(book) => format!(" All books similar to {} ({}) ", book.title, view.all_similar.len()),
        None => " All similar books ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.bg_primary));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = inner.height as usize;
    let offset = visible_offset(state.all_scroll, rows);

    let lines: Vec<Line> = view
        .all_similar
        .iter()
        .enumerate()
        .skip(offset)
        .take(rows)
        .map(|(i, book)| {
            let selected = i == state.all_scroll;
            let style = if selected {
                Style::default().fg(theme.fg_primary).bg(theme.bg_highlight).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.fg_secondary)
            };
            let mut spans = vec![
                Span::styled(format!("{:>3}. ", i + 1), Style::default().fg(theme.fg_muted)),
                Span::styled(book.title.clone(), style),
            ];
            if let Some(author) = book.primary_author() {
                spans.push(Span::styled(format!(" by {author}"), Style::default().fg(theme.fg_muted)));
            }
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// First row to show so the cursor stays visible
fn visible_offset(cursor: usize, rows: usize) -> usize {
    if rows == 0 { 0 } else { cursor.saturating_sub(rows - 1) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::Screen;
    use crate::book::Book;
    use crate::page::{FetchCompletion, FetchOutcome, PageController, PageSettings};
    use crate::session::SessionCacheStore;
    use crate::ui::test_support::render;

    #[test]
    fn offset_follows_cursor() {
        assert_eq!(visible_offset(0, 5), 0);
        assert_eq!(visible_offset(4, 5), 0);
        assert_eq!(visible_offset(7, 5), 3);
        assert_eq!(visible_offset(3, 0), 0);
    }

    #[test]
    fn lists_every_similar_book() {
        let mut controller = PageController::new(SessionCacheStore::default(), PageSettings::default());
        let requests = controller.select_subject(Some(Book::new("dune", "Dune")));
        let books: Vec<Book> = (1..=12).map(|i| Book::new(format!("s{i}"), format!("Similar {i}"))).collect();
        for request in requests {
            let ticket = request.ticket().clone();
            let outcome = FetchOutcome::SimilarBooks(Ok(books.clone()));
            controller.complete(FetchCompletion { ticket, outcome });
        }

        let state = AppState { screen: Screen::AllSimilar, ..Default::default() };
        let text = render(&state, &controller.view(), 80, 20);
        assert!(text.contains("All books similar to Dune (12)"));
        assert!(text.contains("Similar 1"));
        assert!(text.contains("Similar 12"));
    }
}
