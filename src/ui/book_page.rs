//! Book page: details, description, author and the similar-books rail

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::state::AppState;
use crate::book::Book;
use crate::page::{PageView, TextWindow, ToggleControl};
use crate::theme::Theme;

/// Rows in the similar-books rail, borders and pager line included
const SIMILAR_HEIGHT: u16 = 8;

/// Draw the book page
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState, view: &PageView<'_>, theme: &Theme) {
    frame.render_widget(Block::default().style(Style::default().bg(theme.bg_primary)), area);

    let Some(book) = view.subject.filter(|_| !view.not_found) else {
        draw_not_found(frame, area, theme);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(6), Constraint::Length(SIMILAR_HEIGHT)])
        .split(area);

    draw_header(frame, chunks[0], book, theme);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    draw_about_book(frame, body[0], book, view.description, theme);
    draw_about_author(frame, body[1], book, view, theme);
    draw_similar(frame, chunks[2], state, book, view, theme);
}

fn draw_not_found(frame: &mut Frame, area: Rect, theme: &Theme) {
    let y = area.y + area.height / 2;
    let message = Paragraph::new("Book not found")
        .style(Style::default().fg(theme.error))
        .alignment(Alignment::Center);
    frame.render_widget(message, Rect::new(area.x, y, area.width, 1));
}

fn draw_header(frame: &mut Frame, area: Rect, book: &Book, theme: &Theme) {
    let mut lines = vec![Line::from(Span::styled(
        book.title.clone(),
        Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD),
    ))];

    if !book.authors.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("by ", Style::default().fg(theme.fg_muted)),
            Span::styled(book.authors.join(", "), Style::default().fg(theme.accent)),
        ]));
    }

    if !book.categories.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Genres: ", Style::default().fg(theme.fg_muted)),
            Span::styled(book.categories.join(", "), Style::default().fg(theme.fg_secondary)),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), inset(area));
}

fn draw_about_book(frame: &mut Frame, area: Rect, book: &Book, description: &TextWindow, theme: &Theme) {
    let mut lines = Vec::new();

    if description.is_empty() {
        lines.push(muted("No description available", theme));
    } else {
        lines.push(Line::from(Span::styled(
            description.shown().to_string(),
            Style::default().fg(theme.fg_primary),
        )));
    }
    if let Some(hint) = toggle_hint(description.control(), 'd', theme) {
        lines.push(hint);
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Edition details",
        Style::default().fg(theme.fg_secondary).add_modifier(Modifier::BOLD),
    )));
    lines.extend(edition_details(book).into_iter().map(|(label, value)| {
        Line::from(vec![
            Span::styled(format!("{label}: "), Style::default().fg(theme.fg_muted)),
            Span::styled(value, Style::default().fg(theme.fg_secondary)),
        ])
    }));

    let block = titled_block("About this book", theme);
    frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), area);
}

fn draw_about_author(frame: &mut Frame, area: Rect, book: &Book, view: &PageView<'_>, theme: &Theme) {
    let mut lines = Vec::new();

    if let Some(author) = book.primary_author() {
        lines.push(Line::from(Span::styled(
            author.to_string(),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )));
    }

    if view.loading_author() {
        lines.push(muted("Loading author details...", theme));
    } else if let Some(err) = view.author_error() {
        lines.push(error_line(&err.to_string(), theme));
    } else if view.author_bio.is_empty() && view.author_image.is_none() {
        lines.push(muted("No author details found", theme));
    } else {
        if !view.author_bio.is_empty() {
            lines.push(Line::from(Span::styled(
                view.author_bio.shown().to_string(),
                Style::default().fg(theme.fg_primary),
            )));
        }
        if let Some(hint) = toggle_hint(view.author_bio.control(), 'a', theme) {
            lines.push(hint);
        }
        if let Some(url) = view.author_image {
            lines.push(Line::from(vec![
                Span::styled("Photo: ", Style::default().fg(theme.fg_muted)),
                Span::styled(url.to_string(), Style::default().fg(theme.link)),
            ]));
        }
    }

    let block = titled_block("About the author", theme);
    frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), area);
}

fn draw_similar(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    book: &Book,
    view: &PageView<'_>,
    theme: &Theme,
) {
    let mut lines = Vec::new();

    if view.loading_similar() {
        lines.push(muted("Loading similar books...", theme));
    } else if let Some(err) = view.similar_error() {
        lines.push(error_line(&err.to_string(), theme));
    } else if view.similar_books_empty() {
        lines.push(muted(&format!("No similar books could be found for {}", book.title), theme));
    } else {
        for (i, similar) in view.window.iter().enumerate() {
            lines.push(similar_row(similar, i == state.selected, theme));
        }
    }

    let block = titled_block("Readers also enjoyed", theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 {
        return;
    }
    let list_area = Rect::new(inner.x, inner.y, inner.width, inner.height.saturating_sub(1));
    let pager_area = Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1);

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), list_area);
    frame.render_widget(Paragraph::new(pager_line(view, theme)).alignment(Alignment::Center), pager_area);
}

fn similar_row(book: &Book, selected: bool, theme: &Theme) -> Line<'static> {
    let (marker, style) = if selected {
        ("\u{25b8} ", Style::default().fg(theme.fg_primary).bg(theme.bg_highlight)) // ▸
    } else {
        ("  ", Style::default().fg(theme.fg_secondary))
    };

    let mut spans = vec![Span::styled(marker, style), Span::styled(book.title.clone(), style)];
    if let Some(author) = book.primary_author() {
        spans.push(Span::styled(format!(" by {author}"), Style::default().fg(theme.fg_muted)));
    }
    Line::from(spans)
}

/// "‹ prev  page x/y  next ›" with disabled ends dimmed
fn pager_line(view: &PageView<'_>, theme: &Theme) -> Line<'static> {
    let enabled = |on: bool| {
        if on { Style::default().fg(theme.accent) } else { Style::default().fg(theme.border) }
    };

    let position = if view.page_count > 0 {
        format!("  page {}/{}  ", view.page_number, view.page_count)
    } else {
        "    ".to_string()
    };

    Line::from(vec![
        Span::styled("\u{2039} prev", enabled(view.can_go_previous)),
        Span::styled(position, Style::default().fg(theme.fg_muted)),
        Span::styled("next \u{203a}", enabled(view.can_go_next)),
    ])
}

/// Label/value pairs for the edition details section
pub fn edition_details(book: &Book) -> Vec<(&'static str, String)> {
    let mut details = Vec::new();
    if book.page_count > 0 {
        details.push(("Pages", book.page_count.to_string()));
    }
    if let Some(date) = book.published_date.as_deref().filter(|d| !d.is_empty()) {
        details.push(("Published", date.to_string()));
    }
    if !book.publisher.is_empty() {
        details.push(("Publisher", book.publisher.clone()));
    }
    if !book.language.is_empty() {
        details.push(("Language", book.language_name().to_string()));
    }
    details
}

fn toggle_hint(control: ToggleControl, key: char, theme: &Theme) -> Option<Line<'static>> {
    let label = match control {
        ToggleControl::ShowMore => "Show more",
        ToggleControl::ShowLess => "Show less",
        ToggleControl::None => return None,
    };
    Some(Line::from(vec![
        Span::styled(format!("[{key}] "), Style::default().fg(theme.fg_muted)),
        Span::styled(label, Style::default().fg(theme.link)),
    ]))
}

fn titled_block<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title_style(Style::default().fg(theme.fg_secondary))
}

fn muted(text: &str, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(text.to_string(), Style::default().fg(theme.fg_muted)))
}

fn error_line(text: &str, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(text.to_string(), Style::default().fg(theme.error)))
}

fn inset(area: Rect) -> Rect {
    Rect::new(area.x + 1, area.y, area.width.saturating_sub(2), area.height)
}
