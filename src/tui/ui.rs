use crate::tui::app::App;
use crate::tui::colors;
use crate::tui::table::SortColumn;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use unicode_width::UnicodeWidthStr;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title strip
            Constraint::Length(3), // Search bar
            Constraint::Length(1), // Error line
            Constraint::Min(5),    // Story table / loading
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_title_strip(frame, chunks[0]);
    draw_search_bar(frame, app, chunks[1]);
    draw_error_line(frame, app, chunks[2]);
    draw_stories(frame, app, chunks[3]);
    draw_status_bar(frame, app, chunks[4]);

    // Show cursor in the search bar while it is focused
    if app.search.focused {
        // Border (1) + " \u{1F50D} " prefix (4 display cols)
        let cursor_x = chunks[1].x + 1 + 4 + app.search.cursor_col();
        let cursor_y = chunks[1].y + 1;
        frame.set_cursor_position(Position::new(cursor_x, cursor_y));
    }
}

fn draw_title_strip(frame: &mut Frame, area: Rect) {
    let title = format!(" Hacker Stories v{} ", crate::VERSION);
    let strip = Paragraph::new(title).style(
        Style::default()
            .fg(colors::ACCENT_FG)
            .bg(colors::ACCENT_BG)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(strip, area);
}

fn draw_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let border_style = if app.search.focused {
        Style::default().fg(colors::ACCENT_BG)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Search ");

    let text = format!(" \u{1F50D} {}", app.search.term);
    let paragraph = Paragraph::new(text)
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, area);
}

fn draw_error_line(frame: &mut Frame, app: &App, area: Rect) {
    if !app.stories.is_error {
        return;
    }
    let line = Paragraph::new(" \u{26A0} Something went wrong ...").style(
        Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(line, area);
}

fn draw_stories(frame: &mut Frame, app: &mut App, area: Rect) {
    if app.stories.is_loading {
        let loading = Paragraph::new("Loading...")
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            );
        frame.render_widget(loading, area);
        return;
    }

    if app.view.is_empty() {
        let empty = Paragraph::new("No stories. Press / and type to search.")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    }

    // Visible rows: area height minus header
    let table_inner_height = area.height.saturating_sub(1) as usize;
    app.table.visible_rows = table_inner_height;

    let header_columns: [(&str, SortColumn); 5] = [
        ("Title", SortColumn::Title),
        ("Author", SortColumn::Author),
        ("Comments", SortColumn::Comments),
        ("Points", SortColumn::Points),
        ("Age", SortColumn::Relevance),
    ];

    let header = Row::new(header_columns.iter().map(|(name, col)| {
        let text = if app.table.sort_column == *col && *col != SortColumn::Relevance {
            format!("{}{}", name, app.table.sort_order.indicator())
        } else {
            name.to_string()
        };
        Cell::from(text).style(
            Style::default()
                .fg(colors::ACCENT_FG)
                .bg(colors::ACCENT_BG)
                .add_modifier(Modifier::BOLD),
        )
    }))
    .height(1);

    let start = app.table.scroll_offset;
    let end = (start + table_inner_height).min(app.view.len());

    let rows: Vec<Row> = (start..end)
        .enumerate()
        .map(|(visual_idx, logical_idx)| {
            let story = &app.stories.data[app.view[logical_idx]];
            let is_selected = app.table.selected == Some(logical_idx);

            let bg = if is_selected {
                colors::SELECTED_BG
            } else if visual_idx % 2 == 1 {
                colors::ROW_ALT_BG
            } else {
                Color::Reset
            };
            let fg_modifier = if is_selected {
                Modifier::BOLD
            } else {
                Modifier::empty()
            };

            let mut title_spans = vec![Span::styled(
                story.title.clone(),
                Style::default().fg(Color::White).add_modifier(fg_modifier),
            )];
            if let Some(domain) = colors::domain_label(&story.url) {
                title_spans.push(Span::styled(
                    format!(" ({domain})"),
                    Style::default().fg(Color::DarkGray),
                ));
            }

            let title_cell = Cell::from(Line::from(title_spans)).style(Style::default().bg(bg));
            let author_cell = Cell::from(story.author.clone())
                .style(Style::default().fg(Color::Gray).bg(bg));
            let comments_cell = Cell::from(crate::format_count(story.num_comments))
                .style(Style::default().fg(Color::Blue).bg(bg));
            let points_cell = Cell::from(story.points.to_string())
                .style(Style::default().fg(colors::points_color(story.points)).bg(bg));
            let age_cell = Cell::from(crate::format_age(story.created_at))
                .style(Style::default().fg(Color::DarkGray).bg(bg));

            Row::new(vec![
                title_cell,
                author_cell,
                comments_cell,
                points_cell,
                age_cell,
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(1),
        Constraint::Length(16),
        Constraint::Length(8),
        Constraint::Length(6),
        Constraint::Length(5),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::NONE));

    frame.render_widget(table, area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let left_text = if app.stories.is_loading {
        format!(" \u{23F3} {}", app.status_message)
    } else {
        format!(" {}", app.status_message)
    };

    let right_text =
        " /:Search  Enter:Open  x:Remove  y:Copy  F1-F5:Sort  r:Refresh  Ctrl+Q:Quit ";

    let available_width = area.width as usize;
    let left_len = left_text.width();
    let right_len = right_text.width();

    let status_str = if left_len + right_len < available_width {
        let padding = available_width - left_len - right_len;
        format!("{}{:padding$}{}", left_text, "", right_text, padding = padding)
    } else {
        format!("{:width$}", left_text, width = available_width)
    };

    let status = Paragraph::new(status_str).style(
        Style::default()
            .fg(colors::ACCENT_FG)
            .bg(colors::ACCENT_BG),
    );

    frame.render_widget(status, area);
}
