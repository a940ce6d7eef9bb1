use crate::model::VideoDescriptor;
use crate::selection::{ScanPhase, SelectAllState, SelectionState};
use crate::tui::state::{DownloadProgress, Notice};
use crate::tui::view::components::footer::{render_filter_footer, render_video_list_footer};
use crate::utils::{format_size_status, truncate_middle};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

pub struct VideoListData<'a> {
    pub list_state: &'a mut ListState,
    pub selection: &'a SelectionState,
    pub url_input: &'a str,
    pub filter_input: &'a str,
    pub filter_editing: bool,
    pub notice: Option<&'a Notice>,
    pub downloads: &'a DownloadProgress,
    pub show_bytes: bool,
}

pub fn render_video_list(f: &mut Frame, data: &mut VideoListData) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(6),
            Constraint::Length(3),
            Constraint::Length(2),
        ])
        .split(f.area());

    let view = data.selection.view();

    render_header(f, chunks[0], data);
    render_filter_bar(f, chunks[1], data, view.extension_filter_available);
    render_main(f, chunks[2], data);
    render_status(f, chunks[3], data);
    if data.filter_editing {
        render_filter_footer(f, chunks[4]);
    } else {
        render_video_list_footer(
            f,
            chunks[4],
            view.extension_filter_available,
            view.download_enabled,
        );
    }
}

fn select_all_span(state: SelectAllState) -> Span<'static> {
    match state {
        SelectAllState::Disabled => Span::styled("[ ]", Style::default().fg(Color::DarkGray)),
        SelectAllState::Unchecked => Span::styled("[ ]", Style::default().fg(Color::White)),
        SelectAllState::Partial => Span::styled("[-]", Style::default().fg(Color::Yellow)),
        SelectAllState::Checked => Span::styled("[x]", Style::default().fg(Color::Green)),
    }
}

fn render_header(f: &mut Frame, area: Rect, data: &VideoListData) {
    let view = data.selection.view();
    let page = data.selection.page_url().unwrap_or(data.url_input);
    let width = area.width.saturating_sub(40).max(20) as usize;

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " vidscout ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(truncate_middle(page, width), Style::default().fg(Color::Gray)),
        Span::raw("   "),
        select_all_span(view.select_all),
        Span::styled(
            format!(
                " {}/{} selected | {} of {} shown",
                view.selected_displayed,
                view.displayed_count,
                view.displayed_count,
                data.selection.all().len()
            ),
            Style::default().fg(Color::Green),
        ),
    ]))
    .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(header, area);
}

fn render_filter_bar(f: &mut Frame, area: Rect, data: &VideoListData, extension_filter: bool) {
    let criteria = data.selection.criteria();
    let name_style = if data.filter_editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };

    let mut spans = vec![
        Span::styled(" Name: ", Style::default().fg(Color::DarkGray)),
        Span::styled(data.filter_input.to_string(), name_style),
    ];
    if data.filter_editing {
        spans.push(Span::styled("_", Style::default().fg(Color::DarkGray)));
    }
    if extension_filter {
        spans.push(Span::styled("   Type: ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(
            criteria.extension.label(),
            Style::default().fg(Color::Magenta),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_main(f: &mut Frame, area: Rect, data: &mut VideoListData) {
    let selection = data.selection;

    let placeholder = match selection.phase() {
        ScanPhase::Idle => Some(("Enter a page URL to scan.".to_string(), Color::DarkGray)),
        ScanPhase::Scanning { .. } => Some((
            format!("Scanning {} ...", data.url_input.trim()),
            Color::Cyan,
        )),
        ScanPhase::Failed(message) => Some((message.clone(), Color::Red)),
        ScanPhase::Ready => selection
            .empty_state()
            .map(|msg| (msg.to_string(), Color::Yellow)),
    };

    if let Some((text, color)) = placeholder {
        let paragraph = Paragraph::new(Line::from(Span::styled(text, Style::default().fg(color))))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::NONE));
        f.render_widget(paragraph, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(area);

    let displayed = selection.displayed();
    let focused = data.list_state.selected();
    let name_width = chunks[0].width.saturating_sub(26).max(12) as usize;

    let items: Vec<ListItem> = displayed
        .iter()
        .enumerate()
        .map(|(idx, video)| {
            let checked = selection.is_selected(video.id);
            let check = if checked { "[x]" } else { "[ ]" };
            let name_style = if focused == Some(idx) {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else if checked {
                Style::default().fg(Color::White)
            } else {
                Style::default()
            };

            ListItem::new(Line::from(vec![
                Span::styled(
                    check,
                    Style::default().fg(if checked { Color::Green } else { Color::Gray }),
                ),
                Span::raw(" "),
                Span::styled(
                    format!(
                        "{:<width$}",
                        truncate_middle(&video.display_name(), name_width),
                        width = name_width
                    ),
                    name_style,
                ),
                Span::styled(
                    format!(" .{:<5}", video.extension),
                    Style::default().fg(Color::Magenta),
                ),
                Span::styled(
                    format!(" {:>10}", format_size_status(video.size, data.show_bytes)),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::RIGHT).title(" Videos "))
        .highlight_symbol("> ");
    f.render_stateful_widget(list, chunks[0], data.list_state);

    let detail = focused
        .and_then(|idx| displayed.get(idx).copied())
        .map(|video| format_video_detail(video, data.show_bytes))
        .unwrap_or_default();
    let detail = Paragraph::new(detail)
        .block(Block::default().borders(Borders::NONE).title(" Details "))
        .wrap(Wrap { trim: true });
    f.render_widget(detail, chunks[1]);
}

fn format_video_detail(video: &VideoDescriptor, show_bytes: bool) -> String {
    format!(
        "Name: {}\n\nType: .{}\nSize: {}\n\nURL:\n{}\n\nId: {}",
        video.display_name(),
        video.extension,
        format_size_status(video.size, show_bytes),
        video.url,
        video.id
    )
}

fn render_status(f: &mut Frame, area: Rect, data: &VideoListData) {
    let mut lines = Vec::new();

    match data.notice {
        Some(notice) => {
            let color = if notice.is_error() { Color::Red } else { Color::Green };
            lines.push(Line::from(Span::styled(
                format!(" {}", notice.text()),
                Style::default().fg(color),
            )));
        }
        None => lines.push(Line::from("")),
    }

    let downloads = data.downloads;
    if downloads.is_active() || downloads.succeeded > 0 || !downloads.failures.is_empty() {
        let mut spans = vec![Span::styled(
            format!(
                " Downloads: {} active, {} done",
                downloads.in_flight, downloads.succeeded
            ),
            Style::default().fg(Color::Gray),
        )];
        if let Some((url, message)) = downloads.failures.last() {
            spans.push(Span::styled(
                format!(
                    ", {} failed (last: {}: {})",
                    downloads.failures.len(),
                    truncate_middle(url, 40),
                    message
                ),
                Style::default().fg(Color::Red),
            ));
        }
        lines.push(Line::from(spans));
    }

    let status = Paragraph::new(lines).block(Block::default().borders(Borders::TOP));
    f.render_widget(status, area);
}
