use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

fn key_hints(pairs: &[(&'static str, &'static str)]) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(pairs.len() * 2);
    for (i, (key, label)) in pairs.iter().enumerate() {
        spans.push(Span::styled(*key, Style::default().fg(Color::Cyan)));
        if i + 1 < pairs.len() {
            spans.push(Span::raw(format!(" {}  ", label)));
        } else {
            spans.push(Span::raw(format!(" {}", label)));
        }
    }
    spans
}

pub fn render_video_list_footer(f: &mut Frame, area: Rect, extension_filter: bool, can_download: bool) {
    let mut pairs = vec![
        ("↑↓", "Nav"),
        ("Space", "Toggle"),
        ("a", "All"),
        ("/", "Name"),
    ];
    if extension_filter {
        pairs.push(("e", "Type"));
    }
    pairs.push(("c", "Clear"));
    pairs.push(("x", "Reset"));
    pairs.push(("r", "Rescan"));
    pairs.push(("u", "URL"));
    pairs.push(("o", "Settings"));
    pairs.push(("?", "Help"));
    pairs.push(("q", "Quit"));

    let mut spans = Vec::new();
    if can_download {
        spans.push(Span::styled("Enter", Style::default().fg(Color::Green)));
        spans.push(Span::raw(" Download  "));
    } else {
        spans.push(Span::styled("Enter", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(" Download  ", Style::default().fg(Color::DarkGray)));
    }
    spans.extend(key_hints(&pairs));

    let footer = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::TOP));
    f.render_widget(footer, area);
}

pub fn render_url_input_footer(f: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(key_hints(&[
        ("Enter", "Scan"),
        ("Esc", "Back/Quit"),
    ])))
    .block(Block::default().borders(Borders::TOP));
    f.render_widget(footer, area);
}

pub fn render_filter_footer(f: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(key_hints(&[
        ("Enter", "Keep filter"),
        ("Esc", "Clear filter"),
    ])))
    .block(Block::default().borders(Borders::TOP));
    f.render_widget(footer, area);
}
