use crate::tui::state::Notice;
use crate::tui::view::components::centered_fixed;
use crate::tui::view::components::footer::render_url_input_footer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

pub fn render_url_input(f: &mut Frame, input: &str, notice: Option<&Notice>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(2)])
        .split(f.area());

    let area = centered_fixed(70, 8, chunks[0]);

    let mut text = vec![
        Line::from(vec![Span::styled(
            "Page to scan for videos",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Cyan)),
            Span::raw(input.to_string()),
            Span::styled("_", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(""),
    ];

    if let Some(notice) = notice {
        let color = if notice.is_error() { Color::Red } else { Color::Green };
        text.push(Line::from(Span::styled(
            notice.text().to_string(),
            Style::default().fg(color),
        )));
    }

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Left)
        .block(Block::default().title(" vidscout ").borders(Borders::ALL));

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
    render_url_input_footer(f, chunks[1]);
}
