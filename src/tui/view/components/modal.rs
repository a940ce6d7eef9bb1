use crate::safety::destination_folder;
use crate::tui::state::{SettingsDraft, SettingsField};
use crate::tui::view::components::{centered_fixed, centered_rect};
use ratatui::layout::Alignment;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

pub struct FolderPromptData<'a> {
    pub input: &'a str,
    pub video_count: usize,
    pub downloads_root: &'a str,
}

pub fn render_folder_prompt(f: &mut Frame, data: &FolderPromptData) {
    let area = centered_fixed(60, 9, f.area());

    let target = match destination_folder(data.input) {
        Some(folder) => format!("{}/{}", data.downloads_root.trim_end_matches('/'), folder),
        None => data.downloads_root.to_string(),
    };

    let text = vec![
        Line::from(vec![
            Span::raw("Save "),
            Span::styled(
                format!("{} video(s)", data.video_count),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" into:"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Cyan)),
            Span::raw(data.input.to_string()),
            Span::styled("_", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(Span::styled(target, Style::default().fg(Color::DarkGray))),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Enter]", Style::default().fg(Color::Green)),
            Span::raw(" Download     "),
            Span::styled("[Esc]", Style::default().fg(Color::Red)),
            Span::raw(" Cancel all"),
        ]),
    ];

    let paragraph = Paragraph::new(text).block(
        Block::default()
            .title(" Destination Folder ")
            .borders(Borders::ALL),
    );

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

pub fn render_settings_modal(f: &mut Frame, draft: &SettingsDraft) {
    let area = centered_fixed(60, 11, f.area());

    let row = |field: SettingsField, value: String| {
        let focused = draft.field == field;
        let marker = if focused { "▶ " } else { "  " };
        let label_style = if focused {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        Line::from(vec![
            Span::styled(marker, Style::default().fg(Color::Cyan)),
            Span::styled(format!("{:<32}", field.label()), label_style),
            Span::raw(value),
        ])
    };
    let checkbox = |on: bool| if on { "[x]".to_string() } else { "[ ]".to_string() };

    let folder = if draft.destination_folder.is_empty() {
        "(downloads root)".to_string()
    } else {
        draft.destination_folder.clone()
    };

    let text = vec![
        Line::from(""),
        row(SettingsField::DestinationFolder, folder),
        row(SettingsField::AskFolder, checkbox(draft.ask_folder_before_download)),
        row(SettingsField::ShowBytes, checkbox(draft.show_sizes_in_bytes)),
        Line::from(""),
        Line::from(Span::styled(
            "Type to edit the folder, Space toggles",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Enter]", Style::default().fg(Color::Green)),
            Span::raw(" Save     "),
            Span::styled("[Esc]", Style::default().fg(Color::Red)),
            Span::raw(" Discard"),
        ]),
    ];

    let paragraph =
        Paragraph::new(text).block(Block::default().title(" Settings ").borders(Borders::ALL));

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

fn help_section(title: &'static str) -> Line<'static> {
    Line::from(vec![Span::styled(
        title,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )])
}

fn help_key(key: &'static str, text: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<8}", key), Style::default().fg(Color::Cyan)),
        Span::raw(text),
    ])
}

pub fn render_help_modal(f: &mut Frame) {
    let area = centered_rect(65, 75, f.area());

    let help_text = vec![
        Line::from(vec![Span::styled(
            "vidscout Help",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        help_section("Navigation"),
        help_key("↑/↓", "Move between videos"),
        Line::from(""),
        help_section("Selection"),
        help_key("Space", "Toggle the focused video"),
        help_key("a", "Select or clear every shown video"),
        Line::from(""),
        help_section("Filters"),
        help_key("/", "Filter by name (case-insensitive)"),
        help_key("e", "Cycle file type (when more than one)"),
        help_key("c", "Clear all filters"),
        Line::from(""),
        help_section("Actions"),
        help_key("Enter/d", "Download selected and shown videos"),
        help_key("r", "Rescan the page"),
        help_key("x", "Clear the results"),
        help_key("u", "Scan a different URL"),
        help_key("o", "Settings"),
        Line::from(""),
        help_key("?", "Show this help"),
        help_key("q", "Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Hidden selections are kept and come back with the filter",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "Press q, Esc, or ? to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(help_text)
        .alignment(Alignment::Left)
        .block(Block::default().title(" Help ").borders(Borders::ALL));

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}
