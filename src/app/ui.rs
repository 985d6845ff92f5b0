//! UI rendering for the TUI

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use super::state::{AppState, FocusedPanel, Mode};
use crate::models::{ReportReason, Verse};
use crate::theme::{Theme, ThemeColors};
use crate::translation::{ResolvedTranslation, TranslationSource, TranslationState};

/// shloka icon
const ICON: &str = "📜";

/// Spinner animation frames
const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Main render function
pub fn render(frame: &mut Frame, state: &AppState) {
    let colors = state.theme.colors();

    // Set background
    let area = frame.area();
    let bg_block = Block::default().style(Style::default().bg(colors.bg));
    frame.render_widget(bg_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Previous/next footer
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_header(frame, state, chunks[0]);
    render_main(frame, state, chunks[1]);
    render_footer(frame, state, chunks[2]);
    render_status_bar(frame, state, chunks[3]);

    // Render modal dialogs
    match state.mode {
        Mode::Help => render_help_popup(frame, state),
        Mode::ThemePicker => render_theme_picker(frame, state),
        Mode::LanguagePicker => render_language_picker(frame, state),
        Mode::Report => render_report_popup(frame, state),
        Mode::Normal => {}
    }
}

fn render_header(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();
    let scripture = state.reader.scripture();

    let mut spans = vec![
        Span::styled(" ", Style::default()),
        Span::styled(scripture.title(), colors.logo_style_primary()),
    ];
    if let Some(subtitle) = scripture.subtitle() {
        spans.push(Span::styled(format!("  {subtitle}"), colors.text_dim()));
    }
    spans.push(Span::styled("   🌐 ", colors.text_muted()));
    spans.push(Span::styled(state.language.to_string(), colors.text_secondary()));
    spans.push(Span::styled("   AI: ", colors.text_muted()));
    spans.push(Span::styled(state.provider_name, colors.text_info()));

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(colors.block())
            .title(format!(" {ICON} shloka "))
            .title_style(colors.logo_style_secondary()),
    );
    frame.render_widget(header, area);
}

fn render_main(frame: &mut Frame, state: &AppState, area: Rect) {
    // Layout: [Lists 30%] [Verse 70%]
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(area);

    let lists = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(35),
            Constraint::Percentage(40),
        ])
        .split(horizontal[0]);

    let names = state.reader.scripture().level_names();
    let cursor = state.reader.current_selection().cursor();

    let sections: Vec<(String, bool)> = state
        .sections()
        .iter()
        .map(|s| {
            let selected = cursor.is_some_and(|c| c.path.section_id == s.id);
            let label = if s.verse_count() == 0 {
                format!("{} (empty)", s.title)
            } else {
                s.title.clone()
            };
            (label, selected)
        })
        .collect();
    render_list(
        frame,
        state,
        lists[0],
        &names.section,
        &sections,
        state.section_cursor,
        FocusedPanel::Sections,
    );

    let subsections: Vec<(String, bool)> = state
        .visible_subsections()
        .iter()
        .map(|s| {
            let selected = cursor.is_some_and(|c| c.path.subsection_id == s.id);
            let label = if s.is_navigable() {
                s.title.clone()
            } else {
                format!("{} (empty)", s.title)
            };
            (label, selected)
        })
        .collect();
    render_list(
        frame,
        state,
        lists[1],
        &names.subsection,
        &subsections,
        state.subsection_cursor,
        FocusedPanel::Subsections,
    );

    let verses: Vec<(String, bool)> = state
        .visible_verses()
        .iter()
        .map(|v| {
            let selected = cursor.is_some_and(|c| c.path.verse_id == v.id);
            (format!("{} {}", names.verse, v.id), selected)
        })
        .collect();
    render_list(
        frame,
        state,
        lists[2],
        &names.verse,
        &verses,
        state.verse_cursor,
        FocusedPanel::Verses,
    );

    render_verse_panel(frame, state, horizontal[1]);
}

fn render_list(
    frame: &mut Frame,
    state: &AppState,
    area: Rect,
    title: &str,
    items: &[(String, bool)],
    highlighted: usize,
    panel: FocusedPanel,
) {
    let colors = state.theme.colors();
    let focused = state.focused_panel == panel;

    let list_items: Vec<ListItem> = items
        .iter()
        .map(|(label, selected)| {
            let marker = if *selected { "● " } else { "  " };
            let style = if *selected {
                colors.text_primary()
            } else {
                colors.text()
            };
            ListItem::new(Line::from(vec![
                Span::styled(marker, colors.text_secondary()),
                Span::styled(label.clone(), style),
            ]))
        })
        .collect();

    let list = List::new(list_items)
        .block(
            Block::default()
                .title(format!(" {title}s "))
                .title_style(colors.text_primary())
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(if focused {
                    colors.block_focus()
                } else {
                    colors.block()
                }),
        )
        .highlight_style(if focused {
            colors.selected()
        } else {
            Style::default()
        });

    let mut list_state = ListState::default();
    if !items.is_empty() {
        list_state.select(Some(highlighted.min(items.len() - 1)));
    }
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_verse_panel(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();
    let names = state.reader.scripture().level_names();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(colors.block());

    let Some(verse) = state.reader.current_verse() else {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("  ℹ ", colors.text_info()),
                Span::styled("No verses to show", colors.text_muted()),
            ]),
        ])
        .block(block.title(" Verse "));
        frame.render_widget(empty, area);
        return;
    };

    let mut lines = verse_lines(verse, &colors);
    lines.push(Line::from(""));
    lines.extend(translation_lines(state, &colors));

    if let Some(notes) = &verse.notes {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Notes", colors.heading())));
        lines.push(Line::from(Span::styled(notes.clone(), colors.text_dim())));
    }

    let paragraph = Paragraph::new(lines)
        .block(
            block
                .title(format!(" {} {} ", names.verse, verse.id))
                .title_style(colors.text_primary()),
        )
        .wrap(Wrap { trim: false })
        .scroll((state.verse_scroll, 0));
    frame.render_widget(paragraph, area);
}

fn verse_lines(verse: &Verse, colors: &ThemeColors) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from("")];
    for line in &verse.source_lines {
        lines.push(
            Line::from(Span::styled(line.clone(), colors.verse_source())).alignment(Alignment::Center),
        );
    }
    if let Some(alternate) = &verse.alternate_script_lines {
        lines.push(Line::from(""));
        for line in alternate {
            lines.push(
                Line::from(Span::styled(line.clone(), colors.verse_alternate()))
                    .alignment(Alignment::Center),
            );
        }
    }
    lines
}

fn translation_lines(state: &AppState, colors: &ThemeColors) -> Vec<Line<'static>> {
    match state.reader.translation_state() {
        TranslationState::Ready(resolved) => resolved_lines(resolved, colors),
        TranslationState::Translating(_) => {
            let frame_idx = (state.current_tick() / 2) as usize % SPINNER.len();
            vec![Line::from(vec![
                Span::styled(format!("{} ", SPINNER[frame_idx]), colors.text_secondary()),
                Span::styled(
                    format!("Translating into {}...", state.language.name),
                    colors.text_dim(),
                ),
            ])]
        }
        TranslationState::Failed { reason, .. } => vec![
            Line::from(vec![
                Span::styled("✗ ", colors.text_error()),
                Span::styled(reason.clone(), colors.text_error()),
            ]),
            Line::from(vec![
                Span::styled("R", colors.key_hint()),
                Span::styled(" retry  ", colors.text_muted()),
                Span::styled("x", colors.key_hint()),
                Span::styled(" dismiss", colors.text_muted()),
            ]),
        ],
        TranslationState::Idle => vec![Line::from(vec![
            Span::styled("No translation shown. Press ", colors.text_muted()),
            Span::styled("R", colors.key_hint()),
            Span::styled(" to translate", colors.text_muted()),
        ])],
    }
}

fn resolved_lines(resolved: &ResolvedTranslation, colors: &ThemeColors) -> Vec<Line<'static>> {
    let mut badge = Vec::new();
    if resolved.human_verified {
        badge.push(Span::styled("✔ Human verified", colors.badge_verified()));
        badge.push(Span::styled("  ", Style::default()));
    }
    let provenance = match resolved.source {
        TranslationSource::Cache | TranslationSource::Provider => colors.badge_machine(),
        TranslationSource::Builtin | TranslationSource::Authored => colors.text_muted(),
    };
    badge.push(Span::styled(resolved.source.label(), provenance));

    let mut lines = vec![Line::from(badge), Line::from("")];
    let payload = &resolved.payload;

    if resolved.source == TranslationSource::Builtin {
        if let Some(purport) = &payload.purport {
            lines.push(Line::from(Span::styled("Translation", colors.heading())));
            lines.push(Line::from(Span::styled(purport.clone(), colors.text())));
        }
        return lines;
    }

    let sections = [
        ("Pada (word meanings)", &payload.gloss),
        ("Padartha (phrase analysis)", &payload.phrase_analysis),
        ("Bhavartha (purport)", &payload.purport),
    ];
    for (heading, text) in sections {
        if let Some(text) = text {
            lines.push(Line::from(Span::styled(heading, colors.heading())));
            lines.push(Line::from(Span::styled(text.clone(), colors.text())));
            lines.push(Line::from(""));
        }
    }
    lines
}

fn render_footer(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();
    let nav = state.reader.navigator();

    let button = |enabled: bool, label: &'static str| {
        if enabled {
            Span::styled(label, colors.key_hint())
        } else {
            Span::styled(label, colors.text_muted().add_modifier(Modifier::DIM))
        }
    };

    let position = nav.selection().cursor().map_or_else(
        || "-".to_string(),
        |c| format!("{} / {}", c.index + 1, nav.index().len()),
    );

    let footer = Paragraph::new(Line::from(vec![
        button(nav.has_previous(), " ◀ Previous (p) "),
        Span::styled(format!("  {position}  "), colors.text_dim()),
        button(nav.has_next(), " Next (n) ▶ "),
    ]))
    .alignment(Alignment::Center)
    .style(Style::default().bg(colors.bg));
    frame.render_widget(footer, area);
}

fn render_status_bar(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();

    let loading_indicator = if state.is_translating() {
        let frame_idx = (state.current_tick() / 2) as usize % SPINNER.len();
        format!("{} ", SPINNER[frame_idx])
    } else {
        String::new()
    };

    let content = if state.status.is_empty() {
        vec![
            Span::styled(" ", Style::default()),
            Span::styled(&loading_indicator, colors.text_secondary()),
            Span::styled("Tab", colors.key_hint()),
            Span::styled(": panels  ", colors.text_muted()),
            Span::styled("n/p", colors.key_hint()),
            Span::styled(": next/prev  ", colors.text_muted()),
            Span::styled("L", colors.key_hint()),
            Span::styled(": language  ", colors.text_muted()),
            Span::styled("r", colors.key_hint()),
            Span::styled(": report  ", colors.text_muted()),
            Span::styled("?", colors.key_hint()),
            Span::styled(": help  ", colors.text_muted()),
            Span::styled("q", colors.key_hint()),
            Span::styled(": quit", colors.text_muted()),
        ]
    } else {
        vec![
            Span::styled(" ", Style::default()),
            Span::styled(&loading_indicator, colors.text_secondary()),
            Span::styled(&state.status, colors.text_secondary()),
        ]
    };

    let status =
        Paragraph::new(Line::from(content)).style(Style::default().bg(colors.bg_secondary));
    frame.render_widget(status, area);
}

fn help_line<'a>(keys: &'a str, action: &'a str, colors: &ThemeColors) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {keys:<17}"), colors.key_hint()),
        Span::styled(action, colors.text()),
    ])
}

fn help_heading<'a>(title: &'a str, colors: &ThemeColors) -> Line<'a> {
    Line::from(Span::styled(
        format!("  {title}"),
        colors.text_primary().add_modifier(Modifier::BOLD),
    ))
}

fn render_help_popup(frame: &mut Frame, state: &AppState) {
    let colors = state.theme.colors();
    let popup_area = centered_rect(50, 70, frame.area());

    // Solid background so the panels underneath don't bleed through
    let bg_block = Block::default().style(Style::default().bg(colors.bg_secondary));
    frame.render_widget(Clear, popup_area);
    frame.render_widget(bg_block, popup_area);

    let help_content = vec![
        Line::from(""),
        help_heading("Navigation", &colors),
        help_line("Tab / Shift+Tab", "Switch panels", &colors),
        help_line("j/k or ↑/↓", "Move in list", &colors),
        help_line("Enter", "Select highlighted item", &colors),
        help_line("n/l or →", "Next verse", &colors),
        help_line("p/h or ←", "Previous verse", &colors),
        help_line("J/K or PgDn/PgUp", "Scroll verse", &colors),
        Line::from(""),
        help_heading("Translation", &colors),
        help_line("L", "Choose language", &colors),
        help_line("R", "Retry translation", &colors),
        help_line("x", "Dismiss error", &colors),
        Line::from(""),
        help_heading("Other", &colors),
        help_line("r", "Report a problem with this verse", &colors),
        help_line("t / T", "Theme picker / next theme", &colors),
        help_line("?", "Toggle help", &colors),
        help_line("q", "Quit", &colors),
    ];

    let help = Paragraph::new(help_content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(colors.block_focus())
            .style(Style::default().bg(colors.bg_secondary))
            .title(" ❓ Help ")
            .title_style(colors.text_primary())
            .title_bottom(Line::from(" Esc close ").centered()),
    );
    frame.render_widget(help, popup_area);
}

fn render_theme_picker(frame: &mut Frame, state: &AppState) {
    let colors = state.theme.colors();
    let popup_area = centered_rect(50, 70, frame.area());

    let bg_block = Block::default().style(Style::default().bg(colors.bg));
    frame.render_widget(Clear, popup_area);
    frame.render_widget(bg_block, popup_area);

    let themes = Theme::all();
    let items: Vec<ListItem> = themes
        .iter()
        .enumerate()
        .map(|(i, theme_name)| {
            let palette = theme_name.palette();
            let selected = i == state.theme_picker_index;

            let preview = format!(
                "  {} {} ",
                if selected { "▸" } else { " " },
                theme_name.display_name()
            );

            let style = if selected {
                Style::default()
                    .fg(palette.accent)
                    .bg(palette.selection)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.fg).bg(colors.bg)
            };

            ListItem::new(Line::from(vec![
                Span::styled(preview, style),
                Span::styled("█", Style::default().fg(palette.accent).bg(colors.bg)),
                Span::styled("█", Style::default().fg(palette.secondary).bg(colors.bg)),
                Span::styled("█", Style::default().fg(palette.success).bg(colors.bg)),
                Span::styled("█", Style::default().fg(palette.warning).bg(colors.bg)),
            ]))
        })
        .collect();

    let theme_list = List::new(items).style(Style::default().bg(colors.bg)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors.primary))
            .border_type(BorderType::Rounded)
            .style(Style::default().bg(colors.bg))
            .title(format!(
                " 🎨 Select Theme ({}/{}) ",
                state.theme_picker_index + 1,
                themes.len()
            ))
            .title_bottom(Line::from(" ↑↓ navigate │ ↵ apply │ Esc cancel ").centered()),
    );

    let mut list_state = ListState::default();
    list_state.select(Some(state.theme_picker_index));
    frame.render_stateful_widget(theme_list, popup_area, &mut list_state);
}

fn render_language_picker(frame: &mut Frame, state: &AppState) {
    let colors = state.theme.colors();
    let popup_area = centered_rect(40, 60, frame.area());
    frame.render_widget(Clear, popup_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(popup_area);

    let query = Paragraph::new(Line::from(vec![
        Span::styled(" 🔍 ", colors.text_muted()),
        if state.language_query.is_empty() {
            Span::styled("Type to filter...", colors.text_muted())
        } else {
            Span::styled(state.language_query.as_str(), colors.text())
        },
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(colors.block_focus())
            .style(Style::default().bg(colors.bg))
            .title(" 🌐 Language ")
            .title_style(colors.text_primary()),
    );
    frame.render_widget(query, chunks[0]);

    let languages = state.filtered_languages();
    let items: Vec<ListItem> = if languages.is_empty() {
        vec![ListItem::new(Span::styled("  No matching language", colors.text_muted()))]
    } else {
        languages
            .iter()
            .map(|l| {
                let current = if l.code == state.language.code { "● " } else { "  " };
                ListItem::new(Line::from(vec![
                    Span::styled(current, colors.text_secondary()),
                    Span::styled(l.name.clone(), colors.text()),
                    Span::styled(format!("  {}", l.code), colors.text_muted()),
                ]))
            })
            .collect()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(colors.block_focus())
                .style(Style::default().bg(colors.bg))
                .title_bottom(Line::from(" ↑↓ navigate │ ↵ choose │ Esc cancel ").centered()),
        )
        .highlight_style(colors.selected());

    let mut list_state = ListState::default();
    if !languages.is_empty() {
        list_state.select(Some(state.language_cursor.min(languages.len() - 1)));
    }
    frame.render_stateful_widget(list, chunks[1], &mut list_state);
}

fn render_report_popup(frame: &mut Frame, state: &AppState) {
    let Some(form) = &state.report else {
        return;
    };
    let colors = state.theme.colors();
    let popup_area = centered_rect(55, 60, frame.area());

    let bg_block = Block::default().style(Style::default().bg(colors.bg));
    frame.render_widget(Clear, popup_area);
    frame.render_widget(bg_block, popup_area);

    let names = state.reader.scripture().level_names();
    let mut content = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  Reporting ", colors.text_dim()),
            Span::styled(
                format!("{} {}", names.verse, form.draft.verse_id()),
                colors.text_primary(),
            ),
        ]),
        Line::from(""),
    ];

    for (i, reason) in ReportReason::all().iter().enumerate() {
        let chosen = form.draft.reason == Some(*reason);
        let highlighted = !form.editing_feedback && i == form.reason_cursor;
        let mark = if chosen { "(•)" } else { "( )" };
        let style = if highlighted {
            colors.selected()
        } else {
            colors.text()
        };
        content.push(Line::from(vec![
            Span::styled("  ", Style::default()),
            Span::styled(format!("{mark} {}", reason.label()), style),
        ]));
    }

    content.push(Line::from(""));
    let feedback_style = if form.editing_feedback {
        colors.text()
    } else {
        colors.text_dim()
    };
    let cursor = if form.editing_feedback { "▏" } else { "" };
    content.push(Line::from(vec![
        Span::styled("  Details: ", colors.text_muted()),
        Span::styled(format!("{}{cursor}", form.draft.feedback), feedback_style),
    ]));

    if let Some(error) = &form.error {
        content.push(Line::from(""));
        content.push(Line::from(Span::styled(format!("  ✗ {error}"), colors.text_error())));
    }

    content.push(Line::from(""));
    content.push(Line::from(vec![
        Span::styled("  Space", colors.key_hint()),
        Span::styled(" choose  ", colors.text_muted()),
        Span::styled("Tab", colors.key_hint()),
        Span::styled(" details  ", colors.text_muted()),
        Span::styled("Enter", colors.key_hint()),
        Span::styled(" submit  ", colors.text_muted()),
        Span::styled("Esc", colors.key_hint()),
        Span::styled(" cancel", colors.text_muted()),
    ]));

    let dialog = Paragraph::new(content).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(colors.block_focus())
            .style(Style::default().bg(colors.bg))
            .title(" ⚑ Report a problem ")
            .title_style(colors.text_primary()),
    );
    frame.render_widget(dialog, popup_area);
}

/// Helper function to create a centered rect
const fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_width = r.width * percent_x / 100;
    let popup_height = r.height * percent_y / 100;
    Rect {
        x: r.x + (r.width.saturating_sub(popup_width)) / 2,
        y: r.y + (r.height.saturating_sub(popup_height)) / 2,
        width: popup_width,
        height: popup_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::demo;
    use crate::report::LogReportSink;
    use ratatui::{Terminal, backend::TestBackend};
    use std::sync::Arc;

    fn rendered(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| render(frame, state)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content.iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_renders_builtin_translation_with_badge() {
        let scripture = Arc::new(demo::rig_veda().unwrap());
        let mut state = AppState::new(Config::default(), scripture, "none", Box::new(LogReportSink));
        state.request_translation();

        let screen = rendered(&state);
        assert!(screen.contains("Human verified"));
        assert!(screen.contains("Mantra 1.1.1"));
        assert!(screen.contains("Next (n)"));
    }

    #[test]
    fn test_renders_every_popup() {
        let scripture = Arc::new(demo::rig_veda().unwrap());
        let mut state = AppState::new(Config::default(), scripture, "none", Box::new(LogReportSink));

        state.mode = Mode::Help;
        assert!(rendered(&state).contains("Help"));

        state.open_language_picker();
        assert!(rendered(&state).contains("Language"));

        state.mode = Mode::Normal;
        state.open_report();
        assert!(rendered(&state).contains("Report a problem"));
    }

    #[test]
    fn test_centered_rect() {
        let r = centered_rect(50, 50, Rect::new(0, 0, 100, 40));
        assert_eq!(r, Rect::new(25, 10, 50, 20));
    }
}
