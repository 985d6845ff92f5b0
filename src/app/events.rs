//! Event handling

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::async_ops::AsyncCommand;
use super::state::{AppState, Mode};
use crate::models::ReportReason;
use crate::theme::Theme;

/// Handle key events, returning an optional async command
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> Option<AsyncCommand> {
    // Handle mode-specific input first
    match state.mode {
        Mode::Help => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter) {
                state.mode = Mode::Normal;
            }
            return None;
        }
        Mode::ThemePicker => {
            handle_theme_picker_key(state, key);
            return None;
        }
        Mode::LanguagePicker => return handle_language_picker_key(state, key),
        Mode::Report => {
            handle_report_key(state, key);
            return None;
        }
        Mode::Normal => {}
    }

    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) | (_, KeyCode::Char('q')) => {
            state.should_quit = true;
            None
        }
        (_, KeyCode::Char('?') | KeyCode::F(1)) => {
            state.mode = Mode::Help;
            None
        }

        // Panels
        (_, KeyCode::Tab) => {
            state.focused_panel = state.focused_panel.next();
            None
        }
        (_, KeyCode::BackTab) => {
            state.focused_panel = state.focused_panel.prev();
            None
        }
        (_, KeyCode::Char('j') | KeyCode::Down) => {
            state.move_cursor(true);
            None
        }
        (_, KeyCode::Char('k') | KeyCode::Up) => {
            state.move_cursor(false);
            None
        }
        (_, KeyCode::Enter) => state.activate(),

        // Reading order
        (_, KeyCode::Char('n' | 'l') | KeyCode::Right) => state.next_verse(),
        (_, KeyCode::Char('p' | 'h') | KeyCode::Left) => state.previous_verse(),

        // Verse panel scrolling
        (KeyModifiers::SHIFT, KeyCode::Char('J')) | (_, KeyCode::PageDown) => {
            state.verse_scroll = state.verse_scroll.saturating_add(3);
            None
        }
        (KeyModifiers::SHIFT, KeyCode::Char('K')) | (_, KeyCode::PageUp) => {
            state.verse_scroll = state.verse_scroll.saturating_sub(3);
            None
        }

        // Translation
        (KeyModifiers::SHIFT, KeyCode::Char('L')) => {
            state.open_language_picker();
            None
        }
        (KeyModifiers::SHIFT, KeyCode::Char('R')) => state.retry_translation(),
        (_, KeyCode::Char('x')) => {
            state.reader.dismiss_translation_error();
            state.clear_status();
            None
        }

        (_, KeyCode::Char('r')) => {
            state.open_report();
            None
        }
        (_, KeyCode::Char('t')) => {
            state.open_theme_picker();
            None
        }
        (KeyModifiers::SHIFT, KeyCode::Char('T')) => {
            state.next_theme();
            state.set_status(format!("Theme: {}", state.theme.name()));
            None
        }
        _ => None,
    }
}

fn handle_theme_picker_key(state: &mut AppState, key: KeyEvent) {
    let count = Theme::all().len();
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => state.mode = Mode::Normal,
        KeyCode::Char('j') | KeyCode::Down => {
            state.theme_picker_index = (state.theme_picker_index + 1) % count;
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.theme_picker_index = (state.theme_picker_index + count - 1) % count;
        }
        KeyCode::Enter => state.apply_theme_picker(),
        _ => {}
    }
}

fn handle_language_picker_key(state: &mut AppState, key: KeyEvent) -> Option<AsyncCommand> {
    match key.code {
        KeyCode::Esc => {
            state.mode = Mode::Normal;
            None
        }
        KeyCode::Enter => state.choose_language(),
        KeyCode::Down => {
            let count = state.filtered_languages().len();
            if count > 0 {
                state.language_cursor = (state.language_cursor + 1).min(count - 1);
            }
            None
        }
        KeyCode::Up => {
            state.language_cursor = state.language_cursor.saturating_sub(1);
            None
        }
        KeyCode::Backspace => {
            state.language_query.pop();
            state.language_cursor = 0;
            None
        }
        KeyCode::Char(c) => {
            state.language_query.push(c);
            state.language_cursor = 0;
            None
        }
        _ => None,
    }
}

fn handle_report_key(state: &mut AppState, key: KeyEvent) {
    let Some(form) = state.report.as_mut() else {
        state.mode = Mode::Normal;
        return;
    };

    if form.editing_feedback {
        match key.code {
            KeyCode::Esc | KeyCode::Tab => form.editing_feedback = false,
            KeyCode::Enter => state.submit_report(),
            KeyCode::Backspace => {
                form.draft.feedback.pop();
            }
            KeyCode::Char(c) => {
                form.draft.feedback.push(c);
                form.error = None;
            }
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => state.cancel_report(),
        KeyCode::Char('j') | KeyCode::Down => {
            form.reason_cursor = (form.reason_cursor + 1).min(ReportReason::all().len() - 1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            form.reason_cursor = form.reason_cursor.saturating_sub(1);
        }
        KeyCode::Char(' ') => form.choose_highlighted(),
        KeyCode::Tab => form.editing_feedback = true,
        KeyCode::Enter => state.submit_report(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::demo;
    use crate::report::LogReportSink;
    use std::sync::Arc;

    fn state() -> AppState {
        let scripture = Arc::new(demo::rig_veda().unwrap());
        AppState::new(Config::default(), scripture, "none", Box::new(LogReportSink))
    }

    fn press(state: &mut AppState, code: KeyCode) -> Option<AsyncCommand> {
        handle_key(state, KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_next_and_previous_keys() {
        let mut state = state();
        press(&mut state, KeyCode::Char('n'));
        assert_eq!(state.reader.current_selection().verse_id(), Some("1.1.2"));
        press(&mut state, KeyCode::Char('p'));
        press(&mut state, KeyCode::Char('p'));
        assert_eq!(state.reader.current_selection().verse_id(), Some("1.1.1"));
        assert!(state.status.contains("first"));
    }

    #[test]
    fn test_language_picker_typing() {
        let mut state = state();
        handle_key(
            &mut state,
            KeyEvent::new(KeyCode::Char('L'), KeyModifiers::SHIFT),
        );
        assert_eq!(state.mode, Mode::LanguagePicker);

        for c in "hin".chars() {
            press(&mut state, KeyCode::Char(c));
        }
        assert_eq!(state.filtered_languages()[0].code, "hi");

        let command = press(&mut state, KeyCode::Enter);
        assert_eq!(state.mode, Mode::Normal);
        assert_eq!(state.language.code, "hi");
        assert!(matches!(command, Some(AsyncCommand::Translate { .. })));
    }

    #[test]
    fn test_report_flow_with_other_reason() {
        let mut state = state();
        press(&mut state, KeyCode::Char('r'));
        for _ in 0..ReportReason::all().len() {
            press(&mut state, KeyCode::Char('j'));
        }
        press(&mut state, KeyCode::Char(' '));
        press(&mut state, KeyCode::Enter);
        assert!(state.report.as_ref().unwrap().error.is_some());

        press(&mut state, KeyCode::Tab);
        for c in "meter".chars() {
            press(&mut state, KeyCode::Char(c));
        }
        press(&mut state, KeyCode::Enter);
        assert!(state.report.is_none());
        assert_eq!(state.mode, Mode::Normal);
    }

    #[test]
    fn test_quit() {
        let mut state = state();
        press(&mut state, KeyCode::Char('q'));
        assert!(state.should_quit);
    }
}
