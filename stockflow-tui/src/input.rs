//! Keyboard input dispatch: overlays → global keys → section-specific handlers.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use stockflow_core::domain::date_range::parse_date;

use crate::app::{AppState, Overlay, Section};

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match &app.overlay {
        Overlay::DateEntry { .. } => {
            handle_date_entry(app, key);
            return;
        }
        Overlay::Help => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::None => {}
    }

    // 2. Global keys.
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
            return;
        }
        KeyCode::Char('1') => {
            app.section = Section::FetchStockData;
            return;
        }
        KeyCode::Char('2') => {
            app.section = Section::AboutMe;
            return;
        }
        KeyCode::Tab | KeyCode::BackTab => {
            app.section = app.section.next();
            return;
        }
        KeyCode::Char('s') => {
            app.sidebar_visible = !app.sidebar_visible;
            return;
        }
        KeyCode::Char('?') => {
            app.overlay = Overlay::Help;
            return;
        }
        _ => {}
    }

    // 3. Section-specific keys.
    match app.section {
        Section::FetchStockData => handle_fetch_key(app, key),
        Section::AboutMe => {} // static content
    }
}

fn handle_fetch_key(app: &mut AppState, key: KeyEvent) {
    let focus = app.input.focus;
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.input.focus = focus.next();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.input.focus = focus.prev();
        }
        KeyCode::Char('h') | KeyCode::Left => match focus.bound() {
            None => app.cycle_ticker(false),
            Some(bound) if shift => app.shift_date_months(bound, -1),
            Some(bound) => app.shift_date_days(bound, -1),
        },
        KeyCode::Char('l') | KeyCode::Right => match focus.bound() {
            None => app.cycle_ticker(true),
            Some(bound) if shift => app.shift_date_months(bound, 1),
            Some(bound) => app.shift_date_days(bound, 1),
        },
        KeyCode::Char('H') => match focus.bound() {
            None => app.cycle_ticker(false),
            Some(bound) => app.shift_date_months(bound, -1),
        },
        KeyCode::Char('L') => match focus.bound() {
            None => app.cycle_ticker(true),
            Some(bound) => app.shift_date_months(bound, 1),
        },
        KeyCode::Char('e') | KeyCode::Enter => {
            if let Some(bound) = focus.bound() {
                if app.is_fetching() {
                    app.set_warning(stockflow_core::workflow::FETCHING_MESSAGE);
                    return;
                }
                let current = app.input.date(bound).format("%Y-%m-%d").to_string();
                app.overlay = Overlay::DateEntry {
                    bound,
                    input: current,
                };
            } else if key.code == KeyCode::Enter {
                app.trigger_fetch();
            }
        }
        KeyCode::Char('f') => app.trigger_fetch(),
        KeyCode::Char('d') => app.export_csv(),
        KeyCode::PageDown | KeyCode::Char('J') => app.scroll_table(10),
        KeyCode::PageUp | KeyCode::Char('K') => app.scroll_table(-10),
        KeyCode::Home => app.scroll_table_to(false),
        KeyCode::End => app.scroll_table_to(true),
        _ => {}
    }
}

fn handle_date_entry(app: &mut AppState, key: KeyEvent) {
    let Overlay::DateEntry { bound, input } = &mut app.overlay else {
        return;
    };
    let bound = *bound;

    match key.code {
        KeyCode::Esc => {
            app.overlay = Overlay::None;
        }
        KeyCode::Enter => {
            match parse_date(input) {
                Ok(date) => {
                    app.overlay = Overlay::None;
                    app.set_date(bound, date);
                }
                Err(_) => {
                    let msg = format!("Invalid date '{}': use YYYY-MM-DD", input.trim());
                    app.set_warning(msg);
                }
            }
        }
        KeyCode::Backspace => {
            input.pop();
        }
        KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => {
            if input.len() < 10 {
                input.push(c);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    use chrono::NaiveDate;
    use stockflow_core::config::AppConfig;
    use stockflow_core::domain::{RangeBound, Ticker};

    use crate::app::Field;
    use crate::worker::WorkerCommand;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn new_app() -> (AppState, mpsc::Receiver<WorkerCommand>) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (_resp_tx, resp_rx) = mpsc::channel();
        let app = AppState::new(AppConfig::default(), d(2026, 10, 18), cmd_tx, resp_rx);
        (app, cmd_rx)
    }

    fn press(app: &mut AppState, code: KeyCode) {
        handle_key(app, KeyEvent::from(code));
    }

    fn type_str(app: &mut AppState, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn quit_on_q_and_ctrl_c() {
        let (mut app, _rx) = new_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);

        let (mut app, _rx) = new_app();
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }

    #[test]
    fn section_selector_keys() {
        let (mut app, _rx) = new_app();
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.section, Section::AboutMe);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.section, Section::FetchStockData);
        press(&mut app, KeyCode::Char('s'));
        assert!(!app.sidebar_visible);
    }

    #[test]
    fn ticker_picker_cycles_with_h_l() {
        let (mut app, _rx) = new_app();
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.input.ticker, Ticker::MSFT);
        press(&mut app, KeyCode::Char('h'));
        press(&mut app, KeyCode::Char('h'));
        assert_eq!(app.input.ticker, Ticker::DIS);
    }

    #[test]
    fn date_fields_shift_by_day_and_month() {
        let (mut app, _rx) = new_app();
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.input.focus, Field::StartDate);
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.input.range.start, d(2015, 1, 2));
        press(&mut app, KeyCode::Char('L'));
        assert_eq!(app.input.range.start, d(2015, 2, 2));

        press(&mut app, KeyCode::Down);
        assert_eq!(app.input.focus, Field::EndDate);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.input.range.end, d(2026, 10, 17));
    }

    #[test]
    fn date_entry_overlay_sets_date() {
        let (mut app, _rx) = new_app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert!(matches!(
            app.overlay,
            Overlay::DateEntry { bound: RangeBound::End, .. }
        ));

        for _ in 0..10 {
            press(&mut app, KeyCode::Backspace);
        }
        type_str(&mut app, "2015-01-10");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.overlay, Overlay::None);
        assert_eq!(app.input.range.end, d(2015, 1, 10));
    }

    #[test]
    fn invalid_date_entry_is_rejected() {
        let (mut app, _rx) = new_app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('e'));
        for _ in 0..10 {
            press(&mut app, KeyCode::Backspace);
        }
        type_str(&mut app, "2015-02-30");
        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.overlay, Overlay::DateEntry { .. }));
        assert_eq!(app.input.range.start, d(2015, 1, 1));

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.overlay, Overlay::None);
    }

    #[test]
    fn fetch_key_sends_current_selection() {
        let (mut app, rx) = new_app();
        press(&mut app, KeyCode::Char('f'));
        match rx.try_recv().unwrap() {
            WorkerCommand::Fetch(sel) => {
                assert_eq!(sel.ticker, Ticker::AAPL);
                assert_eq!(sel.range.start, d(2015, 1, 1));
                assert_eq!(sel.range.end, d(2026, 10, 18));
            }
            other => panic!("expected Fetch, got {other:?}"),
        }
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn input_changes_do_not_fetch() {
        let (mut app, rx) = new_app();
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('l'));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn help_overlay_dismissed_by_any_key() {
        let (mut app, _rx) = new_app();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.overlay, Overlay::Help);
        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.overlay, Overlay::None);
        assert!(!app.is_fetching());
    }
}
