use crossterm::event::{Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};

use crate::app::{App, Mode};

/// Dispatch a terminal event to the application
pub fn handle_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Mouse(mouse) => handle_mouse(app, mouse),
        Event::Resize(columns, _) => app.resize(columns),
        _ => {}
    }
}

/// Handle a key event and update the application state
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Clear messages on any key press
    app.clear_messages();

    match app.mode {
        Mode::Normal => handle_normal_mode(app, key),
        Mode::Help => handle_help_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        // Quit
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
        }

        // Navigation
        KeyCode::Char('h') | KeyCode::Left => {
            app.prev_day();
        }
        KeyCode::Char('l') | KeyCode::Right => {
            app.next_day();
        }
        KeyCode::Char('g') | KeyCode::Home => {
            app.first_day();
        }
        KeyCode::Char('G') | KeyCode::End => {
            app.last_day();
        }
        KeyCode::Char('t') => {
            app.select_today();
        }

        // Pick a visible day by position
        KeyCode::Char(c @ '1'..='9') => {
            if let Some(slot) = c.to_digit(10) {
                app.select_slot(slot as usize);
            }
        }

        // Shift the range
        KeyCode::Char('[') => {
            app.shift_weeks(-1);
        }
        KeyCode::Char(']') => {
            app.shift_weeks(1);
        }

        // Busy lock
        KeyCode::Char('b') => {
            app.toggle_busy();
        }

        // Help
        KeyCode::Char('?') => {
            app.show_help();
        }

        _ => {}
    }
}

fn handle_help_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc | KeyCode::Char('?') => {
            app.cancel();
        }
        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    // Only handle mouse in normal mode
    if app.mode != Mode::Normal {
        return;
    }

    match mouse.kind {
        MouseEventKind::ScrollUp => {
            app.prev_day();
        }
        MouseEventKind::ScrollDown => {
            app.next_day();
        }
        MouseEventKind::Down(MouseButton::Left) => {
            app.clear_messages();
            app.click(mouse.column, mouse.row);
        }
        _ => {}
    }
}
