use crate::app::state::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub async fn handle_main_input(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.running = false;
        return;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            app.running = false;
        }
        KeyCode::F(5) | KeyCode::Enter | KeyCode::Char('s') => {
            app.request_submit();
        }
        KeyCode::Char('t') => {
            let theme = app.theme.toggle().await;
            tracing::debug!(theme = theme.as_str(), "theme toggled from keyboard");
        }
        KeyCode::Char('d') => {
            app.controller.dismiss_banner();
        }
        KeyCode::Tab | KeyCode::Down => app.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.focus_prev(),
        KeyCode::Left if app.focused().is_choice() => app.cycle_choice(false),
        KeyCode::Right if app.focused().is_choice() => app.cycle_choice(true),
        KeyCode::PageDown => app.scroll_table(true),
        KeyCode::PageUp => app.scroll_table(false),
        KeyCode::Backspace => app.pop_char(),
        KeyCode::Delete => app.clear_field(),
        KeyCode::Char(ch) => app.push_char(ch),
        _ => {}
    }
}
