use crate::app::state::App;
use crossterm::event::KeyEvent;

mod help;
mod main;

pub async fn dispatch_input(app: &mut App, key: KeyEvent) {
    if help::handle_help_toggle(app, key.code) {
        return;
    }

    main::handle_main_input(app, key).await;
}
