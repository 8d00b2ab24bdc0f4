// Rendering for the single simulator screen

pub mod screens;
pub mod widgets;

use crate::app::App;
use ratatui::Frame;

pub fn ui(app: &mut App, f: &mut Frame<'_>) {
    screens::main::render_main(app, f);
}
