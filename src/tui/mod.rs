pub mod app;
pub mod colors;
pub mod search;
pub mod table;
pub mod ui;

use std::sync::Arc;

use crate::client::SearchClient;
use crate::prefs::PreferenceStore;

/// Entry point: run the interactive TUI until the user quits.
pub fn run(client: Arc<SearchClient>, prefs: Box<dyn PreferenceStore>) -> crate::Result<()> {
    let mut terminal = ratatui::init();
    let mut app = app::App::new(client, prefs);
    let result = app.run(&mut terminal);
    ratatui::restore();
    result
}
