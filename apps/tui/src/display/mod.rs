pub mod details;
pub mod format;
pub mod view;

pub use details::{DetailLine, DetailPanel};
pub use view::{representative_index, DisplayMode, ResultView, SinglePanel, TableRow};
