pub mod app;
pub mod command;
pub mod context;
pub mod month_window;
pub mod screen;
pub mod text;

pub use context::{Context, Mode, Theme};
pub use month_window::MonthWindow;
pub use screen::Screen;
