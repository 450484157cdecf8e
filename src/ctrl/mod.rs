pub mod navigation;

pub use navigation::{Direction, NavigationController, Outcome};
