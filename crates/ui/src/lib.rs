pub mod app;
pub mod layout;
pub mod prompt_view;
pub mod rsvp_view;
pub mod theme;
pub mod views;

pub use app::App;
pub use theme::Theme;
