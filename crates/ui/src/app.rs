mod command;
mod loading;
mod persist;
mod run;
mod state;
mod types;


pub use state::App;
pub use types::Incoming;
