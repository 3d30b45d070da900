pub mod handlers;
pub mod main_menu;
pub mod settings_menu;

pub use main_menu::show_main_menu;
