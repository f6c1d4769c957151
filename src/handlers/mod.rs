pub mod browse_handlers;
pub mod command_handlers;
pub mod render;
pub mod terminal;
