pub mod input;
pub mod message;
pub mod plugins;
pub mod systems;
