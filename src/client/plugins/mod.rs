pub mod flicker;
pub mod rig;

pub use flicker::FlickerPlugin;
pub use rig::RigPlugin;
