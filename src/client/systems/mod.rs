pub mod camera;
pub mod debug_toggles;
pub mod light;
pub mod rig;
