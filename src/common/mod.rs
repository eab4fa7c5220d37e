pub mod components;
pub mod smoothing;
