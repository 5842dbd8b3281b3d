pub mod bundle;
pub mod inspect;
pub mod render;
