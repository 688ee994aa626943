pub mod ids;
pub mod log;
pub mod text;
