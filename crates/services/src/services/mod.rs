pub mod controller;
pub mod error_map;
pub mod goals;
pub mod messages;
pub mod submission;
pub mod validator;
