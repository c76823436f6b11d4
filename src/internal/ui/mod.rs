pub mod app;
pub mod greeting;
pub mod view;
