pub mod app;
pub mod event;
pub mod geometry;
pub mod observer;
pub mod screen;
pub mod window_server;
