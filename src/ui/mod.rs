pub mod app;
pub mod console;
pub mod input;
pub mod menu;
pub mod navigator;
pub mod screens;
