//! egui front end: state, controller, view helpers and renderer.

pub mod controller;
pub mod state;
pub mod ui;
pub mod view_model;
