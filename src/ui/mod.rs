// UI module - presentation surface for the dashboard
//
// This module contains:
// - view: DashboardView, the render-ready projection of DashboardState
// - terminal: line command parsing and text rendering
// - SessionController: wires input, the catalog loader and a ViewSink together

pub mod controller;
pub mod terminal;
pub mod view;

pub use controller::{Flow, SessionController, ViewSink};
pub use terminal::{Command, CommandError, TerminalSink};
pub use view::{DashboardView, ProductCard, ProductDetail};
