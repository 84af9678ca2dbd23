//! UI layer: the students window.

pub mod app;

pub use app::StudentsApp;
