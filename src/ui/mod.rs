//! Renderers: every widget that turns state or chart descriptions into pixels.

pub mod dashboard;
pub mod panels;
pub mod plot;
pub mod shapes;
pub mod table;
