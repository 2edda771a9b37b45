//! GUI module - User interface components

mod app;
mod country_view;
mod validation_panel;
mod widgets;

pub use app::DashboardApp;
pub use country_view::CountryView;
pub use validation_panel::{PanelAction, ValidationPanel};
