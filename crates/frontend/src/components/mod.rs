pub mod location_input;
pub mod map_view;
pub mod status_bar;
