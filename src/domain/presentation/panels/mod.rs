pub mod banners;
pub mod controls_panel;
pub mod diagnostics_panel;
pub mod help_panel;
pub mod scoreboard_panel;
pub mod settings_panel;
