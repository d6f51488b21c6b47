pub mod drill_area;
pub mod progress_bar;
pub mod session_summary;
pub mod stats_sidebar;
