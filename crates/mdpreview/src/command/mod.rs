pub mod highlight_css;
pub mod render;
pub mod watch;
