pub mod core;
pub mod post;
pub mod pre;
