pub mod config;
pub mod evidence;
pub mod judgment;
pub mod verification;
