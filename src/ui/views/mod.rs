pub mod compress;
pub mod watch;
