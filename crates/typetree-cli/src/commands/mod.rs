pub mod generate;
pub mod info;
pub mod show;

// Re-export command functions for main.rs
pub use generate::cmd_generate;
pub use info::cmd_info;
pub use show::cmd_show;
