pub mod clear;
pub mod config;
pub mod export;
pub mod remove;
pub mod show;
pub mod template;
pub mod toggle;
pub mod upcoming;
