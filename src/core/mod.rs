pub mod archive;
pub mod config;
pub mod daemon;
pub mod download;
pub mod selinux;
pub mod service;
pub mod unit;
pub mod version;
