pub mod app;
pub mod arguments;
pub mod channels;
pub mod chat;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod integrations;
pub mod shared;
