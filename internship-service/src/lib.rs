//! Backend for the virtual internship: a simulated client to chat with and a
//! reviewer for submitted code, both backed by a generative model.

pub mod config;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod services;
pub mod startup;
