pub mod actor;
mod client;
pub mod models;

pub use client::{HarmonyClient, HarmonyClientConfig, RequestContext, Session, default_data_dir};
