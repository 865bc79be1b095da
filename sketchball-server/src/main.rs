#![allow(clippy::collapsible_else_if, clippy::collapsible_if)]

pub mod config;
pub mod core;
pub mod media;
pub mod notify;
pub mod overlay;
pub mod terminal;

use crate::core::Core;

#[tokio::main]
async fn main() {
    Core::new().run().await;
}
