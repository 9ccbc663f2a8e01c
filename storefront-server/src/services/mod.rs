//! External service seams

pub mod assets;
pub mod notifier;

pub use assets::{AssetStore, HttpAssetStore};
pub use notifier::{HttpNotifier, NoopNotifier, OrderNotifier};
