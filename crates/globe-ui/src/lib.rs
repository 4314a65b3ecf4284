//! Decorative chrome around the globe. Reads the view store, never writes it.

mod city;
mod lightning;
mod overlay;
mod tasks;
mod title;

pub use city::{Building, ImmersiveCity, StreetLight};
pub use lightning::LightningBolt;
pub use overlay::ContentOverlay;
pub use tasks::{TaskHandle, TaskQueue};
pub use title::{TitleAnimator, TitleTask};
