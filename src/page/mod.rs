//! Interactive page widgets. Every widget owns its state; nothing here is
//! process-global.

mod counter;
mod list;
mod palette;
mod toggle;

pub use counter::{Counter, CounterTone};
pub use list::{DynamicList, ListItem};
pub use palette::{Palette, GRADIENTS};
pub use toggle::Toggle;
