pub mod allocation;
pub mod budget;
pub mod item;
pub mod notification;
pub mod settings;
pub mod snapshot;
