pub mod notification_timer;
pub mod validation;
