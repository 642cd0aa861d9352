//! Domain layer for the Notification Inbox

pub mod notification;

pub use notification::{escalation_marker, NewNotice, NoticeType, Notification, ReadFilter};
