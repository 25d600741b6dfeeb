pub mod field_error_presenter;
pub mod log_notifications;
pub mod notice_board;
pub mod notification;
pub mod render;
