pub mod api_utils;
pub mod cart_editor;
pub mod catalog;
pub mod date_utils;
pub mod export;
pub mod form_utils;
pub mod icons;
pub mod list_utils;
pub mod notify;
pub mod page_frame;
pub mod page_standard;
