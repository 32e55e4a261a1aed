pub mod image_filter;
pub mod logger;
