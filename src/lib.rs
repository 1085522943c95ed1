pub mod config;
pub mod errors;
pub mod faq_data;
pub mod refresh;
pub mod scraping;
pub mod shell;
pub mod utilities;
