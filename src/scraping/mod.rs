pub mod extract_faq;
pub mod fetch_page;
