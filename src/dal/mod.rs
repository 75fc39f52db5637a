pub mod app_db;
pub mod output_db;
pub mod research_cache_db;
pub mod run_db;
