pub mod search_log;
