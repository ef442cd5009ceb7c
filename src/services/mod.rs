pub mod openrouter_client;
pub mod prompt;
pub mod response_parser;
