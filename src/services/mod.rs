pub mod byte_cursor;
pub mod errors;
pub mod ja4;
pub mod operations;
pub mod record_stream;
pub mod registry;
pub mod tls_parser;
