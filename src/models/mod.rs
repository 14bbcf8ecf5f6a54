pub mod inspection;
pub mod tls_record;
