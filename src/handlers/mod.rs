pub mod fingerprint_handler;
pub mod inspect_handler;
