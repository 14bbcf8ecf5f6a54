// src/services/record_stream/session_ticket.rs

use super::read_prefixed_blob;
use crate::models::tls_record::NewSessionTicketMessage;
use crate::services::byte_cursor::ByteCursor;

pub fn parse_new_session_ticket(cursor: &mut ByteCursor<'_>) -> NewSessionTicketMessage {
    NewSessionTicketMessage {
        ticket_lifetime_hint: cursor.try_read_int(4).map(|secs| format!("{}s", secs)),
        ticket: read_prefixed_blob(cursor, 2),
    }
}
