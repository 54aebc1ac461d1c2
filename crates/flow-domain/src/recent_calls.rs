//! Llamadas recientes sembradas para el simulador.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::contacts::{Contact, MOCK_CONTACTS};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentCall {
    pub contact: Contact,
    pub minutes_left: u32,
    pub timestamp_label: String,
    pub local_time: String,
}

fn recent(contact_index: usize, minutes_left: u32, timestamp_label: &str, local_time: &str) -> Option<RecentCall> {
    MOCK_CONTACTS.get(contact_index).map(|contact| RecentCall { contact: contact.clone(),
                                                                minutes_left,
                                                                timestamp_label: timestamp_label.into(),
                                                                local_time: local_time.into() })
}

pub static RECENT_CALLS: Lazy<Vec<RecentCall>> = Lazy::new(|| {
    [recent(0, 340, "10 min ago", "2:30 PM"),
     recent(1, 2, "1 day ago", "9:15 AM"),
     recent(3, 0, "10 days ago", "5:15 PM")].into_iter()
                                             .flatten()
                                             .collect()
});
