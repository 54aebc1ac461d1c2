// flow-domain: catálogos estáticos y objetos de valor de los flujos
pub mod bills;
pub mod contacts;
pub mod countries;
pub mod error;
pub mod format;
pub mod recent_calls;
pub mod recipient;

pub use bills::{BillCatalog, BillCategory, BillCategoryId, BillProvider, CategoryIcon, NAIRA_PER_USD, NIGERIA_CATALOG};
pub use contacts::{contact_by_id, search_contacts, Contact, MOCK_CONTACTS};
pub use countries::{country_by_code, default_verification_country, flag_for, search_countries, Country, COUNTRIES};
pub use error::DomainError;
pub use format::{format_duration, format_naira, format_usd, mask_phone};
pub use recent_calls::{RecentCall, RECENT_CALLS};
pub use recipient::{ManualRecipientDraft, Recipient, MANUAL_RECIPIENT_ID};
