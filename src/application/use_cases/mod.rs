pub mod activity_discovery;
pub mod calendar_export;
pub mod contact_import;
pub mod share_text;
