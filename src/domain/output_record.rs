/// Disposition of one company after the pipeline ran. Closed set; anything
/// else (skipped rows etc.) is decided by the caller before the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, sqlx::Type)]
#[sqlx(type_name = "OutreachStatus", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutreachStatus {
    Personalized,
    PersonalizationFailed,
    NoSourceFound,
}

/// Exactly one of these is produced per company per run. Absent values
/// (no website, nothing found) are carried as empty strings, matching the
/// sheet-row shape the records started life as.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRecord {
    pub linkedin_url: String,
    pub website_url: String,
    pub company_name: String,
    pub fact: String,
    pub source_url: String,
    pub message_template: String,
    pub personalized_message: String,
    pub status: OutreachStatus,
}
