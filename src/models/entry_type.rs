use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Work,
    Vacation,
    Sick,
}

impl EntryType {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            EntryType::Work => "work",
            EntryType::Vacation => "vacation",
            EntryType::Sick => "sick",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "work" => Some(EntryType::Work),
            "vacation" => Some(EntryType::Vacation),
            "sick" => Some(EntryType::Sick),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EntryType::Work => "Work",
            EntryType::Vacation => "Vacation",
            EntryType::Sick => "Sick leave",
        }
    }
}
