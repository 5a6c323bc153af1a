use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    /// Unique within one prescription; names may repeat.
    pub id: u32,
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    /// Free text, or "Ongoing".
    pub duration: String,
    /// Taken before this consultation rather than newly prescribed.
    pub is_existing: bool,
}
