use serde::{Deserialize, Serialize};

use super::enums::Gender;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientProfile {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    /// Height with unit, e.g. "165 cm".
    pub height: String,
    /// Weight with unit, e.g. "68 kg".
    pub weight: String,
    /// Clinical entry order. May hold a "No Known Drug Allergies" entry.
    #[serde(default)]
    pub allergies: Vec<String>,
}

impl PatientProfile {
    /// Allergies as a single comma-joined line.
    pub fn allergy_line(&self) -> String {
        self.allergies.join(", ")
    }
}
