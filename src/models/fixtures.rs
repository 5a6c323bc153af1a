//! Shared test records.

use super::*;

pub const RECORD_JSON: &str = r#"{
  "caseDetails": {
    "prescriptionId": "P-98124",
    "date": "June 07, 2025",
    "status": "Approved",
    "doctorName": "Dr. Anil Kumar",
    "rejectionReason": "Patient reported side effects to Albuterol. Awaiting patient follow-up for alternative medication.",
    "aiSummary": "Patient reported a persistent dry cough, wheezing, and shortness of breath, which has worsened over the last 3 days. Symptoms are more pronounced at night and during physical activity.",
    "aiDiagnosis": "Moderate Persistent Asthma",
    "medicalHistory": "Patient has a 5-year history of Hypertension (HTN) and Chronic Kidney Disease (CKD).",
    "transcript": "AI: Hello, this is SanjeevanAI. How can I help you today?\nPatient: Hello, I've been having trouble breathing for a few days.",
    "confidence": 95.5
  },
  "patient": {
    "name": "Priya Sharma",
    "age": 42,
    "gender": "Female",
    "height": "165 cm",
    "weight": "68 kg",
    "allergies": ["Pollen", "No Known Drug Allergies"]
  },
  "medications": [
    {"id": 1, "name": "Albuterol", "dosage": "90 mcg", "frequency": "2 puffs as needed", "duration": "30 Days", "isExisting": false},
    {"id": 2, "name": "Fluticasone", "dosage": "110 mcg", "frequency": "1 puff twice daily", "duration": "90 Days", "isExisting": false},
    {"id": 3, "name": "Metformin", "dosage": "500 mg", "frequency": "1 tablet twice daily", "duration": "Ongoing", "isExisting": true},
    {"id": 4, "name": "Melatonin", "dosage": "500 mg", "frequency": "1 tablet twice daily", "duration": "300 Days", "isExisting": false}
  ]
}"#;

pub fn record() -> ConsultationRecord {
    ConsultationRecord::from_json(RECORD_JSON).expect("fixture parses")
}

pub fn medication(id: u32, name: &str, is_existing: bool) -> Medication {
    Medication {
        id,
        name: name.into(),
        dosage: "500 mg".into(),
        frequency: "1 tablet twice daily".into(),
        duration: if is_existing { "Ongoing".into() } else { "30 Days".into() },
        is_existing,
    }
}

/// The P-98124 record with its medication list replaced.
pub fn record_with_medications(medications: Vec<Medication>) -> ConsultationRecord {
    let mut record = record();
    record.medications = Some(medications);
    record
}

pub fn record_with_status(status: PrescriptionStatus, reason: Option<&str>) -> ConsultationRecord {
    let mut record = record();
    record.details.status = status;
    record.details.rejection_reason = reason.map(str::to_string);
    record
}
