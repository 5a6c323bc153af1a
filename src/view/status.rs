//! Approval status card.

use serde::Serialize;

use crate::models::PrescriptionStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusIcon {
    CheckCircle,
    XCircle,
    Clock,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCard {
    pub icon: StatusIcon,
    pub color: &'static str,
    pub background: &'static str,
    pub title: &'static str,
    pub description: String,
    pub rejection: Option<RejectionNotice>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectionNotice {
    pub label: &'static str,
    pub reason: String,
}

pub fn status_card(
    status: PrescriptionStatus,
    doctor_name: &str,
    rejection_reason: Option<&str>,
) -> StatusCard {
    let (icon, color, background, title, description) = match status {
        PrescriptionStatus::Approved => (
            StatusIcon::CheckCircle,
            "text-green-500",
            "bg-green-500/10",
            "Prescription Approved",
            format!("This prescription was reviewed and approved by {doctor_name}."),
        ),
        PrescriptionStatus::Rejected => (
            StatusIcon::XCircle,
            "text-red-500",
            "bg-red-500/10",
            "Prescription Rejected",
            format!("This prescription was rejected by {doctor_name}."),
        ),
        PrescriptionStatus::Pending => (
            StatusIcon::Clock,
            "text-yellow-500",
            "bg-yellow-500/10",
            "Approval Pending",
            format!("This prescription is awaiting review by {doctor_name}."),
        ),
    };

    let rejection = match status {
        PrescriptionStatus::Rejected => rejection_reason
            .filter(|r| !r.trim().is_empty())
            .map(|reason| RejectionNotice {
                label: "Reason for Rejection:",
                reason: reason.to_string(),
            }),
        PrescriptionStatus::Approved | PrescriptionStatus::Pending => None,
    };

    StatusCard {
        icon,
        color,
        background,
        title,
        description,
        rejection,
    }
}
