//! Prescription view: page model, mount lifecycle, download trigger and
//! status card.

pub mod lifecycle;
pub mod page;
pub mod status;
pub mod trigger;

pub use lifecycle::{MountState, PendingActivation, RenderEnvironment, ViewLifecycle};
pub use page::{PrescriptionPage, PrescriptionPageView};
pub use status::{status_card, StatusCard, StatusIcon};
pub use trigger::{ClickOutcome, DownloadTrigger, TriggerView};
