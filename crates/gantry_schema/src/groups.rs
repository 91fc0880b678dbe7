//! Field groups declared by the export application.
//!
//! Declaration order is load-bearing: it fixes the column order of brand-new
//! destination tables and the append order during reconciliation, so entries
//! here are only ever added at the end of their group. A field that changes
//! its warehouse name keeps its original identifier via
//! [`FieldSpec::renamed`]; a field that leaves the export moves to
//! [`deprecated_fields`] so tables that already materialized it stay
//! recognizable.

use crate::definition::{FieldGroup, FieldSpec};
use gantry_protocol::DataType;

/// The base set of web-analytics export fields.
pub fn base_export_fields() -> FieldGroup {
    FieldGroup::new(
        "base_export",
        vec![
            FieldSpec::new("IndvId", DataType::Int64),
            FieldSpec::new("UserId", DataType::Int64),
            FieldSpec::new("SessionId", DataType::Int64),
            FieldSpec::new("PageId", DataType::Int64),
            FieldSpec::new("UserCreated", DataType::Timestamp),
            FieldSpec::new("UserAppKey", DataType::String),
            FieldSpec::new("UserDisplayName", DataType::String),
            FieldSpec::new("UserEmail", DataType::String),
            FieldSpec::new("EventStart", DataType::Timestamp),
            FieldSpec::new("EventType", DataType::String),
            FieldSpec::new("EventSubType", DataType::String),
            FieldSpec::new("EventCustomName", DataType::String),
            FieldSpec::new("EventTargetText", DataType::String),
            FieldSpec::new("EventTargetSelector", DataType::String),
            FieldSpec::new("EventPageOffset", DataType::Int64),
            FieldSpec::new("EventSessionOffset", DataType::Int64),
            FieldSpec::new("EventModFrustrated", DataType::Int64),
            FieldSpec::new("EventModDead", DataType::Int64),
            FieldSpec::new("EventModError", DataType::Int64),
            FieldSpec::new("EventModSuspicious", DataType::Int64),
            FieldSpec::new("EventWebSourceFileUrl", DataType::String),
            FieldSpec::new("EventFirstInputDelay", DataType::Int64),
            FieldSpec::new("EventCumulativeLayoutShift", DataType::Float64),
            FieldSpec::new("SessionStart", DataType::Timestamp),
            FieldSpec::new("PageStart", DataType::Timestamp),
            FieldSpec::new("PageDuration", DataType::Int64),
            FieldSpec::new("PageActiveDuration", DataType::Int64),
            FieldSpec::new("PageUrl", DataType::String),
            FieldSpec::new("PageRefererUrl", DataType::String),
            FieldSpec::new("PageIp", DataType::String),
            FieldSpec::new("PageLatLong", DataType::String),
            // Renamed for clarity; old tables still carry a PageAgent column.
            FieldSpec::renamed("PageAgent", "PageUserAgent", DataType::String),
            FieldSpec::new("PageBrowser", DataType::String),
            FieldSpec::new("PageBrowserVersion", DataType::String),
            FieldSpec::new("PageDevice", DataType::String),
            FieldSpec::new("PagePlatform", DataType::String),
            FieldSpec::new("PageOperatingSystem", DataType::String),
            FieldSpec::new("PageScreenWidth", DataType::Int64),
            FieldSpec::new("PageScreenHeight", DataType::Int64),
            FieldSpec::new("PageViewportWidth", DataType::Int64),
            FieldSpec::new("PageViewportHeight", DataType::Int64),
            FieldSpec::new("PageNumInfos", DataType::Int64),
            FieldSpec::new("PageNumWarnings", DataType::Int64),
            FieldSpec::new("PageNumErrors", DataType::Int64),
            FieldSpec::new("PageClusterId", DataType::Int64),
            FieldSpec::new("PageMaxScrollDepthPercent", DataType::Int64),
            FieldSpec::new("LoadDomContentTime", DataType::Int64),
            FieldSpec::new("LoadEventTime", DataType::Int64),
            FieldSpec::new("LoadFirstPaintTime", DataType::Int64),
            FieldSpec::new("LoadLargestPaintTime", DataType::Int64),
            FieldSpec::new("ReqUrl", DataType::String),
            FieldSpec::new("ReqMethod", DataType::String),
            FieldSpec::new("ReqStatus", DataType::Int64),
            FieldSpec::new("CustomVars", DataType::String),
        ],
    )
}

/// Mobile-app extension fields, appended after the base group when the
/// export includes mobile events.
pub fn mobile_fields() -> FieldGroup {
    FieldGroup::new(
        "mobile",
        vec![
            FieldSpec::new("AppName", DataType::String),
            FieldSpec::new("AppPackageName", DataType::String),
            FieldSpec::new("AppDeviceModel", DataType::String),
            FieldSpec::new("AppDeviceVendor", DataType::String),
            FieldSpec::new("AppVersion", DataType::String),
            FieldSpec::new("AppOsVersion", DataType::String),
            FieldSpec::new("AppViewName", DataType::String),
            FieldSpec::new("EventMobileSourceFile", DataType::String),
        ],
    )
}

/// Fields dropped from the export. Still recognized in tables that carry
/// them, never added to tables that don't.
pub fn deprecated_fields() -> Vec<FieldSpec> {
    vec![FieldSpec::new("EventTargetSelectorTok", DataType::String)]
}
