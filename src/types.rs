//! Request bodies and response payloads for the Integrator routes.
//!
//! Response payloads use `#[serde(default)]` so that a partially populated
//! reply still decodes, and [`null_as_default`] on every non-optional field
//! because the service sends `null` for unset values. A body that is not JSON
//! at all yields an absent payload in the envelope instead.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Decode an explicit `null` the same way as a missing key.
///
/// # Errors
///
/// Fails only when the value is present, non-null, and not a `T`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// REQUEST BODIES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RegisterBody {
    pub name: String,
    pub id: String,
}

/// Body shared by `Search` and `SearchPeers`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchBody {
    pub query: String,
    pub count: Option<u32>,
    pub offset: Option<u32>,
    pub include_pictures: Option<bool>,
    pub include_activities: Option<bool>,
}

impl SearchBody {
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self { query: query.into(), ..Self::default() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MakeCallBody {
    pub destination: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Window {
    Configuration,
    CallHistory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowWindowBody {
    pub window: Window,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoActionBody {
    pub action_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PingBody {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateNewRecordBody {
    pub record_type_id: String,
}

/// `SaveRecord` body: the record type plus arbitrary field values, encoded
/// in insertion order after `RecordTypeId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveRecordBody {
    #[serde(rename = "RecordTypeId")]
    pub record_type_id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Body for every call-control action (hangup, hold, transfers, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallAction {
    pub call_id: String,
}

impl CallAction {
    #[must_use]
    pub fn new(call_id: impl Into<String>) -> Self {
        Self { call_id: call_id.into() }
    }
}

// =============================================================================
// SHARED PAYLOADS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HookState {
    Offline,
    DoNotDisturb,
    Dialtone,
    OnHook,
    OffHook,
    Ringing,
    Held,
}

/// A party to a call, or the owner of this seat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Contact {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub dial_string: String,
    #[serde(rename = "E164", skip_serializing_if = "Option::is_none")]
    pub e164: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub display_tel: String,
    #[serde(deserialize_with = "null_as_default")]
    pub display_name: String,
    #[serde(rename = "Type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_contact_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Call {
    #[serde(deserialize_with = "null_as_default")]
    pub start_time_utc: String,
    #[serde(deserialize_with = "null_as_default")]
    pub unique_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub caller_contact: Contact,
    #[serde(deserialize_with = "null_as_default")]
    pub called_contact: Contact,
    #[serde(deserialize_with = "null_as_default")]
    pub direction: String,
    #[serde(deserialize_with = "null_as_default")]
    pub call_state: String,
    #[serde(deserialize_with = "null_as_default")]
    pub call_actions: String,
    #[serde(deserialize_with = "null_as_default")]
    pub completed: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub participants: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ContactRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub unique_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub record_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub display_text: String,
    #[serde(deserialize_with = "null_as_default")]
    pub fields: Vec<ContactRecordField>,
    #[serde(deserialize_with = "null_as_default")]
    pub actions: Vec<ContactRecordAction>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ContactRecordField {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub value: Value,
    #[serde(deserialize_with = "null_as_default")]
    pub well_known_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub descriptor_id: String,
    #[serde(rename = "Type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ordinal: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ContactRecordAction {
    #[serde(deserialize_with = "null_as_default")]
    pub unique_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub action_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub is_multiple: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub use_default_image: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub display_text: String,
    #[serde(deserialize_with = "null_as_default")]
    pub special_kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<ActionIcon>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ActionIcon {
    #[serde(deserialize_with = "null_as_default")]
    pub mime_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub buffer64: String,
}

// =============================================================================
// ROUTE RESPONSES
// =============================================================================

/// One address book's results for `Search`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct AddinCollection {
    #[serde(deserialize_with = "null_as_default")]
    pub addin_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub records: Vec<ContactRecord>,
    pub exception_text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PeerRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub contact: Contact,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct AddressBook {
    #[serde(deserialize_with = "null_as_default")]
    pub priority: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub crm_addin_type_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub addin_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cached: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub enabled: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cache_frequency_minutes: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub is_persistent: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub has_modify_feature: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub has_cursor_feature: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub has_search_feature: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub has_activity_action_feature_create: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub has_activity_action_feature_show: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub has_action_feature_show: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub show_activity_on_call: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub create_activity_on_call_end: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub auto_pop_option: String,
    #[serde(rename = "Type", deserialize_with = "null_as_default")]
    pub addin_type: AddinType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct AddinType {
    #[serde(deserialize_with = "null_as_default")]
    pub addin_type_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub type_full_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub assembly_location: String,
    #[serde(deserialize_with = "null_as_default")]
    pub is_legacy: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_unrecognized: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_cloud_contacts: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub legacy_cursor_feature: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub legacy_search_feature: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub legacy_action_feature: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub legacy_activity_feature_create: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub legacy_activity_feature_show: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct License {
    #[serde(deserialize_with = "null_as_default")]
    pub key: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub value: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub expires_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct VersionInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub product_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub product_version: String,
    #[serde(deserialize_with = "null_as_default")]
    pub licenses: Vec<License>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct RecordType {
    #[serde(deserialize_with = "null_as_default")]
    pub related_record_types: Vec<Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub has_email: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub has_first_name_last_name: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub addin_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub has_contact_name: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub has_company_name: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub has_notes: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub can_show_in_edit_mode: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub can_create: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub unique_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub record_type_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub is_residential: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookStateReply {
    pub hook_state: HookState,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PingReply {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
