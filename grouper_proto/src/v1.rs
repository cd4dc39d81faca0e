use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A request body understood by Grouper Web Services.
///
/// Every request travels wrapped in a single object keyed by
/// [`REQUEST_KEY`](GrouperRequest::REQUEST_KEY), and every reply comes back
/// wrapped in a single object keyed by
/// [`RESULTS_KEY`](GrouperRequest::RESULTS_KEY).
pub trait GrouperRequest: Serialize {
    /// Such as `WsRestFindGroupsLiteRequest`.
    const REQUEST_KEY: &'static str;
    /// Such as `WsFindGroupsResults`.
    const RESULTS_KEY: &'static str;
    /// The body found under the results key.
    type Results: DeserializeOwned;
}

macro_rules! grouper_request {
    ($req:ty, $req_key:literal => $results:ty, $results_key:literal) => {
        impl GrouperRequest for $req {
            const REQUEST_KEY: &'static str = $req_key;
            const RESULTS_KEY: &'static str = $results_key;
            type Results = $results;
        }
    };
}

/// Lite operations take their parameters flat; the others take lookup lists.
pub fn is_lite_request_key(key: &str) -> bool {
    key.contains("Lite")
}

/* ===== result codes ===== */

pub const SUCCESS: &str = "SUCCESS";
pub const GROUP_NOT_FOUND: &str = "GROUP_NOT_FOUND";
pub const SUCCESS_GROUP_NOT_FOUND: &str = "SUCCESS_GROUP_NOT_FOUND";
pub const STEM_NOT_FOUND: &str = "STEM_NOT_FOUND";
pub const SUBJECT_NOT_FOUND: &str = "SUBJECT_NOT_FOUND";
pub const INVALID_QUERY: &str = "INVALID_QUERY";
pub const INSUFFICIENT_PRIVILEGES: &str = "INSUFFICIENT_PRIVILEGES";
pub const PROBLEM_WITH_ASSIGNMENT: &str = "PROBLEM_WITH_ASSIGNMENT";
pub const PROBLEM_DELETING_MEMBERS: &str = "PROBLEM_DELETING_MEMBERS";
pub const PROBLEM_DELETING_GROUPS: &str = "PROBLEM_DELETING_GROUPS";
pub const IS_MEMBER: &str = "IS_MEMBER";
pub const IS_NOT_MEMBER: &str = "IS_NOT_MEMBER";

/// Message prefix of an `INVALID_QUERY` naming a stem that does not exist.
pub const CANT_FIND_STEM: &str = "Cant find stem";

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WsResultMetadata {
    pub success: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_code2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_message: Option<String>,
}

impl WsResultMetadata {
    pub fn is_success(&self) -> bool {
        self.success.as_deref() == Some("T")
    }

    pub fn result_code(&self) -> Option<&str> {
        self.result_code.as_deref()
    }
}

impl fmt::Display for WsResultMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[ success: {}, resultCode: {} ]",
            self.success.as_deref().unwrap_or("<none>"),
            self.result_code.as_deref().unwrap_or("<none>")
        )
    }
}

/* ===== request parameters ===== */

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueryFilterType {
    FindByGroupNameExact,
    FindByGroupNameApproximate,
    FindByStemName,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StemQueryFilterType {
    FindByStemName,
    FindByParentStemName,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StemScope {
    OneLevel,
    AllInSubtree,
}

impl StemScope {
    pub fn recursive(recursive: bool) -> Self {
        if recursive {
            StemScope::AllInSubtree
        } else {
            StemScope::OneLevel
        }
    }
}

/// Which memberships count: direct, inherited, or both.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MemberFilter {
    #[default]
    All,
    Immediate,
    Effective,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PrivilegeType {
    /// Privileges on groups.
    Access,
    /// Privileges on stems.
    Naming,
}

impl fmt::Display for PrivilegeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrivilegeType::Access => write!(f, "access"),
            PrivilegeType::Naming => write!(f, "naming"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AttributeAssignType {
    Group,
    Stem,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AttributeAssignOperation {
    AssignAttr,
    AddAttr,
    RemoveAttr,
    ReplaceAttrs,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AttributeValueOperation {
    AssignValue,
    AddValue,
    RemoveValue,
    ReplaceValues,
}

/* ===== lookups ===== */

/// A subject addressed by its opaque id or by an identifier the source
/// understands (such as a username).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
pub enum SubjectLookup {
    #[serde(rename = "subjectId")]
    Id(String),
    #[serde(rename = "subjectIdentifier")]
    Identifier(String),
}

impl SubjectLookup {
    pub fn id<S: Into<String>>(id: S) -> Self {
        SubjectLookup::Id(id.into())
    }

    pub fn identifier<S: Into<String>>(identifier: S) -> Self {
        SubjectLookup::Identifier(identifier.into())
    }

    pub fn value(&self) -> &str {
        match self {
            SubjectLookup::Id(v) | SubjectLookup::Identifier(v) => v.as_str(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WsGroupLookup {
    pub group_name: String,
}

impl WsGroupLookup {
    pub fn new(group_name: &str) -> Self {
        WsGroupLookup {
            group_name: group_name.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WsStemLookup {
    pub stem_name: String,
}

impl WsStemLookup {
    pub fn new(stem_name: &str) -> Self {
        WsStemLookup {
            stem_name: stem_name.to_string(),
        }
    }
}

/// Attribute definitions and definition names are both looked up by name.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct WsNameLookup {
    pub name: String,
}

impl WsNameLookup {
    pub fn new(name: &str) -> Self {
        WsNameLookup {
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct WsAttributeAssignLookup {
    pub uuid: String,
}

/* ===== entities as sent by the server ===== */

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WsGroup {
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub extension: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub display_extension: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub enabled: Option<String>,
    #[serde(default)]
    pub type_of_group: Option<String>,
    #[serde(default)]
    pub id_index: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<Map<String, Value>>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WsStem {
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub extension: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub display_extension: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub id_index: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct WsSubject {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub source_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_code: Option<String>,
    /// Echo of the identifier the subject was looked up by.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier_lookup: Option<String>,
    /// Positionally aligned with the response-wide `subjectAttributeNames`.
    #[serde(default)]
    pub attribute_values: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WsMembership {
    pub group_id: String,
    pub subject_id: String,
    pub subject_source_id: String,
    pub membership_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub membership_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WsGrouperPrivilegeResult {
    #[serde(default)]
    pub ws_group: Option<WsGroup>,
    #[serde(default)]
    pub ws_stem: Option<WsStem>,
    pub allowed: String,
    pub revokable: String,
    pub owner_subject: WsSubject,
    pub ws_subject: WsSubject,
    pub privilege_type: String,
    pub privilege_name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct WsAttributeDef {
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub extension: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub attribute_def_type: Option<String>,
    #[serde(default)]
    pub value_type: Option<String>,
    #[serde(default)]
    pub assign_to_attribute_def: Option<String>,
    #[serde(default)]
    pub assign_to_attribute_def_assignment: Option<String>,
    #[serde(default)]
    pub assign_to_stem: Option<String>,
    #[serde(default)]
    pub assign_to_stem_assignment: Option<String>,
    #[serde(default)]
    pub assign_to_group: Option<String>,
    #[serde(default)]
    pub assign_to_group_assignment: Option<String>,
    #[serde(default)]
    pub assign_to_member: Option<String>,
    #[serde(default)]
    pub assign_to_member_assignment: Option<String>,
    #[serde(default)]
    pub assign_to_effective_membership: Option<String>,
    #[serde(default)]
    pub assign_to_effective_membership_assignment: Option<String>,
    #[serde(default)]
    pub assign_to_immediate_membership: Option<String>,
    #[serde(default)]
    pub assign_to_immediate_membership_assignment: Option<String>,
    #[serde(default)]
    pub multi_assignable: Option<String>,
    #[serde(default)]
    pub multi_valued: Option<String>,
    #[serde(default)]
    pub id_index: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WsAttributeDefName {
    pub uuid: String,
    pub name: String,
    pub attribute_def_id: String,
    #[serde(default)]
    pub extension: String,
    #[serde(default)]
    pub display_extension: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub id_index: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WsAttributeAssignValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub value_system: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WsAttributeAssign {
    pub id: String,
    pub attribute_def_id: String,
    pub attribute_def_name_id: String,
    #[serde(default)]
    pub attribute_assign_delegatable: Option<String>,
    #[serde(default)]
    pub disallowed: Option<String>,
    #[serde(default)]
    pub enabled: Option<String>,
    #[serde(default)]
    pub attribute_assign_type: String,
    #[serde(default)]
    pub created_on: Option<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub attribute_assign_action_id: Option<String>,
    #[serde(default)]
    pub attribute_assign_action_name: Option<String>,
    #[serde(default)]
    pub attribute_assign_action_type: Option<String>,
    #[serde(default)]
    pub owner_group_id: Option<String>,
    #[serde(default)]
    pub owner_stem_id: Option<String>,
    #[serde(default)]
    pub ws_attribute_assign_values: Vec<WsAttributeAssignValue>,
}

/* ===== groups ===== */

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FindGroupsLiteRequest {
    pub query_filter_type: QueryFilterType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stem_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_stem_name_scope: Option<StemScope>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        default,
        with = "crate::utils::tf_option"
    )]
    pub include_group_detail: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FindGroupsResults {
    pub result_metadata: WsResultMetadata,
    #[serde(default)]
    pub group_results: Vec<WsGroup>,
}

grouper_request!(FindGroupsLiteRequest, "WsRestFindGroupsLiteRequest" => FindGroupsResults, "WsFindGroupsResults");

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WsGroupToSaveBody {
    pub name: String,
    pub display_extension: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<Map<String, Value>>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WsGroupToSave {
    pub ws_group: WsGroupToSaveBody,
    pub ws_group_lookup: WsGroupLookup,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroupSaveRequest {
    pub ws_group_to_saves: Vec<WsGroupToSave>,
    #[serde(with = "crate::utils::tf")]
    pub include_group_detail: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WsGroupSaveResult {
    pub ws_group: WsGroup,
    #[serde(default)]
    pub result_metadata: WsResultMetadata,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroupSaveResults {
    pub result_metadata: WsResultMetadata,
    #[serde(default)]
    pub results: Vec<WsGroupSaveResult>,
}

grouper_request!(GroupSaveRequest, "WsRestGroupSaveRequest" => GroupSaveResults, "WsGroupSaveResults");

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroupDeleteRequest {
    pub ws_group_lookups: Vec<WsGroupLookup>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WsItemResult {
    pub result_metadata: WsResultMetadata,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroupDeleteResults {
    pub result_metadata: WsResultMetadata,
    #[serde(default)]
    pub results: Vec<WsItemResult>,
}

grouper_request!(GroupDeleteRequest, "WsRestGroupDeleteRequest" => GroupDeleteResults, "WsGroupDeleteResults");

/* ===== stems ===== */

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FindStemsLiteRequest {
    pub stem_query_filter_type: StemQueryFilterType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stem_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_stem_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_stem_name_scope: Option<StemScope>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FindStemsResults {
    pub result_metadata: WsResultMetadata,
    #[serde(default)]
    pub stem_results: Vec<WsStem>,
}

grouper_request!(FindStemsLiteRequest, "WsRestFindStemsLiteRequest" => FindStemsResults, "WsFindStemsResults");

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WsStemToSaveBody {
    pub name: String,
    pub display_extension: String,
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WsStemToSave {
    pub ws_stem: WsStemToSaveBody,
    pub ws_stem_lookup: WsStemLookup,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StemSaveRequest {
    pub ws_stem_to_saves: Vec<WsStemToSave>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WsStemSaveResult {
    pub ws_stem: WsStem,
    #[serde(default)]
    pub result_metadata: WsResultMetadata,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StemSaveResults {
    pub result_metadata: WsResultMetadata,
    #[serde(default)]
    pub results: Vec<WsStemSaveResult>,
}

grouper_request!(StemSaveRequest, "WsRestStemSaveRequest" => StemSaveResults, "WsStemSaveResults");

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StemDeleteRequest {
    pub ws_stem_lookups: Vec<WsStemLookup>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StemDeleteResults {
    pub result_metadata: WsResultMetadata,
    #[serde(default)]
    pub results: Vec<WsItemResult>,
}

grouper_request!(StemDeleteRequest, "WsRestStemDeleteRequest" => StemDeleteResults, "WsStemDeleteResults");

/* ===== subjects ===== */

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GetSubjectsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ws_subject_lookups: Option<Vec<SubjectLookup>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_string: Option<String>,
    #[serde(with = "crate::utils::tf")]
    pub include_subject_detail: bool,
    pub subject_attribute_names: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GetSubjectsResults {
    pub result_metadata: WsResultMetadata,
    #[serde(default)]
    pub subject_attribute_names: Vec<String>,
    #[serde(default)]
    pub ws_subjects: Vec<WsSubject>,
}

grouper_request!(GetSubjectsRequest, "WsRestGetSubjectsRequest" => GetSubjectsResults, "WsGetSubjectsResults");

/* ===== memberships ===== */

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GetMembershipsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ws_group_lookups: Option<Vec<WsGroupLookup>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ws_subject_lookups: Option<Vec<SubjectLookup>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_attribute_names: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_filter: Option<MemberFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ws_stem_lookup: Option<WsStemLookup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stem_scope: Option<StemScope>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        default,
        with = "crate::utils::tf_option"
    )]
    pub include_subject_detail: Option<bool>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        default,
        with = "crate::utils::tf_option"
    )]
    pub include_group_detail: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GetMembershipsResults {
    pub result_metadata: WsResultMetadata,
    #[serde(default)]
    pub subject_attribute_names: Vec<String>,
    /// Absent when the requested groups exist but have no memberships.
    #[serde(default)]
    pub ws_groups: Option<Vec<WsGroup>>,
    #[serde(default)]
    pub ws_memberships: Vec<WsMembership>,
    #[serde(default)]
    pub ws_subjects: Vec<WsSubject>,
}

grouper_request!(GetMembershipsRequest, "WsRestGetMembershipsRequest" => GetMembershipsResults, "WsGetMembershipsResults");

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GetMembersRequest {
    pub ws_group_lookups: Vec<WsGroupLookup>,
    pub subject_attribute_names: Vec<String>,
    pub member_filter: MemberFilter,
    #[serde(with = "crate::utils::tf")]
    pub include_subject_detail: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WsGetMembersResult {
    pub result_metadata: WsResultMetadata,
    pub ws_group: WsGroup,
    #[serde(default)]
    pub ws_subjects: Vec<WsSubject>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GetMembersResults {
    pub result_metadata: WsResultMetadata,
    #[serde(default)]
    pub subject_attribute_names: Vec<String>,
    #[serde(default)]
    pub results: Vec<WsGetMembersResult>,
}

grouper_request!(GetMembersRequest, "WsRestGetMembersRequest" => GetMembersResults, "WsGetMembersResults");

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HasMemberRequest {
    pub subject_lookups: Vec<SubjectLookup>,
    pub member_filter: MemberFilter,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WsHasMemberResult {
    pub result_metadata: WsResultMetadata,
    pub ws_subject: WsSubject,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HasMemberResults {
    pub result_metadata: WsResultMetadata,
    #[serde(default)]
    pub results: Vec<WsHasMemberResult>,
}

grouper_request!(HasMemberRequest, "WsRestHasMemberRequest" => HasMemberResults, "WsHasMemberResults");

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AddMemberRequest {
    pub subject_lookups: Vec<SubjectLookup>,
    pub ws_group_lookup: WsGroupLookup,
    #[serde(with = "crate::utils::tf")]
    pub replace_all_existing: bool,
    #[serde(with = "crate::utils::tf")]
    pub include_group_detail: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AddMemberResults {
    pub result_metadata: WsResultMetadata,
    pub ws_group_assigned: WsGroup,
    #[serde(default)]
    pub results: Vec<WsItemResult>,
}

grouper_request!(AddMemberRequest, "WsRestAddMemberRequest" => AddMemberResults, "WsAddMemberResults");

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteMemberRequest {
    pub subject_lookups: Vec<SubjectLookup>,
    pub ws_group_lookup: WsGroupLookup,
    #[serde(with = "crate::utils::tf")]
    pub include_group_detail: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteMemberResults {
    pub result_metadata: WsResultMetadata,
    pub ws_group: WsGroup,
    #[serde(default)]
    pub results: Vec<WsItemResult>,
}

grouper_request!(DeleteMemberRequest, "WsRestDeleteMemberRequest" => DeleteMemberResults, "WsDeleteMemberResults");

/* ===== privileges ===== */

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssignGrouperPrivilegesLiteRequest {
    #[serde(with = "crate::utils::tf")]
    pub allowed: bool,
    pub privilege_name: String,
    pub privilege_type: PrivilegeType,
    pub subject_identifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stem_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssignGrouperPrivilegesLiteResult {
    pub result_metadata: WsResultMetadata,
}

grouper_request!(AssignGrouperPrivilegesLiteRequest, "WsRestAssignGrouperPrivilegesLiteRequest" => AssignGrouperPrivilegesLiteResult, "WsAssignGrouperPrivilegesLiteResult");

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssignGrouperPrivilegesRequest {
    pub ws_subject_lookups: Vec<SubjectLookup>,
    pub privilege_names: Vec<String>,
    pub privilege_type: PrivilegeType,
    #[serde(with = "crate::utils::tf")]
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ws_group_lookup: Option<WsGroupLookup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ws_stem_lookup: Option<WsStemLookup>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssignGrouperPrivilegesResults {
    pub result_metadata: WsResultMetadata,
    #[serde(default)]
    pub results: Vec<WsItemResult>,
}

grouper_request!(AssignGrouperPrivilegesRequest, "WsRestAssignGrouperPrivilegesRequest" => AssignGrouperPrivilegesResults, "WsAssignGrouperPrivilegesResults");

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GetGrouperPrivilegesLiteRequest {
    #[serde(with = "crate::utils::tf")]
    pub include_subject_detail: bool,
    #[serde(with = "crate::utils::tf")]
    pub include_group_detail: bool,
    /// Comma separated.
    pub subject_attribute_names: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stem_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privilege_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privilege_type: Option<PrivilegeType>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GetGrouperPrivilegesLiteResult {
    pub result_metadata: WsResultMetadata,
    #[serde(default)]
    pub subject_attribute_names: Vec<String>,
    #[serde(default)]
    pub privilege_results: Vec<WsGrouperPrivilegeResult>,
}

grouper_request!(GetGrouperPrivilegesLiteRequest, "WsRestGetGrouperPrivilegesLiteRequest" => GetGrouperPrivilegesLiteResult, "WsGetGrouperPrivilegesLiteResult");

/* ===== attributes ===== */

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssignAttributesRequest {
    pub attribute_assign_type: AttributeAssignType,
    pub attribute_assign_operation: AttributeAssignOperation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ws_owner_group_lookups: Option<Vec<WsGroupLookup>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ws_owner_stem_lookups: Option<Vec<WsStemLookup>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ws_attribute_assign_lookups: Option<Vec<WsAttributeAssignLookup>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ws_attribute_def_name_lookups: Option<Vec<WsNameLookup>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<WsAttributeAssignValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_assign_value_operation: Option<AttributeValueOperation>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WsAssignAttributeResult {
    #[serde(default)]
    pub ws_attribute_assigns: Vec<WsAttributeAssign>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssignAttributesResults {
    pub result_metadata: WsResultMetadata,
    #[serde(default)]
    pub ws_attribute_defs: Vec<WsAttributeDef>,
    #[serde(default)]
    pub ws_attribute_def_names: Vec<WsAttributeDefName>,
    #[serde(default)]
    pub ws_groups: Vec<WsGroup>,
    #[serde(default)]
    pub ws_stems: Vec<WsStem>,
    #[serde(default)]
    pub ws_attribute_assign_results: Vec<WsAssignAttributeResult>,
}

grouper_request!(AssignAttributesRequest, "WsRestAssignAttributesRequest" => AssignAttributesResults, "WsAssignAttributesResults");

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GetAttributeAssignmentsRequest {
    pub attribute_assign_type: AttributeAssignType,
    #[serde(with = "crate::utils::tf")]
    pub include_assignments_on_assignments: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ws_owner_group_lookups: Option<Vec<WsGroupLookup>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ws_owner_stem_lookups: Option<Vec<WsStemLookup>>,
    pub ws_attribute_def_name_lookups: Vec<WsNameLookup>,
    pub ws_attribute_def_lookups: Vec<WsNameLookup>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GetAttributeAssignmentsResults {
    pub result_metadata: WsResultMetadata,
    #[serde(default)]
    pub ws_attribute_assigns: Option<Vec<WsAttributeAssign>>,
    #[serde(default)]
    pub ws_attribute_defs: Vec<WsAttributeDef>,
    #[serde(default)]
    pub ws_attribute_def_names: Vec<WsAttributeDefName>,
    #[serde(default)]
    pub ws_groups: Vec<WsGroup>,
    #[serde(default)]
    pub ws_stems: Vec<WsStem>,
}

grouper_request!(GetAttributeAssignmentsRequest, "WsRestGetAttributeAssignmentsRequest" => GetAttributeAssignmentsResults, "WsGetAttributeAssignmentsResults");

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FindAttributeDefsLiteRequest {
    pub name_of_attribute_def: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        default,
        with = "crate::utils::tf_option"
    )]
    pub split_scope: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_stem_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stem_scope: Option<StemScope>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FindAttributeDefsResults {
    pub result_metadata: WsResultMetadata,
    #[serde(default)]
    pub attribute_def_results: Vec<WsAttributeDef>,
}

grouper_request!(FindAttributeDefsLiteRequest, "WsRestFindAttributeDefsLiteRequest" => FindAttributeDefsResults, "WsFindAttributeDefsResults");

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct FindAttributeDefNamesLiteRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_def_name_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_of_attribute_def: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FindAttributeDefNamesResults {
    pub result_metadata: WsResultMetadata,
    #[serde(default)]
    pub attribute_def_name_results: Vec<WsAttributeDefName>,
    #[serde(default)]
    pub attribute_defs: Vec<WsAttributeDef>,
}

grouper_request!(FindAttributeDefNamesLiteRequest, "WsRestFindAttributeDefNamesLiteRequest" => FindAttributeDefNamesResults, "WsFindAttributeDefNamesResults");
