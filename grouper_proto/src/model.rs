//! Typed records hydrated from Grouper replies.
//!
//! Hydration here is pure: it never issues a request. Replacing a
//! group-sourced subject with its full [`Group`] needs a second lookup and is
//! done by the client.

use crate::utils::parse_flag;
use crate::v1::{
    WsAttributeAssign, WsAttributeDef, WsAttributeDefName, WsGroup, WsGrouperPrivilegeResult,
    WsMembership, WsStem, WsSubject,
};
use crate::GROUP_SOURCE_ID;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

pub use crate::v1::{AttributeAssignType, PrivilegeType};

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum HydrationError {
    #[error("subject {id} has {values} attribute values for {names} attribute names")]
    AttributeCountMismatch {
        id: String,
        names: usize,
        values: usize,
    },
    #[error("privilege has neither a group nor a stem target")]
    PrivilegeTargetMissing,
    #[error("privilege has both a group and a stem target")]
    PrivilegeTargetAmbiguous,
    #[error("unknown privilege type {0:?}")]
    UnknownPrivilegeType(String),
    #[error("unknown membership type {0:?}")]
    UnknownMembershipType(String),
    #[error("reply references {kind} {id} which it does not include")]
    UnknownReference { kind: &'static str, id: String },
    #[error("invalid flag {value:?} in field {field}")]
    InvalidFlag { field: &'static str, value: String },
}

fn flag_field(field: &'static str, value: Option<&str>) -> Result<bool, HydrationError> {
    match value {
        None => Ok(false),
        Some(v) => parse_flag(v).ok_or_else(|| HydrationError::InvalidFlag {
            field,
            value: v.to_string(),
        }),
    }
}

/// Pair the reply-wide attribute names with one subject's values.
///
/// A subject sent without values has an empty map; values of any other length
/// than the names are rejected.
fn zip_attributes(
    ws: &WsSubject,
    attribute_names: &[String],
) -> Result<BTreeMap<String, String>, HydrationError> {
    if ws.attribute_values.is_empty() {
        return Ok(BTreeMap::new());
    }
    if ws.attribute_values.len() != attribute_names.len() {
        return Err(HydrationError::AttributeCountMismatch {
            id: ws.id.clone(),
            names: attribute_names.len(),
            values: ws.attribute_values.len(),
        });
    }
    Ok(attribute_names
        .iter()
        .cloned()
        .zip(ws.attribute_values.iter().cloned())
        .collect())
}

/// Any entity that can be a member or privilege holder.
///
/// Two subjects are equal when their ids are equal, whatever else differs.
#[derive(Debug, Clone)]
pub struct Subject {
    pub id: String,
    pub description: String,
    pub universal_identifier: String,
    pub source_id: String,
    pub name: String,
}

impl PartialEq for Subject {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Subject {}

impl Hash for Subject {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

impl Subject {
    pub fn from_ws(
        ws: &WsSubject,
        attribute_names: &[String],
        universal_identifier_attr: &str,
    ) -> Result<Self, HydrationError> {
        let attrs = zip_attributes(ws, attribute_names)?;
        Ok(Self::from_parts(ws, &attrs, universal_identifier_attr))
    }

    fn from_parts(
        ws: &WsSubject,
        attrs: &BTreeMap<String, String>,
        universal_identifier_attr: &str,
    ) -> Self {
        let universal_identifier = if ws.source_id == GROUP_SOURCE_ID {
            attrs.get("name").cloned().unwrap_or_else(|| ws.name.clone())
        } else {
            attrs
                .get(universal_identifier_attr)
                .cloned()
                .unwrap_or_default()
        };
        Subject {
            id: ws.id.clone(),
            description: attrs.get("description").cloned().unwrap_or_default(),
            universal_identifier,
            source_id: ws.source_id.clone(),
            name: ws.name.clone(),
        }
    }

    pub fn is_group(&self) -> bool {
        self.source_id == GROUP_SOURCE_ID
    }
}

/// A non-group subject, with every attribute the server returned for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub subject: Subject,
    pub attributes: BTreeMap<String, String>,
}

impl Person {
    pub fn from_ws(
        ws: &WsSubject,
        attribute_names: &[String],
        universal_identifier_attr: &str,
    ) -> Result<Self, HydrationError> {
        let attributes = zip_attributes(ws, attribute_names)?;
        let subject = Subject::from_parts(ws, &attributes, universal_identifier_attr);
        Ok(Person {
            subject,
            attributes,
        })
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub extension: String,
    pub display_name: String,
    pub display_extension: String,
    pub description: String,
    pub enabled: bool,
    pub type_of_group: Option<String>,
    pub id_index: Option<String>,
    pub detail: Option<Map<String, Value>>,
}

impl PartialEq for Group {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Group {}

impl Hash for Group {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Group {
    pub fn from_ws(ws: &WsGroup) -> Result<Self, HydrationError> {
        Ok(Group {
            id: ws.uuid.clone(),
            name: ws.name.clone(),
            extension: ws.extension.clone(),
            display_name: ws.display_name.clone(),
            display_extension: ws.display_extension.clone(),
            description: ws.description.clone().unwrap_or_default(),
            enabled: flag_field("enabled", ws.enabled.as_deref())?,
            type_of_group: ws.type_of_group.clone(),
            id_index: ws.id_index.clone(),
            detail: ws.detail.clone(),
        })
    }

    /// This group as a member or privilege holder.
    pub fn as_subject(&self) -> Subject {
        Subject {
            id: self.id.clone(),
            description: self.description.clone(),
            universal_identifier: self.name.clone(),
            source_id: GROUP_SOURCE_ID.to_string(),
            name: self.name.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Stem {
    pub id: String,
    pub name: String,
    pub extension: String,
    pub display_name: String,
    pub display_extension: String,
    pub description: String,
    pub id_index: Option<String>,
}

impl PartialEq for Stem {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Stem {}

impl Hash for Stem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}

impl fmt::Display for Stem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl From<&WsStem> for Stem {
    fn from(ws: &WsStem) -> Self {
        Stem {
            id: ws.uuid.clone(),
            name: ws.name.clone(),
            extension: ws.extension.clone(),
            display_name: ws.display_name.clone(),
            display_extension: ws.display_extension.clone(),
            description: ws.description.clone().unwrap_or_default(),
            id_index: ws.id_index.clone(),
        }
    }
}

/// A subject as it comes out of a member or subject lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedSubject {
    Person(Person),
    Group(Group),
    /// A group-sourced subject that was not looked up as a full group.
    Subject(Subject),
}

impl ResolvedSubject {
    pub fn id(&self) -> &str {
        match self {
            ResolvedSubject::Person(p) => p.subject.id.as_str(),
            ResolvedSubject::Group(g) => g.id.as_str(),
            ResolvedSubject::Subject(s) => s.id.as_str(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ResolvedSubject::Person(p) => p.subject.name.as_str(),
            ResolvedSubject::Group(g) => g.name.as_str(),
            ResolvedSubject::Subject(s) => s.name.as_str(),
        }
    }

    pub fn to_subject(&self) -> Subject {
        match self {
            ResolvedSubject::Person(p) => p.subject.clone(),
            ResolvedSubject::Group(g) => g.as_subject(),
            ResolvedSubject::Subject(s) => s.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrivilegeTarget {
    Group(Group),
    Stem(Stem),
}

impl PrivilegeTarget {
    pub fn name(&self) -> &str {
        match self {
            PrivilegeTarget::Group(g) => g.name.as_str(),
            PrivilegeTarget::Stem(s) => s.name.as_str(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Privilege {
    pub target: PrivilegeTarget,
    pub allowed: bool,
    pub revokable: bool,
    pub owner_subject: Subject,
    pub subject: Subject,
    pub privilege_name: String,
    pub privilege_type: PrivilegeType,
}

impl Privilege {
    pub fn from_ws(
        ws: &WsGrouperPrivilegeResult,
        attribute_names: &[String],
        universal_identifier_attr: &str,
    ) -> Result<Self, HydrationError> {
        let target = match (&ws.ws_group, &ws.ws_stem) {
            (Some(g), None) => PrivilegeTarget::Group(Group::from_ws(g)?),
            (None, Some(s)) => PrivilegeTarget::Stem(Stem::from(s)),
            (Some(_), Some(_)) => return Err(HydrationError::PrivilegeTargetAmbiguous),
            (None, None) => return Err(HydrationError::PrivilegeTargetMissing),
        };
        let privilege_type = match ws.privilege_type.as_str() {
            "access" => PrivilegeType::Access,
            "naming" => PrivilegeType::Naming,
            other => return Err(HydrationError::UnknownPrivilegeType(other.to_string())),
        };
        Ok(Privilege {
            target,
            allowed: flag_field("allowed", Some(ws.allowed.as_str()))?,
            revokable: flag_field("revokable", Some(ws.revokable.as_str()))?,
            owner_subject: Subject::from_ws(
                &ws.owner_subject,
                attribute_names,
                universal_identifier_attr,
            )?,
            subject: Subject::from_ws(&ws.ws_subject, attribute_names, universal_identifier_attr)?,
            privilege_name: ws.privilege_name.clone(),
            privilege_type,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberType {
    Person,
    Group,
}

impl MemberType {
    pub fn from_source_id(source_id: &str) -> Self {
        if source_id == GROUP_SOURCE_ID {
            MemberType::Group
        } else {
            MemberType::Person
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MembershipType {
    /// `immediate` on the wire.
    Direct,
    /// `effective` on the wire.
    Indirect,
}

impl MembershipType {
    pub fn from_wire(value: &str) -> Result<Self, HydrationError> {
        match value {
            "immediate" => Ok(MembershipType::Direct),
            "effective" => Ok(MembershipType::Indirect),
            other => Err(HydrationError::UnknownMembershipType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub member: ResolvedSubject,
    pub member_type: MemberType,
    pub membership_type: MembershipType,
}

impl Membership {
    pub fn new(ws: &WsMembership, member: ResolvedSubject) -> Result<Self, HydrationError> {
        Ok(Membership {
            member,
            member_type: MemberType::from_source_id(&ws.subject_source_id),
            membership_type: MembershipType::from_wire(&ws.membership_type)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HasMember {
    IsMember,
    IsNotMember,
    SubjectNotFound,
}

#[derive(Debug, Clone)]
pub struct AttributeDefinition {
    pub id: String,
    pub name: String,
    pub extension: String,
    pub description: String,
    pub attribute_def_type: Option<String>,
    pub value_type: Option<String>,
    pub assign_to_attribute_def: bool,
    pub assign_to_attribute_def_assignment: bool,
    pub assign_to_stem: bool,
    pub assign_to_stem_assignment: bool,
    pub assign_to_group: bool,
    pub assign_to_group_assignment: bool,
    pub assign_to_member: bool,
    pub assign_to_member_assignment: bool,
    pub assign_to_effective_membership: bool,
    pub assign_to_effective_membership_assignment: bool,
    pub assign_to_immediate_membership: bool,
    pub assign_to_immediate_membership_assignment: bool,
    pub multi_assignable: bool,
    pub multi_valued: bool,
    pub id_index: Option<String>,
}

impl PartialEq for AttributeDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for AttributeDefinition {}

impl AttributeDefinition {
    pub fn from_ws(ws: &WsAttributeDef) -> Result<Self, HydrationError> {
        Ok(AttributeDefinition {
            id: ws.uuid.clone(),
            name: ws.name.clone(),
            extension: ws.extension.clone(),
            description: ws.description.clone().unwrap_or_default(),
            attribute_def_type: ws.attribute_def_type.clone(),
            value_type: ws.value_type.clone(),
            assign_to_attribute_def: flag_field(
                "assignToAttributeDef",
                ws.assign_to_attribute_def.as_deref(),
            )?,
            assign_to_attribute_def_assignment: flag_field(
                "assignToAttributeDefAssignment",
                ws.assign_to_attribute_def_assignment.as_deref(),
            )?,
            assign_to_stem: flag_field("assignToStem", ws.assign_to_stem.as_deref())?,
            assign_to_stem_assignment: flag_field(
                "assignToStemAssignment",
                ws.assign_to_stem_assignment.as_deref(),
            )?,
            assign_to_group: flag_field("assignToGroup", ws.assign_to_group.as_deref())?,
            assign_to_group_assignment: flag_field(
                "assignToGroupAssignment",
                ws.assign_to_group_assignment.as_deref(),
            )?,
            assign_to_member: flag_field("assignToMember", ws.assign_to_member.as_deref())?,
            assign_to_member_assignment: flag_field(
                "assignToMemberAssignment",
                ws.assign_to_member_assignment.as_deref(),
            )?,
            assign_to_effective_membership: flag_field(
                "assignToEffectiveMembership",
                ws.assign_to_effective_membership.as_deref(),
            )?,
            assign_to_effective_membership_assignment: flag_field(
                "assignToEffectiveMembershipAssignment",
                ws.assign_to_effective_membership_assignment.as_deref(),
            )?,
            assign_to_immediate_membership: flag_field(
                "assignToImmediateMembership",
                ws.assign_to_immediate_membership.as_deref(),
            )?,
            assign_to_immediate_membership_assignment: flag_field(
                "assignToImmediateMembershipAssignment",
                ws.assign_to_immediate_membership_assignment.as_deref(),
            )?,
            multi_assignable: flag_field("multiAssignable", ws.multi_assignable.as_deref())?,
            multi_valued: flag_field("multiValued", ws.multi_valued.as_deref())?,
            id_index: ws.id_index.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDefinitionName {
    pub id: String,
    pub name: String,
    pub extension: String,
    pub display_extension: String,
    pub display_name: String,
    pub description: String,
    pub id_index: Option<String>,
    pub attribute_definition: AttributeDefinition,
}

impl AttributeDefinitionName {
    pub fn from_ws(ws: &WsAttributeDefName, attribute_definition: AttributeDefinition) -> Self {
        AttributeDefinitionName {
            id: ws.uuid.clone(),
            name: ws.name.clone(),
            extension: ws.extension.clone(),
            display_extension: ws.display_extension.clone(),
            display_name: ws.display_name.clone(),
            description: ws.description.clone().unwrap_or_default(),
            id_index: ws.id_index.clone(),
            attribute_definition,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeOwner {
    Group(Group),
    Stem(Stem),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeAssignmentValue {
    pub id: Option<String>,
    pub value_system: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeAssignment {
    pub id: String,
    pub delegatable: Option<String>,
    pub disallowed: bool,
    pub enabled: bool,
    pub attribute_assign_type: String,
    pub created_on: Option<String>,
    pub last_updated: Option<String>,
    pub action_id: Option<String>,
    pub action_name: Option<String>,
    pub action_type: Option<String>,
    pub owner: AttributeOwner,
    pub values: Vec<AttributeAssignmentValue>,
    pub attribute_definition: AttributeDefinition,
    pub attribute_definition_name: AttributeDefinitionName,
}

/// The entities an attribute reply refers to by id, hydrated once.
#[derive(Debug, Default)]
pub struct AttributeCatalog {
    definitions: BTreeMap<String, AttributeDefinition>,
    names: BTreeMap<String, AttributeDefinitionName>,
    groups: BTreeMap<String, Group>,
    stems: BTreeMap<String, Stem>,
}

impl AttributeCatalog {
    pub fn new(
        ws_defs: &[WsAttributeDef],
        ws_def_names: &[WsAttributeDefName],
        ws_groups: &[WsGroup],
        ws_stems: &[WsStem],
    ) -> Result<Self, HydrationError> {
        let definitions = ws_defs
            .iter()
            .map(|d| AttributeDefinition::from_ws(d).map(|def| (def.id.clone(), def)))
            .collect::<Result<BTreeMap<_, _>, _>>()?;
        let names = ws_def_names
            .iter()
            .map(|n| {
                let def = definitions.get(&n.attribute_def_id).cloned().ok_or_else(|| {
                    HydrationError::UnknownReference {
                        kind: "attribute definition",
                        id: n.attribute_def_id.clone(),
                    }
                })?;
                Ok((n.uuid.clone(), AttributeDefinitionName::from_ws(n, def)))
            })
            .collect::<Result<BTreeMap<_, _>, HydrationError>>()?;
        let groups = ws_groups
            .iter()
            .map(|g| Group::from_ws(g).map(|group| (group.id.clone(), group)))
            .collect::<Result<BTreeMap<_, _>, _>>()?;
        let stems = ws_stems
            .iter()
            .map(|s| (s.uuid.clone(), Stem::from(s)))
            .collect();
        Ok(AttributeCatalog {
            definitions,
            names,
            groups,
            stems,
        })
    }

    pub fn definition_name(&self, id: &str) -> Option<&AttributeDefinitionName> {
        self.names.get(id)
    }

    fn owner(
        &self,
        ws: &WsAttributeAssign,
        owner_type: AttributeAssignType,
    ) -> Result<AttributeOwner, HydrationError> {
        match owner_type {
            AttributeAssignType::Group => {
                let id = ws.owner_group_id.clone().unwrap_or_default();
                self.groups
                    .get(&id)
                    .cloned()
                    .map(AttributeOwner::Group)
                    .ok_or(HydrationError::UnknownReference { kind: "group", id })
            }
            AttributeAssignType::Stem => {
                let id = ws.owner_stem_id.clone().unwrap_or_default();
                self.stems
                    .get(&id)
                    .cloned()
                    .map(AttributeOwner::Stem)
                    .ok_or(HydrationError::UnknownReference { kind: "stem", id })
            }
        }
    }

    pub fn assignment(
        &self,
        ws: &WsAttributeAssign,
        owner_type: AttributeAssignType,
    ) -> Result<AttributeAssignment, HydrationError> {
        let attribute_definition = self
            .definitions
            .get(&ws.attribute_def_id)
            .cloned()
            .ok_or_else(|| HydrationError::UnknownReference {
                kind: "attribute definition",
                id: ws.attribute_def_id.clone(),
            })?;
        let attribute_definition_name = self
            .names
            .get(&ws.attribute_def_name_id)
            .cloned()
            .ok_or_else(|| HydrationError::UnknownReference {
                kind: "attribute definition name",
                id: ws.attribute_def_name_id.clone(),
            })?;
        Ok(AttributeAssignment {
            id: ws.id.clone(),
            delegatable: ws.attribute_assign_delegatable.clone(),
            disallowed: flag_field("disallowed", ws.disallowed.as_deref())?,
            enabled: flag_field("enabled", ws.enabled.as_deref())?,
            attribute_assign_type: ws.attribute_assign_type.clone(),
            created_on: ws.created_on.clone(),
            last_updated: ws.last_updated.clone(),
            action_id: ws.attribute_assign_action_id.clone(),
            action_name: ws.attribute_assign_action_name.clone(),
            action_type: ws.attribute_assign_action_type.clone(),
            owner: self.owner(ws, owner_type)?,
            values: ws
                .ws_attribute_assign_values
                .iter()
                .map(|v| AttributeAssignmentValue {
                    id: v.id.clone(),
                    value_system: v.value_system.clone(),
                })
                .collect(),
            attribute_definition,
            attribute_definition_name,
        })
    }
}

/// Input for creating (or updating) a group.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateGroup {
    pub name: String,
    pub display_extension: String,
    pub description: String,
    pub detail: Option<Map<String, Value>>,
}

impl CreateGroup {
    pub fn new(name: &str, display_extension: &str, description: &str) -> Self {
        CreateGroup {
            name: name.to_string(),
            display_extension: display_extension.to_string(),
            description: description.to_string(),
            detail: None,
        }
    }

    /// A group named `extension` directly inside `parent`.
    pub fn child_of(parent: &str, extension: &str, display_extension: &str, description: &str) -> Self {
        Self::new(
            &format!("{}:{}", parent, extension),
            display_extension,
            description,
        )
    }

    pub fn with_detail(mut self, detail: Map<String, Value>) -> Self {
        self.detail = Some(detail);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateStem {
    pub name: String,
    pub display_extension: String,
    pub description: String,
}

impl CreateStem {
    pub fn new(name: &str, display_extension: &str, description: &str) -> Self {
        CreateStem {
            name: name.to_string(),
            display_extension: display_extension.to_string(),
            description: description.to_string(),
        }
    }

    pub fn child_of(parent: &str, extension: &str, display_extension: &str, description: &str) -> Self {
        Self::new(
            &format!("{}:{}", parent, extension),
            display_extension,
            description,
        )
    }
}
