use grouper_proto::model::{
    AttributeAssignment, AttributeCatalog, AttributeDefinition, AttributeDefinitionName,
};
use grouper_proto::v1::{
    AssignAttributesRequest, AttributeAssignOperation, AttributeAssignType,
    AttributeValueOperation, FindAttributeDefNamesLiteRequest, FindAttributeDefsLiteRequest,
    GetAttributeAssignmentsRequest, StemScope, WsAttributeAssignLookup, WsAttributeAssignValue,
    WsGroupLookup, WsNameLookup, WsStemLookup,
};

use crate::{ActAs, ClientError, GrouperClient};

/// One attribute assignment change on a group or stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignAttribute {
    pub owner_type: AttributeAssignType,
    pub operation: AttributeAssignOperation,
    /// Id of an existing assignment to act on.
    pub assignment_id: Option<String>,
    pub owner_name: Option<String>,
    pub definition_name: Option<String>,
    /// Value and value operation are given together or not at all.
    pub value: Option<(String, AttributeValueOperation)>,
}

impl AssignAttribute {
    pub fn new(owner_type: AttributeAssignType, operation: AttributeAssignOperation) -> Self {
        AssignAttribute {
            owner_type,
            operation,
            assignment_id: None,
            owner_name: None,
            definition_name: None,
            value: None,
        }
    }

    pub fn owner(self, owner_name: &str) -> Self {
        AssignAttribute {
            owner_name: Some(owner_name.to_string()),
            ..self
        }
    }

    pub fn definition_name(self, definition_name: &str) -> Self {
        AssignAttribute {
            definition_name: Some(definition_name.to_string()),
            ..self
        }
    }

    pub fn assignment_id(self, assignment_id: &str) -> Self {
        AssignAttribute {
            assignment_id: Some(assignment_id.to_string()),
            ..self
        }
    }

    pub fn value(self, value: &str, operation: AttributeValueOperation) -> Self {
        AssignAttribute {
            value: Some((value.to_string(), operation)),
            ..self
        }
    }
}

fn owner_lookups(
    owner_type: AttributeAssignType,
    owner_names: &[&str],
) -> (Option<Vec<WsGroupLookup>>, Option<Vec<WsStemLookup>>) {
    match owner_type {
        AttributeAssignType::Group => (
            Some(owner_names.iter().map(|n| WsGroupLookup::new(n)).collect()),
            None,
        ),
        AttributeAssignType::Stem => (
            None,
            Some(owner_names.iter().map(|n| WsStemLookup::new(n)).collect()),
        ),
    }
}

impl GrouperClient {
    pub fn assign_attribute(
        &self,
        assignment: &AssignAttribute,
        act_as: Option<&ActAs>,
    ) -> Result<Vec<AttributeAssignment>, ClientError> {
        let owners: Vec<&str> = assignment.owner_name.iter().map(String::as_str).collect();
        let (ws_owner_group_lookups, ws_owner_stem_lookups) =
            owner_lookups(assignment.owner_type, &owners);
        let request = AssignAttributesRequest {
            attribute_assign_type: assignment.owner_type,
            attribute_assign_operation: assignment.operation,
            ws_owner_group_lookups,
            ws_owner_stem_lookups,
            ws_attribute_assign_lookups: assignment
                .assignment_id
                .as_ref()
                .map(|uuid| vec![WsAttributeAssignLookup { uuid: uuid.clone() }]),
            ws_attribute_def_name_lookups: assignment
                .definition_name
                .as_deref()
                .map(|n| vec![WsNameLookup::new(n)]),
            values: assignment.value.as_ref().map(|(v, _)| {
                vec![WsAttributeAssignValue {
                    id: None,
                    value_system: v.clone(),
                }]
            }),
            attribute_assign_value_operation: assignment.value.as_ref().map(|(_, op)| *op),
        };
        let reply =
            self.perform_grouper_request("/attributeAssignments", &request, act_as, |_| None)?;
        let results = &reply.results;
        let catalog = reply.hydrated(AttributeCatalog::new(
            &results.ws_attribute_defs,
            &results.ws_attribute_def_names,
            &results.ws_groups,
            &results.ws_stems,
        ))?;
        reply.hydrated(
            results
                .ws_attribute_assign_results
                .iter()
                .flat_map(|r| r.ws_attribute_assigns.iter())
                .map(|a| catalog.assignment(a, assignment.owner_type))
                .collect(),
        )
    }

    /// Assignments of the named definitions or definition names on the given owners.
    pub fn get_attribute_assignments(
        &self,
        owner_type: AttributeAssignType,
        definition_name_names: &[&str],
        definition_names: &[&str],
        owner_names: &[&str],
        include_assignments_on_assignments: bool,
        act_as: Option<&ActAs>,
    ) -> Result<Vec<AttributeAssignment>, ClientError> {
        let (ws_owner_group_lookups, ws_owner_stem_lookups) =
            owner_lookups(owner_type, owner_names);
        let request = GetAttributeAssignmentsRequest {
            attribute_assign_type: owner_type,
            include_assignments_on_assignments,
            ws_owner_group_lookups,
            ws_owner_stem_lookups,
            ws_attribute_def_name_lookups: definition_name_names
                .iter()
                .map(|n| WsNameLookup::new(n))
                .collect(),
            ws_attribute_def_lookups: definition_names
                .iter()
                .map(|n| WsNameLookup::new(n))
                .collect(),
        };
        let reply =
            self.perform_grouper_request("/attributeAssignments", &request, act_as, |_| None)?;
        let results = &reply.results;
        let assigns = match &results.ws_attribute_assigns {
            Some(a) => a,
            None => return Ok(Vec::new()),
        };
        let catalog = reply.hydrated(AttributeCatalog::new(
            &results.ws_attribute_defs,
            &results.ws_attribute_def_names,
            &results.ws_groups,
            &results.ws_stems,
        ))?;
        reply.hydrated(
            assigns
                .iter()
                .map(|a| catalog.assignment(a, owner_type))
                .collect(),
        )
    }

    /// Attribute definitions named `name`.
    ///
    /// When Grouper has no exact match it returns every definition matching
    /// the remaining criteria.
    pub fn get_attribute_definitions(
        &self,
        name: &str,
        scope: Option<&str>,
        split_scope: bool,
        parent_stem: Option<(&str, StemScope)>,
        act_as: Option<&ActAs>,
    ) -> Result<Vec<AttributeDefinition>, ClientError> {
        let request = FindAttributeDefsLiteRequest {
            name_of_attribute_def: name.to_string(),
            scope: scope.map(str::to_string),
            split_scope: scope.map(|_| split_scope),
            parent_stem_id: parent_stem.map(|(id, _)| id.to_string()),
            stem_scope: parent_stem.map(|(_, s)| s),
        };
        let reply = self.perform_grouper_request("/attributeDefs", &request, act_as, |_| None)?;
        reply.hydrated(
            reply
                .results
                .attribute_def_results
                .iter()
                .map(AttributeDefinition::from_ws)
                .collect(),
        )
    }

    pub fn get_attribute_definition_names(
        &self,
        name: Option<&str>,
        definition_name: Option<&str>,
        scope: Option<&str>,
        act_as: Option<&ActAs>,
    ) -> Result<Vec<AttributeDefinitionName>, ClientError> {
        let request = FindAttributeDefNamesLiteRequest {
            attribute_def_name_name: name.map(str::to_string),
            name_of_attribute_def: definition_name.map(str::to_string),
            scope: scope.map(str::to_string),
        };
        let reply =
            self.perform_grouper_request("/attributeDefNames", &request, act_as, |_| None)?;
        let results = &reply.results;
        let catalog = reply.hydrated(AttributeCatalog::new(
            &results.attribute_defs,
            &results.attribute_def_name_results,
            &[],
            &[],
        ))?;
        results
            .attribute_def_name_results
            .iter()
            .map(|n| {
                catalog.definition_name(&n.uuid).cloned().ok_or_else(|| {
                    reply.unexpected(format!("Definition name {} missing from reply", n.name))
                })
            })
            .collect()
    }
}
