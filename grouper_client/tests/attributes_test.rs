#![deny(warnings)]
use grouper_client::model::AttributeOwner;
use grouper_client::{
    AssignAttribute, AttributeAssignOperation, AttributeAssignType, AttributeValueOperation,
    ClientError, StemScope,
};
use serde_json::{json, Value};

mod common;
use crate::common::{failure, run_test, sent_params, sent_path, success, ws_group, ws_stem};

fn ws_attribute_def() -> Value {
    json!({
        "uuid": "d1",
        "name": "etc:attr:colorDef",
        "extension": "colorDef",
        "description": "Colours",
        "attributeDefType": "attr",
        "valueType": "string",
        "assignToGroup": "T",
        "assignToStem": "T",
        "multiAssignable": "F",
        "multiValued": "T",
        "idIndex": "30001"
    })
}

fn ws_attribute_def_name() -> Value {
    json!({
        "uuid": "n1",
        "name": "etc:attr:color",
        "attributeDefId": "d1",
        "extension": "color",
        "displayExtension": "color",
        "displayName": "etc:attr:color",
        "idIndex": "30002"
    })
}

fn ws_assign(owner_key: &str, owner_id: &str) -> Value {
    let mut assign = json!({
        "id": "aa1",
        "attributeDefId": "d1",
        "attributeDefNameId": "n1",
        "disallowed": "F",
        "enabled": "T",
        "attributeAssignType": "group",
        "attributeAssignActionName": "assign",
        "wsAttributeAssignValues": [{"id": "v1", "valueSystem": "blue"}]
    });
    assign[owner_key] = Value::String(owner_id.to_string());
    assign
}

#[test]
fn test_assign_attribute_to_group() {
    run_test(
        vec![json!({"WsAssignAttributesResults": {
            "resultMetadata": success(),
            "wsAttributeDefs": [ws_attribute_def()],
            "wsAttributeDefNames": [ws_attribute_def_name()],
            "wsGroups": [ws_group("g1", "app:staff")],
            "wsAttributeAssignResults": [{"wsAttributeAssigns": [ws_assign("ownerGroupId", "g1")]}]
        }})],
        |client, log| {
            let assignment = AssignAttribute::new(
                AttributeAssignType::Group,
                AttributeAssignOperation::AssignAttr,
            )
            .owner("app:staff")
            .definition_name("etc:attr:color")
            .value("blue", AttributeValueOperation::AddValue);
            let assigned = client.assign_attribute(&assignment, None).unwrap();

            assert_eq!(assigned.len(), 1);
            let a = &assigned[0];
            assert_eq!(a.id, "aa1");
            assert!(a.enabled);
            assert!(!a.disallowed);
            assert_eq!(a.values[0].value_system, "blue");
            assert_eq!(a.attribute_definition.id, "d1");
            assert!(a.attribute_definition.multi_valued);
            assert_eq!(a.attribute_definition_name.name, "etc:attr:color");
            match &a.owner {
                AttributeOwner::Group(g) => assert_eq!(g.name, "app:staff"),
                other => panic!("Expected a group owner, got {:?}", other),
            }

            assert_eq!(sent_path(&log, 0), "/attributeAssignments");
            let params = sent_params(&log, 0, "WsRestAssignAttributesRequest");
            assert_eq!(params["attributeAssignType"], "group");
            assert_eq!(params["attributeAssignOperation"], "assign_attr");
            assert_eq!(params["wsOwnerGroupLookups"], json!([{"groupName": "app:staff"}]));
            assert!(params.get("wsOwnerStemLookups").is_none());
            assert_eq!(
                params["wsAttributeDefNameLookups"],
                json!([{"name": "etc:attr:color"}])
            );
            assert_eq!(params["values"], json!([{"valueSystem": "blue"}]));
            assert_eq!(params["attributeAssignValueOperation"], "add_value");
        },
    );
}

#[test]
fn test_remove_attribute_by_assignment_id() {
    run_test(
        vec![json!({"WsAssignAttributesResults": {
            "resultMetadata": success(),
            "wsAttributeAssignResults": []
        }})],
        |client, log| {
            let assignment =
                AssignAttribute::new(AttributeAssignType::Stem, AttributeAssignOperation::RemoveAttr)
                    .assignment_id("aa1");
            let assigned = client.assign_attribute(&assignment, None).unwrap();
            assert!(assigned.is_empty());

            let params = sent_params(&log, 0, "WsRestAssignAttributesRequest");
            assert_eq!(params["wsOwnerStemLookups"], json!([]));
            assert_eq!(params["wsAttributeAssignLookups"], json!([{"uuid": "aa1"}]));
            assert!(params.get("values").is_none());
            assert!(params.get("attributeAssignValueOperation").is_none());
        },
    );
}

#[test]
fn test_assign_attribute_unknown_reference() {
    run_test(
        vec![json!({"WsAssignAttributesResults": {
            "resultMetadata": success(),
            "wsAttributeDefs": [ws_attribute_def()],
            "wsAttributeDefNames": [ws_attribute_def_name()],
            "wsAttributeAssignResults": [{"wsAttributeAssigns": [ws_assign("ownerGroupId", "g1")]}]
        }})],
        |client, _log| {
            let assignment =
                AssignAttribute::new(AttributeAssignType::Group, AttributeAssignOperation::AddAttr)
                    .owner("app:staff")
                    .definition_name("etc:attr:color");
            let err = client.assign_attribute(&assignment, None).unwrap_err();
            assert!(matches!(err, ClientError::UnexpectedResult { .. }));
        },
    );
}

#[test]
fn test_get_attribute_assignments_on_stems() {
    run_test(
        vec![
            json!({"WsGetAttributeAssignmentsResults": {
                "resultMetadata": success(),
                "wsAttributeAssigns": [ws_assign("ownerStemId", "s1")],
                "wsAttributeDefs": [ws_attribute_def()],
                "wsAttributeDefNames": [ws_attribute_def_name()],
                "wsStems": [ws_stem("s1", "app")]
            }}),
            json!({"WsGetAttributeAssignmentsResults": {"resultMetadata": success()}}),
        ],
        |client, log| {
            let assigns = client
                .get_attribute_assignments(
                    AttributeAssignType::Stem,
                    &["etc:attr:color"],
                    &[],
                    &["app"],
                    true,
                    None,
                )
                .unwrap();
            assert_eq!(assigns.len(), 1);
            match &assigns[0].owner {
                AttributeOwner::Stem(s) => assert_eq!(s.name, "app"),
                other => panic!("Expected a stem owner, got {:?}", other),
            }

            let params = sent_params(&log, 0, "WsRestGetAttributeAssignmentsRequest");
            assert_eq!(params["attributeAssignType"], "stem");
            assert_eq!(params["includeAssignmentsOnAssignments"], "T");
            assert_eq!(params["wsOwnerStemLookups"], json!([{"stemName": "app"}]));
            assert_eq!(
                params["wsAttributeDefNameLookups"],
                json!([{"name": "etc:attr:color"}])
            );
            assert_eq!(params["wsAttributeDefLookups"], json!([]));

            let none = client
                .get_attribute_assignments(
                    AttributeAssignType::Group,
                    &[],
                    &["etc:attr:colorDef"],
                    &["app:staff"],
                    false,
                    None,
                )
                .unwrap();
            assert!(none.is_empty());
        },
    );
}

#[test]
fn test_get_attribute_definitions() {
    run_test(
        vec![
            json!({"WsFindAttributeDefsResults": {
                "resultMetadata": success(),
                "attributeDefResults": [ws_attribute_def()]
            }}),
            json!({"WsFindAttributeDefsResults": {
                "resultMetadata": failure("INVALID_QUERY", "Bad scope")
            }}),
        ],
        |client, log| {
            let defs = client
                .get_attribute_definitions(
                    "etc:attr:colorDef",
                    Some("etc:attr"),
                    true,
                    Some(("s1", StemScope::AllInSubtree)),
                    None,
                )
                .unwrap();
            assert_eq!(defs.len(), 1);
            assert!(defs[0].assign_to_group);
            assert!(!defs[0].assign_to_member);
            assert_eq!(defs[0].value_type.as_deref(), Some("string"));

            assert_eq!(sent_path(&log, 0), "/attributeDefs");
            let params = sent_params(&log, 0, "WsRestFindAttributeDefsLiteRequest");
            assert_eq!(params["nameOfAttributeDef"], "etc:attr:colorDef");
            assert_eq!(params["scope"], "etc:attr");
            assert_eq!(params["splitScope"], "T");
            assert_eq!(params["parentStemId"], "s1");
            assert_eq!(params["stemScope"], "ALL_IN_SUBTREE");

            let err = client
                .get_attribute_definitions("x", None, false, None, None)
                .unwrap_err();
            assert!(matches!(err, ClientError::UnexpectedResult { .. }));
            let params = sent_params(&log, 1, "WsRestFindAttributeDefsLiteRequest");
            assert!(params.get("splitScope").is_none());
            assert!(params.get("stemScope").is_none());
        },
    );
}

#[test]
fn test_get_attribute_definition_names() {
    run_test(
        vec![json!({"WsFindAttributeDefNamesResults": {
            "resultMetadata": success(),
            "attributeDefNameResults": [ws_attribute_def_name()],
            "attributeDefs": [ws_attribute_def()]
        }})],
        |client, log| {
            let names = client
                .get_attribute_definition_names(None, Some("etc:attr:colorDef"), None, None)
                .unwrap();
            assert_eq!(names.len(), 1);
            assert_eq!(names[0].id, "n1");
            assert_eq!(names[0].attribute_definition.name, "etc:attr:colorDef");

            assert_eq!(sent_path(&log, 0), "/attributeDefNames");
            let params = sent_params(&log, 0, "WsRestFindAttributeDefNamesLiteRequest");
            assert_eq!(params["nameOfAttributeDef"], "etc:attr:colorDef");
            assert!(params.get("attributeDefNameName").is_none());
        },
    );
}
