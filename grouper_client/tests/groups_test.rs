#![deny(warnings)]
use grouper_client::model::CreateGroup;
use grouper_client::{ActAs, ClientError, EntityKind};
use serde_json::json;

mod common;
use crate::common::{failure, run_test, sent_count, sent_params, sent_path, success, ws_group};

#[test]
fn test_get_group_exact() {
    run_test(
        vec![json!({"WsFindGroupsResults": {
            "resultMetadata": success(),
            "groupResults": [ws_group("a1b2", "app:staff")]
        }})],
        |client, log| {
            let group = client.get_group("app:staff", None).unwrap();
            assert_eq!(group.id, "a1b2");
            assert_eq!(group.extension, "staff");
            assert!(group.enabled);

            assert_eq!(sent_path(&log, 0), "/groups");
            let params = sent_params(&log, 0, "WsRestFindGroupsLiteRequest");
            assert_eq!(params["queryFilterType"], "FIND_BY_GROUP_NAME_EXACT");
            assert_eq!(params["groupName"], "app:staff");
            assert_eq!(params["includeGroupDetail"], "T");
        },
    );
}

#[test]
fn test_get_group_missing() {
    run_test(
        vec![json!({"WsFindGroupsResults": {"resultMetadata": success()}})],
        |client, _log| {
            let err = client.get_group("app:nope", None).unwrap_err();
            assert!(err.is_not_found(EntityKind::Group));
            match err {
                ClientError::EntityNotFound { identifier, .. } => {
                    assert_eq!(identifier, "app:nope")
                }
                e => panic!("Unexpected error {:?}", e),
            }
        },
    );
}

#[test]
fn test_get_group_not_found_code() {
    run_test(
        vec![
            json!({"WsFindGroupsResults": {
                "resultMetadata": failure("GROUP_NOT_FOUND", "Cant find group: 'app:gone'")
            }}),
            json!({"WsFindGroupsResults": {
                "resultMetadata": failure("GROUP_NOT_FOUND", "Cant find group: 'gone'")
            }}),
        ],
        |client, _log| {
            let err = client.get_group("app:gone", None).unwrap_err();
            match err {
                ClientError::EntityNotFound {
                    kind: EntityKind::Group,
                    identifier,
                    raw,
                } => {
                    assert_eq!(identifier, "app:gone");
                    assert_eq!(
                        raw["WsFindGroupsResults"]["resultMetadata"]["resultCode"],
                        "GROUP_NOT_FOUND"
                    );
                }
                e => panic!("Unexpected error {:?}", e),
            }

            let err = client.find_groups("gone", Some("app"), None).unwrap_err();
            assert!(err.is_not_found(EntityKind::Group));
        },
    );
}

#[test]
fn test_get_group_many_is_unexpected() {
    run_test(
        vec![json!({"WsFindGroupsResults": {
            "resultMetadata": success(),
            "groupResults": [ws_group("a1", "app:staff"), ws_group("a2", "app:staff")]
        }})],
        |client, _log| {
            let err = client.get_group("app:staff", None).unwrap_err();
            assert!(matches!(err, ClientError::UnexpectedResult { .. }));
            assert!(err.raw().is_some());
        },
    );
}

#[test]
fn test_find_groups_in_missing_stem() {
    run_test(
        vec![json!({"WsFindGroupsResults": {
            "resultMetadata": failure("INVALID_QUERY", "Cant find stem: 'app:gone'")
        }})],
        |client, log| {
            let err = client
                .find_groups("staff", Some("app:gone"), None)
                .unwrap_err();
            assert!(err.is_not_found(EntityKind::Stem));

            let params = sent_params(&log, 0, "WsRestFindGroupsLiteRequest");
            assert_eq!(params["queryFilterType"], "FIND_BY_GROUP_NAME_APPROXIMATE");
            assert_eq!(params["stemName"], "app:gone");
        },
    );
}

#[test]
fn test_find_groups_other_invalid_query() {
    run_test(
        vec![json!({"WsFindGroupsResults": {
            "resultMetadata": failure("INVALID_QUERY", "Something else")
        }})],
        |client, _log| {
            let err = client.find_groups("staff", Some("app"), None).unwrap_err();
            assert!(matches!(err, ClientError::UnexpectedResult { .. }));
        },
    );
}

#[test]
fn test_get_groups_by_parent() {
    run_test(
        vec![json!({"WsFindGroupsResults": {
            "resultMetadata": success(),
            "groupResults": [ws_group("a1", "app:staff"), ws_group("a2", "app:sub:faculty")]
        }})],
        |client, log| {
            let groups = client.get_groups_by_parent("app", true, None).unwrap();
            let names: Vec<_> = groups.iter().map(|g| g.name.as_str()).collect();
            assert_eq!(names, vec!["app:staff", "app:sub:faculty"]);

            let params = sent_params(&log, 0, "WsRestFindGroupsLiteRequest");
            assert_eq!(params["queryFilterType"], "FIND_BY_STEM_NAME");
            assert_eq!(params["stemName"], "app");
            assert_eq!(params["parentStemNameScope"], "ALL_IN_SUBTREE");
        },
    );
}

#[test]
fn test_create_groups_with_act_as() {
    run_test(
        vec![json!({"WsGroupSaveResults": {
            "resultMetadata": success(),
            "results": [{"resultMetadata": success(), "wsGroup": ws_group("c1", "app:new")}]
        }})],
        |client, log| {
            let act_as = ActAs::subject_identifier("jdoe");
            let created = client
                .create_groups(
                    &[CreateGroup::child_of("app", "new", "New", "A new group")],
                    Some(&act_as),
                )
                .unwrap();
            assert_eq!(created.len(), 1);
            assert_eq!(created[0].name, "app:new");

            let params = sent_params(&log, 0, "WsRestGroupSaveRequest");
            assert_eq!(
                params["actAsSubjectLookup"],
                json!({"subjectIdentifier": "jdoe"})
            );
            let to_save = &params["wsGroupToSaves"][0];
            assert_eq!(to_save["wsGroup"]["name"], "app:new");
            assert_eq!(to_save["wsGroupLookup"]["groupName"], "app:new");
        },
    );
}

#[test]
fn test_delete_groups_reports_missing_name() {
    run_test(
        vec![json!({"WsGroupDeleteResults": {
            "resultMetadata": success(),
            "results": [
                {"resultMetadata": {"success": "T", "resultCode": "SUCCESS"}},
                {"resultMetadata": {
                    "success": "T",
                    "resultCode": "SUCCESS_GROUP_NOT_FOUND",
                    "resultMessage": "Group not found, groupName=app:gone, groupUuid=null"
                }}
            ]
        }})],
        |client, _log| {
            let err = client
                .delete_groups(&["app:staff", "app:gone"], None)
                .unwrap_err();
            match err {
                ClientError::EntityNotFound {
                    kind: EntityKind::Group,
                    identifier,
                    ..
                } => assert_eq!(identifier, "app:gone"),
                e => panic!("Unexpected error {:?}", e),
            }
        },
    );
}

#[test]
fn test_delete_groups_permission_denied() {
    run_test(
        vec![json!({"WsGroupDeleteResults": {
            "resultMetadata": failure("PROBLEM_DELETING_GROUPS", "Problem"),
            "results": [{"resultMetadata": failure("INSUFFICIENT_PRIVILEGES", "")}]
        }})],
        |client, log| {
            let err = client.delete_groups(&["app:staff"], None).unwrap_err();
            assert!(matches!(err, ClientError::PermissionDenied(_)));
            assert_eq!(sent_count(&log), 1);
        },
    );
}

#[test]
fn test_delete_groups_ok() {
    run_test(
        vec![json!({"WsGroupDeleteResults": {
            "resultMetadata": success(),
            "results": [{"resultMetadata": {"success": "T", "resultCode": "SUCCESS"}}]
        }})],
        |client, log| {
            assert!(client.delete_groups(&["app:staff"], None).is_ok());
            let params = sent_params(&log, 0, "WsRestGroupDeleteRequest");
            assert_eq!(params["wsGroupLookups"], json!([{"groupName": "app:staff"}]));
        },
    );
}
