#![deny(warnings)]
use grouper_client::model::ResolvedSubject;
use grouper_client::{ActAs, ClientError, EntityKind, MemberFilter};
use serde_json::json;

mod common;
use crate::common::{
    run_test, sent_count, sent_params, sent_path, subject_attribute_names, success, ws_group,
    ws_group_subject, ws_person,
};

#[test]
fn test_get_subject_person() {
    run_test(
        vec![json!({"WsGetSubjectsResults": {
            "resultMetadata": success(),
            "subjectAttributeNames": subject_attribute_names(),
            "wsSubjects": [ws_person("p1", "jdoe")]
        }})],
        |client, log| {
            let subject = client.get_subject("jdoe", false, &["mail"], None).unwrap();
            match subject {
                ResolvedSubject::Person(p) => {
                    assert_eq!(p.subject.id, "p1");
                    assert_eq!(p.subject.universal_identifier, "jdoe");
                    assert_eq!(p.subject.description, "jdoe description");
                    assert_eq!(p.attribute("name"), Some("Person jdoe"));
                }
                other => panic!("Expected a person, got {:?}", other),
            }

            assert_eq!(sent_path(&log, 0), "/subjects");
            let params = sent_params(&log, 0, "WsRestGetSubjectsRequest");
            assert_eq!(params["wsSubjectLookups"], json!([{"subjectIdentifier": "jdoe"}]));
            assert_eq!(params["subjectAttributeNames"], json!(["mail", "name", "uid"]));
            assert_eq!(params["includeSubjectDetail"], "T");
        },
    );
}

#[test]
fn test_get_subject_not_found() {
    run_test(
        vec![json!({"WsGetSubjectsResults": {
            "resultMetadata": success(),
            "wsSubjects": [{"success": "F", "resultCode": "SUBJECT_NOT_FOUND"}]
        }})],
        |client, _log| {
            let err = client.get_subject("nobody", false, &[], None).unwrap_err();
            assert!(err.is_not_found(EntityKind::Subject));
        },
    );
}

#[test]
fn test_get_subject_group_unresolved() {
    run_test(
        vec![json!({"WsGetSubjectsResults": {
            "resultMetadata": success(),
            "subjectAttributeNames": subject_attribute_names(),
            "wsSubjects": [ws_group_subject("g1", "app:staff")]
        }})],
        |client, log| {
            let subject = client.get_subject("app:staff", false, &[], None).unwrap();
            match subject {
                ResolvedSubject::Subject(s) => {
                    assert!(s.is_group());
                    assert_eq!(s.universal_identifier, "app:staff");
                }
                other => panic!("Expected a bare subject, got {:?}", other),
            }
            assert_eq!(sent_count(&log), 1);
        },
    );
}

#[test]
fn test_get_subject_group_resolved_keeps_act_as() {
    run_test(
        vec![
            json!({"WsGetSubjectsResults": {
                "resultMetadata": success(),
                "subjectAttributeNames": subject_attribute_names(),
                "wsSubjects": [ws_group_subject("g1", "app:staff")]
            }}),
            json!({"WsFindGroupsResults": {
                "resultMetadata": success(),
                "groupResults": [ws_group("g1", "app:staff")]
            }}),
        ],
        |client, log| {
            let act_as = ActAs::subject_id("admin-id");
            let subject = client
                .get_subject("app:staff", true, &[], Some(&act_as))
                .unwrap();
            match subject {
                ResolvedSubject::Group(g) => assert_eq!(g.name, "app:staff"),
                other => panic!("Expected a group, got {:?}", other),
            }

            assert_eq!(sent_count(&log), 2);
            let first = sent_params(&log, 0, "WsRestGetSubjectsRequest");
            assert_eq!(first["actAsSubjectLookup"], json!({"subjectId": "admin-id"}));
            let second = sent_params(&log, 1, "WsRestFindGroupsLiteRequest");
            assert_eq!(second["actAsSubjectId"], "admin-id");
            assert_eq!(second["groupName"], "app:staff");
        },
    );
}

#[test]
fn test_find_subjects() {
    run_test(
        vec![json!({"WsGetSubjectsResults": {
            "resultMetadata": success(),
            "subjectAttributeNames": subject_attribute_names(),
            "wsSubjects": [ws_person("p1", "jdoe"), ws_person("p2", "jroe")]
        }})],
        |client, log| {
            let found = client.find_subjects("j", false, &[], None).unwrap();
            let ids: Vec<_> = found.iter().map(|s| s.id()).collect();
            assert_eq!(ids, vec!["p1", "p2"]);

            let params = sent_params(&log, 0, "WsRestGetSubjectsRequest");
            assert_eq!(params["searchString"], "j");
            assert!(params.get("wsSubjectLookups").is_none());
        },
    );
}

#[test]
fn test_find_subjects_attribute_mismatch() {
    run_test(
        vec![json!({"WsGetSubjectsResults": {
            "resultMetadata": success(),
            "subjectAttributeNames": ["description", "name"],
            "wsSubjects": [ws_person("p1", "jdoe")]
        }})],
        |client, _log| {
            let err = client.find_subjects("j", false, &[], None).unwrap_err();
            assert!(matches!(err, ClientError::UnexpectedResult { .. }));
        },
    );
}

#[test]
fn test_get_groups_for_subject() {
    run_test(
        vec![
            json!({"WsGetMembershipsResults": {
                "resultMetadata": success(),
                "wsGroups": [ws_group("g1", "app:staff")]
            }}),
            json!({"WsGetMembershipsResults": {"resultMetadata": success()}}),
        ],
        |client, log| {
            let groups = client
                .get_groups_for_subject("p1", Some("app"), true, None)
                .unwrap();
            assert_eq!(groups.len(), 1);
            assert_eq!(groups[0].name, "app:staff");

            let params = sent_params(&log, 0, "WsRestGetMembershipsRequest");
            assert_eq!(params["wsSubjectLookups"], json!([{"subjectId": "p1"}]));
            assert_eq!(params["fieldName"], "members");
            assert_eq!(params["wsStemLookup"], json!({"stemName": "app"}));
            assert_eq!(params["stemScope"], "ALL_IN_SUBTREE");

            let none = client.get_groups_for_subject("p1", None, false, None).unwrap();
            assert!(none.is_empty());
            let params = sent_params(&log, 1, "WsRestGetMembershipsRequest");
            assert!(params.get("stemScope").is_none());
        },
    );
}

#[test]
fn test_is_member() {
    run_test(
        vec![
            json!({"WsHasMemberResults": {
                "resultMetadata": success(),
                "results": [{
                    "resultMetadata": {"success": "T", "resultCode": "IS_MEMBER"},
                    "wsSubject": {"id": "p1", "sourceId": "ldap"}
                }]
            }}),
            json!({"WsHasMemberResults": {
                "resultMetadata": success(),
                "results": [{
                    "resultMetadata": {"success": "T", "resultCode": "IS_NOT_MEMBER"},
                    "wsSubject": {"id": "p1", "sourceId": "ldap"}
                }]
            }}),
            json!({"WsHasMemberResults": {
                "resultMetadata": success(),
                "results": [{
                    "resultMetadata": {
                        "success": "T",
                        "resultCode": "SUCCESS",
                        "resultCode2": "SUBJECT_NOT_FOUND"
                    },
                    "wsSubject": {"id": "p9"}
                }]
            }}),
        ],
        |client, log| {
            assert!(client
                .is_member("p1", "app:staff", MemberFilter::All, None)
                .unwrap());
            assert_eq!(sent_path(&log, 0), "/groups/app:staff/members");
            let params = sent_params(&log, 0, "WsRestHasMemberRequest");
            assert_eq!(params["subjectLookups"], json!([{"subjectId": "p1"}]));
            assert_eq!(params["memberFilter"], "all");

            assert!(!client
                .is_member("p1", "app:staff", MemberFilter::Immediate, None)
                .unwrap());

            let err = client
                .is_member("p9", "app:staff", MemberFilter::All, None)
                .unwrap_err();
            assert!(err.is_not_found(EntityKind::Subject));
        },
    );
}
