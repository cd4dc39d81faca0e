use grouper_proto::model::{Group, HasMember, Person, ResolvedSubject, Subject};
use grouper_proto::v1::{
    GetMembershipsRequest, GetSubjectsRequest, MemberFilter, StemScope, SubjectLookup,
    WsStemLookup, WsSubject,
};
use grouper_proto::GROUP_SOURCE_ID;
use serde_json::Value;

use crate::envelope::unexpected;
use crate::{ActAs, ClientError, EntityKind, GrouperClient};

impl GrouperClient {
    /// Turn a subject row into its typed form.
    ///
    /// With `resolve_group`, a group-sourced subject is replaced by the full
    /// group, which costs one more request.
    pub(crate) fn resolve_subject(
        &self,
        ws: &WsSubject,
        attribute_names: &[String],
        resolve_group: bool,
        act_as: Option<&ActAs>,
        raw: &Value,
    ) -> Result<ResolvedSubject, ClientError> {
        if ws.source_id == GROUP_SOURCE_ID {
            if resolve_group {
                self.get_group(&ws.name, act_as).map(ResolvedSubject::Group)
            } else {
                Subject::from_ws(ws, attribute_names, &self.universal_identifier_attr)
                    .map(ResolvedSubject::Subject)
                    .map_err(|e| unexpected(e.to_string(), raw))
            }
        } else {
            Person::from_ws(ws, attribute_names, &self.universal_identifier_attr)
                .map(ResolvedSubject::Person)
                .map_err(|e| unexpected(e.to_string(), raw))
        }
    }

    /// The subject known to its source as `subject_identifier`.
    pub fn get_subject(
        &self,
        subject_identifier: &str,
        resolve_group: bool,
        attributes: &[&str],
        act_as: Option<&ActAs>,
    ) -> Result<ResolvedSubject, ClientError> {
        let request = GetSubjectsRequest {
            ws_subject_lookups: Some(vec![SubjectLookup::identifier(subject_identifier)]),
            search_string: None,
            include_subject_detail: true,
            subject_attribute_names: self.subject_attribute_names(attributes),
        };
        let reply = self.perform_grouper_request("/subjects", &request, act_as, |_| None)?;
        let ws = reply
            .results
            .ws_subjects
            .first()
            .ok_or_else(|| reply.unexpected("Reply has no subjects".to_string()))?;
        if ws.success.as_deref() == Some("F") {
            return Err(reply.not_found(EntityKind::Subject, subject_identifier));
        }
        self.resolve_subject(
            ws,
            &reply.results.subject_attribute_names,
            resolve_group,
            act_as,
            &reply.raw,
        )
    }

    /// Subjects matching a free-form search.
    pub fn find_subjects(
        &self,
        search_string: &str,
        resolve_groups: bool,
        attributes: &[&str],
        act_as: Option<&ActAs>,
    ) -> Result<Vec<ResolvedSubject>, ClientError> {
        let request = GetSubjectsRequest {
            ws_subject_lookups: None,
            search_string: Some(search_string.to_string()),
            include_subject_detail: true,
            subject_attribute_names: self.subject_attribute_names(attributes),
        };
        let reply = self.perform_grouper_request("/subjects", &request, act_as, |_| None)?;
        reply
            .results
            .ws_subjects
            .iter()
            .map(|ws| {
                self.resolve_subject(
                    ws,
                    &reply.results.subject_attribute_names,
                    resolve_groups,
                    act_as,
                    &reply.raw,
                )
            })
            .collect()
    }

    /// Groups `subject_id` is a member of, optionally limited to a stem.
    pub fn get_groups_for_subject(
        &self,
        subject_id: &str,
        stem: Option<&str>,
        substems: bool,
        act_as: Option<&ActAs>,
    ) -> Result<Vec<Group>, ClientError> {
        let request = GetMembershipsRequest {
            ws_subject_lookups: Some(vec![SubjectLookup::id(subject_id)]),
            field_name: Some("members".to_string()),
            include_group_detail: Some(true),
            ws_stem_lookup: stem.map(WsStemLookup::new),
            stem_scope: stem.map(|_| StemScope::recursive(substems)),
            ..Default::default()
        };
        let reply = self.perform_grouper_request("/memberships", &request, act_as, |_| None)?;
        match &reply.results.ws_groups {
            Some(groups) => reply.hydrated(groups.iter().map(Group::from_ws).collect()),
            None => Ok(Vec::new()),
        }
    }

    /// Whether `subject_id` is a member of `group_name`.
    pub fn is_member(
        &self,
        subject_id: &str,
        group_name: &str,
        member_filter: MemberFilter,
        act_as: Option<&ActAs>,
    ) -> Result<bool, ClientError> {
        let (results, raw) = self.has_members_reply(
            group_name,
            &[SubjectLookup::id(subject_id)],
            member_filter,
            act_as,
        )?;
        match results.get(subject_id) {
            Some(HasMember::IsMember) => Ok(true),
            Some(HasMember::IsNotMember) => Ok(false),
            Some(HasMember::SubjectNotFound) => Err(ClientError::EntityNotFound {
                kind: EntityKind::Subject,
                identifier: subject_id.to_string(),
                raw: Box::new(raw),
            }),
            None => Err(unexpected(
                format!("Reply has no result for subject {}", subject_id),
                &raw,
            )),
        }
    }
}
