use std::collections::{BTreeMap, HashMap};

use grouper_proto::model::{Group, HasMember, Membership, ResolvedSubject};
use grouper_proto::v1::{
    AddMemberRequest, DeleteMemberRequest, GetMembersRequest, GetMembershipsRequest,
    HasMemberRequest, MemberFilter, SubjectLookup, WsGroupLookup, WsSubject, GROUP_NOT_FOUND,
    IS_MEMBER, IS_NOT_MEMBER, PROBLEM_DELETING_MEMBERS, PROBLEM_WITH_ASSIGNMENT,
    SUBJECT_NOT_FOUND,
};
use serde_json::Value;

use crate::envelope::{group_not_found, name_from_message, Failure};
use crate::{ActAs, ClientError, EntityKind, GrouperClient};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMembers {
    pub group: Group,
    pub members: Vec<ResolvedSubject>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMemberships {
    pub group: Group,
    pub memberships: Vec<Membership>,
}

/// Multi-group lookups only name the missing group inside the result message.
fn group_not_found_in_message(f: &Failure<'_>) -> Option<ClientError> {
    let top = std::iter::once(f.metadata.clone());
    top.chain(f.items())
        .filter(|m| !m.is_success() && m.result_code.as_deref() == Some(GROUP_NOT_FOUND))
        .find_map(|m| {
            m.result_message
                .as_deref()
                .and_then(|msg| name_from_message(msg, 2))
        })
        .map(|name| f.not_found(EntityKind::Group, &name))
}

impl GrouperClient {
    /// Members of each group, in the order Grouper returns the groups.
    pub fn get_members(
        &self,
        group_names: &[&str],
        attributes: &[&str],
        member_filter: MemberFilter,
        resolve_groups: bool,
        act_as: Option<&ActAs>,
    ) -> Result<Vec<GroupMembers>, ClientError> {
        let request = GetMembersRequest {
            ws_group_lookups: group_names.iter().map(|n| WsGroupLookup::new(n)).collect(),
            subject_attribute_names: self.subject_attribute_names(attributes),
            member_filter,
            include_subject_detail: true,
        };
        let reply =
            self.perform_grouper_request("/groups", &request, act_as, group_not_found_in_message)?;

        let attribute_names = &reply.results.subject_attribute_names;
        reply
            .results
            .results
            .iter()
            .map(|result| {
                if !result.result_metadata.is_success() {
                    return Err(reply.unexpected(format!(
                        "Members of {} failed with {}",
                        result.ws_group.name, result.result_metadata
                    )));
                }
                let group = reply.hydrated(Group::from_ws(&result.ws_group))?;
                let members = result
                    .ws_subjects
                    .iter()
                    .map(|ws| {
                        self.resolve_subject(ws, attribute_names, resolve_groups, act_as, &reply.raw)
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(GroupMembers { group, members })
            })
            .collect()
    }

    /// Memberships of each group that has any.
    pub fn get_memberships(
        &self,
        group_names: &[&str],
        attributes: &[&str],
        member_filter: MemberFilter,
        resolve_groups: bool,
        act_as: Option<&ActAs>,
    ) -> Result<Vec<GroupMemberships>, ClientError> {
        let request = GetMembershipsRequest {
            ws_group_lookups: Some(group_names.iter().map(|n| WsGroupLookup::new(n)).collect()),
            subject_attribute_names: Some(self.subject_attribute_names(attributes)),
            member_filter: Some(member_filter),
            include_subject_detail: Some(true),
            include_group_detail: Some(true),
            ..Default::default()
        };
        let reply = self.perform_grouper_request(
            "/memberships",
            &request,
            act_as,
            group_not_found_in_message,
        )?;

        // The groups exist but nothing is a member of them.
        let ws_groups = match &reply.results.ws_groups {
            Some(g) => g,
            None => return Ok(Vec::new()),
        };

        let subjects: HashMap<&str, &WsSubject> = reply
            .results
            .ws_subjects
            .iter()
            .map(|s| (s.id.as_str(), s))
            .collect();

        let mut out = ws_groups
            .iter()
            .map(|g| {
                reply.hydrated(Group::from_ws(g)).map(|group| GroupMemberships {
                    group,
                    memberships: Vec::new(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        for ws in reply.results.ws_memberships.iter() {
            let ws_subject = subjects.get(ws.subject_id.as_str()).ok_or_else(|| {
                reply.unexpected(format!("Membership names unknown subject {}", ws.subject_id))
            })?;
            let member = self.resolve_subject(
                ws_subject,
                &reply.results.subject_attribute_names,
                resolve_groups,
                act_as,
                &reply.raw,
            )?;
            let membership = reply.hydrated(Membership::new(ws, member))?;
            let entry = out
                .iter_mut()
                .find(|e| e.group.id == ws.group_id)
                .ok_or_else(|| {
                    reply.unexpected(format!("Membership names unknown group {}", ws.group_id))
                })?;
            entry.memberships.push(membership);
        }
        Ok(out)
    }

    pub(crate) fn has_members_reply(
        &self,
        group_name: &str,
        subjects: &[SubjectLookup],
        member_filter: MemberFilter,
        act_as: Option<&ActAs>,
    ) -> Result<(BTreeMap<String, HasMember>, Value), ClientError> {
        if subjects.is_empty() {
            return Err(ClientError::InvalidArgument(
                "At least one subject must be given".to_string(),
            ));
        }
        let request = HasMemberRequest {
            subject_lookups: subjects.to_vec(),
            member_filter,
        };
        let path = format!("/groups/{}/members", group_name);
        let reply = self.perform_grouper_request(&path, &request, act_as, |f| {
            group_not_found(f, group_name)
        })?;

        let mut out = BTreeMap::new();
        for result in reply.results.results.iter() {
            let meta = &result.result_metadata;
            let ws = &result.ws_subject;
            if let Some(code2) = meta.result_code2.as_deref() {
                if code2 != SUBJECT_NOT_FOUND {
                    return Err(reply.unexpected(format!("Unknown has-member code {}", code2)));
                }
                out.insert(ws.id.clone(), HasMember::SubjectNotFound);
                continue;
            }
            let key = match (&ws.identifier_lookup, ws.id.as_str()) {
                (Some(ident), _) => ident.clone(),
                (None, id) if !id.is_empty() => id.to_string(),
                _ => return Err(reply.unexpected("Has-member row names no subject".to_string())),
            };
            let is_member = match meta.result_code() {
                Some(IS_MEMBER) => HasMember::IsMember,
                Some(IS_NOT_MEMBER) => HasMember::IsNotMember,
                other => {
                    return Err(reply.unexpected(format!("Unknown has-member code {:?}", other)))
                }
            };
            out.insert(key, is_member);
        }
        Ok((out, reply.raw))
    }

    /// Membership of each subject in `group_name`.
    ///
    /// Keys are the identifier each subject was looked up by, or its id.
    pub fn has_members(
        &self,
        group_name: &str,
        subjects: &[SubjectLookup],
        member_filter: MemberFilter,
        act_as: Option<&ActAs>,
    ) -> Result<BTreeMap<String, HasMember>, ClientError> {
        self.has_members_reply(group_name, subjects, member_filter, act_as)
            .map(|(results, _)| results)
    }

    /// Add subjects to `group_name` and return the group as it is now.
    pub fn add_members(
        &self,
        group_name: &str,
        subjects: &[SubjectLookup],
        replace_all_existing: bool,
        act_as: Option<&ActAs>,
    ) -> Result<Group, ClientError> {
        let request = AddMemberRequest {
            subject_lookups: subjects.to_vec(),
            ws_group_lookup: WsGroupLookup::new(group_name),
            replace_all_existing,
            include_group_detail: true,
        };
        let reply = self.perform_grouper_request("/groups", &request, act_as, |f| {
            group_not_found(f, group_name).or_else(|| f.permission_denied_for(PROBLEM_WITH_ASSIGNMENT))
        })?;
        reply.hydrated(Group::from_ws(&reply.results.ws_group_assigned))
    }

    /// Remove subjects from `group_name` and return the group as it is now.
    pub fn delete_members(
        &self,
        group_name: &str,
        subjects: &[SubjectLookup],
        act_as: Option<&ActAs>,
    ) -> Result<Group, ClientError> {
        let request = DeleteMemberRequest {
            subject_lookups: subjects.to_vec(),
            ws_group_lookup: WsGroupLookup::new(group_name),
            include_group_detail: true,
        };
        let reply = self.perform_grouper_request("/groups", &request, act_as, |f| {
            group_not_found(f, group_name)
                .or_else(|| f.permission_denied_for(PROBLEM_DELETING_MEMBERS))
        })?;
        reply.hydrated(Group::from_ws(&reply.results.ws_group))
    }
}
