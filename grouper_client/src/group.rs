use grouper_proto::model::{CreateGroup, Group};
use grouper_proto::v1::{
    FindGroupsLiteRequest, GroupDeleteRequest, GroupSaveRequest, QueryFilterType, StemScope,
    WsGroupLookup, WsGroupToSave, WsGroupToSaveBody, CANT_FIND_STEM, INVALID_QUERY,
    PROBLEM_DELETING_GROUPS, SUCCESS, SUCCESS_GROUP_NOT_FOUND,
};

use crate::envelope::{group_not_found, name_from_message};
use crate::{ActAs, ClientError, EntityKind, GrouperClient};

impl GrouperClient {
    /// The group named exactly `group_name`.
    pub fn get_group(&self, group_name: &str, act_as: Option<&ActAs>) -> Result<Group, ClientError> {
        let request = FindGroupsLiteRequest {
            query_filter_type: QueryFilterType::FindByGroupNameExact,
            group_name: Some(group_name.to_string()),
            stem_name: None,
            parent_stem_name_scope: None,
            include_group_detail: Some(true),
        };
        let reply = self.perform_grouper_request("/groups", &request, act_as, |f| {
            group_not_found(f, group_name)
        })?;
        match reply.results.group_results.as_slice() {
            [] => Err(reply.not_found(EntityKind::Group, group_name)),
            [ws] => reply.hydrated(Group::from_ws(ws)),
            many => Err(reply.unexpected(format!(
                "{} groups matched the exact name {}",
                many.len(),
                group_name
            ))),
        }
    }

    /// Groups whose name approximately matches `group_name`, optionally inside `stem`.
    pub fn find_groups(
        &self,
        group_name: &str,
        stem: Option<&str>,
        act_as: Option<&ActAs>,
    ) -> Result<Vec<Group>, ClientError> {
        let request = FindGroupsLiteRequest {
            query_filter_type: QueryFilterType::FindByGroupNameApproximate,
            group_name: Some(group_name.to_string()),
            stem_name: stem.map(str::to_string),
            parent_stem_name_scope: None,
            include_group_detail: Some(true),
        };
        let reply = self.perform_grouper_request("/groups", &request, act_as, |f| {
            match stem {
                Some(stem)
                    if f.result_code() == Some(INVALID_QUERY)
                        && f.result_message().starts_with(CANT_FIND_STEM) =>
                {
                    Some(f.not_found(EntityKind::Stem, stem))
                }
                _ => group_not_found(f, group_name),
            }
        })?;
        reply.hydrated(
            reply
                .results
                .group_results
                .iter()
                .map(Group::from_ws)
                .collect(),
        )
    }

    /// Groups inside the stem `parent_name`, or anywhere below it when `recursive`.
    pub fn get_groups_by_parent(
        &self,
        parent_name: &str,
        recursive: bool,
        act_as: Option<&ActAs>,
    ) -> Result<Vec<Group>, ClientError> {
        let request = FindGroupsLiteRequest {
            query_filter_type: QueryFilterType::FindByStemName,
            group_name: None,
            stem_name: Some(parent_name.to_string()),
            parent_stem_name_scope: Some(StemScope::recursive(recursive)),
            include_group_detail: None,
        };
        let reply = self.perform_grouper_request("/groups", &request, act_as, |_| None)?;
        reply.hydrated(
            reply
                .results
                .group_results
                .iter()
                .map(Group::from_ws)
                .collect(),
        )
    }

    pub fn create_groups(
        &self,
        groups: &[CreateGroup],
        act_as: Option<&ActAs>,
    ) -> Result<Vec<Group>, ClientError> {
        let request = GroupSaveRequest {
            ws_group_to_saves: groups
                .iter()
                .map(|g| WsGroupToSave {
                    ws_group: WsGroupToSaveBody {
                        name: g.name.clone(),
                        display_extension: g.display_extension.clone(),
                        description: g.description.clone(),
                        detail: g.detail.clone(),
                    },
                    ws_group_lookup: WsGroupLookup::new(&g.name),
                })
                .collect(),
            include_group_detail: true,
        };
        let reply = self.perform_grouper_request("/groups", &request, act_as, |_| None)?;
        reply.hydrated(
            reply
                .results
                .results
                .iter()
                .map(|r| Group::from_ws(&r.ws_group))
                .collect(),
        )
    }

    pub fn delete_groups(&self, group_names: &[&str], act_as: Option<&ActAs>) -> Result<(), ClientError> {
        let request = GroupDeleteRequest {
            ws_group_lookups: group_names.iter().map(|n| WsGroupLookup::new(n)).collect(),
        };
        let reply = self.perform_grouper_request("/groups", &request, act_as, |f| {
            f.permission_denied_for(PROBLEM_DELETING_GROUPS)
        })?;

        // A missing group still reports overall success.
        for item in reply.results.results.iter() {
            let meta = &item.result_metadata;
            match meta.result_code() {
                Some(SUCCESS) => {}
                Some(SUCCESS_GROUP_NOT_FOUND) => {
                    let message = meta.result_message.as_deref().unwrap_or("");
                    return Err(match name_from_message(message, 1) {
                        Some(name) => reply.not_found(EntityKind::Group, &name),
                        None => reply.unexpected(format!(
                            "Unable to find the group name in {:?}",
                            message
                        )),
                    });
                }
                other => {
                    return Err(reply.unexpected(format!(
                        "Group delete item failed with {:?}",
                        other
                    )))
                }
            }
        }
        Ok(())
    }
}
