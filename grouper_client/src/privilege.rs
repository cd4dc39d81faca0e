use grouper_proto::model::Privilege;
use grouper_proto::v1::{
    AssignGrouperPrivilegesLiteRequest, AssignGrouperPrivilegesRequest,
    GetGrouperPrivilegesLiteRequest, PrivilegeType, SubjectLookup, WsGroupLookup, WsStemLookup,
    GROUP_NOT_FOUND, STEM_NOT_FOUND, SUBJECT_NOT_FOUND,
};

use crate::{ActAs, ClientError, EntityKind, GrouperClient};

/// The group or stem a privilege applies to, by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Group(String),
    Stem(String),
}

impl Target {
    pub fn group(name: &str) -> Self {
        Target::Group(name.to_string())
    }

    pub fn stem(name: &str) -> Self {
        Target::Stem(name.to_string())
    }

    pub fn name(&self) -> &str {
        match self {
            Target::Group(n) | Target::Stem(n) => n.as_str(),
        }
    }

    /// Groups carry access privileges, stems carry naming privileges.
    pub fn privilege_type(&self) -> PrivilegeType {
        match self {
            Target::Group(_) => PrivilegeType::Access,
            Target::Stem(_) => PrivilegeType::Naming,
        }
    }

    fn group_name(&self) -> Option<String> {
        match self {
            Target::Group(n) => Some(n.clone()),
            Target::Stem(_) => None,
        }
    }

    fn stem_name(&self) -> Option<String> {
        match self {
            Target::Group(_) => None,
            Target::Stem(n) => Some(n.clone()),
        }
    }
}

/// What to look up privileges for. At least a subject or a target is required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrivilegeQuery {
    pub subject: Option<SubjectLookup>,
    pub target: Option<Target>,
    pub privilege_name: Option<String>,
    pub privilege_type: Option<PrivilegeType>,
    pub attributes: Vec<String>,
}

impl PrivilegeQuery {
    pub fn for_subject(subject: SubjectLookup) -> Self {
        PrivilegeQuery {
            subject: Some(subject),
            ..Default::default()
        }
    }

    pub fn on_target(target: Target) -> Self {
        PrivilegeQuery {
            target: Some(target),
            ..Default::default()
        }
    }

    pub fn target(self, target: Target) -> Self {
        PrivilegeQuery {
            target: Some(target),
            ..self
        }
    }

    pub fn subject(self, subject: SubjectLookup) -> Self {
        PrivilegeQuery {
            subject: Some(subject),
            ..self
        }
    }

    pub fn named(self, privilege_name: &str) -> Self {
        PrivilegeQuery {
            privilege_name: Some(privilege_name.to_string()),
            ..self
        }
    }

    pub fn of_type(self, privilege_type: PrivilegeType) -> Self {
        PrivilegeQuery {
            privilege_type: Some(privilege_type),
            ..self
        }
    }

    pub fn with_attributes(self, attributes: &[&str]) -> Self {
        PrivilegeQuery {
            attributes: attributes.iter().map(|a| a.to_string()).collect(),
            ..self
        }
    }
}

impl GrouperClient {
    /// Grant (`allowed`) or revoke one privilege for one subject.
    pub fn assign_privilege(
        &self,
        target: &Target,
        privilege_name: &str,
        subject_identifier: &str,
        allowed: bool,
        act_as: Option<&ActAs>,
    ) -> Result<(), ClientError> {
        let request = AssignGrouperPrivilegesLiteRequest {
            allowed,
            privilege_name: privilege_name.to_string(),
            privilege_type: target.privilege_type(),
            subject_identifier: subject_identifier.to_string(),
            group_name: target.group_name(),
            stem_name: target.stem_name(),
        };
        self.perform_grouper_request("/grouperPrivileges", &request, act_as, |_| None)
            .map(|_| ())
    }

    /// Grant or revoke several privileges for several subjects in one call.
    pub fn assign_privileges(
        &self,
        target: &Target,
        privilege_names: &[&str],
        subject_identifiers: &[&str],
        allowed: bool,
        act_as: Option<&ActAs>,
    ) -> Result<(), ClientError> {
        let request = AssignGrouperPrivilegesRequest {
            ws_subject_lookups: subject_identifiers
                .iter()
                .map(|s| SubjectLookup::identifier(*s))
                .collect(),
            privilege_names: privilege_names.iter().map(|p| p.to_string()).collect(),
            privilege_type: target.privilege_type(),
            allowed,
            ws_group_lookup: target.group_name().map(|n| WsGroupLookup::new(&n)),
            ws_stem_lookup: target.stem_name().map(|n| WsStemLookup::new(&n)),
        };
        self.perform_grouper_request("/grouperPrivileges", &request, act_as, |_| None)
            .map(|_| ())
    }

    pub fn get_privileges(
        &self,
        query: &PrivilegeQuery,
        act_as: Option<&ActAs>,
    ) -> Result<Vec<Privilege>, ClientError> {
        if query.subject.is_none() && query.target.is_none() {
            return Err(ClientError::InvalidArgument(
                "A subject, a target, or both must be given to look up privileges".to_string(),
            ));
        }
        let attributes: Vec<&str> = query.attributes.iter().map(String::as_str).collect();
        let request = GetGrouperPrivilegesLiteRequest {
            include_subject_detail: true,
            include_group_detail: true,
            subject_attribute_names: self.subject_attribute_names(&attributes).join(","),
            subject_id: match &query.subject {
                Some(SubjectLookup::Id(id)) => Some(id.clone()),
                _ => None,
            },
            subject_identifier: match &query.subject {
                Some(SubjectLookup::Identifier(ident)) => Some(ident.clone()),
                _ => None,
            },
            group_name: query.target.as_ref().and_then(Target::group_name),
            stem_name: query.target.as_ref().and_then(Target::stem_name),
            privilege_name: query.privilege_name.clone(),
            privilege_type: query.privilege_type,
        };
        let reply = self.perform_grouper_request("/grouperPrivileges", &request, act_as, |f| {
            match (f.result_code(), &query.subject, &query.target) {
                (Some(SUBJECT_NOT_FOUND), Some(subject), _) => {
                    Some(f.not_found(EntityKind::Subject, subject.value()))
                }
                (Some(GROUP_NOT_FOUND), _, Some(Target::Group(name))) => {
                    Some(f.not_found(EntityKind::Group, name))
                }
                (Some(STEM_NOT_FOUND), _, Some(Target::Stem(name))) => {
                    Some(f.not_found(EntityKind::Stem, name))
                }
                _ => None,
            }
        })?;

        let attribute_names = &reply.results.subject_attribute_names;
        reply.hydrated(
            reply
                .results
                .privilege_results
                .iter()
                .map(|p| Privilege::from_ws(p, attribute_names, &self.universal_identifier_attr))
                .collect(),
        )
    }
}
