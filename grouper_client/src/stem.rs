use grouper_proto::model::{CreateStem, Stem};
use grouper_proto::v1::{
    FindStemsLiteRequest, StemDeleteRequest, StemQueryFilterType, StemSaveRequest, StemScope,
    WsStemLookup, WsStemToSave, WsStemToSaveBody, STEM_NOT_FOUND,
};

use crate::{ActAs, ClientError, EntityKind, GrouperClient};

impl GrouperClient {
    pub fn get_stem(&self, stem_name: &str, act_as: Option<&ActAs>) -> Result<Stem, ClientError> {
        let request = FindStemsLiteRequest {
            stem_query_filter_type: StemQueryFilterType::FindByStemName,
            stem_name: Some(stem_name.to_string()),
            parent_stem_name: None,
            parent_stem_name_scope: None,
        };
        let reply = self.perform_grouper_request("/stems", &request, act_as, |f| {
            if f.result_code() == Some(STEM_NOT_FOUND) {
                Some(f.not_found(EntityKind::Stem, stem_name))
            } else {
                None
            }
        })?;
        match reply.results.stem_results.as_slice() {
            [] => Err(reply.not_found(EntityKind::Stem, stem_name)),
            [ws] => Ok(Stem::from(ws)),
            many => Err(reply.unexpected(format!(
                "{} stems matched the name {}",
                many.len(),
                stem_name
            ))),
        }
    }

    /// Stems inside `parent_name`, or anywhere below it when `recursive`.
    pub fn get_stems_by_parent(
        &self,
        parent_name: &str,
        recursive: bool,
        act_as: Option<&ActAs>,
    ) -> Result<Vec<Stem>, ClientError> {
        let request = FindStemsLiteRequest {
            stem_query_filter_type: StemQueryFilterType::FindByParentStemName,
            stem_name: None,
            parent_stem_name: Some(parent_name.to_string()),
            parent_stem_name_scope: Some(StemScope::recursive(recursive)),
        };
        let reply = self.perform_grouper_request("/stems", &request, act_as, |_| None)?;
        Ok(reply.results.stem_results.iter().map(Stem::from).collect())
    }

    pub fn create_stems(
        &self,
        stems: &[CreateStem],
        act_as: Option<&ActAs>,
    ) -> Result<Vec<Stem>, ClientError> {
        let request = StemSaveRequest {
            ws_stem_to_saves: stems
                .iter()
                .map(|s| WsStemToSave {
                    ws_stem: WsStemToSaveBody {
                        name: s.name.clone(),
                        display_extension: s.display_extension.clone(),
                        description: s.description.clone(),
                    },
                    ws_stem_lookup: WsStemLookup::new(&s.name),
                })
                .collect(),
        };
        let reply = self.perform_grouper_request("/stems", &request, act_as, |_| None)?;
        Ok(reply
            .results
            .results
            .iter()
            .map(|r| Stem::from(&r.ws_stem))
            .collect())
    }

    pub fn delete_stems(&self, stem_names: &[&str], act_as: Option<&ActAs>) -> Result<(), ClientError> {
        let request = StemDeleteRequest {
            ws_stem_lookups: stem_names.iter().map(|n| WsStemLookup::new(n)).collect(),
        };
        self.perform_grouper_request("/stems", &request, act_as, |_| None)
            .map(|_| ())
    }
}
