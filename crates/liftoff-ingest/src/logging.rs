// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStage {
    Open,
    Parse,
    Validate,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoadEvent {
    pub stage: LoadStage,
    pub name: String,
    pub fields: BTreeMap<String, String>,
}

#[derive(Debug, Default, Clone)]
pub struct LoadLog {
    events: Vec<LoadEvent>,
}

impl LoadLog {
    pub fn emit<'a>(
        &mut self,
        stage: LoadStage,
        name: impl Into<String>,
        fields: impl IntoIterator<Item = (&'a str, String)>,
    ) {
        let name = name.into();
        let fields: BTreeMap<String, String> = fields
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        info!(stage = ?stage, event = %name, fields = ?fields, "record store");
        self.events.push(LoadEvent {
            stage,
            name,
            fields,
        });
    }

    #[must_use]
    pub fn events(&self) -> &[LoadEvent] {
        &self.events
    }

    #[must_use]
    pub fn into_events(self) -> Vec<LoadEvent> {
        self.events
    }
}
