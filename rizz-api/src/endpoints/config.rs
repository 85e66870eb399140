use crate::request::{ApiRequest, Visibility};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Remote configuration document. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default)]
    pub api_base_url: Option<String>,
}

#[derive(Default, Debug, Clone, Serialize)]
pub struct GetConfig;

impl ApiRequest for GetConfig {
    type Data = ();
    type Response = RemoteConfig;

    const VISIBILITY: Visibility = Visibility::Public;

    fn endpoint(&self) -> Cow<'_, str> {
        "/config".into()
    }
}
