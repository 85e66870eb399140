use reqwest::Method;
use serde::{Serialize, de::DeserializeOwned};
use std::borrow::Cow;

/// Which of the two API roots a request is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// `<root>/api`: auth and remote config, no credential required.
    Public,
    /// `<root>/api/p`: domain endpoints behind the bearer credential.
    Protected,
}

pub enum RequestData<T> {
    Empty,
    Query(T),
    Json(T),
}

/// A typed endpoint call.
///
/// Implementors are reusable: the body is produced from `&self`, so the same
/// request can be replayed after a credential refresh.
pub trait ApiRequest {
    type Data: Serialize;
    type Response: DeserializeOwned;

    const METHOD: Method = Method::GET;
    const VISIBILITY: Visibility = Visibility::Protected;

    fn endpoint(&self) -> Cow<'_, str>;

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Empty
    }
}
