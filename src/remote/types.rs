use serde::Deserialize;

/// One to-do item as served by the remote endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemoteTask {
    pub id: i64,
    #[serde(default)]
    pub todo: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default, alias = "userId")]
    pub user_id: Option<i64>,
}

/// Body of `GET /todos`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemotePayload {
    pub todos: Vec<RemoteTask>,
    pub total: i64,
    #[serde(default)]
    pub skip: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
}
