use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostDto {
    pub id: u32,
    pub cpu: i64,
}

#[derive(Debug, Deserialize, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkDto {
    pub source: u32,
    pub target: u32,
    pub bandwidth: i64,
    pub delay: i64,
    pub cost: i64,
}
