use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// 请求携带的已认证身份
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub subject_id: i64,
    pub username: String,
    pub roles: BTreeSet<String>,
}

impl Principal {
    pub fn new<I, S>(subject_id: i64, username: impl Into<String>, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            subject_id,
            username: username.into(),
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }
}
