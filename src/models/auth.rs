use serde::{Deserialize, Serialize};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin";
pub const ADMIN_ROLE: &str = "Administrator";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub role: String,
}

impl User {
    pub fn administrator() -> Self {
        Self {
            username: ADMIN_USERNAME.to_string(),
            role: ADMIN_ROLE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn is_admin(&self) -> bool {
        self.username == ADMIN_USERNAME && self.password == ADMIN_PASSWORD
    }
}
