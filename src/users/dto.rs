use serde::{Deserialize, Serialize};

use super::repo_types::User;

/// Public view of a user. The password hash has no field here.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub group_id: Option<i64>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            age: u.age,
            group_id: u.group_id,
        }
    }
}

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub password: String,
}

impl std::fmt::Debug for ResetPasswordRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResetPasswordRequest")
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
pub struct TeamQuery {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct TeamResponse {
    pub users: Vec<UserResponse>,
}

#[derive(Debug, Deserialize)]
pub struct GroupQuery {
    pub group_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_response_never_carries_the_hash() {
        let user = User {
            id: 1,
            name: "Alice".into(),
            age: 30,
            group_id: Some(1),
            hashed_password: "$argon2id$v=19$secret".into(),
        };
        let json = serde_json::to_string(&UserResponse::from(user.clone())).unwrap();
        assert!(!json.contains("argon2"));
        assert!(json.contains("\"name\":\"Alice\""));

        let raw = serde_json::to_string(&user).unwrap();
        assert!(!raw.contains("hashed_password"));
    }

    #[test]
    fn reset_request_debug_is_redacted() {
        let req = ResetPasswordRequest {
            password: "hunter2hunter2".into(),
        };
        let dbg = format!("{req:?}");
        assert!(!dbg.contains("hunter2"));
    }
}
