use std::sync::Arc;

use domains::{ErrorKind, Result, User, UserRepository};

pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        self.users.list_users().await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn get(&self, username: &str) -> Result<User> {
        self.users
            .find_user(username)
            .await?
            .ok_or_else(|| ErrorKind::NonExistentUsername.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::{AppError, MockUserRepository};

    #[tokio::test]
    async fn test_unknown_username() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_user()
            .withf(|username| username == "abc")
            .returning(|_| Ok(None));

        let err = UserService::new(Arc::new(users)).get("abc").await.unwrap_err();
        assert_eq!(err, AppError::Rejected(ErrorKind::NonExistentUsername));
    }
}
