use async_trait::async_trait;

use super::wire::{ContextRequest, UserResponse};
use super::BackendClient;
use crate::errors::ConsoleError;
use crate::models::{User, UserContext};
use crate::services::{Scoped, UserService};

pub struct UserClient {
    backend: BackendClient,
}

impl UserClient {
    pub fn new(backend: BackendClient) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl UserService for UserClient {
    async fn get(&self, ctx: &UserContext) -> Result<Scoped<User>, ConsoleError> {
        let req = ContextRequest { user_context: ctx.into() };
        let resp: UserResponse = self.backend.call("user.get", "/user/get", &req).await?;
        let user = resp
            .user
            .ok_or_else(|| ConsoleError::NotFound(format!("user {}", ctx.user_cid)))?;
        Ok(Scoped::new(resp.org_id, user))
    }
}
