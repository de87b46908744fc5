use async_trait::async_trait;

use super::wire::{ContextRequest, OrganizationResponse};
use super::BackendClient;
use crate::errors::ConsoleError;
use crate::models::{Organization, UserContext};
use crate::services::{OrganizationService, Scoped};

pub struct OrganizationClient {
    backend: BackendClient,
}

impl OrganizationClient {
    pub fn new(backend: BackendClient) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl OrganizationService for OrganizationClient {
    async fn get(&self, ctx: &UserContext) -> Result<Scoped<Organization>, ConsoleError> {
        let req = ContextRequest { user_context: ctx.into() };
        let resp: OrganizationResponse = self.backend.call("organization.get", "/organization/get", &req).await?;
        let org = resp
            .org
            .ok_or_else(|| ConsoleError::NotFound(format!("organization {}", ctx.org_cid)))?;
        Ok(Scoped::new(resp.org_id, org))
    }
}
