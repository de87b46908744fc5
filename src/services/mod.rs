//! Collaborator interfaces the console handlers call.
//!
//! Every result carries the org id the backend resolved so callers can
//! confirm it matches the requesting user.

pub mod memory;

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::error;

use crate::errors::ConsoleError;
use crate::models::{
    GroupStats, Organization, ScanGroup, ScanGroupAddress, ScanGroupAddressFilter, ScanGroupHostList, User,
    UserContext,
};

pub use memory::MemoryBackend;

/// A backend answer tagged with the org that owns it.
#[derive(Debug, Clone, PartialEq)]
pub struct Scoped<T> {
    pub org_id: i32,
    pub value: T,
}

impl<T> Scoped<T> {
    pub fn new(org_id: i32, value: T) -> Self {
        Self { org_id, value }
    }

    /// Unwrap the value if it belongs to the caller's org.
    pub fn for_org(self, ctx: &UserContext) -> Result<T, ConsoleError> {
        if self.org_id != ctx.org_id {
            error!(
                org_id = ctx.org_id,
                backend_org_id = self.org_id,
                user_id = ctx.user_id,
                trace_id = %ctx.trace_id,
                "authorization failure"
            );
            return Err(ConsoleError::OrgMismatch { expected: ctx.org_id, actual: self.org_id });
        }
        Ok(self.value)
    }
}

#[async_trait]
pub trait ScanGroupService: Send + Sync {
    async fn get(&self, ctx: &UserContext, group_id: i32) -> Result<Scoped<ScanGroup>, ConsoleError>;

    async fn get_by_name(&self, ctx: &UserContext, group_name: &str) -> Result<Scoped<ScanGroup>, ConsoleError>;

    async fn groups(&self, ctx: &UserContext) -> Result<Scoped<Vec<ScanGroup>>, ConsoleError>;

    /// Number of live groups, used by the quota check.
    async fn count(&self, ctx: &UserContext) -> Result<Scoped<usize>, ConsoleError>;

    async fn group_stats(&self, ctx: &UserContext) -> Result<Scoped<HashMap<i32, GroupStats>>, ConsoleError>;

    /// Returns the new group id.
    async fn create(&self, ctx: &UserContext, group: ScanGroup) -> Result<Scoped<i32>, ConsoleError>;

    async fn update(&self, ctx: &UserContext, group: ScanGroup) -> Result<Scoped<i32>, ConsoleError>;

    async fn delete(&self, ctx: &UserContext, group_id: i32) -> Result<Scoped<i32>, ConsoleError>;

    async fn pause(&self, ctx: &UserContext, group_id: i32) -> Result<Scoped<i32>, ConsoleError>;

    async fn resume(&self, ctx: &UserContext, group_id: i32) -> Result<Scoped<i32>, ConsoleError>;
}

#[async_trait]
pub trait AddressService: Send + Sync {
    async fn get(
        &self,
        ctx: &UserContext,
        filter: &ScanGroupAddressFilter,
    ) -> Result<Scoped<Vec<ScanGroupAddress>>, ConsoleError>;

    async fn get_host_list(
        &self,
        ctx: &UserContext,
        filter: &ScanGroupAddressFilter,
    ) -> Result<Scoped<Vec<ScanGroupHostList>>, ConsoleError>;

    async fn count(&self, ctx: &UserContext, group_id: i32) -> Result<Scoped<usize>, ConsoleError>;

    /// Upsert keyed by address hash. Returns how many records were written.
    async fn update(
        &self,
        ctx: &UserContext,
        addrs: HashMap<String, ScanGroupAddress>,
    ) -> Result<Scoped<usize>, ConsoleError>;

    async fn delete(&self, ctx: &UserContext, group_id: i32, address_ids: &[i64]) -> Result<Scoped<()>, ConsoleError>;

    async fn ignore(
        &self,
        ctx: &UserContext,
        group_id: i32,
        address_ids: &[i64],
        ignore_value: bool,
    ) -> Result<Scoped<()>, ConsoleError>;
}

#[async_trait]
pub trait OrganizationService: Send + Sync {
    async fn get(&self, ctx: &UserContext) -> Result<Scoped<Organization>, ConsoleError>;
}

#[async_trait]
pub trait UserService: Send + Sync {
    async fn get(&self, ctx: &UserContext) -> Result<Scoped<User>, ConsoleError>;
}
