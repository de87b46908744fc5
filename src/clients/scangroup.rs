use std::collections::HashMap;

use async_trait::async_trait;

use super::wire::{
    ContextRequest, CountResponse, GroupIdRequest, GroupIdResponse, GroupNameRequest, GroupRequest, GroupResponse,
    GroupStatsResponse, GroupsResponse, WireScanGroup,
};
use super::BackendClient;
use crate::errors::ConsoleError;
use crate::models::{GroupStats, ScanGroup, UserContext};
use crate::services::{ScanGroupService, Scoped};

pub struct ScanGroupClient {
    backend: BackendClient,
}

impl ScanGroupClient {
    pub fn new(backend: BackendClient) -> Self {
        Self { backend }
    }

    async fn group_id_call(&self, op: &str, path: &str, ctx: &UserContext, group_id: i32) -> Result<Scoped<i32>, ConsoleError> {
        let req = GroupIdRequest { user_context: ctx.into(), group_id };
        let resp: GroupIdResponse = self.backend.call(op, path, &req).await?;
        Ok(Scoped::new(resp.org_id, resp.group_id))
    }

    async fn group_call(&self, op: &str, path: &str, ctx: &UserContext, group: &ScanGroup) -> Result<Scoped<i32>, ConsoleError> {
        let req = GroupRequest { user_context: ctx.into(), group: WireScanGroup::from(group) };
        let resp: GroupIdResponse = self.backend.call(op, path, &req).await?;
        Ok(Scoped::new(resp.org_id, resp.group_id))
    }
}

fn found(resp: GroupResponse, what: String) -> Result<Scoped<ScanGroup>, ConsoleError> {
    let group = resp.group.ok_or(ConsoleError::NotFound(what))?;
    Ok(Scoped::new(resp.org_id, group.into()))
}

#[async_trait]
impl ScanGroupService for ScanGroupClient {
    async fn get(&self, ctx: &UserContext, group_id: i32) -> Result<Scoped<ScanGroup>, ConsoleError> {
        let req = GroupIdRequest { user_context: ctx.into(), group_id };
        let resp: GroupResponse = self.backend.call("scangroup.get", "/scangroup/get", &req).await?;
        found(resp, format!("scan group {}", group_id))
    }

    async fn get_by_name(&self, ctx: &UserContext, group_name: &str) -> Result<Scoped<ScanGroup>, ConsoleError> {
        let req = GroupNameRequest { user_context: ctx.into(), group_name: group_name.to_string() };
        let resp: GroupResponse = self.backend.call("scangroup.get_by_name", "/scangroup/get_by_name", &req).await?;
        found(resp, format!("scan group {}", group_name))
    }

    async fn groups(&self, ctx: &UserContext) -> Result<Scoped<Vec<ScanGroup>>, ConsoleError> {
        let req = ContextRequest { user_context: ctx.into() };
        let resp: GroupsResponse = self.backend.call("scangroup.groups", "/scangroup/groups", &req).await?;
        Ok(Scoped::new(resp.org_id, resp.groups.into_iter().map(Into::into).collect()))
    }

    async fn count(&self, ctx: &UserContext) -> Result<Scoped<usize>, ConsoleError> {
        let req = ContextRequest { user_context: ctx.into() };
        let resp: CountResponse = self.backend.call("scangroup.count", "/scangroup/count", &req).await?;
        Ok(Scoped::new(resp.org_id, resp.count))
    }

    async fn group_stats(&self, ctx: &UserContext) -> Result<Scoped<HashMap<i32, GroupStats>>, ConsoleError> {
        let req = ContextRequest { user_context: ctx.into() };
        let resp: GroupStatsResponse = self.backend.call("scangroup.stats", "/scangroup/stats", &req).await?;
        Ok(Scoped::new(resp.org_id, resp.group_stats))
    }

    async fn create(&self, ctx: &UserContext, group: ScanGroup) -> Result<Scoped<i32>, ConsoleError> {
        self.group_call("scangroup.create", "/scangroup/create", ctx, &group).await
    }

    async fn update(&self, ctx: &UserContext, group: ScanGroup) -> Result<Scoped<i32>, ConsoleError> {
        self.group_call("scangroup.update", "/scangroup/update", ctx, &group).await
    }

    async fn delete(&self, ctx: &UserContext, group_id: i32) -> Result<Scoped<i32>, ConsoleError> {
        self.group_id_call("scangroup.delete", "/scangroup/delete", ctx, group_id).await
    }

    async fn pause(&self, ctx: &UserContext, group_id: i32) -> Result<Scoped<i32>, ConsoleError> {
        self.group_id_call("scangroup.pause", "/scangroup/pause", ctx, group_id).await
    }

    async fn resume(&self, ctx: &UserContext, group_id: i32) -> Result<Scoped<i32>, ConsoleError> {
        self.group_id_call("scangroup.resume", "/scangroup/resume", ctx, group_id).await
    }
}
