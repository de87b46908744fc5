use std::collections::HashMap;

use async_trait::async_trait;

use super::wire::{
    AckResponse, AddressFilterRequest, AddressIdsRequest, AddressUpdateRequest, AddressesResponse, CountResponse,
    GroupIdRequest, HostListResponse,
};
use super::BackendClient;
use crate::errors::ConsoleError;
use crate::models::{ScanGroupAddress, ScanGroupAddressFilter, ScanGroupHostList, UserContext};
use crate::services::{AddressService, Scoped};

pub struct AddressClient {
    backend: BackendClient,
}

impl AddressClient {
    pub fn new(backend: BackendClient) -> Self {
        Self { backend }
    }

    async fn ids_call(
        &self,
        op: &str,
        path: &str,
        ctx: &UserContext,
        group_id: i32,
        address_ids: &[i64],
        ignore_value: Option<bool>,
    ) -> Result<Scoped<()>, ConsoleError> {
        let req = AddressIdsRequest {
            user_context: ctx.into(),
            group_id,
            address_ids: address_ids.to_vec(),
            ignore_value,
        };
        let resp: AckResponse = self.backend.call(op, path, &req).await?;
        Ok(Scoped::new(resp.org_id, ()))
    }
}

#[async_trait]
impl AddressService for AddressClient {
    async fn get(
        &self,
        ctx: &UserContext,
        filter: &ScanGroupAddressFilter,
    ) -> Result<Scoped<Vec<ScanGroupAddress>>, ConsoleError> {
        let req = AddressFilterRequest { user_context: ctx.into(), filter: filter.clone() };
        let resp: AddressesResponse = self.backend.call("address.get", "/address/get", &req).await?;
        Ok(Scoped::new(resp.org_id, resp.addresses))
    }

    async fn get_host_list(
        &self,
        ctx: &UserContext,
        filter: &ScanGroupAddressFilter,
    ) -> Result<Scoped<Vec<ScanGroupHostList>>, ConsoleError> {
        let req = AddressFilterRequest { user_context: ctx.into(), filter: filter.clone() };
        let resp: HostListResponse = self.backend.call("address.hosts", "/address/hosts", &req).await?;
        Ok(Scoped::new(resp.org_id, resp.host_list))
    }

    async fn count(&self, ctx: &UserContext, group_id: i32) -> Result<Scoped<usize>, ConsoleError> {
        let req = GroupIdRequest { user_context: ctx.into(), group_id };
        let resp: CountResponse = self.backend.call("address.count", "/address/count", &req).await?;
        Ok(Scoped::new(resp.org_id, resp.count))
    }

    async fn update(
        &self,
        ctx: &UserContext,
        addrs: HashMap<String, ScanGroupAddress>,
    ) -> Result<Scoped<usize>, ConsoleError> {
        let req = AddressUpdateRequest { user_context: ctx.into(), address: addrs };
        let resp: CountResponse = self.backend.call("address.update", "/address/update", &req).await?;
        Ok(Scoped::new(resp.org_id, resp.count))
    }

    async fn delete(&self, ctx: &UserContext, group_id: i32, address_ids: &[i64]) -> Result<Scoped<()>, ConsoleError> {
        self.ids_call("address.delete", "/address/delete", ctx, group_id, address_ids, None).await
    }

    async fn ignore(
        &self,
        ctx: &UserContext,
        group_id: i32,
        address_ids: &[i64],
        ignore_value: bool,
    ) -> Result<Scoped<()>, ConsoleError> {
        self.ids_call("address.ignore", "/address/ignore", ctx, group_id, address_ids, Some(ignore_value)).await
    }
}
