use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;

use super::{AddressService, OrganizationService, ScanGroupService, Scoped, UserService};
use crate::address::aggregate_hosts;
use crate::errors::ConsoleError;
use crate::models::{
    GroupStats, Organization, ScanGroup, ScanGroupAddress, ScanGroupAddressFilter, ScanGroupHostList, User,
    UserContext,
};
use crate::scangroup::now_nanos;

/// Process-local backend for every console collaborator.
///
/// Groups and addresses live only as long as the process. Organizations and
/// users come from the seed passed at construction.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    groups: DashMap<i32, ScanGroup>,
    /// (org id, group name) to group id. Names are claimed through this index.
    names: DashMap<(i32, String), i32>,
    addresses: DashMap<(i32, String), ScanGroupAddress>,
    organizations: DashMap<i32, Organization>,
    users: DashMap<String, User>,
    next_group_id: AtomicI32,
    next_address_id: AtomicI64,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(organizations: Vec<Organization>, users: Vec<User>) -> Self {
        let backend = Self::new();
        for org in organizations {
            backend.organizations.insert(org.org_id, org);
        }
        for user in users {
            backend.users.insert(user.user_cid.clone(), user);
        }
        backend
    }

    fn owned_group(&self, ctx: &UserContext, group_id: i32) -> Result<ScanGroup, ConsoleError> {
        self.groups
            .get(&group_id)
            .filter(|g| g.org_id == ctx.org_id && !g.deleted)
            .map(|g| g.value().clone())
            .ok_or_else(|| ConsoleError::NotFound(format!("scan group {}", group_id)))
    }

    /// Reserve `name` for `group_id` in the org. Fails when another group holds it.
    fn claim_name(&self, org_id: i32, name: &str, group_id: i32) -> Result<(), ConsoleError> {
        match self.names.entry((org_id, name.to_string())) {
            Entry::Occupied(held) if *held.get() != group_id => {
                Err(ConsoleError::Conflict("scan group name already exists".into()))
            }
            Entry::Occupied(_) => Ok(()),
            Entry::Vacant(slot) => {
                slot.insert(group_id);
                Ok(())
            }
        }
    }

    fn set_paused(&self, ctx: &UserContext, group_id: i32, paused: bool) -> Result<Scoped<i32>, ConsoleError> {
        self.owned_group(ctx, group_id)?;
        if let Some(mut group) = self.groups.get_mut(&group_id) {
            group.paused = paused;
            if paused {
                group.last_paused_time = now_nanos();
            }
        }
        Ok(Scoped::new(ctx.org_id, group_id))
    }

    fn group_addresses(&self, org_id: i32, group_id: i32) -> Vec<ScanGroupAddress> {
        self.addresses
            .iter()
            .filter(|e| e.org_id == org_id && e.group_id == group_id && !e.deleted)
            .map(|e| e.value().clone())
            .collect()
    }

    fn filtered(&self, filter: &ScanGroupAddressFilter) -> Vec<ScanGroupAddress> {
        let mut addrs: Vec<ScanGroupAddress> = self
            .addresses
            .iter()
            .filter(|e| filter.matches(e.value()))
            .map(|e| e.value().clone())
            .collect();
        addrs.sort_by_key(|a| a.address_id);
        if filter.limit > 0 {
            addrs.truncate(filter.limit as usize);
        }
        addrs
    }

    fn mark(&self, ctx: &UserContext, group_id: i32, address_ids: &[i64], apply: impl Fn(&mut ScanGroupAddress)) -> Result<(), ConsoleError> {
        self.owned_group(ctx, group_id)?;
        for mut entry in self.addresses.iter_mut() {
            if entry.org_id == ctx.org_id && entry.group_id == group_id && address_ids.contains(&entry.address_id) {
                apply(entry.value_mut());
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ScanGroupService for MemoryBackend {
    async fn get(&self, ctx: &UserContext, group_id: i32) -> Result<Scoped<ScanGroup>, ConsoleError> {
        let group = self.owned_group(ctx, group_id)?;
        Ok(Scoped::new(group.org_id, group))
    }

    async fn get_by_name(&self, ctx: &UserContext, group_name: &str) -> Result<Scoped<ScanGroup>, ConsoleError> {
        self.groups
            .iter()
            .find(|g| g.org_id == ctx.org_id && !g.deleted && g.group_name == group_name)
            .map(|g| Scoped::new(g.org_id, g.value().clone()))
            .ok_or_else(|| ConsoleError::NotFound(format!("scan group {}", group_name)))
    }

    async fn groups(&self, ctx: &UserContext) -> Result<Scoped<Vec<ScanGroup>>, ConsoleError> {
        let mut groups: Vec<ScanGroup> = self
            .groups
            .iter()
            .filter(|g| g.org_id == ctx.org_id && !g.deleted)
            .map(|g| g.value().clone())
            .collect();
        groups.sort_by_key(|g| g.group_id);
        Ok(Scoped::new(ctx.org_id, groups))
    }

    async fn count(&self, ctx: &UserContext) -> Result<Scoped<usize>, ConsoleError> {
        let count = self.groups.iter().filter(|g| g.org_id == ctx.org_id && !g.deleted).count();
        Ok(Scoped::new(ctx.org_id, count))
    }

    async fn group_stats(&self, ctx: &UserContext) -> Result<Scoped<HashMap<i32, GroupStats>>, ConsoleError> {
        let stats = self
            .groups
            .iter()
            .filter(|g| g.org_id == ctx.org_id && !g.deleted)
            .map(|g| {
                let active = self.group_addresses(g.org_id, g.group_id).len();
                let stats = GroupStats {
                    org_id: g.org_id,
                    group_id: g.group_id,
                    active_addresses: active as i32,
                    last_updated: g.modified_time,
                    ..Default::default()
                };
                (g.group_id, stats)
            })
            .collect();
        Ok(Scoped::new(ctx.org_id, stats))
    }

    async fn create(&self, ctx: &UserContext, mut group: ScanGroup) -> Result<Scoped<i32>, ConsoleError> {
        let group_id = self.next_group_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.claim_name(ctx.org_id, &group.group_name, group_id)?;

        group.group_id = group_id;
        group.org_id = ctx.org_id;
        debug!(org_id = ctx.org_id, group_id, "created scan group");
        self.groups.insert(group_id, group);
        Ok(Scoped::new(ctx.org_id, group_id))
    }

    async fn update(&self, ctx: &UserContext, group: ScanGroup) -> Result<Scoped<i32>, ConsoleError> {
        let group_id = group.group_id;
        let current = self.owned_group(ctx, group_id)?;
        if current.group_name != group.group_name {
            self.claim_name(ctx.org_id, &group.group_name, group_id)?;
            self.names.remove_if(&(ctx.org_id, current.group_name), |_, id| *id == group_id);
        }
        self.groups.insert(group_id, group);
        Ok(Scoped::new(ctx.org_id, group_id))
    }

    async fn delete(&self, ctx: &UserContext, group_id: i32) -> Result<Scoped<i32>, ConsoleError> {
        let group = self.owned_group(ctx, group_id)?;
        self.groups.remove(&group_id);
        self.names.remove_if(&(ctx.org_id, group.group_name), |_, id| *id == group_id);
        self.addresses.retain(|(gid, _), _| *gid != group_id);
        debug!(org_id = ctx.org_id, group_id, "deleted scan group");
        Ok(Scoped::new(ctx.org_id, group_id))
    }

    async fn pause(&self, ctx: &UserContext, group_id: i32) -> Result<Scoped<i32>, ConsoleError> {
        self.set_paused(ctx, group_id, true)
    }

    async fn resume(&self, ctx: &UserContext, group_id: i32) -> Result<Scoped<i32>, ConsoleError> {
        self.set_paused(ctx, group_id, false)
    }
}

#[async_trait]
impl AddressService for MemoryBackend {
    async fn get(
        &self,
        ctx: &UserContext,
        filter: &ScanGroupAddressFilter,
    ) -> Result<Scoped<Vec<ScanGroupAddress>>, ConsoleError> {
        Ok(Scoped::new(ctx.org_id, self.filtered(filter)))
    }

    async fn get_host_list(
        &self,
        ctx: &UserContext,
        filter: &ScanGroupAddressFilter,
    ) -> Result<Scoped<Vec<ScanGroupHostList>>, ConsoleError> {
        Ok(Scoped::new(ctx.org_id, aggregate_hosts(&self.filtered(filter))))
    }

    async fn count(&self, ctx: &UserContext, group_id: i32) -> Result<Scoped<usize>, ConsoleError> {
        Ok(Scoped::new(ctx.org_id, self.group_addresses(ctx.org_id, group_id).len()))
    }

    async fn update(
        &self,
        ctx: &UserContext,
        addrs: HashMap<String, ScanGroupAddress>,
    ) -> Result<Scoped<usize>, ConsoleError> {
        let mut written = 0;
        for (hash, mut addr) in addrs {
            if addr.org_id != ctx.org_id {
                return Err(ConsoleError::Rejected(format!("address {} belongs to another org", hash)));
            }
            self.owned_group(ctx, addr.group_id)?;

            let key = (addr.group_id, hash);
            addr.address_id = match self.addresses.get(&key) {
                Some(existing) => existing.address_id,
                None => self.next_address_id.fetch_add(1, Ordering::SeqCst) + 1,
            };
            self.addresses.insert(key, addr);
            written += 1;
        }
        Ok(Scoped::new(ctx.org_id, written))
    }

    async fn delete(&self, ctx: &UserContext, group_id: i32, address_ids: &[i64]) -> Result<Scoped<()>, ConsoleError> {
        self.mark(ctx, group_id, address_ids, |a| a.deleted = true)?;
        Ok(Scoped::new(ctx.org_id, ()))
    }

    async fn ignore(
        &self,
        ctx: &UserContext,
        group_id: i32,
        address_ids: &[i64],
        ignore_value: bool,
    ) -> Result<Scoped<()>, ConsoleError> {
        self.mark(ctx, group_id, address_ids, |a| a.ignored = ignore_value)?;
        Ok(Scoped::new(ctx.org_id, ()))
    }
}

#[async_trait]
impl OrganizationService for MemoryBackend {
    async fn get(&self, ctx: &UserContext) -> Result<Scoped<Organization>, ConsoleError> {
        self.organizations
            .get(&ctx.org_id)
            .map(|o| Scoped::new(o.org_id, o.value().clone()))
            .ok_or_else(|| ConsoleError::NotFound(format!("organization {}", ctx.org_id)))
    }
}

#[async_trait]
impl UserService for MemoryBackend {
    async fn get(&self, ctx: &UserContext) -> Result<Scoped<User>, ConsoleError> {
        self.users
            .get(&ctx.user_cid)
            .filter(|u| u.org_id == ctx.org_id)
            .map(|u| Scoped::new(u.org_id, u.value().clone()))
            .ok_or_else(|| ConsoleError::NotFound(format!("user {}", ctx.user_cid)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::make_addrs;
    use crate::models::Subscription;
    use crate::scangroup::fixtures::user_context;
    use std::collections::BTreeSet;

    fn group(name: &str) -> ScanGroup {
        ScanGroup { group_name: name.into(), paused: true, ..Default::default() }
    }

    #[tokio::test]
    async fn test_create_assigns_ids_and_scopes_to_org() {
        let backend = MemoryBackend::new();
        let ctx = user_context(Subscription::Enterprise);
        let first = backend.create(&ctx, group("a")).await.unwrap();
        let second = backend.create(&ctx, group("b")).await.unwrap();
        assert_eq!(first.value, 1);
        assert_eq!(second.value, 2);

        let other = UserContext { org_id: 99, ..ctx.clone() };
        assert!(matches!(ScanGroupService::get(&backend, &other, 1).await, Err(ConsoleError::NotFound(_))));
        assert_eq!(ScanGroupService::count(&backend, &ctx).await.unwrap().value, 2);
    }

    #[tokio::test]
    async fn test_duplicate_name_conflicts() {
        let backend = MemoryBackend::new();
        let ctx = user_context(Subscription::Enterprise);
        backend.create(&ctx, group("a")).await.unwrap();
        assert!(matches!(backend.create(&ctx, group("a")).await, Err(ConsoleError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_rename_into_taken_name_conflicts() {
        let backend = MemoryBackend::new();
        let ctx = user_context(Subscription::Enterprise);
        backend.create(&ctx, group("alpha")).await.unwrap();
        let beta_id = backend.create(&ctx, group("beta")).await.unwrap().value;

        let mut beta = ScanGroupService::get(&backend, &ctx, beta_id).await.unwrap().value;
        beta.group_name = "alpha".into();
        assert!(matches!(ScanGroupService::update(&backend, &ctx, beta).await, Err(ConsoleError::Conflict(_))));

        let names: Vec<String> = backend.groups(&ctx).await.unwrap().value.into_iter().map(|g| g.group_name).collect();
        assert_eq!(names, vec!["alpha", "beta"]);
    }

    #[tokio::test]
    async fn test_rename_releases_old_name() {
        let backend = MemoryBackend::new();
        let ctx = user_context(Subscription::Enterprise);
        let id = backend.create(&ctx, group("alpha")).await.unwrap().value;

        let mut renamed = ScanGroupService::get(&backend, &ctx, id).await.unwrap().value;
        renamed.group_name = "gamma".into();
        ScanGroupService::update(&backend, &ctx, renamed.clone()).await.unwrap();
        // Same name again is not a conflict with itself.
        ScanGroupService::update(&backend, &ctx, renamed).await.unwrap();

        assert!(backend.create(&ctx, group("alpha")).await.is_ok());
        assert!(matches!(backend.create(&ctx, group("gamma")).await, Err(ConsoleError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_delete_frees_name() {
        let backend = MemoryBackend::new();
        let ctx = user_context(Subscription::Enterprise);
        let id = backend.create(&ctx, group("alpha")).await.unwrap().value;
        ScanGroupService::delete(&backend, &ctx, id).await.unwrap();
        assert!(backend.create(&ctx, group("alpha")).await.is_ok());
    }

    #[tokio::test]
    async fn test_concurrent_creates_of_one_name_admit_one() {
        let backend = std::sync::Arc::new(MemoryBackend::new());
        let ctx = user_context(Subscription::Enterprise);

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let backend = backend.clone();
                let ctx = ctx.clone();
                tokio::spawn(async move { backend.create(&ctx, group("same")).await.is_ok() })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap() {
                created += 1;
            }
        }
        assert_eq!(created, 1);
        assert_eq!(ScanGroupService::count(&*backend, &ctx).await.unwrap().value, 1);
    }

    #[tokio::test]
    async fn test_pause_resume() {
        let backend = MemoryBackend::new();
        let ctx = user_context(Subscription::Enterprise);
        let id = backend.create(&ctx, group("a")).await.unwrap().value;
        backend.resume(&ctx, id).await.unwrap();
        assert!(!ScanGroupService::get(&backend, &ctx, id).await.unwrap().value.paused);
        backend.pause(&ctx, id).await.unwrap();
        let g = ScanGroupService::get(&backend, &ctx, id).await.unwrap().value;
        assert!(g.paused);
        assert!(g.last_paused_time > 0);
    }

    #[tokio::test]
    async fn test_address_upsert_keeps_ids() {
        let backend = MemoryBackend::new();
        let ctx = user_context(Subscription::Enterprise);
        let gid = backend.create(&ctx, group("a")).await.unwrap().value;

        let input: BTreeSet<String> = ["example.com".to_string(), "10.0.0.1".to_string()].into();
        let written = AddressService::update(&backend, &ctx, make_addrs(&input, ctx.org_id, gid, 1)).await.unwrap();
        assert_eq!(written.value, 2);
        AddressService::update(&backend, &ctx, make_addrs(&input, ctx.org_id, gid, 2)).await.unwrap();
        assert_eq!(AddressService::count(&backend, &ctx, gid).await.unwrap().value, 2);

        let filter = ScanGroupAddressFilter { org_id: ctx.org_id, group_id: gid, ..Default::default() };
        let addrs = AddressService::get(&backend, &ctx, &filter).await.unwrap().value;
        let ids: Vec<i64> = addrs.iter().map(|a| a.address_id).collect();
        assert_eq!(ids, vec![1, 2]);

        AddressService::delete(&backend, &ctx, gid, &[1]).await.unwrap();
        assert_eq!(AddressService::count(&backend, &ctx, gid).await.unwrap().value, 1);
    }

    #[tokio::test]
    async fn test_address_update_requires_owned_group() {
        let backend = MemoryBackend::new();
        let ctx = user_context(Subscription::Enterprise);
        let input: BTreeSet<String> = ["example.com".to_string()].into();
        let err = AddressService::update(&backend, &ctx, make_addrs(&input, ctx.org_id, 42, 1)).await.unwrap_err();
        assert!(matches!(err, ConsoleError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_seeded_org_and_user() {
        let ctx = user_context(Subscription::Enterprise);
        let backend = MemoryBackend::seeded(
            vec![Organization { org_id: ctx.org_id, port_scan_enabled: true, ..Default::default() }],
            vec![User { org_id: ctx.org_id, user_cid: ctx.user_cid.clone(), agreement_accepted: true, ..Default::default() }],
        );
        assert!(OrganizationService::get(&backend, &ctx).await.unwrap().value.port_scan_enabled);
        assert!(UserService::get(&backend, &ctx).await.unwrap().value.agreement_accepted);
    }
}
