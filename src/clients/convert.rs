use super::wire::{WireModuleConfiguration, WireScanGroup, WireUserContext};
use crate::models::{ModuleConfiguration, ScanGroup, UserContext};

impl From<&UserContext> for WireUserContext {
    fn from(ctx: &UserContext) -> Self {
        Self {
            trace_id: ctx.trace_id.clone(),
            org_id: ctx.org_id,
            org_cid: ctx.org_cid.clone(),
            user_id: ctx.user_id,
            user_cid: ctx.user_cid.clone(),
            roles: ctx.roles.clone(),
            ip_address: ctx.ip_address.clone(),
            subscription_id: ctx.subscription.id(),
            org_status_id: ctx.org_status_id,
        }
    }
}

impl From<WireUserContext> for UserContext {
    fn from(w: WireUserContext) -> Self {
        Self {
            trace_id: w.trace_id,
            org_id: w.org_id,
            org_cid: w.org_cid,
            user_id: w.user_id,
            user_cid: w.user_cid,
            roles: w.roles,
            ip_address: w.ip_address,
            subscription: w.subscription_id.into(),
            org_status_id: w.org_status_id,
        }
    }
}

impl From<&ModuleConfiguration> for WireModuleConfiguration {
    fn from(m: &ModuleConfiguration) -> Self {
        Self {
            ns_module: Some(m.ns_module.clone()),
            brute_module: Some(m.brute_module.clone()),
            port_module: Some(m.port_module.clone()),
            web_module: Some(m.web_module.clone()),
            keyword_module: Some(m.keyword_module.clone()),
        }
    }
}

impl From<WireModuleConfiguration> for ModuleConfiguration {
    fn from(w: WireModuleConfiguration) -> Self {
        Self {
            ns_module: w.ns_module.unwrap_or_default(),
            brute_module: w.brute_module.unwrap_or_default(),
            port_module: w.port_module.unwrap_or_default(),
            web_module: w.web_module.unwrap_or_default(),
            keyword_module: w.keyword_module.unwrap_or_default(),
        }
    }
}

impl From<&ScanGroup> for WireScanGroup {
    fn from(g: &ScanGroup) -> Self {
        Self {
            org_id: g.org_id,
            group_id: g.group_id,
            group_name: g.group_name.clone(),
            creation_time: g.creation_time,
            created_by: g.created_by.clone(),
            created_by_id: g.created_by_id,
            modified_by: g.modified_by.clone(),
            modified_by_id: g.modified_by_id,
            modified_time: g.modified_time,
            original_input_s3_url: g.original_input_s3_url.clone(),
            module_configurations: Some((&g.module_configurations).into()),
            paused: g.paused,
            deleted: g.deleted,
            last_paused_time: g.last_paused_time,
            archive_after_days: g.archive_after_days,
        }
    }
}

impl From<WireScanGroup> for ScanGroup {
    fn from(w: WireScanGroup) -> Self {
        Self {
            org_id: w.org_id,
            group_id: w.group_id,
            group_name: w.group_name,
            creation_time: w.creation_time,
            created_by: w.created_by,
            created_by_id: w.created_by_id,
            modified_by: w.modified_by,
            modified_by_id: w.modified_by_id,
            modified_time: w.modified_time,
            original_input_s3_url: w.original_input_s3_url,
            module_configurations: w.module_configurations.map(Into::into).unwrap_or_default(),
            paused: w.paused,
            deleted: w.deleted,
            last_paused_time: w.last_paused_time,
            archive_after_days: w.archive_after_days,
        }
    }
}
