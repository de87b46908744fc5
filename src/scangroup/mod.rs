//! Scan-group configuration builder.
//!
//! A create or update request moves through four stages, stopping at the
//! first failure: quota (create only, see [`quota`]), field validation
//! ([`details`]), port policy ([`ports`]) and assembly ([`assembler`]).

pub mod assembler;
pub mod details;
pub mod ports;
pub mod quota;

use chrono::Utc;

pub use details::{DetailsValidator, ScanGroupDetails};
pub use ports::PortPolicyError;

use crate::errors::ConsoleError;
use crate::models::{ModuleConfiguration, ScanGroup, UserContext};

/// Placeholder input location for groups whose address list has not been uploaded.
pub const EMPTY_INPUT_URL: &str = "s3://empty";

/// Validate `details` and turn them into a module configuration.
pub fn build_module_configuration(
    validator: &DetailsValidator,
    details: &ScanGroupDetails,
    org_port_scan_enabled: bool,
) -> Result<ModuleConfiguration, ConsoleError> {
    validator.validate(details).map_err(ConsoleError::FieldValidation)?;
    let port_module = ports::port_config_for(details, org_port_scan_enabled)?;
    Ok(assembler::assemble(details, port_module))
}

/// Nanoseconds since the epoch, the unit every group timestamp uses.
pub fn now_nanos() -> i64 {
    Utc::now().timestamp_nanos_opt().unwrap_or_default()
}

/// A freshly created group: paused, with no uploaded input yet.
pub fn new_scan_group(
    ctx: &UserContext,
    group_name: &str,
    details: &ScanGroupDetails,
    module_configurations: ModuleConfiguration,
    now: i64,
) -> ScanGroup {
    ScanGroup {
        org_id: ctx.org_id,
        group_id: 0,
        group_name: group_name.to_string(),
        creation_time: now,
        created_by: ctx.user_cid.clone(),
        created_by_id: ctx.user_id,
        modified_by: ctx.user_cid.clone(),
        modified_by_id: ctx.user_id,
        modified_time: now,
        original_input_s3_url: EMPTY_INPUT_URL.to_string(),
        module_configurations,
        paused: true,
        deleted: false,
        last_paused_time: 0,
        archive_after_days: details.archive_after_days,
    }
}

/// Replace the configurable parts of `group`, stamping the modifier.
pub fn apply_update(
    group: &mut ScanGroup,
    ctx: &UserContext,
    details: &ScanGroupDetails,
    module_configurations: ModuleConfiguration,
    now: i64,
) {
    group.module_configurations = module_configurations;
    group.archive_after_days = details.archive_after_days;
    group.modified_by = ctx.user_cid.clone();
    group.modified_by_id = ctx.user_id;
    group.modified_time = now;
}
