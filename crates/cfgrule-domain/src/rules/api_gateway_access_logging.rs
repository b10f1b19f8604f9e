use crate::engine::Assessment;
use crate::policy::{EffectiveConfig, RuleParameters};
use cfgrule_types::{ComplianceVerdict, ConfigurationItem, StageConfiguration, ids};

/// A stage is compliant when it defines access log settings.
///
/// Only presence is checked: `format` is not validated, so a stage logging in an
/// unparseable format (or with sub-fields of unexpected types) still passes.
pub fn run(
    item: &ConfigurationItem<StageConfiguration>,
    _params: &RuleParameters,
    cfg: &EffectiveConfig,
) -> Assessment {
    let resource_id = item.resource_id.as_str();

    match &item.configuration.access_log_settings {
        Some(settings) if !settings.is_empty() => {
            Assessment::new(ComplianceVerdict::compliant(&cfg.resource_type, resource_id))
        }
        _ => Assessment::with_code(
            ComplianceVerdict::non_compliant(
                &cfg.resource_type,
                resource_id,
                ids::ANNOTATION_ACCESS_LOG_SETTINGS_MISSING,
            ),
            ids::CODE_ACCESS_LOG_SETTINGS_MISSING,
        ),
    }
}
