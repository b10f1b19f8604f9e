use crate::engine::Assessment;
use crate::policy::{EffectiveConfig, RuleId, RuleParameters};
use cfgrule_types::{ConfigurationItem, StageConfiguration};

pub mod api_gateway_access_logging;


pub fn run(
    item: &ConfigurationItem<StageConfiguration>,
    params: &RuleParameters,
    cfg: &EffectiveConfig,
) -> Assessment {
    match cfg.rule {
        RuleId::ApiGatewayAccessLogging => api_gateway_access_logging::run(item, params, cfg),
    }
}
