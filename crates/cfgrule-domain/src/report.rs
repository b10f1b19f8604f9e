use crate::policy::{EffectiveConfig, FailOn};
use cfgrule_types::{CfgruleData, ComplianceType, ReportedEvaluation, Verdict};

#[derive(Clone, Debug)]
pub struct DomainReport {
    pub verdict: Verdict,
    pub evaluations: Vec<ReportedEvaluation>,
    pub data: CfgruleData,
}

/// Order evaluations deterministically and compute the run verdict.
pub fn summarize(mut evaluations: Vec<ReportedEvaluation>, cfg: &EffectiveConfig) -> DomainReport {
    evaluations.sort_by(compare_evaluations);

    let verdict = compute_verdict(&evaluations, cfg.fail_on);

    let mut data = CfgruleData {
        rule: cfg.rule.as_str().to_string(),
        resource_type: cfg.resource_type.clone(),
        profile: cfg.profile.clone(),
        ..CfgruleData::default()
    };
    data.count(&evaluations);

    DomainReport {
        verdict,
        evaluations,
        data,
    }
}

fn compute_verdict(evaluations: &[ReportedEvaluation], fail_on: FailOn) -> Verdict {
    let has_non_compliant = evaluations
        .iter()
        .any(|e| e.compliance_type() == ComplianceType::NonCompliant);

    match (has_non_compliant, fail_on) {
        (true, FailOn::NonCompliant) => Verdict::Fail,
        _ => Verdict::Pass,
    }
}

fn compare_evaluations(a: &ReportedEvaluation, b: &ReportedEvaluation) -> std::cmp::Ordering {
    // Ordering priority:
    // 1) compliance (non-compliant -> insufficient data -> compliant -> not applicable)
    // 2) resource id
    // 3) source document
    let rank = |ty: ComplianceType| match ty {
        ComplianceType::NonCompliant => 0,
        ComplianceType::InsufficientData => 1,
        ComplianceType::Compliant => 2,
        ComplianceType::NotApplicable => 3,
    };

    rank(a.compliance_type())
        .cmp(&rank(b.compliance_type()))
        .then_with(|| {
            a.evaluation
                .verdict
                .compliance_resource_id
                .cmp(&b.evaluation.verdict.compliance_resource_id)
        })
        .then_with(|| a.source.cmp(&b.source))
}
