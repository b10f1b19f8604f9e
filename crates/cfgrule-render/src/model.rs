#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableCompliance {
    Compliant,
    NonCompliant,
    NotApplicable,
    InsufficientData,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableVerdictStatus {
    Pass,
    Fail,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableEvaluation {
    pub compliance: RenderableCompliance,
    pub resource_type: String,
    pub resource_id: String,
    pub source: String,
    pub code: Option<String>,
    pub annotation: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableData {
    pub rule: String,
    pub items_scanned: u32,
    pub compliant: u32,
    pub non_compliant: u32,
    pub not_applicable: u32,
    pub runtime_error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableReport {
    pub verdict: RenderableVerdictStatus,
    pub evaluations: Vec<RenderableEvaluation>,
    pub data: RenderableData,
}
