//! MCP prompt templates

use crate::mcp::protocol::{GetPromptResult, JsonRpcError, Prompt, PromptArgument, PromptMessage};
use serde_json::{Map, Value};

/// Accepted values of the `metricType` argument
pub const METRIC_TYPES: [&str; 4] = ["pageviews", "users", "events", "behavior"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    AnalyzeData,
    CreateReport,
    SelectDimensions,
}

impl PromptKind {
    pub const ALL: [PromptKind; 3] = [
        PromptKind::AnalyzeData,
        PromptKind::CreateReport,
        PromptKind::SelectDimensions,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PromptKind::AnalyzeData => "analyze-data",
            PromptKind::CreateReport => "create-report",
            PromptKind::SelectDimensions => "select-dimensions",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    fn description(self) -> &'static str {
        match self {
            PromptKind::AnalyzeData => "Analyze GA4 data for a date range",
            PromptKind::CreateReport => "Draft an analytics report for an audience",
            PromptKind::SelectDimensions => "Recommend dimensions for a business goal",
        }
    }

    /// (name, description) of every argument; all are required
    fn arguments(self) -> &'static [(&'static str, &'static str)] {
        match self {
            PromptKind::AnalyzeData => &[
                ("metricType", "Type of metrics to analyze: pageviews, users, events or behavior"),
                ("startDate", "Start date in YYYY-MM-DD format"),
                ("endDate", "End date in YYYY-MM-DD format"),
            ],
            PromptKind::CreateReport => &[
                ("title", "Report title"),
                ("metrics", "Comma-separated metrics to include in the report"),
                ("startDate", "Start date in YYYY-MM-DD format"),
                ("endDate", "End date in YYYY-MM-DD format"),
                ("audienceType", "Target audience for the report"),
            ],
            PromptKind::SelectDimensions => &[
                ("metricType", "Type of metrics to analyze: pageviews, users, events or behavior"),
                ("businessGoal", "Business goal for the analysis"),
            ],
        }
    }

    pub fn definition(self) -> Prompt {
        Prompt {
            name: self.name().into(),
            description: self.description().into(),
            arguments: self
                .arguments()
                .iter()
                .map(|(name, description)| PromptArgument {
                    name: (*name).into(),
                    description: (*description).into(),
                    required: true,
                })
                .collect(),
        }
    }

    fn render(self, args: &PromptArgs<'_>) -> String {
        match self {
            PromptKind::AnalyzeData => format!(
                "I need you to analyze Google Analytics 4 data for my website from {} to {}, \
                 focusing on {}. Please provide insights on trends, anomalies, and potential \
                 opportunities for improvement. Format your analysis in a clear, structured way \
                 with bullet points for key findings.",
                args.get("startDate"),
                args.get("endDate"),
                args.get("metricType"),
            ),
            PromptKind::CreateReport => format!(
                "Please create a comprehensive {}-friendly Google Analytics report titled \"{}\" \
                 covering the period from {} to {}. The report should focus on the following \
                 metrics: {}. Include an executive summary, detailed analysis of each metric, \
                 visualizations, and actionable recommendations.",
                args.get("audienceType"),
                args.get("title"),
                args.get("startDate"),
                args.get("endDate"),
                args.get("metrics"),
            ),
            PromptKind::SelectDimensions => format!(
                "I'm analyzing Google Analytics 4 data focusing on {} to achieve my business goal \
                 of \"{}\". Please help me select the most relevant dimensions to include in my \
                 analysis, explaining why each dimension is important and how it relates to my \
                 goal. Provide a list of 3-5 recommended dimensions with justification for each.",
                args.get("metricType"),
                args.get("businessGoal"),
            ),
        }
    }
}

/// Checked string arguments of one prompt
struct PromptArgs<'a> {
    values: &'a Map<String, Value>,
}

impl PromptArgs<'_> {
    fn get(&self, name: &str) -> &str {
        self.values.get(name).and_then(Value::as_str).unwrap_or_default()
    }
}

pub fn list_prompts() -> Vec<Prompt> {
    PromptKind::ALL.into_iter().map(PromptKind::definition).collect()
}

/// Render a prompt; missing or malformed arguments are an invalid-params error
pub fn get_prompt(name: &str, arguments: &Map<String, Value>) -> Result<GetPromptResult, JsonRpcError> {
    let kind = PromptKind::from_name(name)
        .ok_or_else(|| JsonRpcError::invalid_params(format!("Unknown prompt: {name}")))?;

    let mut problems = Vec::new();
    for (arg, _) in kind.arguments() {
        match arguments.get(*arg).and_then(Value::as_str) {
            None => problems.push(format!("{arg}: Required")),
            Some(value) if *arg == "metricType" && !METRIC_TYPES.contains(&value) => {
                problems.push(format!("{arg}: one of {}", METRIC_TYPES.join(", ")))
            }
            Some(_) => {}
        }
    }
    if !problems.is_empty() {
        return Err(JsonRpcError::invalid_params(format!(
            "Invalid arguments for prompt {name}: {}",
            problems.join("; ")
        )));
    }

    let args = PromptArgs { values: arguments };
    Ok(GetPromptResult {
        description: kind.description().into(),
        messages: vec![PromptMessage::user(kind.render(&args))],
    })
}
