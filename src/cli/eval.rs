//! Evaluate condition expressions against JSON input

use super::CliError;
use crate::{Value, evaluate, populate_prepared_conditions};

/// Options for the eval command
#[derive(Debug, Clone, Default)]
pub struct EvalOptions {
    /// The expression to evaluate
    pub expression: String,
    /// JSON input string
    pub input: Option<String>,
    /// Pretty-print the result
    pub pretty: bool,
    /// Prepared conditions as `name=expression` pairs, substituted into
    /// the expression before evaluation, in the order given
    pub conditions: Vec<String>,
}

/// Execute a sift eval operation, returning the rendered JSON result.
pub fn execute_eval(options: &EvalOptions) -> Result<String, CliError> {
    let prepared: Vec<(&str, &str)> = options
        .conditions
        .iter()
        .map(|spec| {
            spec.split_once('=')
                .ok_or_else(|| CliError::BadCondition(spec.clone()))
        })
        .collect::<Result<_, _>>()?;
    let expression = populate_prepared_conditions(&options.expression, &prepared);

    let json_str = options.input.as_ref().ok_or(CliError::NoInput)?;
    let document: serde_json::Value = serde_json::from_str(json_str).map_err(CliError::Json)?;
    let context = Value::from(document);

    let result = evaluate(&expression, &context).map_err(CliError::Eval)?;

    let output = serde_json::Value::from(result);
    let rendered = if options.pretty {
        serde_json::to_string_pretty(&output)
    } else {
        serde_json::to_string(&output)
    }
    .map_err(CliError::Json)?;

    Ok(rendered)
}
