//! Diff engine for comparing expected and actual mapper output

use colored::*;
use serde_json::Value;
use similar::{ChangeTag, TextDiff};
use std::collections::BTreeSet;

/// Options for diff comparison
#[derive(Debug, Clone)]
pub struct DiffOptions {
    /// Whether to use colored output
    pub colored: bool,

    /// Tolerance for floating point comparison
    pub float_tolerance: f64,

    /// Maximum diff lines to show (0 = unlimited)
    pub max_diff_lines: usize,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            colored: true,
            float_tolerance: 1e-9,
            max_diff_lines: 100,
        }
    }
}

/// Result of a diff operation
#[derive(Debug)]
pub struct DiffResult {
    /// Whether the values match
    pub matches: bool,

    /// Human-readable diff output
    pub diff_output: String,

    /// Paths that differ
    pub differing_paths: Vec<String>,
}

/// Engine for comparing JSON values
pub struct DiffEngine {
    options: DiffOptions,
}

impl DiffEngine {
    /// Create a new diff engine
    pub fn new(options: DiffOptions) -> Self {
        Self { options }
    }

    /// Compare two JSON values
    pub fn compare(&self, expected: &Value, actual: &Value) -> DiffResult {
        if self.values_match(expected, actual) {
            return DiffResult {
                matches: true,
                diff_output: String::new(),
                differing_paths: Vec::new(),
            };
        }

        let mut differing_paths = Vec::new();
        self.collect_diff_paths(expected, actual, String::new(), &mut differing_paths);

        DiffResult {
            matches: false,
            diff_output: self.generate_diff_output(expected, actual),
            differing_paths,
        }
    }

    /// Check if two values match structurally
    ///
    /// Key presence matters: `{"a": null}` does not match `{}`.
    fn values_match(&self, expected: &Value, actual: &Value) -> bool {
        match (expected, actual) {
            (Value::Object(exp), Value::Object(act)) => {
                exp.len() == act.len()
                    && exp.iter().all(|(key, exp_val)| {
                        act.get(key).map_or(false, |act_val| self.values_match(exp_val, act_val))
                    })
            }
            (Value::Array(exp), Value::Array(act)) => {
                exp.len() == act.len()
                    && exp.iter().zip(act.iter()).all(|(e, a)| self.values_match(e, a))
            }
            (Value::Number(exp), Value::Number(act)) => {
                if let (Some(exp_f), Some(act_f)) = (exp.as_f64(), act.as_f64()) {
                    (exp_f - act_f).abs() <= self.options.float_tolerance
                } else {
                    exp == act
                }
            }
            (exp, act) => exp == act,
        }
    }

    /// Generate human-readable diff output
    fn generate_diff_output(&self, expected: &Value, actual: &Value) -> String {
        let expected_str = serde_json::to_string_pretty(expected).unwrap_or_else(|_| expected.to_string());
        let actual_str = serde_json::to_string_pretty(actual).unwrap_or_else(|_| actual.to_string());

        let text_diff = TextDiff::from_lines(&expected_str, &actual_str);
        let mut output = String::new();

        if self.options.colored {
            output.push_str(&"=== Diff Output ===\n".bold().to_string());
        } else {
            output.push_str("=== Diff Output ===\n");
        }

        for (line_count, change) in text_diff.iter_all_changes().enumerate() {
            if self.options.max_diff_lines > 0 && line_count >= self.options.max_diff_lines {
                output.push_str("... (diff truncated) ...\n");
                break;
            }

            let line = match change.tag() {
                ChangeTag::Delete if self.options.colored => {
                    format!("{}{}", "-".red(), change.to_string().red())
                }
                ChangeTag::Delete => format!("-{}", change),
                ChangeTag::Insert if self.options.colored => {
                    format!("{}{}", "+".green(), change.to_string().green())
                }
                ChangeTag::Insert => format!("+{}", change),
                ChangeTag::Equal => format!(" {}", change),
            };

            output.push_str(&line);
        }

        output
    }

    /// Recursively collect paths that differ
    fn collect_diff_paths(&self, expected: &Value, actual: &Value, path: String, paths: &mut Vec<String>) {
        match (expected, actual) {
            (Value::Object(exp), Value::Object(act)) => {
                let all_keys: BTreeSet<_> = exp.keys().chain(act.keys()).collect();

                for key in all_keys {
                    let new_path = if path.is_empty() {
                        key.clone()
                    } else {
                        format!("{}.{}", path, key)
                    };

                    match (exp.get(key), act.get(key)) {
                        (Some(exp_val), Some(act_val)) => {
                            if !self.values_match(exp_val, act_val) {
                                self.collect_diff_paths(exp_val, act_val, new_path, paths);
                            }
                        }
                        (Some(_), None) => paths.push(format!("{} (missing in actual)", new_path)),
                        (None, Some(_)) => paths.push(format!("{} (extra in actual)", new_path)),
                        (None, None) => {}
                    }
                }
            }
            (Value::Array(exp), Value::Array(act)) if exp.len() == act.len() => {
                for (i, (exp_val, act_val)) in exp.iter().zip(act.iter()).enumerate() {
                    if !self.values_match(exp_val, act_val) {
                        self.collect_diff_paths(exp_val, act_val, format!("{}[{}]", path, i), paths);
                    }
                }
            }
            _ => paths.push(if path.is_empty() { "$".to_string() } else { path }),
        }
    }
}
