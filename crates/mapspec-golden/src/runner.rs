//! Golden test runner for executing corpus cases

use crate::{
    corpus::{CorpusManager, TestCase},
    diff::DiffEngine,
    GoldenConfig, GoldenError, Result,
};
use colored::*;
use mapspec_core::{Mapper, TransformRegistry};
use serde_json::Value;
use std::time::Instant;

/// Result of running a golden test
#[derive(Debug)]
pub struct TestResult {
    /// Name of the test
    pub name: String,

    /// Whether the test passed
    pub passed: bool,

    /// Error message if failed
    pub error: Option<String>,

    /// Diff output if comparison failed
    pub diff: Option<String>,

    /// Execution time in milliseconds
    pub duration_ms: u64,
}

impl TestResult {
    /// Print the test result
    pub fn print(&self, verbose: bool) {
        let status = if self.passed {
            "PASS".green().bold()
        } else {
            "FAIL".red().bold()
        };

        println!("{} {} ({}ms)", status, self.name, self.duration_ms);

        if let Some(ref error) = self.error {
            println!("  {}: {}", "Error".red(), error);
        }

        if verbose || !self.passed {
            if let Some(ref diff) = self.diff {
                println!("{}", diff);
            }
        }
    }
}

/// Outcome of executing one case before it is turned into a [`TestResult`]
enum Outcome {
    Passed,
    Mismatch(String),
    Failed(String),
}

/// Runner for golden tests
pub struct GoldenTestRunner {
    config: GoldenConfig,
    corpus_manager: CorpusManager,
    registry: TransformRegistry,
}

impl GoldenTestRunner {
    /// Create a new test runner using the built-in transforms
    pub fn new(config: GoldenConfig) -> Self {
        Self::with_registry(config, TransformRegistry::with_built_ins())
    }

    /// Create a runner whose cases may name extra transforms and mappers
    pub fn with_registry(config: GoldenConfig, registry: TransformRegistry) -> Self {
        let corpus_manager = CorpusManager::new(&config.corpus_dir);

        Self {
            config,
            corpus_manager,
            registry,
        }
    }

    /// Run a single test by `category/name`
    pub fn run_test(&self, test_name: &str) -> Result<TestResult> {
        let test_path = self.config.corpus_dir.join(test_name).join("test.json");
        let test_case = self.corpus_manager.load_test_case(&test_path)?;

        let test_result = self.run_case(test_name, &test_case);

        if self.config.verbose {
            test_result.print(true);
        }

        if test_result.passed {
            Ok(test_result)
        } else {
            Err(GoldenError::TestFailed(format!(
                "Test '{}' failed: {}",
                test_name,
                test_result.error.as_deref().unwrap_or("Unknown error")
            )))
        }
    }

    /// Run a batch of tests whose name or category contains `pattern` (`*` for all)
    pub fn run_batch(&self, pattern: &str) -> Result<Vec<TestResult>> {
        let tests = self.corpus_manager.discover_tests()?;

        let filtered_tests: Vec<_> = if pattern == "*" {
            tests
        } else {
            tests
                .into_iter()
                .filter(|t| t.name.contains(pattern) || t.category.contains(pattern))
                .collect()
        };

        if filtered_tests.is_empty() {
            return Err(GoldenError::CorpusError(format!(
                "No tests found matching pattern '{}'",
                pattern
            )));
        }

        println!("Running {} tests...\n", filtered_tests.len());

        let mut results = Vec::with_capacity(filtered_tests.len());
        let mut failed = 0;

        for test_case in &filtered_tests {
            let test_name = format!("{}/{}", test_case.category, test_case.name);
            let result = self.run_case(&test_name, test_case);

            if !result.passed {
                failed += 1;
            }

            result.print(self.config.verbose);
            results.push(result);
        }

        println!("\n{}", "=== Test Summary ===".bold());
        println!(
            "{}: {} passed, {} failed",
            "Results".bold(),
            (results.len() - failed).to_string().green(),
            failed.to_string().red()
        );

        if failed > 0 {
            Err(GoldenError::TestFailed(format!("{} test(s) failed", failed)))
        } else {
            Ok(results)
        }
    }

    fn run_case(&self, test_name: &str, test_case: &TestCase) -> TestResult {
        let start = Instant::now();
        let outcome = self.execute_test(test_case);
        let duration_ms = start.elapsed().as_millis() as u64;

        let (passed, error, diff) = match outcome {
            Outcome::Passed => (true, None, None),
            Outcome::Mismatch(diff) => (false, Some("Output mismatch".to_string()), Some(diff)),
            Outcome::Failed(message) => (false, Some(message), None),
        };

        TestResult {
            name: test_name.to_string(),
            passed,
            error,
            diff,
            duration_ms,
        }
    }

    /// Execute a single test case
    fn execute_test(&self, test_case: &TestCase) -> Outcome {
        if !test_case.metadata.enabled {
            return Outcome::Passed;
        }

        if test_case.expectations.output.is_none() && test_case.expectations.error_pattern.is_none() {
            return Outcome::Failed(
                GoldenError::CorpusError("test case has neither an output nor an error_pattern".to_string())
                    .to_string(),
            );
        }

        let result = self.perform_mapping(test_case);

        match (&test_case.expectations.error_pattern, result) {
            (Some(pattern), Err(e)) => {
                let message = e.to_string();
                if message.contains(pattern.as_str()) {
                    Outcome::Passed
                } else {
                    Outcome::Failed(format!(
                        "Expected error containing '{}', got '{}'",
                        pattern, message
                    ))
                }
            }
            (Some(pattern), Ok(output)) => Outcome::Failed(format!(
                "Expected error containing '{}', mapping produced {}",
                pattern, output
            )),
            (None, Err(e)) => Outcome::Failed(e.to_string()),
            (None, Ok(actual)) => {
                let expected = test_case.expectations.output.as_ref().unwrap_or(&Value::Null);
                let diff_result = DiffEngine::new(self.config.diff_options.clone()).compare(expected, &actual);
                if diff_result.matches {
                    Outcome::Passed
                } else {
                    Outcome::Mismatch(diff_result.diff_output)
                }
            }
        }
    }

    /// Build the mapper and run it over the case input
    fn perform_mapping(&self, test_case: &TestCase) -> Result<Value> {
        let mapper = Mapper::from_json_with(&test_case.spec, &self.registry)?;
        Ok(mapper.map_with(&test_case.input, &test_case.options)?)
    }

    /// Initialize the corpus with sample tests
    pub fn init_corpus(&self) -> Result<()> {
        self.corpus_manager.init_corpus()
    }

    /// List all available tests
    pub fn list_tests(&self) -> Result<Vec<String>> {
        let tests = self.corpus_manager.discover_tests()?;
        Ok(tests.into_iter().map(|t| format!("{}/{}", t.category, t.name)).collect())
    }

    /// Get corpus statistics
    pub fn get_statistics(&self) -> Result<()> {
        let stats = self.corpus_manager.get_statistics()?;
        stats.print();
        Ok(())
    }
}
