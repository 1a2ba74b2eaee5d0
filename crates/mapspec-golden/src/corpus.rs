//! Test corpus management for golden tests

use crate::{GoldenError, Result};
use mapspec_core::MapOptions;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A test case in the corpus
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    /// Name of the test case
    pub name: String,

    /// Category/group of the test
    pub category: String,

    /// Declarative mapping specification, or the name of a sibling `.json` file holding it
    pub spec: Value,

    /// Value handed to the mapper
    pub input: Value,

    /// Options for the mapping call
    #[serde(default)]
    pub options: MapOptions,

    /// Expected behavior configuration
    pub expectations: TestExpectations,

    /// Test metadata
    pub metadata: TestMetadata,
}

/// Expected behavior for a test
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestExpectations {
    /// Expected mapper output; `Some(Value::Null)` for an explicit `null`
    #[serde(default, deserialize_with = "present_value", skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,

    /// Expected error substring; set for cases that must fail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_pattern: Option<String>,
}

/// Keep an explicit `null` distinct from a missing key
fn present_value<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Metadata about a test case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestMetadata {
    /// Description of what this tests
    pub description: String,

    /// Tags for categorization
    #[serde(default)]
    pub tags: Vec<String>,

    /// Whether this test is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Priority level (lower = higher priority)
    #[serde(default = "default_priority")]
    pub priority: u32,
}

fn default_true() -> bool {
    true
}

fn default_priority() -> u32 {
    100
}

/// Manages the test corpus
pub struct CorpusManager {
    corpus_dir: PathBuf,
}

impl CorpusManager {
    /// Create a new corpus manager
    pub fn new(corpus_dir: impl AsRef<Path>) -> Self {
        Self {
            corpus_dir: corpus_dir.as_ref().to_path_buf(),
        }
    }

    /// Discover all test cases in the corpus
    pub fn discover_tests(&self) -> Result<Vec<TestCase>> {
        let mut tests = Vec::new();

        if !self.corpus_dir.exists() {
            return Ok(tests);
        }

        for entry in WalkDir::new(&self.corpus_dir)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            if path.is_file() && path.file_name() == Some(std::ffi::OsStr::new("test.json")) {
                match self.load_test_case(path) {
                    Ok(test_case) => tests.push(test_case),
                    Err(e) => {
                        eprintln!("Warning: Failed to load test case {:?}: {}", path, e);
                    }
                }
            }
        }

        tests.sort_by(|a, b| {
            a.metadata
                .priority
                .cmp(&b.metadata.priority)
                .then_with(|| a.category.cmp(&b.category))
                .then_with(|| a.name.cmp(&b.name))
        });

        Ok(tests)
    }

    /// Load a specific test case
    pub fn load_test_case(&self, path: &Path) -> Result<TestCase> {
        let content = fs::read_to_string(path)?;
        let mut test_case: TestCase = serde_json::from_str(&content)?;

        // Specifications may live in their own file next to test.json
        if let Value::String(ref filename) = test_case.spec {
            if filename.ends_with(".json") {
                let test_dir = path.parent().ok_or_else(|| {
                    GoldenError::CorpusError(format!("Test case {:?} has no parent directory", path))
                })?;
                let spec_content = fs::read_to_string(test_dir.join(filename))?;
                test_case.spec = serde_json::from_str(&spec_content)?;
            }
        }

        Ok(test_case)
    }

    /// Filter tests by category
    pub fn filter_by_category(&self, tests: Vec<TestCase>, category: &str) -> Vec<TestCase> {
        tests
            .into_iter()
            .filter(|t| t.category == category || category == "*")
            .collect()
    }

    /// Filter tests by tags
    pub fn filter_by_tags(&self, tests: Vec<TestCase>, tags: &[String]) -> Vec<TestCase> {
        if tags.is_empty() {
            return tests;
        }

        tests
            .into_iter()
            .filter(|t| tags.iter().any(|tag| t.metadata.tags.contains(tag)))
            .collect()
    }

    /// Create the corpus directory structure with one sample case
    pub fn init_corpus(&self) -> Result<()> {
        for dir in ["basic", "nested", "edge-cases", "errors"] {
            fs::create_dir_all(self.corpus_dir.join(dir))?;
        }

        self.create_sample_test()
    }

    /// Create a sample test case
    fn create_sample_test(&self) -> Result<()> {
        let test_dir = self.corpus_dir.join("basic/hello-world");
        fs::create_dir_all(&test_dir)?;

        let test_case = TestCase {
            name: "hello-world".to_string(),
            category: "basic".to_string(),
            spec: serde_json::json!(["greeting", {"name": "who"}]),
            input: serde_json::json!({"greeting": "hello", "name": "world", "ignored": true}),
            options: MapOptions::default(),
            expectations: TestExpectations {
                output: Some(serde_json::json!({"greeting": "hello", "who": "world"})),
                error_pattern: None,
            },
            metadata: TestMetadata {
                description: "Copy one field and rename another".to_string(),
                tags: vec!["basic".to_string(), "smoke".to_string()],
                enabled: true,
                priority: 1,
            },
        };

        let content = serde_json::to_string_pretty(&test_case)?;
        fs::write(test_dir.join("test.json"), content)?;

        Ok(())
    }

    /// Get statistics about the corpus
    pub fn get_statistics(&self) -> Result<CorpusStatistics> {
        let tests = self.discover_tests()?;

        let mut stats = CorpusStatistics {
            total_tests: tests.len(),
            ..Default::default()
        };

        for test in tests {
            if test.metadata.enabled {
                stats.enabled_tests += 1;
            } else {
                stats.disabled_tests += 1;
            }

            if test.expectations.error_pattern.is_some() {
                stats.error_tests += 1;
            }

            *stats.tests_by_category.entry(test.category).or_insert(0) += 1;
        }

        Ok(stats)
    }
}

/// Statistics about the test corpus
#[derive(Debug, Default)]
pub struct CorpusStatistics {
    pub total_tests: usize,
    pub enabled_tests: usize,
    pub disabled_tests: usize,
    pub error_tests: usize,
    pub tests_by_category: std::collections::HashMap<String, usize>,
}

impl CorpusStatistics {
    /// Print statistics to stdout
    pub fn print(&self) {
        println!("=== Corpus Statistics ===");
        println!("Total tests: {}", self.total_tests);
        println!("Enabled: {}", self.enabled_tests);
        println!("Disabled: {}", self.disabled_tests);
        println!("Expecting errors: {}", self.error_tests);

        if !self.tests_by_category.is_empty() {
            println!("\nTests by category:");
            let mut categories: Vec<_> = self.tests_by_category.iter().collect();
            categories.sort_by_key(|(k, _)| k.as_str());
            for (category, count) in categories {
                println!("  {}: {}", category, count);
            }
        }
    }
}
