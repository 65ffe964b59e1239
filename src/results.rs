use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Aggregate outcome of one test run, in the shape the producing framework
/// serializes it. Counts are trusted as-is and never cross-checked against
/// the suite entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RunResult {
    pub start_time: i64,
    pub num_total_tests: usize,
    pub num_passed_tests: usize,
    pub num_failed_tests: usize,
    pub num_pending_tests: usize,
    pub test_results: Vec<SuiteResult>,
}

impl RunResult {
    pub fn from_json_str(data: &str) -> crate::errors::Result<Self> {
        Ok(serde_json::from_str(data)?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiteResult {
    pub test_file_path: String,
    #[serde(default)]
    pub perf_stats: PerfStats,
    #[serde(default)]
    pub test_results: Vec<TestResult>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PerfStats {
    pub start: i64,
    pub end: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    #[serde(default)]
    pub ancestor_titles: Vec<String>,
    pub title: String,
    pub status: TestStatus,
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub failure_messages: Vec<String>,
}

/// Test outcome tag. The vocabulary belongs to the producing framework, so
/// anything outside the common four is carried through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TestStatus {
    Passed,
    Failed,
    Pending,
    Skipped,
    Other(String),
}

impl TestStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TestStatus::Passed => "passed",
            TestStatus::Failed => "failed",
            TestStatus::Pending => "pending",
            TestStatus::Skipped => "skipped",
            TestStatus::Other(tag) => tag,
        }
    }
}

impl From<String> for TestStatus {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "passed" => TestStatus::Passed,
            "failed" => TestStatus::Failed,
            "pending" => TestStatus::Pending,
            "skipped" => TestStatus::Skipped,
            _ => TestStatus::Other(tag),
        }
    }
}

impl From<TestStatus> for String {
    fn from(status: TestStatus) -> Self {
        status.as_str().to_string()
    }
}

impl Display for TestStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("passed", TestStatus::Passed)]
    #[case("failed", TestStatus::Failed)]
    #[case("pending", TestStatus::Pending)]
    #[case("skipped", TestStatus::Skipped)]
    #[case("todo", TestStatus::Other(String::from("todo")))]
    fn status_round_trips_through_raw_tag(#[case] tag: &str, #[case] expected: TestStatus) {
        let status = TestStatus::from(tag.to_string());
        assert_eq!(status, expected);
        assert_eq!(status.as_str(), tag);
        assert_eq!(String::from(status), tag);
    }

    #[test]
    fn run_result_decodes_framework_json() -> crate::errors::Result<()> {
        let data = r#"
            {
                "numTotalTests": 2,
                "numPassedTests": 1,
                "numFailedTests": 1,
                "numPendingTests": 0,
                "startTime": 1498476492,
                "testResults": [
                    {
                        "testFilePath": "/project/feature.test.js",
                        "perfStats": { "start": 1000, "end": 3500 },
                        "testResults": [
                            {
                                "ancestorTitles": ["feature", "edge cases"],
                                "title": "handles empty input",
                                "status": "passed",
                                "duration": 12,
                                "failureMessages": []
                            },
                            {
                                "ancestorTitles": [],
                                "title": "handles bad input",
                                "status": "failed",
                                "duration": null,
                                "failureMessages": ["Error: expected a value"]
                            }
                        ]
                    }
                ]
            }
        "#;

        let run = RunResult::from_json_str(data)?;
        assert_eq!(run.num_total_tests, 2);
        assert_eq!(run.test_results.len(), 1);

        let suite = &run.test_results[0];
        assert_eq!(suite.test_file_path, "/project/feature.test.js");
        assert_eq!(suite.perf_stats.end - suite.perf_stats.start, 2500);

        let tests = &suite.test_results;
        assert_eq!(tests[0].status, TestStatus::Passed);
        assert_eq!(tests[0].duration, Some(12));
        assert_eq!(tests[0].ancestor_titles, vec!["feature", "edge cases"]);
        assert_eq!(tests[1].status, TestStatus::Failed);
        assert_eq!(tests[1].duration, None);
        assert_eq!(tests[1].failure_messages, vec!["Error: expected a value"]);
        Ok(())
    }

    #[test]
    fn missing_optional_fields_default() -> crate::errors::Result<()> {
        let run = RunResult::from_json_str(
            r#"{ "testResults": [ { "testFilePath": "a.test.js" } ] }"#,
        )?;
        assert_eq!(run.num_total_tests, 0);
        assert_eq!(run.start_time, 0);
        assert!(run.test_results[0].test_results.is_empty());
        assert_eq!(run.test_results[0].perf_stats.start, 0);
        Ok(())
    }
}
