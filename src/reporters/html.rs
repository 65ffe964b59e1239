use std::io::Write as IoWrite;

use chrono::{Local, TimeZone};
use quick_xml::{
    events::{BytesEnd, BytesStart, BytesText, Event},
    Writer as XmlWriter,
};

use crate::{
    config::ReportConfig,
    errors::Result,
    files,
    results::{RunResult, SuiteResult, TestResult, TestStatus},
    utils::writer::{WriteBuffer, Writer},
};

const STYLE: &str = include_str!("../assets/style.css");

/// Renders the run into the HTML file at the configured output path,
/// creating missing parent directories and overwriting an existing file.
/// Returns the run untouched so the call can sit in a result pipeline.
pub fn render<'run>(result: &'run RunResult, config: &ReportConfig) -> Result<&'run RunResult> {
    let report = HtmlReport::from_run(result, config)?;
    let file = files::create_file(config.output_path())?;
    let mut writer = Writer::new(WriteBuffer::File(file));
    report.serialize(&mut writer)?;

    Ok(result)
}

/// Same transformation as [`render`], into an in-memory string.
pub fn render_to_string(result: &RunResult, config: &ReportConfig) -> Result<String> {
    let report = HtmlReport::from_run(result, config)?;
    let mut writer = Writer::new(WriteBuffer::Vec(vec![]));
    report.serialize(&mut writer)?;

    Ok(writer.into_string()?)
}

pub struct HtmlReport<'report> {
    pub page_title: &'report str,
    pub start_time: i64,
    pub tests: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub suites: Vec<SuiteSection<'report>>,
}

pub struct SuiteSection<'report> {
    pub file_path: &'report str,
    pub seconds: f64,
    pub rows: Vec<TestRow<'report>>,
}

pub struct TestRow<'report> {
    pub status: &'report str,
    pub ancestors: String,
    pub title: &'report str,
    pub failure_messages: Option<Vec<String>>,
    pub result: String,
}

impl<'report> HtmlReport<'report> {
    /// Folds the run into the document value. Suites with no test entries
    /// are dropped here and never reach the serialized output.
    pub fn from_run(
        result: &'report RunResult,
        config: &'report ReportConfig,
    ) -> Result<HtmlReport<'report>> {
        let suites = result
            .test_results
            .iter()
            .filter(|suite| !suite.test_results.is_empty())
            .map(|suite| SuiteSection::from_suite(suite, config))
            .collect::<Result<Vec<_>>>()?;

        Ok(HtmlReport {
            page_title: config.page_title(),
            start_time: result.start_time,
            tests: result.num_total_tests,
            passed: result.num_passed_tests,
            failed: result.num_failed_tests,
            skipped: result.num_pending_tests,
            suites,
        })
    }

    pub fn serialize(&self, writer: &mut Writer) -> Result<()> {
        let mut writer = XmlWriter::new_with_indent(writer, b' ', 4);

        writer.write_event(Event::Start(BytesStart::new("html")))?;
        self.serialize_head(&mut writer)?;
        self.serialize_body(&mut writer)?;
        writer.write_event(Event::End(BytesEnd::new("html")))?;
        writer.write_event(Event::Eof)?;

        Ok(writer.write_indent()?)
    }

    fn serialize_head<W: IoWrite>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        writer.write_event(Event::Start(BytesStart::new("head")))?;

        let mut meta = BytesStart::new("meta");
        meta.push_attribute(("charset", "utf-8"));
        writer.write_event(Event::Empty(meta))?;

        text_element(writer, "title", &[], self.page_title)?;

        let mut style = BytesStart::new("style");
        style.push_attribute(("type", "text/css"));
        writer.write_event(Event::Start(style))?;
        // opaque static asset, injected verbatim
        writer.write_event(Event::Text(BytesText::from_escaped(STYLE)))?;
        writer.write_event(Event::End(BytesEnd::new("style")))?;

        Ok(writer.write_event(Event::End(BytesEnd::new("head")))?)
    }

    fn serialize_body<W: IoWrite>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        writer.write_event(Event::Start(BytesStart::new("body")))?;

        text_element(writer, "h1", &[], self.page_title)?;
        text_element(
            writer,
            "div",
            &[("id", "timestamp")],
            &format!("Start: {}", format_start_time(self.start_time)),
        )?;
        text_element(
            writer,
            "div",
            &[("id", "summary")],
            &format!(
                "{} tests / {} passed / {} failed / {} skipped",
                self.tests, self.passed, self.failed, self.skipped
            ),
        )?;

        for suite in &self.suites {
            suite.serialize(writer)?;
        }

        Ok(writer.write_event(Event::End(BytesEnd::new("body")))?)
    }
}

impl<'report> SuiteSection<'report> {
    fn from_suite(
        suite: &'report SuiteResult,
        config: &ReportConfig,
    ) -> Result<SuiteSection<'report>> {
        let rows = suite
            .test_results
            .iter()
            .map(|test| TestRow::from_test(test, config))
            .collect::<Result<Vec<_>>>()?;

        Ok(SuiteSection {
            file_path: &suite.test_file_path,
            seconds: (suite.perf_stats.end - suite.perf_stats.start) as f64 / 1000.0,
            rows,
        })
    }

    fn serialize<W: IoWrite>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        text_element(
            writer,
            "div",
            &[("class", "suite-info")],
            &format!("{} ({}s)", self.file_path, self.seconds),
        )?;

        let mut table = BytesStart::new("table");
        table.extend_attributes([
            ("class", "suite-table"),
            ("cellspacing", "0"),
            ("cellpadding", "0"),
        ]);
        writer.write_event(Event::Start(table))?;

        for row in &self.rows {
            row.serialize(writer)?;
        }

        Ok(writer.write_event(Event::End(BytesEnd::new("table")))?)
    }
}

impl<'report> TestRow<'report> {
    fn from_test(test: &'report TestResult, config: &ReportConfig) -> Result<TestRow<'report>> {
        let failure_messages = if test.status == TestStatus::Failed && config.include_failure_msg {
            Some(
                test.failure_messages
                    .iter()
                    .map(|message| sanitize(message))
                    .collect::<Result<Vec<_>>>()?,
            )
        } else {
            None
        };

        let result = match &test.status {
            TestStatus::Passed => {
                format!("passed in {}s", test.duration.unwrap_or(0) as f64 / 1000.0)
            }
            status => status.as_str().to_string(),
        };

        Ok(TestRow {
            status: test.status.as_str(),
            ancestors: test.ancestor_titles.join(" > "),
            title: &test.title,
            failure_messages,
            result,
        })
    }

    fn serialize<W: IoWrite>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        let mut row = BytesStart::new("tr");
        row.push_attribute(("class", self.status));
        writer.write_event(Event::Start(row))?;

        text_element(writer, "td", &[("class", "suite")], &self.ancestors)?;

        let mut title = BytesStart::new("td");
        title.push_attribute(("class", "test"));
        writer.write_event(Event::Start(title))?;
        writer.write_event(Event::Text(BytesText::new(self.title)))?;
        if let Some(messages) = &self.failure_messages {
            let mut container = BytesStart::new("div");
            container.push_attribute(("class", "failureMessages"));
            writer.write_event(Event::Start(container))?;
            for message in messages {
                text_element(writer, "p", &[("class", "failureMsg")], message)?;
            }
            writer.write_event(Event::End(BytesEnd::new("div")))?;
        }
        writer.write_event(Event::End(BytesEnd::new("td")))?;

        text_element(writer, "td", &[("class", "result")], &self.result)?;

        Ok(writer.write_event(Event::End(BytesEnd::new("tr")))?)
    }
}

fn text_element<W: IoWrite>(
    writer: &mut XmlWriter<W>,
    tag: &str,
    attributes: &[(&str, &str)],
    text: &str,
) -> Result<()> {
    let mut start = BytesStart::new(tag);
    start.extend_attributes(attributes.iter().copied());
    writer.write_event(Event::Start(start))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;

    Ok(writer.write_event(Event::End(BytesEnd::new(tag)))?)
}

fn format_start_time(epoch_millis: i64) -> String {
    Local
        .timestamp_millis_opt(epoch_millis)
        .single()
        .map(|start| start.format("%c").to_string())
        .unwrap_or_default()
}

fn sanitize(message: &str) -> Result<String> {
    let stripped = strip_ansi_escapes::strip(message)?;

    Ok(String::from_utf8(stripped)?)
}
