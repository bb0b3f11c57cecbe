/// Output formatting: JSON, YAML, and table rendering plus error output.
use std::io::Write;

use crate::report::ReportError;
use crate::types::{ErrorOutput, RouterReport};

use super::args::OutputFormat;

/// Whether table rendering support was compiled in.
#[must_use]
pub const fn table_supported() -> bool {
    cfg!(feature = "table")
}

/// Resolve the effective output format: the explicit argument when given,
/// otherwise `table` when table rendering is available, else `json`.
#[must_use]
pub fn resolve_format(arg: Option<OutputFormat>) -> OutputFormat {
    arg.unwrap_or(if table_supported() {
        OutputFormat::Table
    } else {
        OutputFormat::Json
    })
}

/// Render the aggregated reports to text in the requested format.
///
/// # Errors
///
/// Returns `ReportError::TableUnavailable` when `table` is requested without
/// table rendering support, or a serialization error.
pub fn render(reports: &[RouterReport], format: OutputFormat) -> Result<String, ReportError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(reports)?),
        OutputFormat::Yaml | OutputFormat::Yml => Ok(serde_yaml::to_string(reports)?),
        OutputFormat::Table => render_table(reports),
    }
}

#[cfg(feature = "table")]
fn render_table(reports: &[RouterReport]) -> Result<String, ReportError> {
    use comfy_table::{Table, presets::ASCII_FULL};

    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(["name", "id", "project", "active", "agents"]);

    for report in reports {
        table.add_row([
            report.router.name.clone(),
            report.router.id.clone(),
            report.router.project.clone(),
            report.router.active.to_string(),
            serde_yaml::to_string(&report.agents)?.trim_end().to_owned(),
        ]);
    }

    Ok(table.to_string())
}

#[cfg(not(feature = "table"))]
fn render_table(_reports: &[RouterReport]) -> Result<String, ReportError> {
    Err(ReportError::TableUnavailable)
}

/// Write a structured error to stderr.
pub fn write_error(err: &ErrorOutput, format: OutputFormat) {
    let stderr = std::io::stderr();
    let mut out = stderr.lock();
    match format {
        OutputFormat::Json => {
            let s = serde_json::to_string(err).unwrap_or_default();
            let _ = writeln!(out, "{s}");
        }
        _ => {
            let _ = writeln!(out, "Error: {}", err.error.message);
        }
    }
}

/// A RAII timer that prints elapsed milliseconds to stderr on drop.
///
/// Does nothing when `active` is false.
pub struct DebugTimer {
    label: &'static str,
    start: std::time::Instant,
    active: bool,
}

impl DebugTimer {
    #[must_use]
    pub fn new(label: &'static str, active: bool) -> Self {
        Self {
            label,
            start: std::time::Instant::now(),
            active,
        }
    }
}

impl Drop for DebugTimer {
    fn drop(&mut self) {
        if self.active {
            let ms = self.start.elapsed().as_secs_f64() * 1000.0;
            eprintln!("[debug] {}: {ms:.2}ms", self.label);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AgentBinding, Router};

    fn sample_reports() -> Vec<RouterReport> {
        vec![
            RouterReport {
                router: Router {
                    id: "f1c23964-7025-4ded-ab14-992f636b3485".to_owned(),
                    name: "router1".to_owned(),
                    project: "8f77be9ac1ef49b6ad033e84000ec182".to_owned(),
                    active: 1,
                },
                agents: vec![AgentBinding {
                    host: "osnet001".to_owned(),
                    ha_state: "standalone".to_owned(),
                }],
            },
            RouterReport {
                router: Router {
                    id: "97d2ab1d-0cec-49d5-856f-0a1a3c9a5156".to_owned(),
                    name: "router2".to_owned(),
                    project: "68a93cc709b44de08cfd11e6bdac2b9b".to_owned(),
                    active: 1,
                },
                agents: vec![
                    AgentBinding {
                        host: "osnet001".to_owned(),
                        ha_state: "active".to_owned(),
                    },
                    AgentBinding {
                        host: "osnet002".to_owned(),
                        ha_state: "standby".to_owned(),
                    },
                ],
            },
        ]
    }

    #[test]
    fn test_resolve_format_explicit_wins() {
        assert_eq!(
            resolve_format(Some(OutputFormat::Yaml)),
            OutputFormat::Yaml
        );
    }

    #[test]
    fn test_resolve_format_default_tracks_table_support() {
        let expected = if table_supported() {
            OutputFormat::Table
        } else {
            OutputFormat::Json
        };
        assert_eq!(resolve_format(None), expected);
    }

    #[test]
    fn test_render_json_is_compact() {
        let json = render(&sample_reports(), OutputFormat::Json).unwrap();
        assert_eq!(
            json,
            r#"[{"router":{"id":"f1c23964-7025-4ded-ab14-992f636b3485","name":"router1","project":"8f77be9ac1ef49b6ad033e84000ec182","active":1},"agents":[{"host":"osnet001","ha_state":"standalone"}]},{"router":{"id":"97d2ab1d-0cec-49d5-856f-0a1a3c9a5156","name":"router2","project":"68a93cc709b44de08cfd11e6bdac2b9b","active":1},"agents":[{"host":"osnet001","ha_state":"active"},{"host":"osnet002","ha_state":"standby"}]}]"#
        );
    }

    #[test]
    fn test_render_json_round_trips() {
        let reports = sample_reports();
        let json = render(&reports, OutputFormat::Json).unwrap();
        let parsed: Vec<RouterReport> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, reports);
    }

    #[test]
    fn test_json_and_yaml_are_structurally_equivalent() {
        let reports = sample_reports();
        let yaml = render(&reports, OutputFormat::Yaml).unwrap();
        let from_yaml: Vec<RouterReport> = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(from_yaml, reports);
    }

    #[test]
    fn test_yml_renders_same_as_yaml() {
        let reports = sample_reports();
        assert_eq!(
            render(&reports, OutputFormat::Yml).unwrap(),
            render(&reports, OutputFormat::Yaml).unwrap()
        );
    }

    #[test]
    fn test_render_empty_report_list() {
        let json = render(&[], OutputFormat::Json).unwrap();
        assert_eq!(json, "[]");
    }

    #[cfg(feature = "table")]
    #[test]
    fn test_render_table_embeds_yaml_agents() {
        let text = render(&sample_reports(), OutputFormat::Table).unwrap();
        for header in ["name", "id", "project", "active", "agents"] {
            assert!(text.contains(header), "missing header {header}");
        }
        assert!(text.contains("router1"));
        assert!(text.contains("- host: osnet001"));
        assert!(text.contains("ha_state: standby"));
    }

    #[cfg(not(feature = "table"))]
    #[test]
    fn test_render_table_unavailable() {
        let err = render(&sample_reports(), OutputFormat::Table).unwrap_err();
        assert!(matches!(err, ReportError::TableUnavailable));
    }
}
