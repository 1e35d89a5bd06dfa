use std::fmt::Write as _;
use std::io;

use super::evaluation::{EvaluationResult, RuleStatus};
use super::service::ChecklistRun;

const STYLESHEET: &str = "
      body {
        font-family: Arial, sans-serif;
        margin: 20px;
        padding: 0;
        background-color: #f4f4f9;
      }
      table {
        width: 100%;
        border-collapse: collapse;
        margin-bottom: 20px;
      }
      th, td {
        border: 1px solid #ddd;
        padding: 10px;
        text-align: left;
      }
      th {
        background-color: #007bff;
        color: white;
      }
      td {
        background-color: #f9f9f9;
      }
      .passed {
        color: green;
        font-weight: bold;
      }
      .failed {
        color: red;
        font-weight: bold;
      }
      .notice {
        color: #8a6d3b;
      }";

/// Render a run as a standalone HTML page with one table row per result.
pub fn render_dashboard(run: &ChecklistRun) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("  <meta charset=\"UTF-8\">\n");
    html.push_str(
        "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    html.push_str("  <title>Checklist Dashboard</title>\n");
    writeln!(html, "  <style>{STYLESHEET}\n  </style>").expect("write stylesheet");
    html.push_str("</head>\n<body>\n");
    html.push_str("  <h1>Checklist Evaluation Dashboard</h1>\n");
    writeln!(
        html,
        "  <p>Application <code>{}</code> evaluated {}</p>",
        escape_html(&run.application_id.0),
        run.evaluated_at.format("%Y-%m-%d %H:%M:%S UTC")
    )
    .expect("write application heading");

    if let Some(error) = &run.error {
        writeln!(
            html,
            "  <p class=\"notice\">Application data unavailable ({}): {}</p>",
            escape_html(error.kind),
            escape_html(error.message)
        )
        .expect("write fetch notice");
    } else {
        writeln!(
            html,
            "  <p>{} of {} rules passed</p>",
            run.summary.passed, run.summary.total
        )
        .expect("write summary");
    }

    html.push_str("  <table>\n    <thead>\n      <tr>\n        <th>Rule</th>\n        <th>Status</th>\n      </tr>\n    </thead>\n    <tbody>\n");
    for result in &run.results {
        writeln!(
            html,
            "      <tr>\n        <td>{}</td>\n        <td class=\"{}\">{}</td>\n      </tr>",
            escape_html(&result.name),
            status_class(result.status),
            result.status.label()
        )
        .expect("write result row");
    }
    html.push_str("    </tbody>\n  </table>\n</body>\n</html>\n");

    html
}

/// Write results as `rule,status` CSV rows under a header line.
pub fn write_csv<W: io::Write>(results: &[EvaluationResult], writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["rule", "status"])?;
    for result in results {
        csv_writer.write_record([result.name.as_str(), result.status.label()])?;
    }
    csv_writer.flush()?;
    Ok(())
}

fn status_class(status: RuleStatus) -> &'static str {
    match status {
        RuleStatus::Passed => "passed",
        RuleStatus::Failed => "failed",
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
