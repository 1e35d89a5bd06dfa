use crate::infra::{http_checklist_service, load_rule_set};
use clap::{Args, ValueEnum};
use loan_checklist::checklist::{
    summarize, write_csv, ApplicationId, ApplicationRecord, ChecklistEvaluator, EvaluationResult,
    RuleSet,
};
use loan_checklist::config::AppConfig;
use loan_checklist::error::AppError;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Path to a JSON application record
    #[arg(long)]
    pub(crate) record: PathBuf,
    /// Output format for the checklist results
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub(crate) format: OutputFormat,
    /// JSON rule file to use instead of the configured rule set
    #[arg(long)]
    pub(crate) rules: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct FetchArgs {
    /// Application to fetch (defaults to CHECKLIST_APPLICATION_ID)
    #[arg(long)]
    pub(crate) application_id: Option<String>,
    /// Output format for the checklist results
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub(crate) format: OutputFormat,
    /// JSON rule file to use instead of the configured rule set
    #[arg(long)]
    pub(crate) rules: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct RulesArgs {
    /// JSON rule file to list instead of the configured rule set
    #[arg(long)]
    pub(crate) rules: Option<PathBuf>,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs {
        record,
        format,
        rules,
    } = args;

    let config = AppConfig::load()?;
    let rules = load_rule_set(rules.as_deref(), &config.checklist)?;
    let record: ApplicationRecord = serde_json::from_reader(BufReader::new(File::open(record)?))?;

    let results = ChecklistEvaluator::new(rules).evaluate(&record);
    print_results(&results, format)
}

pub(crate) async fn run_fetch(args: FetchArgs) -> Result<(), AppError> {
    let FetchArgs {
        application_id,
        format,
        rules,
    } = args;

    let config = AppConfig::load()?;
    let rules = load_rule_set(rules.as_deref(), &config.checklist)?;
    let service = http_checklist_service(&config.checklist, rules);

    let application_id = application_id
        .map(ApplicationId)
        .unwrap_or_else(|| service.default_application_id().clone());
    let results = service.evaluate_remote(&application_id).await?;

    if format == OutputFormat::Table {
        println!("Checklist for application {application_id}");
    }
    print_results(&results, format)
}

pub(crate) fn run_rules(args: RulesArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let rules = load_rule_set(args.rules.as_deref(), &config.checklist)?;
    print!("{}", format_rule_listing(&rules));
    Ok(())
}

fn print_results(results: &[EvaluationResult], format: OutputFormat) -> Result<(), AppError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Table => out.write_all(format_table(results).as_bytes())?,
        OutputFormat::Csv => write_csv(results, &mut out)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, results)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

pub(crate) fn format_table(results: &[EvaluationResult]) -> String {
    let width = results
        .iter()
        .map(|result| result.name.chars().count())
        .max()
        .unwrap_or(0);

    let mut output = String::new();
    for result in results {
        output.push_str(&format!(
            "  {:<width$}  {}\n",
            result.name,
            result.status.label(),
            width = width
        ));
    }

    let summary = summarize(results);
    output.push_str(&format!(
        "{} of {} rules passed\n",
        summary.passed, summary.total
    ));
    output
}

pub(crate) fn format_rule_listing(rules: &RuleSet) -> String {
    rules
        .names()
        .enumerate()
        .map(|(index, name)| format!("{}. {}\n", index + 1, name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use loan_checklist::checklist::RuleStatus;

    fn result(name: &str, status: RuleStatus) -> EvaluationResult {
        EvaluationResult {
            name: name.to_string(),
            status,
        }
    }

    #[test]
    fn table_aligns_status_column() {
        let table = format_table(&[
            result("UK Resident", RuleStatus::Passed),
            result("LTV Below 60%", RuleStatus::Failed),
        ]);

        assert_eq!(
            table,
            "  UK Resident    Passed\n  LTV Below 60%  Failed\n1 of 2 rules passed\n"
        );
    }

    #[test]
    fn table_for_empty_results_only_has_summary() {
        assert_eq!(format_table(&[]), "0 of 0 rules passed\n");
    }

    #[test]
    fn rule_listing_is_numbered_in_order() {
        assert_eq!(
            format_rule_listing(&RuleSet::standard()),
            "1. Valuation Fee Paid\n2. UK Resident\n3. Risk Rating Medium\n4. LTV Below 60%\n"
        );
    }
}
