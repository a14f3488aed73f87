use std::path::PathBuf;
use std::sync::Arc;

use acredita::error::AppError;
use acredita::workflows::accreditation::domain::DateWindow;
use acredita::workflows::accreditation::{
    AccreditationReport, AccreditationService, ClassifierConfig, PeriodAction, PeriodStore,
    RosterImporter,
};
use chrono::{Local, NaiveDate};
use clap::Args;

use crate::infra::InMemoryPeriodStore;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Reference date for classification (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// Optional roster CSV export to seed the directory.
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
    /// Include per-period breakdown rows in the report output.
    #[arg(long)]
    pub(crate) list_periods: bool,
    /// Skip the period workflow portion of the demo.
    #[arg(long)]
    pub(crate) skip_workflow: bool,
}

#[derive(Args, Debug)]
pub(crate) struct FacultyReportArgs {
    /// Reference date for classification (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// Optional roster CSV export to seed the directory.
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
    /// Include per-period breakdown rows for every career.
    #[arg(long)]
    pub(crate) list_periods: bool,
}

pub(crate) fn run_faculty_report(args: FacultyReportArgs) -> Result<(), AppError> {
    let FacultyReportArgs {
        as_of,
        roster,
        list_periods,
    } = args;

    let today = as_of.unwrap_or_else(|| Local::now().date_naive());
    let (store, imported) = load_store_from_path(roster, today)?;
    let service = AccreditationService::new(store, ClassifierConfig::default());

    let report = match service.faculty_report(today) {
        Ok(report) => report,
        Err(err) => {
            println!("Report unavailable: {err}");
            return Ok(());
        }
    };

    render_faculty_report(&service, &report, today, imported, list_periods);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        as_of,
        roster,
        list_periods,
        skip_workflow,
    } = args;

    let today = as_of.unwrap_or_else(|| Local::now().date_naive());

    println!("Accreditation tracker demo");
    let (store, imported) = load_store_from_path(roster, today)?;
    let service = Arc::new(AccreditationService::new(
        store.clone(),
        ClassifierConfig::default(),
    ));

    let report = match service.faculty_report(today) {
        Ok(report) => report,
        Err(err) => {
            println!("Report unavailable: {err}");
            return Ok(());
        }
    };
    render_faculty_report(&service, &report, today, imported, list_periods);

    if skip_workflow {
        return Ok(());
    }

    println!("\nPeriod workflow demo");
    let faculties = match store.faculties() {
        Ok(faculties) => faculties,
        Err(err) => {
            println!("  Directory unavailable: {err}");
            return Ok(());
        }
    };
    let career = match faculties
        .iter()
        .flat_map(|faculty| faculty.careers.iter())
        .last()
    {
        Some(career) => career.clone(),
        None => {
            println!("  Directory is empty; nothing to demonstrate");
            return Ok(());
        }
    };
    let modality = match store.modalities().first() {
        Some(modality) => modality.clone(),
        None => {
            println!("  No accreditation standards registered; nothing to demonstrate");
            return Ok(());
        }
    };

    println!(
        "- Opening an evaluation window for {} ({})",
        career.name, modality.name
    );
    let outcome = match service.find_or_create(career.id, modality.id, None, today) {
        Ok(outcome) => outcome,
        Err(err) => {
            println!("  Request rejected: {err}");
            return Ok(());
        }
    };
    println!(
        "  {} period {} covering {}",
        outcome.action.label(),
        outcome.period.id.0,
        fmt_window(outcome.period.process_start, outcome.period.process_end)
    );

    if outcome.action == PeriodAction::Found {
        if let Some(tag) = outcome.tag {
            println!("  Governing period already on file ({})", tag.label());
        }
        return Ok(());
    }

    let approval_start = today + chrono::Duration::days(45);
    let approval_end = approval_start + chrono::Duration::days(365 * 6);
    let approval = match DateWindow::new(approval_start, approval_end) {
        Ok(window) => window,
        Err(err) => {
            println!("  Approval window invalid: {err}");
            return Ok(());
        }
    };
    match service.record_approval(outcome.period.id, approval) {
        Ok(period) => println!(
            "- Recorded certificate {} for period {}",
            fmt_window(period.approval_start, period.approval_end),
            period.id.0
        ),
        Err(err) => {
            println!("  Approval rejected: {err}");
            return Ok(());
        }
    }

    let later = approval_start + chrono::Duration::days(30);
    match service.career_status(career.id, later) {
        Ok(status) => {
            println!("- Status of {} on {}: {}", career.name, later, status.label.label());
            match serde_json::to_string_pretty(&status.to_view()) {
                Ok(json) => println!("  Status payload:\n{json}"),
                Err(err) => println!("  Status payload unavailable: {err}"),
            }
        }
        Err(err) => println!("  Status unavailable: {err}"),
    }

    let clash_start = today + chrono::Duration::days(30);
    let clash_end = clash_start + chrono::Duration::days(180);
    if let Ok(window) = DateWindow::new(clash_start, clash_end) {
        println!(
            "- Requesting an overlapping window {}",
            fmt_window(Some(clash_start), Some(clash_end))
        );
        match service.find_or_create(career.id, modality.id, Some(window), today) {
            Ok(outcome) => println!(
                "  Answered by period {} ({})",
                outcome.period.id.0,
                outcome.action.label()
            ),
            Err(err) => println!("  Rejected: {err}"),
        }
    }

    Ok(())
}

pub(crate) fn load_store_from_path(
    roster: Option<PathBuf>,
    today: NaiveDate,
) -> Result<(Arc<InMemoryPeriodStore>, bool), AppError> {
    match roster {
        Some(path) => {
            let rows = RosterImporter::from_path(path)?;
            Ok((Arc::new(InMemoryPeriodStore::from_roster(&rows)), true))
        }
        None => Ok((Arc::new(InMemoryPeriodStore::seed_demo(today)), false)),
    }
}

pub(crate) fn render_faculty_report(
    service: &AccreditationService<InMemoryPeriodStore>,
    report: &AccreditationReport,
    today: NaiveDate,
    imported: bool,
    list_periods: bool,
) {
    println!("Institutional accreditation report");
    println!("Reference date: {today}");

    if imported {
        println!("Data source: roster CSV import");
    } else {
        println!("Data source: built-in demo directory (no roster provided)");
    }

    for faculty in &report.faculties {
        println!("\n{}", faculty.name);
        for entry in &faculty.careers {
            match &entry.active_period {
                Some(period) => println!(
                    "- {}: {} (period {}, approval {})",
                    entry.name,
                    entry.label.label(),
                    period.id.0,
                    fmt_window(period.approval_start, period.approval_end)
                ),
                None => println!("- {}: {}", entry.name, entry.label.label()),
            }
        }
        println!(
            "  Totals: {} accredited | {} in process | {} in reaccreditation | {} not accredited",
            faculty.counts.accredited,
            faculty.counts.in_process,
            faculty.counts.in_reaccreditation,
            faculty.counts.not_accredited
        );
    }

    println!(
        "\nInstitution totals: {} careers | {} accredited | {} in process | {} in reaccreditation | {} not accredited",
        report.totals.total(),
        report.totals.accredited,
        report.totals.in_process,
        report.totals.in_reaccreditation,
        report.totals.not_accredited
    );

    if list_periods {
        println!("\nPeriod breakdown by career");
        for faculty in &report.faculties {
            for entry in &faculty.careers {
                println!("- {}", entry.name);
                match service.career_breakdown(entry.career, today) {
                    Ok(rows) => {
                        for row in rows {
                            println!(
                                "  - period {} | process {} | approval {} | {}",
                                row.period.id.0,
                                fmt_window(row.period.process_start, row.period.process_end),
                                fmt_window(row.period.approval_start, row.period.approval_end),
                                row.label.label()
                            );
                        }
                    }
                    Err(err) => println!("  - breakdown unavailable: {err}"),
                }
            }
        }
    }
}

fn fmt_window(start: Option<NaiveDate>, end: Option<NaiveDate>) -> String {
    format!("{} -> {}", fmt_date(start), fmt_date(end))
}

fn fmt_date(value: Option<NaiveDate>) -> String {
    match value {
        Some(date) => date.to_string(),
        None => "-".to_string(),
    }
}
