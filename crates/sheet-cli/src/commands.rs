use std::borrow::Cow;
use std::io;

use anyhow::{Context, Result, ensure};
use tracing::{debug, info, info_span, warn};

use sheet_catalog::{build_template, builtin_profile, load_profile};
use sheet_cli::ingest::{CsvSheet, read_csv_sheet};
use sheet_map::{MappingSession, MatchOptions};
use sheet_model::ImportProfile;
use sheet_validate::{ImportPolicy, ValidateOptions, gate_import, validate_and_transform};

use crate::cli::{MatchArgs, ProfileArgs, ValidateArgs};
use crate::summary::print_fields;
use crate::types::{ColumnReport, MatchReport, ValidateReport};

pub fn run_fields(args: &ProfileArgs) -> Result<()> {
    let profile = resolve_profile(args)?;
    print_fields(&profile);
    Ok(())
}

pub fn run_template(args: &ProfileArgs) -> Result<()> {
    let profile = resolve_profile(args)?;
    let template = build_template(&profile.catalog);
    let mut writer = csv::Writer::from_writer(io::stdout());
    for row in template.rows() {
        writer.write_record(row).context("write template")?;
    }
    writer.flush().context("write template")?;
    Ok(())
}

pub fn run_match(args: &MatchArgs) -> Result<MatchReport> {
    let profile = resolve_profile(&args.source)?;
    let sheet = read_csv_sheet(&args.file)?;
    let session = start_session(&profile, &sheet, args)?;
    Ok(match_report(session, args))
}

pub fn run_validate(args: &ValidateArgs) -> Result<ValidateReport> {
    ensure!(
        args.first_data_row >= 2,
        "--first-data-row must be at least 2 (row 1 holds the headers)"
    );
    let profile = resolve_profile(&args.matching.source)?;
    let sheet = read_csv_sheet(&args.matching.file)?;
    let span = info_span!("import", profile = %profile.name, rows = sheet.rows.len());
    let _guard = span.enter();

    let mut session = start_session(&profile, &sheet, &args.matching)?;
    for mapping in &args.overrides {
        let column = match &mapping.field {
            Some(field) => session
                .assign_header(&mapping.header, field)
                .with_context(|| format!("apply --map {}={field}", mapping.header))?,
            None => session
                .clear_header(&mapping.header)
                .with_context(|| format!("apply --map {}=", mapping.header))?,
        };
        debug!(column, field = ?mapping.field, "applied mapping override");
    }

    let options = ValidateOptions {
        first_data_row: args.first_data_row,
        skip_blank_rows: !args.keep_blank_rows,
    };
    let outcome = validate_and_transform(
        &sheet.rows,
        session.matches(),
        &profile.catalog,
        &options,
    )
    .context("validate rows")?;

    let policy = if args.allow_partial {
        ImportPolicy::Partial
    } else {
        ImportPolicy::AllOrNothing
    };
    let decision = gate_import(&session.missing_required(), &outcome, policy);
    if decision.allowed {
        info!(
            records = decision.importable_rows,
            skipped = decision.rejected_rows,
            "import allowed"
        );
    } else {
        warn!(reasons = decision.reasons.len(), "import blocked");
    }

    let mapping = match_report(session, &args.matching);
    Ok(ValidateReport::new(mapping, outcome, decision))
}

fn resolve_profile(args: &ProfileArgs) -> Result<Cow<'static, ImportProfile>> {
    match &args.profile_file {
        Some(path) => load_profile(path)
            .map(Cow::Owned)
            .with_context(|| format!("load profile: {}", path.display())),
        None => builtin_profile(args.profile.name())
            .map(Cow::Borrowed)
            .context("load built-in profile"),
    }
}

fn start_session<'p>(
    profile: &'p ImportProfile,
    sheet: &CsvSheet,
    args: &MatchArgs,
) -> Result<MappingSession<'p>> {
    ensure!(
        (0.0..=1.0).contains(&args.min_confidence),
        "--min-confidence must be between 0 and 1, got {}",
        args.min_confidence
    );
    ensure!(
        !sheet.headers.is_empty(),
        "{} has no header row",
        args.file.display()
    );
    let options = MatchOptions {
        min_confidence: args.min_confidence,
        ..MatchOptions::default()
    };
    Ok(MappingSession::from_headers(
        profile,
        sheet.headers.as_slice(),
        options,
    ))
}

fn match_report(session: MappingSession<'_>, args: &MatchArgs) -> MatchReport {
    let profile = session.profile().name.clone();
    let statistics = session.statistics();
    let duplicates = session.duplicate_targets();
    let columns = session
        .into_matches()
        .into_iter()
        .map(ColumnReport::from)
        .collect();
    MatchReport {
        profile,
        file: args.file.clone(),
        columns,
        statistics,
        duplicates,
    }
}
