use sheet_catalog::builtin_profile;
use sheet_map::{MatchOptions, find_missing_required_fields, match_columns};
use sheet_model::{
    CellValue, ColumnMatch, FieldValue, ImportProfile, IssueKind, IssueSeverity, RawRow,
};
use sheet_validate::{
    GateReason, ImportPolicy, ValidateError, ValidateOptions, export_rows, gate_import,
    validate_and_transform,
};

const PROPERTY_HEADERS: [&str; 5] = ["العنوان", "نوع العقار", "نوع العرض", "السعر", "المساحة"];

fn property() -> &'static ImportProfile {
    builtin_profile("property").expect("property profile")
}

fn customer() -> &'static ImportProfile {
    builtin_profile("customer").expect("customer profile")
}

fn mappings(headers: &[&str], profile: &ImportProfile) -> Vec<ColumnMatch> {
    match_columns(headers, profile, &MatchOptions::default())
}

fn row(cells: &[&str]) -> RawRow {
    cells.iter().map(|cell| CellValue::from(*cell)).collect()
}

#[test]
fn formatted_price_is_coerced_with_one_warning() {
    let profile = property();
    let rows = vec![row(&["شقة فاخرة", "شقة", "بيع", "1,200 SAR", "180"])];
    let outcome = validate_and_transform(
        &rows,
        &mappings(&PROPERTY_HEADERS, profile),
        &profile.catalog,
        &ValidateOptions::default(),
    )
    .expect("validate");

    assert!(outcome.errors.is_empty());
    assert_eq!(outcome.warnings.len(), 1);
    let warning = &outcome.warnings[0];
    assert_eq!(warning.kind, IssueKind::TypeCoerced);
    assert_eq!(warning.severity, IssueSeverity::Warning);
    assert_eq!(warning.row_index, 2);
    assert_eq!(warning.source_header.as_deref(), Some("السعر"));
    assert_eq!(warning.value.as_deref(), Some("1,200 SAR"));

    let record = &outcome.records[0];
    assert_eq!(record.get("price"), Some(&FieldValue::Number(1200.0)));
    assert_eq!(record.get("area"), Some(&FieldValue::Number(180.0)));
    assert_eq!(
        record.get("property_type"),
        Some(&FieldValue::Text("apartment".to_string()))
    );
    assert_eq!(
        record.get("listing_type"),
        Some(&FieldValue::Text("sale".to_string()))
    );
    assert_eq!(
        record.get("status"),
        Some(&FieldValue::Text("available".to_string()))
    );
}

#[test]
fn required_empty_rejects_the_row() {
    let profile = property();
    let rows = vec![row(&["", "فيلا", "إيجار", "5000", ""])];
    let outcome = validate_and_transform(
        &rows,
        &mappings(&PROPERTY_HEADERS, profile),
        &profile.catalog,
        &ValidateOptions::default(),
    )
    .expect("validate");

    assert!(outcome.records.is_empty());
    assert_eq!(outcome.errors.len(), 1);
    let error = &outcome.errors[0];
    assert_eq!(error.kind, IssueKind::RequiredEmpty);
    assert_eq!(error.field.as_deref(), Some("title"));
    assert_eq!(error.source_header.as_deref(), Some("العنوان"));
    assert_eq!(error.row_index, 2);
}

#[test]
fn rows_with_errors_are_excluded_and_others_kept() {
    let profile = property();
    let rows = vec![
        row(&["شقة", "شقة", "بيع", "850000", "180"]),
        row(&["أرض", "castle", "بيع", "100", ""]),
        row(&["", "", "", "", ""]),
        row(&["مكتب", "Commercial", "For Rent", "0", "-5"]),
        row(&["فيلا", "Villa ", "RENT", "2,000,000", "0"]),
        row(&["قصير"]),
    ];
    let matches = mappings(&PROPERTY_HEADERS, profile);
    let outcome =
        validate_and_transform(&rows, &matches, &profile.catalog, &ValidateOptions::default())
            .expect("validate");

    let accepted: Vec<usize> = outcome.records.iter().map(|r| r.row_index).collect();
    assert_eq!(accepted, vec![2, 6]);
    assert_eq!(outcome.records.len() + outcome.rejected_rows().len(), rows.len());
    for record in &outcome.records {
        assert!(!outcome.rejected_rows().contains(&record.row_index));
    }

    let kinds_for = |row_index: usize| -> Vec<IssueKind> {
        outcome
            .issues_for_row(row_index)
            .iter()
            .map(|issue| issue.kind)
            .collect()
    };
    assert_eq!(kinds_for(3), vec![IssueKind::EnumInvalid]);
    assert_eq!(kinds_for(4), vec![IssueKind::EmptyRow]);
    assert_eq!(
        kinds_for(5),
        vec![IssueKind::OutOfRange, IssueKind::OutOfRange]
    );
    assert_eq!(
        kinds_for(6),
        vec![
            IssueKind::EnumNormalized,
            IssueKind::EnumNormalized,
            IssueKind::TypeCoerced,
            IssueKind::OutOfRange,
        ]
    );
    assert_eq!(
        kinds_for(7),
        vec![IssueKind::RequiredEmpty, IssueKind::RequiredEmpty, IssueKind::RequiredEmpty]
    );

    let villa = &outcome.records[1];
    assert_eq!(
        villa.get("property_type"),
        Some(&FieldValue::Text("villa".to_string()))
    );
    assert_eq!(villa.get("price"), Some(&FieldValue::Number(2_000_000.0)));

    let summary = outcome.summary();
    assert_eq!(summary.total_rows, 6);
    assert_eq!(summary.valid_rows, 2);
    assert_eq!(summary.rejected_rows, 4);
}

#[test]
fn revalidation_is_idempotent() {
    let profile = property();
    let rows = vec![
        row(&["شقة", "شقة", "بيع", "1,200 SAR", "180"]),
        row(&["", "villa", "sale", "x", ""]),
    ];
    let matches = mappings(&PROPERTY_HEADERS, profile);
    let options = ValidateOptions::default();
    let first = validate_and_transform(&rows, &matches, &profile.catalog, &options)
        .expect("first pass");
    let second = validate_and_transform(&rows, &matches, &profile.catalog, &options)
        .expect("second pass");
    assert_eq!(first, second);
}

#[test]
fn first_data_row_offsets_row_numbers() {
    let profile = property();
    let rows = vec![row(&["", "شقة", "بيع", "1", "1"])];
    let options = ValidateOptions {
        first_data_row: 101,
        ..ValidateOptions::default()
    };
    let outcome = validate_and_transform(
        &rows,
        &mappings(&PROPERTY_HEADERS, profile),
        &profile.catalog,
        &options,
    )
    .expect("validate");
    assert_eq!(outcome.errors[0].row_index, 101);
}

#[test]
fn blank_rows_can_be_skipped_without_shifting_row_numbers() {
    let profile = property();
    let rows = vec![
        row(&["شقة", "شقة", "بيع", "850000", ""]),
        row(&["", "", "", "", ""]),
        row(&["فيلا", "فيلا", "إيجار", "5000", "  "]),
        row(&["", ""]),
    ];
    let matches = mappings(&PROPERTY_HEADERS, profile);

    let strict = validate_and_transform(
        &rows,
        &matches,
        &profile.catalog,
        &ValidateOptions::default(),
    )
    .expect("validate");
    assert_eq!(strict.errors.len(), 2);
    assert!(strict.errors.iter().all(|e| e.kind == IssueKind::EmptyRow));

    let options = ValidateOptions {
        skip_blank_rows: true,
        ..ValidateOptions::default()
    };
    let outcome =
        validate_and_transform(&rows, &matches, &profile.catalog, &options).expect("validate");
    assert!(outcome.errors.is_empty());
    assert_eq!(outcome.total_rows, 2);
    assert_eq!(outcome.skipped_rows, 2);
    let accepted: Vec<usize> = outcome.records.iter().map(|r| r.row_index).collect();
    assert_eq!(accepted, vec![2, 4]);
    assert!(
        gate_import(&[], &outcome, ImportPolicy::AllOrNothing).allowed
    );
}

#[test]
fn unmapped_fields_receive_defaults_only_on_valid_rows() {
    let profile = property();
    let headers = ["Title", "Property Type", "Listing Type", "Price"];
    let rows = vec![row(&["Flat", "Apartment", "Sale", "900"])];
    let outcome = validate_and_transform(
        &rows,
        &mappings(&headers, profile),
        &profile.catalog,
        &ValidateOptions::default(),
    )
    .expect("validate");
    let record = &outcome.records[0];
    assert_eq!(
        record.get("status"),
        Some(&FieldValue::Text("available".to_string()))
    );
    assert!(!record.contains("area"));
    assert!(outcome.warnings.is_empty());
}

#[test]
fn later_duplicate_column_overwrites_earlier_value() {
    let profile = property();
    let headers = ["Title", "Property Type", "Listing Type", "Price", "Cost"];
    let matches = mappings(&headers, profile);
    assert_eq!(matches[4].matched_field(), Some("price"));

    let rows = vec![
        row(&["A", "villa", "sale", "100", "200"]),
        row(&["B", "villa", "sale", "100", ""]),
    ];
    let outcome =
        validate_and_transform(&rows, &matches, &profile.catalog, &ValidateOptions::default())
            .expect("validate");
    assert_eq!(outcome.records[0].get("price"), Some(&FieldValue::Number(200.0)));
    assert_eq!(outcome.records[1].get("price"), Some(&FieldValue::Number(100.0)));
}

#[test]
fn native_cells_are_accepted() {
    let profile = property();
    let rows = vec![vec![
        CellValue::from("Tower"),
        CellValue::from("land"),
        CellValue::from("sale"),
        CellValue::Number(750_000.0),
        CellValue::Bool(true),
    ]];
    let outcome = validate_and_transform(
        &rows,
        &mappings(&PROPERTY_HEADERS, profile),
        &profile.catalog,
        &ValidateOptions::default(),
    )
    .expect("validate");
    assert!(outcome.records.is_empty());
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].kind, IssueKind::TypeMismatch);
    assert_eq!(outcome.errors[0].field.as_deref(), Some("area"));
}

#[test]
fn mapping_to_unknown_field_is_a_contract_error() {
    let profile = property();
    let mut matches = mappings(&["Title"], profile);
    matches[0].matched_field = Some("garage".to_string());
    let error = validate_and_transform(
        &[row(&["x"])],
        &matches,
        &profile.catalog,
        &ValidateOptions::default(),
    )
    .unwrap_err();
    assert_eq!(
        error,
        ValidateError::UnknownField {
            key: "garage".to_string(),
            header: "Title".to_string(),
        }
    );
}

const CUSTOMER_HEADERS: [&str; 7] = [
    "الاسم",
    "رقم الهاتف",
    "البريد الإلكتروني",
    "النوع",
    "الحالة",
    "الميزانية الدنيا",
    "الميزانية القصوى",
];

#[test]
fn customer_row_is_normalized() {
    let profile = customer();
    let rows = vec![row(&[
        "أحمد محمد",
        "0501234567",
        "Ahmed@Example.com",
        "مشتري",
        "",
        "500,000",
        "900000",
    ])];
    let outcome = validate_and_transform(
        &rows,
        &mappings(&CUSTOMER_HEADERS, profile),
        &profile.catalog,
        &ValidateOptions::default(),
    )
    .expect("validate");

    assert!(outcome.errors.is_empty());
    let fields: Vec<&str> = outcome
        .warnings
        .iter()
        .filter_map(|w| w.field.as_deref())
        .collect();
    assert_eq!(fields, vec!["phone", "email", "budget_min"]);

    let record = &outcome.records[0];
    assert_eq!(
        record.get("phone"),
        Some(&FieldValue::Text("+966501234567".to_string()))
    );
    assert_eq!(
        record.get("email"),
        Some(&FieldValue::Text("ahmed@example.com".to_string()))
    );
    assert_eq!(
        record.get("type"),
        Some(&FieldValue::Text("buyer".to_string()))
    );
    assert_eq!(
        record.get("status"),
        Some(&FieldValue::Text("active".to_string()))
    );
}

#[test]
fn customer_rules_and_fallbacks() {
    let profile = customer();
    let rows = vec![
        row(&["سارة", "0551112222", "", "Tenant", "dormant", "", ""]),
        row(&["خالد", "0551112223", "", "Seller", "", "900000", "500000"]),
        row(&["نو", "12345", "bad-email", "alien", "", "-1", ""]),
    ];
    let outcome = validate_and_transform(
        &rows,
        &mappings(&CUSTOMER_HEADERS, profile),
        &profile.catalog,
        &ValidateOptions::default(),
    )
    .expect("validate");

    assert_eq!(outcome.records.len(), 1);
    let sara = &outcome.records[0];
    assert_eq!(sara.row_index, 2);
    assert_eq!(
        sara.get("status"),
        Some(&FieldValue::Text("active".to_string()))
    );
    let fallback = outcome
        .warnings
        .iter()
        .find(|w| w.row_index == 2 && w.field.as_deref() == Some("status"))
        .expect("fallback warning");
    assert_eq!(fallback.kind, IssueKind::EnumNormalized);

    let rule = outcome
        .errors
        .iter()
        .find(|e| e.row_index == 3)
        .expect("rule violation");
    assert_eq!(rule.kind, IssueKind::RuleViolation);
    assert!(rule.source_header.is_none());
    assert_eq!(rule.field.as_deref(), Some("budget_min"));

    let kinds: Vec<IssueKind> = outcome
        .errors
        .iter()
        .filter(|e| e.row_index == 4)
        .map(|e| e.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            IssueKind::TooShort,
            IssueKind::TypeMismatch,
            IssueKind::TypeMismatch,
            IssueKind::EnumInvalid,
            IssueKind::OutOfRange,
        ]
    );
}

#[test]
fn gate_policies() {
    let profile = property();
    let matches = mappings(&PROPERTY_HEADERS, profile);
    let rows = vec![
        row(&["شقة", "شقة", "بيع", "850000", "180"]),
        row(&["", "شقة", "بيع", "850000", "180"]),
    ];
    let outcome =
        validate_and_transform(&rows, &matches, &profile.catalog, &ValidateOptions::default())
            .expect("validate");
    let missing = find_missing_required_fields(&matches, &profile.catalog);
    assert!(missing.is_empty());

    let strict = gate_import(&missing, &outcome, ImportPolicy::AllOrNothing);
    assert!(!strict.allowed);
    assert_eq!(strict.importable_rows, 0);
    assert_eq!(strict.rejected_rows, 1);
    assert_eq!(
        strict.reasons,
        vec![GateReason::RowErrors { rows: 1, errors: 1 }]
    );

    let partial = gate_import(&missing, &outcome, ImportPolicy::Partial);
    assert!(partial.allowed);
    assert_eq!(partial.importable_rows, 1);
    assert_eq!(partial.rejected_rows, 1);
}

#[test]
fn gate_blocks_on_missing_required_fields() {
    let profile = property();
    let matches = mappings(&["Title", "Price"], profile);
    let rows = vec![row(&["شقة", "850000"])];
    let outcome =
        validate_and_transform(&rows, &matches, &profile.catalog, &ValidateOptions::default())
            .expect("validate");
    assert_eq!(outcome.records.len(), 1);

    let missing = find_missing_required_fields(&matches, &profile.catalog);
    let decision = gate_import(&missing, &outcome, ImportPolicy::Partial);
    assert!(!decision.allowed);
    assert_eq!(decision.reasons.len(), 2);
    assert_eq!(
        decision.reasons[0].kind(),
        Some(IssueKind::UnmappedRequiredField)
    );
    assert_eq!(
        decision.reasons[1].to_string(),
        "required field 'نوع العرض' is not mapped to any column"
    );
}

#[test]
fn gate_blocks_empty_batches() {
    let profile = property();
    let matches = mappings(&PROPERTY_HEADERS, profile);
    let outcome = validate_and_transform(&[], &matches, &profile.catalog, &ValidateOptions::default())
        .expect("validate");
    let decision = gate_import(&[], &outcome, ImportPolicy::AllOrNothing);
    assert!(!decision.allowed);
    assert_eq!(decision.reasons, vec![GateReason::NoRecords]);
}

#[test]
fn export_uses_labels_and_blanks() {
    let profile = property();
    let rows = vec![row(&["شقة", "شقة", "بيع", "850000", ""])];
    let outcome = validate_and_transform(
        &rows,
        &mappings(&PROPERTY_HEADERS, profile),
        &profile.catalog,
        &ValidateOptions::default(),
    )
    .expect("validate");

    let table = export_rows(
        &outcome.records,
        &profile.catalog,
        Some(["title", "price", "area", "status"].as_slice()),
    )
    .expect("export");
    assert_eq!(table.headers, vec!["العنوان", "السعر", "المساحة", "الحالة"]);
    assert_eq!(table.rows, vec![vec!["شقة", "850000", "", "available"]]);

    let full = export_rows(&outcome.records, &profile.catalog, None).expect("export");
    assert_eq!(full.headers.len(), profile.catalog.len());

    let error = export_rows(&outcome.records, &profile.catalog, Some(["garage"].as_slice())).unwrap_err();
    assert_eq!(
        error,
        ValidateError::UnknownExportField {
            key: "garage".to_string()
        }
    );
}
