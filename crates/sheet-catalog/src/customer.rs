//! Customer (lead) profile.

use sheet_model::{
    CanonicalField, EnumOption, FieldCatalog, FieldType, ImportProfile, IssueSeverity,
    NumericBound, RowRule, SynonymDictionary,
};

use crate::error::CatalogError;

pub const PROFILE_NAME: &str = "customer";

pub fn customer_catalog() -> Result<FieldCatalog, CatalogError> {
    let fields = vec![
        CanonicalField::new("name", "الاسم", FieldType::String)
            .required()
            .with_min_length(3)
            .with_example("أحمد محمد"),
        CanonicalField::new("phone", "رقم الهاتف", FieldType::Phone)
            .required()
            .with_example("0501234567"),
        CanonicalField::new("email", "البريد الإلكتروني", FieldType::Email)
            .with_example("ahmed@example.com"),
        CanonicalField::new("national_id", "الهوية الوطنية", FieldType::String)
            .with_example("1012345678"),
        CanonicalField::new("type", "النوع", FieldType::String)
            .required()
            .with_options(vec![
                EnumOption::new("buyer", &["مشتري", "Buyer"]),
                EnumOption::new("seller", &["بائع", "Seller"]),
                EnumOption::new("tenant", &["مستأجر", "Tenant"]),
                EnumOption::new("landlord", &["مالك", "Landlord"]),
            ])
            .with_example("مشتري"),
        CanonicalField::new("status", "الحالة", FieldType::String)
            .with_options(vec![
                EnumOption::new("active", &["نشط", "Active"]),
                EnumOption::new("inactive", &["غير نشط", "Inactive"]),
                EnumOption::new("archived", &["مؤرشف", "Archived"]),
            ])
            .with_fallback("active")
            .with_default("active")
            .with_example("نشط"),
        CanonicalField::new("city", "المدينة", FieldType::String).with_example("جدة"),
        CanonicalField::new("address", "العنوان", FieldType::String)
            .with_example("حي الروضة، شارع الأمير سلطان"),
        CanonicalField::new("budget_min", "الميزانية الدنيا", FieldType::Number)
            .with_min(NumericBound::at_least(0.0, IssueSeverity::Error))
            .with_example("500000"),
        CanonicalField::new("budget_max", "الميزانية القصوى", FieldType::Number)
            .with_min(NumericBound::at_least(0.0, IssueSeverity::Error))
            .with_example("900000"),
        CanonicalField::new("preferred_cities", "المدن المفضلة", FieldType::String)
            .with_example("الرياض، جدة"),
        CanonicalField::new(
            "preferred_property_types",
            "أنواع العقارات المفضلة",
            FieldType::String,
        )
        .with_example("شقة، فيلا"),
        CanonicalField::new("source", "المصدر", FieldType::String).with_example("معرض عقاري"),
        CanonicalField::new("assigned_staff", "الموظف المسؤول", FieldType::String)
            .with_example("سارة"),
        CanonicalField::new("notes", "الملاحظات", FieldType::String),
    ];
    let rules = vec![RowRule::NotGreaterThan {
        lower: "budget_min".to_string(),
        upper: "budget_max".to_string(),
        message: Some("الميزانية الدنيا يجب أن تكون أقل من الميزانية القصوى".to_string()),
    }];
    Ok(FieldCatalog::new(fields)?.with_rules(rules)?)
}

pub fn customer_synonyms() -> SynonymDictionary {
    SynonymDictionary::new()
        .with(
            "name",
            [
                "الاسم",
                "اسم",
                "Name",
                "الاسم الكامل",
                "Full Name",
                "اسم العميل",
                "Customer Name",
            ],
        )
        .with(
            "phone",
            [
                "رقم الهاتف",
                "الهاتف",
                "هاتف",
                "الجوال",
                "جوال",
                "رقم الجوال",
                "Phone",
                "Mobile",
                "Phone Number",
            ],
        )
        .with(
            "email",
            [
                "البريد الإلكتروني",
                "البريد",
                "الإيميل",
                "Email",
                "E-mail",
                "Email Address",
            ],
        )
        .with(
            "national_id",
            [
                "الهوية الوطنية",
                "رقم الهوية",
                "الهوية",
                "National ID",
                "ID Number",
            ],
        )
        .with(
            "type",
            ["النوع", "نوع العميل", "Type", "Customer Type", "التصنيف"],
        )
        .with("status", ["الحالة", "حالة", "Status", "حالة العميل"])
        .with("city", ["المدينة", "مدينة", "City"])
        .with("address", ["العنوان", "عنوان", "Address", "العنوان الكامل"])
        .with(
            "budget_min",
            [
                "الميزانية الدنيا",
                "أقل ميزانية",
                "Budget Min",
                "Min Budget",
                "الحد الأدنى للميزانية",
            ],
        )
        .with(
            "budget_max",
            [
                "الميزانية القصوى",
                "أعلى ميزانية",
                "Budget Max",
                "Max Budget",
                "الحد الأعلى للميزانية",
            ],
        )
        .with(
            "preferred_cities",
            ["المدن المفضلة", "Preferred Cities"],
        )
        .with(
            "preferred_property_types",
            ["أنواع العقارات المفضلة", "Preferred Property Types"],
        )
        .with("source", ["المصدر", "مصدر العميل", "Source", "Lead Source"])
        .with(
            "assigned_staff",
            ["الموظف المسؤول", "الموظف", "Assigned Staff", "Agent"],
        )
        .with("notes", ["الملاحظات", "ملاحظات", "Notes", "Comments"])
}

pub fn customer_profile() -> Result<ImportProfile, CatalogError> {
    Ok(ImportProfile::new(
        PROFILE_NAME,
        customer_catalog()?,
        customer_synonyms(),
    )?)
}
