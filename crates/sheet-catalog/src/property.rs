//! Property listing profile.

use sheet_model::{
    CanonicalField, EnumOption, FieldCatalog, FieldType, ImportProfile, IssueSeverity,
    NumericBound, SynonymDictionary,
};

use crate::error::CatalogError;

pub const PROFILE_NAME: &str = "property";

pub fn property_catalog() -> Result<FieldCatalog, CatalogError> {
    let fields = vec![
        CanonicalField::new("title", "العنوان", FieldType::String)
            .required()
            .with_example("شقة فاخرة في حي النرجس"),
        CanonicalField::new("description", "الوصف", FieldType::String)
            .with_example("شقة بثلاث غرف مع موقف خاص"),
        CanonicalField::new("property_type", "نوع العقار", FieldType::String)
            .required()
            .with_options(vec![
                EnumOption::new("apartment", &["شقة", "Apartment"]),
                EnumOption::new("villa", &["فيلا", "Villa"]),
                EnumOption::new("land", &["أرض", "Land"]),
                EnumOption::new("commercial", &["تجاري", "Commercial"]),
                EnumOption::new("other", &["أخرى", "Other"]),
            ])
            .with_example("شقة"),
        CanonicalField::new("listing_type", "نوع العرض", FieldType::String)
            .required()
            .with_options(vec![
                EnumOption::new("sale", &["بيع", "للبيع", "Sale", "For Sale"]),
                EnumOption::new("rent", &["إيجار", "للإيجار", "Rent", "For Rent"]),
            ])
            .with_example("بيع"),
        CanonicalField::new("price", "السعر", FieldType::Number)
            .required()
            .with_min(NumericBound::above(0.0, IssueSeverity::Error))
            .with_example("850000"),
        CanonicalField::new("area", "المساحة", FieldType::Number)
            .with_min(NumericBound::above(0.0, IssueSeverity::Warning))
            .with_example("180"),
        CanonicalField::new("bedrooms", "غرف النوم", FieldType::Number)
            .with_min(NumericBound::at_least(0.0, IssueSeverity::Error))
            .with_example("3"),
        CanonicalField::new("bathrooms", "دورات المياه", FieldType::Number)
            .with_min(NumericBound::at_least(0.0, IssueSeverity::Error))
            .with_example("2"),
        CanonicalField::new("city", "المدينة", FieldType::String).with_example("الرياض"),
        CanonicalField::new("district", "الحي", FieldType::String).with_example("النرجس"),
        CanonicalField::new("location", "الموقع", FieldType::String)
            .with_example("طريق الملك سلمان"),
        CanonicalField::new("status", "الحالة", FieldType::String)
            .with_options(vec![
                EnumOption::new("available", &["متاح", "Available"]),
                EnumOption::new("pending", &["قيد الانتظار", "معلق", "Pending"]),
                EnumOption::new("sold", &["مباع", "Sold"]),
                EnumOption::new("rented", &["مؤجر", "Rented"]),
            ])
            .with_default("available")
            .with_example("متاح"),
    ];
    Ok(FieldCatalog::new(fields)?)
}

pub fn property_synonyms() -> SynonymDictionary {
    SynonymDictionary::new()
        .with(
            "title",
            [
                "العنوان",
                "عنوان",
                "Title",
                "الاسم",
                "اسم",
                "Name",
                "المسمى",
                "اسم العقار",
                "عنوان العقار",
            ],
        )
        .with(
            "description",
            [
                "الوصف",
                "وصف",
                "Description",
                "التفاصيل",
                "تفاصيل",
                "Details",
                "الشرح",
                "شرح",
            ],
        )
        .with(
            "property_type",
            [
                "النوع",
                "نوع",
                "Type",
                "نوع العقار",
                "Property Type",
                "التصنيف",
                "تصنيف",
                "Category",
                "الفئة",
            ],
        )
        .with(
            "listing_type",
            [
                "نوع العرض",
                "العرض",
                "عرض",
                "Listing Type",
                "نوع الإعلان",
                "للبيع أو الإيجار",
                "Offer Type",
            ],
        )
        .with(
            "price",
            [
                "السعر",
                "سعر",
                "Price",
                "المبلغ",
                "مبلغ",
                "Amount",
                "القيمة",
                "قيمة",
                "Value",
                "التكلفة",
                "تكلفة",
                "Cost",
                "السعر بالريال",
                "السعر (ريال)",
                "Price (SAR)",
            ],
        )
        .with(
            "area",
            [
                "المساحة",
                "مساحة",
                "Area",
                "Size",
                "المساحة بالمتر",
                "المساحة الكلية",
                "المساحة م²",
                "Space",
                "المساحة بالمتر المربع",
                "Area (sqm)",
            ],
        )
        .with(
            "bedrooms",
            [
                "غرف النوم",
                "غرف نوم",
                "Bedrooms",
                "عدد الغرف",
                "الغرف",
                "غرف",
                "Rooms",
                "Bed",
            ],
        )
        .with(
            "bathrooms",
            [
                "دورات المياه",
                "دورات مياه",
                "Bathrooms",
                "الحمامات",
                "حمامات",
                "Bath",
                "عدد الحمامات",
                "دورات",
            ],
        )
        .with(
            "city",
            ["المدينة", "مدينة", "City", "المنطقة الإدارية", "Region"],
        )
        .with(
            "district",
            [
                "الحي",
                "حي",
                "District",
                "المنطقة",
                "منطقة",
                "Area",
                "Neighborhood",
                "الحي السكني",
            ],
        )
        .with(
            "location",
            [
                "الموقع",
                "موقع",
                "Location",
                "العنوان الكامل",
                "Address",
                "الموقع الجغرافي",
            ],
        )
        .with(
            "status",
            [
                "الحالة",
                "حالة",
                "Status",
                "حالة العقار",
                "الوضع",
                "وضع",
                "State",
            ],
        )
}

pub fn property_profile() -> Result<ImportProfile, CatalogError> {
    Ok(ImportProfile::new(
        PROFILE_NAME,
        property_catalog()?,
        property_synonyms(),
    )?)
}
