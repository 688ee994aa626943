//! Individual support-request schema.

use once_cell::sync::Lazy;

use crate::models::{ConditionalPair, FieldRule, FileConstraint, FormSchema, ValuePattern};

const HOUSING_TYPES: &[&str] = &["owned", "rented", "shared", "other"];
const INCOME_SOURCES: &[&str] = &["salary", "pension", "social_security", "none", "other"];
const SUPPORT_TYPES: &[&str] = &["financial", "housing", "medical", "educational", "other"];
const GENDERS: &[&str] = &["male", "female"];
const MARITAL_STATUSES: &[&str] = &["single", "married", "divorced", "widowed"];

static INDIVIDUAL: Lazy<FormSchema> = Lazy::new(|| FormSchema {
    name: "individual",
    rules: vec![
        FieldRule::text("full_name", "الاسم الكامل"),
        FieldRule::text("national_id", "رقم الهوية الوطنية").pattern(ValuePattern::NationalId),
        FieldRule::date("birth_date", "تاريخ الميلاد").past(),
        FieldRule::select("gender", "الجنس", GENDERS),
        FieldRule::select("marital_status", "الحالة الاجتماعية", MARITAL_STATUSES),
        FieldRule::number("family_members", "عدد أفراد الأسرة").min(1.0),
        FieldRule::tel("phone", "رقم الجوال"),
        FieldRule::tel("alt_phone", "رقم جوال بديل").optional(),
        FieldRule::email("email", "البريد الإلكتروني"),
        FieldRule::text("city", "المدينة"),
        FieldRule::text("district", "الحي"),
        FieldRule::text("address", "العنوان").optional(),
        FieldRule::select("housing_type", "نوع السكن", HOUSING_TYPES),
        FieldRule::text("housing_type_other", "نوع السكن (أخرى)").when("housing_type", "other"),
        FieldRule::number("monthly_income", "الدخل الشهري").min(0.0),
        FieldRule::select("income_source", "مصدر الدخل", INCOME_SOURCES),
        FieldRule::text("income_source_other", "مصدر الدخل (أخرى)").when("income_source", "other"),
        FieldRule::text("employer", "جهة العمل").optional(),
        FieldRule::select("support_type", "نوع الدعم المطلوب", SUPPORT_TYPES),
        FieldRule::text("support_type_other", "نوع الدعم (أخرى)").when("support_type", "other"),
        FieldRule::number("requested_amount", "المبلغ المطلوب").min(1.0),
        FieldRule::text("reason", "سبب الطلب"),
        FieldRule::text("bank_name", "اسم البنك"),
        FieldRule::text("iban", "رقم الآيبان").pattern(ValuePattern::SaudiIban),
        FieldRule::file("id_copy", "صورة الهوية", FileConstraint::ATTACHMENT),
        FieldRule::file("iban_certificate", "شهادة الآيبان", FileConstraint::ATTACHMENT),
        FieldRule::file("salary_certificate", "تعريف بالراتب", FileConstraint::ATTACHMENT)
            .optional(),
        FieldRule::file("rental_contract", "عقد الإيجار", FileConstraint::ATTACHMENT)
            .when("housing_type", "rented"),
        FieldRule::file("social_report", "تقرير الحالة الاجتماعية", FileConstraint::ATTACHMENT)
            .optional(),
        FieldRule::text("notes", "ملاحظات").optional(),
    ],
    pairs: vec![
        ConditionalPair {
            trigger: "housing_type",
            other: "housing_type_other",
            sentinel: "other",
        },
        ConditionalPair {
            trigger: "income_source",
            other: "income_source_other",
            sentinel: "other",
        },
        ConditionalPair {
            trigger: "support_type",
            other: "support_type_other",
            sentinel: "other",
        },
    ],
    backend_fields: vec![
        ("beneficiary_name", "full_name"),
        ("identity_number", "national_id"),
        ("date_of_birth", "birth_date"),
        ("family_size", "family_members"),
        ("mobile", "phone"),
        ("alt_mobile", "alt_phone"),
        ("email_address", "email"),
        ("housing", "housing_type"),
        ("housing_details", "housing_type_other"),
        ("income", "monthly_income"),
        ("income_source_details", "income_source_other"),
        ("support", "support_type"),
        ("support_details", "support_type_other"),
        ("amount", "requested_amount"),
        ("bank_iban", "iban"),
        ("identity_attachment", "id_copy"),
        ("iban_attachment", "iban_certificate"),
        ("salary_attachment", "salary_certificate"),
        ("rental_attachment", "rental_contract"),
        ("social_attachment", "social_report"),
    ],
    has_goals: false,
});

/// Rule table for the individual applicant form.
pub fn individual() -> &'static FormSchema {
    &INDIVIDUAL
}
