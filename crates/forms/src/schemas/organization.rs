//! Organization (institutional) support-request schema.

use once_cell::sync::Lazy;

use crate::models::{ConditionalPair, FieldRule, FileConstraint, FormSchema, ValuePattern};

const ORG_TYPES: &[&str] = &["charity", "cooperative", "foundation", "waqf", "other"];
const PROJECT_TYPES: &[&str] = &["relief", "development", "education", "health", "other"];

static ORGANIZATION: Lazy<FormSchema> = Lazy::new(|| FormSchema {
    name: "organization",
    rules: vec![
        FieldRule::text("org_name", "اسم الجهة"),
        FieldRule::text("license_number", "رقم الترخيص"),
        FieldRule::select("org_type", "نوع الجهة", ORG_TYPES),
        FieldRule::text("org_type_other", "نوع الجهة (أخرى)").when("org_type", "other"),
        FieldRule::date("establishment_date", "تاريخ التأسيس").past(),
        FieldRule::number("employee_count", "عدد الموظفين").min(1.0),
        FieldRule::number("volunteer_count", "عدد المتطوعين").min(0.0).optional(),
        FieldRule::text("city", "المدينة"),
        FieldRule::text("district", "الحي"),
        FieldRule::text("address", "العنوان"),
        FieldRule::text("website", "الموقع الإلكتروني").optional(),
        FieldRule::text("contact_name", "اسم مسؤول التواصل"),
        FieldRule::text("contact_title", "المسمى الوظيفي").optional(),
        FieldRule::tel("contact_phone", "جوال مسؤول التواصل"),
        FieldRule::email("contact_email", "البريد الإلكتروني لمسؤول التواصل"),
        FieldRule::text("bank_name", "اسم البنك"),
        FieldRule::text("iban", "رقم الآيبان").pattern(ValuePattern::SaudiIban),
        FieldRule::text("project_name", "اسم المشروع"),
        FieldRule::select("project_type", "نوع المشروع", PROJECT_TYPES),
        FieldRule::text("project_type_other", "نوع المشروع (أخرى)").when("project_type", "other"),
        FieldRule::text("project_description", "وصف المشروع"),
        FieldRule::number("target_beneficiaries", "عدد المستفيدين المستهدف").min(1.0),
        FieldRule::number("requested_amount", "المبلغ المطلوب").min(1.0),
        FieldRule::number("duration_months", "مدة المشروع بالأشهر").min(1.0).max(36.0),
        FieldRule::file("license_copy", "صورة الترخيص", FileConstraint::ATTACHMENT),
        FieldRule::file("iban_certificate", "شهادة الآيبان", FileConstraint::ATTACHMENT),
        FieldRule::file("project_plan", "خطة المشروع", FileConstraint::PLAN_DOCUMENT),
        FieldRule::file("operational_plan", "الخطة التشغيلية", FileConstraint::PLAN_DOCUMENT)
            .optional(),
    ],
    pairs: vec![
        ConditionalPair {
            trigger: "org_type",
            other: "org_type_other",
            sentinel: "other",
        },
        ConditionalPair {
            trigger: "project_type",
            other: "project_type_other",
            sentinel: "other",
        },
    ],
    backend_fields: vec![
        ("organization_name", "org_name"),
        ("license_no", "license_number"),
        ("entity_type", "org_type"),
        ("entity_type_details", "org_type_other"),
        ("founded_on", "establishment_date"),
        ("employees", "employee_count"),
        ("volunteers", "volunteer_count"),
        ("contact_mobile", "contact_phone"),
        ("contact_email_address", "contact_email"),
        ("bank_iban", "iban"),
        ("project_title", "project_name"),
        ("project_category", "project_type"),
        ("project_category_details", "project_type_other"),
        ("beneficiaries", "target_beneficiaries"),
        ("amount", "requested_amount"),
        ("duration", "duration_months"),
        ("license_attachment", "license_copy"),
        ("iban_attachment", "iban_certificate"),
        ("plan_attachment", "project_plan"),
        ("operational_attachment", "operational_plan"),
    ],
    has_goals: true,
});

/// Rule table for the organization applicant form, goals list included.
pub fn organization() -> &'static FormSchema {
    &ORGANIZATION
}
