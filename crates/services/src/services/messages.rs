//! Arabic validation and notice messages.

use forms::models::FileConstraint;

pub fn required(label: &str) -> String {
    format!("حقل {label} مطلوب")
}

pub fn invalid_option(label: &str) -> String {
    format!("قيمة غير صالحة لحقل {label}")
}

pub fn not_a_number(label: &str) -> String {
    format!("حقل {label} يجب أن يكون رقماً")
}

pub fn below_min(label: &str, min: f64) -> String {
    format!("حقل {label} يجب ألا يقل عن {min}")
}

pub fn above_max(label: &str, max: f64) -> String {
    format!("حقل {label} يجب ألا يزيد عن {max}")
}

pub fn file_type_not_allowed(constraint: &FileConstraint) -> String {
    format!(
        "نوع الملف غير مدعوم، الأنواع المسموحة: {}",
        constraint.accepted.join("، ")
    )
}

pub fn file_too_large(constraint: &FileConstraint) -> String {
    format!(
        "حجم الملف يتجاوز الحد الأقصى ({} ميجابايت)",
        constraint.max_megabytes()
    )
}

pub const INVALID_DATE: &str = "تاريخ غير صالح";
pub const DATE_IN_FUTURE: &str = "التاريخ يجب أن يكون في الماضي";

pub const GOALS_REQUIRED: &str = "أضف هدفاً واحداً على الأقل للمشروع";
pub const GOALS_TOO_MANY: &str = "لا يمكن إضافة أكثر من 6 أهداف";

pub const FIX_FIELDS: &str = "يرجى تصحيح الأخطاء في الحقول المحددة";
pub const SUBMIT_FAILED: &str = "تعذر إرسال الطلب، يرجى المحاولة مرة أخرى";
pub const SERVICE_DISABLED: &str = "استقبال الطلبات متوقف حالياً";
