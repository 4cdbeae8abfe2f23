//! Fixed user-facing texts. Error details go to the console log only.

use crate::shared::table_api::TableApiError;

pub const LOAD_FAILED: &str = "تعذر تحميل البيانات، حاول مرة أخرى";
pub const SAVE_SUCCEEDED: &str = "تم حفظ السجل بنجاح";
pub const SAVE_FAILED: &str = "تعذر حفظ السجل";
pub const CODE_TAKEN: &str = "الرمز مستخدم لسجل آخر";
pub const DELETE_SUCCEEDED: &str = "تم حذف السجل";
pub const DELETE_FAILED: &str = "تعذر حذف السجل";
pub const REQUIRED_FIELDS: &str = "الرمز والاسم حقلان مطلوبان";
pub const SESSION_EXPIRED: &str = "انتهت صلاحية الجلسة، يرجى تسجيل الدخول مجدداً";

pub const SIGNIN_FAILED: &str = "اسم المستخدم أو كلمة المرور غير صحيحة";
pub const SIGNUP_FAILED: &str = "تعذر إنشاء الحساب";
pub const USERNAME_TAKEN: &str = "اسم المستخدم مستخدم مسبقاً";
pub const SIGNUP_SUCCEEDED: &str = "تم إنشاء الحساب بنجاح";

pub const EMPTY_TABLE: &str = "لا توجد سجلات";
pub const NO_MATCHES: &str = "لا توجد نتائج مطابقة للبحث";

pub fn confirm_delete(code: &str) -> String {
    format!("هل أنت متأكد من حذف السجل \"{}\"؟", code)
}

/// Text shown for a failed table call; `fallback` names the operation.
pub fn for_error(error: &TableApiError, fallback: &'static str) -> &'static str {
    match error {
        TableApiError::Unauthenticated => SESSION_EXPIRED,
        e if e.is_conflict() => CODE_TAKEN,
        _ => fallback,
    }
}
