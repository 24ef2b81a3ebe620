//! Localized user-facing strings (Thai).

/// Fallback assistant message when the transcript cannot be loaded.
pub const TRANSCRIPT_LOAD_FAILED_TH: &str = "ไม่สามารถโหลดบทสนทนา กรุณาลองใหม่";

/// Fallback assistant message when a turn round-trip fails.
pub const TURN_FAILED_TH: &str = "เครือข่ายขัดข้อง ลองใหม่อีกครั้ง";

/// Fallback shown when the SOAP summary cannot be loaded.
pub const SOAP_LOAD_FAILED_TH: &str = "ไม่สามารถโหลดสรุป SOAP ได้";

/// Shown when a session has no SOAP summary yet.
pub const SOAP_NOT_READY_TH: &str = "ยังไม่มีสรุป SOAP สำหรับแชทนี้";

/// Builds the danger-signal banner label from the backend-asserted label.
pub fn red_flag_banner(label: &str) -> String {
    format!("พบสัญญาณอันตราย ({label})")
}
