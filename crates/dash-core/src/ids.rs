use chrono::Utc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    Category,
    Widget,
}

impl IdKind {
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Category => "c_",
            Self::Widget => "w_",
        }
    }
}

/// Issues prefixed ids from a millisecond clock, rendered in base 36.
///
/// Suffixes never repeat within one generator. Uniqueness across processes
/// is not guaranteed.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last_ms: i64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self, kind: IdKind) -> String {
        self.next_at(kind, Utc::now().timestamp_millis())
    }

    pub(crate) fn next_at(&mut self, kind: IdKind, now_ms: i64) -> String {
        let ms = if now_ms > self.last_ms {
            now_ms
        } else {
            self.last_ms.saturating_add(1)
        };
        self.last_ms = ms;
        format!("{}{}", kind.prefix(), to_base36(ms.unsigned_abs()))
    }
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn base36_matches_known_values() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_700_000_000_000), "loyw3v28");
    }

    #[test]
    fn ids_carry_kind_prefix() {
        let mut ids = IdGenerator::new();
        assert!(ids.next(IdKind::Category).starts_with("c_"));
        assert!(ids.next(IdKind::Widget).starts_with("w_"));
    }

    #[test]
    fn stalled_clock_still_yields_distinct_ids() {
        let mut ids = IdGenerator::new();
        let first = ids.next_at(IdKind::Widget, 1_000);
        let second = ids.next_at(IdKind::Widget, 1_000);
        let third = ids.next_at(IdKind::Widget, 999);
        assert_eq!(first, "w_rs");
        assert_eq!(second, "w_rt");
        assert_eq!(third, "w_ru");
    }
}
