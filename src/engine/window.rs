/// How far below the student's rank a reach pick may sit. Over-reaching by
/// more than this is treated as impractical.
pub const REACH_SPAN: u32 = 200;

/// How far above the student's rank a safety pick may sit. Margins beyond
/// this add little value.
pub const SAFETY_SPAN: u32 = 100;

/// Admissible rank band around a student's rank: `[rank - 200, rank + 100]`.
/// Every scorer consults it before scoring; candidates outside are dropped
/// unless a fallback tier is engaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankWindow {
    pub lower: u32,
    pub upper: u32,
}

impl RankWindow {
    pub fn around(student_rank: u32) -> Self {
        Self {
            lower: student_rank.saturating_sub(REACH_SPAN),
            upper: student_rank.saturating_add(SAFETY_SPAN),
        }
    }

    pub fn contains(&self, rank: u32) -> bool {
        rank >= self.lower && rank <= self.upper
    }
}
