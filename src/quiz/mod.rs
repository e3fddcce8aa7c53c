pub mod controls;
pub mod session;

pub use controls::{ANSWER_SLOTS, Control, slot_label};
pub use session::{ChoiceMark, Phase, QuizError, QuizSession, ReferenceView, ScoreSummary, Verdict};
