//! ASCII gallows figure, drawn one body part per wrong guess.

const STAGES: [&str; 7] = [
    "  _______\n  |     |\n  |\n  |\n  |\n  |\n__|________",
    "  _______\n  |     |\n  |     O\n  |\n  |\n  |\n__|________",
    "  _______\n  |     |\n  |     O\n  |     |\n  |\n  |\n__|________",
    "  _______\n  |     |\n  |     O\n  |    /|\n  |\n  |\n__|________",
    "  _______\n  |     |\n  |     O\n  |    /|\\\n  |\n  |\n__|________",
    "  _______\n  |     |\n  |     O\n  |    /|\\\n  |    /\n  |\n__|________",
    "  _______\n  |     |\n  |     O\n  |    /|\\\n  |    / \\\n  |\n__|________",
];

pub const STAGE_COUNT: usize = STAGES.len();

/// Map `wrong_attempts` out of `max_attempts` onto a drawing stage.
///
/// Any non-zero miss shows at least the head, and the full figure appears
/// exactly when the attempts run out.
#[must_use]
pub fn stage_for(wrong_attempts: u32, max_attempts: u32) -> usize {
    if max_attempts == 0 {
        return STAGE_COUNT - 1;
    }
    let wrong = wrong_attempts.min(max_attempts) as usize;
    let last = STAGE_COUNT - 1;
    (wrong * last).div_ceil(max_attempts as usize)
}

#[must_use]
pub fn render(wrong_attempts: u32, max_attempts: u32) -> &'static str {
    STAGES[stage_for(wrong_attempts, max_attempts)]
}
