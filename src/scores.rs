//! PHQ-9 and GAD-7 instruments: question text, answer options, score
//! totals, and severity labels.
//!
//! Both instruments score identically: each question is answered on the
//! same 0..=3 frequency scale and the total is the arithmetic sum. Only
//! the question list, the maximum, and the severity bands differ.

/// Answer options shared by both instruments, value to label.
pub const ANSWER_OPTIONS: [(u8, &str); 4] = [
    (0, "Not at all"),
    (1, "Several days"),
    (2, "More than half the days"),
    (3, "Nearly every day"),
];

/// Highest valid per-question answer value.
pub const MAX_ANSWER: u8 = 3;

pub const PHQ9_QUESTIONS: [&str; 9] = [
    "Little interest or pleasure in doing things",
    "Feeling down, depressed, or hopeless",
    "Trouble falling or staying asleep, or sleeping too much",
    "Feeling tired or having little energy",
    "Poor appetite or overeating",
    "Feeling bad about yourself or that you are a failure or have let yourself or your family down",
    "Trouble concentrating on things, such as reading the newspaper or watching television",
    "Moving or speaking so slowly that other people could have noticed. Or the opposite being so fidgety or restless that you have been moving around a lot more than usual",
    "Thoughts that you would be better off dead, or of hurting yourself",
];

pub const GAD7_QUESTIONS: [&str; 7] = [
    "Feeling nervous, anxious, or on edge",
    "Not being able to stop or control worrying",
    "Worrying too much about different things",
    "Trouble relaxing",
    "Being so restless that it is hard to sit still",
    "Becoming easily annoyed or irritable",
    "Feeling afraid, as if something awful might happen",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instrument {
    Phq9,
    Gad7,
}

impl Instrument {
    pub fn name(&self) -> &'static str {
        match self {
            Instrument::Phq9 => "PHQ-9",
            Instrument::Gad7 => "GAD-7",
        }
    }

    /// Prefix for the per-question form field names (`phq9_1`..`phq9_9`).
    pub fn field_prefix(&self) -> &'static str {
        match self {
            Instrument::Phq9 => "phq9",
            Instrument::Gad7 => "gad7",
        }
    }

    pub fn questions(&self) -> &'static [&'static str] {
        match self {
            Instrument::Phq9 => &PHQ9_QUESTIONS,
            Instrument::Gad7 => &GAD7_QUESTIONS,
        }
    }

    pub fn question_count(&self) -> usize {
        self.questions().len()
    }

    pub fn max_score(&self) -> u32 {
        self.question_count() as u32 * u32::from(MAX_ANSWER)
    }

    /// Total score for a complete answer set. `None` when the set has the
    /// wrong length or any answer falls outside 0..=3.
    pub fn total(&self, answers: &[u8]) -> Option<u32> {
        if answers.len() != self.question_count() {
            return None;
        }
        if answers.iter().any(|&a| a > MAX_ANSWER) {
            return None;
        }
        Some(answers.iter().map(|&a| u32::from(a)).sum())
    }

    /// Severity band label for a total score.
    pub fn severity(&self, score: u32) -> &'static str {
        match self {
            Instrument::Phq9 => match score {
                0..=4 => "Minimal",
                5..=9 => "Mild",
                10..=14 => "Moderate",
                15..=19 => "Moderately severe",
                _ => "Severe",
            },
            Instrument::Gad7 => match score {
                0..=4 => "Minimal",
                5..=9 => "Mild",
                10..=14 => "Moderate",
                _ => "Severe",
            },
        }
    }
}
