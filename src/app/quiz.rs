//! Quiz Runner
//!
//! Walks the words of one list in order, in one of three modes:
//!
//! - **Flashcards**: show the translation, reveal the term, self-grade.
//! - **Multiple choice** (`mc`): pick the term among up to four options.
//! - **Typing**: type the term; compared after trimming.
//!
//! Each graded word produces a `QuizAnswer` for `POST /quiz/answer`.
//! A failed submission is logged and the quiz carries on.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::app::api::{ApiClient, OrEmpty};
use crate::shared::models::{ListId, QuizAnswer, QuizMode, Word};

/// Distractors offered alongside the right answer in multiple choice
const DISTRACTORS: usize = 3;

#[derive(Debug, Clone)]
pub struct QuizRunner {
    mode: QuizMode,
    words: Vec<Word>,
    index: usize,
    score: usize,
    revealed: bool,
    completed: bool,
}

impl QuizRunner {
    pub fn new(mode: QuizMode, words: Vec<Word>) -> Self {
        let completed = words.is_empty();
        Self {
            mode,
            words,
            index: 0,
            score: 0,
            revealed: false,
            completed,
        }
    }

    /// Fetch the words of `list_id` and start a quiz over them. A failed
    /// fetch yields an already-completed, empty quiz.
    pub async fn load(api: &ApiClient, list_id: ListId, mode: QuizMode) -> Self {
        let words = api.list_words(list_id).await.or_empty("load quiz words");
        tracing::debug!("[QUIZ] Starting {} quiz with {} words", mode, words.len());
        Self::new(mode, words)
    }

    pub fn mode(&self) -> QuizMode {
        self.mode
    }

    pub fn current(&self) -> Option<&Word> {
        if self.completed {
            return None;
        }
        self.words.get(self.index)
    }

    /// Zero-based position of the current word.
    pub fn position(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.words.len()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Flashcards: show the answer side.
    pub fn reveal(&mut self) {
        self.revealed = true;
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Multiple choice options: up to three other words plus the current one,
    /// shuffled.
    pub fn options<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<&Word> {
        let Some(current) = self.current() else {
            return Vec::new();
        };
        let others: Vec<&Word> = self.words.iter().filter(|w| w.id != current.id).collect();
        let mut options: Vec<&Word> = others.choose_multiple(rng, DISTRACTORS).copied().collect();
        options.push(current);
        options.shuffle(rng);
        options
    }

    /// Typing: whether `answer` matches the current term.
    pub fn check_typed(&self, answer: &str) -> bool {
        self.current()
            .is_some_and(|word| word.kobun_text.trim() == answer.trim())
    }

    /// Grade the current word and advance. Returns the answer to submit, or
    /// `None` when the quiz is already over.
    pub fn record(&mut self, correct: bool) -> Option<QuizAnswer> {
        let answer = QuizAnswer::new(self.current()?.id, correct, self.mode);
        if correct {
            self.score += 1;
        }
        if self.index + 1 < self.words.len() {
            self.index += 1;
            self.revealed = false;
        } else {
            self.completed = true;
        }
        Some(answer)
    }

    /// Rounded percentage of correct answers over all words.
    pub fn score_percent(&self) -> u32 {
        if self.words.is_empty() {
            return 0;
        }
        ((self.score as f64 / self.words.len() as f64) * 100.0).round() as u32
    }

    pub fn restart(&mut self) {
        self.index = 0;
        self.score = 0;
        self.revealed = false;
        self.completed = self.words.is_empty();
    }
}

/// Grade the current word, submit it, and advance regardless of the
/// submission outcome.
pub async fn answer(runner: &mut QuizRunner, api: &ApiClient, correct: bool) -> Option<QuizAnswer> {
    let answer = runner.record(correct)?;
    if let Err(e) = api.submit_quiz_answer(&answer).await {
        tracing::warn!("[QUIZ] Failed to submit answer for word {}: {}", answer.word_id, e);
    }
    Some(answer)
}
