//! Scripted question/answer widget.
//!
//! The session is driven by a caller-supplied monotonic clock in milliseconds.
//! Every delayed effect (reply start, character ticks, closing message) sits in
//! an internal queue keyed by due time, so the same session runs under browser
//! timers or under a test that jumps the clock forward.

use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;
use serde_json::json;

use crate::config::SiteConfig;
use crate::content::ChatScript;
use crate::logging::{log_event, LogLevel};
use crate::reveal::Typewriter;

pub type OptionId = u32;
pub type EntryId = u64;

const STAMP_FORMAT: &str = "%I:%M %p";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("option {0} is not available")]
    InvalidSelection(OptionId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    Bot,
    User,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub id: EntryId,
    pub text: String,
    pub origin: Origin,
    pub stamp: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct PromptOption {
    pub id: OptionId,
    pub prompt: String,
    pub reply: String,
}

impl PromptOption {
    pub fn new(id: OptionId, prompt: &str, reply: &str) -> Self {
        Self {
            id,
            prompt: prompt.to_owned(),
            reply: reply.to_owned(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChatTimings {
    pub reveal_tick_ms: u64,
    pub reply_delay_ms: u64,
    pub closing_delay_ms: u64,
}

impl From<&SiteConfig> for ChatTimings {
    fn from(config: &SiteConfig) -> Self {
        Self {
            reveal_tick_ms: config.reveal_tick_ms,
            reply_delay_ms: config.reply_delay_ms,
            closing_delay_ms: config.closing_delay_ms,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatPhase {
    Idle,
    Revealing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Closing {
    Pending,
    Scheduled,
    Appended,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Job {
    StartReply { text: String },
    RevealTick { entry: EntryId },
    StartClosing,
}

#[derive(Clone, Debug)]
pub struct ChatSession {
    options: Vec<PromptOption>,
    consumed: BTreeSet<OptionId>,
    transcript: Vec<TranscriptEntry>,
    closing_text: String,
    closing: Closing,
    timings: ChatTimings,
    queue: BTreeMap<(u64, u64), Job>,
    reveals: BTreeMap<EntryId, Typewriter>,
    next_entry: EntryId,
    next_seq: u64,
    revision: u64,
    stamp: fn() -> String,
}

fn local_stamp() -> String {
    chrono::Local::now().format(STAMP_FORMAT).to_string()
}

impl ChatSession {
    pub fn new(script: &ChatScript, timings: ChatTimings) -> Self {
        Self::with_stamp(script, timings, local_stamp)
    }

    pub fn with_stamp(script: &ChatScript, timings: ChatTimings, stamp: fn() -> String) -> Self {
        let mut session = Self {
            options: script.options.clone(),
            consumed: BTreeSet::new(),
            transcript: Vec::new(),
            closing_text: script.closing.clone(),
            closing: Closing::Pending,
            timings,
            queue: BTreeMap::new(),
            reveals: BTreeMap::new(),
            next_entry: 1,
            next_seq: 0,
            revision: 0,
            stamp,
        };
        session.push_entry(Origin::Bot, script.greeting.clone());
        session
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    /// Options not yet asked, in script order.
    pub fn available(&self) -> Vec<&PromptOption> {
        self.options
            .iter()
            .filter(|option| !self.consumed.contains(&option.id))
            .collect()
    }

    pub fn consumed(&self) -> &BTreeSet<OptionId> {
        &self.consumed
    }

    pub fn phase(&self) -> ChatPhase {
        let reply_queued = self
            .queue
            .values()
            .any(|job| matches!(job, Job::StartReply { .. }));

        if reply_queued || !self.reveals.is_empty() {
            ChatPhase::Revealing
        } else {
            ChatPhase::Idle
        }
    }

    /// True while a reply is waiting out its typing delay.
    pub fn is_typing(&self) -> bool {
        self.queue
            .values()
            .any(|job| matches!(job, Job::StartReply { .. } | Job::StartClosing))
    }

    /// True once the closing message has been fully written.
    pub fn is_finished(&self) -> bool {
        self.closing == Closing::Appended && self.reveals.is_empty()
    }

    /// Bumped on every transcript mutation; views scroll to the end when it changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn next_due(&self) -> Option<u64> {
        self.queue.keys().next().map(|(due, _)| *due)
    }

    pub fn select_option(&mut self, id: OptionId, now_ms: u64) -> Result<EntryId, ChatError> {
        let Some(option) = self
            .options
            .iter()
            .find(|option| option.id == id && !self.consumed.contains(&option.id))
            .cloned()
        else {
            log_event(
                LogLevel::Info,
                "chat.invalid_selection",
                json!({ "option_id": id }),
            );
            return Err(ChatError::InvalidSelection(id));
        };

        self.consumed.insert(option.id);
        let entry = self.push_entry(Origin::User, option.prompt);
        self.schedule(
            now_ms + self.timings.reply_delay_ms,
            Job::StartReply { text: option.reply },
        );

        log_event(
            LogLevel::Info,
            "chat.option_selected",
            json!({
                "option_id": id,
                "remaining": self.options.len() - self.consumed.len(),
            }),
        );

        Ok(entry)
    }

    /// Runs every job due at or before `now_ms`. Returns whether the transcript changed.
    pub fn advance_to(&mut self, now_ms: u64) -> bool {
        let before = self.revision;

        while let Some(entry) = self.queue.first_entry() {
            let (due, _) = *entry.key();
            if due > now_ms {
                break;
            }

            let job = entry.remove();
            self.run(job, due);
        }

        self.revision != before
    }

    fn run(&mut self, job: Job, due: u64) {
        match job {
            Job::StartReply { text } => self.begin_reveal(text, due),
            Job::StartClosing => {
                self.closing = Closing::Appended;
                self.begin_reveal(self.closing_text.clone(), due);
            }
            Job::RevealTick { entry } => self.tick(entry, due),
        }
    }

    fn begin_reveal(&mut self, text: String, due: u64) {
        let entry = self.push_entry(Origin::Bot, String::new());
        self.reveals.insert(entry, Typewriter::new(text));
        self.schedule(due + self.timings.reveal_tick_ms, Job::RevealTick { entry });
    }

    fn tick(&mut self, entry: EntryId, due: u64) {
        let Some(writer) = self.reveals.get_mut(&entry) else {
            return;
        };

        if let Some(prefix) = writer.advance() {
            let prefix = prefix.to_owned();
            if let Some(target) = self.transcript.iter_mut().find(|item| item.id == entry) {
                target.text = prefix;
                self.revision += 1;
            }
        }

        if writer.is_finished() {
            self.reveals.remove(&entry);
            self.after_reveal(due);
        } else {
            self.schedule(due + self.timings.reveal_tick_ms, Job::RevealTick { entry });
        }
    }

    fn after_reveal(&mut self, due: u64) {
        let exhausted = self.consumed.len() == self.options.len();
        if self.closing != Closing::Pending || !exhausted || self.phase() != ChatPhase::Idle {
            return;
        }

        self.closing = Closing::Scheduled;
        self.schedule(due + self.timings.closing_delay_ms, Job::StartClosing);
        log_event(
            LogLevel::Debug,
            "chat.closing_scheduled",
            json!({ "due_ms": due + self.timings.closing_delay_ms }),
        );
    }

    fn push_entry(&mut self, origin: Origin, text: String) -> EntryId {
        let id = self.next_entry;
        self.next_entry += 1;
        self.transcript.push(TranscriptEntry {
            id,
            text,
            origin,
            stamp: (self.stamp)(),
        });
        self.revision += 1;
        id
    }

    fn schedule(&mut self, due: u64, job: Job) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.insert((due, seq), job);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMINGS: ChatTimings = ChatTimings {
        reveal_tick_ms: 30,
        reply_delay_ms: 500,
        closing_delay_ms: 1_000,
    };

    fn fixed_stamp() -> String {
        "09:41 AM".to_string()
    }

    fn script(count: u32) -> ChatScript {
        ChatScript {
            greeting: "Hello!".to_string(),
            closing: "That's all.".to_string(),
            options: (1..=count)
                .map(|id| PromptOption {
                    id,
                    prompt: format!("Question {id}?"),
                    reply: format!("Answer number {id}."),
                })
                .collect(),
        }
    }

    fn session(count: u32) -> ChatSession {
        ChatSession::with_stamp(&script(count), TIMINGS, fixed_stamp)
    }

    fn settle(session: &mut ChatSession) {
        while let Some(due) = session.next_due() {
            session.advance_to(due);
        }
    }

    fn assert_pool_invariant(session: &ChatSession) {
        let available: BTreeSet<OptionId> = session.available().iter().map(|option| option.id).collect();
        let all: BTreeSet<OptionId> = session.options.iter().map(|option| option.id).collect();

        assert!(available.is_disjoint(session.consumed()));
        let union: BTreeSet<OptionId> = available.union(session.consumed()).copied().collect();
        assert_eq!(union, all);
    }

    #[test]
    fn fresh_session_has_greeting_and_full_pool() {
        let session = session(8);

        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.transcript()[0].origin, Origin::Bot);
        assert_eq!(session.transcript()[0].text, "Hello!");
        assert_eq!(session.transcript()[0].stamp, "09:41 AM");
        assert_eq!(session.available().len(), 8);
        assert_eq!(session.phase(), ChatPhase::Idle);
        assert_eq!(session.next_due(), None);
    }

    #[test]
    fn selection_appends_user_entry_then_bot_after_delay() {
        let mut session = session(8);
        let user = session.select_option(3, 0).expect("option 3 is available");

        assert_eq!(session.transcript().len(), 2);
        assert_eq!(session.transcript()[1].id, user);
        assert_eq!(session.transcript()[1].origin, Origin::User);
        assert_eq!(session.transcript()[1].text, "Question 3?");
        assert_eq!(session.phase(), ChatPhase::Revealing);
        assert!(session.is_typing());

        assert!(!session.advance_to(499));
        assert_eq!(session.transcript().len(), 2);

        assert!(session.advance_to(500));
        assert_eq!(session.transcript().len(), 3);
        assert_eq!(session.transcript()[2].origin, Origin::Bot);
        assert_eq!(session.transcript()[2].text, "");
        assert!(!session.is_typing());
    }

    #[test]
    fn reply_reveals_one_character_per_tick() {
        let mut session = session(1);
        session.select_option(1, 0).expect("available");
        session.advance_to(500);

        session.advance_to(530);
        assert_eq!(session.transcript()[2].text, "A");
        session.advance_to(560);
        assert_eq!(session.transcript()[2].text, "An");
        session.advance_to(589);
        assert_eq!(session.transcript()[2].text, "An");
    }

    #[test]
    fn coarse_clock_jumps_reach_the_exact_reply() {
        let mut session = session(2);
        session.select_option(2, 0).expect("available");

        assert!(session.advance_to(1_000_000));
        assert_eq!(session.transcript()[2].text, "Answer number 2.");
        assert_eq!(session.phase(), ChatPhase::Idle);
    }

    #[test]
    fn reveal_finishes_at_a_deterministic_time() {
        let mut session = session(2);
        session.select_option(1, 100).expect("available");
        let reply_len = "Answer number 1.".chars().count() as u64;
        let done_at = 100 + 500 + reply_len * 30;

        session.advance_to(done_at - 1);
        assert_eq!(session.phase(), ChatPhase::Revealing);
        session.advance_to(done_at);
        assert_eq!(session.phase(), ChatPhase::Idle);
        assert_eq!(session.transcript()[2].text, "Answer number 1.");
    }

    #[test]
    fn consumed_or_unknown_options_are_rejected() {
        let mut session = session(3);
        session.select_option(2, 0).expect("available");

        assert_eq!(session.select_option(2, 10), Err(ChatError::InvalidSelection(2)));
        assert_eq!(session.select_option(42, 10), Err(ChatError::InvalidSelection(42)));
        assert_eq!(session.transcript().len(), 2);
        assert_pool_invariant(&session);
    }

    #[test]
    fn pool_invariant_and_growth_hold_after_every_selection() {
        let mut session = session(5);
        let mut now = 0;

        for id in [4, 1, 5, 2, 3] {
            let before = session.transcript().len();
            session.select_option(id, now).expect("available");
            settle(&mut session);
            now = session.next_due().unwrap_or(now) + 10_000;

            assert_pool_invariant(&session);
            assert!(!session.available().iter().any(|option| option.id == id));
            let grew = session.transcript().len() - before;
            assert!(grew == 2 || (grew == 3 && session.consumed().len() == 5));
        }
    }

    #[test]
    fn overlapping_selections_update_their_own_entries() {
        let mut session = session(3);
        session.select_option(1, 0).expect("available");
        session.select_option(2, 10).expect("available");
        settle(&mut session);

        let bots: Vec<&str> = session
            .transcript()
            .iter()
            .filter(|entry| entry.origin == Origin::Bot)
            .map(|entry| entry.text.as_str())
            .collect();

        assert_eq!(bots, ["Hello!", "Answer number 1.", "Answer number 2."]);
    }

    #[test]
    fn closing_entry_is_appended_once_after_exhaustion() {
        let mut session = session(2);
        session.select_option(1, 0).expect("available");
        settle(&mut session);
        assert_eq!(session.next_due(), None);

        session.select_option(2, 5_000).expect("available");
        session.advance_to(5_500);
        let reply_len = "Answer number 2.".chars().count() as u64;
        let reply_done = 5_500 + reply_len * 30;
        session.advance_to(reply_done);

        assert_eq!(session.phase(), ChatPhase::Idle);
        assert_eq!(session.next_due(), Some(reply_done + 1_000));
        assert!(session.is_typing());

        settle(&mut session);
        assert!(session.is_finished());
        assert!(session.available().is_empty());

        let closings = session
            .transcript()
            .iter()
            .filter(|entry| entry.text == "That's all.")
            .count();
        assert_eq!(closings, 1);
        assert_eq!(session.transcript().len(), 6);
        assert_eq!(session.next_due(), None);
    }

    #[test]
    fn closing_waits_for_every_pending_reply() {
        let mut session = session(2);
        session.select_option(1, 0).expect("available");
        session.select_option(2, 0).expect("available");

        session.advance_to(600);
        assert!(!session.transcript().iter().any(|entry| entry.text == "That's all."));

        settle(&mut session);
        assert_eq!(session.transcript().last().map(|entry| entry.text.as_str()), Some("That's all."));
    }

    #[test]
    fn entry_ids_are_unique_and_increasing() {
        let mut session = session(3);
        session.select_option(1, 0).expect("available");
        session.select_option(3, 0).expect("available");
        settle(&mut session);

        let ids: Vec<EntryId> = session.transcript().iter().map(|entry| entry.id).collect();
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
