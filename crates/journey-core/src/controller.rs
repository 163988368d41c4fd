//! # Stage Controller
//!
//! Owns the session state and moves it through the stages.
//!
//! ## Transitions
//!
//! A transition is a two-phase debounce with states {Idle, Transitioning}:
//!
//! 1. `advance(target)` while idle sets `transitioning`, starts the exit
//!    animation and schedules completion `TRANSITION_DELAY` later.
//! 2. Completion swaps in the target stage, renders it and clears
//!    `transitioning`.
//!
//! `advance` while transitioning is dropped: not queued, not coalesced. This
//! is the only concurrency guard in the system.
//!
//! ## Time
//!
//! The controller never reads a clock for scheduling. Every entry point takes
//! `now`; deferred steps go on the [`Timeline`] and run from [`StageController::tick`].
//! A continuation runs with its own due time as `now`, so chained delays land
//! at the same instants whatever the tick granularity.

use crate::compositor::{Compositor, card_set};
use crate::feedback::{FeedbackForm, FeedbackRecord, FeedbackStore};
use crate::primitives::{FINISH_ARM_DELAY, FLAG_DURATION, SUCCESS_DELAY, TRANSITION_DELAY, UNLOCK_DELAY};
use crate::puzzle::TokenId;
use crate::session::SessionState;
use crate::timeline::{Continuation, Timeline};
use crate::validators::Validator;
use crate::{Action, Answer, Clock, Effect, InputField, JourneyError, Millis, Presenter, Rejection, Stage};

/// Reorders the puzzle tile ids before each puzzle render.
pub type TileShuffle = Box<dyn FnMut(&mut [u8]) + Send>;

/// What an `advance` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A transition was already in flight; nothing happened.
    Dropped,
    /// The exit animation started; the target renders at `due`.
    Scheduled { due: Millis },
    /// No panel was on screen, so the target rendered immediately.
    Completed,
}

/// The stage machine.
pub struct StageController<P, S, C>
where
    P: Presenter,
    S: FeedbackStore,
    C: Clock,
{
    session: SessionState,
    compositor: Compositor,
    timeline: Timeline,
    presenter: P,
    store: S,
    clock: C,
    shuffle: Option<TileShuffle>,
}

impl<P, S, C> StageController<P, S, C>
where
    P: Presenter,
    S: FeedbackStore,
    C: Clock,
{
    /// Create a controller with the standard panels.
    pub fn new(presenter: P, store: S, clock: C) -> Self {
        Self::with_compositor(Compositor::standard(), presenter, store, clock)
    }

    /// Create a controller with a custom panel table.
    pub fn with_compositor(compositor: Compositor, presenter: P, store: S, clock: C) -> Self {
        Self {
            session: SessionState::new(),
            compositor,
            timeline: Timeline::new(),
            presenter,
            store,
            clock,
            shuffle: None,
        }
    }

    /// Reorder the puzzle tiles with `shuffle` every time the puzzle is
    /// drawn. Without one the tiles keep their fixed jumbled order.
    #[must_use]
    pub fn with_tile_shuffle(mut self, shuffle: impl FnMut(&mut [u8]) + Send + 'static) -> Self {
        self.shuffle = Some(Box::new(shuffle));
        self
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    #[must_use]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    #[must_use]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Due time of the next pending continuation.
    #[must_use]
    pub fn next_due(&self) -> Option<Millis> {
        self.timeline.next_due()
    }

    /// Whether leaving now should ask for confirmation.
    #[must_use]
    pub fn guards_exit(&self) -> bool {
        self.session.locked && !self.session.stage.is_terminal()
    }

    // =========================================================================
    // TRANSITIONS
    // =========================================================================

    /// Render the welcome panel.
    pub fn start(&mut self, now: Millis) -> Result<Transition, JourneyError> {
        self.advance(now, Stage::Welcome)
    }

    /// Move to `target`, unless a transition is already in flight.
    pub fn advance(&mut self, now: Millis, target: Stage) -> Result<Transition, JourneyError> {
        let from = self.session.stage;
        self.transition(now, from, target)
    }

    fn transition(&mut self, now: Millis, from: Stage, target: Stage) -> Result<Transition, JourneyError> {
        if self.session.transitioning {
            return Ok(Transition::Dropped);
        }
        self.session.transitioning = true;

        if self.session.has_panel {
            self.presenter.effect(Effect::ExitAnimation { from });
            let due = now.after(TRANSITION_DELAY);
            self.timeline
                .schedule(due, Continuation::CompleteTransition(target));
            Ok(Transition::Scheduled { due })
        } else {
            self.complete_transition(target)?;
            Ok(Transition::Completed)
        }
    }

    /// [`Self::advance`] by raw index. Indices outside the sequence are
    /// refused before anything changes.
    pub fn advance_index(&mut self, now: Millis, index: u8) -> Result<Transition, JourneyError> {
        let target = Stage::from_index(index).ok_or(JourneyError::NoRenderer { index })?;
        self.advance(now, target)
    }

    fn complete_transition(&mut self, target: Stage) -> Result<(), JourneyError> {
        self.session.enter(target);
        if target != Stage::Welcome {
            self.presenter.effect(Effect::Particles);
        }
        let rendered = self.render_current();
        self.session.transitioning = false;
        rendered
    }

    /// Build the current stage's panel and hand it to the presenter.
    pub fn render_current(&mut self) -> Result<(), JourneyError> {
        if let (Stage::Puzzle, Some(shuffle)) = (self.session.stage, self.shuffle.as_mut()) {
            shuffle(self.session.tile_order.as_mut_slice());
        }
        let panel = self.compositor.compose(&self.session)?;
        self.presenter.show(&panel);
        self.session.has_panel = true;
        Ok(())
    }

    /// Reinitialize the session and go back to the welcome panel.
    ///
    /// Pending continuations are discarded along with the rest of the state.
    /// The exit animation still leaves from the stage on screen.
    pub fn restart(&mut self, now: Millis) -> Result<Transition, JourneyError> {
        let from = self.session.stage;
        self.timeline.clear();
        self.session.reset();
        self.transition(now, from, Stage::Welcome)
    }

    // =========================================================================
    // TIMELINE
    // =========================================================================

    /// Run every continuation due at or before `now`. Returns how many ran.
    pub fn tick(&mut self, now: Millis) -> Result<usize, JourneyError> {
        let mut ran = 0usize;
        while let Some((due, continuation)) = self.timeline.pop_due(now) {
            ran = ran.saturating_add(1);
            self.run(due, continuation)?;
        }
        Ok(ran)
    }

    fn run(&mut self, at: Millis, continuation: Continuation) -> Result<(), JourneyError> {
        match continuation {
            Continuation::CompleteTransition(target) => self.complete_transition(target),
            Continuation::AdvanceAfterSuccess(target) => self.advance(at, target).map(|_| ()),
            Continuation::ClearFlag(field) => {
                if self.session.flagged == Some(field) {
                    self.session.flagged = None;
                }
                self.presenter.effect(Effect::ClearFlag(field));
                Ok(())
            }
            Continuation::UnlockBurst => {
                self.presenter.effect(Effect::Confetti);
                self.advance(at, following(Stage::Unlock)?).map(|_| ())
            }
            Continuation::ArmFinish => {
                if self.session.stage != Stage::FinalReveal || !self.session.feedback_sent {
                    return Ok(());
                }
                self.session.finish_ready = true;
                self.presenter.effect(Effect::FinishReady);
                self.render_current()
            }
        }
    }

    // =========================================================================
    // ACTIONS
    // =========================================================================

    /// Handle a user action reported by the presentation.
    ///
    /// Rejected input comes back as [`JourneyError::Rejected`] after the
    /// input has been flagged and the notice shown.
    pub fn dispatch(&mut self, now: Millis, action: Action) -> Result<(), JourneyError> {
        let stage = self.session.stage;

        match (stage, action) {
            (Stage::Welcome | Stage::AccessGranted | Stage::AlmostThere, Action::Continue) => {
                self.go(now, following(stage)?)
            }

            (_, Action::Input { field, value }) if text_field(stage) == Some(field) => {
                if let Some(key) = field.answer() {
                    self.session.record_answer(key, &value);
                }
                Ok(())
            }
            (Stage::Password | Stage::Reflection | Stage::SecretCode, Action::Submit) => {
                self.submit(now, stage)
            }

            (Stage::Memory | Stage::Gallery, Action::Select(index)) => {
                self.select(now, stage, index)
            }

            (Stage::Puzzle, Action::PlaceLetter(id)) => self.place_letter(now, id),
            (Stage::Puzzle, Action::ResetPuzzle) => {
                self.session.puzzle.clear();
                self.go(now, Stage::Puzzle)
            }
            (Stage::Puzzle, Action::CheckPuzzle) => {
                let verdict = Validator::puzzle(self.session.puzzle.tokens());
                self.judge(now, verdict, "Correct! You spelled HAPPY! 🎉".to_string())
            }

            (Stage::Unlock, Action::Unlock) => {
                self.presenter.effect(Effect::Shake);
                self.timeline
                    .schedule(now.after(UNLOCK_DELAY), Continuation::UnlockBurst);
                Ok(())
            }

            (Stage::FinalReveal, Action::SendFeedback { name, message }) => {
                self.send_feedback(now, &name, &message)
            }
            (Stage::FinalReveal, Action::Finish) if self.session.finish_ready => {
                self.presenter.effect(Effect::Confetti);
                self.session.locked = false;
                self.go(now, following(stage)?)
            }

            (Stage::Complete, Action::Restart) => self.restart(now).map(|_| ()),

            (stage, action) => Err(JourneyError::Unavailable {
                stage,
                action: action.name(),
            }),
        }
    }

    fn go(&mut self, now: Millis, target: Stage) -> Result<(), JourneyError> {
        self.advance(now, target).map(|_| ())
    }

    fn submit(&mut self, now: Millis, stage: Stage) -> Result<(), JourneyError> {
        let answer = |key| self.session.answer(key).unwrap_or_default();

        let (verdict, success) = match stage {
            Stage::Password => (
                Validator::password(answer(Answer::Password)),
                "Correct password! Welcome 💫",
            ),
            Stage::Reflection => (
                Validator::reflection(answer(Answer::Reflection)),
                "Perfect answer! 💖",
            ),
            Stage::SecretCode => (
                Validator::secret_code(answer(Answer::SecretCode), self.clock.current_year()),
                "Correct year! 🗓️",
            ),
            _ => {
                return Err(JourneyError::Unavailable {
                    stage,
                    action: Action::Submit.name(),
                });
            }
        };

        self.judge(now, verdict, success.to_string())
    }

    fn select(&mut self, now: Millis, stage: Stage, index: usize) -> Result<(), JourneyError> {
        let Some((cards, key)) = card_set(stage) else {
            return Err(JourneyError::Unavailable {
                stage,
                action: "select",
            });
        };
        let (label, _) = cards.get(index).ok_or(JourneyError::UnknownCard(index))?;

        if self.session.selected_card == Some(index) {
            return Ok(());
        }
        self.session.selected_card = Some(index);
        self.session.record_answer(key, label);
        self.render_current()?;

        let success = match stage {
            Stage::Memory => "Great choice!".to_string(),
            _ => format!("You selected \"{}\" ✨", label),
        };
        self.judge(now, Ok(()), success)
    }

    fn place_letter(&mut self, now: Millis, id: TokenId) -> Result<(), JourneyError> {
        if !self.session.puzzle.place(id) {
            return Err(JourneyError::TokenUnavailable(id));
        }
        self.go(now, Stage::Puzzle)
    }

    fn send_feedback(&mut self, now: Millis, name: &str, message: &str) -> Result<(), JourneyError> {
        if self.session.feedback_sent {
            return Err(JourneyError::Unavailable {
                stage: Stage::FinalReveal,
                action: "send_feedback",
            });
        }

        let form = match FeedbackForm::validate(name, message) {
            Ok(form) => form,
            Err(rejection) => return Err(self.reject(now, rejection)),
        };
        let record = FeedbackRecord::from_session(form, &self.session, self.clock.timestamp());
        self.store.append(record)?;

        self.session.feedback_sent = true;
        self.presenter.effect(Effect::FeedbackSent);
        self.timeline
            .schedule(now.after(FINISH_ARM_DELAY), Continuation::ArmFinish);
        self.render_current()
    }

    /// Acknowledge and schedule the advance to the following stage, or flag
    /// and notify.
    fn judge(
        &mut self,
        now: Millis,
        verdict: Result<(), Rejection>,
        success: String,
    ) -> Result<(), JourneyError> {
        match verdict {
            Ok(()) => {
                let next = following(self.session.stage)?;
                self.presenter.effect(Effect::Success(success));
                self.timeline
                    .schedule(now.after(SUCCESS_DELAY), Continuation::AdvanceAfterSuccess(next));
                Ok(())
            }
            Err(rejection) => Err(self.reject(now, rejection)),
        }
    }

    fn reject(&mut self, now: Millis, rejection: Rejection) -> JourneyError {
        if let Some(field) = rejection.field() {
            self.session.flagged = Some(field);
            self.presenter.effect(Effect::FlagInput(field));
            self.timeline
                .schedule(now.after(FLAG_DURATION), Continuation::ClearFlag(field));
        }
        self.presenter.effect(Effect::Notice(rejection.to_string()));
        JourneyError::Rejected(rejection)
    }
}

/// The stage after `stage`. Only the last stage has none.
fn following(stage: Stage) -> Result<Stage, JourneyError> {
    stage.next().ok_or(JourneyError::NoRenderer {
        index: stage.index().saturating_add(1),
    })
}

/// The text input owned by a stage.
fn text_field(stage: Stage) -> Option<InputField> {
    match stage {
        Stage::Password => Some(InputField::Password),
        Stage::Reflection => Some(InputField::Reflection),
        Stage::SecretCode => Some(InputField::SecretCode),
        _ => None,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositor::Control;
    use crate::feedback::MemoryFeedbackStore;
    use crate::primitives::PUZZLE_DISPLAY_ORDER;
    use crate::{FixedClock, RecordingPresenter};

    type TestController = StageController<RecordingPresenter, MemoryFeedbackStore, FixedClock>;

    fn controller() -> TestController {
        StageController::new(
            RecordingPresenter::new(),
            MemoryFeedbackStore::new(),
            FixedClock::new(2026, "10/16/2026, 9:00:00 AM"),
        )
    }

    /// A controller already showing `stage`, idle, at t=0.
    fn at_stage(stage: Stage) -> TestController {
        let mut c = controller();
        c.session.enter(stage);
        c.render_current().expect("render");
        c
    }

    #[test]
    fn first_render_is_immediate() {
        let mut c = controller();
        assert_eq!(c.start(Millis(0)).expect("start"), Transition::Completed);
        assert_eq!(c.presenter().panels.len(), 1);
        assert!(!c.session().is_transitioning());
        assert_eq!(c.presenter().count_effects(|e| *e == Effect::Particles), 0);
    }

    #[test]
    fn advance_is_two_phase() {
        let mut c = at_stage(Stage::Welcome);

        let t = c.advance(Millis(0), Stage::Password).expect("advance");
        assert_eq!(t, Transition::Scheduled { due: Millis(400) });
        assert!(c.session().is_transitioning());
        assert_eq!(c.session().stage(), Stage::Welcome);

        assert_eq!(c.tick(Millis(399)).expect("tick"), 0);
        assert_eq!(c.tick(Millis(400)).expect("tick"), 1);
        assert_eq!(c.session().stage(), Stage::Password);
        assert!(!c.session().is_transitioning());
    }

    #[test]
    fn advance_while_transitioning_is_dropped() {
        let mut c = at_stage(Stage::Welcome);
        c.advance(Millis(0), Stage::Password).expect("advance");

        let t = c.advance(Millis(100), Stage::Complete).expect("advance");
        assert_eq!(t, Transition::Dropped);

        c.tick(Millis(1000)).expect("tick");
        assert_eq!(c.session().stage(), Stage::Password);
    }

    #[test]
    fn out_of_range_index_changes_nothing() {
        let mut c = at_stage(Stage::Memory);
        let err = c.advance_index(Millis(0), 12).expect_err("no stage 12");
        assert!(matches!(err, JourneyError::NoRenderer { index: 12 }));
        assert!(!c.session().is_transitioning());
        assert_eq!(c.session().stage(), Stage::Memory);
    }

    #[test]
    fn missing_renderer_clears_the_guard() {
        let mut compositor = Compositor::empty();
        compositor.register(Stage::Welcome, |_| {
            Compositor::standard()
                .compose(&SessionState::new())
                .unwrap_or_else(|_| unreachable!())
        });
        let mut c = StageController::with_compositor(
            compositor,
            RecordingPresenter::new(),
            MemoryFeedbackStore::new(),
            FixedClock::new(2026, "t"),
        );
        c.start(Millis(0)).expect("start");
        c.advance(Millis(0), Stage::Password).expect("advance");

        let err = c.tick(Millis(400)).expect_err("no renderer");
        assert!(matches!(err, JourneyError::NoRenderer { index: 1 }));
        assert!(!c.session().is_transitioning());
    }

    #[test]
    fn wrong_password_flags_and_notifies_without_advancing() {
        let mut c = at_stage(Stage::Password);
        c.dispatch(
            Millis(0),
            Action::Input {
                field: InputField::Password,
                value: "nope".to_string(),
            },
        )
        .expect("input");

        let err = c.dispatch(Millis(0), Action::Submit).expect_err("rejected");
        assert!(matches!(err, JourneyError::Rejected(Rejection::WrongPassword)));
        assert_eq!(c.session().flagged(), Some(InputField::Password));
        assert!(
            c.presenter()
                .effects
                .contains(&Effect::Notice("Incorrect password! Try again 💡".to_string()))
        );

        c.tick(Millis(600)).expect("tick");
        assert_eq!(c.session().flagged(), None);
        assert_eq!(c.session().stage(), Stage::Password);
    }

    #[test]
    fn success_then_advance_is_sequenced() {
        let mut c = at_stage(Stage::Password);
        c.dispatch(
            Millis(0),
            Action::Input {
                field: InputField::Password,
                value: "Kassy".to_string(),
            },
        )
        .expect("input");
        c.dispatch(Millis(0), Action::Submit).expect("accepted");

        assert!(!c.session().is_transitioning());
        c.tick(Millis(799)).expect("tick");
        assert!(!c.session().is_transitioning());

        c.tick(Millis(800)).expect("tick");
        assert!(c.session().is_transitioning());
        c.tick(Millis(1200)).expect("tick");
        assert_eq!(c.session().stage(), Stage::AccessGranted);
    }

    #[test]
    fn coarse_tick_lands_on_the_same_stage() {
        let mut c = at_stage(Stage::Reflection);
        c.dispatch(
            Millis(0),
            Action::Input {
                field: InputField::Reflection,
                value: "happy".to_string(),
            },
        )
        .expect("input");
        c.dispatch(Millis(0), Action::Submit).expect("accepted");

        assert_eq!(c.tick(Millis(5000)).expect("tick"), 2);
        assert_eq!(c.session().stage(), Stage::Memory);
    }

    #[test]
    fn input_for_another_stage_is_unavailable() {
        let mut c = at_stage(Stage::Password);
        let err = c
            .dispatch(
                Millis(0),
                Action::Input {
                    field: InputField::SecretCode,
                    value: "2026".to_string(),
                },
            )
            .expect_err("wrong field");
        assert!(matches!(err, JourneyError::Unavailable { .. }));
    }

    #[test]
    fn card_selection_records_label_and_ignores_reselect() {
        let mut c = at_stage(Stage::Gallery);
        c.dispatch(Millis(0), Action::Select(2)).expect("select");
        assert_eq!(c.session().answer(Answer::Gallery), Some("Cake"));
        assert!(
            c.presenter()
                .effects
                .contains(&Effect::Success("You selected \"Cake\" ✨".to_string()))
        );

        c.dispatch(Millis(10), Action::Select(2)).expect("reselect");
        assert_eq!(c.presenter().count_effects(|e| matches!(e, Effect::Success(_))), 1);

        c.dispatch(Millis(20), Action::Select(0)).expect("switch");
        assert_eq!(c.session().answer(Answer::Gallery), Some("Gifts"));
    }

    #[test]
    fn unknown_card_is_an_error() {
        let mut c = at_stage(Stage::Memory);
        let err = c.dispatch(Millis(0), Action::Select(3)).expect_err("no card");
        assert!(matches!(err, JourneyError::UnknownCard(3)));
    }

    #[test]
    fn placed_token_cannot_be_placed_again() {
        let mut c = at_stage(Stage::Puzzle);
        c.dispatch(Millis(0), Action::PlaceLetter(TokenId(2))).expect("place");
        let err = c
            .dispatch(Millis(10), Action::PlaceLetter(TokenId(2)))
            .expect_err("used");
        assert!(matches!(err, JourneyError::TokenUnavailable(TokenId(2))));
        assert_eq!(c.session().puzzle().len(), 1);
    }

    #[test]
    fn reset_puzzle_keeps_stage() {
        let mut c = at_stage(Stage::Puzzle);
        c.dispatch(Millis(0), Action::PlaceLetter(TokenId(0))).expect("place");
        c.tick(Millis(400)).expect("tick");

        c.dispatch(Millis(500), Action::ResetPuzzle).expect("reset");
        assert!(c.session().puzzle().is_empty());
        c.tick(Millis(900)).expect("tick");
        assert_eq!(c.session().stage(), Stage::Puzzle);
    }

    #[test]
    fn unlock_shakes_then_bursts() {
        let mut c = at_stage(Stage::Unlock);
        c.dispatch(Millis(0), Action::Unlock).expect("unlock");
        assert_eq!(c.presenter().effects.last(), Some(&Effect::Shake));

        c.tick(Millis(999)).expect("tick");
        assert_eq!(c.presenter().count_effects(|e| *e == Effect::Confetti), 0);

        c.tick(Millis(1400)).expect("tick");
        assert_eq!(c.presenter().count_effects(|e| *e == Effect::Confetti), 1);
        assert_eq!(c.session().stage(), Stage::FinalReveal);
    }

    #[test]
    fn finish_requires_sent_feedback() {
        let mut c = at_stage(Stage::FinalReveal);
        let err = c.dispatch(Millis(0), Action::Finish).expect_err("not armed");
        assert!(matches!(err, JourneyError::Unavailable { .. }));
        assert!(c.session().is_locked());
    }

    #[test]
    fn restart_resets_from_any_stage() {
        let mut c = at_stage(Stage::Puzzle);
        c.dispatch(Millis(0), Action::PlaceLetter(TokenId(1))).expect("place");

        c.restart(Millis(50)).expect("restart");
        assert_eq!(c.session().stage_index(), 0);
        assert!(c.session().puzzle().is_empty());
        assert!(c.session().is_locked());

        c.tick(Millis(450)).expect("tick");
        assert_eq!(c.session().stage(), Stage::Welcome);
        assert_eq!(
            c.presenter().last_panel().map(|p| p.stage),
            Some(Stage::Welcome)
        );
    }

    #[test]
    fn restart_exit_animation_leaves_the_stage_on_screen() {
        let mut c = at_stage(Stage::Complete);
        c.dispatch(Millis(0), Action::Restart).expect("restart");

        assert_eq!(
            c.presenter().effects.last(),
            Some(&Effect::ExitAnimation {
                from: Stage::Complete
            })
        );
        assert_eq!(
            c.presenter().last_panel().map(|p| p.stage),
            Some(Stage::Complete)
        );
    }

    #[test]
    fn tile_shuffle_runs_on_every_puzzle_render() {
        let mut c = controller().with_tile_shuffle(|order| order.rotate_left(1));
        c.session.enter(Stage::Puzzle);
        c.render_current().expect("render");
        assert_eq!(c.session().tile_order(), &[4, 0, 2, 1, 3]);

        c.dispatch(Millis(0), Action::PlaceLetter(TokenId(0))).expect("place");
        c.tick(Millis(400)).expect("tick");
        assert_eq!(c.session().tile_order(), &[0, 2, 1, 3, 4]);

        let shown: Vec<u8> = c
            .presenter()
            .last_panel()
            .and_then(|panel| {
                panel.controls.iter().find_map(|control| match control {
                    Control::Tiles(tiles) => Some(tiles.iter().map(|t| t.token.id.0).collect()),
                    _ => None,
                })
            })
            .expect("tiles");
        assert_eq!(shown, vec![0, 2, 1, 3, 4]);
    }

    #[test]
    fn tile_shuffle_leaves_other_stages_alone() {
        let mut c = controller().with_tile_shuffle(|order| order.reverse());
        c.start(Millis(0)).expect("start");
        c.session.enter(Stage::Gallery);
        c.render_current().expect("render");
        assert_eq!(c.session().tile_order(), &PUZZLE_DISPLAY_ORDER);
    }

    #[test]
    fn exit_guard_follows_lock_and_stage() {
        let mut c = at_stage(Stage::Puzzle);
        assert!(c.guards_exit());
        c.session.locked = false;
        assert!(!c.guards_exit());
        c.session.locked = true;
        c.session.enter(Stage::Complete);
        assert!(!c.guards_exit());
    }
}
