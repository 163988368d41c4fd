//! # journey-core
//!
//! The deterministic stage machine behind the birthday journey.
//!
//! A fixed sequence of twelve stages, each gated by a small challenge. The
//! core owns the session, validates answers, sequences transitions and
//! assembles panel descriptions. Drawing them is left to a [`Presenter`].
//!
//! ## Architectural Constraints
//!
//! The core:
//! - Is the ONLY place where journey state exists
//! - Never reads a clock for scheduling; callers pass logical time and tick
//! - Never initiates interaction; only reacts to actions or ticks
//! - Has NO async, NO I/O, NO logging (errors are returned, never printed)

// =============================================================================
// MODULES
// =============================================================================

pub mod compositor;
pub mod controller;
pub mod feedback;
pub mod primitives;
pub mod puzzle;
pub mod session;
pub mod system;
pub mod timeline;
pub mod types;
pub mod validators;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    Action, Answer, Clock, Effect, FixedClock, InputField, JourneyError, Millis, Presenter,
    RecordingPresenter, Rejection,
};

// =============================================================================
// RE-EXPORTS: Stage Machine
// =============================================================================

pub use compositor::{Card, Compositor, Control, Panel, PanelBuilder, Tile};
pub use controller::{StageController, TileShuffle, Transition};
pub use puzzle::{PuzzleBoard, PuzzleToken, TokenId};
pub use session::SessionState;
pub use timeline::{Continuation, Timeline};
pub use validators::Validator;

// =============================================================================
// RE-EXPORTS: Feedback
// =============================================================================

pub use feedback::{
    FeedbackForm, FeedbackRecord, FeedbackStore, MAX_STORE_BYTES, MemoryFeedbackStore,
    export_text, newest_first, records_from_json, records_to_json,
};

// =============================================================================
// RE-EXPORTS: System (from system module)
// =============================================================================

pub use system::{STAGE_COUNT, Stage};
