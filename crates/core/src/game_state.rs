//! Game state module - the turn controller
//!
//! Sequences player input, the removal/compaction animation, and the opponent's
//! table lookup. All time flows through [`GameState::tick`]: the submit and
//! response sequences are queues of script steps that either act immediately
//! or hold the queue for some milliseconds, some frames, the strategy table,
//! or the current reveal.
//!
//! Two kinds of sequence run side by side:
//!
//! - **Reveals** grey a staged removal bar by bar. Each one is tagged with the
//!   generation current when it was staged and stops the next time it wakes up
//!   if a newer selection has superseded it.
//! - **The script** runs a committed move to completion. It never checks the
//!   generation: a submitted move is never abandoned half-way.
//!
//! State is always mutated before the step that animates it, so a selection
//! arriving mid-animation sees a consistent board.

use std::collections::VecDeque;
use std::sync::Arc;

use arrayvec::ArrayVec;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::board::Board;
use crate::error::Result;
use crate::event::GameEvent;
use crate::notation::Move;
use crate::snapshot::{BannerSnapshot, GameSnapshot, RowSnapshot};
use crate::strategy::{ResponseSource, StrategyTable};
use crate::timing::Timings;
use crate::types::{BarMark, Outcome, Side, TurnPhase, MAX_ROWS};

/// Visual state of one row, kept index-aligned with the board's rows.
#[derive(Debug, Clone, PartialEq)]
struct RowView {
    bars: Vec<BarMark>,
    /// Offset (in rows) the row slides back from after a re-sort.
    slide_from: f32,
    squished: bool,
}

impl RowView {
    fn new(size: u32) -> Self {
        Self {
            bars: vec![BarMark::Solid; size as usize],
            slide_from: 0.0,
            squished: false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct RevealTask {
    generation: u64,
    row: usize,
    next: usize,
    end: usize,
    wait_ms: u32,
    done: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Wait(u32),
    WaitFrames(u8),
    HideBar { row: usize, bar: usize },
    CommitRow(usize),
    SquishHidden,
    DropHidden,
    SortRows,
    ReleaseSlide,
    MarkEmpty,
    RemoveEmpty,
    FlipTurn,
    AwaitTable,
    ChooseResponse,
    AwaitReveal,
    Submit(Side),
    ReturnTurn,
}

/// What the script is currently blocked on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    None,
    Millis(u32),
    Frames(u8),
    Table,
    Reveal,
}

#[derive(Debug, Clone, Copy)]
struct Slide {
    elapsed_ms: u32,
    running: bool,
}

#[derive(Debug, Clone, Copy)]
struct Banner {
    outcome: Outcome,
    frames_left: u8,
    elapsed_ms: u32,
}

#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    views: ArrayVec<RowView, MAX_ROWS>,
    initial_sizes: Vec<u32>,
    timings: Timings,
    can_move: bool,
    /// Bumped on every staged selection and every submission.
    generation: u64,
    reveals: Vec<RevealTask>,
    script: VecDeque<Step>,
    pending: Pending,
    submitting: bool,
    mover: Side,
    committing: Option<Move>,
    slide: Option<Slide>,
    table: Option<Arc<StrategyTable>>,
    oversized: bool,
    outcome: Option<Outcome>,
    banner: Option<Banner>,
    last_response: Option<(Move, ResponseSource)>,
    /// Monotonic session id (increments on restart).
    session_id: u32,
    rng: StdRng,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session for the given row sizes.
    ///
    /// `seed` makes the opponent's random fallback deterministic.
    pub fn new(sizes: &[u32], timings: Timings, seed: Option<u64>) -> Result<Self> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(sizes, timings, rng)
    }

    fn with_rng(sizes: &[u32], timings: Timings, rng: StdRng) -> Result<Self> {
        let board = Board::new(sizes)?;
        let views = board.rows().iter().map(|r| RowView::new(r.size)).collect();

        Ok(Self {
            board,
            views,
            initial_sizes: sizes.to_vec(),
            timings,
            can_move: true,
            generation: 0,
            reveals: Vec::new(),
            script: VecDeque::new(),
            pending: Pending::None,
            submitting: false,
            mover: Side::Player,
            committing: None,
            slide: None,
            table: None,
            oversized: false,
            outcome: None,
            banner: None,
            last_response: None,
            session_id: 0,
            rng,
            events: Vec::new(),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn can_move(&self) -> bool {
        self.can_move
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn oversized(&self) -> bool {
        self.oversized
    }

    pub fn table_ready(&self) -> bool {
        self.table.is_some()
    }

    pub fn session_id(&self) -> u32 {
        self.session_id
    }

    pub fn last_response(&self) -> Option<(Move, ResponseSource)> {
        self.last_response
    }

    /// Visual marks of a row's bars.
    pub fn bars(&self, row: usize) -> Option<&[BarMark]> {
        self.views.get(row).map(|v| v.bars.as_slice())
    }

    pub fn phase(&self) -> TurnPhase {
        if self.outcome.is_some() {
            TurnPhase::Ended
        } else if self.submitting {
            TurnPhase::Submitting
        } else if !self.can_move {
            TurnPhase::OpponentAnimating
        } else if self.reveal_in_flight() {
            TurnPhase::PlayerAnimating
        } else {
            TurnPhase::Idle
        }
    }

    /// Whether player selections and submits are currently honoured.
    pub fn accepts_input(&self) -> bool {
        self.can_move && !self.submitting && self.outcome.is_none() && !self.oversized
    }

    /// Player pressed bar `bar` of row `row`: stage every bar from there to the
    /// end of the row. Returns false if the press was ignored.
    pub fn select_bar(&mut self, row: usize, bar: usize) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let Some(size) = self.board.row(row).map(|r| r.size) else {
            return false;
        };
        if bar >= size as usize {
            return false;
        }
        let count = size - bar as u32;
        self.stage(Side::Player, Move::new(row, count)).is_ok()
    }

    /// Submit the player's staged removal. Returns false if nothing is staged
    /// or input is not accepted right now.
    pub fn submit(&mut self) -> bool {
        if !self.accepts_input() || self.board.staged_total() == 0 {
            return false;
        }
        self.begin_submit(Side::Player);
        true
    }

    /// Hand over the strategy table. Only the first table is kept.
    ///
    /// Flags the session as oversized if the initial board exceeds the table's
    /// bounds; the flag only affects presentation and input.
    pub fn provide_table(&mut self, table: Arc<StrategyTable>) {
        if self.table.is_some() {
            return;
        }
        self.oversized = !table.meta.supports(&self.initial_sizes);
        self.table = Some(table);
        self.events.push(GameEvent::TableReady {
            oversized: self.oversized,
        });
    }

    /// Start a fresh session on the same board (only once the game ended).
    ///
    /// The loaded table, timings and random stream carry over.
    pub fn restart(&mut self) -> bool {
        if self.outcome.is_none() {
            return false;
        }
        let Ok(mut next) = Self::with_rng(&self.initial_sizes, self.timings, self.rng.clone()) else {
            return false;
        };
        next.table = self.table.take();
        next.oversized = self.oversized;
        next.session_id = self.session_id.wrapping_add(1);
        next.events = std::mem::take(&mut self.events);
        *self = next;
        true
    }

    /// Advance every running sequence by `elapsed_ms`.
    ///
    /// Returns whether anything visible changed. An error means the strategy
    /// table produced an undecodable or illegal move.
    pub fn tick(&mut self, elapsed_ms: u32) -> Result<bool> {
        let mut changed = self.advance_reveals(elapsed_ms);
        changed |= self.advance_slide(elapsed_ms);
        changed |= self.advance_script(elapsed_ms)?;
        changed |= self.advance_banner(elapsed_ms);
        Ok(changed)
    }

    /// Take the events emitted since the last call.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    /// Fill `out` in place. Row buffers are reused, so this does not allocate
    /// once `out` has seen a board this large.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        let factor = self.slide_factor();
        let rows = self.board.rows();
        out.rows.truncate(rows.len());
        for (i, (row, view)) in rows.iter().zip(self.views.iter()).enumerate() {
            let offset = view.slide_from * factor;
            match out.rows.get_mut(i) {
                Some(slot) => {
                    slot.size = row.size;
                    slot.removed = row.removed;
                    slot.bars.clear();
                    slot.bars.extend_from_slice(&view.bars);
                    slot.offset = offset;
                    slot.squished = view.squished;
                }
                None => out.rows.push(RowSnapshot {
                    size: row.size,
                    removed: row.removed,
                    bars: view.bars.clone(),
                    offset,
                    squished: view.squished,
                }),
            }
        }
        out.phase = self.phase();
        out.can_move = self.can_move;
        out.generation = self.generation;
        out.session_id = self.session_id;
        out.table_ready = self.table.is_some();
        out.oversized = self.oversized;
        out.banner = self.banner.map(|b| BannerSnapshot {
            outcome: b.outcome,
            progress: self.banner_progress(&b),
        });
        out.last_response = self.last_response;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }

    fn reveal_in_flight(&self) -> bool {
        self.reveals
            .iter()
            .any(|t| t.generation == self.generation && !t.done)
    }

    fn stage(&mut self, side: Side, mv: Move) -> Result<()> {
        self.board.stage(mv)?;
        self.generation += 1;

        let row = self.board.rows()[mv.row];
        let start = row.first_removed() as usize;

        // Greying inside the new staged range survives; everything else resets.
        for (r, view) in self.views.iter_mut().enumerate() {
            for (b, bar) in view.bars.iter_mut().enumerate() {
                if *bar == BarMark::Greyed && (r != mv.row || b < start) {
                    *bar = BarMark::Solid;
                }
            }
        }

        if let Some(bar) = self.views[mv.row].bars.get_mut(start) {
            if *bar == BarMark::Solid {
                *bar = BarMark::Greyed;
            }
        }
        self.reveals.push(RevealTask {
            generation: self.generation,
            row: mv.row,
            next: start + 1,
            end: row.size as usize,
            wait_ms: self.timings.step_ms,
            done: false,
        });

        self.events.push(GameEvent::Staged {
            side,
            mv,
            generation: self.generation,
        });
        Ok(())
    }

    fn begin_submit(&mut self, side: Side) {
        self.submitting = true;
        self.mover = side;
        // Retire any reveal still running for the staged move.
        self.generation += 1;
        self.committing = self
            .board
            .rows()
            .iter()
            .position(|r| r.removed > 0)
            .map(|i| Move::new(i, self.board.rows()[i].removed));

        let t = self.timings;
        let mut plan = Vec::new();
        let mut hidden: u32 = 0;
        for (y, row) in self.board.rows().iter().enumerate() {
            for x in row.first_removed()..row.size {
                plan.push(Step::HideBar {
                    row: y,
                    bar: x as usize,
                });
                plan.push(Step::Wait(t.step_ms));
                hidden += 1;
            }
            plan.push(Step::CommitRow(y));
        }
        plan.extend([
            Step::Wait(t.step_ms.saturating_mul(hidden)),
            Step::SquishHidden,
            Step::Wait(t.squish_ms),
            Step::DropHidden,
            Step::SortRows,
            Step::WaitFrames(t.settle_frames),
            Step::ReleaseSlide,
            Step::MarkEmpty,
            Step::Wait(t.squish_ms),
            Step::RemoveEmpty,
            Step::FlipTurn,
        ]);

        for step in plan.into_iter().rev() {
            self.script.push_front(step);
        }
    }

    fn advance_reveals(&mut self, elapsed_ms: u32) -> bool {
        let step_ms = self.timings.step_ms;
        let generation = self.generation;
        let mut changed = false;

        for task in self.reveals.iter_mut() {
            let mut budget = elapsed_ms;
            loop {
                if budget < task.wait_ms {
                    task.wait_ms -= budget;
                    break;
                }
                budget -= task.wait_ms;
                task.wait_ms = 0;

                if task.generation != generation || task.next >= task.end {
                    task.done = true;
                    break;
                }
                if let Some(bar) = self
                    .views
                    .get_mut(task.row)
                    .and_then(|v| v.bars.get_mut(task.next))
                {
                    if *bar == BarMark::Solid {
                        *bar = BarMark::Greyed;
                        changed = true;
                    }
                }
                task.next += 1;
                task.wait_ms = step_ms;
            }
        }

        self.reveals.retain(|t| !t.done);
        changed
    }

    fn advance_slide(&mut self, elapsed_ms: u32) -> bool {
        let Some(slide) = self.slide.as_mut() else {
            return false;
        };
        if !slide.running {
            return false;
        }
        slide.elapsed_ms = slide.elapsed_ms.saturating_add(elapsed_ms);
        if slide.elapsed_ms >= self.timings.slide_ms {
            self.slide = None;
            for view in self.views.iter_mut() {
                view.slide_from = 0.0;
            }
        }
        true
    }

    fn advance_banner(&mut self, elapsed_ms: u32) -> bool {
        let banner_ms = self.timings.banner_ms;
        let Some(banner) = self.banner.as_mut() else {
            return false;
        };
        if banner.frames_left > 0 {
            banner.frames_left -= 1;
            return true;
        }
        if banner.elapsed_ms >= banner_ms {
            return false;
        }
        banner.elapsed_ms = banner.elapsed_ms.saturating_add(elapsed_ms).min(banner_ms);
        true
    }

    fn advance_script(&mut self, elapsed_ms: u32) -> Result<bool> {
        let mut budget = elapsed_ms;
        let mut progressed = false;

        // Frame waits consume whole ticks.
        if let Pending::Frames(n) = self.pending {
            if n > 1 {
                self.pending = Pending::Frames(n - 1);
                return Ok(false);
            }
            self.pending = Pending::None;
        }

        loop {
            match self.pending {
                Pending::None => {}
                Pending::Millis(ms) => {
                    if budget < ms {
                        self.pending = Pending::Millis(ms - budget);
                        return Ok(progressed);
                    }
                    budget -= ms;
                    self.pending = Pending::None;
                }
                Pending::Frames(_) => return Ok(progressed),
                Pending::Table => {
                    if self.table.is_none() {
                        return Ok(progressed);
                    }
                    self.pending = Pending::None;
                }
                Pending::Reveal => {
                    if self.reveal_in_flight() {
                        return Ok(progressed);
                    }
                    self.pending = Pending::None;
                }
            }

            let Some(step) = self.script.pop_front() else {
                return Ok(progressed);
            };
            progressed = true;
            self.execute(step)?;
        }
    }

    fn execute(&mut self, step: Step) -> Result<()> {
        match step {
            Step::Wait(ms) => self.pending = Pending::Millis(ms),
            Step::WaitFrames(n) => {
                if n > 0 {
                    self.pending = Pending::Frames(n);
                }
            }
            Step::HideBar { row, bar } => {
                if let Some(mark) = self.views.get_mut(row).and_then(|v| v.bars.get_mut(bar)) {
                    *mark = BarMark::Hidden;
                }
            }
            Step::CommitRow(row) => self.board.commit_row(row),
            Step::SquishHidden => {
                for mark in self.views.iter_mut().flat_map(|v| v.bars.iter_mut()) {
                    if *mark == BarMark::Hidden {
                        *mark = BarMark::Squished;
                    }
                }
            }
            Step::DropHidden => {
                for view in self.views.iter_mut() {
                    view.bars.retain(|m| *m != BarMark::Squished);
                }
            }
            Step::SortRows => self.sort_rows(),
            Step::ReleaseSlide => {
                if let Some(slide) = self.slide.as_mut() {
                    slide.running = true;
                }
            }
            Step::MarkEmpty => {
                for (row, view) in self.board.rows().iter().zip(self.views.iter_mut()) {
                    if row.size == 0 {
                        view.squished = true;
                    }
                }
            }
            Step::RemoveEmpty => self.remove_empty_rows(),
            Step::FlipTurn => self.flip_turn(),
            Step::AwaitTable => self.pending = Pending::Table,
            Step::ChooseResponse => self.choose_response()?,
            Step::AwaitReveal => self.pending = Pending::Reveal,
            Step::Submit(side) => self.begin_submit(side),
            Step::ReturnTurn => {
                self.can_move = true;
                if self.board.is_empty() {
                    self.can_move = false;
                    self.end(Outcome::Lost);
                }
            }
        }
        Ok(())
    }

    fn sort_rows(&mut self) {
        let order = self.board.sort_ascending();
        let mut old: Vec<Option<RowView>> = std::mem::take(&mut self.views)
            .into_iter()
            .map(Some)
            .collect();

        for (new_index, &old_index) in order.iter().enumerate() {
            if let Some(mut view) = old.get_mut(old_index).and_then(Option::take) {
                view.slide_from = old_index as f32 - new_index as f32;
                self.views.push(view);
            }
        }

        self.slide = Some(Slide {
            elapsed_ms: 0,
            running: false,
        });
    }

    fn remove_empty_rows(&mut self) {
        let keep: Vec<bool> = self.board.rows().iter().map(|r| r.size > 0).collect();
        self.board.remove_empty();
        let mut i = 0;
        self.views.retain(|_| {
            let k = keep.get(i).copied().unwrap_or(true);
            i += 1;
            k
        });
    }

    fn flip_turn(&mut self) {
        self.submitting = false;
        self.can_move = !self.can_move;
        self.events.push(GameEvent::Submitted {
            side: self.mover,
            mv: self.committing.take(),
            key: self.board.canonical_key(),
        });

        // The player just moved.
        if !self.can_move {
            if self.board.is_empty() {
                self.end(Outcome::Won);
            } else {
                let pause = self.timings.turn_pause_ms;
                self.script.extend([
                    Step::Wait(pause),
                    Step::AwaitTable,
                    Step::ChooseResponse,
                    Step::AwaitReveal,
                    Step::Wait(pause),
                    Step::Submit(Side::Opponent),
                    Step::ReturnTurn,
                ]);
            }
        }
    }

    fn choose_response(&mut self) -> Result<()> {
        let Some(table) = self.table.clone() else {
            return Ok(());
        };
        let (mv, source) = table.respond(&self.board, &mut self.rng)?;
        self.stage(Side::Opponent, mv)?;
        self.last_response = Some((mv, source));
        self.events.push(GameEvent::Responded { mv, source });
        Ok(())
    }

    fn end(&mut self, outcome: Outcome) {
        self.outcome = Some(outcome);
        self.can_move = false;
        self.submitting = false;
        self.script.clear();
        self.pending = Pending::None;
        self.banner = Some(Banner {
            outcome,
            frames_left: self.timings.banner_frames,
            elapsed_ms: 0,
        });
        self.events.push(GameEvent::Ended { outcome });
    }

    fn slide_factor(&self) -> f32 {
        match self.slide {
            None => 0.0,
            Some(s) if !s.running => 1.0,
            Some(_) if self.timings.slide_ms == 0 => 0.0,
            Some(s) => 1.0 - (s.elapsed_ms as f32 / self.timings.slide_ms as f32).min(1.0),
        }
    }

    fn banner_progress(&self, banner: &Banner) -> f32 {
        if banner.frames_left > 0 {
            0.0
        } else if self.timings.banner_ms == 0 {
            1.0
        } else {
            banner.elapsed_ms as f32 / self.timings.banner_ms as f32
        }
    }
}
