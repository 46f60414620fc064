use std::collections::VecDeque;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Lifecycle of a session: `Ready` until the first reveal triggers
/// generation, then `Active` until a terminal outcome.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Ready,
    Active,
    Won,
    Lost,
}

impl SessionState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Ready
    }
}

/// Player input kinds the engine accepts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Reveal,
    Flag,
}

/// What a dispatched action did: the session state afterwards, plus whether
/// any cell changed (so a front-end can skip redundant redraws).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ActionResult {
    pub state: SessionState,
    pub changed: bool,
}

/// One game of minesweeper.
///
/// Mine placement is deferred: the session starts with every cell covered
/// and no layout, and generates one around the first revealed coordinate so
/// the opening move can never hit a mine. Terminal states are inert; any
/// action after a win or loss reports no change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    config: GameConfig,
    seed: u64,
    layout: Option<MineLayout>,
    board: Array2<CellView>,
    revealed_safe: CellCount,
    flagged_count: CellCount,
    state: SessionState,
    detonated: Option<Coord2>,
}

impl Session {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            seed,
            layout: None,
            board: Array2::default(config.size().to_nd_index()),
            revealed_safe: 0,
            flagged_count: 0,
            state: SessionState::default(),
            detonated: None,
        }
    }

    /// Builds an already-generated session over a fixed layout. The regular
    /// deferred path goes through [`Session::new`]; this one serves replays
    /// and tests that need a known mine placement.
    pub fn with_layout(layout: MineLayout) -> Self {
        let config = layout.game_config();
        Self {
            config,
            seed: 0,
            board: Array2::default(config.size().to_nd_index()),
            layout: Some(layout),
            revealed_safe: 0,
            flagged_count: 0,
            state: SessionState::Active,
            detonated: None,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn rows(&self) -> Coord {
        self.config.rows()
    }

    pub fn cols(&self) -> Coord {
        self.config.cols()
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn is_generated(&self) -> bool {
        self.layout.is_some()
    }

    /// Mines not yet accounted for by flags. Negative when overflagged.
    pub fn mines_left(&self) -> i64 {
        i64::from(self.config.mines()) - i64::from(self.flagged_count)
    }

    pub fn revealed_safe_count(&self) -> CellCount {
        self.revealed_safe
    }

    /// The mine the player stepped on, once lost.
    pub fn detonated(&self) -> Option<Coord2> {
        self.detonated
    }

    /// The generated mine layout, `None` until the first reveal.
    pub fn layout(&self) -> Option<&MineLayout> {
        self.layout.as_ref()
    }

    pub fn has_mine_at(&self, coords: Coord2) -> Result<bool> {
        let coords = self.config.validate_coords(coords)?;
        Ok(self.layout.as_ref().is_some_and(|layout| layout.contains_mine(coords)))
    }

    pub fn view(&self, coords: Coord2) -> Result<CellView> {
        let coords = self.config.validate_coords(coords)?;
        Ok(self.board[coords.to_nd_index()])
    }

    /// All cells with their coordinates, row-major, for a full redraw.
    pub fn iter_views(&self) -> impl Iterator<Item = (Coord2, CellView)> + '_ {
        self.board
            .indexed_iter()
            .map(|(index, &view)| (dim_to_coords(index), view))
    }

    /// Dispatches one click. On the very first reveal the grid is generated
    /// around the clicked coordinate before the reveal itself runs.
    pub fn apply_click(&mut self, coords: Coord2, action: Action) -> Result<ActionResult> {
        let changed = match action {
            Action::Reveal => self.reveal(coords)?.has_update(),
            Action::Flag => self.toggle_flag(coords)?.has_update(),
        };
        Ok(ActionResult {
            state: self.state,
            changed,
        })
    }

    /// Flips the flag on a covered cell. Open cells are left alone.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        use CellView::*;

        let coords = self.config.validate_coords(coords)?;
        if self.state.is_finished() {
            return Ok(MarkOutcome::NoChange);
        }

        Ok(match self.board[coords.to_nd_index()] {
            Unknown => {
                self.board[coords.to_nd_index()] = Flagged;
                self.flagged_count += 1;
                MarkOutcome::Changed
            }
            Flagged => {
                self.board[coords.to_nd_index()] = Unknown;
                self.flagged_count -= 1;
                MarkOutcome::Changed
            }
            Open(_) | Exploded => MarkOutcome::NoChange,
        })
    }

    /// Uncovers a cell. No-op on flagged or already-open cells; a flagged
    /// cell must be unflagged before it can be revealed.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.config.validate_coords(coords)?;

        if self.state.is_finished()
            || !matches!(self.board[coords.to_nd_index()], CellView::Unknown)
        {
            return Ok(RevealOutcome::NoChange);
        }

        if self.layout.is_none() {
            let layout =
                RandomMinefieldGenerator::new(self.seed, coords).generate(&self.config)?;
            self.layout = Some(layout);
            self.state = SessionState::Active;
        }

        Ok(self.flood_reveal(coords))
    }

    /// Queue-driven flood fill: each cell is opened when popped, and only
    /// zero-count cells push their still-covered neighbors. The open state
    /// itself is the visited marker, so the loop terminates after at most
    /// `rows * cols` pops.
    fn flood_reveal(&mut self, origin: Coord2) -> RevealOutcome {
        let Some(layout) = self.layout.as_ref() else {
            return RevealOutcome::NoChange;
        };

        if layout.contains_mine(origin) {
            self.detonated = Some(origin);
            // The game is over, so every mine is exposed, flagged or not.
            for mine in layout.iter_mines() {
                self.board[mine.to_nd_index()] = CellView::Exploded;
            }
            self.state = SessionState::Lost;
            return RevealOutcome::HitMine;
        }

        let mut queue = VecDeque::from([origin]);
        while let Some(next) = queue.pop_front() {
            if !matches!(self.board[next.to_nd_index()], CellView::Unknown) {
                continue;
            }

            let count = layout.adjacent_mines(next);
            self.board[next.to_nd_index()] = CellView::Open(count);
            self.revealed_safe += 1;

            // Neighbors of a zero cell are never mines, so expanding through
            // them can never detonate. Flagged cells stay covered.
            if count == 0 {
                queue.extend(
                    layout
                        .iter_neighbors(next)
                        .filter(|&pos| matches!(self.board[pos.to_nd_index()], CellView::Unknown)),
                );
            }
        }

        if self.revealed_safe == layout.safe_cell_count() {
            self.state = SessionState::Won;
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }
}
