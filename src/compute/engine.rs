//! Life engine - grid state, stepping and lifecycle.
//!
//! The engine owns a committed grid and a scratch grid of the same size.
//! A step writes every next-generation cell into the scratch grid, reading
//! only the committed grid, then swaps the two. Observers are notified once
//! per committed generation with an owned copy of the grid.

use std::fmt;

use rayon::prelude::*;

use super::{EngineError, Generation, GenerationObserver, Grid, GridStats, next_state};
use crate::schema::{EngineConfig, Seed};

/// Conway's Game of Life engine on a toroidal grid.
///
/// `start` and `stop` only flip the running flag; the cadence is enforced
/// by whoever drives [`LifeEngine::step`] (see [`crate::driver::EngineHandle`]).
pub struct LifeEngine {
    grid: Grid,
    /// Next-generation buffer. Always the same dimensions as `grid`.
    scratch: Grid,
    running: bool,
    generation: u64,
    observers: Vec<Box<dyn GenerationObserver>>,
}

impl LifeEngine {
    /// Random grid of `width` x `height` cells, seeded from entropy.
    pub fn new(
        width: usize,
        height: usize,
        probability_of_life: u32,
    ) -> Result<Self, EngineError> {
        Self::from_seed(&Seed::random(width, height, probability_of_life, None))
    }

    /// Build from any seed pattern.
    pub fn from_seed(seed: &Seed) -> Result<Self, EngineError> {
        seed.generate().map(Self::from_grid)
    }

    /// Copy explicit rows as the initial state.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self, EngineError> {
        Grid::from_rows(rows).map(Self::from_grid)
    }

    /// Random grid as described by a configuration.
    pub fn from_config(config: &EngineConfig) -> Result<Self, EngineError> {
        Self::from_seed(&config.seed())
    }

    /// Take ownership of an existing grid.
    pub fn from_grid(grid: Grid) -> Self {
        let scratch = grid.dead_like();
        log::info!(
            "engine created: {}x{} grid, {} live cells",
            grid.rows(),
            grid.cols(),
            grid.population()
        );
        Self {
            grid,
            scratch,
            running: false,
            generation: 0,
            observers: Vec::new(),
        }
    }

    /// Register an observer for generation-complete notifications.
    pub fn subscribe<O: GenerationObserver + 'static>(&mut self, observer: O) {
        self.observers.push(Box::new(observer));
    }

    /// Compute and commit the next generation, then notify observers.
    pub fn step(&mut self) {
        let cols = self.grid.cols();
        let grid = &self.grid;

        self.scratch
            .cells_mut()
            .par_chunks_mut(cols)
            .enumerate()
            .for_each(|(row, next)| {
                for (col, cell) in next.iter_mut().enumerate() {
                    *cell = next_state(grid.cell(row, col), grid.live_neighbors(row, col));
                }
            });

        // Commit (no allocation, just buffer swap)
        std::mem::swap(&mut self.grid, &mut self.scratch);
        self.generation += 1;

        log::debug!(
            "generation {}: {} live cells",
            self.generation,
            self.grid.population()
        );

        self.notify();
    }

    /// Run the given number of steps back to back.
    pub fn run(&mut self, steps: u64) {
        for _ in 0..steps {
            self.step();
        }
    }

    fn notify(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let generation = self.snapshot();
        for observer in &mut self.observers {
            observer.on_generation(&generation);
        }
    }

    /// Mark the engine as running. Returns false if it already was.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        log::info!("engine started at generation {}", self.generation);
        true
    }

    /// Mark the engine as stopped. Returns false if it already was.
    pub fn stop(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        log::info!("engine stopped at generation {}", self.generation);
        true
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Override a single cell. Out-of-range coordinates leave the grid untouched.
    pub fn set_cell(&mut self, row: usize, col: usize, alive: bool) -> Result<(), EngineError> {
        self.grid.set(row, col, alive)
    }

    /// Flip a single cell and return its new state.
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> Result<bool, EngineError> {
        let alive = !self.grid.get(row, col)?;
        self.grid.set(row, col, alive)?;
        Ok(alive)
    }

    pub fn get_cell(&self, row: usize, col: usize) -> Result<bool, EngineError> {
        self.grid.get(row, col)
    }

    /// Kill every cell. Dimensions, running flag and generation count are kept.
    pub fn reset(&mut self) {
        self.grid.clear();
        log::info!("engine reset at generation {}", self.generation);
    }

    /// Read-only view of the committed grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Owned copy of the committed grid.
    pub fn snapshot(&self) -> Generation {
        Generation {
            index: self.generation,
            grid: self.grid.clone(),
        }
    }

    /// Number of committed steps.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn stats(&self) -> GridStats {
        GridStats::from_grid(self.generation, &self.grid)
    }
}

impl fmt::Debug for LifeEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifeEngine")
            .field("rows", &self.grid.rows())
            .field("cols", &self.grid.cols())
            .field("running", &self.running)
            .field("generation", &self.generation)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Shape;
    use proptest::prelude::*;
    use std::sync::mpsc;
    use std::sync::{Arc, Mutex};

    fn engine(text: &str) -> LifeEngine {
        LifeEngine::from_seed(&Seed::plaintext(text)).unwrap()
    }

    #[test]
    fn test_all_dead_stays_dead() {
        let mut engine = engine("...\n...\n...");
        engine.step();
        assert_eq!(engine.grid().population(), 0);
        assert_eq!(engine.generation(), 1);
    }

    #[test]
    fn test_isolated_cell_dies() {
        for size in [3, 4, 7] {
            let mut engine =
                LifeEngine::from_seed(&Seed::cells(size, size, vec![(1, 1)])).unwrap();
            engine.step();
            assert_eq!(engine.grid().population(), 0, "{}x{} grid", size, size);
        }
    }

    #[test]
    fn test_block_is_stable() {
        let mut engine = LifeEngine::from_seed(&Seed::shape(6, 6, Shape::Block, 2, 2)).unwrap();
        let initial = engine.grid().clone();
        for _ in 0..5 {
            engine.step();
            assert_eq!(engine.grid(), &initial);
        }
    }

    #[test]
    fn test_blinker_oscillates() {
        let mut engine = engine(".....\n.....\n.###.\n.....\n.....");
        let horizontal = engine.grid().clone();
        let vertical = Grid::from_plaintext(".....\n..#..\n..#..\n..#..\n.....").unwrap();

        engine.step();
        assert_eq!(engine.grid(), &vertical);
        engine.step();
        assert_eq!(engine.grid(), &horizontal);
        engine.step();
        assert_eq!(engine.grid(), &vertical);
    }

    #[test]
    fn test_blinker_across_the_edge() {
        // Horizontal blinker centered on column 0, split across the left/right seam.
        let mut engine = engine(".....\n.....\n##..#\n.....\n.....");
        engine.step();
        let expected = Grid::from_plaintext(".....\n#....\n#....\n#....\n.....").unwrap();
        assert_eq!(engine.grid(), &expected);
    }

    #[test]
    fn test_glider_wraps_around() {
        let size = 8;
        let mut engine =
            LifeEngine::from_seed(&Seed::shape(size, size, Shape::Glider, 0, 0)).unwrap();
        let initial = engine.grid().clone();

        engine.run(4);
        let shifted = Seed::shape(size, size, Shape::Glider, 1, 1).generate().unwrap();
        assert_eq!(engine.grid(), &shifted);

        // After 4 * size generations the glider returns to where it started.
        engine.run(4 * size as u64 - 4);
        assert_eq!(engine.grid(), &initial);
    }

    #[test]
    fn test_corner_birth_through_wrap() {
        // Three live cells around (0, 0) only via wrap-around.
        let mut engine = engine("....#\n.....\n.....\n.....\n#...#");
        assert_eq!(engine.grid().live_neighbors(0, 0), 3);
        engine.step();
        assert!(engine.get_cell(0, 0).unwrap());
    }

    #[test]
    fn test_reset_then_step_is_dead() {
        let mut engine = LifeEngine::from_seed(&Seed::random(20, 20, 50, Some(3))).unwrap();
        engine.start();
        engine.reset();
        assert!(engine.is_running());
        assert_eq!((engine.rows(), engine.cols()), (20, 20));
        engine.step();
        assert_eq!(engine.grid().population(), 0);
    }

    #[test]
    fn test_set_cell_out_of_range_leaves_grid() {
        let mut engine = LifeEngine::from_seed(&Seed::random(5, 4, 50, Some(11))).unwrap();
        let before = engine.grid().clone();
        assert_eq!(
            engine.set_cell(4, 0, true),
            Err(EngineError::OutOfRange {
                row: 4,
                col: 0,
                rows: 4,
                cols: 5
            })
        );
        assert!(engine.set_cell(0, 5, false).is_err());
        assert_eq!(engine.grid(), &before);
    }

    #[test]
    fn test_toggle_cell() {
        let mut engine = engine("...\n...\n...");
        assert_eq!(engine.toggle_cell(1, 2), Ok(true));
        assert!(engine.get_cell(1, 2).unwrap());
        assert_eq!(engine.toggle_cell(1, 2), Ok(false));
        assert!(engine.toggle_cell(3, 0).is_err());
    }

    #[test]
    fn test_start_stop_idempotent() {
        let mut engine = engine("...\n...\n...");
        assert!(!engine.is_running());
        assert!(engine.start());
        assert!(!engine.start());
        assert!(engine.is_running());
        assert!(engine.stop());
        assert!(!engine.stop());
        assert!(!engine.is_running());
    }

    #[test]
    fn test_explicit_seed_errors() {
        let empty: Vec<Vec<bool>> = Vec::new();
        assert_eq!(
            LifeEngine::from_rows(&empty).unwrap_err(),
            EngineError::NullSeed
        );
        assert_eq!(
            LifeEngine::from_rows(&[Vec::<bool>::new()]).unwrap_err(),
            EngineError::NullSeed
        );
        assert!(matches!(
            LifeEngine::from_rows(&[vec![true, true], vec![true]]),
            Err(EngineError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            LifeEngine::new(0, 10, 25),
            Err(EngineError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_one_notification_per_step() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let mut engine = engine(".....\n.....\n.###.\n.....\n.....");
        engine.subscribe(move |generation: &Generation| {
            sink.lock()
                .unwrap()
                .push((generation.index, generation.grid.population()));
        });

        engine.run(3);
        assert_eq!(*seen.lock().unwrap(), vec![(1, 3), (2, 3), (3, 3)]);
    }

    #[test]
    fn test_channel_observer_receives_full_grid() {
        let (tx, rx) = mpsc::sync_channel(1);
        let mut engine = engine(".....\n.....\n.###.\n.....\n.....");
        engine.subscribe(crate::compute::ChannelObserver::new(tx));

        engine.step();
        let generation = rx.try_recv().unwrap();
        assert_eq!(generation.index, 1);
        assert_eq!(&generation.grid, engine.grid());

        // Mutating the engine afterwards does not affect the delivered copy.
        engine.reset();
        assert_eq!(generation.grid.population(), 3);
        assert!(rx.try_recv().is_err());
    }

    fn reference_step(rows: usize, cols: usize, cells: &[bool]) -> Vec<bool> {
        let at = |r: isize, c: isize| {
            let r = r.rem_euclid(rows as isize) as usize;
            let c = c.rem_euclid(cols as isize) as usize;
            cells[r * cols + c]
        };
        let mut next = vec![false; rows * cols];
        for r in 0..rows as isize {
            for c in 0..cols as isize {
                let mut n = 0;
                for dr in -1..=1 {
                    for dc in -1..=1 {
                        if (dr, dc) != (0, 0) && at(r + dr, c + dc) {
                            n += 1;
                        }
                    }
                }
                let alive = at(r, c);
                let survives = alive && (n == 2 || n == 3);
                let born = !alive && n == 3;
                next[r as usize * cols + c as usize] = survives || born;
            }
        }
        next
    }

    fn arb_grid() -> impl Strategy<Value = (usize, usize, Vec<bool>)> {
        (1usize..10, 1usize..10).prop_flat_map(|(rows, cols)| {
            (
                Just(rows),
                Just(cols),
                prop::collection::vec(any::<bool>(), rows * cols),
            )
        })
    }

    proptest! {
        #[test]
        fn prop_step_matches_reference((rows, cols, cells) in arb_grid()) {
            let input: Vec<Vec<bool>> = cells.chunks(cols).map(<[bool]>::to_vec).collect();
            let mut engine = LifeEngine::from_rows(&input).unwrap();
            engine.step();
            prop_assert_eq!(engine.rows(), rows);
            prop_assert_eq!(engine.cols(), cols);
            let expected = reference_step(rows, cols, &cells);
            prop_assert_eq!(engine.grid().as_slice(), expected.as_slice());
        }
    }
}
