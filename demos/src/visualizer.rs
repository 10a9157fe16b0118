//! Terminal-independent visualizer model.
//!
//! [`Visualizer`] owns the grid, the endpoints and a [`StepEngine`], and turns
//! [`Action`]s and timer ticks into cell paint. The crossterm driver only
//! translates input into actions and draws [`Visualizer::cell_view`].

use std::rc::Rc;
use std::time::Duration;

use pathviz_core::{Coord, Grid};
use pathviz_search::{Algorithm, Metrics, Phase, SearchError, StepEngine, StepStatus};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use crate::config::{self, VisualizerConfig};
use crate::scatter::scatter_obstacles;

/// What a cell shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellView {
    Empty,
    Obstacle,
    Start,
    End,
    Explored,
    Path,
}

/// Search paint layered over the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Overlay {
    #[default]
    Blank,
    Explored,
    Path,
}

/// User intents, independent of the input device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Place the next endpoint at a cell (a mouse click).
    Select(Coord),
    /// Place the next endpoint under the cursor.
    SelectCursor,
    MoveCursor { drow: i32, dcol: i32 },
    ToggleObstacle,
    RandomObstacles,
    Reset,
    CycleAlgorithm,
    Faster,
    Slower,
    Quit,
}

const SPEED_STEP: u32 = 10;

pub struct Visualizer {
    grid: Rc<Grid>,
    engine: StepEngine<Rc<Grid>>,
    overlay: Vec<Overlay>,
    start: Option<Coord>,
    end: Option<Coord>,
    setting_start: bool,
    cursor: Coord,
    algorithm: Algorithm,
    speed: u32,
    density: f64,
    rng: StdRng,
    metrics: Option<Metrics>,
    message: String,
}

impl Visualizer {
    pub fn new(config: &VisualizerConfig) -> Self {
        let grid = Grid::new(config.grid_size, config.grid_size);
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::rng().random()),
        };
        Self {
            overlay: vec![Overlay::Blank; grid.len()],
            grid: Rc::new(grid),
            engine: StepEngine::new(),
            start: None,
            end: None,
            setting_start: true,
            cursor: Coord::ZERO,
            algorithm: config.algorithm,
            speed: config::clamp_speed(config.speed),
            density: config.obstacle_density,
            rng,
            metrics: None,
            message: String::from("Select a start cell"),
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cursor(&self) -> Coord {
        self.cursor
    }

    pub fn start(&self) -> Option<Coord> {
        self.start
    }

    pub fn end(&self) -> Option<Coord> {
        self.end
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn tick_interval(&self) -> Duration {
        config::tick_interval(self.speed)
    }

    pub fn phase(&self) -> Phase {
        self.engine.phase()
    }

    pub fn is_running(&self) -> bool {
        self.engine.phase() == Phase::Running
    }

    /// Counts of the last successful search.
    pub fn metrics(&self) -> Option<Metrics> {
        self.metrics
    }

    /// One-line status for the footer.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cell_view(&self, c: Coord) -> CellView {
        if Some(c) == self.start {
            return CellView::Start;
        }
        if Some(c) == self.end {
            return CellView::End;
        }
        if self.grid.is_obstacle(c) {
            return CellView::Obstacle;
        }
        match self.grid.bounds().index(c).map(|i| self.overlay[i]) {
            Some(Overlay::Explored) => CellView::Explored,
            Some(Overlay::Path) => CellView::Path,
            _ => CellView::Empty,
        }
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    /// Apply an action. Returns `false` when the user asked to quit.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::Select(c) => {
                if self.grid.is_in_bounds(c) {
                    self.cursor = c;
                    self.select(c);
                }
            }
            Action::SelectCursor => self.select(self.cursor),
            Action::MoveCursor { drow, dcol } => self.move_cursor(drow, dcol),
            Action::ToggleObstacle => self.toggle_obstacle(self.cursor),
            Action::RandomObstacles => self.random_obstacles(),
            Action::Reset => self.reset(),
            Action::CycleAlgorithm => self.cycle_algorithm(),
            Action::Faster => self.set_speed(self.speed.saturating_add(SPEED_STEP)),
            Action::Slower => self.set_speed(self.speed.saturating_sub(SPEED_STEP)),
            Action::Quit => return false,
        }
        true
    }

    /// Place the next endpoint: start first, then end. Placing the end with a
    /// start already set launches the search.
    pub fn select(&mut self, c: Coord) {
        if self.is_running() || !self.grid.is_in_bounds(c) {
            return;
        }
        if self.grid.is_obstacle(c) {
            self.message = format!("{c} is an obstacle");
            return;
        }

        if self.setting_start {
            self.start = Some(c);
            self.setting_start = false;
            self.message = format!("Start at {c}; select an end cell");
        } else {
            self.end = Some(c);
            self.setting_start = true;
            if let Some(start) = self.start {
                self.begin_search(start, c);
            }
        }
    }

    pub fn move_cursor(&mut self, drow: i32, dcol: i32) {
        let b = self.grid.bounds();
        self.cursor = Coord::new(
            (self.cursor.row + drow).clamp(0, (b.rows() - 1).max(0)),
            (self.cursor.col + dcol).clamp(0, (b.cols() - 1).max(0)),
        );
    }

    /// Flip the obstacle at `c`. Endpoints cannot be walled over.
    pub fn toggle_obstacle(&mut self, c: Coord) {
        if self.is_running() || Some(c) == self.start || Some(c) == self.end {
            return;
        }
        let blocked = self.grid.is_obstacle(c);
        self.grid_mut().set_obstacle(c, !blocked);
    }

    /// Re-roll obstacles everywhere except on the endpoints.
    pub fn random_obstacles(&mut self) {
        if self.is_running() {
            return;
        }
        let keep: Vec<Coord> = self.start.iter().chain(self.end.iter()).copied().collect();
        let density = self.density;
        self.engine.reset();
        let grid = Rc::make_mut(&mut self.grid);
        let placed = scatter_obstacles(grid, &mut self.rng, density, &keep);
        self.clear_overlay();
        self.metrics = None;
        self.message = format!("{placed} obstacles placed");
        log::info!("scattered {placed} obstacles at density {density}");
    }

    /// Stop any search and clear endpoints, obstacles, paint and metrics.
    pub fn reset(&mut self) {
        self.grid_mut().clear();
        self.start = None;
        self.end = None;
        self.setting_start = true;
        self.message = String::from("Select a start cell");
    }

    pub fn cycle_algorithm(&mut self) {
        if !self.is_running() {
            self.algorithm = self.algorithm.next();
        }
    }

    pub fn set_speed(&mut self, speed: u32) {
        self.speed = config::clamp_speed(speed);
    }

    // -----------------------------------------------------------------------
    // Search driving
    // -----------------------------------------------------------------------

    /// Advance a running search by one step and repaint. Does nothing when
    /// no search is running.
    pub fn tick(&mut self) -> Option<StepStatus> {
        if !self.is_running() {
            return None;
        }
        match self.engine.step() {
            Ok(StepStatus::Running) => {
                if let Some(c) = self.engine.last_explored() {
                    self.paint(c, Overlay::Explored);
                }
                Some(StepStatus::Running)
            }
            Ok(StepStatus::Succeeded) => {
                if let Err(e) = self.finish_success() {
                    self.fail(e);
                }
                Some(StepStatus::Succeeded)
            }
            Ok(StepStatus::Exhausted) => {
                self.message = String::from("No path found");
                log::info!("{} found no path", self.algorithm);
                Some(StepStatus::Exhausted)
            }
            Err(e) => {
                self.fail(e);
                None
            }
        }
    }

    fn begin_search(&mut self, start: Coord, end: Coord) {
        self.engine.reset();
        self.clear_overlay();
        self.metrics = None;
        match self
            .engine
            .start(Rc::clone(&self.grid), start, end, self.algorithm)
        {
            Ok(()) => {
                self.message = format!("Running {}", self.algorithm);
                log::info!("{} search {start} -> {end}", self.algorithm);
            }
            Err(e) => self.fail(e),
        }
    }

    fn finish_success(&mut self) -> Result<(), SearchError> {
        let path = self.engine.path()?;
        let metrics = self.engine.metrics()?;
        if let [_, interior @ .., _] = path.as_slice() {
            for &c in interior {
                self.paint(c, Overlay::Path);
            }
        }
        self.message = String::from("Path found");
        self.metrics = Some(metrics);
        log::info!(
            "{} found path: {} interior cells, {} explored",
            self.algorithm,
            metrics.path_length,
            metrics.explored_count
        );
        Ok(())
    }

    fn fail(&mut self, e: SearchError) {
        log::warn!("search failed: {e}");
        self.message = e.to_string();
    }

    fn paint(&mut self, c: Coord, overlay: Overlay) {
        if Some(c) == self.start || Some(c) == self.end {
            return;
        }
        if let Some(i) = self.grid.bounds().index(c) {
            self.overlay[i] = overlay;
        }
    }

    fn clear_overlay(&mut self) {
        self.overlay.fill(Overlay::Blank);
    }

    /// Mutable grid access. Drops the engine's session first so the grid is
    /// no longer shared and `make_mut` edits it in place. Paint and metrics
    /// of the previous search no longer apply and are cleared.
    fn grid_mut(&mut self) -> &mut Grid {
        self.engine.reset();
        self.clear_overlay();
        self.metrics = None;
        Rc::make_mut(&mut self.grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viz(size: i32) -> Visualizer {
        Visualizer::new(&VisualizerConfig {
            grid_size: size,
            seed: Some(3),
            ..VisualizerConfig::default()
        })
    }

    fn run_out(v: &mut Visualizer) -> StepStatus {
        loop {
            match v.tick() {
                Some(StepStatus::Running) => {}
                Some(done) => return done,
                None => panic!("tick on idle visualizer"),
            }
        }
    }

    #[test]
    fn selecting_end_starts_search() {
        let mut v = viz(5);
        v.select(Coord::new(0, 0));
        assert!(!v.is_running());
        assert_eq!(v.cell_view(Coord::new(0, 0)), CellView::Start);

        v.select(Coord::new(4, 4));
        assert!(v.is_running());
        assert_eq!(v.cell_view(Coord::new(4, 4)), CellView::End);
    }

    #[test]
    fn success_paints_path_and_metrics() {
        let mut v = viz(5);
        v.select(Coord::new(0, 0));
        v.select(Coord::new(4, 4));
        assert_eq!(run_out(&mut v), StepStatus::Succeeded);

        let m = v.metrics().unwrap();
        assert_eq!(m.path_length, 7);
        let painted = v
            .grid()
            .bounds()
            .iter()
            .filter(|&c| v.cell_view(c) == CellView::Path)
            .count();
        assert_eq!(painted, 7);
        let explored = v
            .grid()
            .bounds()
            .iter()
            .filter(|&c| matches!(v.cell_view(c), CellView::Explored | CellView::Path))
            .count();
        assert_eq!(explored, m.explored_count);
        assert_eq!(v.cell_view(Coord::new(0, 0)), CellView::Start);
        assert_eq!(v.cell_view(Coord::new(4, 4)), CellView::End);
        assert_eq!(v.message(), "Path found");
    }

    #[test]
    fn explored_cells_are_painted_while_running() {
        let mut v = viz(5);
        v.select(Coord::new(0, 0));
        v.select(Coord::new(4, 4));
        // The first expansion is the start, which keeps its own colour.
        assert_eq!(v.tick(), Some(StepStatus::Running));
        assert_eq!(v.cell_view(Coord::new(0, 0)), CellView::Start);
        assert_eq!(v.tick(), Some(StepStatus::Running));
        let explored = v
            .grid()
            .bounds()
            .iter()
            .filter(|&c| v.cell_view(c) == CellView::Explored)
            .count();
        assert_eq!(explored, 1);
    }

    #[test]
    fn walled_goal_reports_no_path() {
        let mut v = viz(5);
        v.cursor = Coord::new(3, 4);
        v.apply(Action::ToggleObstacle);
        v.cursor = Coord::new(4, 3);
        v.apply(Action::ToggleObstacle);
        v.select(Coord::new(0, 0));
        v.select(Coord::new(4, 4));
        assert_eq!(run_out(&mut v), StepStatus::Exhausted);
        assert_eq!(v.message(), "No path found");
        assert!(v.metrics().is_none());
    }

    #[test]
    fn editing_obstacles_clears_previous_result() {
        let mut v = viz(5);
        v.select(Coord::new(0, 0));
        v.select(Coord::new(4, 4));
        assert_eq!(run_out(&mut v), StepStatus::Succeeded);
        assert!(v.metrics().is_some());

        v.toggle_obstacle(Coord::new(0, 4));
        assert!(v.grid().is_obstacle(Coord::new(0, 4)));
        assert!(v.metrics().is_none());
        assert_eq!(v.phase(), Phase::Idle);
        let painted = v
            .grid()
            .bounds()
            .iter()
            .filter(|&c| matches!(v.cell_view(c), CellView::Explored | CellView::Path))
            .count();
        assert_eq!(painted, 0);
        assert_eq!(v.cell_view(Coord::new(0, 0)), CellView::Start);
        assert_eq!(v.cell_view(Coord::new(4, 4)), CellView::End);
    }

    #[test]
    fn obstacle_cannot_be_selected() {
        let mut v = viz(5);
        v.toggle_obstacle(Coord::new(2, 2));
        v.select(Coord::new(2, 2));
        assert_eq!(v.start(), None);
        assert!(v.message().contains("obstacle"));
    }

    #[test]
    fn input_ignored_while_running() {
        let mut v = viz(6);
        v.select(Coord::new(0, 0));
        v.select(Coord::new(5, 5));
        let algorithm = v.algorithm();

        v.apply(Action::CycleAlgorithm);
        v.apply(Action::RandomObstacles);
        v.toggle_obstacle(Coord::new(3, 3));
        v.select(Coord::new(1, 1));

        assert_eq!(v.algorithm(), algorithm);
        assert_eq!(v.grid().obstacle_count(), 0);
        assert_eq!(v.start(), Some(Coord::new(0, 0)));
        assert!(v.is_running());
    }

    #[test]
    fn reset_clears_everything() {
        let mut v = viz(5);
        v.apply(Action::RandomObstacles);
        v.select(Coord::new(0, 0));
        v.reset();
        assert_eq!(v.phase(), Phase::Idle);
        assert_eq!(v.grid().obstacle_count(), 0);
        assert_eq!(v.start(), None);
        assert_eq!(v.end(), None);
        assert!(v.metrics().is_none());

        v.select(Coord::new(1, 1));
        assert_eq!(v.start(), Some(Coord::new(1, 1)));
    }

    #[test]
    fn random_obstacles_spare_endpoints() {
        let mut v = Visualizer::new(&VisualizerConfig {
            grid_size: 8,
            obstacle_density: 1.0,
            seed: Some(9),
            ..VisualizerConfig::default()
        });
        v.select(Coord::new(0, 0));
        v.apply(Action::RandomObstacles);
        assert_eq!(v.grid().obstacle_count(), 63);
        assert_eq!(v.cell_view(Coord::new(0, 0)), CellView::Start);
    }

    #[test]
    fn new_start_replaces_old_and_repeat_search_repaints() {
        let mut v = viz(4);
        v.select(Coord::new(0, 0));
        v.select(Coord::new(0, 3));
        run_out(&mut v);
        let first = v.metrics().unwrap();

        v.select(Coord::new(3, 0));
        assert_eq!(v.start(), Some(Coord::new(3, 0)));
        assert_eq!(v.cell_view(Coord::new(0, 0)), CellView::Empty);
        v.select(Coord::new(3, 3));
        assert!(v.metrics().is_none());
        run_out(&mut v);
        assert_eq!(v.metrics().unwrap().path_length, first.path_length);
    }

    #[test]
    fn speed_and_cursor_are_clamped() {
        let mut v = viz(3);
        for _ in 0..20 {
            v.apply(Action::Faster);
        }
        assert_eq!(v.speed(), 100);
        assert_eq!(v.tick_interval(), Duration::from_millis(1));
        for _ in 0..20 {
            v.apply(Action::Slower);
        }
        assert_eq!(v.speed(), 1);

        v.apply(Action::MoveCursor { drow: -5, dcol: 9 });
        assert_eq!(v.cursor(), Coord::new(0, 2));
        assert!(!v.apply(Action::Quit));
    }
}
