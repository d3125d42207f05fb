extern crate pelletbot;

use clap::Parser;
use pelletbot::{
    join_commands, Board, CellKind, Collectible, Command, Coord, Error, Game, Ranking,
    TargetSelector, TurnInput, Unit,
};

use flo_canvas::*;
use flo_draw::*;

use futures::executor;
use futures::prelude::*;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

const CELL: f32 = 32.;
const SUPER_PELLETS: usize = 4;
const UNITS_PER_SIDE: usize = 2;

#[derive(Parser, Debug)]
#[command(about = "Visual playground for the pellet bot")]
struct Args {
    #[arg(long, default_value_t = 31)]
    width: usize,

    #[arg(long, default_value_t = 15)]
    height: usize,

    #[arg(long, default_value_t = 0.25)]
    wall_density: f64,

    /// Fixed seed for reproducible maps.
    #[arg(long)]
    seed: Option<u64>,
}

struct SimWorld {
    units: Vec<Unit>,
    pellets: Vec<Collectible>,
    turn: i32,
}

// Left half is random, right half mirrors it. Top and bottom rows are walls,
// side edges stay open so the wraparound tunnels show up.
fn gen_rows(rng: &mut StdRng, args: &Args) -> Vec<String> {
    let (w, h) = (args.width, args.height);
    let mut grid = vec![vec![' '; w]; h];

    for y in 0..h {
        for x in 0..(w + 1) / 2 {
            let wall = y == 0 || y + 1 == h || rng.gen_bool(args.wall_density);
            if wall {
                grid[y][x] = '#';
                grid[y][w - 1 - x] = '#';
            }
        }
    }

    grid.into_iter().map(|row| row.into_iter().collect()).collect()
}

fn random_floor(rng: &mut StdRng, board: &Board, taken: &[Coord]) -> Option<Coord> {
    let free = board
        .floor_cells()
        .map(|c| c.pos)
        .filter(|pos| !taken.contains(pos))
        .collect::<Vec<_>>();
    if free.is_empty() {
        None
    } else {
        Some(free[rng.gen_range(0..free.len())])
    }
}

impl SimWorld {
    fn gen_random_world(rng: &mut StdRng, board: &Board) -> Self {
        let mut taken = Vec::new();
        let mut units = Vec::new();

        for i in 0..UNITS_PER_SIDE * 2 {
            if let Some(pos) = random_floor(rng, board, &taken) {
                taken.push(pos);
                units.push(Unit::new((i / 2) as i32, i % 2 == 0, pos));
            }
        }

        let mut pellets = Vec::new();
        for _ in 0..SUPER_PELLETS {
            if let Some(pos) = random_floor(rng, board, &taken) {
                taken.push(pos);
                pellets.push(Collectible::new(pos, 10));
            }
        }
        for cell in board.floor_cells() {
            if !taken.contains(&cell.pos) && rng.gen_bool(0.3) {
                pellets.push(Collectible::new(cell.pos, 1));
            }
        }

        SimWorld {
            units,
            pellets,
            turn: 0,
        }
    }

    fn build_turn(&self) -> TurnInput {
        TurnInput {
            my_score: self.turn,
            opponent_score: 0,
            units: self.units.clone(),
            collectibles: self.pellets.clone(),
        }
    }

    // Own units take one step towards their target and eat what they land on.
    fn advance(&mut self, board: &Board, commands: &[Command]) {
        for command in commands {
            let Command::Move { id, target } = *command;
            if let Some(unit) = self.units.iter_mut().find(|u| u.mine && u.id == id) {
                if let Some(next) = board.next_step(unit.pos, target) {
                    unit.pos = next;
                }
                let pos = unit.pos;
                self.pellets.retain(|p| p.pos != pos);
            }
        }
        self.turn += 1;
    }
}

fn cell_rect(gc: &mut CanvasGraphicsContext, board: &Board, pos: Coord, col: Color) {
    let top = (board.height() - pos.y) as f32 * CELL;
    let left = pos.x as f32 * CELL;

    gc.new_path();
    gc.rect(left, top - CELL, left + CELL, top);
    gc.fill_color(col);
    gc.fill();
}

fn cell_center(board: &Board, pos: Coord) -> (f32, f32) {
    (
        (pos.x as f32 + 0.5) * CELL,
        (board.height() - pos.y) as f32 * CELL - CELL * 0.5,
    )
}

fn draw_circle_at_pos(
    gc: &mut CanvasGraphicsContext,
    board: &Board,
    pos: Coord,
    radius: f32,
    col: Color,
) {
    let (x, y) = cell_center(board, pos);
    gc.new_path();

    gc.circle(x, y, radius);

    gc.fill_color(col);

    gc.fill();
    gc.line_width(1.0);
    gc.stroke_color(Color::Rgba(0.0, 0.0, 0.0, 1.0));
    gc.stroke();
}

fn draw_board(gc: &mut CanvasGraphicsContext, board: &Board) {
    for cell in board.cells() {
        let col = match cell.kind {
            CellKind::Wall => Color::Rgba(0.1, 0.1, 0.35, 1.),
            CellKind::Floor => Color::Rgba(0.95, 0.95, 0.95, 1.),
        };
        cell_rect(gc, board, cell.pos, col);
    }
}

fn draw_world(gc: &mut CanvasGraphicsContext, board: &Board, world: &SimWorld) {
    for p in &world.pellets {
        let radius = if p.value > 1 { CELL * 0.3 } else { CELL * 0.1 };
        draw_circle_at_pos(gc, board, p.pos, radius, Color::Rgba(1., 0.8, 0., 1.));
    }

    for u in &world.units {
        let col = if u.mine {
            Color::Rgba(0., 0.4, 1., 1.)
        } else {
            Color::Rgba(1., 0., 0., 1.)
        };
        draw_circle_at_pos(gc, board, u.pos, CELL * 0.4, col);
    }
}

fn draw_distances(gc: &mut CanvasGraphicsContext, board: &Board, from: Coord) {
    let table = board.distances();
    let from = board.index_of(from);
    let max = table
        .reachable_from(from)
        .map(|(_, d)| d)
        .max()
        .unwrap_or(0)
        .max(1) as f32;

    // unreachable cells stay grey
    for cell in board.floor_cells() {
        cell_rect(gc, board, cell.pos, Color::Rgba(0.4, 0.4, 0.4, 0.8));
    }

    for (to, d) in table.reachable_from(from) {
        let t = d as f32 / max;
        let pos = Coord::from_index(to, board.width());
        cell_rect(gc, board, pos, Color::Rgba(t, 1. - t, 0.2, 0.5));
    }
}

fn draw_targets(
    gc: &mut CanvasGraphicsContext,
    board: &Board,
    world: &SimWorld,
    commands: &[Command],
) {
    for command in commands {
        let Command::Move { id, target } = *command;
        let Some(unit) = world.units.iter().find(|u| u.mine && u.id == id) else {
            continue;
        };

        let (x1, y1) = cell_center(board, unit.pos);
        let (x2, y2) = cell_center(board, target);

        gc.new_path();
        gc.move_to(x1, y1);
        gc.line_to(x2, y2);
        gc.line_width(3.0);
        gc.stroke_color(Color::Rgba(0.0, 0.6, 0.0, 0.8));
        gc.stroke();
    }
}

struct App {
    args: Args,
    rng: StdRng,
    sim_world: SimWorld,
    game: Game,
    commands: Vec<Command>,
    canvas: Canvas,

    draw_distances: bool,
    draw_targets: bool,
}

impl App {
    fn new(canvas: Canvas, args: Args) -> Result<Self, Error> {
        let mut rng = match args.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let rows = gen_rows(&mut rng, &args);
        let board = Board::new(args.width, args.height, &rows)?;
        let sim_world = SimWorld::gen_random_world(&mut rng, &board);

        let mut app = App {
            args,
            rng,
            sim_world,
            game: Game::new(board, TargetSelector::default()),
            commands: Vec::new(),
            canvas,
            draw_distances: false,
            draw_targets: true,
        };
        app.replan();
        Ok(app)
    }

    fn replan(&mut self) {
        self.commands = self.game.play(self.sim_world.build_turn());
        println!("turn {}: {}", self.sim_world.turn, join_commands(&self.commands));
    }

    fn redraw(&mut self) {
        let board = self.game.board();
        let (w, h) = (board.width() as f32 * CELL, board.height() as f32 * CELL);

        self.canvas.draw(|gc| {
            gc.clear_all_layers();
            gc.canvas_height(h);
            gc.center_region(0.0, 0.0, w, h);

            draw_board(gc, board);

            if self.draw_distances {
                if let Some(unit) = self.sim_world.units.iter().find(|u| u.mine) {
                    draw_distances(gc, board, unit.pos);
                }
            }

            draw_world(gc, board, &self.sim_world);

            if self.draw_targets {
                draw_targets(gc, board, &self.sim_world, &self.commands);
            }
        });
    }

    fn regenerate_map(&mut self) -> Result<(), Error> {
        let rows = gen_rows(&mut self.rng, &self.args);
        let board = Board::new(self.args.width, self.args.height, &rows)?;
        self.sim_world = SimWorld::gen_random_world(&mut self.rng, &board);
        self.game = Game::new(board, self.game.selector);
        self.replan();

        self.redraw();
        Ok(())
    }

    fn next_turn(&mut self) {
        self.sim_world.advance(self.game.board(), &self.commands);
        self.replan();
        self.redraw();
    }

    fn switch_ranking(&mut self) {
        self.game.selector.ranking = match self.game.selector.ranking {
            Ranking::Nearest => Ranking::ValueFirst,
            Ranking::ValueFirst => Ranking::Nearest,
        };
        println!("ranking: {:?}", self.game.selector.ranking);
        self.replan();
        self.redraw();
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    with_2d_graphics(|| {
        executor::block_on(async {
            let (canvas, mut events) = create_canvas_window_with_events("PELLETBOT");

            let mut app = match App::new(canvas, args) {
                Ok(app) => app,
                Err(err) => {
                    eprintln!("cannot build map: {err}");
                    std::process::exit(1);
                }
            };

            app.redraw();

            while let Some(event) = events.next().await {
                match event {
                    DrawEvent::KeyDown(_, Some(Key::KeySpace)) => {
                        if let Err(err) = app.regenerate_map() {
                            eprintln!("cannot build map: {err}");
                        }
                    }
                    DrawEvent::KeyDown(_, Some(Key::KeyN)) => {
                        app.next_turn();
                    }
                    DrawEvent::KeyDown(_, Some(Key::KeyEscape)) => {
                        std::process::exit(0);
                    }
                    DrawEvent::KeyDown(_, Some(Key::Key1)) => {
                        app.draw_distances = !app.draw_distances;
                        app.redraw();
                    }
                    DrawEvent::KeyDown(_, Some(Key::Key2)) => {
                        app.draw_targets = !app.draw_targets;
                        app.redraw();
                    }
                    DrawEvent::KeyDown(_, Some(Key::Key3)) => {
                        app.switch_ranking();
                    }
                    _ => {}
                }
            }
        });
    });
}
