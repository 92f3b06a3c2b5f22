use docopt::Docopt;
use serde_derive::Deserialize;
use mazegen::{
    cells::Cartesian2DCoordinate,
    generators::{DepthFirstGenerator, StepOutcome},
    grid::Grid,
    grid_displays::{PathDisplay, StartEndPointsDisplay},
    grid_traits::GridDisplay,
    pathing,
    units::{Height, Width},
};
use rand::Rng;
use std::{
    io,
    io::prelude::*,
    fs::File,
    rc::Rc,
    thread,
    time::Duration,
};

const USAGE: &str = "Mazegen

Usage:
    mazegen_driver -h | --help
    mazegen_driver [(--grid-size=<n>|[--grid-width=<w> --grid-height=<h>])] [--seed=<s>] [--text-out=<path>] [(--show-distances|--show-path|--mark-start-end)] [--animate --step-millis=<ms>]

Options:
    -h --help            Show this screen.
    --grid-size=<n>      The grid size is n * n.
    --grid-width=<w>     The grid width in a w*h grid [default: 20].
    --grid-height=<h>    The grid height in a w*h grid [default: 20].
    --seed=<s>           Seed for the maze random number generator. Randomised when not given.
    --text-out=<path>    Output file path for a textual rendering of the maze.
    --show-distances     Show the distance from the entrance to all other cells.
    --show-path          Show the path from the entrance to the exit.
    --mark-start-end     Draw an 'S' (entrance) and 'E' (exit) to show where the maze is open.
    --animate            Redraw the maze after every generation step.
    --step-millis=<ms>   Delay between animation steps in milliseconds [default: 50].
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_grid_size: Option<usize>,
    flag_grid_width: usize,
    flag_grid_height: usize,
    flag_seed: Option<u32>,
    flag_text_out: String,
    flag_show_distances: bool,
    flag_show_path: bool,
    flag_mark_start_end: bool,
    flag_animate: bool,
    flag_step_millis: u64,
}

// We'll put our errors in an `errors` module, and other modules in
// this crate will `use errors::*;` to get access to everything
// `error_chain!` creates.
mod errors {
    // Create the Error, ErrorKind, ResultExt, and Result types
    // Result is a typedef of std `Result` with the error type our own `Error`
    // Defines the From conversions that let try! and ? work for our `Error`.
    // ResultExt adds the `chain_err` trait method.
    use error_chain::*;
    error_chain! {

        foreign_links {
            DocOptFailure(::docopt::Error);
            GridFailure(::mazegen::grid::GridError);
            GenerationFailure(::mazegen::generators::GenerationError);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let (width, height) = if let Some(square_grid_size) = args.flag_grid_size {
        (square_grid_size, square_grid_size)
    } else {
        (args.flag_grid_width, args.flag_grid_height)
    };
    let seed = args.flag_seed.unwrap_or_else(|| rand::weak_rng().gen::<u32>());

    let maze_grid = Grid::new(Width(width), Height(height))?;
    let mut generator = DepthFirstGenerator::from_seed(maze_grid, seed);
    let entrance = generator.entrance();
    let exit = generator.exit();

    if args.flag_animate {
        animate_generation(&mut generator, Duration::from_millis(args.flag_step_millis))?;
    } else {
        generator.run_to_completion()?;
    }

    let mut maze_grid = generator.into_grid();
    set_maze_griddisplay(&mut maze_grid, &args, entrance, exit)?;

    if args.flag_text_out.is_empty() {
        println!("{}", maze_grid);
    } else {
        write_text_to_file(&format!("{}", maze_grid), &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    Ok(())
}

/// Drive the generator one mutation at a time, redrawing after every step.
fn animate_generation(generator: &mut DepthFirstGenerator, step_delay: Duration) -> Result<()> {

    generator.start()?;
    loop {
        draw_frame(generator.grid());
        thread::sleep(step_delay);

        if let StepOutcome::Completed = generator.step()? {
            draw_frame(generator.grid());
            break;
        }
    }
    Ok(())
}

fn draw_frame(maze_grid: &Grid) {
    // ANSI clear + home, so every frame redraws in place.
    print!("\x1b[2J\x1b[H{}", maze_grid);
    let _ = io::stdout().flush();
}

/// Wade through the maze driver arguments and decide how the grid should have cells displayed as text
/// - Start and End point markers by default
/// - Distances from the entrance to all other cells
/// - The path from the entrance to the exit
fn set_maze_griddisplay(maze_grid: &mut Grid,
                        maze_args: &MazeArgs,
                        entrance: Cartesian2DCoordinate,
                        exit: Cartesian2DCoordinate)
                        -> Result<()> {

    if maze_args.flag_show_distances || maze_args.flag_show_path {

        let distances = Rc::new(pathing::Distances::new(maze_grid, entrance)
            .ok_or("The maze entrance is not a valid start coordinate for path distances.")?);

        if maze_args.flag_show_distances {

            maze_grid.set_grid_display(Some(distances.clone() as Rc<dyn GridDisplay>));

        } else {

            let path = pathing::solution_path(maze_grid, &distances, exit)
                .ok_or("The maze has no route from the entrance to the exit.")?;
            let display_path = Rc::new(PathDisplay::new(&path));
            maze_grid.set_grid_display(Some(display_path as Rc<dyn GridDisplay>));
        }
    } else {

        // Show where the maze is open, which also blanks the generation state markers.
        let display_start_end_points = Rc::new(StartEndPointsDisplay::new(entrance, exit));
        maze_grid.set_grid_display(Some(display_start_end_points as Rc<dyn GridDisplay>));
    }

    Ok(())
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}
