//! CLI for maze generation

use clap::Parser;
use hexmaze::maze_generator::MazeGenerator;

/// Map generator for hex-encoded grid mazes
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Generated field height
    #[arg(long, default_value_t = 10)]
    height: usize,

    /// Generated field width
    #[arg(long, default_value_t = 25)]
    width: usize,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,
}

/// Generate a maze, print it as rows of hex digits
fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut gen = MazeGenerator::new(args.seed);
    let maze = gen.generate_maze(args.height, args.width);
    println!("{}", maze.to_hex());
    Ok(())
}
