//! CLI for maze play and inspection

use std::{
    fs,
    io::{self, BufRead, Read, Write},
    path::PathBuf,
};

use anyhow::bail;
use clap::Parser;
use hexmaze::{svg, Game, Maze, Side};

/// Decode, check and play hex-encoded grid mazes
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Report every wall-consistency violation instead of drawing the maze
    #[arg(short, long)]
    check: bool,

    /// Play the maze on the terminal, reading one move per line
    #[arg(short, long)]
    play: bool,

    /// Write an SVG rendering of the maze to this file
    #[arg(long, value_name = "FILE")]
    svg: Option<PathBuf>,

    /// File, where to read the maze. Use `-` for stdin.
    file: PathBuf,
}

/// Read maze from file, print output
fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let text = if args.file.to_str() == Some("-") {
        let mut buf = String::new();
        io::stdin().lock().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(args.file)?
    };
    let maze = Maze::parse_hex(&text)?;

    if args.check {
        let violations = maze.violations();
        for violation in &violations {
            eprintln!("{violation}");
        }
        if !violations.is_empty() {
            bail!("maze has {} wall-consistency violations", violations.len());
        }
        println!(
            "maze is consistent: {} rows, {} columns, {} wall segments",
            maze.height(),
            maze.width(),
            maze.walls().len()
        );
        return Ok(());
    }

    if let Some(path) = &args.svg {
        fs::write(path, svg::render(&maze, None))?;
        return Ok(());
    }

    if args.play {
        play(maze)?;
    } else {
        print!("{}", maze.to_ascii(None));
    }
    Ok(())
}

/// Move the player around until the bottom-right cell is reached.
///
/// Redraws the maze after every input line; `n`, `s`, `e` and `w` move,
/// `q` quits, anything else redraws in place.
fn play(maze: Maze) -> anyhow::Result<()> {
    let mut game = Game::new(maze);
    let stdin = io::stdin();

    loop {
        print!("\x1B[2J\x1B[1;1H");
        print!("{}", game.maze().to_ascii(Some(game.player())));
        if game.has_won() {
            println!("You won!");
            return Ok(());
        }
        print!("move [n/s/e/w], q to quit: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }
        let side = match line.trim() {
            "n" => Side::North,
            "s" => Side::South,
            "e" => Side::East,
            "w" => Side::West,
            "q" => return Ok(()),
            _ => continue,
        };
        game.step(side);
    }
}
