use std::io::{BufRead, Write};

use clap::{Parser, Subcommand};
#[cfg(feature = "perft")]
use pawnshop::game::perft::PerftConfig;
use pawnshop::game::{colour::Colour, piece::PieceKind, square::Square, state::GameState};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Arguments {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plays a game in the terminal, reading moves from standard input (DEFAULT)
    Play,
    /// Runs perft (generating all moves up to a certain depth)
    Perft {
        /// Maximum depth to reach
        depth: u8,
        /// Shows move count for each move from the starting position
        #[arg(short, long)]
        divide: bool,
        /// Generates moves for each depth up to the maximum
        #[arg(short, long)]
        iterative: bool,
        /// Show timing information
        #[arg(long)]
        bench: bool,
        /// Counts legal moves at horizon nodes instead of playing each of them
        #[arg(short, long)]
        bulk: bool,

        /// Does not show the board and other decorations
        #[arg(long)]
        no_board: bool,
    },
}

pub fn main() -> std::io::Result<()> {
    let args = Arguments::parse();
    env_logger::init();

    match args.command.unwrap_or(Command::Play) {
        Command::Play => play(std::io::stdin().lock(), std::io::stdout().lock())?,
        #[cfg(feature = "perft")]
        Command::Perft {
            depth,
            divide,
            iterative,
            bench,
            bulk,
            no_board,
        } => {
            PerftConfig {
                depth,
                divide,
                iterative,
                bench,
                bulk_counting: bulk,
                show_board: !no_board,
            }
            .go(&mut GameState::new());
        }
        #[cfg(not(feature = "perft"))]
        Command::Perft { .. } => {
            eprintln!("Pawnshop has not been compiled with feature `perft`");
        }
    }
    Ok(())
}

const HELP: &str = "\
commands:
  <from><to>[piece]  play a move, e.g. e2e4 or e7e8n
  undo               take back the last move
  new                start a new game
  flip               turn the board around
  moves              list legal moves
  history            list moves played
  help               show this message
  quit               leave";

/// Interactive loop: one command per line.
fn play(input: impl BufRead, mut out: impl Write) -> std::io::Result<()> {
    let mut game = GameState::new();
    let mut perspective = Colour::White;

    show(&mut game, perspective, &mut out)?;
    for line in input.lines() {
        let line = line?;
        match line.trim() {
            "" => continue,
            "quit" | "exit" => break,
            "help" => writeln!(out, "{HELP}")?,
            "new" => {
                game = GameState::new();
                show(&mut game, perspective, &mut out)?;
            }
            "undo" => {
                match game.undo_move() {
                    Some(mv) => writeln!(out, "took back {mv}")?,
                    None => writeln!(out, "nothing to take back")?,
                }
                show(&mut game, perspective, &mut out)?;
            }
            "flip" => {
                perspective.invert();
                show(&mut game, perspective, &mut out)?;
            }
            "moves" => {
                let moves: Vec<String> =
                    game.legal_moves().iter().map(|mv| mv.to_string()).collect();
                writeln!(out, "{}", moves.join(" "))?;
            }
            "history" => {
                for (i, pair) in game.move_log().collect::<Vec<_>>().chunks(2).enumerate() {
                    let black = pair.get(1).map(|mv| mv.to_string()).unwrap_or_default();
                    writeln!(out, "{}. {} {black}", i + 1, pair[0])?;
                }
            }
            text => match parse_move(text) {
                Some((start, end, promotion)) => {
                    if try_move(&mut game, start, end, promotion, &mut out)? {
                        show(&mut game, perspective, &mut out)?;
                    }
                }
                None => writeln!(out, "unknown command {text:?}, type `help`")?,
            },
        }
    }
    Ok(())
}

/// Splits `e7e8n` into its squares and optional promotion piece.
fn parse_move(text: &str) -> Option<(Square, Square, Option<PieceKind>)> {
    let start = text.get(0..2)?.parse().ok()?;
    let end = text.get(2..4)?.parse().ok()?;
    let promotion = match text.get(4..)? {
        "" => None,
        piece => {
            let mut chars = piece.chars();
            let kind = PieceKind::from_symbol(chars.next()?).ok()?;
            if chars.next().is_some() {
                return None;
            }
            Some(kind)
        }
    };
    Some((start, end, promotion))
}

/// Plays a move typed by the user. Returns whether the position changed.
fn try_move(
    game: &mut GameState,
    start: Square,
    end: Square,
    promotion: Option<PieceKind>,
    out: &mut impl Write,
) -> std::io::Result<bool> {
    if let Some(kind) = promotion.filter(|kind| !kind.is_valid_promotion_target()) {
        writeln!(out, "cannot promote to {kind:?}")?;
        return Ok(false);
    }

    let status = game.status();
    if status.is_terminal() {
        writeln!(out, "{status}, type `undo` or `new`")?;
        return Ok(false);
    }
    let Some(mv) = game.find_move(start, end) else {
        writeln!(out, "illegal move {start}{end}")?;
        return Ok(false);
    };

    if let Err(err) = game.make_move(mv) {
        writeln!(out, "{err}")?;
        return Ok(false);
    }
    if let Some(kind) = promotion.filter(|_| mv.is_promotion()) {
        if let Err(err) = game.finalize_promotion(kind) {
            writeln!(out, "{err}")?;
        }
    }
    Ok(true)
}

fn show(game: &mut GameState, perspective: Colour, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "\n{}\n", game.board().diagram(perspective))?;

    let side = game.side_to_move();
    let status = game.status();
    if status.is_terminal() {
        writeln!(out, "{status}")
    } else if game.is_in_check(side) {
        writeln!(out, "{side} to move, in check")
    } else {
        writeln!(out, "{side} to move")
    }
}
