//! Interactive text driver for the rules engine.
//!
//! Stands in for a real presentation layer: it renders the board as text,
//! forwards (from, to) square pairs into the session, and surfaces the
//! engine's answers. Commands:
//!
//! ```text
//! <row> <file> <row> <file>   play a move
//! moves <row> <file>          list legal destinations of a square
//! promote <queen|rook|bishop|knight>
//! load <placement>            replace the board from a placement string
//! fen                         print the current placement string
//! quit
//! ```

use std::io::{self, BufRead, Write};

use chess_rules::config::{parse_promotion, EngineConfig};
use chess_rules::engine::{Game, Side, Square};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chess_rules=info".into()),
        )
        .init();

    let config = EngineConfig::from_env();
    let mut game = Game::new();
    if let Some(placement) = &config.start_placement {
        game.load_placement(placement);
    }
    if game
        .set_promotion_preference(config.promotion_default)
        .is_err()
    {
        eprintln!("invalid configured promotion default; keeping queen");
    }

    tracing::info!(id = %game.id, "session started");

    let stdin = io::stdin();
    render(&game);
    prompt(&game);

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(_) => break,
        };
        let words: Vec<&str> = line.split_whitespace().collect();

        match words.as_slice() {
            [] => {}
            ["quit"] | ["exit"] => break,
            ["fen"] => println!("{}", game.placement()),
            ["load", placement] => {
                game.load_placement(placement);
                render(&game);
            }
            ["promote", name] => match parse_promotion(name) {
                Some(kind) => {
                    game.set_promotion_preference(kind)
                        .expect("parse_promotion only yields promotable kinds");
                    println!("promotion preference: {kind}");
                }
                None => println!("unknown promotion piece: {name}"),
            },
            ["moves", row, file] => match parse_square(row, file) {
                Some(sq) => {
                    let dests: Vec<String> = game
                        .legal_destinations(sq)
                        .iter()
                        .map(|d| d.to_string())
                        .collect();
                    println!("{}", dests.join(" "));
                }
                None => println!("bad square"),
            },
            [r1, f1, r2, f2] => match (parse_square(r1, f1), parse_square(r2, f2)) {
                (Some(from), Some(to)) => match game.make_move(from, to) {
                    Ok(true) => render(&game),
                    Ok(false) => println!("illegal move"),
                    Err(err) => {
                        eprintln!("fatal: {err}");
                        break;
                    }
                },
                _ => println!("bad square"),
            },
            _ => println!("unrecognized command"),
        }

        if game.is_game_over() {
            match game.mated_side() {
                Side::None => println!("game over: stalemate"),
                mated => println!("game over: {mated} is checkmated"),
            }
        }
        prompt(&game);
    }
}

fn parse_square(row: &str, file: &str) -> Option<Square> {
    let sq = Square::new(row.parse().ok()?, file.parse().ok()?);
    sq.in_bounds().then_some(sq)
}

fn render(game: &Game) {
    println!("\n{}\n", game.board());
}

fn prompt(game: &Game) {
    print!("{} (turn {})> ", game.active_side(), game.turn_count());
    let _ = io::stdout().flush();
}
