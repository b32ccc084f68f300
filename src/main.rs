use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use backgammon::{
    backgammon::{Color, Game, GameOutcome, SENTINEL},
    simulation,
};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "backgammon", version, about = "Two-player backgammon at the terminal")]
struct Cli {
    /// Seed for the dice. Random when omitted.
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Play a game, both players at the same keyboard.
    Play {
        #[arg(long, default_value = "White")]
        white: String,
        #[arg(long, default_value = "Black")]
        black: String,
    },
    /// Play random games and print the results.
    Simulate {
        #[arg(long, default_value_t = 1000)]
        games: u32,
    },
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Roll,
    Move { from: i32, to: i32, die: Option<u8> },
    Moves,
    Pass,
    Board,
    State,
    Restart,
    Help,
    Quit,
}

const HELP: &str = "\
commands:
  roll                   roll the dice
  move FROM TO [DIE]     move a checker; points are 1-24, FROM may be 'bar', TO may be 'off'
  moves                  list the moves the dice allow
  pass                   end the turn
  board                  show the board
  state                  print the game state as JSON
  restart                start over with the same players
  help                   show this text
  quit                   leave";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let seed = cli.seed.unwrap_or_else(rand::random);

    match cli.mode {
        Mode::Play { white, black } => play(&white, &black, seed),
        Mode::Simulate { games } => run_simulation(games, seed),
    }
}

fn play(white: &str, black: &str, seed: u64) -> Result<()> {
    let mut game = Game::with_seed(white, black, seed)?;
    println!("{} (white, 24 -> 1) vs {} (black, 1 -> 24)", white, black);
    println!("{}", game.board());
    println!("{}", HELP);

    let stdin = io::stdin();
    prompt(&game)?;
    for line in stdin.lock().lines() {
        let line = line.context("failed to read from stdin")?;
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message);
                prompt(&game)?;
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => println!("{}", HELP),
            Command::Board => println!("{}", game.board()),
            Command::State => println!("{}", serde_json::to_string_pretty(&game.snapshot())?),
            Command::Restart => {
                game.restart();
                println!("{}", game.board());
            }
            Command::Roll => match game.roll_dice() {
                Ok(distances) => {
                    println!("rolled {:?}", distances);
                    if !game.has_legal_move() {
                        println!("no legal move, use 'pass'");
                    }
                }
                Err(e) => println!("{}", e),
            },
            Command::Moves => {
                let moves = game.legal_moves();
                if moves.is_empty() {
                    println!("no legal move");
                }
                for half_move in moves {
                    println!("  {:?}", half_move);
                }
            }
            Command::Move { from, to, die } => match game.move_checker(from, to, die) {
                Ok(half_move) => {
                    println!("moved {:?}", half_move);
                    println!("{}", game.board());
                    if let Some(winner) = game.winner() {
                        println!("{} wins {}", winner, describe(game.outcome()));
                    } else if game.dice().all_used() || !game.has_legal_move() {
                        println!("turn is over, use 'pass'");
                    } else {
                        println!("dice left: {:?}", game.available_distances());
                    }
                }
                Err(e) => println!("{}", e),
            },
            Command::Pass => {
                game.change_turn();
                println!("{} to play", game.current_player());
            }
        }
        prompt(&game)?;
    }
    Ok(())
}

fn prompt(game: &Game) -> Result<()> {
    let marker = match game.turn() {
        Color::White => "W",
        Color::Black => "B",
    };
    print!("{} {}> ", game.current_player().name(), marker);
    io::stdout().flush().context("failed to flush stdout")
}

fn describe(outcome: GameOutcome) -> String {
    match outcome {
        GameOutcome::Ongoing => "nothing yet".to_string(),
        GameOutcome::Win(_) => "a single game (1 point)".to_string(),
        GameOutcome::Gammon(_) => "a gammon (2 points)".to_string(),
        GameOutcome::Backgammon(_) => "a backgammon (3 points)".to_string(),
    }
}

fn parse_command(line: &str) -> Result<Command, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&name, args)) = words.split_first() else {
        return Err("type 'help' for the commands".to_string());
    };

    let command = match name.to_lowercase().as_str() {
        "roll" | "r" => Command::Roll,
        "moves" => Command::Moves,
        "pass" | "p" => Command::Pass,
        "board" | "b" => Command::Board,
        "state" => Command::State,
        "restart" => Command::Restart,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        "move" | "m" => match args {
            [from, to] | [from, to, _] => Command::Move {
                from: parse_point(from, "bar")?,
                to: parse_point(to, "off")?,
                die: match args.get(2) {
                    Some(die) => Some(die.parse().map_err(|_| format!("'{}' is not a die value", die))?),
                    None => None,
                },
            },
            _ => return Err("usage: move FROM TO [DIE]".to_string()),
        },
        other => return Err(format!("unknown command '{}', type 'help'", other)),
    };
    Ok(command)
}

/// Turns a 1-based point, or `word` for the bar / off, into an engine index.
fn parse_point(token: &str, word: &str) -> Result<i32, String> {
    if token.eq_ignore_ascii_case(word) {
        return Ok(SENTINEL);
    }
    match token.parse::<i32>() {
        Ok(point) if (1..=24).contains(&point) => Ok(point - 1),
        _ => Err(format!("'{}' is not a point (1-24 or '{}')", token, word)),
    }
}

fn run_simulation(games: u32, seed: u64) -> Result<()> {
    let start = std::time::Instant::now();
    let tally = simulation::simulate(games, seed)?;
    let duration = start.elapsed();

    println!("============================================");
    println!("Games: {}, unfinished: {}, seed: {}", tally.games, tally.unfinished, seed);
    for color in Color::ALL {
        let i = color.index();
        println!(
            "{:?}: wins {} ({:.2}%), gammons {}, backgammons {}, points {}",
            color,
            tally.total_wins(color),
            tally.win_rate(color),
            tally.gammons[i],
            tally.backgammons[i],
            tally.points(color)
        );
    }
    println!("Simulation took: {:?}", duration);
    println!("============================================");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_move() {
        assert_eq!(
            parse_command("move 24 19"),
            Ok(Command::Move { from: 23, to: 18, die: None })
        );
        assert_eq!(
            parse_command("m bar 20 5"),
            Ok(Command::Move { from: -1, to: 19, die: Some(5) })
        );
        assert_eq!(
            parse_command("move 3 OFF"),
            Ok(Command::Move { from: 2, to: -1, die: None })
        );
        assert!(parse_command("move 0 3").is_err());
        assert!(parse_command("move 3").is_err());
        assert!(parse_command("move 5 off x").is_err());
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_command("roll"), Ok(Command::Roll));
        assert_eq!(parse_command("  PASS "), Ok(Command::Pass));
        assert_eq!(parse_command("q"), Ok(Command::Quit));
        assert!(parse_command("").is_err());
        assert!(parse_command("jump").is_err());
    }

    #[test]
    fn test_cli_arguments() {
        let cli = Cli::try_parse_from(["backgammon", "--seed", "7", "simulate", "--games", "10"]).unwrap();
        assert_eq!(cli.seed, Some(7));
        assert!(matches!(cli.mode, Mode::Simulate { games: 10 }));
    }
}
