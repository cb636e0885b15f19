extern crate gato4x4;

use clap::{Parser, ValueEnum};
use colored::{ColoredString, Colorize};
use gato4x4::board::{BOARD_SIZE, Move};
use gato4x4::game::{Game, TurnState};
use gato4x4::minimax::MinimaxSearch;
use gato4x4::random::{CustomNumberGenerator, RandomGenerator, StandardRandomGenerator};
use gato4x4::trace::{SearchObserver, SearchTrace};
use gato4x4::{Mark, Player};
use std::io::{self, BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Opponent {
    /// Moves are typed on stdin
    Human,
    /// Moves are picked at random
    Random,
}

#[derive(Debug, Parser)]
#[command(name = "four_in_a_row", about = "Four in a row on a 4x4 board against the computer")]
struct Args {
    /// Let the computer make the first move
    #[arg(long)]
    computer_first: bool,

    /// Who plays X
    #[arg(long, value_enum, default_value_t = Opponent::Human)]
    opponent: Opponent,

    /// Seed for the random opponent and the random opening (deterministic when set)
    #[arg(long)]
    seed: Option<i64>,

    /// Number of games to play against the random opponent
    #[arg(long, default_value_t = 1)]
    games: u32,

    /// Print the score of every candidate after each computer move
    #[arg(long)]
    explain: bool,

    /// When the computer starts, open in a random corner instead of searching
    #[arg(long)]
    random_opening: bool,
}

type Lines<'a> = io::Lines<io::StdinLock<'a>>;

fn main() -> io::Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.seed {
        Some(seed) => run(&args, CustomNumberGenerator::new(seed)),
        None => run(&args, StandardRandomGenerator),
    }
}

fn run<K: RandomGenerator>(args: &Args, rg: K) -> io::Result<()> {
    let first = if args.computer_first {
        Player::Computer
    } else {
        Player::Human
    };
    if args.explain {
        let search = MinimaxSearch::builder()
            .with_observer(SearchTrace::new())
            .build();
        let game = Game::with_search(first, search);
        play_session(args, rg, game, Some(explain as fn(&Game<SearchTrace>)))
    } else {
        play_session(args, rg, Game::new(first), None)
    }
}

/// Plays games until the player stops or the requested number of games is reached.
/// `explainer` is called after every searched computer move.
fn play_session<K: RandomGenerator, O: SearchObserver>(
    args: &Args,
    mut rg: K,
    mut game: Game<O>,
    explainer: Option<fn(&Game<O>)>,
) -> io::Result<()> {
    let mut lines = io::stdin().lock().lines();

    let mut human_wins = 0;
    let mut computer_wins = 0;
    let mut draws = 0;
    let mut played = 0;

    loop {
        let Some(end) = play_one(&mut game, args, &mut rg, explainer, &mut lines)? else {
            return Ok(());
        };
        played += 1;
        match end {
            TurnState::Won(Player::Human) => human_wins += 1,
            TurnState::Won(Player::Computer) => computer_wins += 1,
            _ => draws += 1,
        }
        println!("{}", end_message(end).green().bold());

        let again = match args.opponent {
            Opponent::Random => played < args.games,
            Opponent::Human => ask_play_again(&mut lines)?,
        };
        if !again {
            break;
        }
        game.reset();
    }

    println!(
        "Played {played}: X won {human_wins}, O won {computer_wins}, {draws} drawn"
    );
    Ok(())
}

/// Plays until the game ends. Returns `None` if stdin was closed mid-game.
fn play_one<K: RandomGenerator, O: SearchObserver>(
    game: &mut Game<O>,
    args: &Args,
    rg: &mut K,
    explainer: Option<fn(&Game<O>)>,
    lines: &mut Lines<'_>,
) -> io::Result<Option<TurnState>> {
    let interactive = args.opponent == Opponent::Human;
    if interactive {
        draw_board(game);
    }

    while let Some(player) = game.state().to_move() {
        match player {
            Player::Human => match args.opponent {
                Opponent::Random => {
                    let Some(mv) = rg.pick_empty_cell(game.board()) else {
                        break;
                    };
                    game.play_human(mv).map_err(io::Error::other)?;
                }
                Opponent::Human => {
                    print!("Your move (X), as 'row col' in 0..{BOARD_SIZE}: ");
                    io::stdout().flush()?;
                    let Some(line) = lines.next().transpose()? else {
                        return Ok(None);
                    };
                    let Some(mv) = parse_move(&line) else {
                        println!("Type two numbers, for example '1 2'.");
                        continue;
                    };
                    if let Err(e) = game.play_human(mv) {
                        println!("{e}");
                        continue;
                    }
                }
            },
            Player::Computer => {
                if args.random_opening && game.board().is_blank() {
                    let mv = rg.pick_corner();
                    game.play_computer_at(mv).map_err(io::Error::other)?;
                    if interactive {
                        println!("O opens at {mv}");
                    }
                } else {
                    if interactive {
                        println!("Thinking...");
                    }
                    let mv = game.play_computer().map_err(io::Error::other)?;
                    if interactive {
                        println!("O plays {mv}");
                    }
                    if let Some(explain) = explainer {
                        explain(game);
                    }
                }
            }
        }

        if interactive {
            draw_board(game);
        }
    }

    if !interactive {
        draw_board(game);
    }
    Ok(Some(game.state()))
}

fn parse_move(line: &str) -> Option<Move> {
    let mut parts = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty());
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Move::new(row, col))
}

fn ask_play_again(lines: &mut Lines<'_>) -> io::Result<bool> {
    loop {
        print!("Play again? (y/n) ");
        io::stdout().flush()?;
        let Some(line) = lines.next().transpose()? else {
            return Ok(false);
        };
        match line.trim() {
            "y" | "Y" => return Ok(true),
            "n" | "N" => return Ok(false),
            _ => {}
        }
    }
}

fn explain(game: &Game<SearchTrace>) {
    let trace = game.search().get_observer();
    for (mv, score) in trace.candidates() {
        println!("  {mv} = {score}");
    }
    println!("  ({} positions explored)", trace.node_count());
}

fn draw_board<O: SearchObserver>(game: &Game<O>) {
    let line = game.winning_line();
    for row in 0..BOARD_SIZE {
        let cells: Vec<String> = (0..BOARD_SIZE)
            .map(|col| {
                let mv = Move::new(row, col);
                let mark = game.board().get(mv);
                let text = format!(" {} ", mark.symbol());
                let cell: ColoredString = if line.is_some_and(|l| l.contains(&mv)) {
                    text.as_str().green().bold()
                } else {
                    match mark {
                        Mark::Human => text.as_str().blue(),
                        Mark::Computer => text.as_str().red(),
                        Mark::Empty => text.as_str().normal(),
                    }
                };
                cell.to_string()
            })
            .collect();
        println!("{}", cells.join(&"|".cyan().to_string()));
        if row < BOARD_SIZE - 1 {
            println!("{}", "---+---+---+---".cyan());
        }
    }
    println!();
}

fn end_message(state: TurnState) -> &'static str {
    match state {
        TurnState::Won(Player::Human) => "Player X wins!",
        TurnState::Won(Player::Computer) => "Player O wins!",
        TurnState::Draw => "It's a draw!",
        TurnState::HumanTurn | TurnState::ComputerTurn => "Game interrupted",
    }
}
