use std::{
    fmt,
    fs::File,
    io::{self, BufRead, Write},
};

use clap::{App, Arg, ArgMatches};
use once_cell::sync::Lazy;
use rand::{rngs::StdRng, Rng, SeedableRng};
use regex::Regex;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode, WriteLogger};

use miniwar::{
    AttackError, AttackOutcome, FinishReason, Game, GameStatus, Player, Rules, TerritoryMap,
};

fn main() -> io::Result<()> {
    let matches = App::new("War")
        .version("1.0")
        .author("Zachary Stewart <zachary@zstewart.com>")
        .about("Two-player territory conquest with secret missions.")
        .arg(
            Arg::with_name("seed")
                .short("s")
                .long("seed")
                .value_name("SEED")
                .help("seed the dice for a reproducible game")
                .takes_value(true)
                .validator(|v| v.parse::<u64>().map(|_| ()).map_err(|e| e.to_string())),
        )
        .arg(
            Arg::with_name("turn_limit")
                .short("t")
                .long("turn-limit")
                .value_name("ROUNDS")
                .help("number of full rounds before the game is a draw")
                .takes_value(true)
                .validator(|v| match v.parse::<u32>() {
                    Ok(0) => Err("must be at least 1".to_string()),
                    Ok(_) => Ok(()),
                    Err(e) => Err(e.to_string()),
                }),
        )
        .arg(
            Arg::with_name("no_pause")
                .long("no-pause")
                .help("don't wait for Enter between turns"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("log more detail; repeat for more"),
        )
        .arg(
            Arg::with_name("log_file")
                .long("log-file")
                .value_name("PATH")
                .help("write logs to a file instead of stderr")
                .takes_value(true),
        )
        .get_matches();

    init_logging(&matches)?;

    let rules = Rules {
        turn_limit: matches
            .value_of("turn_limit")
            .and_then(|v| v.parse().ok())
            .unwrap_or(Rules::default().turn_limit),
    };
    // Pick a seed even when none is given so the game can be replayed from the log.
    let seed = matches
        .value_of("seed")
        .and_then(|v| v.parse().ok())
        .unwrap_or_else(|| rand::thread_rng().gen::<u64>());
    let mut rng = StdRng::seed_from_u64(seed);
    let pause = !matches.is_present("no_pause");
    log::info!(
        "starting game with seed {} and a limit of {} rounds",
        seed,
        rules.turn_limit
    );

    let stdin = std::io::stdin();
    let mut input = InputReader::new(stdin.lock());

    let mut game = Game::new(rules, &mut rng);

    println!("--- Welcome to Mini-War! ---");
    println!();
    for &player in &Player::ALL {
        println!("Mission for {}: {}", PlayerName(player), game.mission(player));
    }
    println!();
    input.wait("Let the games begin! Press Enter for the first round...")?;

    while let Some(player) = game.current() {
        if player == Player::P1 {
            println!();
            println!("--- ROUND {} ---", game.round());
            show_map(game.map());
        } else if pause {
            input.wait(&format!("Press Enter for {}'s turn...", PlayerName(player)))?;
        }

        println!();
        println!("-- {}'s turn --", PlayerName(player));
        let (attacker, defender) = match choose_attack(&game, player, &mut input)? {
            Some(order) => order,
            None => {
                log::info!("{} quit in round {}", PlayerName(player), game.round());
                println!("Game abandoned.");
                return Ok(());
            }
        };
        match game.play_turn(player, attacker, defender, &mut rng) {
            Ok(report) => {
                if let Err(err) = &report.attack {
                    log::info!(
                        "{} wasted their turn attacking {} from {}: {}",
                        PlayerName(player),
                        defender,
                        attacker,
                        err
                    );
                }
                show_attack(game.map(), attacker, defender, &report.attack)
            }
            // Only the current player is ever asked to play.
            Err(_) => unreachable!(),
        }
    }

    show_result(&game);
    println!("Game over. Thanks for playing!");
    Ok(())
}

/// Install the logger selected on the command line.
fn init_logging(matches: &ArgMatches) -> io::Result<()> {
    let level = match matches.occurrences_of("verbose") {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let installed = match matches.value_of("log_file") {
        Some(path) => WriteLogger::init(level, Config::default(), File::create(path)?),
        None => TermLogger::init(
            level,
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ),
    };
    installed.map_err(|err| io::Error::new(io::ErrorKind::Other, err))
}

/// Ask the player which territory attacks which. Returns `None` if the player quits.
fn choose_attack(
    game: &Game,
    player: Player,
    input: &mut InputReader<impl BufRead>,
) -> io::Result<Option<(usize, usize)>> {
    let last = game.map().len() - 1;
    loop {
        let prompt = format!(
            "Attack with <attacker> <defender> (0-{}), or type help [{}]>",
            last,
            player.color()
        );
        let cmd = input.read_input_lower(&prompt, parse_command)?;

        match cmd {
            Command::Attack(attacker, defender) => return Ok(Some((attacker, defender))),
            Command::Map => show_map(game.map()),
            Command::Mission => println!("Your mission: {}", game.mission(player)),
            Command::Quit => return Ok(None),
            Command::Help => {
                println!(
                    "Available Commands:
    <attacker> <defender>   attack the territory at index <defender> using the troops at
        index <attacker>. Also accepts \"attack 0 2\", \"0,2\", and \"0 -> 2\".
    map                     show the current map.
    mission                 show your secret mission.
    quit                    leave the game."
                );
            }
        }
    }
}

/// Commands a player can give on their turn.
#[derive(Debug, Eq, PartialEq)]
enum Command {
    Attack(usize, usize),
    Map,
    Mission,
    Help,
    Quit,
}

/// Parse one line of lowercased input, telling the player what was wrong if it is not
/// a command.
fn parse_command(input: &str) -> Option<Command> {
    /// Matcher for the attack command.
    static ATTACK: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"^(?x)(?:(?:attack|atk)\s+)?
        (?P<attacker>[0-9]+)(?:\s*,\s*|\s+(?:(?:on|->|=>)\s+)?|\s*(?:->|=>)\s*)
        (?P<defender>[0-9]+)$",
        )
        .unwrap()
    });

    match input {
        "?" | "help" | "h" => Some(Command::Help),
        "map" | "m" => Some(Command::Map),
        "mission" => Some(Command::Mission),
        "quit" | "exit" | "q" => Some(Command::Quit),
        other => {
            if let Some(captures) = ATTACK.captures(other) {
                match (
                    captures["attacker"].parse(),
                    captures["defender"].parse(),
                ) {
                    (Ok(attacker), Ok(defender)) => Some(Command::Attack(attacker, defender)),
                    _ => {
                        log::debug!("territory indices out of range in {:?}", other);
                        println!("Invalid indices!");
                        None
                    }
                }
            } else {
                log::debug!("unrecognized command {:?}", other);
                println!("Invalid command \"{}\". Use '?' for help", other);
                None
            }
        }
    }
}

/// Print out every territory in map order.
fn show_map(map: &TerritoryMap) {
    println!("--- CURRENT MAP ---");
    for (i, territory) in map.iter().enumerate() {
        println!(
            "  Index {}: {:<12} (Color: {:<8}, Troops: {})",
            i,
            territory.name(),
            territory.owner(),
            territory.troops()
        );
    }
}

/// Narrate the outcome of an attack.
fn show_attack(
    map: &TerritoryMap,
    attacker: usize,
    defender: usize,
    attack: &Result<AttackOutcome, AttackError>,
) {
    // Names never change, so they can be read after the attack.
    let name = |index| map.get(index).map(|t| t.name()).unwrap_or("?");
    match attack {
        Ok(outcome) => {
            let rolls = outcome.rolls();
            println!(
                "  > Battle: attack ({}) rolled {} | defense ({}) rolled {}",
                name(attacker),
                rolls.attack,
                name(defender),
                rolls.defense
            );
            match outcome {
                AttackOutcome::Conquered { moved, .. } => println!(
                    "  > VICTORY! {} conquered {} and moved {} troops in!",
                    name(attacker),
                    name(defender),
                    moved
                ),
                AttackOutcome::Repelled { .. } => println!(
                    "  > DEFEAT! {} lost the battle and 1 troop.",
                    name(attacker)
                ),
            }
        }
        Err(AttackError::InvalidIndex(_)) => println!("Invalid indices!"),
        Err(AttackError::SameOwner) => {
            println!("INVALID ATTACK: you can't attack your own territory!")
        }
        Err(AttackError::InsufficientTroops) => {
            println!("INVALID ATTACK: you need more than 1 troop to attack!")
        }
    }
}

/// Announce how the game ended.
fn show_result(game: &Game) {
    println!();
    match game.status() {
        GameStatus::Finished(FinishReason::Won(player)) => {
            println!("*****************************************");
            println!("  {} WON THE GAME!", PlayerName(player));
            println!("  Mission complete: {}", game.mission(player));
            println!("*****************************************");
        }
        GameStatus::Finished(FinishReason::TurnLimitReached) => {
            println!(
                "--- TURN LIMIT OF {} ROUNDS REACHED! THE GAME IS A DRAW! ---",
                game.rules().turn_limit
            );
            for &player in &Player::ALL {
                println!("  {} had the mission: {}", PlayerName(player), game.mission(player));
            }
        }
        GameStatus::Awaiting(_) => unreachable!(),
    }
}

/// Display helper that prints the player's number and color.
struct PlayerName(Player);

impl PlayerName {
    fn number(&self) -> u8 {
        match self.0 {
            Player::P1 => 1,
            Player::P2 => 2,
        }
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Player {} ({})", self.number(), self.0.color())
    }
}

/// Helper to read input from the player.
struct InputReader<B> {
    read: B,
    buf: String,
}

impl<B> InputReader<B> {
    fn new(read: B) -> Self {
        Self {
            read,
            buf: String::new(),
        }
    }
}

impl<B: BufRead> InputReader<B> {
    /// Repeatedly tries to read input until the input checker returns `Some`. Converts
    /// to ascii lower before running the checker.
    fn read_input_lower<F, T>(&mut self, prompt: &str, mut checker: F) -> io::Result<T>
    where
        F: FnMut(&str) -> Option<T>,
    {
        loop {
            self.read_input_inner(prompt)?;
            self.buf.make_ascii_lowercase();
            if let Some(val) = checker(self.buf.trim()) {
                return Ok(val);
            }
        }
    }

    /// Print the prompt and wait for the player to press Enter.
    fn wait(&mut self, prompt: &str) -> io::Result<()> {
        self.read_input_inner(prompt)
    }

    /// Helper to print the prompt, clear the string buffer and read a line.
    fn read_input_inner(&mut self, prompt: &str) -> io::Result<()> {
        print!("{} ", prompt);
        io::stdout().flush()?;
        self.buf.clear();
        if self.read.read_line(&mut self.buf)? == 0 {
            println!();
            std::process::exit(0);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attack_command_forms() {
        for line in &["0 2", "0,2", "0 , 2", "0 -> 2", "0->2", "0 on 2", "attack 0 2", "atk 0 2"] {
            assert_eq!(parse_command(line), Some(Command::Attack(0, 2)), "{}", line);
        }
        assert_eq!(parse_command("4 1"), Some(Command::Attack(4, 1)));
        assert_eq!(parse_command("12 7"), Some(Command::Attack(12, 7)));
    }

    #[test]
    fn named_commands() {
        assert_eq!(parse_command("?"), Some(Command::Help));
        assert_eq!(parse_command("help"), Some(Command::Help));
        assert_eq!(parse_command("m"), Some(Command::Map));
        assert_eq!(parse_command("mission"), Some(Command::Mission));
        assert_eq!(parse_command("exit"), Some(Command::Quit));
    }

    #[test]
    fn bad_commands_are_refused() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("0"), None);
        assert_eq!(parse_command("-1 2"), None);
        assert_eq!(parse_command("a b"), None);
        assert_eq!(parse_command("99999999999999999999999 1"), None);
    }

    #[test]
    fn reads_until_valid_command() {
        let mut input = InputReader::new(&b"nonsense\n\n  MAP \n"[..]);
        let cmd = input.read_input_lower(">", parse_command).unwrap();
        assert_eq!(cmd, Command::Map);
    }
}
